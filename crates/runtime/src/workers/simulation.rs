//! Simulation worker that owns the authoritative [`Session`].
//!
//! Receives commands from [`crate::RuntimeHandle`], drives ticks, and
//! publishes events to the [`EventBus`]. The worker is the single writer of
//! the actor arena and spatial index; every command runs to completion
//! before the next is read.

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info};

use game_core::{EntityId, GameState, Occupant, Position, Tick, VisibilityGrid};

use crate::api::Result;
use crate::events::{Event, EventBus, SessionEvent, SimulationEvent};
use crate::session::{LevelSetup, Session, TickReport};

/// Commands that can be sent to the simulation worker
pub enum Command {
    /// Process every eligible actor at `now`.
    Tick {
        now: Tick,
        reply: oneshot::Sender<Result<TickReport>>,
    },
    MovePlayer {
        to: Position,
        reply: oneshot::Sender<Result<Position>>,
    },
    SetPlayerInvisible {
        invisible: bool,
        reply: oneshot::Sender<Result<()>>,
    },
    SetVisibility {
        grid: VisibilityGrid,
        reply: oneshot::Sender<()>,
    },
    /// Replace terrain and actors; rebuilds the spatial index.
    LoadLevel {
        level: Box<LevelSetup>,
        reply: oneshot::Sender<()>,
    },
    DamageActor {
        id: EntityId,
        amount: i32,
        reply: oneshot::Sender<Result<bool>>,
    },
    Occupants {
        position: Position,
        reply: oneshot::Sender<Vec<Occupant>>,
    },
    /// Query the current game state (read-only).
    QueryState { reply: oneshot::Sender<GameState> },
    Shutdown { reply: oneshot::Sender<()> },
}

/// Background task that processes simulation commands.
pub struct SimulationWorker {
    session: Session,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl SimulationWorker {
    pub fn new(session: Session, command_rx: mpsc::Receiver<Command>, event_bus: EventBus) -> Self {
        info!(
            actors = session.state().entities().len(),
            "SimulationWorker initialized"
        );
        Self {
            session,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop.
    ///
    /// Ends on an explicit shutdown or when every handle is dropped.
    pub async fn run(mut self) {
        while let Some(command) = self.command_rx.recv().await {
            if self.handle_command(command) {
                break;
            }
        }
        info!("SimulationWorker stopped");
    }

    /// Returns `true` when the loop should stop.
    fn handle_command(&mut self, command: Command) -> bool {
        match command {
            Command::Tick { now, reply } => {
                let result = self.session.tick(now);
                if let Ok(report) = &result {
                    self.publish_tick(report);
                }
                if reply.send(result).is_err() {
                    debug!("tick reply dropped: receiver closed");
                }
            }
            Command::MovePlayer { to, reply } => {
                let result = self.session.move_player(to);
                if let Ok(&from) = result.as_ref() {
                    self.event_bus
                        .publish(Event::Session(SessionEvent::PlayerMoved { from, to }));
                }
                if reply.send(result).is_err() {
                    debug!("move reply dropped: receiver closed");
                }
            }
            Command::SetPlayerInvisible { invisible, reply } => {
                let _ = reply.send(self.session.set_player_invisible(invisible));
            }
            Command::SetVisibility { grid, reply } => {
                self.session.set_visibility(grid);
                let _ = reply.send(());
            }
            Command::LoadLevel { level, reply } => {
                let seed = level.seed;
                self.session.load_level(*level);
                let actors = self.session.state().entities().len();
                self.event_bus
                    .publish(Event::Session(SessionEvent::LevelLoaded { actors, seed }));
                let _ = reply.send(());
            }
            Command::DamageActor { id, amount, reply } => {
                let result = self
                    .session
                    .damage_actor(id, amount)
                    .map(|removed| removed.is_some());
                let _ = reply.send(result);
            }
            Command::Occupants { position, reply } => {
                let _ = reply.send(self.session.occupants(position));
            }
            Command::QueryState { reply } => {
                let _ = reply.send(self.session.state().clone());
            }
            Command::Shutdown { reply } => {
                let _ = reply.send(());
                return true;
            }
        }
        false
    }

    fn publish_tick(&self, report: &TickReport) {
        if report.player_died {
            self.event_bus
                .publish(Event::Session(SessionEvent::PlayerDied { at: report.now }));
        }
        if !report.is_idle() {
            self.event_bus
                .publish(Event::Simulation(SimulationEvent::TickCompleted(report.clone())));
        }
    }
}
