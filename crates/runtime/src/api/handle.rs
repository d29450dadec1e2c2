//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and offers async helpers for
//! stepping the simulation or streaming events from specific topics.
use std::collections::HashMap;

use tokio::sync::{broadcast, mpsc, oneshot};

use game_core::{EntityId, GameState, Occupant, Position, Tick, VisibilityGrid};

use super::errors::{Result, RuntimeError};
use crate::events::{Event, EventBus, Topic};
use crate::session::{LevelSetup, TickReport};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    command_tx: mpsc::Sender<Command>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<Command>, event_bus: EventBus) -> Self {
        Self {
            command_tx,
            event_bus,
        }
    }

    /// Sends a command built around a fresh reply channel and awaits the reply.
    async fn request<T>(&self, build: impl FnOnce(oneshot::Sender<T>) -> Command) -> Result<T> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.command_tx
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed)?;

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Process every eligible actor at `now`.
    ///
    /// `now` is milliseconds in continuous mode and the player's turn counter
    /// in turn mode. The cadence is the caller's concern.
    pub async fn tick(&self, now: Tick) -> Result<TickReport> {
        self.request(|reply| Command::Tick { now, reply }).await?
    }

    /// Move the player, returning the cell it left.
    pub async fn move_player(&self, to: Position) -> Result<Position> {
        self.request(|reply| Command::MovePlayer { to, reply })
            .await?
    }

    pub async fn set_player_invisible(&self, invisible: bool) -> Result<()> {
        self.request(|reply| Command::SetPlayerInvisible { invisible, reply })
            .await?
    }

    /// Replace the visibility grid with one computed by the host.
    pub async fn set_visibility(&self, grid: VisibilityGrid) -> Result<()> {
        self.request(|reply| Command::SetVisibility { grid, reply })
            .await
    }

    /// Replace terrain and actors and rebuild the spatial index.
    pub async fn load_level(&self, level: LevelSetup) -> Result<()> {
        let level = Box::new(level);
        self.request(|reply| Command::LoadLevel { level, reply })
            .await
    }

    /// Apply host-side damage; `true` when the actor died and was removed.
    pub async fn damage_actor(&self, id: EntityId, amount: i32) -> Result<bool> {
        self.request(|reply| Command::DamageActor { id, amount, reply })
            .await?
    }

    /// Occupants of a cell, for interaction checks.
    pub async fn occupants(&self, position: Position) -> Result<Vec<Occupant>> {
        self.request(|reply| Command::Occupants { position, reply })
            .await
    }

    /// Snapshot of the current game state.
    pub async fn query_state(&self) -> Result<GameState> {
        self.request(|reply| Command::QueryState { reply }).await
    }

    /// Stop the worker. Later requests fail with
    /// [`RuntimeError::CommandChannelClosed`].
    pub async fn shutdown(&self) -> Result<()> {
        self.request(|reply| Command::Shutdown { reply }).await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Simulation` - per-tick action reports
    /// - `Topic::Session` - level loads, player movement and death
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use runtime::Topic;
    ///
    /// let mut rx = handle.subscribe(Topic::Simulation);
    /// while let Ok(event) = rx.recv().await {
    ///     // Drive animations from the report
    /// }
    /// ```
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        self.event_bus.subscribe_multiple(topics)
    }
}
