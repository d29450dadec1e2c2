//! Event payloads published on the bus.

use serde::{Deserialize, Serialize};

use game_core::{Position, Tick};

use crate::session::TickReport;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SimulationEvent {
    /// One processed tick with every applied action in order.
    TickCompleted(TickReport),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum SessionEvent {
    LevelLoaded { actors: usize, seed: u64 },
    PlayerMoved { from: Position, to: Position },
    PlayerDied { at: Tick },
}
