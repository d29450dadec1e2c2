//! Worker tasks that back the runtime orchestration.
//!
//! The simulation worker owns the session and executes commands one at a
//! time.

mod simulation;

pub use simulation::{Command, SimulationWorker};
