//! Scheduling primitives shared by the tick driver.
mod scheduler;

pub use scheduler::{ActionClock, ActionScheduler, SchedulerMode};
