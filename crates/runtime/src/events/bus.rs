//! Topic-based event bus implementation.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{SessionEvent, SimulationEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Per-tick action reports for render and audio layers
    Simulation,
    /// Level loads, player movement and death
    Session,
}

impl Topic {
    pub const ALL: [Topic; 2] = [Topic::Simulation, Topic::Session];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Simulation(SimulationEvent),
    Session(SessionEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Simulation(_) => Topic::Simulation,
            Event::Session(_) => Topic::Session,
        }
    }
}

/// Topic-based event bus
///
/// Every topic gets its own broadcast channel at construction, so publishing
/// never takes a lock. Consumers subscribe only to the topics they need.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<HashMap<Topic, broadcast::Sender<Event>>>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity for each topic
    pub fn with_capacity(capacity: usize) -> Self {
        let channels = Topic::ALL
            .into_iter()
            .map(|topic| (topic, broadcast::channel(capacity.max(1)).0))
            .collect();
        Self {
            channels: Arc::new(channels),
        }
    }

    /// Publish an event to its topic
    ///
    /// Events without subscribers are dropped.
    pub fn publish(&self, event: Event) {
        if let Some(sender) = self.channels.get(&event.topic()) {
            // No receivers is not an error for a broadcast bus.
            let _ = sender.send(event);
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        match self.channels.get(&topic) {
            Some(sender) => sender.subscribe(),
            // Unreachable with `Topic::ALL` registered; a detached channel
            // keeps the signature infallible.
            None => broadcast::channel(1).1,
        }
    }

    /// Subscribe to multiple topics at once
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }

    /// Number of live receivers on a topic
    pub fn receiver_count(&self, topic: Topic) -> usize {
        self.channels
            .get(&topic)
            .map_or(0, broadcast::Sender::receiver_count)
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
