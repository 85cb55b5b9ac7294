//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::broadcast;

use super::types::{GameStateEvent, TurnEvent};
use crate::api::{Result, RuntimeError};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Game state changes (resolutions, rejections, resets)
    GameState,
    /// Turn hand-off events
    Turn,
}

impl Topic {
    pub const ALL: [Topic; 2] = [Topic::GameState, Topic::Turn];
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    GameState(GameStateEvent),
    Turn(TurnEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::GameState(_) => Topic::GameState,
            Event::Turn(_) => Topic::Turn,
        }
    }

    /// Encodes the event as a single JSON line.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(RuntimeError::Encode)
    }
}

/// Fixed set of broadcast senders, one per topic.
struct Channels {
    game_state: broadcast::Sender<Event>,
    turn: broadcast::Sender<Event>,
}

impl Channels {
    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::GameState => &self.game_state,
            Topic::Turn => &self.turn,
        }
    }
}

/// Topic-based event bus
///
/// Allows consumers to subscribe to specific topics and only receive
/// events they care about.
#[derive(Clone)]
pub struct EventBus {
    channels: Arc<Channels>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            channels: Arc::new(Channels {
                game_state: broadcast::channel(capacity).0,
                turn: broadcast::channel(capacity).0,
            }),
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channels.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!("No subscribers for topic {:?}", topic);
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channels.sender(topic).subscribe()
    }

    /// Subscribe to multiple topics
    ///
    /// Returns receivers for each requested topic.
    pub fn subscribe_multiple(
        &self,
        topics: &[Topic],
    ) -> HashMap<Topic, broadcast::Receiver<Event>> {
        topics
            .iter()
            .map(|&topic| (topic, self.subscribe(topic)))
            .collect()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn events_route_by_topic() {
        let bus = EventBus::with_capacity(8);
        let mut turns = bus.subscribe(Topic::Turn);
        let mut states = bus.subscribe(Topic::GameState);

        bus.publish(Event::Turn(TurnEvent {
            side: game_core::Side::Ai,
            turn: 1,
            spawned: None,
        }));

        let Event::Turn(turn) = turns.recv().await.unwrap() else {
            panic!("expected a turn event");
        };
        assert_eq!(turn.turn, 1);
        assert!(states.try_recv().is_err());
    }

    #[test]
    fn publishing_without_subscribers_is_harmless() {
        let bus = EventBus::default();
        bus.publish(Event::GameState(GameStateEvent::ActionRejected {
            side: game_core::Side::Player,
            code: "SUBMIT_RESOLVING".into(),
            severity: game_core::ErrorSeverity::Recoverable,
            reason: "an action is still resolving".into(),
        }));
        let receivers = bus.subscribe_multiple(&Topic::ALL);
        assert_eq!(receivers.len(), 2);
    }

    #[test]
    fn events_encode_as_json() {
        let event = Event::Turn(TurnEvent {
            side: game_core::Side::Player,
            turn: 3,
            spawned: Some(game_core::Position::new(2, 4)),
        });
        let line = event.to_json().unwrap();
        assert!(line.contains("\"turn\":3"));
        assert!(!line.contains('\n'));
    }
}
