//! Topic-based event bus implementation.

use game_core::LootDrop;
use tokio::sync::broadcast;

use crate::engine::RoundOutcome;
use crate::view::GameView;

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum Topic {
    /// Combat log lines
    Log,
    /// Render snapshots taken after every state change
    Render,
    /// Round results and loot drops
    Round,
}

/// Event wrapper carrying the typed payload
#[derive(Debug, Clone)]
pub enum Event {
    /// One line of the combat log.
    Log(String),

    /// State snapshot for the presentation layer.
    Rendered(Box<GameView>),

    /// Drops of the previous encounter, announced when the next one starts.
    Loot(Vec<LootDrop>),

    Outcome(RoundOutcome),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Log(_) => Topic::Log,
            Event::Rendered(_) => Topic::Render,
            Event::Loot(_) | Event::Outcome(_) => Topic::Round,
        }
    }
}

/// Topic-based event bus
///
/// Publishing never blocks and never fails: events sent while a topic has no
/// subscribers are dropped. Clones share the same channels.
#[derive(Clone)]
pub struct EventBus {
    log: broadcast::Sender<Event>,
    render: broadcast::Sender<Event>,
    round: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            log: broadcast::channel(capacity).0,
            render: broadcast::channel(capacity).0,
            round: broadcast::channel(capacity).0,
        }
    }

    fn channel(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Log => &self.log,
            Topic::Render => &self.render,
            Topic::Round => &self.round,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.channel(topic).send(event).is_err() {
            tracing::trace!(?topic, "no subscribers");
        }
    }

    /// Subscribe to a specific topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.channel(topic).subscribe()
    }

    /// Subscribe to multiple topics
    pub fn subscribe_multiple(&self, topics: &[Topic]) -> Vec<(Topic, broadcast::Receiver<Event>)> {
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

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("log_subscribers", &self.log.receiver_count())
            .field("render_subscribers", &self.render.receiver_count())
            .field("round_subscribers", &self.round.receiver_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_reach_only_their_topic() {
        let bus = EventBus::new();
        let mut log = bus.subscribe(Topic::Log);
        let mut round = bus.subscribe(Topic::Round);

        bus.publish(Event::Log("A new round has started!".into()));
        bus.publish(Event::Outcome(RoundOutcome::Defeat));

        assert!(matches!(log.try_recv(), Ok(Event::Log(line)) if line == "A new round has started!"));
        assert!(log.try_recv().is_err());
        assert!(matches!(round.try_recv(), Ok(Event::Outcome(RoundOutcome::Defeat))));
    }

    #[test]
    fn publishing_without_subscribers_is_silent() {
        let bus = EventBus::with_capacity(0);
        bus.publish(Event::Loot(Vec::new()));
        let mut receivers = bus.subscribe_multiple(&[Topic::Render, Topic::Round]);
        assert_eq!(receivers.len(), 2);
        assert!(receivers[0].1.try_recv().is_err());
    }
}
