//! Topic-based event bus for runtime events.
//!
//! The engine publishes log lines, render snapshots and round results to
//! separate topics; observers subscribe only to the topics they need.

mod bus;

pub use bus::{Event, EventBus, Topic};
