//! Runtime orchestration for the two-party combat loop.
//!
//! This crate wires the content loaders, the injected random source and the
//! game-core rules into a [`CombatEngine`] with a small command surface.
//! Consumers drive rounds through the engine and observe it through the
//! [`EventBus`].
//!
//! Modules are organized by responsibility:
//! - [`engine`] hosts the round loop and commands
//! - [`events`] provides the topic-based event bus
//! - [`view`] defines the read-only snapshot handed to renderers
//! - [`rng`] adapts `rand` to the game-core random oracle
pub mod engine;
pub mod error;
pub mod events;
pub mod rng;
pub mod view;

pub use engine::{BoxedRng, CombatEngine, RoundOutcome, Side};
pub use error::{Result, RuntimeError};
pub use events::{Event, EventBus, Topic};
pub use rng::StdRngOracle;
pub use view::{ActionView, EntityView, EquippedView, GameView, InventoryRowView, InventoryView};
