//! Data-driven content definitions and loaders.
//!
//! Content lives in a string-keyed [`ContentStore`] (a directory tree in
//! production, memory in tests) as JSON records grouped by module and scope:
//! - Actions, optionally parameterized with `$param` tokens
//! - Items, referencing the actions they grant
//! - Entity archetypes, referencing items, loadouts and loot tables
//! - Session configuration (`game.toml`)
//!
//! Loaders hydrate records into `game-core` types and cache them per loader
//! for the rest of the session.

pub mod cache;
pub mod error;
pub mod loaders;
pub mod store;
pub mod template;

pub use cache::{CacheKey, ContentCache};
pub use error::{LoadError, LoadResult};
pub use loaders::{
    ActionLoader, ConfigLoader, ContentFactory, EntityLoader, ItemLoader, LoadedItems, Scope,
};
pub use store::{ContentStore, DirectoryStore, MemoryStore};
pub use template::Params;
