//! Content factory wiring the loaders over one store.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use game_core::GameConfig;

use super::{ActionLoader, ConfigLoader, EntityLoader, ItemLoader};
use crate::error::LoadResult;
use crate::store::{ContentStore, DirectoryStore};

/// Owns one instance of each loader, each with its own cache.
///
/// # Store Layout
///
/// ```text
/// <module>/
/// ├── game.toml
/// ├── simple_items.json
/// ├── action/<id>.json
/// ├── item/<id>.json
/// └── entity/<id>.json
/// ```
pub struct ContentFactory {
    store: Arc<dyn ContentStore>,
    actions: Arc<ActionLoader>,
    items: Arc<ItemLoader>,
    entities: EntityLoader,
}

impl ContentFactory {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        let actions = Arc::new(ActionLoader::new(Arc::clone(&store)));
        let items = Arc::new(ItemLoader::new(Arc::clone(&store), Arc::clone(&actions)));
        let entities = EntityLoader::new(Arc::clone(&store), Arc::clone(&items));
        Self {
            store,
            actions,
            items,
            entities,
        }
    }

    /// Factory over a directory of modules.
    pub fn from_dir(data_dir: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(DirectoryStore::new(data_dir)))
    }

    /// Directory of the content bundled with this crate.
    pub fn bundled_data_dir() -> &'static Path {
        Path::new(concat!(env!("CARGO_MANIFEST_DIR"), "/data"))
    }

    /// Load game configuration from `<module>/game.toml`.
    pub async fn load_config(&self, module: &str) -> LoadResult<GameConfig> {
        ConfigLoader::load(&*self.store, module).await
    }

    pub fn actions(&self) -> &ActionLoader {
        &self.actions
    }

    pub fn items(&self) -> &ItemLoader {
        &self.items
    }

    pub fn entities(&self) -> &EntityLoader {
        &self.entities
    }
}
