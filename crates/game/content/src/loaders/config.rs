//! Game configuration loader.

use game_core::GameConfig;

use crate::error::{LoadError, LoadResult};
use crate::store::ContentStore;

/// Loader for session configuration from `<module>/game.toml`.
pub struct ConfigLoader;

impl ConfigLoader {
    pub const FILE_NAME: &'static str = "game.toml";

    /// Loads and parses the module's config. The returned config's `module`
    /// is always the one it was loaded from.
    pub async fn load(store: &dyn ContentStore, module: &str) -> LoadResult<GameConfig> {
        let path = format!("{module}/{}", Self::FILE_NAME);
        let content = store.read(&path).await?;
        let mut config: GameConfig = toml::from_str(&content).map_err(|e| LoadError::Config {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        config.module = module.to_string();
        Ok(config)
    }
}
