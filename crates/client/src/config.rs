//! Client configuration loaded from the process environment.
use std::env;
use std::path::PathBuf;

use game_content::ContentFactory;
use game_core::GameConfig;

#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub content_dir: PathBuf,
    pub module: String,
    /// Fixed seed for a reproducible session; entropy when unset.
    pub seed: Option<u64>,
    pub max_rounds: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            content_dir: ContentFactory::bundled_data_dir().to_path_buf(),
            module: GameConfig::DEFAULT_MODULE.to_string(),
            seed: None,
            max_rounds: 50,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CONTENT_DIR` - Directory holding content modules (default: bundled data)
    /// - `CONTENT_MODULE` - Module to play (default: `dnd`)
    /// - `GAME_SEED` - RNG seed (default: entropy)
    /// - `MAX_ROUNDS` - Rounds to play before stopping (default: 50)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("CONTENT_DIR") {
            config.content_dir = PathBuf::from(dir);
        }
        if let Ok(module) = env::var("CONTENT_MODULE") {
            config.module = module;
        }
        config.seed = read_env::<u64>("GAME_SEED");
        if let Some(rounds) = read_env::<u32>("MAX_ROUNDS") {
            config.max_rounds = rounds.max(1);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
