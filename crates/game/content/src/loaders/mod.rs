//! Content loaders for hydrating records from a [`ContentStore`].
//!
//! Every loader fetches `<module>/<scope>/<id>.json`, stamps the record with
//! its `id` and `module`, hydrates nested references through the loaders it
//! depends on and caches the result in its own [`crate::ContentCache`].

pub mod actions;
pub mod config;
pub mod entity;
pub mod factory;
pub mod item;

pub use actions::ActionLoader;
pub use config::ConfigLoader;
pub use entity::EntityLoader;
pub use factory::ContentFactory;
pub use item::{ItemLoader, LoadedItems, title_case};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{LoadError, LoadResult};
use crate::store::ContentStore;

/// Record directory within a module.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    Item,
    Action,
    Entity,
}

impl Scope {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Item => "item",
            Self::Action => "action",
            Self::Entity => "entity",
        }
    }

    /// Store path of record `id` in `module`.
    pub fn path(self, module: &str, id: &str) -> String {
        format!("{module}/{}/{id}.json", self.as_str())
    }
}

/// Reads and parses one record, injecting its `id` and `module`.
pub(crate) async fn fetch_record(
    store: &dyn ContentStore,
    scope: Scope,
    module: &str,
    id: &str,
) -> LoadResult<(String, Value)> {
    let path = scope.path(module, id);
    let raw = store.read(&path).await?;
    let mut record: Value =
        serde_json::from_str(&raw).map_err(|e| LoadError::malformed(&path, e))?;

    let Value::Object(fields) = &mut record else {
        let err = <serde_json::Error as serde::de::Error>::custom("expected a JSON object");
        return Err(LoadError::malformed(path, err));
    };
    fields.insert("id".to_string(), Value::String(id.to_string()));
    fields.insert("module".to_string(), Value::String(module.to_string()));
    Ok((path, record))
}

pub(crate) fn decode<T: DeserializeOwned>(path: &str, record: Value) -> LoadResult<T> {
    serde_json::from_value(record).map_err(|e| LoadError::malformed(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_paths() {
        assert_eq!(Scope::Item.path("dnd", "weapon/dagger"), "dnd/item/weapon/dagger.json");
        assert_eq!(Scope::Entity.path("base", "goblin"), "base/entity/goblin.json");
    }
}
