//! Action loader.

use std::sync::Arc;

use game_core::Action;
use serde_json::Value;

use super::{Scope, decode, fetch_record};
use crate::cache::{CacheKey, ContentCache};
use crate::error::{LoadError, LoadResult};
use crate::store::ContentStore;
use crate::template::{Params, merge_params, substitute};

/// Loads actions, applying caller parameters to parameterized records.
pub struct ActionLoader {
    store: Arc<dyn ContentStore>,
    cache: ContentCache<Action>,
}

impl ActionLoader {
    pub fn new(store: Arc<dyn ContentStore>) -> Self {
        Self {
            store,
            cache: ContentCache::new("action"),
        }
    }

    /// Loads action `id` from `module`.
    ///
    /// Each distinct `params` map yields its own cached record. An empty map
    /// is the same as no params.
    pub async fn load(
        &self,
        id: &str,
        module: &str,
        params: Option<&Params>,
    ) -> LoadResult<Arc<Action>> {
        let params = params.filter(|p| !p.is_empty());
        let key = CacheKey::new(module, id).with_params(
            params
                .map(|p| Value::Object(p.clone()).to_string())
                .unwrap_or_default(),
        );
        self.cache
            .get_or_load(key, || self.fetch(id, module, params))
            .await
    }

    async fn fetch(&self, id: &str, module: &str, params: Option<&Params>) -> LoadResult<Action> {
        let (path, mut record) = fetch_record(&*self.store, Scope::Action, module, id).await?;

        // Only records that declare params are templated.
        if let Some(declared) = record.as_object_mut().and_then(|fields| fields.remove("params")) {
            let Value::Object(defaults) = declared else {
                return Err(LoadError::template(&path, "declared params must be an object"));
            };
            let merged = merge_params(&defaults, params);
            substitute(&mut record, &merged);
        }

        decode(&path, record)
    }

    /// Number of hydrated actions held in the cache.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::store::MemoryStore;
    use game_core::{EffectKind, Roll};

    const ATTACK: &str = r#"{
        "params": {"name": "Attack", "damage": "1d4", "type": "bludgeoning", "cost": 1},
        "name": "$name",
        "cost": "$cost",
        "display": ["{user.name} uses $name on {target.name}"],
        "effects": [{"id": "damage", "amount": "$damage", "type": "$type"}]
    }"#;

    fn loader() -> (Arc<MemoryStore>, ActionLoader) {
        let store = Arc::new(
            MemoryStore::new()
                .with("dnd/action/weapon/attack.json", ATTACK)
                .with("dnd/action/basic/raw.json", r#"{"name": "$literal", "cost": 1}"#)
                .with("dnd/action/basic/broken.json", r#"{"params": [1, 2]}"#),
        );
        let loader = ActionLoader::new(store.clone());
        (store, loader)
    }

    fn params(value: Value) -> Params {
        match value {
            Value::Object(map) => map,
            _ => panic!("params must be an object"),
        }
    }

    #[tokio::test]
    async fn applies_caller_params_over_defaults() {
        let (_, loader) = loader();
        let stab = params(json!({"name": "Stab", "type": "piercing"}));
        let action = loader.load("weapon/attack", "dnd", Some(&stab)).await.unwrap();

        assert_eq!(action.id, "weapon/attack");
        assert_eq!(action.module, "dnd");
        assert_eq!(action.name, "Stab");
        assert_eq!(action.cost, 1);
        assert_eq!(action.display, vec!["{user.name} uses Stab on {target.name}"]);
        assert_eq!(action.effects[0].kind, EffectKind::damage(Roll::dice(1, 4), "piercing"));
    }

    #[tokio::test]
    async fn defaults_apply_without_params() {
        let (_, loader) = loader();
        let action = loader.load("weapon/attack", "dnd", None).await.unwrap();
        assert_eq!(action.name, "Attack");
        assert_eq!(action.effects[0].kind, EffectKind::damage(Roll::dice(1, 4), "bludgeoning"));
    }

    #[tokio::test]
    async fn records_without_params_are_left_alone() {
        let (_, loader) = loader();
        let action = loader.load("basic/raw", "dnd", None).await.unwrap();
        assert_eq!(action.name, "$literal");
    }

    #[tokio::test]
    async fn cache_is_keyed_by_params() {
        let (store, loader) = loader();
        let stab = params(json!({"name": "Stab"}));
        let a = loader.load("weapon/attack", "dnd", Some(&stab)).await.unwrap();
        let b = loader.load("weapon/attack", "dnd", Some(&stab)).await.unwrap();
        let plain = loader.load("weapon/attack", "dnd", None).await.unwrap();

        assert!(Arc::ptr_eq(&a, &b));
        assert_ne!(a.name, plain.name);
        assert_eq!(store.reads(), 2);
        assert_eq!(loader.cached(), 2);
    }

    #[tokio::test]
    async fn empty_params_share_the_plain_record() {
        let (store, loader) = loader();
        let plain = loader.load("weapon/attack", "dnd", None).await.unwrap();
        let empty = loader.load("weapon/attack", "dnd", Some(&Params::new())).await.unwrap();

        assert!(Arc::ptr_eq(&plain, &empty));
        assert_eq!(store.reads(), 1);
        assert_eq!(loader.cached(), 1);
    }

    #[tokio::test]
    async fn errors_propagate() {
        let (_, loader) = loader();
        assert!(matches!(
            loader.load("weapon/missing", "dnd", None).await,
            Err(LoadError::ContentNotFound { .. })
        ));
        assert!(matches!(
            loader.load("basic/broken", "dnd", None).await,
            Err(LoadError::Template { .. })
        ));
    }
}
