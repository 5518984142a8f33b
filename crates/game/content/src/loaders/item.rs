//! Item loader.

use std::collections::BTreeMap;
use std::sync::Arc;

use game_core::{Item, ItemOracle};
use serde::Deserialize;

use super::{ActionLoader, Scope, decode, fetch_record};
use crate::cache::{CacheKey, ContentCache};
use crate::error::{LoadError, LoadResult};
use crate::store::ContentStore;
use crate::template::Params;

/// Raw item record as stored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemRecord {
    id: String,
    module: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    weight: f64,
    #[serde(default)]
    value: f64,
    #[serde(default)]
    max_quantity: Option<u32>,
    #[serde(default)]
    tags: Vec<String>,
    #[serde(default)]
    actions: Vec<ActionRef>,
}

/// Reference from an item to a (possibly parameterized) action.
#[derive(Debug, Deserialize)]
struct ActionRef {
    id: String,
    #[serde(default)]
    params: Option<Params>,
}

/// Entry of the bulk `simple_items.json` table.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SimpleItemRecord {
    weight: Option<f64>,
    value: Option<f64>,
    max_quantity: Option<u32>,
}

/// Loads items and hydrates the actions they grant.
pub struct ItemLoader {
    store: Arc<dyn ContentStore>,
    actions: Arc<ActionLoader>,
    cache: ContentCache<Item>,
}

impl ItemLoader {
    pub const SIMPLE_TAG: &'static str = "simple";

    pub fn new(store: Arc<dyn ContentStore>, actions: Arc<ActionLoader>) -> Self {
        Self {
            store,
            actions,
            cache: ContentCache::new("item"),
        }
    }

    pub async fn load(&self, id: &str, module: &str) -> LoadResult<Arc<Item>> {
        self.cache
            .get_or_load(CacheKey::new(module, id), || self.fetch(id, module))
            .await
    }

    async fn fetch(&self, id: &str, module: &str) -> LoadResult<Item> {
        let (path, record) = fetch_record(&*self.store, Scope::Item, module, id).await?;
        let record: ItemRecord = decode(&path, record)?;

        let mut actions = Vec::with_capacity(record.actions.len());
        for reference in &record.actions {
            let action = self
                .actions
                .load(&reference.id, &record.module, reference.params.as_ref())
                .await?;
            actions.push(action);
        }

        let name = record.name.unwrap_or_else(|| title_case(&record.id));
        let mut item = Item::new(record.id, name)
            .with_module(record.module)
            .with_weight(record.weight)
            .with_value(record.value)
            .with_tags(record.tags);
        item.max_quantity = record.max_quantity;
        item.actions = actions;
        Ok(item)
    }

    /// Primes the cache from `<module>/simple_items.json`.
    ///
    /// Simple items default to weight 1 and value 1, take their name from the
    /// last id segment and carry only the `simple` tag. Returns how many were
    /// primed.
    pub async fn load_simple_items(&self, module: &str) -> LoadResult<usize> {
        let path = format!("{module}/simple_items.json");
        let raw = self.store.read(&path).await?;
        let table: BTreeMap<String, SimpleItemRecord> =
            serde_json::from_str(&raw).map_err(|e| LoadError::malformed(&path, e))?;

        let count = table.len();
        for (id, record) in table {
            let item = Item::new(&id, title_case(&id))
                .with_module(module)
                .with_weight(record.weight.unwrap_or(1.0))
                .with_value(record.value.unwrap_or(1.0))
                .with_tags([Self::SIMPLE_TAG]);
            let item = Item {
                max_quantity: record.max_quantity,
                ..item
            };
            self.cache.prime(CacheKey::new(module, id), item);
        }
        tracing::debug!(module, count, "primed simple items");
        Ok(count)
    }

    /// Synchronous view over items of `module` that have finished loading.
    pub fn loaded(&self, module: impl Into<String>) -> LoadedItems<'_> {
        LoadedItems {
            loader: self,
            module: module.into(),
        }
    }
}

/// [`ItemOracle`] over one module's already-loaded items.
pub struct LoadedItems<'a> {
    loader: &'a ItemLoader,
    module: String,
}

impl ItemOracle for LoadedItems<'_> {
    fn item(&self, id: &str) -> Option<Arc<Item>> {
        self.loader.cache.peek(&CacheKey::new(self.module.as_str(), id))
    }
}

/// `"misc/goblin_ear"` -> `"Goblin Ear"`.
pub fn title_case(id: &str) -> String {
    let last = id.rsplit('/').next().unwrap_or(id);
    last.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
