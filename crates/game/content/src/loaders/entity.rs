//! Entity archetype loader.
//!
//! Resolves an archetype's equipment, inventory, loadouts and loot tables
//! into hydrated items. Picking a loadout is left to
//! [`game_core::EntityTemplate::instantiate`].

use std::sync::Arc;

use game_core::{EntityTemplate, Item, ItemStack, Loadout, LootEntry, Roll};
use serde::Deserialize;

use super::{ItemLoader, Scope, decode, fetch_record, title_case};
use crate::cache::{CacheKey, ContentCache};
use crate::error::LoadResult;
use crate::store::ContentStore;

#[derive(Debug, Deserialize)]
struct EntityRecord {
    id: String,
    module: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    level: u32,
    #[serde(rename = "hd")]
    hit_dice: Roll,
    #[serde(default)]
    equipment: Vec<String>,
    #[serde(default)]
    inventory: Vec<StackRecord>,
    #[serde(default)]
    loadouts: Vec<LoadoutRecord>,
    #[serde(default)]
    treasure: Vec<LootRecord>,
    #[serde(default)]
    harvest: Vec<LootRecord>,
}

#[derive(Debug, Deserialize)]
struct StackRecord {
    item: String,
    #[serde(default)]
    quantity: Roll,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LoadoutRecord {
    equipment: Vec<String>,
    inventory: Vec<StackRecord>,
}

#[derive(Debug, Deserialize)]
struct LootRecord {
    item: String,
    #[serde(default)]
    quantity: Roll,
    #[serde(default = "LootRecord::certain")]
    chance: f64,
}

impl LootRecord {
    fn certain() -> f64 {
        1.0
    }
}

/// Loads enemy archetypes.
pub struct EntityLoader {
    store: Arc<dyn ContentStore>,
    items: Arc<ItemLoader>,
    cache: ContentCache<EntityTemplate>,
}

impl EntityLoader {
    pub fn new(store: Arc<dyn ContentStore>, items: Arc<ItemLoader>) -> Self {
        Self {
            store,
            items,
            cache: ContentCache::new("entity"),
        }
    }

    pub async fn load(&self, id: &str, module: &str) -> LoadResult<Arc<EntityTemplate>> {
        self.cache
            .get_or_load(CacheKey::new(module, id), || self.fetch(id, module))
            .await
    }

    async fn fetch(&self, id: &str, module: &str) -> LoadResult<EntityTemplate> {
        let (path, record) = fetch_record(&*self.store, Scope::Entity, module, id).await?;
        let record: EntityRecord = decode(&path, record)?;
        let module = record.module.as_str();

        let mut loadouts = Vec::with_capacity(record.loadouts.len());
        for loadout in &record.loadouts {
            loadouts.push(Loadout {
                equipment: self.items_of(&loadout.equipment, module).await?,
                inventory: self.stacks_of(&loadout.inventory, module).await?,
            });
        }

        Ok(EntityTemplate {
            name: record.name.clone().unwrap_or_else(|| title_case(&record.id)),
            level: record.level,
            hit_dice: record.hit_dice,
            equipment: self.items_of(&record.equipment, module).await?,
            inventory: self.stacks_of(&record.inventory, module).await?,
            loadouts,
            treasure: self.loot_of(&record.treasure, module).await?,
            harvest: self.loot_of(&record.harvest, module).await?,
            id: record.id.clone(),
            module: module.to_string(),
        })
    }

    async fn items_of(&self, ids: &[String], module: &str) -> LoadResult<Vec<Arc<Item>>> {
        let mut items = Vec::with_capacity(ids.len());
        for id in ids {
            items.push(self.items.load(id, module).await?);
        }
        Ok(items)
    }

    async fn stacks_of(&self, stacks: &[StackRecord], module: &str) -> LoadResult<Vec<ItemStack>> {
        let mut hydrated = Vec::with_capacity(stacks.len());
        for stack in stacks {
            hydrated.push(ItemStack {
                item: self.items.load(&stack.item, module).await?,
                quantity: stack.quantity,
            });
        }
        Ok(hydrated)
    }

    async fn loot_of(&self, table: &[LootRecord], module: &str) -> LoadResult<Vec<LootEntry>> {
        let mut rows = Vec::with_capacity(table.len());
        for row in table {
            let item = self.items.load(&row.item, module).await?;
            rows.push(LootEntry::new(item, row.quantity, row.chance));
        }
        Ok(rows)
    }
}
