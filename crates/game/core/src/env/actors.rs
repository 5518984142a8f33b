//! Enemy archetypes and their instantiation into entities.
//!
//! An [`EntityTemplate`] is immutable hydrated content. Every encounter builds
//! a fresh [`Entity`] from it with [`EntityTemplate::instantiate`]; nothing
//! from a previous instance carries over.

use std::sync::Arc;

use crate::action::Action;
use crate::dice::Roll;
use crate::state::{Entity, SlotKind};

use super::{Item, LootEntry, RngOracle, choose};

/// Item plus the quantity rolled each time the stack is stocked.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemStack {
    pub item: Arc<Item>,
    pub quantity: Roll,
}

/// Alternate equipment/inventory bundle; one is picked per instantiation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Loadout {
    pub equipment: Vec<Arc<Item>>,
    pub inventory: Vec<ItemStack>,
}

/// Hydrated enemy archetype.
#[derive(Clone, Debug, PartialEq)]
pub struct EntityTemplate {
    pub id: String,
    pub module: String,
    pub name: String,
    pub level: u32,
    pub hit_dice: Roll,
    pub equipment: Vec<Arc<Item>>,
    pub inventory: Vec<ItemStack>,
    pub loadouts: Vec<Loadout>,
    pub treasure: Vec<LootEntry>,
    pub harvest: Vec<LootEntry>,
}

impl EntityTemplate {
    pub fn new(id: impl Into<String>, name: impl Into<String>, hit_dice: Roll) -> Self {
        Self {
            id: id.into(),
            module: String::new(),
            name: name.into(),
            level: 0,
            hit_dice,
            equipment: Vec::new(),
            inventory: Vec::new(),
            loadouts: Vec::new(),
            treasure: Vec::new(),
            harvest: Vec::new(),
        }
    }

    /// Builds a fresh entity from this archetype.
    ///
    /// 1. Rolls hit dice for max HP.
    /// 2. Picks one loadout uniformly (if any) and merges it with the base lists.
    /// 3. Puts every equipment item in the inventory.
    /// 4. Equips a random weapon and a random armor from the equipment.
    /// 5. Stocks inventory stacks with freshly rolled quantities.
    pub fn instantiate(&self, base_actions: Arc<[Arc<Action>]>, rng: &mut dyn RngOracle) -> Entity {
        let mut entity = Entity::new(&self.name, &self.hit_dice, base_actions, rng);

        let loadout = choose(rng, &self.loadouts);
        let equipment: Vec<&Arc<Item>> = self
            .equipment
            .iter()
            .chain(loadout.into_iter().flat_map(|l| l.equipment.iter()))
            .collect();
        let stacks = self
            .inventory
            .iter()
            .chain(loadout.into_iter().flat_map(|l| l.inventory.iter()));

        for item in &equipment {
            entity.inventory.add_item(item, 1);
        }

        for slot in [SlotKind::Weapon, SlotKind::Armor] {
            let eligible: Vec<&Arc<Item>> = equipment
                .iter()
                .copied()
                .filter(|item| item.slot() == Some(slot))
                .collect();
            if let Some(&item) = choose(rng, &eligible) {
                let grip = item.preferred_grip();
                entity.equip(slot, Arc::clone(item), item.facts_for(slot, grip));
            }
        }

        for stack in stacks {
            let quantity = stack.quantity.roll(rng);
            entity.inventory.add_item(&stack.item, quantity);
        }

        tracing::debug!(
            template = %self.id,
            hp = entity.max_hp,
            items = entity.inventory.len(),
            "instantiated entity"
        );
        entity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{PcgRng, SequenceRng};

    fn dagger() -> Arc<Item> {
        Arc::new(Item::new("weapon/dagger", "Dagger").with_tags(["light"]))
    }

    fn greataxe() -> Arc<Item> {
        Arc::new(Item::new("weapon/greataxe", "Greataxe").with_tags(["two-handed"]))
    }

    fn arrow() -> Arc<Item> {
        Arc::new(Item::new("ammo/arrow", "Arrow").with_max_quantity(20))
    }

    fn no_actions() -> Arc<[Arc<Action>]> {
        Arc::from(Vec::<Arc<Action>>::new())
    }

    #[test]
    fn equips_weapon_and_stocks_inventory() {
        let mut template = EntityTemplate::new("goblin", "Goblin", Roll::dice(2, 6));
        template.equipment = vec![dagger(), Arc::new(Item::new("armor/leather", "Leather"))];
        template.inventory = vec![ItemStack {
            item: arrow(),
            quantity: Roll::dice(1, 4),
        }];

        let goblin = template.instantiate(no_actions(), &mut PcgRng::new(4));
        assert!(goblin.is_equipped("weapon/dagger"));
        assert!(goblin.is_equipped("armor/leather"));
        assert!(goblin.has_fact("light"));
        assert!(goblin.has_fact("one-handed"));
        assert!(!goblin.has_fact("unarmed"));
        assert_eq!(goblin.inventory.total_quantity("weapon/dagger"), 1);
        assert!((1..=4).contains(&goblin.inventory.total_quantity("ammo/arrow")));
    }

    #[test]
    fn two_handed_weapons_take_two_handed_grip() {
        let mut template = EntityTemplate::new("orc", "Orc", Roll::Flat(15));
        template.equipment = vec![greataxe()];
        let orc = template.instantiate(no_actions(), &mut PcgRng::new(0));
        assert!(orc.has_fact("two-handed"));
        assert!(!orc.has_fact("one-handed"));
    }

    #[test]
    fn loadout_is_merged_with_base_lists() {
        let mut template = EntityTemplate::new("skeleton", "Skeleton", Roll::Flat(13));
        template.inventory = vec![ItemStack {
            item: arrow(),
            quantity: Roll::Flat(5),
        }];
        template.loadouts = vec![
            Loadout {
                equipment: vec![dagger()],
                inventory: Vec::new(),
            },
            Loadout {
                equipment: vec![greataxe()],
                inventory: vec![ItemStack {
                    item: arrow(),
                    quantity: Roll::Flat(10),
                }],
            },
        ];

        // raw 1 picks the second loadout, then the only eligible weapon.
        let skeleton = template.instantiate(no_actions(), &mut SequenceRng::constant(1));
        assert!(skeleton.is_equipped("weapon/greataxe"));
        assert!(!skeleton.inventory.has_item("weapon/dagger"));
        assert_eq!(skeleton.inventory.total_quantity("ammo/arrow"), 15);
    }

    #[test]
    fn bare_template_is_unarmed() {
        let template = EntityTemplate::new("giant", "Giant", Roll::Flat(40));
        let giant = template.instantiate(no_actions(), &mut PcgRng::new(2));
        assert_eq!(giant.max_hp, 40);
        assert!(giant.has_fact("unarmed"));
        assert!(giant.inventory.is_empty());
    }
}
