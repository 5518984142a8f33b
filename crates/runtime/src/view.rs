//! Read-only snapshot handed to the presentation layer.
//!
//! The engine owns the entities; observers only ever see a [`GameView`]
//! captured after each state change. Row flags mirror what an inventory
//! screen offers: equip one-handed, equip two-handed or unequip.

use game_core::{Entity, Grip, InventorySlot, SlotKind};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameView {
    pub hero: EntityView,
    pub enemy: EntityView,
    /// The hero's inventory; the enemy's is never shown.
    pub inventory: InventoryView,
}

impl GameView {
    pub fn capture(hero: &Entity, enemy: &Entity) -> Self {
        Self {
            hero: EntityView::from(hero),
            enemy: EntityView::from(enemy),
            inventory: InventoryView::from(hero),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityView {
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub effects: String,
    pub conditions: String,
    pub actions: Vec<ActionView>,
    pub equipment: Vec<EquippedView>,
}

impl From<&Entity> for EntityView {
    fn from(entity: &Entity) -> Self {
        Self {
            name: entity.name.clone(),
            hp: entity.hp,
            max_hp: entity.max_hp,
            effects: entity.active_effects_summary(),
            conditions: entity.conditions_summary(),
            actions: entity
                .get_actions()
                .iter()
                .map(|action| ActionView {
                    id: action.id.clone(),
                    name: action.label().to_string(),
                    cost: action.cost,
                })
                .collect(),
            equipment: entity
                .equipped_items()
                .into_iter()
                .map(|(slot, item)| EquippedView { slot, item })
                .collect(),
        }
    }
}

/// One action button: `"Attack (1)"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionView {
    pub id: String,
    pub name: String,
    pub cost: u32,
}

impl std::fmt::Display for ActionView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.cost)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EquippedView {
    pub slot: SlotKind,
    pub item: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryView {
    pub rows: Vec<InventoryRowView>,
    pub total_weight: f64,
    pub total_value: f64,
    pub max_slots: usize,
    pub max_weight: f64,
}

impl From<&Entity> for InventoryView {
    fn from(entity: &Entity) -> Self {
        let inventory = &entity.inventory;
        Self {
            rows: inventory
                .list_items()
                .iter()
                .map(|slot| InventoryRowView::new(slot, entity))
                .collect(),
            total_weight: inventory.total_weight(),
            total_value: inventory.total_value(),
            max_slots: inventory.max_slots,
            max_weight: inventory.max_weight,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRowView {
    pub item_id: String,
    pub name: String,
    /// `"12/20"` for bounded stacks, `"12"` otherwise.
    pub quantity: String,
    pub weight: f64,
    pub value: f64,
    pub equipped: bool,
    /// Slot the item goes into; `None` for items that cannot be equipped.
    pub slot: Option<SlotKind>,
    pub can_equip: bool,
    pub can_equip_two_handed: bool,
    pub can_unequip: bool,
}

impl InventoryRowView {
    fn new(slot: &InventorySlot, owner: &Entity) -> Self {
        let item = &slot.item;
        let equipped = owner.is_equipped(&item.id);
        let equip_slot = item.slot();
        let equippable = equip_slot.is_some() && !equipped;
        let quantity = match item.max_quantity {
            Some(max) => format!("{}/{max}", slot.quantity()),
            None => slot.quantity().to_string(),
        };

        Self {
            item_id: item.id.clone(),
            name: item.name.clone(),
            quantity,
            weight: slot.weight(),
            value: slot.value(),
            equipped,
            slot: equip_slot,
            can_equip: equippable && item.supports_grip(Grip::OneHanded),
            can_equip_two_handed: equippable
                && equip_slot == Some(SlotKind::Weapon)
                && item.supports_grip(Grip::TwoHanded),
            can_unequip: equipped,
        }
    }

    /// Name with the equipped marker, as listed in the inventory table.
    pub fn label(&self) -> String {
        if self.equipped {
            format!("*{}", self.name)
        } else {
            self.name.clone()
        }
    }
}
