//! Equipment slots and the facts they grant.

use std::collections::BTreeSet;
use std::sync::Arc;

use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator};

use crate::env::Item;

/// Named equipment slot.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumString, EnumIter, AsRefStr,
)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[strum(serialize_all = "camelCase")]
pub enum SlotKind {
    Weapon,
    OffHand,
    Armor,
}

/// One slot: at most one item plus exactly the facts granted when it was equipped.
#[derive(Clone, Debug, PartialEq)]
pub struct EquipmentSlot {
    pub kind: SlotKind,
    item: Option<Arc<Item>>,
    facts: BTreeSet<String>,
}

impl EquipmentSlot {
    pub fn new(kind: SlotKind) -> Self {
        Self {
            kind,
            item: None,
            facts: BTreeSet::new(),
        }
    }

    pub fn item(&self) -> Option<&Arc<Item>> {
        self.item.as_ref()
    }

    pub fn facts(&self) -> &BTreeSet<String> {
        &self.facts
    }

    pub fn is_empty(&self) -> bool {
        self.item.is_none()
    }

    /// Puts `item` into the slot, returning the previous occupant.
    ///
    /// The previous occupant's facts are dropped before the new ones are
    /// recorded, so no fact survives from the old item.
    pub fn equip(&mut self, item: Arc<Item>, facts: impl IntoIterator<Item = String>) -> Option<Arc<Item>> {
        let previous = self.unequip();
        self.item = Some(item);
        self.facts = facts.into_iter().collect();
        previous
    }

    /// Empties the slot, returning what it held.
    pub fn unequip(&mut self) -> Option<Arc<Item>> {
        self.facts.clear();
        self.item.take()
    }
}

/// The fixed set of equipment slots an entity has.
#[derive(Clone, Debug, PartialEq)]
pub struct Equipment {
    slots: Vec<EquipmentSlot>,
}

impl Default for Equipment {
    fn default() -> Self {
        Self {
            slots: SlotKind::iter().map(EquipmentSlot::new).collect(),
        }
    }
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, kind: SlotKind) -> &EquipmentSlot {
        &self.slots[kind as usize]
    }

    pub fn slot_mut(&mut self, kind: SlotKind) -> &mut EquipmentSlot {
        &mut self.slots[kind as usize]
    }

    pub fn item(&self, kind: SlotKind) -> Option<&Arc<Item>> {
        self.slot(kind).item()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EquipmentSlot> {
        self.slots.iter()
    }

    /// Slot currently holding `item_id`, if any.
    pub fn slot_of(&self, item_id: &str) -> Option<SlotKind> {
        self.slots
            .iter()
            .find(|slot| slot.item().is_some_and(|item| item.id == item_id))
            .map(|slot| slot.kind)
    }

    /// Union of the facts granted by every slot.
    pub fn facts(&self) -> impl Iterator<Item = &String> {
        self.slots.iter().flat_map(|slot| slot.facts.iter())
    }
}
