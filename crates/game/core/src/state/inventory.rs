//! Inventory system for entities.
//!
//! Stackable item container. Slots keep insertion order because the render
//! layer lists them as-is.
//!
//! # Capacity
//!
//! `max_slots` and `max_weight` are advisory: [`Inventory::add_item`] never
//! rejects or truncates. Callers that want enforcement ask
//! [`Inventory::check_capacity`] first.

use std::sync::Arc;

use crate::env::Item;

/// Inventory slot containing an item and its quantity.
///
/// Weight, value and remaining space are always derived from
/// `item × quantity`; nothing is cached.
#[derive(Clone, Debug, PartialEq)]
pub struct InventorySlot {
    pub item: Arc<Item>,
    quantity: u32,
}

impl InventorySlot {
    fn new(item: Arc<Item>, quantity: u32) -> Self {
        Self { item, quantity }
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn remaining_space(&self) -> u32 {
        self.item.max_stack().saturating_sub(self.quantity)
    }

    pub fn weight(&self) -> f64 {
        self.item.weight * f64::from(self.quantity)
    }

    pub fn value(&self) -> f64 {
        self.item.value * f64::from(self.quantity)
    }
}

/// Result of an advisory capacity check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CapacityCheck {
    pub fits_slots: bool,
    pub fits_weight: bool,
}

impl CapacityCheck {
    pub fn fits(&self) -> bool {
        self.fits_slots && self.fits_weight
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Inventory {
    slots: Vec<InventorySlot>,
    pub max_slots: usize,
    pub max_weight: f64,
}

impl Default for Inventory {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            max_slots: Self::DEFAULT_MAX_SLOTS,
            max_weight: Self::DEFAULT_MAX_WEIGHT,
        }
    }
}

impl Inventory {
    pub const DEFAULT_MAX_SLOTS: usize = 10;
    pub const DEFAULT_MAX_WEIGHT: f64 = 100.0;

    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` of `item`.
    ///
    /// Existing stacks of the same item are topped up first, tightest first
    /// (least remaining space). The remainder opens new slots of at most the
    /// item's stack size, appended at the end.
    pub fn add_item(&mut self, item: &Arc<Item>, quantity: u32) {
        let mut remaining = quantity;

        let mut open: Vec<usize> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.item.id == item.id && slot.remaining_space() > 0)
            .map(|(index, _)| index)
            .collect();
        open.sort_by_key(|&index| self.slots[index].remaining_space());

        for index in open {
            if remaining == 0 {
                break;
            }
            let slot = &mut self.slots[index];
            let added = remaining.min(slot.remaining_space());
            slot.quantity += added;
            remaining -= added;
        }

        let stack = item.max_stack();
        while remaining > 0 {
            let added = remaining.min(stack);
            self.slots.push(InventorySlot::new(Arc::clone(item), added));
            remaining -= added;
        }
    }

    /// Removes up to `quantity` of `item_id`, smallest stacks first.
    ///
    /// Stops silently when less is held; returns how many were actually
    /// removed. Emptied slots are pruned.
    pub fn remove_item(&mut self, item_id: &str, quantity: u32) -> u32 {
        let mut held: Vec<usize> = self
            .slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.item.id == item_id)
            .map(|(index, _)| index)
            .collect();
        held.sort_by_key(|&index| self.slots[index].quantity);

        let mut remaining = quantity;
        for index in held {
            if remaining == 0 {
                break;
            }
            let slot = &mut self.slots[index];
            let taken = remaining.min(slot.quantity);
            slot.quantity -= taken;
            remaining -= taken;
        }

        self.slots.retain(|slot| slot.quantity > 0);
        quantity - remaining
    }

    /// First slot holding `item_id`.
    pub fn get_item(&self, item_id: &str) -> Option<&InventorySlot> {
        self.slots.iter().find(|slot| slot.item.id == item_id)
    }

    pub fn has_item(&self, item_id: &str) -> bool {
        self.get_item(item_id).is_some()
    }

    /// Slots in insertion order.
    pub fn list_items(&self) -> &[InventorySlot] {
        &self.slots
    }

    pub fn total_quantity(&self, item_id: &str) -> u32 {
        self.slots
            .iter()
            .filter(|slot| slot.item.id == item_id)
            .map(InventorySlot::quantity)
            .sum()
    }

    pub fn total_weight(&self) -> f64 {
        self.slots.iter().map(InventorySlot::weight).sum()
    }

    pub fn total_value(&self) -> f64 {
        self.slots.iter().map(InventorySlot::value).sum()
    }

    /// Whether adding `quantity` of `item` would stay within the limits.
    pub fn check_capacity(&self, item: &Item, quantity: u32) -> CapacityCheck {
        let mut remaining = quantity;
        for slot in self.slots.iter().filter(|slot| slot.item.id == item.id) {
            remaining = remaining.saturating_sub(slot.remaining_space());
        }
        let new_slots = remaining.div_ceil(item.max_stack()) as usize;

        CapacityCheck {
            fits_slots: self.slots.len() + new_slots <= self.max_slots,
            fits_weight: self.total_weight() + item.weight * f64::from(quantity)
                <= self.max_weight,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arrow() -> Arc<Item> {
        Arc::new(
            Item::new("ammo/arrow", "Arrow")
                .with_weight(0.05)
                .with_value(0.05)
                .with_max_quantity(20),
        )
    }

    fn quantities(inventory: &Inventory) -> Vec<u32> {
        inventory.list_items().iter().map(InventorySlot::quantity).collect()
    }

    #[test]
    fn add_splits_into_stacks() {
        let mut inventory = Inventory::new();
        inventory.add_item(&arrow(), 45);
        assert_eq!(quantities(&inventory), vec![20, 20, 5]);
        assert_eq!(inventory.total_quantity("ammo/arrow"), 45);
    }

    #[test]
    fn add_tops_up_partial_stack_before_opening_new_slots() {
        let mut inventory = Inventory::new();
        let arrow = arrow();
        inventory.add_item(&arrow, 45);
        inventory.remove_item("ammo/arrow", 8); // [17, 20]
        inventory.add_item(&arrow, 5);
        assert_eq!(quantities(&inventory), vec![20, 20, 2]);
    }

    #[test]
    fn remove_takes_smallest_stacks_and_prunes() {
        let mut inventory = Inventory::new();
        inventory.add_item(&arrow(), 45);
        assert_eq!(inventory.remove_item("ammo/arrow", 8), 8);
        assert_eq!(quantities(&inventory), vec![17, 20]);
    }

    #[test]
    fn over_removal_stops_silently() {
        let mut inventory = Inventory::new();
        inventory.add_item(&arrow(), 3);
        assert_eq!(inventory.remove_item("ammo/arrow", 10), 3);
        assert!(inventory.is_empty());
        assert_eq!(inventory.remove_item("ammo/arrow", 1), 0);
    }

    #[test]
    fn add_then_remove_restores_totals() {
        let mut inventory = Inventory::new();
        let arrow = arrow();
        let gold = Arc::new(Item::new("currency/gold", "Gold").with_weight(0.02).with_value(1.0));
        inventory.add_item(&gold, 30);
        inventory.add_item(&arrow, 7);
        let (weight, value) = (inventory.total_weight(), inventory.total_value());

        inventory.add_item(&arrow, 26);
        inventory.remove_item("ammo/arrow", 26);

        assert_eq!(inventory.total_quantity("ammo/arrow"), 7);
        assert!((inventory.total_weight() - weight).abs() < 1e-9);
        assert!((inventory.total_value() - value).abs() < 1e-9);
    }

    #[test]
    fn totals_are_derived_from_slots() {
        let mut inventory = Inventory::new();
        inventory.add_item(&arrow(), 25);
        let expected: f64 = inventory
            .list_items()
            .iter()
            .map(|slot| f64::from(slot.quantity()) * slot.item.weight)
            .sum();
        assert!((inventory.total_weight() - expected).abs() < 1e-9);
        assert!((inventory.total_weight() - 1.25).abs() < 1e-9);
    }

    #[test]
    fn lookups() {
        let mut inventory = Inventory::new();
        inventory.add_item(&arrow(), 2);
        assert!(inventory.has_item("ammo/arrow"));
        assert_eq!(inventory.get_item("ammo/arrow").map(InventorySlot::quantity), Some(2));
        assert!(inventory.get_item("ammo/bolt").is_none());
    }

    #[test]
    fn capacity_check_is_advisory() {
        let mut inventory = Inventory::new();
        inventory.max_slots = 2;
        let arrow = arrow();
        inventory.add_item(&arrow, 15);

        assert!(inventory.check_capacity(&arrow, 25).fits());
        let check = inventory.check_capacity(&arrow, 26);
        assert!(!check.fits_slots);
        assert!(check.fits_weight);

        let anvil = Item::new("misc/anvil", "Anvil").with_weight(150.0);
        assert!(!inventory.check_capacity(&anvil, 1).fits_weight);

        inventory.add_item(&arrow, 100);
        assert_eq!(inventory.total_quantity("ammo/arrow"), 115);
    }
}
