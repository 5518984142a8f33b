//! Mutable combat state: entities and the containers they own.
mod entity;
mod equipment;
mod inventory;
mod status;

pub use entity::{Entity, UNARMED};
pub use equipment::{Equipment, EquipmentSlot, SlotKind};
pub use inventory::{CapacityCheck, Inventory, InventorySlot};
pub use status::{ActiveStatus, StatusEffects};
