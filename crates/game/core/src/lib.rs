//! Turn-based combat rules shared by the content loader and the runtime.
//!
//! `game-core` defines the data model (items, actions, effects, entity
//! templates) and the pure rules that act on it: dice, inventory stacking,
//! equipment facts, effect application, status ticking, action availability
//! and loot rolls. It performs no I/O; randomness and item lookups arrive
//! through the oracles in [`env`].
pub mod action;
pub mod config;
pub mod dice;
pub mod env;
pub mod error;
pub mod state;
pub mod text;

pub use action::{
    Action, ActionEffect, ActionReport, ConditionAction, EffectKind, EffectOutcome,
    InventoryAction, Requirement, StatusEffect, resolve_action,
};
pub use config::{GameConfig, HeroConfig, StartingItem};
pub use dice::{DiceError, Roll};
pub use env::{
    EntityTemplate, Env, Grip, Item, ItemCatalog, ItemCategory, ItemOracle, ItemStack, Loadout,
    LootDrop, LootEntry, PcgRng, RngOracle, SequenceRng, choose, generate_loot,
};
pub use error::{EntityError, ErrorSeverity, GameError};
pub use state::{
    ActiveStatus, CapacityCheck, Entity, Equipment, EquipmentSlot, Inventory, InventorySlot,
    SlotKind, StatusEffects, UNARMED,
};
pub use text::{TemplateContext, format_text};
