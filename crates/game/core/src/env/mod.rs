//! Read-only world data and injected randomness.
//!
//! Oracles expose hydrated item definitions and the uniform random source.
//! The [`Env`] aggregate bundles them so effect resolution can reach
//! everything it needs without coupling to the content loader.
mod actors;
mod items;
mod rng;
mod tables;

pub use actors::{EntityTemplate, ItemStack, Loadout};
pub use items::{Grip, Item, ItemCatalog, ItemCategory, ItemOracle};
pub use rng::{PcgRng, RngOracle, SequenceRng, choose};
pub use tables::{LootDrop, LootEntry, generate_loot};

/// Oracles required while resolving effects.
pub struct Env<'a> {
    pub items: &'a dyn ItemOracle,
    pub rng: &'a mut dyn RngOracle,
}

impl<'a> Env<'a> {
    pub fn new(items: &'a dyn ItemOracle, rng: &'a mut dyn RngOracle) -> Self {
        Self { items, rng }
    }
}
