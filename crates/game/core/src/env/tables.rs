//! Loot tables and drop generation.

use core::fmt;
use std::sync::Arc;

use crate::dice::Roll;

use super::{Item, RngOracle};

/// One row of a treasure or harvest table.
#[derive(Clone, Debug, PartialEq)]
pub struct LootEntry {
    pub item: Arc<Item>,
    pub quantity: Roll,
    /// Probability in `[0, 1]` that the row drops.
    pub chance: f64,
}

impl LootEntry {
    pub fn new(item: Arc<Item>, quantity: Roll, chance: f64) -> Self {
        Self {
            item,
            quantity,
            chance,
        }
    }
}

/// A concrete drop produced by [`generate_loot`].
#[derive(Clone, Debug, PartialEq)]
pub struct LootDrop {
    pub item: Arc<Item>,
    pub quantity: u32,
}

impl fmt::Display for LootDrop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x {}", self.quantity, self.item.name)
    }
}

/// Rolls every row independently: a Bernoulli trial at the row's chance,
/// then a quantity roll for rows that drop. Duplicate rows drop separately.
pub fn generate_loot(table: &[LootEntry], rng: &mut dyn RngOracle) -> Vec<LootDrop> {
    table
        .iter()
        .filter_map(|entry| {
            rng.chance(entry.chance).then(|| LootDrop {
                item: Arc::clone(&entry.item),
                quantity: entry.quantity.roll(rng),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{PcgRng, SequenceRng};

    fn gold() -> Arc<Item> {
        Arc::new(Item::new("currency/gold", "Gold"))
    }

    #[test]
    fn certain_rows_always_drop_without_dedup() {
        let table = vec![
            LootEntry::new(gold(), Roll::Flat(5), 1.0),
            LootEntry::new(gold(), Roll::dice(2, 4), 1.0),
            LootEntry::new(gold(), Roll::Flat(99), 0.0),
        ];
        let mut rng = PcgRng::new(11);
        let drops = generate_loot(&table, &mut rng);
        assert_eq!(drops.len(), 2);
        assert_eq!(drops[0].quantity, 5);
        assert!((2..=8).contains(&drops[1].quantity));
        assert_eq!(drops[0].to_string(), "5x Gold");
    }

    #[test]
    fn chance_gates_each_row() {
        let table = vec![LootEntry::new(gold(), Roll::Flat(1), 0.5)];
        // 0 maps to 0.0 (< 0.5, drops); u32::MAX maps just below 1.0 (no drop).
        assert_eq!(generate_loot(&table, &mut SequenceRng::constant(0)).len(), 1);
        assert!(generate_loot(&table, &mut SequenceRng::constant(u32::MAX)).is_empty());
    }
}
