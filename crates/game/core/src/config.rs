//! Session configuration.

use crate::dice::Roll;

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct GameConfig {
    /// Content module every id is resolved in.
    pub module: String,

    /// Action ids every entity can use regardless of equipment.
    pub base_actions: Vec<String>,

    /// Entity archetype ids drawn from on each encounter reset.
    pub roster: Vec<String>,

    /// Archetype for the first encounter; a random roster pick when unset.
    pub first_enemy: Option<String>,

    /// Action points the enemy spends per round.
    pub enemy_action_points: u32,

    /// Upper bound on enemy actions per round, guarding zero-cost loops.
    pub max_enemy_actions: u32,

    pub hero: HeroConfig,
}

impl GameConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_MODULE: &'static str = "dnd";
    pub const DEFAULT_ENEMY_ACTION_POINTS: u32 = 2;
    pub const DEFAULT_MAX_ENEMY_ACTIONS: u32 = 8;
    pub const DEFAULT_BASE_ACTIONS: [&'static str; 2] = ["basic/stand", "basic/unarmed"];

    pub fn new() -> Self {
        Self {
            module: Self::DEFAULT_MODULE.to_string(),
            base_actions: Self::DEFAULT_BASE_ACTIONS.map(String::from).to_vec(),
            roster: Vec::new(),
            first_enemy: None,
            enemy_action_points: Self::DEFAULT_ENEMY_ACTION_POINTS,
            max_enemy_actions: Self::DEFAULT_MAX_ENEMY_ACTIONS,
            hero: HeroConfig::default(),
        }
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = module.into();
        self
    }

    pub fn with_roster<I, S>(mut self, roster: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roster = roster.into_iter().map(Into::into).collect();
        self
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// The player-controlled combatant.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct HeroConfig {
    pub name: String,
    pub hp: Roll,
    pub inventory: Vec<StartingItem>,
}

impl Default for HeroConfig {
    fn default() -> Self {
        Self {
            name: "Hero".to_string(),
            hp: Roll::Flat(10),
            inventory: Vec::new(),
        }
    }
}

/// Item id plus quantity placed in the hero's starting inventory.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StartingItem {
    pub item: String,
    #[cfg_attr(feature = "serde", serde(default = "StartingItem::default_quantity"))]
    pub quantity: u32,
}

impl StartingItem {
    pub fn new(item: impl Into<String>, quantity: u32) -> Self {
        Self {
            item: item.into(),
            quantity,
        }
    }

    #[cfg(feature = "serde")]
    fn default_quantity() -> u32 {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = GameConfig::default();
        assert_eq!(config.module, "dnd");
        assert_eq!(config.base_actions, vec!["basic/stand", "basic/unarmed"]);
        assert_eq!(config.enemy_action_points, 2);
        assert_eq!(config.hero.hp, Roll::Flat(10));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_keeps_defaults() {
        let config: GameConfig = serde_json::from_value(serde_json::json!({
            "roster": ["goblin"],
            "hero": {"hp": "2d8", "inventory": [{"item": "ammo/arrow", "quantity": 30}, {"item": "weapon/dagger"}]}
        }))
        .unwrap();
        assert_eq!(config.roster, vec!["goblin"]);
        assert_eq!(config.hero.name, "Hero");
        assert_eq!(config.hero.hp, Roll::dice(2, 8));
        assert_eq!(config.hero.inventory[1], StartingItem::new("weapon/dagger", 1));
        assert_eq!(config.max_enemy_actions, 8);
    }
}
