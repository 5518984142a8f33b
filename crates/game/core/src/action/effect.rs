//! Action effect system - atomic effects that actions apply.
//!
//! Effects are data, not behavior. An action is a list of target effects and
//! a list of user effects; the [`crate::state::Entity`] receiving an effect
//! interprets it in [`crate::state::Entity::apply_effect`].
//!
//! # Architecture
//!
//! - [`EffectKind`] is a closed enum tagged by the content `id` field
//!   (`"damage"`, `"condition"`, `"status"`, `"inventory"`)
//! - [`ActionEffect`] wraps a kind with the optional requirement list that
//!   gates it when used as a target effect
//! - Unrecognized `id` values deserialize to [`EffectKind::Unknown`], which the
//!   dispatcher logs and skips instead of failing the whole content load

use strum::Display;

use crate::dice::Roll;

use super::requirement::Requirement;

/// Target effect with its gating requirements.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionEffect {
    /// The actual effect to apply.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub kind: EffectKind,

    /// Requirements evaluated against the action's user; the effect is skipped
    /// unless all of them hold.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub conditional: Vec<Requirement>,
}

impl ActionEffect {
    /// Creates an unconditional effect.
    pub fn new(kind: EffectKind) -> Self {
        Self {
            kind,
            conditional: Vec::new(),
        }
    }

    /// Builder: gate the effect behind `requirements`.
    pub fn when(mut self, requirements: Vec<Requirement>) -> Self {
        self.conditional = requirements;
        self
    }
}

impl From<EffectKind> for ActionEffect {
    fn from(kind: EffectKind) -> Self {
        Self::new(kind)
    }
}

/// The actual effect to apply.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "id", rename_all = "camelCase")
)]
pub enum EffectKind {
    /// Roll `amount` and subtract it from HP.
    Damage {
        amount: Roll,
        /// Carried for messaging and future resistances; does not scale damage.
        #[cfg_attr(feature = "serde", serde(rename = "type", default))]
        damage_type: String,
    },

    /// Add/remove a boolean condition flag.
    Condition {
        action: ConditionAction,
        /// Ignored by [`ConditionAction::RemoveAll`].
        #[cfg_attr(feature = "serde", serde(rename = "type", default))]
        condition: String,
    },

    /// Attach timed status effects.
    Status { effects: Vec<StatusEffect> },

    /// Add/remove an item by id.
    Inventory {
        action: InventoryAction,
        item: String,
        #[cfg_attr(feature = "serde", serde(default))]
        quantity: Roll,
    },

    /// Any `id` this build does not recognize.
    #[cfg_attr(feature = "serde", serde(other))]
    Unknown,
}

impl EffectKind {
    pub fn damage(amount: Roll, damage_type: impl Into<String>) -> Self {
        Self::Damage {
            amount,
            damage_type: damage_type.into(),
        }
    }

    pub fn add_condition(condition: impl Into<String>) -> Self {
        Self::Condition {
            action: ConditionAction::Add,
            condition: condition.into(),
        }
    }

    pub fn remove_condition(condition: impl Into<String>) -> Self {
        Self::Condition {
            action: ConditionAction::Remove,
            condition: condition.into(),
        }
    }

    pub fn status(effects: Vec<StatusEffect>) -> Self {
        Self::Status { effects }
    }

    pub fn add_item(item: impl Into<String>, quantity: u32) -> Self {
        Self::Inventory {
            action: InventoryAction::Add,
            item: item.into(),
            quantity: Roll::Flat(quantity),
        }
    }

    pub fn remove_item(item: impl Into<String>, quantity: u32) -> Self {
        Self::Inventory {
            action: InventoryAction::Remove,
            item: item.into(),
            quantity: Roll::Flat(quantity),
        }
    }

    /// The `type` label used by `status:` requirements and effect summaries.
    pub fn label(&self) -> &str {
        match self {
            Self::Damage { damage_type, .. } => damage_type,
            Self::Condition { condition, .. } => condition,
            Self::Status { .. } => "status",
            Self::Inventory { item, .. } => item,
            Self::Unknown => "unknown",
        }
    }
}

/// Condition effect operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[strum(serialize_all = "camelCase")]
pub enum ConditionAction {
    Add,
    Remove,
    RemoveAll,
}

/// Inventory effect operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[strum(serialize_all = "camelCase")]
pub enum InventoryAction {
    Add,
    Remove,
}

/// A timed effect: re-applied to its bearer once per tick for `duration` ticks.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusEffect {
    pub duration: u32,

    /// Message templates; one is picked per tick.
    #[cfg_attr(feature = "serde", serde(default))]
    pub display: Vec<String>,

    /// Payload applied every tick.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub effect: EffectKind,
}

impl StatusEffect {
    pub fn new(effect: EffectKind, duration: u32) -> Self {
        Self {
            duration,
            display: Vec::new(),
            effect,
        }
    }

    pub fn with_display(mut self, template: impl Into<String>) -> Self {
        self.display.push(template.into());
        self
    }

    pub fn label(&self) -> &str {
        self.effect.label()
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_tagged_effects() {
        let effect: ActionEffect = serde_json::from_value(json!({
            "id": "damage",
            "amount": "1d6",
            "type": "slashing",
            "conditional": ["is:one-handed"]
        }))
        .unwrap();
        assert_eq!(effect.kind, EffectKind::damage(Roll::dice(1, 6), "slashing"));
        assert_eq!(effect.conditional, vec![Requirement::Is("one-handed".into())]);

        let condition: EffectKind =
            serde_json::from_value(json!({"id": "condition", "action": "removeAll"})).unwrap();
        assert_eq!(
            condition,
            EffectKind::Condition {
                action: ConditionAction::RemoveAll,
                condition: String::new()
            }
        );

        let inventory: EffectKind = serde_json::from_value(
            json!({"id": "inventory", "action": "remove", "item": "ammo/arrow"}),
        )
        .unwrap();
        assert_eq!(inventory, EffectKind::remove_item("ammo/arrow", 1));
    }

    #[test]
    fn nested_status_payloads() {
        let effect: EffectKind = serde_json::from_value(json!({
            "id": "status",
            "effects": [{
                "id": "damage",
                "amount": 2,
                "type": "poison",
                "duration": 3,
                "display": ["{name} suffers from poison"]
            }]
        }))
        .unwrap();
        let EffectKind::Status { effects } = effect else {
            panic!("expected status effect");
        };
        assert_eq!(effects.len(), 1);
        assert_eq!(effects[0].duration, 3);
        assert_eq!(effects[0].label(), "poison");
        assert_eq!(effects[0].effect, EffectKind::damage(Roll::Flat(2), "poison"));
    }

    #[test]
    fn unknown_kind_is_not_fatal() {
        let effect: ActionEffect =
            serde_json::from_value(json!({"id": "teleport", "range": 3})).unwrap();
        assert_eq!(effect.kind, EffectKind::Unknown);
    }
}
