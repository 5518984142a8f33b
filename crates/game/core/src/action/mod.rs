//! Actions: content-defined combat moves.
//!
//! An [`Action`] is immutable data hydrated by the content loader. Resolving
//! it against two entities happens in [`resolve_action`]; which actions an
//! entity may pick is computed by [`crate::state::Entity::get_actions`].

mod effect;
mod execute;
mod requirement;

pub use effect::{ActionEffect, ConditionAction, EffectKind, InventoryAction, StatusEffect};
pub use execute::{ActionReport, EffectOutcome, resolve_action};
pub use requirement::Requirement;

/// A content-defined combat move.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct Action {
    pub id: String,
    pub module: String,
    pub name: String,

    /// Message templates; one is picked at random per use.
    pub display: Vec<String>,

    /// Action-point cost.
    pub cost: u32,

    /// Requirements the user must meet for the action to be offered.
    pub conditional: Vec<Requirement>,

    /// Effects applied to the target, each gated by its own requirements.
    pub effects: Vec<ActionEffect>,

    /// Effects applied to the user unconditionally.
    pub user_effects: Vec<EffectKind>,
}

impl Action {
    pub fn new(id: impl Into<String>, name: impl Into<String>, cost: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cost,
            ..Self::default()
        }
    }

    pub fn with_display(mut self, template: impl Into<String>) -> Self {
        self.display.push(template.into());
        self
    }

    pub fn with_conditional(mut self, requirement: impl Into<Requirement>) -> Self {
        self.conditional.push(requirement.into());
        self
    }

    pub fn with_effect(mut self, effect: impl Into<ActionEffect>) -> Self {
        self.effects.push(effect.into());
        self
    }

    pub fn with_user_effect(mut self, effect: EffectKind) -> Self {
        self.user_effects.push(effect);
        self
    }

    /// Display name, falling back to the id when content gave none.
    pub fn label(&self) -> &str {
        if self.name.is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

#[cfg(all(test, feature = "serde"))]
mod tests {
    use super::*;
    use crate::dice::Roll;
    use serde_json::json;

    #[test]
    fn deserializes_camel_case_record() {
        let action: Action = serde_json::from_value(json!({
            "name": "Shove",
            "cost": 1,
            "display": ["{user.name} shoves {target.name}"],
            "conditional": ["is:unarmed"],
            "effects": [
                {"id": "damage", "amount": 1, "type": "bludgeoning"},
                {"id": "condition", "action": "add", "type": "prone", "conditional": ["condition:raging"]}
            ],
            "userEffects": [{"id": "condition", "action": "remove", "type": "hidden"}]
        }))
        .unwrap();

        assert_eq!(action.label(), "Shove");
        assert_eq!(action.cost, 1);
        assert_eq!(action.conditional, vec![Requirement::Is("unarmed".into())]);
        assert_eq!(action.effects.len(), 2);
        assert_eq!(action.effects[0].kind, EffectKind::damage(Roll::Flat(1), "bludgeoning"));
        assert_eq!(
            action.effects[1].conditional,
            vec![Requirement::Condition("raging".into())]
        );
        assert_eq!(action.user_effects, vec![EffectKind::remove_condition("hidden")]);
    }

    #[test]
    fn missing_fields_default() {
        let action: Action = serde_json::from_value(json!({"id": "basic/stand"})).unwrap();
        assert_eq!(action.cost, 0);
        assert!(action.effects.is_empty());
        assert_eq!(action.label(), "basic/stand");
    }
}
