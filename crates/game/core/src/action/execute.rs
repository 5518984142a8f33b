//! Action resolution between a user and a target.

use crate::env::{Env, choose};
use crate::state::Entity;
use crate::text::{TemplateContext, format_text};

use super::Action;

/// What applying one effect produced: template values and log lines.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EffectOutcome {
    pub context: TemplateContext,
    pub messages: Vec<String>,
}

impl EffectOutcome {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            context: TemplateContext::new(),
            messages: vec![message.into()],
        }
    }

    pub fn with_context(mut self, context: TemplateContext) -> Self {
        self.context = context;
        self
    }

    fn absorb(&mut self, other: EffectOutcome) {
        self.context.merge(other.context);
        self.messages.extend(other.messages);
    }
}

/// Log produced by one action use.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ActionReport {
    /// Formatted display line, if the action has display templates.
    pub headline: Option<String>,
    /// Per-effect messages in application order.
    pub messages: Vec<String>,
    pub context: TemplateContext,
}

impl ActionReport {
    /// Headline first, then effect messages.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.headline
            .iter()
            .chain(self.messages.iter())
            .map(String::as_str)
    }
}

/// Resolves `action` used by `user` against `target`.
///
/// Target effects run first, each skipped unless its requirements hold for
/// the user. User effects follow unconditionally. The display template is
/// formatted against the final state of both entities plus every effect's
/// context.
pub fn resolve_action(
    action: &Action,
    user: &mut Entity,
    target: &mut Entity,
    env: &mut Env<'_>,
) -> ActionReport {
    let mut applied = EffectOutcome::default();

    for effect in &action.effects {
        if !user.resolve_conditional(&effect.conditional) {
            tracing::debug!(action = %action.id, effect = effect.kind.label(), "effect requirements not met");
            continue;
        }
        applied.absorb(target.apply_effect(&effect.kind, env));
    }
    for effect in &action.user_effects {
        applied.absorb(user.apply_effect(effect, env));
    }

    let mut context = user.template_context("user");
    context.merge(target.template_context("target"));
    context.merge(applied.context);

    let headline = choose(&mut *env.rng, &action.display).map(|template| format_text(template, &context));

    ActionReport {
        headline,
        messages: applied.messages,
        context,
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::action::{EffectKind, Requirement};
    use crate::dice::Roll;
    use crate::env::{Item, ItemCatalog, PcgRng, SequenceRng};
    use crate::state::SlotKind;

    fn entity(name: &str, hp: u32) -> Entity {
        Entity::new(name, &Roll::Flat(hp), Arc::from(Vec::<Arc<Action>>::new()), &mut PcgRng::new(0))
    }

    #[test]
    fn formats_display_and_orders_messages() {
        let catalog = ItemCatalog::new();
        let mut rng = SequenceRng::constant(0);
        let mut env = Env::new(&catalog, &mut rng);
        let mut hero = entity("Hero", 20);
        let mut goblin = entity("Goblin", 7);

        let action = Action::new("weapon/slash", "Slash", 2)
            .with_display("{user.name} slashes {target.name} for {damageTaken} ({target.hp} left)")
            .with_effect(EffectKind::damage(Roll::Flat(4), "slashing"))
            .with_effect(EffectKind::add_condition("bleeding"))
            .with_user_effect(EffectKind::add_condition("winded"));

        let report = resolve_action(&action, &mut hero, &mut goblin, &mut env);
        assert_eq!(
            report.lines().collect::<Vec<_>>(),
            vec![
                "Hero slashes Goblin for 4 (3 left)",
                "Damage taken 4",
                "Condition added: bleeding",
                "Condition added: winded",
            ]
        );
        assert!(goblin.has_condition("bleeding"));
        assert!(hero.has_condition("winded"));
        assert!(!goblin.has_condition("winded"));
    }

    #[test]
    fn gated_effects_check_the_user() {
        let catalog = ItemCatalog::new();
        let mut rng = SequenceRng::constant(0);
        let mut env = Env::new(&catalog, &mut rng);
        let mut hero = entity("Hero", 20);
        let mut goblin = entity("Goblin", 10);
        goblin
            .equip_item("weapon", Arc::new(Item::new("weapon/club", "Club")), ["two-handed".to_string()])
            .unwrap();

        let action = Action::new("weapon/greatclub", "Smash", 1)
            .with_effect(EffectKind::damage(Roll::Flat(2), "bludgeoning"))
            .with_effect(
                crate::action::ActionEffect::new(EffectKind::damage(Roll::Flat(5), "bludgeoning"))
                    .when(vec![Requirement::Is("two-handed".into())]),
            );

        resolve_action(&action, &mut hero, &mut goblin, &mut env);
        assert_eq!(goblin.hp, 8);

        hero.equip(
            SlotKind::Weapon,
            Arc::new(Item::new("weapon/maul", "Maul")),
            ["two-handed".to_string()],
        );
        let report = resolve_action(&action, &mut hero, &mut goblin, &mut env);
        assert_eq!(goblin.hp, 1);
        assert_eq!(report.headline, None);
        assert_eq!(report.messages.len(), 2);
    }
}
