//! The combatant model.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::action::{
    Action, ConditionAction, EffectKind, EffectOutcome, InventoryAction, Requirement,
};
use crate::dice::Roll;
use crate::env::{Env, Item, RngOracle, choose};
use crate::error::EntityError;
use crate::text::{TemplateContext, format_text};

use super::equipment::{Equipment, SlotKind};
use super::inventory::Inventory;
use super::status::{ActiveStatus, StatusEffects};

/// Fact present exactly while the weapon slot is empty.
pub const UNARMED: &str = "unarmed";

/// A combatant: hero or enemy.
#[derive(Clone, Debug)]
pub struct Entity {
    pub name: String,
    pub hp: u32,
    pub max_hp: u32,
    pub equipment: Equipment,
    pub inventory: Inventory,
    pub statuses: StatusEffects,
    pub conditions: BTreeSet<String>,
    innate_facts: BTreeSet<String>,
    base_actions: Arc<[Arc<Action>]>,
}

impl Entity {
    /// Creates an entity, rolling `hp` once to fix its maximum.
    ///
    /// `base_actions` are the innate actions every entity of this session
    /// can use; they are shared, not copied.
    pub fn new(
        name: impl Into<String>,
        hp: &Roll,
        base_actions: Arc<[Arc<Action>]>,
        rng: &mut dyn RngOracle,
    ) -> Self {
        let max_hp = hp.roll(rng);
        Self {
            name: name.into(),
            hp: max_hp,
            max_hp,
            equipment: Equipment::new(),
            inventory: Inventory::new(),
            statuses: StatusEffects::default(),
            conditions: BTreeSet::new(),
            innate_facts: BTreeSet::new(),
            base_actions,
        }
    }

    /// Builder: adds a fact that does not come from equipment.
    pub fn with_fact(mut self, fact: impl Into<String>) -> Self {
        self.innate_facts.insert(fact.into());
        self
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Rolls `amount`, subtracts it from HP (floored at 0) and returns the roll.
    ///
    /// `damage_type` does not scale damage yet; resistances hook in here.
    pub fn damage(&mut self, amount: &Roll, damage_type: &str, rng: &mut dyn RngOracle) -> u32 {
        let dealt = amount.roll(rng);
        self.hp = self.hp.saturating_sub(dealt);
        tracing::debug!(entity = %self.name, dealt, damage_type, hp = self.hp, "damage");
        dealt
    }

    /// Applies one effect to this entity.
    pub fn apply_effect(&mut self, effect: &EffectKind, env: &mut Env<'_>) -> EffectOutcome {
        match effect {
            EffectKind::Damage {
                amount,
                damage_type,
            } => {
                let taken = self.damage(amount, damage_type, &mut *env.rng);
                EffectOutcome::message(format!("Damage taken {taken}"))
                    .with_context(TemplateContext::new().with("damageTaken", taken))
            }
            EffectKind::Condition { action, condition } => {
                match action {
                    ConditionAction::Add => {
                        self.conditions.insert(condition.clone());
                    }
                    ConditionAction::Remove => {
                        self.conditions.remove(condition);
                    }
                    ConditionAction::RemoveAll => self.conditions.clear(),
                }
                let line = match action {
                    ConditionAction::Add => format!("Condition added: {condition}"),
                    ConditionAction::Remove => format!("Condition removed: {condition}"),
                    ConditionAction::RemoveAll => "All conditions removed".to_string(),
                };
                EffectOutcome::message(line)
            }
            EffectKind::Status { effects } => {
                for status in effects {
                    self.statuses.push(ActiveStatus::from(status));
                }
                let labels: Vec<_> = effects.iter().map(|status| status.label()).collect();
                EffectOutcome::message(format!("Applied status effect: {}", labels.join(", ")))
            }
            EffectKind::Inventory {
                action: InventoryAction::Add,
                item,
                quantity,
            } => {
                let Some(resolved) = env.items.item(item) else {
                    tracing::warn!(entity = %self.name, item = %item, "unknown item in inventory effect");
                    return EffectOutcome::default();
                };
                let quantity = quantity.roll(&mut *env.rng);
                self.inventory.add_item(&resolved, quantity);
                EffectOutcome::message(format!("Added item to inventory: {item}"))
            }
            EffectKind::Inventory {
                action: InventoryAction::Remove,
                item,
                quantity,
            } => {
                let quantity = quantity.roll(&mut *env.rng);
                self.inventory.remove_item(item, quantity);
                let mut outcome =
                    EffectOutcome::message(format!("Removed item from inventory: {item}"));
                if let Some(slot) = self.equipment.slot_of(item) {
                    outcome.messages.push(self.unequip(slot));
                }
                outcome
            }
            EffectKind::Unknown => {
                tracing::warn!(entity = %self.name, "unknown effect kind");
                EffectOutcome::default()
            }
        }
    }

    /// Advances every active status by one tick.
    ///
    /// Each status loses one tick, re-applies its payload and emits its
    /// display line; expired statuses are then pruned. Statuses attached
    /// during the tick wait for the next one.
    pub fn tick_effects(&mut self, env: &mut Env<'_>) -> Vec<String> {
        let mut ticking = self.statuses.take();
        let mut lines = Vec::new();

        for status in &mut ticking {
            status.remaining = status.remaining.saturating_sub(1);
            let outcome = self.apply_effect(&status.effect, env);

            match choose(&mut *env.rng, &status.display) {
                Some(template) => {
                    let mut ctx = self.template_context("");
                    ctx.merge(outcome.context);
                    lines.push(format_text(template, &ctx));
                }
                None => lines.extend(outcome.messages),
            }
        }

        self.statuses.restore(ticking);
        lines
    }

    /// Actions this entity can currently pick, cheapest first.
    ///
    /// Weapon-granted actions come before base actions when costs tie.
    pub fn get_actions(&self) -> Vec<Arc<Action>> {
        let weapon_actions = self
            .equipment
            .item(SlotKind::Weapon)
            .map(|weapon| weapon.actions.as_slice())
            .unwrap_or_default();

        let mut actions: Vec<Arc<Action>> = weapon_actions
            .iter()
            .chain(self.base_actions.iter())
            .filter(|action| self.resolve_conditional(&action.conditional))
            .cloned()
            .collect();
        actions.sort_by_key(|action| action.cost);
        actions
    }

    /// Every requirement must hold.
    pub fn resolve_conditional(&self, requirements: &[Requirement]) -> bool {
        Requirement::all_hold(requirements, self)
    }

    pub fn has_condition(&self, condition: &str) -> bool {
        self.conditions.contains(condition)
    }

    pub fn has_status(&self, types: &[String]) -> bool {
        self.statuses.has_any(types)
    }

    pub fn has_fact(&self, fact: &str) -> bool {
        if fact == UNARMED && self.equipment.slot(SlotKind::Weapon).is_empty() {
            return true;
        }
        self.innate_facts.contains(fact) || self.equipment.facts().any(|f| f == fact)
    }

    /// Current fact set: innate facts, equipment facts and `unarmed`.
    pub fn facts(&self) -> BTreeSet<String> {
        let mut facts = self.innate_facts.clone();
        facts.extend(self.equipment.facts().cloned());
        if self.equipment.slot(SlotKind::Weapon).is_empty() {
            facts.insert(UNARMED.to_string());
        }
        facts
    }

    /// Equips `item` into the slot named `slot`.
    pub fn equip_item(
        &mut self,
        slot: &str,
        item: Arc<Item>,
        facts: impl IntoIterator<Item = String>,
    ) -> Result<String, EntityError> {
        let kind = parse_slot(slot)?;
        Ok(self.equip(kind, item, facts))
    }

    /// Empties the slot named `slot`.
    pub fn unequip_item(&mut self, slot: &str) -> Result<String, EntityError> {
        let kind = parse_slot(slot)?;
        Ok(self.unequip(kind))
    }

    pub fn equip(
        &mut self,
        slot: SlotKind,
        item: Arc<Item>,
        facts: impl IntoIterator<Item = String>,
    ) -> String {
        let name = item.name.clone();
        if let Some(previous) = self.equipment.slot_mut(slot).equip(item, facts) {
            tracing::debug!(entity = %self.name, %slot, previous = %previous.name, "replaced equipment");
        }
        format!("Equipped {slot}: {name}")
    }

    pub fn unequip(&mut self, slot: SlotKind) -> String {
        match self.equipment.slot_mut(slot).unequip() {
            Some(item) => format!("Unequipped {slot}: {}", item.name),
            None => format!("No {slot} to unequip."),
        }
    }

    pub fn is_equipped(&self, item_id: &str) -> bool {
        self.equipment.slot_of(item_id).is_some()
    }

    /// Equipped item name per slot, `"None"` for empty slots.
    pub fn equipped_items(&self) -> Vec<(SlotKind, String)> {
        self.equipment
            .iter()
            .map(|slot| {
                let name = slot.item().map_or_else(|| "None".to_string(), |item| item.name.clone());
                (slot.kind, name)
            })
            .collect()
    }

    pub fn active_effects_summary(&self) -> String {
        self.statuses.summary()
    }

    pub fn conditions_summary(&self) -> String {
        if self.conditions.is_empty() {
            return "None".to_string();
        }
        self.conditions.iter().cloned().collect::<Vec<_>>().join(", ")
    }

    /// Template values describing this entity, keyed `name`, `hp`, `maxHp`
    /// under `prefix` (`"user"` gives `user.name`).
    pub fn template_context(&self, prefix: &str) -> TemplateContext {
        let key = |field: &str| {
            if prefix.is_empty() {
                field.to_string()
            } else {
                format!("{prefix}.{field}")
            }
        };
        TemplateContext::new()
            .with(key("name"), &self.name)
            .with(key("hp"), self.hp)
            .with(key("maxHp"), self.max_hp)
    }
}

fn parse_slot(slot: &str) -> Result<SlotKind, EntityError> {
    slot.parse()
        .map_err(|_| EntityError::InvalidSlot(slot.to_string()))
}
