//! Timed status effects carried by an entity.
//!
//! # Tick-based Duration
//!
//! Each active status stores its remaining duration in ticks. A tick
//! decrements it and re-applies the payload, including on the tick that
//! brings it to zero; the status is pruned afterwards.

use crate::action::{EffectKind, StatusEffect};

/// A status effect currently attached to an entity.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveStatus {
    pub remaining: u32,
    pub display: Vec<String>,
    pub effect: EffectKind,
}

impl ActiveStatus {
    pub fn label(&self) -> &str {
        self.effect.label()
    }

    pub fn is_expired(&self) -> bool {
        self.remaining == 0
    }
}

impl From<&StatusEffect> for ActiveStatus {
    fn from(status: &StatusEffect) -> Self {
        Self {
            remaining: status.duration,
            display: status.display.clone(),
            effect: status.effect.clone(),
        }
    }
}

/// Active status effects on an entity, in application order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StatusEffects {
    effects: Vec<ActiveStatus>,
}

impl StatusEffects {
    pub fn push(&mut self, status: ActiveStatus) {
        self.effects.push(status);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActiveStatus> {
        self.effects.iter()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }

    /// True if any active status has one of the given types.
    pub fn has_any(&self, types: &[String]) -> bool {
        self.effects
            .iter()
            .any(|status| types.iter().any(|t| t == status.label()))
    }

    /// Detaches the current list so a tick can iterate it while new statuses
    /// are pushed onto an empty one.
    pub(crate) fn take(&mut self) -> Vec<ActiveStatus> {
        std::mem::take(&mut self.effects)
    }

    /// Reattaches ticked statuses ahead of any added during the tick.
    pub(crate) fn restore(&mut self, mut ticked: Vec<ActiveStatus>) {
        ticked.retain(|status| !status.is_expired());
        ticked.append(&mut self.effects);
        self.effects = ticked;
    }

    /// `"poison (2), burning (1)"`, or `"None"`.
    pub fn summary(&self) -> String {
        if self.effects.is_empty() {
            return "None".to_string();
        }
        self.effects
            .iter()
            .map(|status| format!("{} ({})", status.label(), status.remaining))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
