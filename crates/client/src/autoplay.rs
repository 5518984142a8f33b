//! Hero policy for unattended sessions.

use std::sync::Arc;

use game_core::{Action, Grip, SlotKind};
use runtime::{CombatEngine, GameView};

const STAND_UP: &str = "basic/stand";

/// Arms the hero with the first weapon and armor the inventory offers.
pub fn gear_up(engine: &mut CombatEngine) {
    let view: GameView = engine.view();
    for slot in [SlotKind::Weapon, SlotKind::Armor] {
        let Some(row) = view
            .inventory
            .rows
            .iter()
            .find(|row| row.slot == Some(slot) && (row.can_equip || row.can_equip_two_handed))
        else {
            continue;
        };
        let grip = if row.can_equip_two_handed {
            Grip::TwoHanded
        } else {
            Grip::OneHanded
        };
        if let Err(err) = engine.equip_item(slot, &row.item_id, grip) {
            tracing::warn!(item = %row.item_id, %err, "could not equip starting gear");
        }
    }
}

/// Gets up when knocked down, otherwise uses the costliest available action.
pub fn choose_action(engine: &CombatEngine) -> Option<Arc<Action>> {
    let actions = engine.hero().get_actions();
    actions
        .iter()
        .find(|action| action.id == STAND_UP)
        .or_else(|| actions.last())
        .cloned()
}
