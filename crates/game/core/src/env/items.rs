use std::collections::HashMap;
use std::sync::Arc;

use strum::{AsRefStr, Display, EnumString};

use crate::action::Action;
use crate::state::SlotKind;

/// Read-only lookup of hydrated item records by id.
///
/// Effects reference items by id only (`{"id": "inventory", "item": "ammo/arrow"}`),
/// so adding an item to an inventory resolves it through this oracle.
pub trait ItemOracle: Send + Sync {
    fn item(&self, id: &str) -> Option<Arc<Item>>;
}

/// Immutable item record.
///
/// Items are shared (`Arc`) between the loader cache, inventories and
/// equipment slots; an item is never mutated after hydration.
#[derive(Clone, Debug, PartialEq)]
pub struct Item {
    pub id: String,
    pub module: String,
    pub name: String,
    pub weight: f64,
    pub value: f64,
    /// Maximum stack size per inventory slot. `None` means unbounded.
    pub max_quantity: Option<u32>,
    pub tags: Vec<String>,
    /// Actions granted while this item is the equipped weapon.
    pub actions: Vec<Arc<Action>>,
}

impl Item {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            module: String::new(),
            name: name.into(),
            weight: 0.0,
            value: 0.0,
            max_quantity: None,
            tags: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = module.into();
        self
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = value;
        self
    }

    pub fn with_max_quantity(mut self, max_quantity: u32) -> Self {
        self.max_quantity = Some(max_quantity);
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_action(mut self, action: Arc<Action>) -> Self {
        self.actions.push(action);
        self
    }

    /// Effective per-slot stack limit (never zero).
    pub fn max_stack(&self) -> u32 {
        self.max_quantity.unwrap_or(u32::MAX).max(1)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Category derived from the id's first path segment (`weapon/dagger`).
    pub fn category(&self) -> ItemCategory {
        self.id
            .split('/')
            .next()
            .and_then(|prefix| prefix.parse().ok())
            .unwrap_or(ItemCategory::Other)
    }

    /// Equipment slot this item goes into, if it is equippable.
    pub fn slot(&self) -> Option<SlotKind> {
        match self.category() {
            ItemCategory::Weapon => Some(SlotKind::Weapon),
            ItemCategory::Armor => Some(SlotKind::Armor),
            ItemCategory::Shield => Some(SlotKind::OffHand),
            _ => None,
        }
    }

    /// Whether the item may be wielded with `grip`.
    ///
    /// `versatile` items accept both grips. Items that carry neither handedness
    /// tag (armor, shields) accept only the one-handed default.
    pub fn supports_grip(&self, grip: Grip) -> bool {
        if self.has_tag(Grip::VERSATILE) || self.has_tag(grip.as_ref()) {
            return true;
        }
        grip == Grip::OneHanded && !self.has_tag(Grip::TwoHanded.as_ref())
    }

    /// Grip used when an AI equips the item.
    pub fn preferred_grip(&self) -> Grip {
        if self.supports_grip(Grip::OneHanded) {
            Grip::OneHanded
        } else {
            Grip::TwoHanded
        }
    }

    /// Facts granted by equipping this item: its tags plus the grip fact.
    pub fn granted_facts(&self, grip: Grip) -> Vec<String> {
        let mut facts = self.tags.clone();
        if !facts.iter().any(|f| f == grip.as_ref()) {
            facts.push(grip.to_string());
        }
        facts
    }

    /// Facts granted when equipped into `slot`. Only the weapon slot adds a
    /// grip fact; other slots grant the bare tags.
    pub fn facts_for(&self, slot: SlotKind, grip: Grip) -> Vec<String> {
        match slot {
            SlotKind::Weapon => self.granted_facts(grip),
            SlotKind::OffHand | SlotKind::Armor => self.tags.clone(),
        }
    }
}

/// Item category, taken from the first segment of the item id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum ItemCategory {
    Weapon,
    Armor,
    Shield,
    Ammo,
    Currency,
    Other,
}

/// How a weapon is held. Also the fact name granted while equipped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum Grip {
    OneHanded,
    TwoHanded,
}

impl Grip {
    /// Tag marking items usable with either grip.
    pub const VERSATILE: &'static str = "versatile";
}

/// In-memory [`ItemOracle`] keyed by item id.
#[derive(Clone, Debug, Default)]
pub struct ItemCatalog {
    items: HashMap<String, Arc<Item>>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, item: Arc<Item>) {
        self.items.insert(item.id.clone(), item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<Arc<Item>> for ItemCatalog {
    fn from_iter<T: IntoIterator<Item = Arc<Item>>>(iter: T) -> Self {
        let mut catalog = Self::new();
        for item in iter {
            catalog.insert(item);
        }
        catalog
    }
}

impl ItemOracle for ItemCatalog {
    fn item(&self, id: &str) -> Option<Arc<Item>> {
        self.items.get(id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_and_slot_follow_id_prefix() {
        let dagger = Item::new("weapon/dagger", "Dagger");
        assert_eq!(dagger.category(), ItemCategory::Weapon);
        assert_eq!(dagger.slot(), Some(SlotKind::Weapon));

        let mail = Item::new("armor/chain_mail", "Chain Mail");
        assert_eq!(mail.slot(), Some(SlotKind::Armor));

        let buckler = Item::new("shield/buckler", "Buckler");
        assert_eq!(buckler.slot(), Some(SlotKind::OffHand));

        let gold = Item::new("currency/gold", "Gold");
        assert_eq!(gold.category(), ItemCategory::Currency);
        assert_eq!(gold.slot(), None);

        assert_eq!(Item::new("rope", "Rope").category(), ItemCategory::Other);
    }

    #[test]
    fn grips_follow_handedness_tags() {
        let dagger = Item::new("weapon/dagger", "Dagger").with_tags(["one-handed", "light"]);
        assert!(dagger.supports_grip(Grip::OneHanded));
        assert!(!dagger.supports_grip(Grip::TwoHanded));

        let axe = Item::new("weapon/greataxe", "Greataxe").with_tags(["two-handed"]);
        assert!(!axe.supports_grip(Grip::OneHanded));
        assert_eq!(axe.preferred_grip(), Grip::TwoHanded);

        let staff = Item::new("weapon/staff", "Staff").with_tags(["versatile"]);
        assert!(staff.supports_grip(Grip::OneHanded));
        assert!(staff.supports_grip(Grip::TwoHanded));
    }

    #[test]
    fn granted_facts_add_grip_once() {
        let axe = Item::new("weapon/greataxe", "Greataxe").with_tags(["two-handed", "heavy"]);
        assert_eq!(
            axe.granted_facts(Grip::TwoHanded),
            vec!["two-handed".to_string(), "heavy".to_string()]
        );
        let staff = Item::new("weapon/staff", "Staff").with_tags(["versatile"]);
        assert_eq!(
            staff.granted_facts(Grip::OneHanded),
            vec!["versatile".to_string(), "one-handed".to_string()]
        );
    }

    #[test]
    fn only_weapons_grant_grip_facts() {
        let mail = Item::new("armor/chain_mail", "Chain Mail").with_tags(["heavy"]);
        assert_eq!(
            mail.facts_for(SlotKind::Armor, Grip::OneHanded),
            vec!["heavy".to_string()]
        );
        let dagger = Item::new("weapon/dagger", "Dagger");
        assert_eq!(
            dagger.facts_for(SlotKind::Weapon, Grip::OneHanded),
            vec!["one-handed".to_string()]
        );
    }

    #[test]
    fn zero_stack_limit_is_treated_as_one() {
        let odd = Item::new("misc/odd", "Odd").with_max_quantity(0);
        assert_eq!(odd.max_stack(), 1);
        assert_eq!(Item::new("misc/any", "Any").max_stack(), u32::MAX);
    }

    #[test]
    fn catalog_lookup() {
        let catalog: ItemCatalog = [Arc::new(Item::new("ammo/arrow", "Arrow"))]
            .into_iter()
            .collect();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.item("ammo/arrow").is_some());
        assert!(catalog.item("ammo/bolt").is_none());
    }
}
