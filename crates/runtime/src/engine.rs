//! The combat round loop.
//!
//! [`CombatEngine`] owns the hero, the current enemy and the injected random
//! source. Commands mutate the combatants, publish log lines and publish a
//! fresh [`GameView`] afterwards. Only initialization and encounter resets
//! touch the content loaders and are therefore async.

use std::sync::Arc;

use game_content::ContentFactory;
use game_core::{
    Action, ActionReport, Entity, EntityError, EntityTemplate, Env, GameConfig, Grip, LootDrop,
    RngOracle, SlotKind, choose, generate_loot, resolve_action,
};

use crate::error::{Result, RuntimeError};
use crate::events::{Event, EventBus};
use crate::view::GameView;

/// Which combatant acts. The other one is the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Hero,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Self::Hero => Self::Enemy,
            Self::Enemy => Self::Hero,
        }
    }
}

/// Result of [`CombatEngine::next_round`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// The hero is down. The engine does not reset on its own.
    Defeat,
    /// The enemy was down; a new encounter has been spawned.
    Victory,
    /// Both survived the status tick and the enemy took its turn.
    Continued { enemy_actions: u32 },
}

pub type BoxedRng = Box<dyn RngOracle + Send>;

pub struct CombatEngine {
    config: GameConfig,
    content: Arc<ContentFactory>,
    rng: BoxedRng,
    base_actions: Arc<[Arc<Action>]>,
    hero: Entity,
    enemy: Entity,
    /// Drops of the current enemy, announced when the next encounter starts.
    pending_loot: Vec<LootDrop>,
    bus: EventBus,
}

impl CombatEngine {
    /// Hydrates the session: simple items, base actions, the hero's starting
    /// inventory and the first enemy.
    pub async fn initialize(
        config: GameConfig,
        content: Arc<ContentFactory>,
        mut rng: BoxedRng,
        bus: EventBus,
    ) -> Result<Self> {
        let module = config.module.as_str();

        content.items().load_simple_items(module).await?;

        let mut base_actions = Vec::with_capacity(config.base_actions.len());
        for id in &config.base_actions {
            base_actions.push(content.actions().load(id, module, None).await?);
        }
        let base_actions: Arc<[Arc<Action>]> = Arc::from(base_actions);

        let mut hero = Entity::new(
            &config.hero.name,
            &config.hero.hp,
            Arc::clone(&base_actions),
            &mut *rng,
        );
        for start in &config.hero.inventory {
            let item = content.items().load(&start.item, module).await?;
            hero.inventory.add_item(&item, start.quantity);
        }

        let first = match &config.first_enemy {
            Some(id) => id.clone(),
            None => choose(&mut *rng, &config.roster)
                .cloned()
                .ok_or(RuntimeError::EmptyRoster)?,
        };
        let template = content.entities().load(&first, module).await?;
        let (enemy, pending_loot) = spawn(&template, &base_actions, &mut *rng);

        tracing::info!(
            module,
            hero_hp = hero.max_hp,
            enemy = %enemy.name,
            "combat session initialized"
        );

        let engine = Self {
            config,
            content,
            rng,
            base_actions,
            hero,
            enemy,
            pending_loot,
            bus,
        };
        engine.render();
        Ok(engine)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn hero(&self) -> &Entity {
        &self.hero
    }

    pub fn enemy(&self) -> &Entity {
        &self.enemy
    }

    pub fn hero_mut(&mut self) -> &mut Entity {
        &mut self.hero
    }

    pub fn enemy_mut(&mut self) -> &mut Entity {
        &mut self.enemy
    }

    pub fn pending_loot(&self) -> &[LootDrop] {
        &self.pending_loot
    }

    pub fn view(&self) -> GameView {
        GameView::capture(&self.hero, &self.enemy)
    }

    /// Resolves `action` used by `user` against the other side, logs the
    /// display line and effect messages, then re-renders.
    pub fn use_action(&mut self, action: &Action, user: Side) -> ActionReport {
        let report = {
            let items = self.content.items().loaded(self.config.module.as_str());
            let mut env = Env::new(&items, &mut *self.rng);
            let (actor, target) = match user {
                Side::Hero => (&mut self.hero, &mut self.enemy),
                Side::Enemy => (&mut self.enemy, &mut self.hero),
            };
            resolve_action(action, actor, target, &mut env)
        };
        tracing::debug!(action = %action.id, ?user, "action resolved");

        for line in report.lines() {
            self.log(line);
        }
        self.render();
        report
    }

    /// Looks `action_id` up among the actions `user` can currently pick.
    pub fn use_action_by_id(&mut self, action_id: &str, user: Side) -> Result<ActionReport> {
        let action = self
            .side(user)
            .get_actions()
            .into_iter()
            .find(|action| action.id == action_id)
            .ok_or_else(|| RuntimeError::UnknownAction(action_id.to_string()))?;
        Ok(self.use_action(&action, user))
    }

    /// Equips a carried item on the hero.
    ///
    /// The item must belong in `slot`; the grip decides which handedness fact
    /// the weapon grants.
    pub fn equip_item(&mut self, slot: SlotKind, item_id: &str, grip: Grip) -> Result<String> {
        let item = self
            .hero
            .inventory
            .get_item(item_id)
            .map(|stack| Arc::clone(&stack.item))
            .ok_or_else(|| RuntimeError::ItemNotHeld(item_id.to_string()))?;
        if item.slot() != Some(slot) {
            return Err(EntityError::InvalidSlot(slot.to_string()).into());
        }

        let facts = item.facts_for(slot, grip);
        self.hero.equip(slot, Arc::clone(&item), facts);

        let line = match grip {
            Grip::TwoHanded if slot == SlotKind::Weapon => {
                format!("{} equipped the {} two-handed!", self.hero.name, item.name)
            }
            _ => format!("{} equipped the {}!", self.hero.name, item.name),
        };
        self.log(&line);
        self.render();
        Ok(line)
    }

    pub fn unequip_item(&mut self, slot: SlotKind) -> String {
        let name = self.hero.equipment.item(slot).map(|item| item.name.clone());
        let message = self.hero.unequip(slot);
        let line = match name {
            Some(name) => format!("{} unequipped the {name}!", self.hero.name),
            None => message,
        };
        self.log(&line);
        self.render();
        line
    }

    /// Advances the round.
    ///
    /// Statuses tick for the hero, then the enemy. A fallen hero ends the
    /// session, a fallen enemy triggers [`Self::reset_round`], otherwise the
    /// enemy spends its action points.
    pub async fn next_round(&mut self) -> Result<RoundOutcome> {
        for line in self.tick_statuses() {
            self.log(&line);
        }

        let outcome = if !self.hero.is_alive() {
            self.log("Hero has fallen!");
            RoundOutcome::Defeat
        } else if !self.enemy.is_alive() {
            self.log("The enemy has been defeated!");
            self.reset_round().await?;
            RoundOutcome::Victory
        } else {
            self.log("A new round has started!");
            let enemy_actions = self.enemy_turn();
            RoundOutcome::Continued { enemy_actions }
        };

        tracing::info!(?outcome, hero_hp = self.hero.hp, enemy_hp = self.enemy.hp, "round finished");
        self.render();
        self.bus.publish(Event::Outcome(outcome));
        Ok(outcome)
    }

    /// Starts a new encounter against a random roster archetype.
    ///
    /// The archetype is loaded before anything changes, so a failed reset
    /// keeps the current enemy and its pending loot. Loot rolled for the
    /// previous enemy is then announced; the new enemy's treasure and harvest
    /// replace it as pending loot.
    pub async fn reset_round(&mut self) -> Result<()> {
        let id = choose(&mut *self.rng, &self.config.roster)
            .cloned()
            .ok_or(RuntimeError::EmptyRoster)?;
        let template = self
            .content
            .entities()
            .load(&id, &self.config.module)
            .await?;

        let drops = std::mem::take(&mut self.pending_loot);
        if !drops.is_empty() {
            for drop in &drops {
                self.log(&format!("Loot: {drop}"));
            }
            self.bus.publish(Event::Loot(drops));
        }
        self.log("A new foe appears!");

        let (enemy, pending_loot) = spawn(&template, &self.base_actions, &mut *self.rng);
        tracing::info!(archetype = %id, enemy = %enemy.name, hp = enemy.hp, "encounter reset");
        self.enemy = enemy;
        self.pending_loot = pending_loot;
        self.render();
        Ok(())
    }

    fn tick_statuses(&mut self) -> Vec<String> {
        let items = self.content.items().loaded(self.config.module.as_str());
        let mut env = Env::new(&items, &mut *self.rng);
        let mut lines = self.hero.tick_effects(&mut env);
        lines.extend(self.enemy.tick_effects(&mut env));
        lines
    }

    /// Picks affordable actions uniformly until the budget runs out or no
    /// action fits. Returns how many actions were used.
    fn enemy_turn(&mut self) -> u32 {
        let mut budget = self.config.enemy_action_points;
        let mut taken = 0;

        while budget > 0 && taken < self.config.max_enemy_actions {
            let affordable: Vec<Arc<Action>> = self
                .enemy
                .get_actions()
                .into_iter()
                .filter(|action| action.cost <= budget)
                .collect();
            let Some(action) = choose(&mut *self.rng, &affordable).cloned() else {
                break;
            };
            budget -= action.cost;
            self.use_action(&action, Side::Enemy);
            taken += 1;
        }

        if taken == self.config.max_enemy_actions && budget > 0 {
            tracing::warn!(taken, budget, "enemy action cap reached");
        }
        taken
    }

    fn side(&self, side: Side) -> &Entity {
        match side {
            Side::Hero => &self.hero,
            Side::Enemy => &self.enemy,
        }
    }

    fn log(&self, line: &str) {
        tracing::debug!(target: "combat_log", "{line}");
        self.bus.publish(Event::Log(line.to_string()));
    }

    fn render(&self) {
        self.bus.publish(Event::Rendered(Box::new(self.view())));
    }
}

impl std::fmt::Debug for CombatEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CombatEngine")
            .field("module", &self.config.module)
            .field("hero", &self.hero.name)
            .field("enemy", &self.enemy.name)
            .field("pending_loot", &self.pending_loot.len())
            .finish_non_exhaustive()
    }
}

/// Builds a fresh enemy and rolls the loot it will leave behind.
fn spawn(
    template: &EntityTemplate,
    base_actions: &Arc<[Arc<Action>]>,
    rng: &mut dyn RngOracle,
) -> (Entity, Vec<LootDrop>) {
    let enemy = template.instantiate(Arc::clone(base_actions), rng);
    let mut loot = generate_loot(&template.treasure, rng);
    loot.extend(generate_loot(&template.harvest, rng));
    (enemy, loot)
}
