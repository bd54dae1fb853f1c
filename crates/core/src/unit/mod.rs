//! The unit aggregate: runtime combat state and its public contract.
//!
//! [`UnitState`] is the composition root. It exclusively owns the modifier
//! ledger and the ability catalog; no other component ever holds a mutable
//! reference to them. External callers (turn driver, input logic, presentation)
//! interact only through the methods here, and all mutation is synchronous —
//! every call completes before the caller regains control.

pub mod events;

pub use events::{ObserverSet, UnitObserver};

use tracing::{debug, warn};

use crate::ability::{AbilityCatalog, AbilityDefinition, AbilityError, AbilityRuntime};
use crate::combat::{DamageOutcome, Lifecycle, apply_damage, mitigate};
use crate::config::GameConfig;
use crate::error::{CoreError, ErrorSeverity};
use crate::stats::{ActiveModifier, ModifierDefinition, ModifierError, ModifierSet, StatBlock, StatError};

/// Discrete board position expressed in tile coordinates.
///
/// The core tracks where a unit stands but knows nothing about the board:
/// pathing, occupancy, and movement rules are external collaborators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

/// Battlefield role of a unit.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum UnitClass {
    #[default]
    Soldier,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
    Mage,
    Archer,
    Tank,
    Support,
    Boss,
}

/// Immutable authored template for a unit.
///
/// Read once at initialization and never mutated by the core. Visual metadata
/// (models, scale, offsets) stays in the content layer and never reaches
/// these types.
#[derive(Clone, Debug)]
pub struct UnitDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub class: UnitClass,
    pub stats: StatBlock,
    /// Learned abilities, in catalog order.
    pub abilities: Vec<AbilityDefinition>,
    /// Innate modifiers, applied at spawn with duration 0 (permanent).
    pub innate_modifiers: Vec<ModifierDefinition>,
}

impl UnitDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>, stats: StatBlock) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            class: UnitClass::default(),
            stats,
            abilities: Vec::new(),
            innate_modifiers: Vec::new(),
        }
    }

    /// Check that this definition can produce a unit.
    ///
    /// Malformed definition data is the one unrecoverable condition in this
    /// engine: it must fail loudly here rather than produce a half-initialized
    /// unit.
    pub fn validate(&self) -> Result<(), InitializationError> {
        self.stats.validate()?;
        if let Some(index) = self.abilities.iter().position(|a| a.name.is_empty()) {
            return Err(InitializationError::UnnamedAbility { index });
        }
        if self.abilities.len() > GameConfig::MAX_ABILITIES {
            return Err(InitializationError::TooManyAbilities {
                count: self.abilities.len(),
                max: GameConfig::MAX_ABILITIES,
            });
        }
        if self.innate_modifiers.len() > GameConfig::MAX_MODIFIERS {
            return Err(InitializationError::TooManyModifiers {
                count: self.innate_modifiers.len(),
                max: GameConfig::MAX_MODIFIERS,
            });
        }
        Ok(())
    }
}

/// Errors from unit initialization.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum InitializationError {
    #[error("invalid base stats: {0}")]
    Stats(#[from] StatError),

    #[error("ability at index {index} has no name")]
    UnnamedAbility { index: usize },

    #[error("too many abilities ({count}, max: {max})")]
    TooManyAbilities { count: usize, max: usize },

    #[error("too many innate modifiers ({count}, max: {max})")]
    TooManyModifiers { count: usize, max: usize },
}

impl CoreError for InitializationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use InitializationError::*;
        match self {
            Stats(err) => err.error_code(),
            UnnamedAbility { .. } => "INIT_UNNAMED_ABILITY",
            TooManyAbilities { .. } => "INIT_TOO_MANY_ABILITIES",
            TooManyModifiers { .. } => "INIT_TOO_MANY_MODIFIERS",
        }
    }
}

/// Runtime combat state of one unit.
///
/// # Invariants
///
/// - `effective` always equals `base_stats + modifiers.totals()`; it is
///   recomputed after every mutation of the modifier set, never read stale
/// - `current_health` is clamped to `[0, effective max]` on every
///   health-affecting mutation
/// - `current_energy` is clamped to `[0, GameConfig::MAX_ENERGY]`
/// - The `Alive → Dead` transition fires at most once, only from `take_damage`
#[derive(Debug)]
pub struct UnitState {
    name: String,
    class: UnitClass,
    base_stats: StatBlock,
    /// Cached effective stats. Must be recomputed whenever `modifiers` or
    /// `base_stats` change.
    effective: StatBlock,
    current_health: u32,
    current_energy: u32,
    modifiers: ModifierSet,
    abilities: AbilityCatalog,
    position: Position,
    lifecycle: Lifecycle,
    selected: bool,
    moving: bool,
    config: GameConfig,
    observers: ObserverSet,
}

impl UnitState {
    /// Initialize a unit from its definition at a board position.
    pub fn new(definition: &UnitDefinition, position: Position) -> Result<Self, InitializationError> {
        Self::with_config(definition, position, GameConfig::default())
    }

    /// Initialize with explicit engine configuration.
    pub fn with_config(
        definition: &UnitDefinition,
        position: Position,
        config: GameConfig,
    ) -> Result<Self, InitializationError> {
        definition.validate()?;

        let base = definition.stats;
        let mut unit = Self {
            name: definition.name.clone(),
            class: definition.class,
            base_stats: base,
            effective: base,
            current_health: base.max_health_points(),
            current_energy: config.starting_energy.min(GameConfig::MAX_ENERGY),
            modifiers: ModifierSet::new(),
            abilities: AbilityCatalog::new(),
            position,
            lifecycle: Lifecycle::Alive,
            selected: false,
            moving: false,
            config,
            observers: ObserverSet::new(),
        };

        for ability in &definition.abilities {
            unit.abilities
                .add(ability.clone())
                .map_err(|_| InitializationError::TooManyAbilities {
                    count: definition.abilities.len(),
                    max: GameConfig::MAX_ABILITIES,
                })?;
        }
        for modifier in &definition.innate_modifiers {
            unit.apply_modifier(modifier.clone(), 0).map_err(|_| {
                InitializationError::TooManyModifiers {
                    count: definition.innate_modifiers.len(),
                    max: GameConfig::MAX_MODIFIERS,
                }
            })?;
        }

        debug!(
            unit = %unit.name,
            health = unit.current_health,
            abilities = unit.abilities.len(),
            "unit initialized"
        );
        Ok(unit)
    }

    // ========================================================================
    // Turn advancement
    // ========================================================================

    /// Advance one turn boundary.
    ///
    /// Fixed sequencing contract: modifier durations expire first, then
    /// ability cooldowns drop. A modifier expiring this turn can therefore
    /// never mask an ability becoming ready in the same tick. Health and
    /// energy regeneration run last, against post-expiry effective stats.
    ///
    /// Dead units do not tick.
    pub fn advance_turn(&mut self) {
        if self.lifecycle.is_dead() {
            return;
        }

        let expired = self.modifiers.tick();
        if expired > 0 {
            debug!(unit = %self.name, expired, "modifiers expired");
            self.recompute_effective();
        }
        self.abilities.tick();

        if self.effective.health_regen_per_turn > 0 {
            self.heal(self.effective.health_regen_per_turn);
        }
        if self.config.energy_regen_per_turn > 0 {
            self.restore_energy(self.config.energy_regen_per_turn);
        }
    }

    // ========================================================================
    // Damage & healing
    // ========================================================================

    /// Apply incoming damage after mitigation.
    ///
    /// Mitigation is fully computed before health mutates, and a damage
    /// notification always precedes the died notification it may cause.
    /// Returns `None` (no state change, no notification) if the unit is
    /// already dead.
    pub fn take_damage(
        &mut self,
        base_damage: u32,
        attacker: Option<&UnitState>,
    ) -> Option<DamageOutcome> {
        if self.lifecycle.is_dead() {
            debug!(unit = %self.name, "ignoring damage to dead unit");
            return None;
        }

        let damage = mitigate(base_damage, self.effective.defense, self.modifiers.reductions());
        let outcome = apply_damage(self.current_health, damage);
        self.current_health = outcome.remaining_health;

        debug!(
            unit = %self.name,
            attacker = attacker.map(|a| a.name.as_str()),
            base_damage,
            damage,
            remaining = outcome.remaining_health,
            "damage taken"
        );
        self.observers
            .notify_damage_taken(outcome.damage_dealt, outcome.remaining_health);

        if outcome.lethal {
            self.die();
        }
        Some(outcome)
    }

    /// Restore health, capped at the effective maximum.
    ///
    /// Returns the healing actually applied (0 for a dead unit).
    pub fn heal(&mut self, amount: u32) -> u32 {
        if self.lifecycle.is_dead() {
            return 0;
        }
        let before = self.current_health;
        self.current_health = before
            .saturating_add(amount)
            .min(self.effective.max_health_points());
        let healed = self.current_health - before;
        if healed > 0 {
            debug!(unit = %self.name, healed, health = self.current_health, "healed");
        }
        healed
    }

    /// Terminal transition; fires notifications exactly once.
    fn die(&mut self) {
        debug_assert!(self.lifecycle.is_alive());
        self.lifecycle = Lifecycle::Dead;
        debug!(unit = %self.name, "unit died");
        self.observers.notify_died();
    }

    // ========================================================================
    // Abilities
    // ========================================================================

    /// True iff the ability at `index` could be executed right now: the unit
    /// is alive, the index exists, the cooldown has elapsed, the energy cost
    /// is payable, and the behavior's own condition holds.
    pub fn can_execute_ability(&self, index: usize) -> bool {
        if self.lifecycle.is_dead() {
            return false;
        }
        let Some(slot) = self.abilities.get(index) else {
            return false;
        };
        slot.is_ready()
            && self.current_energy >= slot.definition().energy_cost
            && slot.definition().behavior().can_execute(self)
    }

    /// Execute the ability at `index`, optionally against a target unit.
    ///
    /// On any gate failure the call is a logged no-op and returns the reason;
    /// otherwise the energy cost is consumed, the behavior runs its effects,
    /// and the slot goes on cooldown.
    pub fn execute_ability(
        &mut self,
        index: usize,
        target: Option<&mut UnitState>,
    ) -> Result<(), AbilityError> {
        if self.lifecycle.is_dead() {
            warn!(unit = %self.name, index, "dead unit cannot use abilities");
            return Err(AbilityError::UnitDead);
        }
        let Some(slot) = self.abilities.get(index) else {
            warn!(
                unit = %self.name,
                index,
                count = self.abilities.len(),
                "ability index out of range"
            );
            return Err(AbilityError::IndexOutOfRange {
                index,
                count: self.abilities.len(),
            });
        };

        let remaining = slot.current_cooldown();
        if remaining > 0 {
            warn!(unit = %self.name, ability = %slot.definition().name, remaining, "ability on cooldown");
            return Err(AbilityError::OnCooldown { remaining });
        }
        let cost = slot.definition().energy_cost;
        if self.current_energy < cost {
            warn!(
                unit = %self.name,
                ability = %slot.definition().name,
                required = cost,
                available = self.current_energy,
                "insufficient energy"
            );
            return Err(AbilityError::InsufficientEnergy {
                required: cost,
                available: self.current_energy,
            });
        }

        let behavior = slot.definition().behavior();
        if !behavior.can_execute(self) {
            warn!(unit = %self.name, ability = %behavior.name(), "ability precondition not met");
            return Err(AbilityError::Rejected);
        }

        self.consume_energy(cost);
        behavior.execute(self, target);
        self.abilities.trigger_cooldown(index);
        debug!(unit = %self.name, ability = %behavior.name(), "ability executed");
        Ok(())
    }

    // ========================================================================
    // Modifiers
    // ========================================================================

    /// Apply a modifier for `duration_turns` turns (0 = permanent).
    ///
    /// A positive health bonus is granted to current health immediately; the
    /// effective block is recomputed and health re-clamped either way.
    pub fn apply_modifier(
        &mut self,
        definition: ModifierDefinition,
        duration_turns: u32,
    ) -> Result<(), ModifierError> {
        let health_bonus = definition.health_bonus;
        let name = definition.name.clone();
        match self.modifiers.apply(definition, duration_turns) {
            Ok(()) => {
                debug!(unit = %self.name, modifier = %name, duration_turns, "modifier applied");
                if health_bonus > 0 {
                    self.current_health = self.current_health.saturating_add(health_bonus as u32);
                }
                self.recompute_effective();
                Ok(())
            }
            Err(err) => {
                warn!(unit = %self.name, modifier = %name, %err, "modifier dropped");
                Err(err)
            }
        }
    }

    /// Apply a bare incoming-damage reduction for `duration_turns` turns
    /// (0 = permanent). Does not alter attack/defense/health totals.
    pub fn apply_damage_reduction(
        &mut self,
        percent: u32,
        duration_turns: u32,
    ) -> Result<(), ModifierError> {
        match self.modifiers.apply_damage_reduction(percent, duration_turns) {
            Ok(()) => {
                debug!(
                    unit = %self.name,
                    percent = percent.min(100),
                    duration_turns,
                    "damage reduction applied"
                );
                Ok(())
            }
            Err(err) => {
                warn!(unit = %self.name, %err, "damage reduction dropped");
                Err(err)
            }
        }
    }

    /// Direct permanent adjustment of base stats, outside the modifier ledger.
    ///
    /// This is the uncontrolled path some external effects use; changes made
    /// here are never reverted. Base floors are re-applied and current health
    /// re-clamped.
    pub fn modify_stats(
        &mut self,
        attack_bonus: Option<i32>,
        defense_bonus: Option<i32>,
        health_bonus: Option<i32>,
    ) {
        if let Some(attack) = attack_bonus {
            self.base_stats.attack_power = (self.base_stats.attack_power + attack).max(1);
        }
        if let Some(defense) = defense_bonus {
            self.base_stats.defense = (self.base_stats.defense + defense).max(0);
        }
        if let Some(health) = health_bonus {
            self.base_stats.max_health = (self.base_stats.max_health + health).max(1);
        }
        self.recompute_effective();
    }

    fn recompute_effective(&mut self) {
        self.effective = self.base_stats.with_bonuses(&self.modifiers.totals());
        self.current_health = self.current_health.min(self.effective.max_health_points());
    }

    // ========================================================================
    // Energy
    // ========================================================================

    /// Spend energy, floored at zero.
    pub fn consume_energy(&mut self, cost: u32) {
        self.current_energy = self.current_energy.saturating_sub(cost);
        debug!(unit = %self.name, cost, remaining = self.current_energy, "energy consumed");
    }

    /// Restore energy, capped at [`GameConfig::MAX_ENERGY`].
    pub fn restore_energy(&mut self, amount: u32) {
        self.current_energy = self
            .current_energy
            .saturating_add(amount)
            .min(GameConfig::MAX_ENERGY);
    }

    // ========================================================================
    // Flags & position
    // ========================================================================

    pub fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub fn set_moving(&mut self, moving: bool) {
        self.moving = moving;
    }

    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    // ========================================================================
    // Observers
    // ========================================================================

    /// Attach a notification subscriber.
    pub fn subscribe(&mut self, observer: Box<dyn UnitObserver>) {
        self.observers.subscribe(observer);
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn class(&self) -> UnitClass {
        self.class
    }

    pub fn current_health(&self) -> u32 {
        self.current_health
    }

    /// Effective maximum health (base plus active modifier contributions).
    pub fn max_health(&self) -> u32 {
        self.effective.max_health_points()
    }

    pub fn current_energy(&self) -> u32 {
        self.current_energy
    }

    pub fn base_stats(&self) -> &StatBlock {
        &self.base_stats
    }

    /// The effective stat block, always consistent with the modifier set.
    pub fn effective_stats(&self) -> &StatBlock {
        &self.effective
    }

    pub fn attack_power(&self) -> i32 {
        self.effective.attack_power
    }

    pub fn defense(&self) -> i32 {
        self.effective.defense
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn is_alive(&self) -> bool {
        self.lifecycle.is_alive()
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn ability_count(&self) -> usize {
        self.abilities.len()
    }

    /// Metadata view of one ability slot.
    pub fn ability(&self, index: usize) -> Option<&AbilityRuntime> {
        self.abilities.get(index)
    }

    /// Read-only view of the active modifiers, in insertion order.
    pub fn active_modifiers(&self) -> impl Iterator<Item = &ActiveModifier> {
        self.modifiers.iter()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;

    use super::*;
    use crate::ability::{BerserkRage, DefenseAura};

    #[derive(Default)]
    struct EventLog {
        damage: Vec<(u32, u32)>,
        deaths: u32,
    }

    struct Recorder(Rc<RefCell<EventLog>>);

    impl UnitObserver for Recorder {
        fn on_damage_taken(&mut self, amount: u32, remaining: u32) {
            self.0.borrow_mut().damage.push((amount, remaining));
        }

        fn on_died(&mut self) {
            self.0.borrow_mut().deaths += 1;
        }
    }

    fn plain_stats() -> StatBlock {
        StatBlock {
            max_health: 100,
            attack_power: 10,
            defense: 0,
            ..StatBlock::default()
        }
    }

    fn plain_unit() -> UnitState {
        UnitState::new(
            &UnitDefinition::new("u1", "Pawn", plain_stats()),
            Position::ORIGIN,
        )
        .unwrap()
    }

    fn rage_definition(energy_cost: u32, cooldown_turns: u32) -> UnitDefinition {
        let mut definition = UnitDefinition::new("u2", "Berserker", plain_stats());
        definition.abilities.push(AbilityDefinition::new(
            "Berserk Rage",
            "Attack surge for 3 turns",
            energy_cost,
            cooldown_turns,
            Arc::new(BerserkRage::new(50, 3)),
        ));
        definition
    }

    #[test]
    fn spawn_matches_definition() {
        let unit = plain_unit();
        assert!(unit.is_alive());
        assert_eq!(unit.current_health(), 100);
        assert_eq!(unit.current_energy(), GameConfig::MAX_ENERGY);
        assert_eq!(unit.position(), Position::ORIGIN);
        assert!(!unit.is_selected());
        assert!(!unit.is_moving());
    }

    #[test]
    fn invalid_definition_fails_initialization() {
        let mut definition = UnitDefinition::new("bad", "Broken", plain_stats());
        definition.stats.max_health = 0;
        let err = UnitState::new(&definition, Position::ORIGIN).unwrap_err();
        assert_eq!(
            err,
            InitializationError::Stats(StatError::MaxHealthTooLow { value: 0 })
        );
    }

    #[test]
    fn damage_death_sequence_end_to_end() {
        let log = Rc::new(RefCell::new(EventLog::default()));
        let mut unit = plain_unit();
        unit.subscribe(Box::new(Recorder(log.clone())));

        // defense 0: 50 base → 50 actual
        let outcome = unit.take_damage(50, None).unwrap();
        assert_eq!(outcome.damage_dealt, 50);
        assert_eq!(unit.current_health(), 50);
        assert_eq!(log.borrow().damage, vec![(50, 50)]);
        assert_eq!(log.borrow().deaths, 0);

        let outcome = unit.take_damage(50, None).unwrap();
        assert!(outcome.lethal);
        assert_eq!(unit.current_health(), 0);
        assert!(!unit.is_alive());
        assert_eq!(log.borrow().deaths, 1);
        // Damage notification precedes death.
        assert_eq!(log.borrow().damage.len(), 2);

        // Further damage is a no-op: no third notification, no second death.
        assert!(unit.take_damage(50, None).is_none());
        assert_eq!(unit.current_health(), 0);
        assert_eq!(log.borrow().damage.len(), 2);
        assert_eq!(log.borrow().deaths, 1);
    }

    #[test]
    fn heal_caps_at_effective_max_and_zero_is_noop() {
        let mut unit = plain_unit();
        unit.take_damage(30, None);
        assert_eq!(unit.current_health(), 70);

        assert_eq!(unit.heal(0), 0);
        assert_eq!(unit.current_health(), 70);

        assert_eq!(unit.heal(500), 30);
        assert_eq!(unit.current_health(), 100);
    }

    #[test]
    fn dead_unit_refuses_everything() {
        let mut unit = plain_unit();
        unit.take_damage(1_000, None);
        assert!(!unit.is_alive());

        assert_eq!(unit.heal(50), 0);
        assert!(unit.take_damage(10, None).is_none());
        assert!(!unit.can_execute_ability(0));

        let mut berserker = UnitState::new(&rage_definition(30, 2), Position::ORIGIN).unwrap();
        berserker.take_damage(1_000, None);
        assert_eq!(
            berserker.execute_ability(0, None),
            Err(AbilityError::UnitDead)
        );
    }

    #[test]
    fn ability_cooldown_gates_repeat_execution() {
        // energy for three casts, but cooldown 2 permits only the first
        let mut unit = UnitState::new(&rage_definition(30, 2), Position::ORIGIN).unwrap();

        assert!(unit.execute_ability(0, None).is_ok());
        assert_eq!(unit.current_energy(), 70);
        assert!(!unit.can_execute_ability(0));

        assert_eq!(
            unit.execute_ability(0, None),
            Err(AbilityError::OnCooldown { remaining: 2 })
        );
        assert_eq!(
            unit.execute_ability(0, None),
            Err(AbilityError::OnCooldown { remaining: 2 })
        );
        // Energy untouched by the rejected calls.
        assert_eq!(unit.current_energy(), 70);

        unit.advance_turn();
        assert!(!unit.can_execute_ability(0));
        unit.advance_turn();
        assert!(unit.can_execute_ability(0));
    }

    #[test]
    fn ability_energy_gate() {
        let mut unit = UnitState::new(&rage_definition(80, 0), Position::ORIGIN).unwrap();

        assert!(unit.execute_ability(0, None).is_ok());
        assert_eq!(unit.current_energy(), 20);
        // Cooldown 0: ready again immediately, but energy now falls short.
        assert_eq!(
            unit.execute_ability(0, None),
            Err(AbilityError::InsufficientEnergy {
                required: 80,
                available: 20
            })
        );
    }

    #[test]
    fn invalid_index_is_a_noop() {
        let mut unit = plain_unit();
        assert_eq!(
            unit.execute_ability(3, None),
            Err(AbilityError::IndexOutOfRange { index: 3, count: 0 })
        );
        assert_eq!(unit.current_energy(), GameConfig::MAX_ENERGY);
    }

    #[test]
    fn berserk_rage_buffs_through_the_ledger_and_expires() {
        let mut unit = UnitState::new(&rage_definition(30, 2), Position::ORIGIN).unwrap();
        assert_eq!(unit.attack_power(), 10);

        unit.execute_ability(0, None).unwrap();
        assert_eq!(unit.attack_power(), 60);
        assert_eq!(unit.active_modifiers().count(), 1);

        unit.advance_turn();
        unit.advance_turn();
        assert_eq!(unit.attack_power(), 60);
        unit.advance_turn();
        // Buff expired; its contribution reverted.
        assert_eq!(unit.attack_power(), 10);
        assert_eq!(unit.active_modifiers().count(), 0);
    }

    #[test]
    fn defense_aura_stacks_permanently() {
        let mut definition = UnitDefinition::new("u3", "Warden", plain_stats());
        definition.abilities.push(AbilityDefinition::new(
            "Defense Aura",
            "",
            10,
            0,
            Arc::new(DefenseAura::new(5)),
        ));
        let mut unit = UnitState::new(&definition, Position::ORIGIN).unwrap();

        unit.execute_ability(0, None).unwrap();
        unit.execute_ability(0, None).unwrap();
        assert_eq!(unit.defense(), 10);

        for _ in 0..10 {
            unit.advance_turn();
        }
        // Duration-0 entries never expire.
        assert_eq!(unit.defense(), 10);
        assert_eq!(unit.active_modifiers().count(), 2);
    }

    #[test]
    fn innate_modifiers_apply_at_spawn_and_persist() {
        let mut definition = UnitDefinition::new("u4", "Veteran", plain_stats());
        definition.innate_modifiers.push(ModifierDefinition {
            defense_bonus: 10,
            health_bonus: 20,
            ..ModifierDefinition::new("veterancy")
        });
        let mut unit = UnitState::new(&definition, Position::ORIGIN).unwrap();

        assert_eq!(unit.defense(), 10);
        assert_eq!(unit.max_health(), 120);
        assert_eq!(unit.current_health(), 120);

        for _ in 0..5 {
            unit.advance_turn();
        }
        assert_eq!(unit.defense(), 10);
    }

    #[test]
    fn damage_reduction_compounds_with_mitigation() {
        let mut unit = plain_unit();
        unit.apply_damage_reduction(50, 2).unwrap();
        unit.apply_damage_reduction(50, 2).unwrap();

        // defense 0, two 50% reductions: 100 → 25
        let outcome = unit.take_damage(100, None).unwrap();
        assert_eq!(outcome.damage_dealt, 25);
        assert_eq!(unit.current_health(), 75);

        // Reductions expire like any timed modifier.
        unit.advance_turn();
        unit.advance_turn();
        let outcome = unit.take_damage(50, None).unwrap();
        assert_eq!(outcome.damage_dealt, 50);
    }

    #[test]
    fn expired_health_modifier_reclamps_current_health() {
        let mut unit = plain_unit();
        unit.apply_modifier(
            ModifierDefinition {
                health_bonus: 50,
                ..ModifierDefinition::new("bulwark")
            },
            1,
        )
        .unwrap();
        assert_eq!(unit.max_health(), 150);
        assert_eq!(unit.current_health(), 150);

        unit.advance_turn();
        assert_eq!(unit.max_health(), 100);
        assert_eq!(unit.current_health(), 100);
    }

    #[test]
    fn modify_stats_is_permanent_and_floored() {
        let mut unit = plain_unit();
        unit.modify_stats(Some(15), None, Some(-50));
        assert_eq!(unit.attack_power(), 25);
        assert_eq!(unit.max_health(), 50);
        assert_eq!(unit.current_health(), 50);

        for _ in 0..10 {
            unit.advance_turn();
        }
        // Never reverted: this path bypasses the ledger by design.
        assert_eq!(unit.attack_power(), 25);

        unit.modify_stats(Some(-1_000), Some(-1_000), None);
        assert_eq!(unit.attack_power(), 1);
        assert_eq!(unit.defense(), 0);
    }

    #[test]
    fn health_regen_runs_after_ticks() {
        let mut definition = UnitDefinition::new("u5", "Troll", plain_stats());
        definition.stats.health_regen_per_turn = 5;
        let mut unit = UnitState::new(&definition, Position::ORIGIN).unwrap();

        unit.take_damage(40, None);
        assert_eq!(unit.current_health(), 60);
        unit.advance_turn();
        assert_eq!(unit.current_health(), 65);
    }

    #[test]
    fn energy_regen_respects_cap() {
        let config = GameConfig {
            starting_energy: 90,
            energy_regen_per_turn: 20,
        };
        let mut unit = UnitState::with_config(
            &UnitDefinition::new("u6", "Sprinter", plain_stats()),
            Position::ORIGIN,
            config,
        )
        .unwrap();

        assert_eq!(unit.current_energy(), 90);
        unit.advance_turn();
        assert_eq!(unit.current_energy(), GameConfig::MAX_ENERGY);
    }

    #[test]
    fn flags_and_position_are_plain_state() {
        let mut unit = plain_unit();
        unit.set_selected(true);
        unit.set_moving(true);
        unit.set_position(Position::new(3, 4));
        assert!(unit.is_selected());
        assert!(unit.is_moving());
        assert_eq!(unit.position(), Position::new(3, 4));
    }

    #[test]
    fn unit_class_parses_from_snake_case() {
        assert_eq!("knight".parse::<UnitClass>().unwrap(), UnitClass::Knight);
        assert_eq!("BOSS".parse::<UnitClass>().unwrap(), UnitClass::Boss);
        assert!("pawn".parse::<UnitClass>().is_err());
    }
}
