//! Per-unit ability bookkeeping: definitions, cooldown state, and the catalog.

use std::fmt;

use arrayvec::ArrayVec;

use super::behavior::BehaviorHandle;
use crate::config::GameConfig;
use crate::error::{CoreError, ErrorSeverity};

/// Immutable authored template for an ability.
#[derive(Clone)]
pub struct AbilityDefinition {
    pub name: String,
    pub description: String,
    pub energy_cost: u32,
    pub cooldown_turns: u32,
    behavior: BehaviorHandle,
}

impl AbilityDefinition {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        energy_cost: u32,
        cooldown_turns: u32,
        behavior: BehaviorHandle,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            energy_cost,
            cooldown_turns,
            behavior,
        }
    }

    /// Shared handle to the execution behavior.
    pub fn behavior(&self) -> BehaviorHandle {
        self.behavior.clone()
    }
}

impl fmt::Debug for AbilityDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AbilityDefinition")
            .field("name", &self.name)
            .field("energy_cost", &self.energy_cost)
            .field("cooldown_turns", &self.cooldown_turns)
            .field("behavior", &self.behavior.name())
            .finish()
    }
}

/// Mutable runtime state of one learned ability.
#[derive(Clone, Debug)]
pub struct AbilityRuntime {
    definition: AbilityDefinition,
    current_cooldown: u32,
}

impl AbilityRuntime {
    fn new(definition: AbilityDefinition) -> Self {
        Self {
            definition,
            current_cooldown: 0,
        }
    }

    pub fn definition(&self) -> &AbilityDefinition {
        &self.definition
    }

    /// Turns until this ability can be used again (0 = ready).
    pub fn current_cooldown(&self) -> u32 {
        self.current_cooldown
    }

    pub fn is_ready(&self) -> bool {
        self.current_cooldown == 0
    }
}

/// The ordered list of a unit's learned abilities.
///
/// Each slot tracks its own cooldown independently. The catalog knows nothing
/// about energy; that gate belongs to the owning unit.
#[derive(Clone, Debug, Default)]
pub struct AbilityCatalog {
    slots: ArrayVec<AbilityRuntime, { GameConfig::MAX_ABILITIES }>,
}

impl AbilityCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new ability with zero cooldown.
    pub fn add(&mut self, definition: AbilityDefinition) -> Result<(), AbilityError> {
        if self.slots.is_full() {
            return Err(AbilityError::CatalogFull {
                max: GameConfig::MAX_ABILITIES,
            });
        }
        self.slots.push(AbilityRuntime::new(definition));
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&AbilityRuntime> {
        self.slots.get(index)
    }

    /// True iff `index` is in range and the slot's cooldown has elapsed.
    pub fn is_ready(&self, index: usize) -> bool {
        self.slots.get(index).is_some_and(AbilityRuntime::is_ready)
    }

    /// Put a slot on its definition's cooldown after execution.
    pub(crate) fn trigger_cooldown(&mut self, index: usize) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.current_cooldown = slot.definition.cooldown_turns;
        }
    }

    /// Advance one turn: decrement every slot's cooldown, floored at zero.
    pub fn tick(&mut self) {
        for slot in &mut self.slots {
            slot.current_cooldown = slot.current_cooldown.saturating_sub(1);
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AbilityRuntime> {
        self.slots.iter()
    }
}

/// Errors from ability operations.
///
/// Every variant leaves state untouched; none is fatal in gameplay flow.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AbilityError {
    /// Requested ability index does not exist.
    #[error("ability index {index} out of range (unit has {count})")]
    IndexOutOfRange { index: usize, count: usize },

    /// Ability is still cooling down.
    #[error("ability on cooldown ({remaining} turns remaining)")]
    OnCooldown { remaining: u32 },

    /// Owner lacks the energy to pay the cost.
    #[error("insufficient energy (need {required}, have {available})")]
    InsufficientEnergy { required: u32, available: u32 },

    /// The behavior's own execution condition rejected the call.
    #[error("ability precondition not met")]
    Rejected,

    /// Dead units cannot act.
    #[error("unit is dead")]
    UnitDead,

    /// The ability catalog has reached capacity.
    #[error("ability catalog is full (max: {max})")]
    CatalogFull { max: usize },
}

impl CoreError for AbilityError {
    fn severity(&self) -> ErrorSeverity {
        use AbilityError::*;
        match self {
            // May succeed on a later turn without any input change.
            OnCooldown { .. } | InsufficientEnergy { .. } | Rejected => ErrorSeverity::Recoverable,
            IndexOutOfRange { .. } | UnitDead | CatalogFull { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use AbilityError::*;
        match self {
            IndexOutOfRange { .. } => "ABILITY_INDEX_OUT_OF_RANGE",
            OnCooldown { .. } => "ABILITY_ON_COOLDOWN",
            InsufficientEnergy { .. } => "ABILITY_INSUFFICIENT_ENERGY",
            Rejected => "ABILITY_REJECTED",
            UnitDead => "ABILITY_UNIT_DEAD",
            CatalogFull { .. } => "ABILITY_CATALOG_FULL",
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::ability::behavior::DefenseAura;

    fn ability(name: &str, cooldown_turns: u32) -> AbilityDefinition {
        AbilityDefinition::new(name, "", 10, cooldown_turns, Arc::new(DefenseAura::new(5)))
    }

    #[test]
    fn new_slots_start_ready() {
        let mut catalog = AbilityCatalog::new();
        catalog.add(ability("aura", 3)).unwrap();
        assert!(catalog.is_ready(0));
        assert_eq!(catalog.get(0).unwrap().current_cooldown(), 0);
    }

    #[test]
    fn cooldown_counts_down_to_ready() {
        let mut catalog = AbilityCatalog::new();
        catalog.add(ability("aura", 2)).unwrap();

        catalog.trigger_cooldown(0);
        assert!(!catalog.is_ready(0));

        catalog.tick();
        assert!(!catalog.is_ready(0));
        catalog.tick();
        assert!(catalog.is_ready(0));

        // Ticking a ready slot stays at zero.
        catalog.tick();
        assert_eq!(catalog.get(0).unwrap().current_cooldown(), 0);
    }

    #[test]
    fn out_of_range_is_never_ready() {
        let catalog = AbilityCatalog::new();
        assert!(!catalog.is_ready(0));
        assert!(catalog.get(7).is_none());
    }

    #[test]
    fn catalog_capacity_is_bounded() {
        let mut catalog = AbilityCatalog::new();
        for i in 0..GameConfig::MAX_ABILITIES {
            catalog.add(ability(&format!("a{i}"), 1)).unwrap();
        }
        assert_eq!(
            catalog.add(ability("overflow", 1)),
            Err(AbilityError::CatalogFull {
                max: GameConfig::MAX_ABILITIES
            })
        );
    }
}
