//! Polymorphic ability behaviors.
//!
//! Every special action a unit can take is a strategy object implementing
//! [`AbilityBehavior`]. Behaviors are stateless and shared between units via
//! `Arc`; all per-unit bookkeeping (cooldowns, buff expiry) lives on the unit
//! itself, inside its ability catalog and modifier ledger.

use std::sync::Arc;

use crate::stats::ModifierDefinition;
use crate::unit::UnitState;

/// The capability set of an ability.
///
/// # Implementation Rules
///
/// 1. `can_execute` adds domain-specific gates on top of the engine's own
///    checks (index, cooldown, energy); it must not mutate anything
/// 2. `execute` performs the side effects on owner and/or target; resource
///    consumption and cooldown bookkeeping are handled by the caller
/// 3. Behaviors hold no per-unit state
pub trait AbilityBehavior: Send + Sync {
    /// Display name of the ability behavior.
    fn name(&self) -> &str;

    /// Extra execution condition beyond cooldown and energy gates.
    fn can_execute(&self, _owner: &UnitState) -> bool {
        true
    }

    /// Apply the ability's effects.
    fn execute(&self, owner: &mut UnitState, target: Option<&mut UnitState>);
}

/// Shared handle to a behavior.
pub type BehaviorHandle = Arc<dyn AbilityBehavior>;

/// Self-buff: a timed attack-power surge on the owner.
///
/// The buff goes through the owner's modifier ledger with the configured
/// duration, so it expires (and its contribution reverts) via normal ticking.
#[derive(Clone, Copy, Debug)]
pub struct BerserkRage {
    pub attack_bonus: i32,
    pub duration_turns: u32,
}

impl BerserkRage {
    pub fn new(attack_bonus: i32, duration_turns: u32) -> Self {
        Self {
            attack_bonus,
            duration_turns,
        }
    }
}

impl AbilityBehavior for BerserkRage {
    fn name(&self) -> &str {
        "Berserk Rage"
    }

    fn execute(&self, owner: &mut UnitState, _target: Option<&mut UnitState>) {
        let definition = ModifierDefinition {
            attack_bonus: self.attack_bonus,
            duration_turns: self.duration_turns,
            ..ModifierDefinition::new("Berserk Rage")
        };
        // A full ledger already logged the drop; the ability still counts as used.
        let _ = owner.apply_modifier(definition, self.duration_turns);
    }
}

/// Aura: a permanent defense modifier on the owner.
///
/// Re-invocable; every invocation stacks a fresh duration-0 entry, no dedup.
#[derive(Clone, Copy, Debug)]
pub struct DefenseAura {
    pub defense_bonus: i32,
}

impl DefenseAura {
    pub fn new(defense_bonus: i32) -> Self {
        Self { defense_bonus }
    }
}

impl AbilityBehavior for DefenseAura {
    fn name(&self) -> &str {
        "Defense Aura"
    }

    fn execute(&self, owner: &mut UnitState, _target: Option<&mut UnitState>) {
        let definition = ModifierDefinition {
            defense_bonus: self.defense_bonus,
            ..ModifierDefinition::new("Defense Aura")
        };
        let _ = owner.apply_modifier(definition, 0);
    }
}
