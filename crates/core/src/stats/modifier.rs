//! Timed and permanent stat modifiers (buffs/debuffs).
//!
//! Every stat adjustment on a unit flows through the [`ModifierSet`] ledger:
//! `effective = base + sum(active contributions)`. Expiry removes an entry and
//! with it the entry's contribution, so effective stats are always
//! reconstructable from the set.
//!
//! # Turn-based Duration
//!
//! Durations are counted in whole turns and decremented by `tick()` once per
//! turn boundary. A modifier applied with duration 0 is permanent: it is never
//! removed by ticking.

use arrayvec::ArrayVec;

use super::block::BonusTotals;
use crate::config::GameConfig;
use crate::error::{CoreError, ErrorSeverity};

/// Immutable authored template for a stat modifier.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierDefinition {
    pub name: String,
    pub attack_bonus: i32,
    pub defense_bonus: i32,
    pub health_bonus: i32,
    /// Authoring default duration. The runtime duration is supplied separately
    /// when the modifier is applied.
    pub duration_turns: u32,
    /// Advisory flag; the engine currently allows identical modifiers to
    /// stack regardless.
    pub can_stack: bool,
}

impl ModifierDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attack_bonus: 0,
            defense_bonus: 0,
            health_bonus: 0,
            duration_turns: 0,
            can_stack: true,
        }
    }
}

/// A single modifier instance active on a unit.
///
/// Either a definition-backed stat modifier or a bare damage-reduction entry.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActiveModifier {
    kind: ActiveModifierKind,
    remaining_turns: u32,
    /// Applied with duration 0: never expires via ticking.
    permanent: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
enum ActiveModifierKind {
    Stat(ModifierDefinition),
    DamageReduction { percent: u32 },
}

impl ActiveModifier {
    fn from_definition(definition: ModifierDefinition, duration_turns: u32) -> Self {
        Self {
            kind: ActiveModifierKind::Stat(definition),
            remaining_turns: duration_turns,
            permanent: duration_turns == 0,
        }
    }

    fn from_reduction(percent: u32, duration_turns: u32) -> Self {
        Self {
            kind: ActiveModifierKind::DamageReduction {
                percent: percent.min(100),
            },
            remaining_turns: duration_turns,
            permanent: duration_turns == 0,
        }
    }

    pub fn name(&self) -> &str {
        match &self.kind {
            ActiveModifierKind::Stat(def) => &def.name,
            ActiveModifierKind::DamageReduction { .. } => "damage reduction",
        }
    }

    pub fn attack_bonus(&self) -> i32 {
        match &self.kind {
            ActiveModifierKind::Stat(def) => def.attack_bonus,
            ActiveModifierKind::DamageReduction { .. } => 0,
        }
    }

    pub fn defense_bonus(&self) -> i32 {
        match &self.kind {
            ActiveModifierKind::Stat(def) => def.defense_bonus,
            ActiveModifierKind::DamageReduction { .. } => 0,
        }
    }

    pub fn health_bonus(&self) -> i32 {
        match &self.kind {
            ActiveModifierKind::Stat(def) => def.health_bonus,
            ActiveModifierKind::DamageReduction { .. } => 0,
        }
    }

    /// Multiplicative incoming-damage reduction in percent (0 for stat
    /// modifiers).
    pub fn damage_reduction_percent(&self) -> u32 {
        match self.kind {
            ActiveModifierKind::Stat(_) => 0,
            ActiveModifierKind::DamageReduction { percent } => percent,
        }
    }

    /// Turns left before expiry. Meaningless for permanent modifiers.
    pub fn remaining_turns(&self) -> u32 {
        self.remaining_turns
    }

    pub fn is_permanent(&self) -> bool {
        self.permanent
    }
}

/// The set of modifiers currently active on one unit.
///
/// Owned exclusively by the unit; external readers only ever see immutable
/// views. Insertion order is preserved because damage-reduction entries
/// compound sequentially in that order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModifierSet {
    entries: ArrayVec<ActiveModifier, { GameConfig::MAX_MODIFIERS }>,
}

impl ModifierSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a definition-backed modifier for `duration_turns` turns
    /// (0 = permanent).
    ///
    /// A full set rejects the application; the caller's state is unchanged.
    pub fn apply(
        &mut self,
        definition: ModifierDefinition,
        duration_turns: u32,
    ) -> Result<(), ModifierError> {
        if self.entries.is_full() {
            return Err(ModifierError::SetFull {
                max: GameConfig::MAX_MODIFIERS,
            });
        }
        self.entries
            .push(ActiveModifier::from_definition(definition, duration_turns));
        Ok(())
    }

    /// Apply a bare damage-reduction modifier. Percent is clamped to 0-100.
    pub fn apply_damage_reduction(
        &mut self,
        percent: u32,
        duration_turns: u32,
    ) -> Result<(), ModifierError> {
        if self.entries.is_full() {
            return Err(ModifierError::SetFull {
                max: GameConfig::MAX_MODIFIERS,
            });
        }
        self.entries
            .push(ActiveModifier::from_reduction(percent, duration_turns));
        Ok(())
    }

    /// Advance one turn: decrement every timed entry and drop those that
    /// reach zero. Permanent (duration-0) entries are retained unconditionally.
    ///
    /// Returns the number of expired modifiers removed.
    pub fn tick(&mut self) -> usize {
        let before = self.entries.len();
        for entry in &mut self.entries {
            if !entry.permanent && entry.remaining_turns > 0 {
                entry.remaining_turns -= 1;
            }
        }
        self.entries.retain(|e| e.permanent || e.remaining_turns > 0);
        before - self.entries.len()
    }

    /// Summed stat contributions of every active entry.
    pub fn totals(&self) -> BonusTotals {
        let mut totals = BonusTotals::ZERO;
        for entry in &self.entries {
            totals.attack += entry.attack_bonus();
            totals.defense += entry.defense_bonus();
            totals.health += entry.health_bonus();
        }
        totals
    }

    /// Damage-reduction percentages in insertion order.
    ///
    /// Reductions compound multiplicatively in exactly this order.
    pub fn reductions(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries
            .iter()
            .map(|e| e.damage_reduction_percent())
            .filter(|&p| p > 0)
    }

    /// Read-only view of the active entries, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &ActiveModifier> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Errors from modifier application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ModifierError {
    /// The modifier set has reached capacity.
    #[error("modifier set is full (max: {max})")]
    SetFull { max: usize },
}

impl CoreError for ModifierError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            ModifierError::SetFull { .. } => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            ModifierError::SetFull { .. } => "MODIFIER_SET_FULL",
        }
    }
}
