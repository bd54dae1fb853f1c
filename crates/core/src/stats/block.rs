//! Base stat block and derived-stat arithmetic.
//!
//! `StatBlock` is the immutable value type authored in unit definitions.
//! Effective stats are never stored on their own: they are rebuilt from the
//! base block plus the summed contributions of the active modifier set
//! (see [`super::modifier::ModifierSet`]).

use crate::error::{CoreError, ErrorSeverity};

/// Immutable base statistics of a unit.
///
/// All fields are non-negative; `critical_multiplier` must be at least 1.0.
///
/// # Invariants
///
/// - `max_health >= 1`
/// - `attack_power >= 1`
/// - `defense >= 0`
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBlock {
    pub max_health: i32,
    pub attack_power: i32,
    pub defense: i32,
    pub movement_speed: f32,
    pub attack_range: u32,
    /// Chance to land a critical hit, in percent (0-100).
    pub critical_chance: u32,
    /// Damage multiplier on a critical hit (>= 1.0).
    pub critical_multiplier: f32,
    pub health_regen_per_turn: u32,
    pub movement_range: u32,
}

impl StatBlock {
    /// Validate the authored invariants.
    ///
    /// Called at unit initialization; a block that fails here must never
    /// produce a unit.
    pub fn validate(&self) -> Result<(), StatError> {
        if self.max_health < 1 {
            return Err(StatError::MaxHealthTooLow {
                value: self.max_health,
            });
        }
        if self.attack_power < 1 {
            return Err(StatError::AttackPowerTooLow {
                value: self.attack_power,
            });
        }
        if self.defense < 0 {
            return Err(StatError::NegativeDefense {
                value: self.defense,
            });
        }
        if self.movement_speed <= 0.0 {
            return Err(StatError::NonPositiveMovementSpeed {
                value: self.movement_speed,
            });
        }
        if self.attack_range < 1 {
            return Err(StatError::ZeroAttackRange);
        }
        if self.critical_chance > 100 {
            return Err(StatError::CriticalChanceOutOfRange {
                value: self.critical_chance,
            });
        }
        if self.critical_multiplier < 1.0 {
            return Err(StatError::CriticalMultiplierTooLow {
                value: self.critical_multiplier,
            });
        }
        if self.movement_range < 1 {
            return Err(StatError::ZeroMovementRange);
        }
        Ok(())
    }

    /// Build the effective stat block from this base plus summed modifier
    /// contributions.
    ///
    /// Floors are re-applied so debuffs can never push the effective block
    /// into an invalid range: `max_health >= 1`, `attack_power >= 0`,
    /// `defense >= 0`. All other fields pass through unchanged.
    pub fn with_bonuses(&self, totals: &BonusTotals) -> StatBlock {
        StatBlock {
            max_health: (self.max_health + totals.health).max(1),
            attack_power: (self.attack_power + totals.attack).max(0),
            defense: (self.defense + totals.defense).max(0),
            ..*self
        }
    }

    /// Effective maximum health as an unsigned quantity for clamping.
    #[inline]
    pub fn max_health_points(&self) -> u32 {
        self.max_health.max(1) as u32
    }
}

impl Default for StatBlock {
    /// A plain rank-and-file unit.
    fn default() -> Self {
        Self {
            max_health: 100,
            attack_power: 10,
            defense: 5,
            movement_speed: 1.0,
            attack_range: 1,
            critical_chance: 10,
            critical_multiplier: 1.5,
            health_regen_per_turn: 0,
            movement_range: 3,
        }
    }
}

/// Summed signed contributions from the active modifier set.
///
/// `effective = base + totals`, recomputed after every mutation of the set so
/// an expired modifier's contribution is reverted along with it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BonusTotals {
    pub attack: i32,
    pub defense: i32,
    pub health: i32,
}

impl BonusTotals {
    pub const ZERO: Self = Self {
        attack: 0,
        defense: 0,
        health: 0,
    };
}

/// Errors produced by [`StatBlock::validate`].
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum StatError {
    #[error("max_health must be at least 1 (got {value})")]
    MaxHealthTooLow { value: i32 },

    #[error("attack_power must be at least 1 (got {value})")]
    AttackPowerTooLow { value: i32 },

    #[error("defense must not be negative (got {value})")]
    NegativeDefense { value: i32 },

    #[error("movement_speed must be positive (got {value})")]
    NonPositiveMovementSpeed { value: f32 },

    #[error("attack_range must be at least 1")]
    ZeroAttackRange,

    #[error("critical_chance must be in 0..=100 (got {value})")]
    CriticalChanceOutOfRange { value: u32 },

    #[error("critical_multiplier must be at least 1.0 (got {value})")]
    CriticalMultiplierTooLow { value: f32 },

    #[error("movement_range must be at least 1")]
    ZeroMovementRange,
}

impl CoreError for StatError {
    fn severity(&self) -> ErrorSeverity {
        // All stat violations come from authored data and make the unit unusable.
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use StatError::*;
        match self {
            MaxHealthTooLow { .. } => "STAT_MAX_HEALTH_TOO_LOW",
            AttackPowerTooLow { .. } => "STAT_ATTACK_POWER_TOO_LOW",
            NegativeDefense { .. } => "STAT_NEGATIVE_DEFENSE",
            NonPositiveMovementSpeed { .. } => "STAT_NON_POSITIVE_MOVEMENT_SPEED",
            ZeroAttackRange => "STAT_ZERO_ATTACK_RANGE",
            CriticalChanceOutOfRange { .. } => "STAT_CRITICAL_CHANCE_OUT_OF_RANGE",
            CriticalMultiplierTooLow { .. } => "STAT_CRITICAL_MULTIPLIER_TOO_LOW",
            ZeroMovementRange => "STAT_ZERO_MOVEMENT_RANGE",
        }
    }
}
