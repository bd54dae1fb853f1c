//! Deterministic combat-state engine for turn-based tactical units.
//!
//! `gambit-core` models the runtime combat state of a single unit: its stat
//! pipeline, stacking/expiring modifiers, cooldown- and energy-gated
//! abilities, and damage/death resolution, all advanced by an explicit
//! per-turn tick. Everything else — rendering, input, board pathing, asset
//! authoring — is an external collaborator that talks to [`unit::UnitState`]
//! through its public contract and receives notifications through
//! [`unit::UnitObserver`].
//!
//! The core is single-threaded and synchronous: every call completes before
//! the caller regains control, and callers serialize all calls per unit.

pub mod ability;
pub mod combat;
pub mod config;
pub mod error;
pub mod stats;
pub mod unit;

pub use ability::{
    AbilityBehavior, AbilityCatalog, AbilityDefinition, AbilityError, AbilityRuntime,
    BehaviorHandle, BerserkRage, DefenseAura,
};
pub use combat::{DamageOutcome, Lifecycle, apply_damage, mitigate};
pub use config::GameConfig;
pub use error::{CoreError, ErrorSeverity};
pub use stats::{
    ActiveModifier, BonusTotals, ModifierDefinition, ModifierError, ModifierSet, StatBlock,
    StatError,
};
pub use unit::{
    InitializationError, ObserverSet, Position, UnitClass, UnitDefinition, UnitObserver, UnitState,
};
