//! Ability system: cooldown- and energy-gated special actions.
//!
//! Definitions pair authored numbers (cost, cooldown) with a shared
//! [`AbilityBehavior`] strategy object. The catalog tracks per-unit cooldown
//! state; execution gating and resource payment happen on
//! [`crate::unit::UnitState`], which owns both the catalog and the energy pool.

pub mod behavior;
pub mod catalog;

pub use behavior::{AbilityBehavior, BehaviorHandle, BerserkRage, DefenseAura};
pub use catalog::{AbilityCatalog, AbilityDefinition, AbilityError, AbilityRuntime};
