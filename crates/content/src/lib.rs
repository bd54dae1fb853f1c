//! Data-driven content definitions and loaders.
//!
//! This crate sits between authored data files and `gambit-core`:
//! - Unit catalogs (data-driven via RON)
//! - Engine configuration (data-driven via TOML)
//! - Behavior resolution: authored behavior specs become concrete
//!   [`gambit_core::AbilityBehavior`] objects at load time, and an
//!   unresolvable spec fails the load instead of producing a broken unit
//!
//! Content records reuse core types (stat blocks, modifier definitions)
//! directly with serde; presentation-only metadata stays on the spec records
//! and never enters the core.

pub mod specs;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use specs::{AbilitySpec, BehaviorSpec, UnitSpec, VisualSpec};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, LoadResult, UnitLoader};
