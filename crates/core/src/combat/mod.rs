//! Combat resolution: mitigation arithmetic and the unit lifecycle machine.
//!
//! The functions here are pure; [`crate::unit::UnitState`] drives them and
//! owns the mutable state.

pub mod damage;

pub use damage::{DamageOutcome, apply_damage, mitigate};

/// Unit lifecycle.
///
/// A unit starts `Alive` and transitions to `Dead` exactly once, when damage
/// reduces its health to zero. `Dead` is terminal: there is no transition back
/// within this engine (revival means removing and re-initializing the unit,
/// which is the surrounding scene's responsibility). Dead units ignore further
/// damage, healing, and ability execution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Lifecycle {
    #[default]
    Alive,
    Dead,
}

impl Lifecycle {
    #[inline]
    pub const fn is_alive(self) -> bool {
        matches!(self, Self::Alive)
    }

    #[inline]
    pub const fn is_dead(self) -> bool {
        matches!(self, Self::Dead)
    }
}
