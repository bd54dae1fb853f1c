//! Stat pipeline: base blocks, bonus totals, and the modifier ledger.
//!
//! # Architecture
//!
//! ```text
//! [ StatBlock (authored base) ]
//!      +
//! [ ModifierSet (active contributions) ]
//!      ↓
//! [ effective StatBlock (cached, recomputed on every set mutation) ]
//! ```
//!
//! ## Principles
//!
//! 1. **Single ledger**: every tracked stat adjustment is an entry in the
//!    modifier set; effective stats are always `base + totals`
//! 2. **Reversible**: removing an entry reverts its contribution
//! 3. **Deterministic**: integer arithmetic, no I/O, no randomness

pub mod block;
pub mod modifier;

pub use block::{BonusTotals, StatBlock, StatError};
pub use modifier::{ActiveModifier, ModifierDefinition, ModifierError, ModifierSet};
