/// Engine configuration constants and tunable parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Energy a unit spawns with. Clamped to [`GameConfig::MAX_ENERGY`].
    #[cfg_attr(feature = "serde", serde(default = "GameConfig::default_starting_energy"))]
    pub starting_energy: u32,

    /// Energy restored at the end of every `advance_turn` call.
    #[cfg_attr(feature = "serde", serde(default))]
    pub energy_regen_per_turn: u32,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// Maximum number of abilities a single unit can learn.
    pub const MAX_ABILITIES: usize = 16;
    /// Maximum number of simultaneously active modifiers on a unit.
    pub const MAX_MODIFIERS: usize = 32;

    // ===== runtime-tunable defaults =====
    /// Hard cap on a unit's energy pool.
    pub const MAX_ENERGY: u32 = 100;
    pub const DEFAULT_STARTING_ENERGY: u32 = Self::MAX_ENERGY;

    pub fn new() -> Self {
        Self {
            starting_energy: Self::DEFAULT_STARTING_ENERGY,
            energy_regen_per_turn: 0,
        }
    }

    #[cfg(feature = "serde")]
    fn default_starting_energy() -> u32 {
        Self::DEFAULT_STARTING_ENERGY
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
