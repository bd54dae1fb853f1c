//! Damage mitigation and application.

/// Outcome of a resolved damage application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageOutcome {
    /// Damage actually dealt after mitigation.
    pub damage_dealt: u32,
    /// Health remaining after the hit.
    pub remaining_health: u32,
    /// True if this hit reduced health to zero.
    pub lethal: bool,
}

/// Compute mitigated damage from a base amount.
///
/// # Formula
///
/// ```text
/// raw = round(base_damage × 100 / (100 + defense))
/// for each reduction percent, in insertion order:
///     raw = round(raw × (100 - percent) / 100)
/// final = max(raw, 1)
/// ```
///
/// Reductions compound multiplicatively, not additively; the insertion order
/// of the modifier set is the compounding order. The minimum-one floor means
/// a hit never deals zero damage, no matter how high defense is.
///
/// # Arguments
///
/// * `base_damage` - Unmitigated incoming damage
/// * `defense` - Defender's effective defense (negative treated as 0)
/// * `reductions` - Active damage-reduction percentages (each 0-100)
///
/// # Returns
///
/// Final damage value, at least 1.
pub fn mitigate(base_damage: u32, defense: i32, reductions: impl Iterator<Item = u32>) -> u32 {
    let defense = defense.max(0) as u64;

    let mut raw = div_round(base_damage as u64 * 100, 100 + defense);
    for percent in reductions {
        let percent = percent.min(100) as u64;
        raw = div_round(raw * (100 - percent), 100);
    }

    raw.max(1) as u32
}

/// Apply damage to current health.
///
/// Health is clamped at zero; the caller decides what a zero result means
/// (death transition).
pub fn apply_damage(current_health: u32, damage: u32) -> DamageOutcome {
    let remaining_health = current_health.saturating_sub(damage);
    DamageOutcome {
        damage_dealt: damage,
        remaining_health,
        lethal: remaining_health == 0,
    }
}

/// Rounding division, half away from zero.
fn div_round(numerator: u64, denominator: u64) -> u64 {
    (numerator + denominator / 2) / denominator
}
