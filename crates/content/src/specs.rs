//! Serde-facing record types for authored content.
//!
//! These records mirror what unit designers write in RON catalogs. Stat and
//! modifier records reuse `gambit-core` types directly; ability records carry
//! a [`BehaviorSpec`] that must resolve to a concrete behavior before a
//! definition is produced. Resolution happens at load time: an authored
//! ability that names no known behavior fails the whole load instead of
//! silently producing a unit with a dead slot.

use std::sync::Arc;

use gambit_core::{
    AbilityDefinition, BehaviorHandle, BerserkRage, DefenseAura, ModifierDefinition, StatBlock,
    UnitClass, UnitDefinition,
};

/// Authored unit record.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct UnitSpec {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub class: UnitClass,
    pub stats: StatBlock,
    #[serde(default)]
    pub abilities: Vec<AbilitySpec>,
    /// Innate modifiers, applied permanently at spawn.
    #[serde(default)]
    pub modifiers: Vec<ModifierDefinition>,
    /// Presentation-only metadata; opaque to the combat core.
    #[serde(default)]
    pub visual: Option<VisualSpec>,
}

impl UnitSpec {
    /// Resolve this record into a validated core definition.
    ///
    /// Visual metadata is intentionally dropped here: it never enters
    /// `gambit-core` types.
    pub fn into_definition(self) -> Result<UnitDefinition, gambit_core::InitializationError> {
        let definition = UnitDefinition {
            id: self.id,
            name: self.name,
            description: self.description,
            class: self.class,
            stats: self.stats,
            abilities: self
                .abilities
                .into_iter()
                .map(AbilitySpec::into_definition)
                .collect(),
            innate_modifiers: self.modifiers,
        };
        definition.validate()?;
        Ok(definition)
    }
}

/// Authored ability record.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct AbilitySpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub energy_cost: u32,
    pub cooldown_turns: u32,
    pub behavior: BehaviorSpec,
}

impl AbilitySpec {
    pub fn into_definition(self) -> AbilityDefinition {
        let behavior = self.behavior.resolve();
        AbilityDefinition::new(
            self.name,
            self.description,
            self.energy_cost,
            self.cooldown_turns,
            behavior,
        )
    }
}

/// The closed set of authored ability behaviors.
///
/// Deserialization is the validation step: an unknown behavior tag is a parse
/// error, so every spec that loads resolves to a concrete strategy object.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorSpec {
    BerserkRage { attack_bonus: i32, duration_turns: u32 },
    DefenseAura { defense_bonus: i32 },
}

impl BehaviorSpec {
    /// Instantiate the shared behavior object for this spec.
    pub fn resolve(&self) -> BehaviorHandle {
        match *self {
            BehaviorSpec::BerserkRage {
                attack_bonus,
                duration_turns,
            } => Arc::new(BerserkRage::new(attack_bonus, duration_turns)),
            BehaviorSpec::DefenseAura { defense_bonus } => {
                Arc::new(DefenseAura::new(defense_bonus))
            }
        }
    }
}

/// Presentation metadata carried alongside a unit record.
///
/// Consumed by the rendering layer; the combat core never sees it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VisualSpec {
    pub model: String,
    #[serde(default = "VisualSpec::unit_scale")]
    pub scale: [f32; 3],
    #[serde(default)]
    pub offset: [f32; 3],
}

impl VisualSpec {
    fn unit_scale() -> [f32; 3] {
        [1.0, 1.0, 1.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_stats() -> StatBlock {
        StatBlock::default()
    }

    #[test]
    fn spec_resolves_to_definition() {
        let spec = UnitSpec {
            id: "berserker".into(),
            name: "Berserker".into(),
            description: String::new(),
            class: UnitClass::Knight,
            stats: base_stats(),
            abilities: vec![AbilitySpec {
                name: "Berserk Rage".into(),
                description: "Attack surge".into(),
                energy_cost: 30,
                cooldown_turns: 2,
                behavior: BehaviorSpec::BerserkRage {
                    attack_bonus: 50,
                    duration_turns: 3,
                },
            }],
            modifiers: Vec::new(),
            visual: None,
        };

        let definition = spec.into_definition().unwrap();
        assert_eq!(definition.class, UnitClass::Knight);
        assert_eq!(definition.abilities.len(), 1);
        assert_eq!(definition.abilities[0].energy_cost, 30);
    }

    #[test]
    fn invalid_stats_fail_resolution() {
        let spec = UnitSpec {
            id: "broken".into(),
            name: "Broken".into(),
            description: String::new(),
            class: UnitClass::default(),
            stats: StatBlock {
                attack_power: 0,
                ..base_stats()
            },
            abilities: Vec::new(),
            modifiers: Vec::new(),
            visual: None,
        };
        assert!(spec.into_definition().is_err());
    }
}
