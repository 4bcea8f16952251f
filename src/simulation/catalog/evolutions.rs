//! Evolution definitions: DNA requirements and permanent stat effects.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::simulation::dna::DnaType;

/// Identifier of an evolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvolutionId {
    /// Faster and harder to hit.
    Agile,
    /// More damage, slower.
    Brutal,
    /// More health, slightly slower.
    Armored,
    /// Hunger drains slower.
    Luminescent,
    /// Attacks hit every enemy in range.
    Electric,
    /// Attacks poison.
    Venomous,
    /// Longer reach and more damage.
    Predator,
    /// Health regenerates over time.
    Regenerative,
    /// Shorter attack cooldown.
    SwiftHunter,
    /// Dashes damage enemies.
    DashStriker,
    /// Heals from damage dealt.
    Vampire,
    /// Double damage at low health.
    Berserker,
    /// Much harder to hit.
    Phantom,
    /// Huge health pool, slow.
    Titan,
    /// Periodic damage pulse around the player.
    Storm,
}

impl EvolutionId {
    /// Snake-case identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            EvolutionId::Agile => "agile",
            EvolutionId::Brutal => "brutal",
            EvolutionId::Armored => "armored",
            EvolutionId::Luminescent => "luminescent",
            EvolutionId::Electric => "electric",
            EvolutionId::Venomous => "venomous",
            EvolutionId::Predator => "predator",
            EvolutionId::Regenerative => "regenerative",
            EvolutionId::SwiftHunter => "swift_hunter",
            EvolutionId::DashStriker => "dash_striker",
            EvolutionId::Vampire => "vampire",
            EvolutionId::Berserker => "berserker",
            EvolutionId::Phantom => "phantom",
            EvolutionId::Titan => "titan",
            EvolutionId::Storm => "storm",
        }
    }

    /// Looks up the catalog definition.
    pub fn def(self) -> &'static EvolutionDef {
        EVOLUTIONS
            .iter()
            .find(|def| def.id == self)
            .unwrap_or(&EVOLUTIONS[0])
    }
}

impl fmt::Display for EvolutionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an evolution identifier that is not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown evolution id `{0}`")]
pub struct UnknownEvolution(pub String);

impl FromStr for EvolutionId {
    type Err = UnknownEvolution;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EVOLUTIONS
            .iter()
            .map(|def| def.id)
            .find(|id| id.as_str() == s)
            .ok_or_else(|| UnknownEvolution(s.to_owned()))
    }
}

/// Area attack capability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AreaEffect {
    /// Radius recorded on the player's stats.
    pub radius: f32,
}

/// Dash damage capability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DashEffect {
    /// Fraction of effective damage dealt per dash hit. `None` means 0.8.
    pub multiplier: Option<f32>,
}

/// Damage-over-time applied to enemies hit by the player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoisonEffect {
    /// Damage per second.
    pub dps: f32,
    /// How long the poison lasts after the last hit.
    pub duration_ms: f32,
}

/// Damage bonus below a health fraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BerserkEffect {
    /// Health fraction below which the bonus applies.
    pub threshold: f32,
    /// Damage multiplier while berserk.
    pub multiplier: f32,
}

/// Periodic damage pulse centred on the player.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StormEffect {
    /// Pulse radius.
    pub radius: f32,
    /// Damage per pulse.
    pub damage: f32,
    /// Time between pulses.
    pub interval_ms: f32,
}

/// Stat changes of one evolution. Every field is optional.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EvolutionEffects {
    /// Multiplies `speed_multiplier`.
    pub speed_multiplier: Option<f32>,
    /// Multiplies `damage_multiplier`.
    pub damage_multiplier: Option<f32>,
    /// Rescales max health and fully heals.
    pub max_health_multiplier: Option<f32>,
    /// Added to dodge chance.
    pub dodge_chance: Option<f32>,
    /// Multiplies attack range.
    pub attack_range_multiplier: Option<f32>,
    /// Multiplies the attack cooldown.
    pub attack_cooldown_multiplier: Option<f32>,
    /// Enables area attacks.
    pub area_damage: Option<AreaEffect>,
    /// Enables dash damage.
    pub dash_damage: Option<DashEffect>,
    /// Poison on hit.
    pub poison: Option<PoisonEffect>,
    /// Health regenerated per second, added.
    pub health_regen: Option<f32>,
    /// Fraction of dealt damage healed, added.
    pub life_steal: Option<f32>,
    /// Low-health damage bonus.
    pub berserk: Option<BerserkEffect>,
    /// Passive pulse.
    pub storm: Option<StormEffect>,
    /// Divides hunger decay.
    pub hunger_efficiency: Option<f32>,
}

impl EvolutionEffects {
    /// No effect at all. Base for struct-update syntax.
    pub const NONE: EvolutionEffects = EvolutionEffects {
        speed_multiplier: None,
        damage_multiplier: None,
        max_health_multiplier: None,
        dodge_chance: None,
        attack_range_multiplier: None,
        attack_cooldown_multiplier: None,
        area_damage: None,
        dash_damage: None,
        poison: None,
        health_regen: None,
        life_steal: None,
        berserk: None,
        storm: None,
        hunger_efficiency: None,
    };
}

impl Default for EvolutionEffects {
    fn default() -> Self {
        Self::NONE
    }
}

/// Visual descriptor forwarded to the renderer. Ignored by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvolutionVisual {
    /// Horizontal body scale.
    pub scale_x: f32,
    /// Vertical body scale.
    pub scale_y: f32,
    /// New body color.
    pub color: u32,
    /// Glow aura.
    pub glowing: bool,
    /// Armor shell.
    pub has_shell: bool,
}

impl EvolutionVisual {
    const fn tinted(scale_x: f32, scale_y: f32, color: u32) -> Self {
        Self {
            scale_x,
            scale_y,
            color,
            glowing: false,
            has_shell: false,
        }
    }

    const fn glowing(mut self) -> Self {
        self.glowing = true;
        self
    }

    const fn shelled(mut self) -> Self {
        self.has_shell = true;
        self
    }
}

/// A permanent upgrade gated by DNA thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EvolutionDef {
    /// Identifier.
    pub id: EvolutionId,
    /// Display name.
    pub name: &'static str,
    /// Short description for the selection menu.
    pub description: &'static str,
    /// DNA thresholds, all of which must be met. Consumed on apply.
    pub requirements: &'static [(DnaType, u32)],
    /// Stat changes.
    pub effects: EvolutionEffects,
    /// Renderer hints.
    pub visual: EvolutionVisual,
}

/// All evolutions in menu order.
pub static EVOLUTIONS: [EvolutionDef; 15] = [
    // Tier 1: one DNA type
    EvolutionDef {
        id: EvolutionId::Agile,
        name: "Agile Form",
        description: "+50% speed, +20% dodge",
        requirements: &[(DnaType::Speed, 50)],
        effects: EvolutionEffects {
            speed_multiplier: Some(1.5),
            dodge_chance: Some(0.2),
            ..EvolutionEffects::NONE
        },
        visual: EvolutionVisual::tinted(0.8, 1.2, 0x0000_ffff),
    },
    EvolutionDef {
        id: EvolutionId::Brutal,
        name: "Brutal Form",
        description: "+40% damage, -20% speed",
        requirements: &[(DnaType::Attack, 50)],
        effects: EvolutionEffects {
            damage_multiplier: Some(1.4),
            speed_multiplier: Some(0.8),
            ..EvolutionEffects::NONE
        },
        visual: EvolutionVisual::tinted(1.4, 1.2, 0x00ff_4444),
    },
    EvolutionDef {
        id: EvolutionId::Armored,
        name: "Armored Form",
        description: "+50% max health, -10% speed",
        requirements: &[(DnaType::Defense, 50)],
        effects: EvolutionEffects {
            max_health_multiplier: Some(1.5),
            speed_multiplier: Some(0.9),
            ..EvolutionEffects::NONE
        },
        visual: EvolutionVisual::tinted(1.2, 1.2, 0x0088_8888).shelled(),
    },
    EvolutionDef {
        id: EvolutionId::Luminescent,
        name: "Luminescent Form",
        description: "+30% energy, hunger drains slower",
        requirements: &[(DnaType::Energy, 50)],
        effects: EvolutionEffects {
            hunger_efficiency: Some(1.3),
            ..EvolutionEffects::NONE
        },
        visual: EvolutionVisual::tinted(1.0, 1.0, 0x00ff_ffaa).glowing(),
    },
    // Tier 2: two DNA types
    EvolutionDef {
        id: EvolutionId::Electric,
        name: "Electric Form",
        description: "Attacks hit every enemy in range",
        requirements: &[(DnaType::Attack, 30), (DnaType::Energy, 30)],
        effects: EvolutionEffects {
            area_damage: Some(AreaEffect { radius: 60.0 }),
            ..EvolutionEffects::NONE
        },
        visual: EvolutionVisual::tinted(1.0, 1.0, 0x00ff_ff00).glowing(),
    },
    EvolutionDef {
        id: EvolutionId::Venomous,
        name: "Venomous Form",
        description: "Attacks poison (damage over time)",
        requirements: &[(DnaType::Attack, 25), (DnaType::Defense, 25)],
        effects: EvolutionEffects {
            poison: Some(PoisonEffect {
                dps: 5.0,
                duration_ms: 3000.0,
            }),
            ..EvolutionEffects::NONE
        },
        visual: EvolutionVisual::tinted(1.1, 1.0, 0x0000_ff44),
    },
    EvolutionDef {
        id: EvolutionId::Predator,
        name: "Predator Form",
        description: "+60% attack range, +20% damage",
        requirements: &[(DnaType::Attack, 40), (DnaType::Speed, 20)],
        effects: EvolutionEffects {
            attack_range_multiplier: Some(1.6),
            damage_multiplier: Some(1.2),
            ..EvolutionEffects::NONE
        },
        visual: EvolutionVisual::tinted(1.3, 1.0, 0x00cc_3333),
    },
    EvolutionDef {
        id: EvolutionId::Regenerative,
        name: "Regenerative Form",
        description: "Regenerates 2 health per second",
        requirements: &[(DnaType::Defense, 30), (DnaType::Energy, 20)],
        effects: EvolutionEffects {
            health_regen: Some(2.0),
            ..EvolutionEffects::NONE
        },
        visual: EvolutionVisual::tinted(1.1, 1.1, 0x0044_ff88),
    },
    EvolutionDef {
        id: EvolutionId::SwiftHunter,
        name: "Swift Hunter",
        description: "-40% attack cooldown",
        requirements: &[(DnaType::Speed, 30), (DnaType::Attack, 20)],
        effects: EvolutionEffects {
            attack_cooldown_multiplier: Some(0.6),
            ..EvolutionEffects::NONE
        },
        visual: EvolutionVisual::tinted(0.9, 1.1, 0x00ff_6666),
    },
    EvolutionDef {
        id: EvolutionId::DashStriker,
        name: "Dash Striker",
        description: "Dashing damages enemies",
        requirements: &[(DnaType::Speed, 35), (DnaType::Attack, 25)],
        effects: EvolutionEffects {
            dash_damage: Some(DashEffect {
                multiplier: Some(0.8),
            }),
            ..EvolutionEffects::NONE
        },
        visual: EvolutionVisual::tinted(1.0, 0.9, 0x0000_ccff),
    },
    // Tier 3: three DNA types or high thresholds
    EvolutionDef {
        id: EvolutionId::Vampire,
        name: "Vampire Form",
        description: "Heals 30% of damage dealt",
        requirements: &[
            (DnaType::Attack, 40),
            (DnaType::Defense, 20),
            (DnaType::Energy, 20),
        ],
        effects: EvolutionEffects {
            life_steal: Some(0.3),
            ..EvolutionEffects::NONE
        },
        visual: EvolutionVisual::tinted(1.2, 1.0, 0x0088_0044),
    },
    EvolutionDef {
        id: EvolutionId::Berserker,
        name: "Berserker Form",
        description: "+100% damage below 30% health",
        requirements: &[(DnaType::Attack, 60), (DnaType::Speed, 30)],
        effects: EvolutionEffects {
            berserk: Some(BerserkEffect {
                threshold: 0.3,
                multiplier: 2.0,
            }),
            ..EvolutionEffects::NONE
        },
        visual: EvolutionVisual::tinted(1.3, 1.2, 0x00ff_0000),
    },
    EvolutionDef {
        id: EvolutionId::Phantom,
        name: "Phantom Form",
        description: "+40% dodge",
        requirements: &[(DnaType::Speed, 40), (DnaType::Energy, 40)],
        effects: EvolutionEffects {
            dodge_chance: Some(0.4),
            ..EvolutionEffects::NONE
        },
        visual: EvolutionVisual::tinted(0.9, 1.0, 0x00aa_ccff),
    },
    EvolutionDef {
        id: EvolutionId::Titan,
        name: "Titan Form",
        description: "+100% max health, -30% speed",
        requirements: &[(DnaType::Defense, 70), (DnaType::Attack, 30)],
        effects: EvolutionEffects {
            max_health_multiplier: Some(2.0),
            speed_multiplier: Some(0.7),
            ..EvolutionEffects::NONE
        },
        visual: EvolutionVisual::tinted(1.5, 1.5, 0x0066_6699),
    },
    EvolutionDef {
        id: EvolutionId::Storm,
        name: "Storm Form",
        description: "Passive area damage every 2s",
        requirements: &[(DnaType::Energy, 60), (DnaType::Attack, 30)],
        effects: EvolutionEffects {
            storm: Some(StormEffect {
                radius: 80.0,
                damage: 10.0,
                interval_ms: 2000.0,
            }),
            ..EvolutionEffects::NONE
        },
        visual: EvolutionVisual::tinted(1.1, 1.1, 0x0044_88ff).glowing(),
    },
];
