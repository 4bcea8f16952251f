//! Enemy kinds and their static stats.

use serde::{Deserialize, Serialize};

use super::biomes::BiomeId;
use crate::simulation::dna::{DnaDrop, DnaType};

/// Movement strategy assigned to an enemy kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Behavior {
    /// Swim away from the player when close.
    Flee,
    /// Pursue the player at medium range.
    Chase,
    /// Drift along a slowly changing heading.
    Wander,
    /// Lie still until the player comes close, then strike.
    Ambush,
    /// Passive sine drift, ignores the player.
    Float,
    /// Long-range pursuit with a close-range burst.
    Hunt,
    /// Orbit the spawn point.
    Patrol,
}

/// Closed set of enemy kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    /// Small skittish fish, the designated fallback kind.
    Common,
    /// Slow and tough.
    Puffer,
    /// Aggressive mid-size predator.
    Hunter,
    /// Fast glowing fish.
    Luminous,
    /// Rare heavy mutant, drops random DNA.
    Mutant,
    /// Venomous reef dweller.
    Toxic,
    /// Deep-sea ambusher with a lure.
    Anglerfish,
    /// Drifting stinger.
    Jellyfish,
    /// Apex hunter.
    Shark,
    /// Patrols its territory.
    ElectricEel,
    /// Hides among rocks near the surface.
    Camouflage,
}

impl EnemyKind {
    /// All kinds in catalog order. Weighted spawning walks this order.
    pub const ALL: [EnemyKind; 11] = [
        EnemyKind::Common,
        EnemyKind::Puffer,
        EnemyKind::Hunter,
        EnemyKind::Luminous,
        EnemyKind::Mutant,
        EnemyKind::Toxic,
        EnemyKind::Anglerfish,
        EnemyKind::Jellyfish,
        EnemyKind::Shark,
        EnemyKind::ElectricEel,
        EnemyKind::Camouflage,
    ];

    /// Returns the catalog entry for this kind.
    pub fn spec(self) -> &'static EnemyType {
        &ENEMY_TYPES[self as usize]
    }

    /// Parses a kind tag such as `"ELECTRIC_EEL"` or `"shark"`.
    ///
    /// Unknown tags resolve to [`EnemyKind::Common`].
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "puffer" => EnemyKind::Puffer,
            "hunter" => EnemyKind::Hunter,
            "luminous" => EnemyKind::Luminous,
            "mutant" => EnemyKind::Mutant,
            "toxic" => EnemyKind::Toxic,
            "anglerfish" => EnemyKind::Anglerfish,
            "jellyfish" => EnemyKind::Jellyfish,
            "shark" => EnemyKind::Shark,
            "electric_eel" | "electriceel" => EnemyKind::ElectricEel,
            "camouflage" => EnemyKind::Camouflage,
            _ => EnemyKind::Common,
        }
    }
}

/// Static description of an enemy kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EnemyType {
    /// Kind this entry describes.
    pub kind: EnemyKind,
    /// Display name.
    pub name: &'static str,
    /// Body radius.
    pub size: f32,
    /// Base swim speed (units per second).
    pub speed: f32,
    /// Starting and maximum health.
    pub health: f32,
    /// Contact damage dealt to the player; 0 means harmless.
    pub damage: f32,
    /// DNA type dropped on death.
    pub dna: DnaDrop,
    /// DNA amount dropped on death.
    pub dna_amount: u32,
    /// Hunger restored to the player when eaten.
    pub hunger_restore: f32,
    /// Movement strategy.
    pub behavior: Behavior,
    /// Relative spawn weight inside an allowed biome.
    pub spawn_weight: f32,
    /// Biomes this kind can spawn in.
    pub biomes: &'static [BiomeId],
    /// Body color for the renderer.
    pub color: u32,
}

impl EnemyType {
    /// Checks whether this kind may spawn in the given biome.
    pub fn allowed_in(&self, biome: BiomeId) -> bool {
        self.biomes.contains(&biome)
    }
}

/// Catalog indexed by `EnemyKind as usize`.
pub static ENEMY_TYPES: [EnemyType; 11] = [
    EnemyType {
        kind: EnemyKind::Common,
        name: "Common Fish",
        size: 15.0,
        speed: 80.0,
        health: 1.0,
        damage: 0.0,
        dna: DnaDrop::Fixed(DnaType::Speed),
        dna_amount: 5,
        hunger_restore: 15.0,
        behavior: Behavior::Flee,
        spawn_weight: 40.0,
        biomes: &[BiomeId::Surface, BiomeId::Reef],
        color: 0x004a_9fff,
    },
    EnemyType {
        kind: EnemyKind::Puffer,
        name: "Pufferfish",
        size: 25.0,
        speed: 40.0,
        health: 3.0,
        damage: 0.0,
        dna: DnaDrop::Fixed(DnaType::Defense),
        dna_amount: 8,
        hunger_restore: 25.0,
        behavior: Behavior::Wander,
        spawn_weight: 25.0,
        biomes: &[BiomeId::Surface, BiomeId::Reef, BiomeId::Thermocline],
        color: 0x00ff_8c00,
    },
    EnemyType {
        kind: EnemyKind::Hunter,
        name: "Hunter Fish",
        size: 20.0,
        speed: 70.0,
        health: 2.0,
        damage: 10.0,
        dna: DnaDrop::Fixed(DnaType::Attack),
        dna_amount: 10,
        hunger_restore: 20.0,
        behavior: Behavior::Chase,
        spawn_weight: 20.0,
        biomes: &[BiomeId::Reef, BiomeId::Thermocline, BiomeId::Bathyal],
        color: 0x00ff_3333,
    },
    EnemyType {
        kind: EnemyKind::Luminous,
        name: "Luminous Fish",
        size: 12.0,
        speed: 120.0,
        health: 1.0,
        damage: 0.0,
        dna: DnaDrop::Fixed(DnaType::Energy),
        dna_amount: 15,
        hunger_restore: 10.0,
        behavior: Behavior::Flee,
        spawn_weight: 10.0,
        biomes: &[BiomeId::Thermocline, BiomeId::Bathyal, BiomeId::Abyss],
        color: 0x00ff_ff00,
    },
    EnemyType {
        kind: EnemyKind::Mutant,
        name: "Mutant Fish",
        size: 30.0,
        speed: 60.0,
        health: 5.0,
        damage: 15.0,
        dna: DnaDrop::Random,
        dna_amount: 20,
        hunger_restore: 35.0,
        behavior: Behavior::Chase,
        spawn_weight: 5.0,
        biomes: &[BiomeId::Bathyal, BiomeId::Abyss],
        color: 0x0099_32cc,
    },
    EnemyType {
        kind: EnemyKind::Toxic,
        name: "Toxic Fish",
        size: 18.0,
        speed: 55.0,
        health: 2.0,
        damage: 8.0,
        dna: DnaDrop::Fixed(DnaType::Defense),
        dna_amount: 12,
        hunger_restore: 12.0,
        behavior: Behavior::Wander,
        spawn_weight: 15.0,
        biomes: &[BiomeId::Reef, BiomeId::Thermocline],
        color: 0x0033_ff33,
    },
    EnemyType {
        kind: EnemyKind::Anglerfish,
        name: "Anglerfish",
        size: 28.0,
        speed: 90.0,
        health: 4.0,
        damage: 18.0,
        dna: DnaDrop::Fixed(DnaType::Attack),
        dna_amount: 18,
        hunger_restore: 30.0,
        behavior: Behavior::Ambush,
        spawn_weight: 12.0,
        biomes: &[BiomeId::Bathyal, BiomeId::Abyss],
        color: 0x002a_1a3a,
    },
    EnemyType {
        kind: EnemyKind::Jellyfish,
        name: "Jellyfish",
        size: 22.0,
        speed: 30.0,
        health: 2.0,
        damage: 6.0,
        dna: DnaDrop::Fixed(DnaType::Energy),
        dna_amount: 12,
        hunger_restore: 8.0,
        behavior: Behavior::Float,
        spawn_weight: 18.0,
        biomes: &[BiomeId::Surface, BiomeId::Thermocline, BiomeId::Bathyal],
        color: 0x00ff_88ff,
    },
    EnemyType {
        kind: EnemyKind::Shark,
        name: "Shark",
        size: 40.0,
        speed: 110.0,
        health: 8.0,
        damage: 25.0,
        dna: DnaDrop::Fixed(DnaType::Attack),
        dna_amount: 25,
        hunger_restore: 45.0,
        behavior: Behavior::Hunt,
        spawn_weight: 6.0,
        biomes: &[BiomeId::Thermocline, BiomeId::Bathyal, BiomeId::Abyss],
        color: 0x0055_5577,
    },
    EnemyType {
        kind: EnemyKind::ElectricEel,
        name: "Electric Eel",
        size: 24.0,
        speed: 85.0,
        health: 4.0,
        damage: 12.0,
        dna: DnaDrop::Fixed(DnaType::Energy),
        dna_amount: 18,
        hunger_restore: 25.0,
        behavior: Behavior::Patrol,
        spawn_weight: 10.0,
        biomes: &[BiomeId::Bathyal, BiomeId::Abyss],
        color: 0x0000_ccff,
    },
    EnemyType {
        kind: EnemyKind::Camouflage,
        name: "Camouflage Fish",
        size: 20.0,
        speed: 75.0,
        health: 3.0,
        damage: 10.0,
        dna: DnaDrop::Fixed(DnaType::Defense),
        dna_amount: 15,
        hunger_restore: 20.0,
        behavior: Behavior::Ambush,
        spawn_weight: 12.0,
        biomes: &[BiomeId::Surface, BiomeId::Reef],
        color: 0x008a_7a5a,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::catalog::biomes::BIOMES;

    #[test]
    fn catalog_is_indexed_by_kind() {
        for kind in EnemyKind::ALL {
            assert_eq!(kind.spec().kind, kind);
        }
    }

    #[test]
    fn every_biome_has_a_population() {
        for band in &BIOMES {
            assert!(
                ENEMY_TYPES.iter().any(|t| t.allowed_in(band.id)),
                "no enemies for {}",
                band.name
            );
        }
    }

    #[test]
    fn unknown_tag_falls_back_to_common() {
        assert_eq!(EnemyKind::from_tag("ELECTRIC_EEL"), EnemyKind::ElectricEel);
        assert_eq!(EnemyKind::from_tag("kraken"), EnemyKind::Common);
    }
}
