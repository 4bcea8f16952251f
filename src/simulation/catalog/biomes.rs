//! Depth bands of the world.

use serde::{Deserialize, Serialize};

/// Identifier of a depth band, ordered from the surface downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BiomeId {
    /// Warm, bright water near the surface.
    Surface,
    /// Coral reef.
    Reef,
    /// Colder transition layer.
    Thermocline,
    /// Dark deep water.
    Bathyal,
    /// The deepest band.
    Abyss,
}

impl BiomeId {
    /// Lowercase identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            BiomeId::Surface => "surface",
            BiomeId::Reef => "reef",
            BiomeId::Thermocline => "thermocline",
            BiomeId::Bathyal => "bathyal",
            BiomeId::Abyss => "abyss",
        }
    }

    /// Parses an identifier, falling back to the deepest band when unknown.
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "surface" => BiomeId::Surface,
            "reef" => BiomeId::Reef,
            "thermocline" => BiomeId::Thermocline,
            "bathyal" => BiomeId::Bathyal,
            _ => BiomeId::Abyss,
        }
    }

    /// Returns the catalog band for this id.
    pub fn band(self) -> &'static BiomeBand {
        &BIOMES[self as usize]
    }
}

/// One depth band of the world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BiomeBand {
    /// Band identifier.
    pub id: BiomeId,
    /// Display name.
    pub name: &'static str,
    /// Inclusive upper edge (world Y).
    pub y_start: f32,
    /// Exclusive lower edge (world Y).
    pub y_end: f32,
    /// Scales the weighted spawn roll for this band.
    pub spawn_multiplier: f32,
    /// Ambient light level for the renderer, 0 (dark) to 1 (bright).
    pub brightness: f32,
}

impl BiomeBand {
    /// Checks whether a depth falls inside `[y_start, y_end)`.
    pub fn contains(&self, y: f32) -> bool {
        y >= self.y_start && y < self.y_end
    }
}

/// Bands in depth order. They partition `[0, 2800)` contiguously.
pub static BIOMES: [BiomeBand; 5] = [
    BiomeBand {
        id: BiomeId::Surface,
        name: "Surface",
        y_start: 0.0,
        y_end: 450.0,
        spawn_multiplier: 1.2,
        brightness: 1.0,
    },
    BiomeBand {
        id: BiomeId::Reef,
        name: "Coral Reef",
        y_start: 450.0,
        y_end: 950.0,
        spawn_multiplier: 1.0,
        brightness: 0.9,
    },
    BiomeBand {
        id: BiomeId::Thermocline,
        name: "Thermocline",
        y_start: 950.0,
        y_end: 1550.0,
        spawn_multiplier: 0.9,
        brightness: 0.7,
    },
    BiomeBand {
        id: BiomeId::Bathyal,
        name: "Bathyal Zone",
        y_start: 1550.0,
        y_end: 2200.0,
        spawn_multiplier: 0.7,
        brightness: 0.4,
    },
    BiomeBand {
        id: BiomeId::Abyss,
        name: "Abyss",
        y_start: 2200.0,
        y_end: 2800.0,
        spawn_multiplier: 0.5,
        brightness: 0.2,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_are_contiguous() {
        assert_eq!(BIOMES[0].y_start, 0.0);
        for pair in BIOMES.windows(2) {
            assert_eq!(pair[0].y_end, pair[1].y_start);
        }
    }

    #[test]
    fn ids_index_their_own_band() {
        for band in &BIOMES {
            assert_eq!(band.id.band().id, band.id);
        }
    }

    #[test]
    fn unknown_tag_falls_back_to_abyss() {
        assert_eq!(BiomeId::from_tag("Reef"), BiomeId::Reef);
        assert_eq!(BiomeId::from_tag("trench"), BiomeId::Abyss);
    }
}
