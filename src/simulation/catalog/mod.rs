//! Static read-only configuration tables.
//!
//! Enemy kinds, evolution definitions and biome bands. Each table is keyed by
//! a closed enum, so lookups cannot miss.

pub mod biomes;
pub mod enemies;
pub mod evolutions;

pub use biomes::{BIOMES, BiomeBand, BiomeId};
pub use enemies::{Behavior, ENEMY_TYPES, EnemyKind, EnemyType};
pub use evolutions::{EVOLUTIONS, EvolutionDef, EvolutionEffects, EvolutionId, EvolutionVisual};
