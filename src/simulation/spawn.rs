//! Biome lookup and biome-aware enemy spawning.

use ndarray::Array1;
use rand::Rng;
use tracing::debug;

use super::catalog::{BIOMES, BiomeBand, ENEMY_TYPES, EnemyKind, EnemyType};
use super::enemy::Enemy;
use super::geometric_utils::vec2;
use super::params::Params;

/// Returns the biome band containing depth `y`.
///
/// Depths outside every band (negative or past the last edge) resolve to the
/// deepest band.
pub fn biome_at(y: f32) -> &'static BiomeBand {
    BIOMES
        .iter()
        .find(|band| band.contains(y))
        .unwrap_or(&BIOMES[BIOMES.len() - 1])
}

/// Picks an enemy kind for a biome by spawn weight.
///
/// The roll is `uniform(0, total weight) * spawn_multiplier`; weights are
/// subtracted in catalog order until the roll is used up. A roll that outlasts
/// every candidate yields [`EnemyKind::Common`]. A biome without candidates
/// falls back to a uniform pick from the whole catalog.
///
/// # Arguments
///
/// * `biome` - Band to spawn in
/// * `rng` - Random number generator
///
/// # Returns
///
/// The chosen kind.
pub fn select_weighted(biome: &BiomeBand, rng: &mut impl Rng) -> EnemyKind {
    let candidates: Vec<&EnemyType> = ENEMY_TYPES
        .iter()
        .filter(|spec| spec.allowed_in(biome.id))
        .collect();
    if candidates.is_empty() {
        return ENEMY_TYPES[rng.random_range(0..ENEMY_TYPES.len())].kind;
    }

    let total: f32 = candidates.iter().map(|spec| spec.spawn_weight).sum();
    if total <= 0.0 {
        return EnemyKind::Common;
    }

    let mut roll = rng.random_range(0.0..total) * biome.spawn_multiplier;
    for spec in candidates {
        roll -= spec.spawn_weight;
        if roll <= 0.0 {
            return spec.kind;
        }
    }
    EnemyKind::Common
}

/// Creates enemies at the side walls of a random biome band.
#[derive(Debug, Clone, Default)]
pub struct SpawnController {
    next_id: u64,
}

impl SpawnController {
    /// Creates a controller whose first enemy gets id 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of enemies created so far.
    pub fn spawned(&self) -> u64 {
        self.next_id
    }

    /// Spawns one enemy unless the population cap is reached.
    ///
    /// The band is chosen uniformly, independent of where the player is. The
    /// enemy appears at the left or right wall with a depth inside the band,
    /// kept `spawn_band_margin` away from its edges.
    ///
    /// # Arguments
    ///
    /// * `params` - World size, population cap and margins
    /// * `enemy_count` - Number of live enemies
    /// * `rng` - Random number generator
    ///
    /// # Returns
    ///
    /// The new enemy, or `None` at the cap.
    pub fn spawn(&mut self, params: &Params, enemy_count: usize, rng: &mut impl Rng) -> Option<Enemy> {
        if enemy_count >= params.max_enemies {
            return None;
        }

        let band = &BIOMES[rng.random_range(0..BIOMES.len())];
        let kind = select_weighted(band, rng);

        let x = if rng.random_bool(0.5) {
            params.spawn_edge_margin
        } else {
            params.world_width - params.spawn_edge_margin
        };
        let low = (band.y_start + params.spawn_band_margin).min(params.world_height);
        let high = (band.y_end - params.spawn_band_margin).min(params.world_height);
        let y = if high > low {
            rng.random_range(low..=high)
        } else {
            low
        };

        debug!(?kind, biome = band.id.as_str(), x, y, "enemy spawned");
        Some(self.place(kind, vec2(x, y), rng))
    }

    /// Creates an enemy of a given kind at a given position, bypassing the cap.
    pub fn place(&mut self, kind: EnemyKind, pos: Array1<f32>, rng: &mut impl Rng) -> Enemy {
        let id = self.next_id;
        self.next_id += 1;
        Enemy::new(id, kind, pos, rng)
    }
}
