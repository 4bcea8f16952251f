//! Spatial indexing for radius queries over enemies.
//!
//! A KD-tree is rebuilt whenever enemy positions are needed for a batch of
//! queries (bites, dash sweeps, storm pulses).

use kdtree::distance::squared_euclidean;
use kdtree::{ErrorKind as KdTreeError, KdTree};
use ndarray::Array1;

use super::enemy::Enemy;

/// Type alias for the 2D KD-tree used for neighbor queries.
pub type Tree2D = KdTree<f32, usize, Vec<f32>>;

/// Result of a spatial radius query: (`distance_squared`, index) pairs.
pub type SpatialQueryResult = Vec<(f32, usize)>;

/// KD-tree over enemy positions, indexed by position in the enemy slice.
pub struct SpatialIndex {
    enemies: Tree2D,
}

impl SpatialIndex {
    /// Builds an index from the current enemy positions.
    ///
    /// # Arguments
    ///
    /// * `enemies` - Enemies to index
    ///
    /// # Returns
    ///
    /// A spatial index or an error if a position is not finite.
    pub fn build(enemies: &[Enemy]) -> Result<Self, KdTreeError> {
        Ok(Self {
            enemies: build_tree(enemies, |enemy| enemy.pos.to_vec())?,
        })
    }

    /// Query enemies within a radius.
    ///
    /// # Arguments
    ///
    /// * `pos` - Center position for the query
    /// * `radius` - Search radius (will be squared internally)
    ///
    /// # Returns
    ///
    /// Vector of (`distance_squared`, index) pairs for enemies within radius.
    pub fn query_enemies(&self, pos: &Array1<f32>, radius: f32) -> SpatialQueryResult {
        self.enemies
            .within(&pos.to_vec(), radius.powi(2), &squared_euclidean)
            .unwrap_or_default()
            .into_iter()
            .map(|(dist, &idx)| (dist, idx))
            .collect()
    }

    /// Indices of enemies within a radius, in slice order.
    pub fn indices_within(&self, pos: &Array1<f32>, radius: f32) -> Vec<usize> {
        let mut indices: Vec<usize> = self
            .query_enemies(pos, radius)
            .into_iter()
            .map(|(_, idx)| idx)
            .collect();
        indices.sort_unstable();
        indices
    }
}

fn build_tree<T>(items: &[T], get_pos: impl Fn(&T) -> Vec<f32>) -> Result<Tree2D, KdTreeError> {
    let mut tree = KdTree::with_capacity(2, items.len().max(1));
    for (i, item) in items.iter().enumerate() {
        tree.add(get_pos(item), i)?;
    }
    Ok(tree)
}
