//! Trait for entities that have a position and can be updated.
//!
//! This trait provides a common interface for the player and the enemies:
//! both have a position and a velocity that is integrated every tick.

use ndarray::Array1;

use super::geometric_utils;

/// Trait for entities with a position that move over time.
///
/// Any type that implements this trait:
/// - Has a position in 2D world space
/// - Has a velocity in units per second
/// - Can be advanced with a time delta
pub trait Locatable {
    /// Returns a reference to the entity's position.
    fn pos(&self) -> &Array1<f32>;

    /// Returns a mutable reference to the entity's position.
    fn pos_mut(&mut self) -> &mut Array1<f32>;

    /// Returns the entity's velocity.
    fn velocity(&self) -> &Array1<f32>;

    /// Advances the entity by its velocity.
    ///
    /// # Arguments
    ///
    /// * `dt` - Time delta since the last update in seconds.
    fn update(&mut self, dt: f32) {
        let displacement = self.velocity() * dt;
        *self.pos_mut() += &displacement;
    }

    /// Distance between the centers of two entities.
    fn distance_to(&self, other: &dyn Locatable) -> f32 {
        geometric_utils::distance(self.pos(), other.pos())
    }
}
