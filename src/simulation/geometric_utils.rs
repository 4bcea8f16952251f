//! Geometric utility functions for distance calculations and spatial operations.

use geo::algorithm::Distance;
use geo::{Euclidean, Point};
use ndarray::Array1;

/// Creates a 2D position vector.
pub fn vec2(x: f32, y: f32) -> Array1<f32> {
    Array1::from_vec(vec![x, y])
}

/// Calculates the center-to-center distance between two positions.
///
/// # Arguments
///
/// * `a` - First position
/// * `b` - Second position
///
/// # Returns
///
/// The Euclidean distance between `a` and `b`.
pub fn distance(a: &Array1<f32>, b: &Array1<f32>) -> f32 {
    Euclidean.distance(Point::new(a[0], a[1]), Point::new(b[0], b[1]))
}

/// Angle in radians of the vector pointing from `from` to `to`.
pub fn angle_between(from: &Array1<f32>, to: &Array1<f32>) -> f32 {
    (to[1] - from[1]).atan2(to[0] - from[0])
}

/// Velocity vector with the given heading and magnitude.
///
/// # Arguments
///
/// * `angle` - Heading in radians
/// * `speed` - Vector length
pub fn velocity_from_angle(angle: f32, speed: f32) -> Array1<f32> {
    vec2(angle.cos() * speed, angle.sin() * speed)
}

/// Velocity of magnitude `speed` pointing from `from` towards `to`.
pub fn velocity_towards(from: &Array1<f32>, to: &Array1<f32>, speed: f32) -> Array1<f32> {
    velocity_from_angle(angle_between(from, to), speed)
}

/// Linear interpolation between two vectors.
pub fn lerp(from: &Array1<f32>, to: &Array1<f32>, t: f32) -> Array1<f32> {
    from + &((to - from) * t)
}

/// Clamps a position vector to the world rectangle `[0, width] x [0, height]`.
///
/// # Arguments
///
/// * `v` - Mutable position vector to clamp
/// * `width` - Width of the world
/// * `height` - Height of the world
pub fn clamp_to_bounds_mut(v: &mut Array1<f32>, width: f32, height: f32) {
    v[0] = v[0].clamp(0.0, width);
    v[1] = v[1].clamp(0.0, height);
}

/// Checks whether a position lies more than `margin` outside the world rectangle.
pub fn is_out_of_bounds(v: &Array1<f32>, width: f32, height: f32, margin: f32) -> bool {
    v[0] < -margin || v[0] > width + margin || v[1] < -margin || v[1] > height + margin
}
