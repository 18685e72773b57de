//! Vector type alias for 2D terrain positions and steering forces.

use nalgebra::Vector2;

/// 2D vector type for positions, velocities, and steering forces.
///
/// This is a simple alias for `nalgebra::Vector2<f32>`, used throughout
/// the engine for terrain coordinates, agent velocities and force sums.
pub type Vec2 = Vector2<f32>;

/// Unit vector pointing along `degrees` (0° = +x, 90° = +y).
#[inline]
pub fn heading_vector(degrees: f32) -> Vec2 {
    let rad = degrees.to_radians();
    Vec2::new(rad.cos(), rad.sin())
}

/// Scale `v` down so its magnitude does not exceed `max`.
///
/// Vectors already shorter than `max` are returned unchanged.
#[inline]
pub fn limit(v: Vec2, max: f32) -> Vec2 {
    let len_sq = v.norm_squared();
    if len_sq > max * max && len_sq > 0.0 {
        v * (max / len_sq.sqrt())
    } else {
        v
    }
}

/// Rescale `v` to the given magnitude. The zero vector stays zero.
#[inline]
pub fn with_magnitude(v: Vec2, magnitude: f32) -> Vec2 {
    let len = v.norm();
    if len > 0.0 {
        v * (magnitude / len)
    } else {
        Vec2::zeros()
    }
}

/// Unit vector along `v`, or zero for the zero vector.
#[inline]
pub fn normalized(v: Vec2) -> Vec2 {
    with_magnitude(v, 1.0)
}
