//! Compass-style heading arithmetic in degrees.
//!
//! Headings are measured from the +x axis towards +y, matching the
//! orientation of terrain coordinates (y grows towards the bottom edge).

/// Normalize an angle into `[0, 360)`.
#[inline]
pub fn normalize_degrees(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Wrap a signed angular difference into `(-180, 180]`.
#[inline]
pub fn wrap_delta(delta: f32) -> f32 {
    let wrapped = (delta + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped <= -180.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normalize_wraps_both_directions() {
        assert_relative_eq!(normalize_degrees(370.0), 10.0, epsilon = 1e-4);
        assert_relative_eq!(normalize_degrees(-90.0), 270.0, epsilon = 1e-4);
        assert_eq!(normalize_degrees(360.0), 0.0);
        assert!(normalize_degrees(-1e-9) < 360.0);
    }

    #[test]
    fn delta_takes_short_way_round() {
        assert_relative_eq!(wrap_delta(350.0), -10.0, epsilon = 1e-4);
        assert_relative_eq!(wrap_delta(-350.0), 10.0, epsilon = 1e-4);
        assert_relative_eq!(wrap_delta(180.0), 180.0, epsilon = 1e-4);
        assert_relative_eq!(wrap_delta(-180.0), 180.0, epsilon = 1e-4);
        assert_relative_eq!(wrap_delta(45.0), 45.0, epsilon = 1e-4);
    }
}
