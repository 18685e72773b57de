//! Uniform wind acting on every fire agent.

use super::heading::normalize_degrees;
use super::vec2::{heading_vector, Vec2};
use serde::{Deserialize, Serialize};

/// Wind speed and the compass direction it blows towards.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Wind {
    speed: f32,
    direction: f32,
}

impl Wind {
    /// Negative or non-finite speeds become calm; the direction is wrapped into `[0, 360)`.
    pub fn new(speed: f32, direction: f32) -> Self {
        let mut wind = Self::default();
        wind.set_speed(speed);
        wind.set_direction(direction);
        wind
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Direction in degrees, measured like agent headings.
    pub fn direction(&self) -> f32 {
        self.direction
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = if speed.is_finite() { speed.max(0.0) } else { 0.0 };
    }

    pub fn set_direction(&mut self, direction: f32) {
        self.direction = if direction.is_finite() {
            normalize_degrees(direction)
        } else {
            0.0
        };
    }

    /// Push strength for the current speed band.
    ///
    /// | speed   | factor |
    /// |---------|--------|
    /// | > 8     | 2.0    |
    /// | > 6     | 1.75   |
    /// | > 4     | 1.5    |
    /// | > 1     | 1.25   |
    /// | else    | 0      |
    pub fn force_factor(&self) -> f32 {
        match self.speed {
            s if s > 8.0 => 2.0,
            s if s > 6.0 => 1.75,
            s if s > 4.0 => 1.5,
            s if s > 1.0 => 1.25,
            _ => 0.0,
        }
    }

    /// Unit vector along the wind direction.
    pub fn unit_vector(&self) -> Vec2 {
        heading_vector(self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn speed_bands() {
        assert_eq!(Wind::new(0.0, 0.0).force_factor(), 0.0);
        assert_eq!(Wind::new(1.0, 0.0).force_factor(), 0.0);
        assert_eq!(Wind::new(3.0, 0.0).force_factor(), 1.25);
        assert_eq!(Wind::new(5.0, 0.0).force_factor(), 1.5);
        assert_eq!(Wind::new(7.0, 0.0).force_factor(), 1.75);
        assert_eq!(Wind::new(30.0, 0.0).force_factor(), 2.0);
    }

    #[test]
    fn inputs_are_sanitised() {
        let wind = Wind::new(-4.0, -90.0);
        assert_eq!(wind.speed(), 0.0);
        assert_relative_eq!(wind.direction(), 270.0, epsilon = 1e-4);

        let wind = Wind::new(f32::NAN, 720.0);
        assert_eq!(wind.speed(), 0.0);
        assert_eq!(wind.direction(), 0.0);
    }

    #[test]
    fn unit_vector_follows_direction() {
        let v = Wind::new(5.0, 90.0).unit_vector();
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(v.y, 1.0, epsilon = 1e-6);
    }
}
