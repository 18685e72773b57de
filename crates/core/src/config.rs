//! Tunable parameters of the fire engine.
//!
//! Every constant the propagation and steering code relies on lives here so
//! that a whole run can be described (and replayed) from one serde document.
//! Defaults reproduce the behaviour of the sandbox installation.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Widest border margin that can be trimmed from both sides of a region.
pub const MAX_BORDER_MARGIN: u32 = i32::MAX as u32 / 2;

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireConfig {
    /// Fuel seeding parameters
    pub fuel: FuelConfig,

    /// Per-agent steering parameters
    pub steering: SteeringConfig,

    /// Cells trimmed from every side of the region to form the safety rectangle.
    /// Agents predicted to leave it decelerate and die; risk-zone ignitions must
    /// fall inside it.
    pub border_margin: u32,

    /// Random draws allowed when picking a risk cell inside the safety rectangle
    pub risk_ignition_attempts: u32,

    /// Intensity of a freshly created agent; embers fade one unit per tick
    pub ember_intensity: u8,

    /// Optional faster branching during the first ticks of a run
    pub early_spread: Option<EarlySpread>,
}

impl Default for FireConfig {
    fn default() -> Self {
        Self {
            fuel: FuelConfig::default(),
            steering: SteeringConfig::default(),
            border_margin: 25,
            risk_ignition_attempts: 100,
            ember_intensity: 3,
            early_spread: None,
        }
    }
}

impl FireConfig {
    /// Check every parameter for values the engine cannot run with.
    ///
    /// # Errors
    ///
    /// Returns the first offending parameter.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.fuel.validate()?;
        self.steering.validate()?;
        if self.border_margin > MAX_BORDER_MARGIN {
            return Err(ConfigError::MarginTooLarge {
                margin: self.border_margin,
                max: MAX_BORDER_MARGIN,
            });
        }
        if self.risk_ignition_attempts == 0 {
            return Err(ConfigError::ZeroCount {
                param: "risk_ignition_attempts",
            });
        }
        if self.ember_intensity == 0 {
            return Err(ConfigError::ZeroCount {
                param: "ember_intensity",
            });
        }
        if let Some(early) = &self.early_spread {
            if early.percent > 100 {
                return Err(ConfigError::ProbabilityOutOfRange {
                    param: "early_spread.percent",
                    value: f32::from(early.percent) / 100.0,
                });
            }
        }
        Ok(())
    }
}

/// Vegetation density seeding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuelConfig {
    /// Cells above this elevation carry sparse high-altitude fuel
    pub high_altitude_threshold: f32,

    /// Chance per interior cell of a tree canopy (cell and its halo burn hotter)
    pub tree_probability: f32,
}

impl Default for FuelConfig {
    fn default() -> Self {
        Self {
            high_altitude_threshold: 50.0,
            tree_probability: 0.01,
        }
    }
}

impl FuelConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !self.high_altitude_threshold.is_finite() {
            return Err(ConfigError::NotFinite {
                param: "fuel.high_altitude_threshold",
                value: self.high_altitude_threshold,
            });
        }
        if !(0.0..=1.0).contains(&self.tree_probability) {
            return Err(ConfigError::ProbabilityOutOfRange {
                param: "fuel.tree_probability",
                value: self.tree_probability,
            });
        }
        Ok(())
    }
}

/// Force magnitudes and blend weights of the steering subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SteeringConfig {
    /// Radius of the wander circle
    pub wander_radius: f32,
    /// Distance of the wander circle ahead of the agent
    pub wander_distance: f32,
    /// Largest per-tick change of the wander offset (radians)
    pub wander_jitter: f32,
    /// Bound of the accumulated wander offset (radians)
    pub wander_max_offset: f32,

    /// Cap applied to each individual force
    pub max_velocity_change: f32,
    /// Largest heading change per tick at top speed (degrees)
    pub max_rotation: f32,
    /// Speed cap after integration
    pub top_speed: f32,
    /// Length of the constant forward acceleration term
    pub velocity_increase_step: f32,
    /// At or below this speed a decelerating agent stops and dies
    pub min_speed: f32,

    /// Steps of velocity used to predict hill and border positions
    pub look_ahead: u32,
    /// Samples taken along the velocity when searching for water
    pub beach_scan_steps: u32,

    pub wander_weight: f32,
    pub hill_weight: f32,
    pub wind_weight: f32,
    /// Multiplier on the forward vector when the terrain rises ahead
    pub uphill_boost: f32,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            wander_radius: 50.0,
            wander_distance: 0.0,
            wander_jitter: 0.25,
            wander_max_offset: 1.0,
            max_velocity_change: 1.0,
            max_rotation: 360.0,
            top_speed: 1.0,
            velocity_increase_step: 2.0,
            min_speed: 2.0,
            look_ahead: 10,
            beach_scan_steps: 10,
            wander_weight: 1.0,
            hill_weight: 3.0,
            wind_weight: 0.6,
            uphill_boost: 3.0,
        }
    }
}

impl SteeringConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        for (param, value) in [
            ("steering.top_speed", self.top_speed),
            ("steering.max_velocity_change", self.max_velocity_change),
            ("steering.wander_radius", self.wander_radius),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { param, value });
            }
        }
        for (param, value) in [
            ("steering.wander_distance", self.wander_distance),
            ("steering.wander_jitter", self.wander_jitter),
            ("steering.wander_max_offset", self.wander_max_offset),
            ("steering.max_rotation", self.max_rotation),
            ("steering.velocity_increase_step", self.velocity_increase_step),
            ("steering.min_speed", self.min_speed),
            ("steering.wander_weight", self.wander_weight),
            ("steering.hill_weight", self.hill_weight),
            ("steering.wind_weight", self.wind_weight),
            ("steering.uphill_boost", self.uphill_boost),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Negative { param, value });
            }
        }
        if self.look_ahead == 0 {
            return Err(ConfigError::ZeroCount {
                param: "steering.look_ahead",
            });
        }
        if self.beach_scan_steps == 0 {
            return Err(ConfigError::ZeroCount {
                param: "steering.beach_scan_steps",
            });
        }
        Ok(())
    }
}

/// Branching override for the opening ticks of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarlySpread {
    /// Number of ticks the override stays active
    pub ticks: u64,
    /// Minimum spread factor (percent) while active
    pub percent: u8,
}

impl Default for EarlySpread {
    fn default() -> Self {
        Self {
            ticks: 10,
            percent: 70,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert_eq!(FireConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_probability() {
        let mut config = FireConfig::default();
        config.fuel.tree_probability = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ProbabilityOutOfRange { .. })
        ));
    }

    #[test]
    fn rejects_non_positive_top_speed() {
        let mut config = FireConfig::default();
        config.steering.top_speed = 0.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::NotPositive {
                param: "steering.top_speed",
                value: 0.0
            })
        );
    }

    #[test]
    fn rejects_zero_attempts() {
        let config = FireConfig {
            risk_ignition_attempts: 0,
            ..FireConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_margin_wider_than_any_region() {
        let config = FireConfig {
            border_margin: u32::MAX,
            ..FireConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::MarginTooLarge {
                margin: u32::MAX,
                max: MAX_BORDER_MARGIN,
            })
        );

        let widest = FireConfig {
            border_margin: MAX_BORDER_MARGIN,
            ..FireConfig::default()
        };
        assert_eq!(widest.validate(), Ok(()));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config: FireConfig =
            serde_json::from_str(r#"{ "border_margin": 10, "steering": { "top_speed": 2.0 } }"#)
                .expect("valid config json");
        assert_eq!(config.border_margin, 10);
        assert_eq!(config.steering.top_speed, 2.0);
        assert_eq!(config.steering.hill_weight, 3.0);
        assert_eq!(config.ember_intensity, 3);
        assert!(config.early_spread.is_none());
    }
}
