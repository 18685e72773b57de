//! Configuration errors.
//!
//! Runtime operations never fail: rejected ignitions are documented no-ops.
//! The only fallible input is the engine configuration, validated once at
//! construction.

use std::fmt;

/// Reasons a [`FireConfig`](crate::FireConfig) is rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// A parameter that must be finite and strictly positive was not.
    NotPositive { param: &'static str, value: f32 },
    /// A parameter that must be finite and non-negative was not.
    Negative { param: &'static str, value: f32 },
    /// A parameter that must be a finite number was NaN or infinite.
    NotFinite { param: &'static str, value: f32 },
    /// A probability outside `[0, 1]`.
    ProbabilityOutOfRange { param: &'static str, value: f32 },
    /// A step count or attempt budget of zero.
    ZeroCount { param: &'static str },
    /// A border margin too wide to trim from both sides of a region.
    MarginTooLarge { margin: u32, max: u32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NotPositive { param, value } => {
                write!(f, "Config parameter {param} must be positive, got {value}")
            }
            ConfigError::Negative { param, value } => {
                write!(f, "Config parameter {param} must be non-negative, got {value}")
            }
            ConfigError::NotFinite { param, value } => {
                write!(f, "Config parameter {param} must be finite, got {value}")
            }
            ConfigError::ProbabilityOutOfRange { param, value } => {
                write!(f, "Config parameter {param} must lie in [0, 1], got {value}")
            }
            ConfigError::ZeroCount { param } => {
                write!(f, "Config parameter {param} must be at least 1")
            }
            ConfigError::MarginTooLarge { margin, max } => {
                write!(f, "Config parameter border_margin must be at most {max}, got {margin}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
