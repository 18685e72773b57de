//! Sandbox Fire Simulation Core Library
//!
//! Fire ignition and spread over a terrain surface that is reshaped live,
//! as in an augmented-reality sandbox. A cellular layer tracks fuel, burned
//! cells and high-risk slopes over the active footprint; a population of
//! fire agents moves through continuous space on top of it, steered by
//! wander, slope and wind, branching as it consumes fuel and dying into
//! fading embers at borders and shorelines.
//!
//! ## Layout
//!
//! - [`grid`] - terrain queries and the per-cell fuel, burned and risk layers
//! - [`agent`] - fire agents, steering forces and embers
//! - [`simulation`] - the [`FireModel`] engine and its render snapshots
//! - [`config`] - tunable parameters, loadable with serde

// Core types and utilities
pub mod core_types;

pub mod agent;
pub mod config;
pub mod error;
pub mod grid;
pub mod simulation;

// Re-export core types
pub use core_types::{normalize_degrees, wrap_delta, GridPoint, Region, Vec2, Wind};

pub use agent::{BeachContact, Ember, EmberSet, FireAgent, FlameColor, Phase};
pub use config::{EarlySpread, FireConfig, FuelConfig, SteeringConfig};
pub use error::ConfigError;
pub use grid::{BurnedGrid, FuelGrid, HeightField, RiskZones, TerrainQuery};
pub use simulation::{AgentView, BurnStats, FireModel, FrameSnapshot, DEFAULT_SEED};
