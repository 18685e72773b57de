//! Force-based steering of fire agents.
//!
//! Every tick an agent gathers a handful of directional forces:
//!
//! - **Wander**: a drifting target on a circle around the agent, so fronts never run
//!   perfectly straight.
//! - **Hill**: compares the elevation here with the elevation `look_ahead` steps along
//!   the velocity. Fire slows down going downhill and accelerates uphill.
//! - **Wind**: a constant push along the wind direction, banded by speed.
//!
//! Two detectors decide whether those forces accelerate or brake the agent:
//!
//! - **Border**: the predicted position leaves the safety rectangle.
//! - **Beach**: water lies on the path within `beach_scan_steps` steps.
//!
//! The blended change is accumulated and applied by
//! [`FireAgent::integrate`](super::FireAgent::integrate).

use crate::config::SteeringConfig;
use crate::core_types::vec2::{heading_vector, limit, with_magnitude};
use crate::core_types::{Region, Vec2, Wind};
use crate::grid::terrain::{elevation_or_water, TerrainQuery};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Water found on an agent's projected path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeachContact {
    /// Scan step at which water was found (1 = the agent's own position)
    pub distance: u32,
    /// Terrain gradient at the water sample.
    ///
    /// Kept for renderers; no steering force reads it.
    pub gradient: Vec2,
}

/// What an agent can see of the world during one tick.
#[derive(Debug, Clone, Copy)]
pub struct Surroundings<'a, T: ?Sized> {
    pub terrain: &'a T,
    pub wind: Wind,
    /// Active footprint; a step that would leave it stops the agent
    pub region: Region,
    /// Safety rectangle; a predicted exit flags the agent as at the border
    pub inner_bounds: Region,
}

/// How the forces of one tick were applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Blend {
    /// Path clear: forces plus forward acceleration.
    Accelerate,
    /// Border or beach ahead: forces and forward term reversed.
    Decelerate,
    /// Border or beach ahead and already slow: velocity zeroed, agent dead.
    Stop,
}

/// Steering memory carried by each agent between ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct Steering {
    wander_theta: f32,
    at_border: bool,
    beach: Option<BeachContact>,
    pending: Vec2,
}

impl Default for Steering {
    fn default() -> Self {
        Self {
            wander_theta: 0.0,
            at_border: false,
            beach: None,
            pending: Vec2::zeros(),
        }
    }
}

impl Steering {
    /// Current wander offset (radians).
    pub fn wander_theta(&self) -> f32 {
        self.wander_theta
    }

    pub fn at_border(&self) -> bool {
        self.at_border
    }

    pub fn beach(&self) -> Option<BeachContact> {
        self.beach
    }

    /// Velocity change accumulated since the last integration.
    pub fn pending(&self) -> Vec2 {
        self.pending
    }

    pub(crate) fn set_detections(&mut self, at_border: bool, beach: Option<BeachContact>) {
        self.at_border = at_border;
        self.beach = beach;
    }

    /// Bounded random walk of the wander offset.
    pub(crate) fn drift_wander<R: Rng>(&mut self, config: &SteeringConfig, rng: &mut R) -> f32 {
        let jitter = config.wander_jitter;
        let step = if jitter > 0.0 {
            rng.random_range(-jitter..=jitter)
        } else {
            0.0
        };
        let bound = config.wander_max_offset;
        self.wander_theta = (self.wander_theta + step).clamp(-bound, bound);
        self.wander_theta
    }

    pub(crate) fn accumulate(&mut self, change: Vec2) {
        self.pending += change;
    }

    pub(crate) fn take_pending(&mut self) -> Vec2 {
        std::mem::replace(&mut self.pending, Vec2::zeros())
    }
}

/// Steer towards a point on the wander circle, offset `theta` radians from the heading.
pub fn wander_force(angle: f32, theta: f32, config: &SteeringConfig) -> Vec2 {
    let front = heading_vector(angle) * config.wander_distance;
    let offset = heading_vector(angle + theta.to_degrees()) * config.wander_radius;
    let desired = with_magnitude(front + offset, config.top_speed);
    limit(desired, config.max_velocity_change)
}

/// Brake downhill, boost uphill, nothing on the level.
pub fn hill_force<T: TerrainQuery + ?Sized>(
    terrain: &T,
    position: Vec2,
    velocity: Vec2,
    angle: f32,
    config: &SteeringConfig,
) -> Vec2 {
    let ahead = position + velocity * config.look_ahead as f32;
    let here = elevation_or_water(terrain, position);
    let there = elevation_or_water(terrain, ahead);
    let front = heading_vector(angle);

    if here > there {
        // Reversal is capped so the front cannot flip within one tick
        limit(-front, config.max_velocity_change)
    } else if here < there {
        front * config.uphill_boost
    } else {
        Vec2::zeros()
    }
}

/// Push along the wind direction scaled by the speed band.
pub fn wind_force(wind: &Wind, config: &SteeringConfig) -> Vec2 {
    limit(
        wind.unit_vector() * wind.force_factor(),
        config.max_velocity_change,
    )
}

/// True when the position `look_ahead` steps ahead leaves `inner_bounds`.
pub fn crosses_border(
    position: Vec2,
    velocity: Vec2,
    inner_bounds: &Region,
    config: &SteeringConfig,
) -> bool {
    let ahead = position + velocity * config.look_ahead as f32;
    !inner_bounds.encloses(ahead)
}

/// Walk along the velocity, starting at the agent itself, looking for water.
pub fn scan_for_beach<T: TerrainQuery + ?Sized>(
    terrain: &T,
    position: Vec2,
    velocity: Vec2,
    config: &SteeringConfig,
) -> Option<BeachContact> {
    let mut probe = position;
    for distance in 1..config.beach_scan_steps {
        if elevation_or_water(terrain, probe) < 0.0 {
            return Some(BeachContact {
                distance,
                gradient: terrain.gradient(probe.x, probe.y),
            });
        }
        probe += velocity;
    }
    None
}
