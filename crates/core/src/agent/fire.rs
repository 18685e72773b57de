//! Live fire agents.

use super::ember::Ember;
use super::steering::{
    crosses_border, hill_force, scan_for_beach, wander_force, wind_force, BeachContact, Blend,
    Steering, Surroundings,
};
use crate::config::SteeringConfig;
use crate::core_types::vec2::{heading_vector, limit, with_magnitude};
use crate::core_types::{normalize_degrees, wrap_delta, GridPoint, Vec2};
use crate::grid::terrain::TerrainQuery;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Flame colour derived from intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlameColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl FlameColor {
    /// Orange at full intensity fading to black as intensity drops.
    pub fn from_intensity(intensity: i32) -> Self {
        let factor = if intensity <= 0 {
            0.0
        } else {
            intensity as f32 * 0.33
        };
        let channel = |base: f32| (base * factor).clamp(0.0, 255.0) as u8;
        Self {
            r: channel(255.0),
            g: channel(64.0),
            b: 0,
        }
    }
}

/// A moving ignition point.
///
/// Headings are kept in `[0, 360)` degrees. An agent that stops at a border
/// or beach stays in the active set, flagged dead, until the next tick
/// removes it.
#[derive(Debug, Clone, PartialEq)]
pub struct FireAgent {
    position: Vec2,
    angle: f32,
    velocity: Vec2,
    intensity: i32,
    alive: bool,
    steering: Steering,
}

impl FireAgent {
    pub fn new(position: Vec2, angle: f32, intensity: u8) -> Self {
        Self {
            position,
            angle: normalize_degrees(angle),
            velocity: Vec2::zeros(),
            intensity: i32::from(intensity),
            alive: true,
            steering: Steering::default(),
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Cell under the agent (floored position).
    pub fn cell(&self) -> GridPoint {
        GridPoint::containing(self.position)
    }

    /// Heading in degrees, `[0, 360)`.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn speed(&self) -> f32 {
        self.velocity.norm()
    }

    pub fn intensity(&self) -> i32 {
        self.intensity
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn steering(&self) -> &Steering {
        &self.steering
    }

    pub fn beach(&self) -> Option<BeachContact> {
        self.steering.beach()
    }

    pub fn color(&self) -> FlameColor {
        FlameColor::from_intensity(self.intensity)
    }

    /// Frozen copy left behind in the ember set.
    pub fn to_ember(&self) -> Ember {
        Ember::new(self.position, self.angle, self.intensity, self.alive)
    }

    /// Gather this tick's forces into the pending velocity change.
    ///
    /// With a clear path the blended forces plus a forward push along the
    /// heading are accumulated. With a border or beach ahead both are
    /// reversed; once the agent is no faster than `min_speed` it stops and
    /// dies instead. An agent whose next step would leave the region also
    /// stops and dies.
    pub fn apply_behaviours<T, R>(
        &mut self,
        world: &Surroundings<'_, T>,
        config: &SteeringConfig,
        rng: &mut R,
    ) -> Blend
    where
        T: TerrainQuery + ?Sized,
        R: Rng,
    {
        let beach = scan_for_beach(world.terrain, self.position, self.velocity, config);
        let at_border = crosses_border(self.position, self.velocity, &world.inner_bounds, config);
        self.steering.set_detections(at_border, beach);

        let theta = self.steering.drift_wander(config, rng);
        let wander = wander_force(self.angle, theta, config);
        let hill = hill_force(world.terrain, self.position, self.velocity, self.angle, config);
        let wind = wind_force(&world.wind, config);
        let steer = wander * config.wander_weight + hill * config.hill_weight + wind * config.wind_weight;

        let mut forward = heading_vector(self.angle) * config.velocity_increase_step;
        if let Some(contact) = beach {
            forward = with_magnitude(forward, config.velocity_increase_step / contact.distance as f32);
        }

        let blend = if beach.is_none() && !at_border {
            self.steering.accumulate(steer + forward);
            Blend::Accelerate
        } else if self.velocity.norm_squared() > config.min_speed * config.min_speed {
            self.steering.accumulate(-forward - steer);
            Blend::Decelerate
        } else {
            return self.stop();
        };

        // The next step must keep the agent on the active footprint
        let next = self.position + limit(self.velocity + self.steering.pending(), config.top_speed);
        if world.region.encloses(next) {
            blend
        } else {
            self.stop()
        }
    }

    fn stop(&mut self) -> Blend {
        self.steering.take_pending();
        self.velocity = Vec2::zeros();
        self.alive = false;
        Blend::Stop
    }

    /// Apply the pending change, move, and turn towards the new velocity.
    ///
    /// The turn is the signed difference wrapped into `(-180, 180]`, scaled by
    /// `speed / top_speed` and capped at `max_rotation`.
    pub fn integrate(&mut self, config: &SteeringConfig) {
        self.velocity = limit(self.velocity + self.steering.take_pending(), config.top_speed);
        self.position += self.velocity;

        let desired = self.velocity.y.atan2(self.velocity.x).to_degrees();
        let turn = wrap_delta(desired - self.angle) * self.velocity.norm() / config.top_speed;
        let turn = turn.clamp(-config.max_rotation, config.max_rotation);
        self.angle = normalize_degrees(self.angle + turn);
    }
}
