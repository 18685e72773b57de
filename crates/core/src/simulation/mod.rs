//! Fire propagation engine.
//!
//! [`FireModel`] owns everything one simulated surface needs: the fuel,
//! burned and risk grids, the active fire agents, the ember set, the wind and
//! the random source. The caller drives it one [`FireModel::tick`] per frame
//! and may reset, re-ignite or change the wind between ticks.
//!
//! Each tick:
//!
//! 1. Rebuild every grid if the terrain footprint changed.
//! 2. For each agent present at the start of the tick, leave an ember copy
//!    behind, drop it if it is dead or its cell already burned, otherwise mark
//!    the cell burned, consume its fuel and maybe branch.
//! 3. Steer and move the surviving agents (new branches wait for the next tick).
//! 4. Fade the embers.

pub mod snapshot;

pub use snapshot::{AgentView, BurnStats, FrameSnapshot};

use crate::agent::{Blend, EmberSet, FireAgent, Surroundings};
use crate::config::FireConfig;
use crate::core_types::{normalize_degrees, Region, Vec2, Wind};
use crate::error::ConfigError;
use crate::grid::fuel::FUEL_CONSUMED;
use crate::grid::{BurnOutcome, BurnedGrid, FuelGrid, RiskZones, TerrainQuery};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace, warn};

/// Seed used when the caller does not pick one.
pub const DEFAULT_SEED: u64 = 42;

/// Fire simulation over one terrain surface.
///
/// Generic over the terrain source and the random generator so that tests
/// can inject a fixed-seed generator and a synthetic height field.
///
/// # Example
///
/// ```
/// use sandfire_core::{FireModel, HeightField, Vec2};
///
/// let terrain = HeightField::flat(101, 101, 5.0);
/// let mut model = FireModel::seeded(terrain, 7);
///
/// assert!(model.ignite(Vec2::new(50.0, 50.0), Some(90.0)));
/// while model.is_running() {
///     model.tick();
/// }
/// println!("{}", model.stats());
/// ```
pub struct FireModel<T, R = ChaCha8Rng> {
    terrain: T,
    rng: R,
    config: FireConfig,

    /// Footprint the grids were built for
    region: Region,
    /// Region shrunk by the border margin
    inner_bounds: Region,

    fuel: FuelGrid,
    burned: BurnedGrid,
    /// Cached until the region changes or the model is reset
    risk: Option<RiskZones>,

    agents: Vec<FireAgent>,
    embers: EmberSet,
    wind: Wind,
    timestep: u64,
}

impl<T: TerrainQuery> FireModel<T, ChaCha8Rng> {
    /// Default configuration with a `ChaCha8` generator seeded from `seed`.
    pub fn seeded(terrain: T, seed: u64) -> Self {
        Self::new(terrain, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<T: TerrainQuery, R: Rng> FireModel<T, R> {
    /// Create a model with the default configuration.
    pub fn new(terrain: T, rng: R) -> Self {
        Self::build(terrain, rng, FireConfig::default())
    }

    /// Create a model with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns the first invalid parameter of `config`.
    pub fn with_config(terrain: T, rng: R, config: FireConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(terrain, rng, config))
    }

    fn build(terrain: T, mut rng: R, config: FireConfig) -> Self {
        let region = terrain.current_region();
        let fuel = FuelGrid::seed(region, &terrain, &config.fuel, &mut rng);
        let (columns, rows) = fuel.dimensions();
        info!(
            "Fire model initialized over {}: {}x{} cells, border margin {}",
            region, columns, rows, config.border_margin
        );

        Self {
            inner_bounds: region.inset(config.border_margin),
            burned: BurnedGrid::new(region),
            terrain,
            rng,
            config,
            region,
            fuel,
            risk: None,
            agents: Vec::new(),
            embers: EmberSet::new(),
            wind: Wind::default(),
            timestep: 0,
        }
    }

    /// Start a fire at `position`, heading along `angle` or the wind direction.
    ///
    /// Positions outside the region, on water, or with undefined elevation are
    /// rejected without side effects. Returns whether an agent was created.
    pub fn ignite(&mut self, position: Vec2, angle: Option<f32>) -> bool {
        if !self.region.encloses(position) {
            trace!(
                "Ignition at ({:.1}, {:.1}) rejected: outside {}",
                position.x,
                position.y,
                self.region
            );
            return false;
        }
        match self.terrain.elevation(position.x, position.y) {
            Some(elevation) if elevation >= 0.0 => {}
            _ => {
                trace!(
                    "Ignition at ({:.1}, {:.1}) rejected: water",
                    position.x,
                    position.y
                );
                return false;
            }
        }

        let angle = normalize_degrees(angle.unwrap_or(self.wind.direction()));
        self.agents
            .push(FireAgent::new(position, angle, self.config.ember_intensity));
        true
    }

    /// Start a fire on a random high-risk cell inside the safety rectangle.
    ///
    /// Computes the risk zones first when none are cached. Gives up after
    /// `risk_ignition_attempts` draws that all land outside the safety rectangle.
    pub fn ignite_in_risk_zone(&mut self) -> bool {
        if self.risk.as_ref().map_or(0, RiskZones::len) == 0 {
            self.compute_risk_zones();
        }
        let Some(zones) = self.risk.as_ref() else {
            return false;
        };
        if zones.is_empty() {
            info!("No risk cells in {}, ignition skipped", self.region);
            return false;
        }

        let mut chosen = None;
        for _ in 0..self.config.risk_ignition_attempts {
            let cell = zones.cells()[self.rng.random_range(0..zones.len())];
            if self.inner_bounds.encloses(cell.to_vec2()) {
                chosen = Some(cell);
                break;
            }
        }

        let Some(cell) = chosen else {
            info!(
                "No risk cell inside {} after {} draws, ignition skipped",
                self.inner_bounds, self.config.risk_ignition_attempts
            );
            return false;
        };
        info!("Igniting risk cell {}", cell);
        self.ignite(cell.to_vec2(), None)
    }

    /// Analyse the current region for high-risk cells and cache the result.
    pub fn compute_risk_zones(&mut self) -> &RiskZones {
        let zones = RiskZones::compute(self.region, &self.terrain);
        info!("Computed {} risk cells over {}", zones.len(), self.region);
        self.risk.insert(zones)
    }

    /// Advance the simulation by one frame.
    pub fn tick(&mut self) {
        self.sync_region();

        let previous = std::mem::take(&mut self.agents);
        let mut survivors = Vec::with_capacity(previous.len());

        for agent in previous {
            self.embers.push(agent.to_ember());
            if !agent.is_alive() {
                continue;
            }

            let cell = agent.cell();
            debug_assert!(
                self.region.contains_cell(cell),
                "Agent cell {cell} outside region {}",
                self.region
            );
            match self.burned.mark(cell) {
                BurnOutcome::Ignited => {}
                BurnOutcome::AlreadyBurned => continue,
                BurnOutcome::OutOfRegion => {
                    warn!("Dropping agent on cell {} outside region {}", cell, self.region);
                    continue;
                }
            }

            let fuel = self.fuel.consume(cell).unwrap_or(FUEL_CONSUMED);
            let spread = self.spread_factor(fuel);
            if self.rng.random_range(0..100u8) < spread {
                // Branches land in self.agents and are not stepped this tick
                let position = agent.position();
                let left = self.ignite(position, Some(agent.angle() + 90.0));
                let right = self.ignite(position, Some(agent.angle() + 270.0));
                trace!("Branch at {}: left={}, right={}", cell, left, right);
            }
            survivors.push(agent);
        }

        let world = Surroundings {
            terrain: &self.terrain,
            wind: self.wind,
            region: self.region,
            inner_bounds: self.inner_bounds,
        };
        for agent in &mut survivors {
            let blend = agent.apply_behaviours(&world, &self.config.steering, &mut self.rng);
            if blend == Blend::Stop {
                trace!(
                    "Agent stopped at ({:.1}, {:.1}), border={}, beach={:?}",
                    agent.position().x,
                    agent.position().y,
                    agent.steering().at_border(),
                    agent.beach().map(|b| b.distance)
                );
            }
            agent.integrate(&self.config.steering);
        }

        survivors.append(&mut self.agents);
        self.agents = survivors;

        let faded = self.embers.decay();
        self.timestep += 1;

        debug!(
            "Tick {}: {} agents, {} embers ({} faded), {:.1}% burned",
            self.timestep,
            self.agents.len(),
            self.embers.len(),
            faded,
            self.percent_burned()
        );
    }

    /// Rebuild the grids if the terrain reports a new footprint.
    ///
    /// Called automatically at the start of every tick. Returns whether a
    /// rebuild happened.
    pub fn refresh_region(&mut self) -> bool {
        self.sync_region()
    }

    fn sync_region(&mut self) -> bool {
        let region = self.terrain.current_region();
        if region == self.region && !self.terrain.region_changed() {
            return false;
        }
        info!("Terrain region changed from {} to {}, rebuilding grids", self.region, region);
        self.rebuild(region);

        let (inside, outside): (Vec<_>, Vec<_>) = std::mem::take(&mut self.agents)
            .into_iter()
            .partition(|agent| region.encloses(agent.position()));
        for agent in &outside {
            self.embers.push(agent.to_ember());
        }
        if !outside.is_empty() {
            debug!("Retired {} agents outside the new region", outside.len());
        }
        self.agents = inside;
        true
    }

    fn rebuild(&mut self, region: Region) {
        self.region = region;
        self.inner_bounds = region.inset(self.config.border_margin);
        self.fuel = FuelGrid::seed(region, &self.terrain, &self.config.fuel, &mut self.rng);
        self.burned = BurnedGrid::new(region);
        self.risk = None;
    }

    fn spread_factor(&self, fuel: u8) -> u8 {
        match self.config.early_spread {
            Some(early) if self.timestep < early.ticks => fuel.max(early.percent),
            _ => fuel,
        }
    }

    /// Remove every agent and ember and re-derive all grids from the current region.
    pub fn reset(&mut self) {
        self.agents.clear();
        self.embers.clear();
        self.timestep = 0;
        let region = self.terrain.current_region();
        self.rebuild(region);
        info!("Simulation reset over {}", region);
    }

    /// Same as [`FireModel::reset`].
    pub fn clear(&mut self) {
        self.reset();
    }

    /// True while any agent or ember remains.
    pub fn is_running(&self) -> bool {
        !self.agents.is_empty() || !self.embers.is_empty()
    }

    /// Negative or non-finite speeds are treated as calm.
    pub fn set_wind_speed(&mut self, speed: f32) {
        self.wind.set_speed(speed);
    }

    /// Direction in degrees; wrapped into `[0, 360)`.
    pub fn set_wind_direction(&mut self, direction: f32) {
        self.wind.set_direction(direction);
    }

    pub fn wind(&self) -> Wind {
        self.wind
    }

    /// Burned share of the burnable area, `[0, 100]`.
    pub fn percent_burned(&self) -> f32 {
        self.burned.percent_burned()
    }

    pub fn burned_count(&self) -> usize {
        self.burned.burned_count()
    }

    /// Ticks since construction or the last reset.
    pub fn timestep(&self) -> u64 {
        self.timestep
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    pub fn ember_count(&self) -> usize {
        self.embers.len()
    }

    pub fn agents(&self) -> &[FireAgent] {
        &self.agents
    }

    pub fn embers(&self) -> &EmberSet {
        &self.embers
    }

    pub fn fuel(&self) -> &FuelGrid {
        &self.fuel
    }

    pub fn burned(&self) -> &BurnedGrid {
        &self.burned
    }

    /// Cached risk zones, if computed since the last rebuild.
    pub fn risk_zones(&self) -> Option<&RiskZones> {
        self.risk.as_ref()
    }

    pub fn region(&self) -> Region {
        self.region
    }

    /// Safety rectangle used for border detection and risk ignition.
    pub fn inner_bounds(&self) -> Region {
        self.inner_bounds
    }

    pub fn config(&self) -> &FireConfig {
        &self.config
    }

    pub fn terrain(&self) -> &T {
        &self.terrain
    }

    /// Mutable terrain access. A changed footprint is picked up on the next tick.
    pub fn terrain_mut(&mut self) -> &mut T {
        &mut self.terrain
    }

    pub fn stats(&self) -> BurnStats {
        BurnStats {
            timestep: self.timestep,
            active_agents: self.agents.len(),
            embers: self.embers.len(),
            burned_cells: self.burned.burned_count(),
            percent_burned: self.percent_burned(),
        }
    }

    /// Everything a renderer needs for the current frame.
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            timestep: self.timestep,
            running: self.is_running(),
            percent_burned: self.percent_burned(),
            burned_cells: self.burned.burned_count(),
            wind: self.wind,
            agents: self.agents.iter().map(AgentView::from).collect(),
            embers: self.embers.iter().map(AgentView::from).collect(),
            risk_zones: self
                .risk
                .as_ref()
                .map(|zones| zones.cells().to_vec())
                .unwrap_or_default(),
        }
    }
}
