//! Fuel potential seeding and consumption.
//!
//! Each cell carries a small integer read as the percent chance that a fire
//! occupying it branches. Values come from a coarse vegetation model: bare
//! ground everywhere, sparse fuel on high ground, and randomly scattered
//! tree canopies that burn hotter along with their immediate halo.

use super::cell_grid::CellGrid;
use super::terrain::{elevation_or_water, TerrainQuery};
use crate::config::FuelConfig;
use crate::core_types::{GridPoint, Region};
use rand::Rng;

/// Fuel of a consumed cell.
pub const FUEL_CONSUMED: u8 = 0;
/// Sparse vegetation above the high-altitude threshold.
pub const FUEL_HIGH_GROUND: u8 = 5;
/// Bare-ground baseline.
pub const FUEL_BARE_GROUND: u8 = 10;
/// Cells adjacent to a tree canopy.
pub const FUEL_TREE_HALO: u8 = 12;
/// Tree canopy centre.
pub const FUEL_TREE: u8 = 15;

const NEIGHBOUR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Per-cell spread potential over the active region.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelGrid {
    cells: CellGrid<u8>,
}

impl FuelGrid {
    /// Seed a fresh grid for `region` from the terrain and the random source.
    pub fn seed<T, R>(region: Region, terrain: &T, config: &FuelConfig, rng: &mut R) -> Self
    where
        T: TerrainQuery + ?Sized,
        R: Rng,
    {
        let mut cells = CellGrid::new(region, FUEL_BARE_GROUND);

        for cell in region.cells() {
            let elevation = elevation_or_water(terrain, cell.to_vec2());
            if elevation > config.high_altitude_threshold {
                cells.set(cell, FUEL_HIGH_GROUND);
            }
        }

        let mut trees = 0usize;
        for cell in region.interior_cells() {
            if rng.random::<f32>() < config.tree_probability {
                cells.set(cell, FUEL_TREE);
                for (dx, dy) in NEIGHBOUR_OFFSETS {
                    let neighbour = GridPoint::new(cell.x + dx, cell.y + dy);
                    let current = cells.get(neighbour);
                    cells.set(neighbour, current.max(FUEL_TREE_HALO));
                }
                trees += 1;
            }
        }
        tracing::debug!("Seeded fuel for {} with {} tree canopies", region, trees);

        Self { cells }
    }

    /// Fuel remaining at `cell`, or `None` outside the region.
    pub fn get(&self, cell: GridPoint) -> Option<u8> {
        self.cells.try_get(cell)
    }

    /// Read the spread factor at `cell` and zero it; fuel burns only once.
    ///
    /// Returns `None` outside the region.
    pub fn consume(&mut self, cell: GridPoint) -> Option<u8> {
        let index = self.cells.index(cell)?;
        let fuel = self.cells.at(index);
        self.cells.set_at(index, FUEL_CONSUMED);
        Some(fuel)
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.cells.dimensions()
    }

    pub fn region(&self) -> Region {
        self.cells.region()
    }

    /// Raw fuel values row by row.
    pub fn as_slice(&self) -> &[u8] {
        self.cells.as_slice()
    }

    /// Sum of remaining fuel, a cheap fingerprint of the grid state.
    pub fn total(&self) -> u64 {
        self.cells.as_slice().iter().map(|&f| u64::from(f)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::terrain::HeightField;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn no_trees() -> FuelConfig {
        FuelConfig {
            tree_probability: 0.0,
            ..FuelConfig::default()
        }
    }

    #[test]
    fn bare_ground_and_high_ground() {
        // Plane rising along x: 0 at x=0, 100 at x=100
        let terrain = HeightField::plane(101, 11, 0.0, 1.0, 0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let fuel = FuelGrid::seed(terrain.current_region(), &terrain, &no_trees(), &mut rng);

        assert_eq!(fuel.get(GridPoint::new(10, 5)), Some(FUEL_BARE_GROUND));
        assert_eq!(fuel.get(GridPoint::new(50, 5)), Some(FUEL_BARE_GROUND));
        assert_eq!(fuel.get(GridPoint::new(51, 5)), Some(FUEL_HIGH_GROUND));
        assert_eq!(fuel.dimensions(), (101, 11));
    }

    #[test]
    fn every_interior_cell_a_tree_when_certain() {
        let terrain = HeightField::flat(11, 11, 0.0);
        let config = FuelConfig {
            tree_probability: 1.0,
            ..FuelConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let fuel = FuelGrid::seed(terrain.current_region(), &terrain, &config, &mut rng);

        // Halos never lower an existing canopy
        assert_eq!(fuel.get(GridPoint::new(5, 5)), Some(FUEL_TREE));
        assert_eq!(fuel.get(GridPoint::new(1, 1)), Some(FUEL_TREE));
        // Border cells only receive halos
        assert_eq!(fuel.get(GridPoint::new(0, 5)), Some(FUEL_TREE_HALO));
        assert_eq!(fuel.get(GridPoint::new(10, 10)), Some(FUEL_TREE_HALO));
    }

    #[test]
    fn seeded_values_stay_in_vocabulary() {
        let terrain = HeightField::single_hill(61, 61, 0.0, 100.0, 20.0);
        let config = FuelConfig {
            tree_probability: 0.1,
            ..FuelConfig::default()
        };
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let fuel = FuelGrid::seed(terrain.current_region(), &terrain, &config, &mut rng);
        assert!(fuel.as_slice().iter().all(|f| [
            FUEL_HIGH_GROUND,
            FUEL_BARE_GROUND,
            FUEL_TREE_HALO,
            FUEL_TREE
        ]
        .contains(f)));
    }

    #[test]
    fn consumption_is_single_use() {
        let terrain = HeightField::flat(11, 11, 0.0);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut fuel = FuelGrid::seed(terrain.current_region(), &terrain, &no_trees(), &mut rng);
        let cell = GridPoint::new(3, 3);

        assert_eq!(fuel.consume(cell), Some(FUEL_BARE_GROUND));
        assert_eq!(fuel.consume(cell), Some(FUEL_CONSUMED));
        assert_eq!(fuel.get(cell), Some(FUEL_CONSUMED));
        assert_eq!(fuel.consume(GridPoint::new(-1, 3)), None);
    }

    #[test]
    fn same_seed_same_grid() {
        let terrain = HeightField::flat(41, 41, 0.0);
        let config = FuelConfig {
            tree_probability: 0.05,
            ..FuelConfig::default()
        };
        let a = FuelGrid::seed(
            terrain.current_region(),
            &terrain,
            &config,
            &mut ChaCha8Rng::seed_from_u64(9),
        );
        let b = FuelGrid::seed(
            terrain.current_region(),
            &terrain,
            &config,
            &mut ChaCha8Rng::seed_from_u64(9),
        );
        assert_eq!(a, b);
    }
}
