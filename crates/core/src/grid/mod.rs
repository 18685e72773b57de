//! Per-cell layers aligned to the active terrain region.

pub mod burned;
pub mod cell_grid;
pub mod fuel;
pub mod risk;
pub mod terrain;

pub use burned::{BurnOutcome, BurnedGrid};
pub use cell_grid::CellGrid;
pub use fuel::FuelGrid;
pub use risk::{CellTopography, RiskZones};
pub use terrain::{elevation_or_water, HeightField, TerrainQuery, UNDEFINED_ELEVATION};
