//! Irreversible per-cell burn record and burned-area statistics.

use super::cell_grid::CellGrid;
use crate::core_types::{GridPoint, Region};

/// Only one cell in this many needs to burn for the area to read 100 %.
///
/// Fire spreads along fuel, not across every raw cell, so the percentage is
/// measured against a seventh of the footprint.
pub const BURNABLE_FRACTION_DIVISOR: f32 = 7.0;

/// Outcome of marking a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurnOutcome {
    /// The cell was unburned and is now burned.
    Ignited,
    /// The cell had already burned.
    AlreadyBurned,
    /// The cell lies outside the region.
    OutOfRegion,
}

/// Which cells any fire has occupied since the last reset.
#[derive(Debug, Clone, PartialEq)]
pub struct BurnedGrid {
    cells: CellGrid<bool>,
    burned_count: usize,
}

impl BurnedGrid {
    pub fn new(region: Region) -> Self {
        Self {
            cells: CellGrid::new(region, false),
            burned_count: 0,
        }
    }

    /// `Some(true)` if the cell has burned, `None` outside the region.
    pub fn is_burned(&self, cell: GridPoint) -> Option<bool> {
        self.cells.try_get(cell)
    }

    /// Mark `cell` as burned. A cell is counted once however often it is marked.
    pub fn mark(&mut self, cell: GridPoint) -> BurnOutcome {
        let Some(index) = self.cells.index(cell) else {
            return BurnOutcome::OutOfRegion;
        };
        if self.cells.at(index) {
            return BurnOutcome::AlreadyBurned;
        }
        self.cells.set_at(index, true);
        self.burned_count += 1;
        BurnOutcome::Ignited
    }

    /// Number of distinct cells burned since the grid was built.
    pub fn burned_count(&self) -> usize {
        self.burned_count
    }

    pub fn total_cells(&self) -> usize {
        self.cells.len()
    }

    /// Burned share of the burnable area, clamped to `[0, 100]`.
    pub fn percent_burned(&self) -> f32 {
        let total = self.total_cells() as f32;
        if total == 0.0 {
            return 0.0;
        }
        let burnable = total / BURNABLE_FRACTION_DIVISOR;
        (self.burned_count as f32 / burnable * 100.0).clamp(0.0, 100.0)
    }

    pub fn dimensions(&self) -> (usize, usize) {
        self.cells.dimensions()
    }

    /// Every burned cell, row by row.
    pub fn burned_cells(&self) -> impl Iterator<Item = GridPoint> + '_ {
        self.cells
            .cells()
            .filter_map(|(cell, burned)| burned.then_some(cell))
    }
}
