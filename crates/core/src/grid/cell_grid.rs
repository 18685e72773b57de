//! Region-shaped cell storage shared by the burned, fuel and risk layers.

use crate::core_types::{GridPoint, Region};

/// One value per integer coordinate of a [`Region`], borders included.
///
/// Stored row-major (`row * columns + column`) with offsets measured from
/// the region's top-left corner, so a grid never has to know where the
/// terrain footprint sits in absolute coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct CellGrid<T> {
    data: Vec<T>,
    region: Region,
    columns: usize,
    rows: usize,
}

impl<T: Copy> CellGrid<T> {
    /// Create a grid covering `region`, every cell set to `value`.
    pub fn new(region: Region, value: T) -> Self {
        let columns = region.columns();
        let rows = region.rows();
        Self {
            data: vec![value; columns * rows],
            region,
            columns,
            rows,
        }
    }

    /// Region this grid was built for.
    pub fn region(&self) -> Region {
        self.region
    }

    /// `(columns, rows)`, i.e. `(width + 1, height + 1)` of the region.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.columns, self.rows)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Flat index of `cell`, or `None` when it lies outside the region.
    #[inline]
    pub fn index(&self, cell: GridPoint) -> Option<usize> {
        if !self.region.contains_cell(cell) {
            return None;
        }
        let column = (cell.x - self.region.left) as usize;
        let row = (cell.y - self.region.top) as usize;
        Some(row * self.columns + column)
    }

    /// Value at `cell`, or `None` outside the region.
    #[inline]
    pub fn try_get(&self, cell: GridPoint) -> Option<T> {
        self.index(cell).map(|i| self.data[i])
    }

    /// Value at `cell`.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is outside the region.
    #[inline]
    pub fn get(&self, cell: GridPoint) -> T {
        match self.index(cell) {
            Some(index) => self.data[index],
            None => panic!("Cell {cell} outside region {}", self.region),
        }
    }

    /// Value at a flat index obtained from [`CellGrid::index`].
    #[inline]
    pub fn at(&self, index: usize) -> T {
        self.data[index]
    }

    /// Overwrite the value at a flat index obtained from [`CellGrid::index`].
    #[inline]
    pub fn set_at(&mut self, index: usize, value: T) {
        self.data[index] = value;
    }

    /// Overwrite the value at `cell`.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is outside the region.
    #[inline]
    pub fn set(&mut self, cell: GridPoint, value: T) {
        match self.index(cell) {
            Some(index) => self.data[index] = value,
            None => panic!("Cell {cell} outside region {}", self.region),
        }
    }

    /// Fill entire grid with a value
    pub fn fill(&mut self, value: T) {
        self.data.fill(value);
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Iterate `(cell, value)` pairs row by row.
    pub fn cells(&self) -> impl Iterator<Item = (GridPoint, T)> + '_ {
        self.region.cells().zip(self.data.iter().copied())
    }
}
