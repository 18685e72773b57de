//! Active terrain footprint and integer cell coordinates.

use super::vec2::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer terrain coordinate of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
}

impl GridPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Cell containing a continuous position (floored on both axes).
    pub fn containing(position: Vec2) -> Self {
        Self {
            x: position.x.floor() as i32,
            y: position.y.floor() as i32,
        }
    }

    /// Continuous position of the cell's corner.
    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x as f32, self.y as f32)
    }
}

impl fmt::Display for GridPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Axis-aligned rectangle of the active terrain footprint.
///
/// The right and bottom edges are inclusive: a region of width `w` spans
/// `w + 1` integer columns, `left..=left + w`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Region {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    pub const fn new(left: i32, top: i32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.left + self.width as i32
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.top + self.height as i32
    }

    /// Number of cell columns (`width + 1`).
    #[inline]
    pub fn columns(&self) -> usize {
        self.width as usize + 1
    }

    /// Number of cell rows (`height + 1`).
    #[inline]
    pub fn rows(&self) -> usize {
        self.height as usize + 1
    }

    /// Total number of cells covered, borders included.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.columns() * self.rows()
    }

    pub fn contains_cell(&self, cell: GridPoint) -> bool {
        cell.x >= self.left && cell.x <= self.right() && cell.y >= self.top && cell.y <= self.bottom()
    }

    /// True for cells with all eight neighbours inside the region.
    pub fn is_interior(&self, cell: GridPoint) -> bool {
        cell.x > self.left && cell.x < self.right() && cell.y > self.top && cell.y < self.bottom()
    }

    /// Continuous containment with inclusive edges.
    pub fn encloses(&self, position: Vec2) -> bool {
        position.x >= self.left as f32
            && position.x <= self.right() as f32
            && position.y >= self.top as f32
            && position.y <= self.bottom() as f32
    }

    /// Region shrunk by `margin` on every side.
    ///
    /// A region narrower than `2 * margin` collapses onto its centre line.
    pub fn inset(&self, margin: u32) -> Region {
        let (left, width) = shrink_axis(self.left, self.width, margin);
        let (top, height) = shrink_axis(self.top, self.height, margin);
        Region {
            left,
            top,
            width,
            height,
        }
    }

    /// Centre of the region in continuous coordinates.
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.left as f32 + self.width as f32 / 2.0,
            self.top as f32 + self.height as f32 / 2.0,
        )
    }

    /// Iterate every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = GridPoint> {
        let (left, right, top, bottom) = (self.left, self.right(), self.top, self.bottom());
        (top..=bottom).flat_map(move |y| (left..=right).map(move |x| GridPoint::new(x, y)))
    }

    /// Iterate the interior cells (border rows and columns excluded).
    pub fn interior_cells(&self) -> impl Iterator<Item = GridPoint> {
        let (left, right, top, bottom) = (self.left, self.right(), self.top, self.bottom());
        (top + 1..bottom).flat_map(move |y| (left + 1..right).map(move |x| GridPoint::new(x, y)))
    }
}

fn shrink_axis(start: i32, extent: u32, margin: u32) -> (i32, u32) {
    let trimmed = margin.saturating_mul(2);
    let (offset, remaining) = if extent >= trimmed {
        (margin, extent - trimmed)
    } else {
        (extent / 2, 0)
    };
    let offset = i32::try_from(offset).unwrap_or(i32::MAX);
    (start.saturating_add(offset), remaining)
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}..={}] x [{}..={}]",
            self.left,
            self.right(),
            self.top,
            self.bottom()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_cells_include_right_and_bottom_edge() {
        let region = Region::new(0, 0, 100, 50);
        assert_eq!(region.columns(), 101);
        assert_eq!(region.rows(), 51);
        assert_eq!(region.cell_count(), 101 * 51);
        assert_eq!(region.cells().count(), region.cell_count());
        assert!(region.contains_cell(GridPoint::new(100, 50)));
        assert!(!region.contains_cell(GridPoint::new(101, 50)));
    }

    #[test]
    fn interior_excludes_border() {
        let region = Region::new(10, 20, 4, 4);
        let interior: Vec<_> = region.interior_cells().collect();
        assert_eq!(interior.len(), 9);
        assert!(interior.iter().all(|&c| region.is_interior(c)));
        assert!(!region.is_interior(GridPoint::new(10, 22)));
    }

    #[test]
    fn inset_shrinks_every_side() {
        let region = Region::new(0, 0, 100, 100);
        let inner = region.inset(25);
        assert_eq!(inner, Region::new(25, 25, 50, 50));
        assert!(inner.encloses(Vec2::new(25.0, 75.0)));
        assert!(!inner.encloses(Vec2::new(24.9, 50.0)));
    }

    #[test]
    fn inset_collapses_small_regions() {
        let region = Region::new(0, 0, 30, 30);
        let inner = region.inset(25);
        assert_eq!(inner.width, 0);
        assert_eq!(inner.left, 15);
    }

    #[test]
    fn inset_with_huge_margin_collapses() {
        let region = Region::new(0, 0, 100, 60);
        let inner = region.inset(u32::MAX);
        assert_eq!(inner, Region::new(50, 30, 0, 0));
    }

    #[test]
    fn containing_floors_negative_positions() {
        assert_eq!(GridPoint::containing(Vec2::new(-0.5, 2.9)), GridPoint::new(-1, 2));
    }
}
