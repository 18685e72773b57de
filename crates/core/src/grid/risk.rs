//! Slope/aspect analysis flagging cells prone to fire acceleration.
//!
//! A cell is high-risk when it faces south, is steep, and lies above the
//! waterline. Sun-exposed steep slopes dry out first and carry fire uphill
//! fastest, which makes them the natural place to start a demonstration
//! fire.
//!
//! # Method
//!
//! Elevation change rates come from Horn's 3x3 kernel over the cell's
//! neighbourhood (terrain y grows southwards, so N is the row above):
//!
//! ```text
//! NW N NE
//! W  C  E
//! SW S SE
//!
//! dx = ((NE + 2E + SE) - (NW + 2W + SW)) / 8
//! dy = ((SW + 2S + SE) - (NW + 2N + NE)) / 8
//! ```
//!
//! # References
//!
//! - Horn, B.K.P. (1981). "Hill Shading and the Reflectance Map."
//!   Proceedings of the IEEE, 69(1), 14-47.

use super::terrain::{elevation_or_water, TerrainQuery};
use crate::core_types::{GridPoint, Region, Vec2};
use rustc_hash::FxHashSet;

/// Lower bound of the south-facing aspect window (degrees).
pub const SOUTH_ASPECT_MIN: f32 = 157.5;
/// Upper bound of the south-facing aspect window (degrees).
pub const SOUTH_ASPECT_MAX: f32 = 202.5;
/// Minimum slope of a high-risk cell (degrees).
pub const MIN_RISK_SLOPE: f32 = 10.0;

/// Horn change rates `(dx, dy)` of a 3x3 neighbourhood.
///
/// `z` is ordered NW, N, NE, W, C, E, SW, S, SE.
#[inline]
pub fn horn_rates(z: &[f32; 9]) -> (f32, f32) {
    let dx = ((z[2] + 2.0 * z[5] + z[8]) - (z[0] + 2.0 * z[3] + z[6])) / 8.0;
    let dy = ((z[6] + 2.0 * z[7] + z[8]) - (z[0] + 2.0 * z[1] + z[2])) / 8.0;
    (dx, dy)
}

/// Downslope compass bearing in degrees (0 = north, 90 = east, 180 = south).
///
/// # Example
///
/// ```
/// use sandfire_core::grid::risk::downslope_bearing;
///
/// // Elevation falls towards +y (south)
/// let bearing = downslope_bearing(0.0, -0.5);
/// assert!((bearing - 180.0).abs() < 1e-3);
/// ```
pub fn downslope_bearing(dx: f32, dy: f32) -> f32 {
    let aspect = dy.atan2(-dx).to_degrees();
    if aspect < 0.0 {
        90.0 - aspect
    } else if aspect > 90.0 {
        360.0 - aspect + 90.0
    } else {
        90.0 - aspect
    }
}

/// Slope angle in degrees from the change rates.
#[inline]
pub fn slope_degrees(dx: f32, dy: f32) -> f32 {
    (dx * dx + dy * dy).sqrt().atan().to_degrees()
}

/// Slope and aspect of one cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellTopography {
    /// Downslope bearing (degrees, 0-360)
    pub aspect: f32,
    /// Slope angle (degrees, 0-90)
    pub slope: f32,
    /// Elevation of the cell itself
    pub elevation: f32,
}

impl CellTopography {
    /// Analyse the 3x3 neighbourhood around `cell`.
    pub fn sample<T: TerrainQuery + ?Sized>(terrain: &T, cell: GridPoint) -> Self {
        let mut z = [0.0_f32; 9];
        let mut k = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                let p = Vec2::new((cell.x + dx) as f32, (cell.y + dy) as f32);
                z[k] = elevation_or_water(terrain, p);
                k += 1;
            }
        }
        let (rate_x, rate_y) = horn_rates(&z);
        Self {
            aspect: downslope_bearing(rate_x, rate_y),
            slope: slope_degrees(rate_x, rate_y),
            elevation: z[4],
        }
    }

    /// South-facing, steep, and dry.
    pub fn is_high_risk(&self) -> bool {
        (SOUTH_ASPECT_MIN..=SOUTH_ASPECT_MAX).contains(&self.aspect)
            && self.slope >= MIN_RISK_SLOPE
            && self.elevation > 0.0
    }
}

/// Cells of a region flagged high-risk, in row order.
#[derive(Debug, Clone, PartialEq)]
pub struct RiskZones {
    region: Region,
    cells: Vec<GridPoint>,
    lookup: FxHashSet<GridPoint>,
}

impl RiskZones {
    /// Analyse every interior cell of `region`; border cells are never flagged.
    pub fn compute<T: TerrainQuery + ?Sized>(region: Region, terrain: &T) -> Self {
        let cells: Vec<GridPoint> = region
            .interior_cells()
            .filter(|&cell| CellTopography::sample(terrain, cell).is_high_risk())
            .collect();
        let lookup = cells.iter().copied().collect();
        Self {
            region,
            cells,
            lookup,
        }
    }

    pub fn region(&self) -> Region {
        self.region
    }

    pub fn contains(&self, cell: GridPoint) -> bool {
        self.lookup.contains(&cell)
    }

    pub fn cells(&self) -> &[GridPoint] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
