//! Terrain elevation queries consumed by the fire engine.
//!
//! The live installation reconstructs the surface from a depth camera; the
//! engine only needs point elevations, a local gradient and the current
//! footprint. [`HeightField`] is an in-memory surface with the same
//! interface, used by the headless demo and the tests.

use crate::core_types::{Region, Vec2};

/// Read-only view of the terrain surface.
///
/// Elevations are signed: negative values lie below the waterline. A query
/// that cannot be answered returns `None`, which the engine treats as water.
pub trait TerrainQuery {
    /// Elevation at a continuous terrain coordinate.
    fn elevation(&self, x: f32, y: f32) -> Option<f32>;

    /// Local elevation gradient `(dz/dx, dz/dy)`.
    fn gradient(&self, x: f32, y: f32) -> Vec2;

    /// Footprint of the surface currently under simulation.
    fn current_region(&self) -> Region;

    /// Hint that the footprint must be re-derived even if the rectangle is
    /// unchanged (e.g. after recalibration).
    fn region_changed(&self) -> bool {
        false
    }
}

impl<T: TerrainQuery + ?Sized> TerrainQuery for &T {
    fn elevation(&self, x: f32, y: f32) -> Option<f32> {
        (**self).elevation(x, y)
    }

    fn gradient(&self, x: f32, y: f32) -> Vec2 {
        (**self).gradient(x, y)
    }

    fn current_region(&self) -> Region {
        (**self).current_region()
    }

    fn region_changed(&self) -> bool {
        (**self).region_changed()
    }
}

/// Elevation used for undefined samples: just below the waterline.
pub const UNDEFINED_ELEVATION: f32 = -1.0;

/// Elevation at `position`, with undefined samples reported as water.
#[inline]
pub fn elevation_or_water<T: TerrainQuery + ?Sized>(terrain: &T, position: Vec2) -> f32 {
    terrain
        .elevation(position.x, position.y)
        .filter(|e| e.is_finite())
        .unwrap_or(UNDEFINED_ELEVATION)
}

/// Elevation samples at unit spacing, starting at the origin.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    /// Number of samples in X direction
    nx: usize,
    /// Number of samples in Y direction
    ny: usize,
    /// Elevation data (row-major order: [y * nx + x])
    elevations: Vec<f32>,
    /// Footprint reported to the engine
    region: Region,
}

impl HeightField {
    /// Build a field from raw samples.
    ///
    /// # Panics
    ///
    /// Panics if `samples.len() != nx * ny` or either side has fewer than two samples.
    pub fn from_samples(nx: usize, ny: usize, samples: Vec<f32>) -> Self {
        assert!(nx >= 2 && ny >= 2, "Height field needs at least 2x2 samples");
        assert_eq!(samples.len(), nx * ny, "Height field size mismatch");
        Self {
            nx,
            ny,
            elevations: samples,
            region: Region::new(0, 0, (nx - 1) as u32, (ny - 1) as u32),
        }
    }

    /// Level surface at `elevation`.
    pub fn flat(nx: usize, ny: usize, elevation: f32) -> Self {
        Self::from_samples(nx, ny, vec![elevation; nx * ny])
    }

    /// Inclined plane `base + slope_x * x + slope_y * y`.
    pub fn plane(nx: usize, ny: usize, base: f32, slope_x: f32, slope_y: f32) -> Self {
        let mut samples = Vec::with_capacity(nx * ny);
        for iy in 0..ny {
            for ix in 0..nx {
                samples.push(base + slope_x * ix as f32 + slope_y * iy as f32);
            }
        }
        Self::from_samples(nx, ny, samples)
    }

    /// Gaussian hill centred on the field.
    pub fn single_hill(nx: usize, ny: usize, base: f32, hill_height: f32, hill_radius: f32) -> Self {
        let center_x = (nx - 1) as f32 / 2.0;
        let center_y = (ny - 1) as f32 / 2.0;
        let mut samples = Vec::with_capacity(nx * ny);
        for iy in 0..ny {
            for ix in 0..nx {
                let dx = ix as f32 - center_x;
                let dy = iy as f32 - center_y;
                let dist_sq = dx * dx + dy * dy;
                samples.push(base + hill_height * (-dist_sq / (hill_radius * hill_radius)).exp());
            }
        }
        Self::from_samples(nx, ny, samples)
    }

    /// East-west ridge along the middle row with a Gaussian cross-section.
    ///
    /// Its southern flank faces south, so steep ridges produce risk zones.
    pub fn ridge(nx: usize, ny: usize, base: f32, ridge_height: f32, half_width: f32) -> Self {
        let center_y = (ny - 1) as f32 / 2.0;
        let mut samples = Vec::with_capacity(nx * ny);
        for iy in 0..ny {
            let d = (iy as f32 - center_y) / half_width;
            let elevation = base + ridge_height * (-d * d).exp();
            samples.resize(samples.len() + nx, elevation);
        }
        Self::from_samples(nx, ny, samples)
    }

    /// Set every sample within `radius` of `center` to `elevation`.
    pub fn with_pit(mut self, center: Vec2, radius: f32, elevation: f32) -> Self {
        for iy in 0..self.ny {
            for ix in 0..self.nx {
                let offset = Vec2::new(ix as f32, iy as f32) - center;
                if offset.norm() <= radius {
                    self.elevations[iy * self.nx + ix] = elevation;
                }
            }
        }
        self
    }

    /// Set every sample inside `area` (inclusive) to `elevation`.
    pub fn with_basin(mut self, area: Region, elevation: f32) -> Self {
        for cell in area.cells() {
            if let Some(i) = self.sample_index(cell.x, cell.y) {
                self.elevations[i] = elevation;
            }
        }
        self
    }

    /// Report a different footprint to the engine.
    pub fn set_region(&mut self, region: Region) {
        self.region = region;
    }

    /// Overwrite one sample (the sand was reshaped).
    pub fn set_sample(&mut self, x: usize, y: usize, elevation: f32) {
        assert!(x < self.nx && y < self.ny, "Sample out of bounds");
        self.elevations[y * self.nx + x] = elevation;
    }

    /// Sample counts `(nx, ny)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.nx, self.ny)
    }

    pub fn min_elevation(&self) -> f32 {
        self.elevations.iter().copied().fold(f32::INFINITY, f32::min)
    }

    pub fn max_elevation(&self) -> f32 {
        self.elevations.iter().copied().fold(f32::NEG_INFINITY, f32::max)
    }

    fn sample_index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.nx || y as usize >= self.ny {
            return None;
        }
        Some(y as usize * self.nx + x as usize)
    }
}

impl TerrainQuery for HeightField {
    /// Bilinear interpolation between the four surrounding samples.
    fn elevation(&self, x: f32, y: f32) -> Option<f32> {
        let max_x = (self.nx - 1) as f32;
        let max_y = (self.ny - 1) as f32;
        if !(0.0..=max_x).contains(&x) || !(0.0..=max_y).contains(&y) {
            return None;
        }

        let ix0 = (x.floor() as usize).min(self.nx - 2);
        let iy0 = (y.floor() as usize).min(self.ny - 2);
        let ix1 = ix0 + 1;
        let iy1 = iy0 + 1;

        let fx = x - ix0 as f32;
        let fy = y - iy0 as f32;

        let e00 = self.elevations[iy0 * self.nx + ix0];
        let e10 = self.elevations[iy0 * self.nx + ix1];
        let e01 = self.elevations[iy1 * self.nx + ix0];
        let e11 = self.elevations[iy1 * self.nx + ix1];

        let e0 = e00 * (1.0 - fx) + e10 * fx;
        let e1 = e01 * (1.0 - fx) + e11 * fx;
        Some(e0 * (1.0 - fy) + e1 * fy)
    }

    /// Central differences, one sample either side; one-sided at the edges.
    fn gradient(&self, x: f32, y: f32) -> Vec2 {
        let max_x = (self.nx - 1) as f32;
        let max_y = (self.ny - 1) as f32;
        let (x0, x1) = ((x - 1.0).max(0.0), (x + 1.0).min(max_x));
        let (y0, y1) = ((y - 1.0).max(0.0), (y + 1.0).min(max_y));
        let sample = |sx: f32, sy: f32| self.elevation(sx, sy).unwrap_or(0.0);

        let y_mid = y.clamp(0.0, max_y);
        let x_mid = x.clamp(0.0, max_x);
        let dz_dx = if x1 > x0 {
            (sample(x1, y_mid) - sample(x0, y_mid)) / (x1 - x0)
        } else {
            0.0
        };
        let dz_dy = if y1 > y0 {
            (sample(x_mid, y1) - sample(x_mid, y0)) / (y1 - y0)
        } else {
            0.0
        };
        Vec2::new(dz_dx, dz_dy)
    }

    fn current_region(&self) -> Region {
        self.region
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_flat_terrain() {
        let terrain = HeightField::flat(101, 101, 5.0);
        assert_eq!(terrain.elevation(25.0, 25.0), Some(5.0));
        assert_eq!(terrain.elevation(100.0, 100.0), Some(5.0));
        assert_eq!(terrain.current_region(), Region::new(0, 0, 100, 100));
        assert_eq!(terrain.gradient(50.0, 50.0), Vec2::zeros());
    }

    #[test]
    fn test_out_of_field_is_undefined() {
        let terrain = HeightField::flat(10, 10, 5.0);
        assert_eq!(terrain.elevation(-0.1, 5.0), None);
        assert_eq!(terrain.elevation(5.0, 9.5), None);
        assert_eq!(
            elevation_or_water(&terrain, Vec2::new(20.0, 20.0)),
            UNDEFINED_ELEVATION
        );
    }

    #[test]
    fn test_plane_gradient() {
        let terrain = HeightField::plane(50, 50, 10.0, 0.5, -0.25);
        let g = terrain.gradient(20.0, 20.0);
        assert_relative_eq!(g.x, 0.5, epsilon = 1e-4);
        assert_relative_eq!(g.y, -0.25, epsilon = 1e-4);

        let edge = terrain.gradient(0.0, 49.0);
        assert_relative_eq!(edge.x, 0.5, epsilon = 1e-4);
        assert_relative_eq!(edge.y, -0.25, epsilon = 1e-4);
    }

    #[test]
    fn test_interpolation() {
        let terrain = HeightField::plane(10, 10, 0.0, 1.0, 0.0);
        assert_relative_eq!(terrain.elevation(2.5, 3.0).unwrap_or(f32::NAN), 2.5, epsilon = 1e-5);
    }

    #[test]
    fn test_single_hill() {
        let terrain = HeightField::single_hill(101, 101, 0.0, 40.0, 20.0);
        let peak = terrain.elevation(50.0, 50.0).unwrap_or_default();
        assert_relative_eq!(peak, 40.0, epsilon = 1e-3);
        assert!(terrain.elevation(5.0, 5.0).unwrap_or_default() < 1.0);
        assert_relative_eq!(terrain.max_elevation(), 40.0, epsilon = 1e-3);
    }

    #[test]
    fn test_ridge_profile() {
        let terrain = HeightField::ridge(41, 41, 0.0, 30.0, 5.0);
        assert_relative_eq!(terrain.max_elevation(), 30.0, epsilon = 1e-4);
        assert_eq!(terrain.elevation(3.0, 20.0), terrain.elevation(37.0, 20.0));
        assert!(terrain.gradient(20.0, 25.0).y < 0.0);
        assert!(terrain.gradient(20.0, 15.0).y > 0.0);
    }

    #[test]
    fn test_pit_and_basin() {
        let terrain = HeightField::flat(101, 101, 0.0)
            .with_pit(Vec2::new(50.0, 40.0), 2.0, -5.0)
            .with_basin(Region::new(0, 90, 100, 10), -2.0);
        assert_eq!(terrain.elevation(50.0, 40.0), Some(-5.0));
        assert_eq!(terrain.elevation(50.0, 45.0), Some(0.0));
        assert_eq!(terrain.elevation(10.0, 95.0), Some(-2.0));
        assert_eq!(terrain.min_elevation(), -5.0);
    }

    #[test]
    fn test_borrowed_terrain_delegates() {
        let terrain = HeightField::flat(10, 10, 3.0);
        let borrowed = &terrain;
        assert_eq!(borrowed.elevation(1.0, 1.0), Some(3.0));
        assert_eq!(borrowed.current_region(), terrain.current_region());
        assert!(!borrowed.region_changed());
    }
}
