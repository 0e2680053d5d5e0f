//! Filter module - tone mapping and temporal smoothing of cell energy
//!
//! Raw per-frame accumulation is noisy (the bounce jitter is stochastic and
//! emitters re-roll their spread every frame), so displaying it directly
//! flickers badly. This filter normalizes the raw energy, compresses it
//! logarithmically so the brightness ramp reads evenly, and exponentially
//! smooths it against the previous frame. The result is clamped to a small
//! ambient floor so unlit areas are never fully black.
//!
//! Runs after all rays for the frame have been cast and before the shader
//! consumes the field. Purely per-cell; no cross-cell dependency.

use gridlight_types::{AMBIENT_FLOOR, MAX_INTENSITY, SMOOTH_BLEND};

use crate::grid::Grid;

/// Temporally smoothed, tone-mapped per-cell display intensities.
///
/// Persists across frames; the smoothing state decays toward fresh values
/// over a handful of frames, which also self-corrects any glitched frame.
#[derive(Debug, Clone)]
pub struct IntensityFilter {
    rows: usize,
    cols: usize,
    smoothed: Vec<f32>,
}

impl IntensityFilter {
    /// Create a filter matching the grid's dimensions, zero baseline.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            smoothed: vec![0.0; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Update every cell from the grid's raw accumulation.
    ///
    /// Output values are always in `[AMBIENT_FLOOR, 1]`, including on the
    /// first frame.
    pub fn update(&mut self, grid: &Grid) {
        debug_assert_eq!(grid.len(), self.smoothed.len());

        // ln(100x + 1) / ln(100) maps [0,1] onto [0,1] with a fast initial
        // rise; precompute the divisor.
        let log_norm = 100.0f32.ln();

        for (prev, &raw) in self.smoothed.iter_mut().zip(grid.raw_values()) {
            let capped = (raw / MAX_INTENSITY).min(1.0);
            let compressed = (100.0 * capped + 1.0).ln() / log_norm;
            let smoothed = lerp(*prev, compressed, SMOOTH_BLEND);
            *prev = smoothed.max(AMBIENT_FLOOR);
        }
    }

    /// Smoothed intensity at (col, row).
    ///
    /// Callers index within bounds; the shader derives its pixel range from
    /// the same grid dimensions.
    #[inline(always)]
    pub fn at(&self, col: usize, row: usize) -> f32 {
        self.smoothed[row * self.cols + col]
    }

    /// The full field, row-major.
    pub fn values(&self) -> &[f32] {
        &self.smoothed
    }

    /// Overwrite one cell's smoothed value. Intended for tests and tools
    /// that need a known field to shade.
    pub fn set(&mut self, col: usize, row: usize, value: f32) {
        self.smoothed[row * self.cols + col] = value;
    }

    /// Fill the whole field with one value. Tests and tools.
    pub fn fill(&mut self, value: f32) {
        self.smoothed.fill(value);
    }
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + t * (to - from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_respects_floor_and_ceiling() {
        let mut grid = Grid::new(2, 2).unwrap();
        // One dark cell, one wildly over-saturated cell.
        grid.deposit(&[0.0, 1_000_000.0, 12.5, 25.0]);

        let mut filter = IntensityFilter::new(2, 2);
        filter.update(&grid);

        for &v in filter.values() {
            assert!((AMBIENT_FLOOR..=1.0).contains(&v), "out of range: {}", v);
        }
        // The dark cell sits exactly on the ambient floor.
        assert_eq!(filter.at(0, 0), AMBIENT_FLOOR);
    }

    #[test]
    fn test_range_holds_over_many_frames() {
        let mut grid = Grid::new(1, 3).unwrap();
        let mut filter = IntensityFilter::new(1, 3);

        for frame in 0..200 {
            grid.reset_intensities();
            // Alternate darkness and saturation to stress the smoothing.
            if frame % 2 == 0 {
                grid.deposit(&[0.0, 50.0, 25.0]);
            }
            filter.update(&grid);
            for &v in filter.values() {
                assert!((AMBIENT_FLOOR..=1.0).contains(&v));
            }
        }
    }

    #[test]
    fn test_smoothing_blends_toward_target() {
        let mut grid = Grid::new(1, 1).unwrap();
        grid.deposit(&[25.0]); // full saturation -> compressed value 1.0

        let mut filter = IntensityFilter::new(1, 1);
        filter.update(&grid);

        // First frame from zero baseline: lerp(0, 1, 0.25).
        assert!((filter.at(0, 0) - 0.25).abs() < 1e-6);

        filter.update(&grid);
        // Second frame: lerp(0.25, 1, 0.25).
        assert!((filter.at(0, 0) - 0.4375).abs() < 1e-6);
    }

    #[test]
    fn test_log_compression_lifts_low_energy() {
        let mut grid = Grid::new(1, 1).unwrap();
        // 10% of max intensity.
        grid.deposit(&[2.5]);

        let mut filter = IntensityFilter::new(1, 1);
        filter.update(&grid);

        // ln(11)/ln(100) ~ 0.5207: a tenth of the energy shows at half
        // brightness before smoothing, which is the point of the curve.
        let expected = 0.25 * (11.0f32.ln() / 100.0f32.ln());
        assert!((filter.at(0, 0) - expected).abs() < 1e-6);
    }
}
