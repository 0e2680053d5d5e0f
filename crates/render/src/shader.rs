//! Shadow shader - reconstructs a pixel image from the smoothed cell grid
//!
//! Two quality tiers share one entry point:
//!
//! - **Mesh** writes each cell's intensity as a flat grayscale block. Cheap,
//!   visibly blocky, useful as a fallback and for debugging the field.
//! - **Smooth** bilinearly interpolates between the four cells nearest each
//!   pixel using a precomputed area-weight table, then blends the result
//!   with a background image: a multiply toward black below half intensity,
//!   a screen toward white above it. The split gives bright areas a bloom
//!   feel instead of washing the whole image out.
//!
//! Both tiers skip a one-cell border so neighbor lookups never leave the
//! field. Rows are shaded in parallel; each row writes a disjoint slice of
//! the frame and reads only shared immutable inputs.

use rayon::prelude::*;

use gridlight_core::IntensityFilter;
use gridlight_types::{ShadowQuality, CELL_SIZE};

use crate::fb::{PixelBuffer, PIXEL_STRIDE};

/// Configuration errors caught at the shader boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderError {
    /// Frame size does not equal the intensity field size times `CELL_SIZE`.
    FieldMismatch {
        frame: (usize, usize),
        field: (usize, usize),
    },
    /// Background size differs from the frame size.
    BackgroundMismatch {
        frame: (usize, usize),
        background: (usize, usize),
    },
}

impl std::fmt::Display for ShaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderError::FieldMismatch { frame, field } => write!(
                f,
                "frame {}x{} does not tile the {}x{} intensity field with cell size {}",
                frame.0, frame.1, field.0, field.1, CELL_SIZE
            ),
            ShaderError::BackgroundMismatch { frame, background } => write!(
                f,
                "background {}x{} does not match frame {}x{}",
                background.0, background.1, frame.0, frame.1
            ),
        }
    }
}

impl std::error::Error for ShaderError {}

/// Precomputed bilinear weight table.
///
/// One `[w0, w1, w2, w3]` entry per sub-cell pixel offset, covering the
/// four neighbors in reading order (top-left, top-right, bottom-left,
/// bottom-right of the selected quadrant). Built once, immutable.
#[derive(Debug, Clone)]
pub struct AreaMap {
    weights: Vec<[f32; 4]>,
}

impl AreaMap {
    pub fn build() -> Self {
        let mut weights = vec![[0.0f32; 4]; CELL_SIZE * CELL_SIZE];

        for y in 0..CELL_SIZE {
            let y_factor = y as f32 / CELL_SIZE as f32;

            for x in 0..CELL_SIZE {
                let x_factor = x as f32 / CELL_SIZE as f32;

                let (x_a1, x_a2) = if x_factor > 0.5 {
                    let a1 = 1.5 - x_factor;
                    (a1, 1.0 - a1)
                } else {
                    let a2 = x_factor + 0.5;
                    (1.0 - a2, a2)
                };

                let (y_a1, y_a2) = if y_factor < 0.5 {
                    let a2 = y_factor + 0.5;
                    (1.0 - a2, a2)
                } else {
                    let a1 = 1.5 - y_factor;
                    (a1, 1.0 - a1)
                };

                weights[y * CELL_SIZE + x] =
                    [x_a1 * y_a1, x_a2 * y_a1, x_a1 * y_a2, x_a2 * y_a2];
            }
        }

        Self { weights }
    }

    /// Weights for the sub-cell offset (x, y), both in `0..CELL_SIZE`.
    #[inline(always)]
    pub fn at(&self, x: usize, y: usize) -> [f32; 4] {
        self.weights[y * CELL_SIZE + x]
    }
}

/// The reconstruction shader. Holds only the immutable area-weight table.
#[derive(Debug, Clone)]
pub struct ShadowShader {
    area: AreaMap,
}

impl Default for ShadowShader {
    fn default() -> Self {
        Self::new()
    }
}

impl ShadowShader {
    pub fn new() -> Self {
        Self {
            area: AreaMap::build(),
        }
    }

    /// Paint the frame from the smoothed intensity field.
    ///
    /// `background` is only read in smooth mode but is validated in both so
    /// a misconfigured pipeline fails on its first frame, not on a quality
    /// toggle mid-run.
    pub fn render(
        &self,
        quality: ShadowQuality,
        frame: &mut PixelBuffer,
        background: &PixelBuffer,
        intensities: &IntensityFilter,
    ) -> Result<(), ShaderError> {
        let expected = (
            intensities.cols() * CELL_SIZE,
            intensities.rows() * CELL_SIZE,
        );
        if (frame.width(), frame.height()) != expected {
            return Err(ShaderError::FieldMismatch {
                frame: (frame.width(), frame.height()),
                field: (intensities.cols(), intensities.rows()),
            });
        }
        if (background.width(), background.height()) != (frame.width(), frame.height()) {
            return Err(ShaderError::BackgroundMismatch {
                frame: (frame.width(), frame.height()),
                background: (background.width(), background.height()),
            });
        }

        match quality {
            ShadowQuality::Mesh => self.mesh_shade(frame, intensities),
            ShadowQuality::Smooth => self.smooth_shade(frame, background, intensities),
        }
        Ok(())
    }

    /// Flat per-cell grayscale; one lookup per pixel.
    fn mesh_shade(&self, frame: &mut PixelBuffer, intensities: &IntensityFilter) {
        let width = frame.width();
        let height = frame.height();
        let stride = frame.row_stride();
        let rows = height.saturating_sub(2 * CELL_SIZE);

        frame
            .data_mut()
            .par_chunks_mut(stride)
            .enumerate()
            .skip(CELL_SIZE)
            .take(rows)
            .for_each(|(y, row)| {
                let cell_y = y / CELL_SIZE;

                for x in CELL_SIZE..width.saturating_sub(CELL_SIZE) {
                    let cell_x = x / CELL_SIZE;
                    let v = (255.0 * intensities.at(cell_x, cell_y)) as u8;

                    let o = x * PIXEL_STRIDE;
                    row[o] = v;
                    row[o + 1] = v;
                    row[o + 2] = v;
                    row[o + 3] = 255;
                }
            });
    }

    /// Bilinear interpolation plus the two-branch background blend.
    fn smooth_shade(
        &self,
        frame: &mut PixelBuffer,
        background: &PixelBuffer,
        intensities: &IntensityFilter,
    ) {
        let width = frame.width();
        let height = frame.height();
        let stride = frame.row_stride();
        let rows = height.saturating_sub(2 * CELL_SIZE);
        let half_cell = CELL_SIZE / 2;
        let bg = background.data();

        frame
            .data_mut()
            .par_chunks_mut(stride)
            .enumerate()
            .skip(CELL_SIZE)
            .take(rows)
            .for_each(|(y, row)| {
                let bg_row = &bg[y * stride..(y + 1) * stride];

                let cell_y = y / CELL_SIZE;
                let y_index = y % CELL_SIZE;
                // Upper half of a cell interpolates toward the row above,
                // lower half toward the row below.
                let (cy0, cy1) = if y_index > half_cell {
                    (cell_y, cell_y + 1)
                } else {
                    (cell_y - 1, cell_y)
                };

                for x in CELL_SIZE..width.saturating_sub(CELL_SIZE) {
                    let cell_x = x / CELL_SIZE;
                    let x_index = x % CELL_SIZE;
                    let (cx0, cx1) = if x_index > half_cell {
                        (cell_x, cell_x + 1)
                    } else {
                        (cell_x - 1, cell_x)
                    };

                    let w = self.area.at(x_index, y_index);
                    let intensity = intensities.at(cx0, cy0) * w[0]
                        + intensities.at(cx1, cy0) * w[1]
                        + intensities.at(cx0, cy1) * w[2]
                        + intensities.at(cx1, cy1) * w[3];

                    let o = x * PIXEL_STRIDE;
                    let a_r = bg_row[o] as f32 / 255.0;
                    let a_g = bg_row[o + 1] as f32 / 255.0;
                    let a_b = bg_row[o + 2] as f32 / 255.0;

                    if intensity > 0.5 {
                        // Screen toward white as intensity approaches 1.
                        let lift = 1.0 - 2.0 * (intensity - 0.5);
                        row[o] = (254.0 * (1.0 - (1.0 - a_r) * lift)) as u8;
                        row[o + 1] = (254.0 * (1.0 - (1.0 - a_g) * lift)) as u8;
                        row[o + 2] = (254.0 * (1.0 - (1.0 - a_b) * lift)) as u8;
                    } else {
                        // Multiply toward black below half intensity.
                        row[o] = (255.0 * (2.0 * a_r * intensity)) as u8;
                        row[o + 1] = (255.0 * (2.0 * a_g * intensity)) as u8;
                        row[o + 2] = (255.0 * (2.0 * a_b * intensity)) as u8;
                    }
                    row[o + 3] = 255;
                }
            });
    }
}
