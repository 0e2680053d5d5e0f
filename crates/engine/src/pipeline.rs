//! The per-frame pipeline: owns every stage and runs them in order.
//!
//! Stage order is fixed: update objects -> collect rays -> cast -> filter
//! -> repaint background -> shade -> reset accumulators. The tracer and
//! shader parallelize internally; rayon's parallel iterators join before
//! returning, so no stage ever observes a half-finished predecessor.

use std::time::Instant;

use anyhow::{Context, Result};

use gridlight_core::{Grid, IntensityFilter, RayTracer, SimpleRng};
use gridlight_render::{PixelBuffer, Rgb, ShadowShader};
use gridlight_types::{ShadowQuality, CELL_SIZE};

use crate::clock::{StageTiming, StageTimings};
use crate::object::InputState;
use crate::scene::{build_cave, Scene};

/// Base rock tone of the procedural backdrop.
const BACKDROP_BASE: u8 = 96;
/// Noise amplitude added per pixel.
const BACKDROP_NOISE: u8 = 64;

pub struct Pipeline {
    grid: Grid,
    tracer: RayTracer,
    filter: IntensityFilter,
    shader: ShadowShader,
    frame: PixelBuffer,
    background: PixelBuffer,
    backdrop: PixelBuffer,
    quality: ShadowQuality,
    rays_last_frame: u64,
    stage_timings: StageTimings,
}

impl Pipeline {
    /// Build a pipeline for a `width x height` pixel world.
    ///
    /// Fails fast if the resolution does not tile into cells; that is a
    /// configuration error, not something to limp through.
    pub fn new(width: usize, height: usize, seed: u32) -> Result<Self> {
        let mut grid = Grid::for_image(width, height)
            .with_context(|| format!("invalid world size {}x{}", width, height))?;
        build_cave(&mut grid);

        let backdrop = paint_backdrop(width, height, &grid, seed);
        let filter = IntensityFilter::new(grid.rows(), grid.cols());

        log::info!(
            "pipeline ready: {}x{} px, {}x{} cells",
            width,
            height,
            grid.cols(),
            grid.rows()
        );

        Ok(Self {
            grid,
            tracer: RayTracer::new(seed),
            filter,
            shader: ShadowShader::new(),
            frame: PixelBuffer::new(width, height),
            background: PixelBuffer::new(width, height),
            backdrop,
            quality: ShadowQuality::Smooth,
            rays_last_frame: 0,
            stage_timings: StageTimings::new(),
        })
    }

    /// Run one full frame.
    pub fn advance(&mut self, scene: &mut Scene, input: &InputState, dt: std::time::Duration) -> Result<()> {
        self.stage_timings.clear();

        scene.update(dt, input);

        let trace_start = Instant::now();
        let rays = scene.collect_rays();
        self.rays_last_frame = rays.len() as u64;
        self.tracer.cast(&mut self.grid, rays);
        self.record("ray trace", trace_start);

        self.filter.update(&self.grid);

        let shade_start = Instant::now();
        self.background.copy_from(&self.backdrop);
        scene.draw(&mut self.background);
        self.shader
            .render(self.quality, &mut self.frame, &self.background, &self.filter)
            .context("shading failed")?;
        self.record("shade", shade_start);

        self.grid.reset_intensities();
        Ok(())
    }

    fn record(&mut self, label: &'static str, start: Instant) {
        // Silently drop timings past the bounded capacity.
        let _ = self.stage_timings.try_push(StageTiming {
            label,
            duration: start.elapsed(),
        });
    }

    /// The most recent shaded frame.
    pub fn frame(&self) -> &PixelBuffer {
        &self.frame
    }

    pub fn quality(&self) -> ShadowQuality {
        self.quality
    }

    pub fn set_quality(&mut self, quality: ShadowQuality) {
        self.quality = quality;
    }

    pub fn toggle_quality(&mut self) {
        self.quality = self.quality.toggle();
    }

    /// Rays emitted into the most recent frame.
    pub fn rays_last_frame(&self) -> u64 {
        self.rays_last_frame
    }

    /// Cumulative rays processed since startup (tracer diagnostics).
    pub fn rays_cast(&self) -> u64 {
        self.tracer.rays_cast()
    }

    /// Stage timings recorded for the most recent frame.
    pub fn stage_timings(&self) -> &[StageTiming] {
        &self.stage_timings
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn filter(&self) -> &IntensityFilter {
        &self.filter
    }
}

/// Procedural stone backdrop: hash noise over a base tone, with solid cells
/// darkened so the geometry reads even before any light lands on it.
fn paint_backdrop(width: usize, height: usize, grid: &Grid, seed: u32) -> PixelBuffer {
    let mut rng = SimpleRng::new(seed ^ 0x9e37_79b9);
    let mut backdrop = PixelBuffer::new(width, height);

    for y in 0..height {
        for x in 0..width {
            let noise = rng.next_range(BACKDROP_NOISE as u32) as u8;
            let tone = BACKDROP_BASE.saturating_add(noise);

            let cell = grid.get((x / CELL_SIZE) as i32, (y / CELL_SIZE) as i32);
            let color = match cell {
                Some(c) if c.is_solid => {
                    // Rock faces sit darker and slightly warm.
                    Rgb::new(tone / 3 + 10, tone / 4 + 8, tone / 5 + 6)
                }
                _ => Rgb::new(tone / 2 + 20, tone / 2 + 24, tone / 2 + 32),
            };
            backdrop.put(x, y, color);
        }
    }

    backdrop
}
