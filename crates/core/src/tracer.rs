//! Tracer module - DDA grid traversal with stochastic diffuse bounce
//!
//! Rays march through the cell grid one boundary crossing at a time,
//! depositing their current intensity into every open cell they pass. A
//! solid cell attenuates the ray by the cell's emissivity, reflects the hit
//! axis, and perturbs both direction components with jitter drawn from a
//! shared precomputed pool.
//!
//! The DDA step increments are intentionally scaled by the grid's
//! dimensions rather than by the cell size. This is non-standard but it is
//! what gives the bounce field its visual character; do not "correct" it.
//!
//! Concurrency: rays are independent, so [`RayTracer::cast`] fans them out
//! across the rayon pool. Each worker accumulates into a private buffer and
//! the buffers are reduced into the grid after the join, so there are no
//! racy float writes. The jitter pool cursor is a relaxed atomic: workers
//! interleave their draws, which is fine because the pool is i.i.d. noise.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use rayon::prelude::*;

use gridlight_types::{Ray, BOUNCE_JITTER, BOUNCE_POOL_SIZE, CELL_SIZE, RAY_DEPTH};

use crate::grid::Grid;
use crate::rng::SimpleRng;

/// Precomputed bounce jitter, consumed cyclically by all workers.
#[derive(Debug)]
pub struct BouncePool {
    factors: Vec<f32>,
    cursor: AtomicUsize,
}

impl BouncePool {
    /// Fill the pool from a seed. Values are uniform in
    /// [-BOUNCE_JITTER, BOUNCE_JITTER).
    pub fn new(seed: u32) -> Self {
        let mut rng = SimpleRng::new(seed);
        let factors = (0..BOUNCE_POOL_SIZE)
            .map(|_| rng.next_jitter(BOUNCE_JITTER))
            .collect();
        Self {
            factors,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Next jitter value, wrapping around the pool.
    #[inline]
    pub fn next(&self) -> f32 {
        let i = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.factors[i % self.factors.len()]
    }
}

/// The ray tracer. Stateless per frame apart from the jitter pool cursor
/// and the diagnostics counter, so one instance serves the whole run.
#[derive(Debug)]
pub struct RayTracer {
    pool: BouncePool,
    rays_cast: AtomicU64,
}

impl RayTracer {
    pub fn new(seed: u32) -> Self {
        Self {
            pool: BouncePool::new(seed),
            rays_cast: AtomicU64::new(0),
        }
    }

    /// Cast a batch of rays into the grid in parallel.
    ///
    /// Side effects: open cells traversed by a ray gain its current
    /// intensity in their raw accumulators, and the cumulative rays-cast
    /// counter advances by the batch size. Rays are consumed.
    pub fn cast(&self, grid: &mut Grid, rays: Vec<Ray>) {
        self.rays_cast.fetch_add(rays.len() as u64, Ordering::Relaxed);

        let len = grid.len();
        let scene: &Grid = grid;
        let merged = rays
            .into_par_iter()
            .fold(
                || vec![0.0f32; len],
                |mut acc, ray| {
                    self.trace(scene, ray, &mut acc);
                    acc
                },
            )
            .reduce(
                || vec![0.0f32; len],
                |mut a, b| {
                    for (dst, src) in a.iter_mut().zip(&b) {
                        *dst += src;
                    }
                    a
                },
            );

        grid.deposit(&merged);
    }

    /// Single-threaded cast with the same semantics as [`RayTracer::cast`].
    ///
    /// With a fixed pool seed this is fully deterministic: jitter values are
    /// consumed in ray order with no worker interleaving.
    pub fn cast_serial(&self, grid: &mut Grid, rays: Vec<Ray>) {
        self.rays_cast.fetch_add(rays.len() as u64, Ordering::Relaxed);

        let mut acc = vec![0.0f32; grid.len()];
        for ray in rays {
            self.trace(grid, ray, &mut acc);
        }
        grid.deposit(&acc);
    }

    /// Cumulative number of rays processed since construction.
    pub fn rays_cast(&self) -> u64 {
        self.rays_cast.load(Ordering::Relaxed)
    }

    /// Read and reset the counter; used for per-frame rate reporting.
    pub fn take_rays_cast(&self) -> u64 {
        self.rays_cast.swap(0, Ordering::Relaxed)
    }

    /// March one ray to exhaustion, accumulating into `raw`.
    ///
    /// `raw` has one entry per grid cell and belongs to the calling worker.
    fn trace(&self, grid: &Grid, mut ray: Ray, raw: &mut [f32]) {
        let cell = CELL_SIZE as f32;
        let cols = grid.cols() as i32;
        let rows = grid.rows() as i32;

        while ray.depth < RAY_DEPTH {
            if ray.vx == 0.0 && ray.vy == 0.0 {
                // Degenerate direction: the ray can never cross a boundary.
                break;
            }

            let mut cell_x = (ray.x / cell) as i32;
            let mut cell_y = (ray.y / cell) as i32;

            // DDA initialization. The step increments scale with the grid
            // dimensions, not the cell size (see module docs).
            let (dtx, mut tx) = if ray.vx == 0.0 {
                (f32::INFINITY, f32::INFINITY)
            } else if ray.vx < 0.0 {
                (
                    -(grid.cols() as f32) / ray.vx,
                    (cell_x as f32 * cell - ray.x) / ray.vx,
                )
            } else {
                (
                    grid.cols() as f32 / ray.vx,
                    ((cell_x + 1) as f32 * cell - ray.x) / ray.vx,
                )
            };

            let (dty, mut ty) = if ray.vy == 0.0 {
                (f32::INFINITY, f32::INFINITY)
            } else if ray.vy < 0.0 {
                (
                    -(grid.rows() as f32) / ray.vy,
                    (cell_y as f32 * cell - ray.y) / ray.vy,
                )
            } else {
                (
                    grid.rows() as f32 / ray.vy,
                    ((cell_y + 1) as f32 * cell - ray.y) / ray.vy,
                )
            };

            tx += dtx;
            ty += dty;

            // Walk cell boundaries until the ray bounces or leaves the grid.
            loop {
                let hit_horizontal;

                if tx < ty {
                    tx += dtx;
                    cell_x += if ray.vx < 0.0 { -1 } else { 1 };
                    hit_horizontal = true;
                } else {
                    ty += dty;
                    cell_y += if ray.vy < 0.0 { -1 } else { 1 };
                    hit_horizontal = false;
                }

                if cell_x < 0 || cell_x >= cols || cell_y < 0 || cell_y >= rows {
                    // Out of bounds: abandon the ray without touching cells.
                    ray.depth = RAY_DEPTH;
                    break;
                }

                let idx = (cell_y as usize) * grid.cols() + cell_x as usize;
                let current = grid.cell_at(idx);

                if current.is_solid {
                    // Snap to the cell corner, attenuate, and reflect the
                    // hit axis with fresh jitter on both components.
                    ray.x = cell_x as f32 * cell;
                    ray.y = cell_y as f32 * cell;

                    ray.intensity *= current.emissivity;
                    ray.depth += 1;

                    if hit_horizontal {
                        ray.vx = -ray.vx + self.pool.next();
                        ray.vy += self.pool.next();

                        // Nudge off the surface to avoid an immediate re-hit.
                        if ray.vx < 0.0 {
                            ray.x -= cell;
                        } else {
                            ray.x += cell;
                        }
                    } else {
                        ray.vx += self.pool.next();
                        ray.vy = -ray.vy + self.pool.next();

                        if ray.vy < 0.0 {
                            ray.y -= cell;
                        } else {
                            ray.y += cell;
                        }
                    }

                    break;
                }

                raw[idx] += ray.intensity;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_grid(rows: usize, cols: usize) -> Grid {
        Grid::new(rows, cols).unwrap()
    }

    #[test]
    fn test_pool_wraps_around() {
        let pool = BouncePool::new(1);
        for _ in 0..(BOUNCE_POOL_SIZE * 2 + 3) {
            let v = pool.next();
            assert!((-BOUNCE_JITTER..BOUNCE_JITTER).contains(&v));
        }
    }

    #[test]
    fn test_ray_deposits_along_path() {
        let tracer = RayTracer::new(42);
        let mut grid = open_grid(4, 8);

        // A ray travelling straight right through an open grid lights every
        // cell it crosses and then exits.
        let ray = Ray::new(4.0, 12.0, 1.0, 0.0, 0.5);
        tracer.cast_serial(&mut grid, vec![ray]);

        for col in 1..8 {
            assert_eq!(grid.raw_intensity(col, 1), Some(0.5), "col {}", col);
        }
        // Cells off the path stay dark.
        assert_eq!(grid.raw_intensity(3, 0), Some(0.0));
        assert_eq!(grid.raw_intensity(3, 2), Some(0.0));
    }

    #[test]
    fn test_out_of_bounds_terminates_without_mutation() {
        let tracer = RayTracer::new(42);
        let mut grid = open_grid(4, 4);

        // Starts in the corner cell heading up-left; first step leaves the
        // grid, so nothing accumulates.
        let ray = Ray::new(2.0, 2.0, -1.0, -1.0, 1.0);
        tracer.cast_serial(&mut grid, vec![ray]);

        assert!(grid.raw_values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_zero_direction_ray_is_dropped() {
        let tracer = RayTracer::new(42);
        let mut grid = open_grid(4, 4);

        tracer.cast_serial(&mut grid, vec![Ray::new(16.0, 16.0, 0.0, 0.0, 1.0)]);
        assert!(grid.raw_values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_axis_aligned_ray_with_zero_component() {
        // vy == 0 must mean "never crosses a row boundary", not a crash.
        let tracer = RayTracer::new(42);
        let mut grid = open_grid(3, 6);

        tracer.cast_serial(&mut grid, vec![Ray::new(4.0, 12.0, 2.5, 0.0, 0.25)]);
        assert_eq!(grid.raw_intensity(3, 1), Some(0.25));
        assert_eq!(grid.raw_intensity(3, 0), Some(0.0));
        assert_eq!(grid.raw_intensity(3, 2), Some(0.0));
    }

    #[test]
    fn test_rays_cast_counter_accumulates() {
        let tracer = RayTracer::new(1);
        let mut grid = open_grid(4, 4);

        tracer.cast_serial(&mut grid, vec![Ray::new(2.0, 2.0, 1.0, 0.0, 0.1); 10]);
        tracer.cast(&mut grid, vec![Ray::new(2.0, 2.0, 1.0, 0.0, 0.1); 5]);
        assert_eq!(tracer.rays_cast(), 15);

        assert_eq!(tracer.take_rays_cast(), 15);
        assert_eq!(tracer.rays_cast(), 0);
    }
}
