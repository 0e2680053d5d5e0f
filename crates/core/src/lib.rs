//! Core lighting simulation - pure, deterministic where seeded, and testable
//!
//! This crate contains the grid model, the stochastic ray tracer, and the
//! intensity post-processor. It has no dependencies on terminal I/O or
//! presentation, so it can run headless (tests, benchmarks, offline tools).
//!
//! # Module Structure
//!
//! - [`grid`]: fixed-size cell grid with per-frame raw energy accumulators
//! - [`rng`]: small seeded LCG used for bounce pools and emitters
//! - [`tracer`]: DDA grid-traversal ray tracer with randomized diffuse bounce
//! - [`filter`]: tone mapping and temporal smoothing of raw cell energy
//!
//! # Frame contract
//!
//! Per frame, stages run strictly in sequence: rays are cast into the grid,
//! the filter consumes the raw accumulation, and the grid's raw values are
//! reset afterwards. Within [`tracer::RayTracer::cast`] the per-ray work is
//! parallel; the grid only sees the merged result after the join.

pub mod filter;
pub mod grid;
pub mod rng;
pub mod tracer;

pub use filter::IntensityFilter;
pub use grid::{Cell, Grid, GridError};
pub use rng::SimpleRng;
pub use tracer::{BouncePool, RayTracer};
