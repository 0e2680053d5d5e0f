//! Frame orchestration: scene objects, emitters, and the per-frame pipeline.
//!
//! The engine drives the strict per-frame sequence (update -> emit -> cast
//! -> filter -> shade -> reset) over the core simulation and the render
//! layer. Stages are internally parallel but each stage joins before the
//! next begins.
//!
//! # Module Structure
//!
//! - [`object`]: the two independent capability traits (update/draw, emit)
//! - [`character`]: the reference emitter, a movable light-casting sprite
//! - [`scene`]: object collection plus the static cave layout builder
//! - [`pipeline`]: owns the grid, tracer, filter, shader, and buffers
//! - [`clock`]: frame delta/FPS tracking for the HUD

pub mod character;
pub mod clock;
pub mod object;
pub mod pipeline;
pub mod scene;

pub use character::Character;
pub use clock::{FrameClock, StageTiming};
pub use object::{GameObject, InputState, RayEmitter};
pub use pipeline::Pipeline;
pub use scene::{build_cave, Scene};
