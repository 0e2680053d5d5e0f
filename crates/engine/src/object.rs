//! Capability traits for scene objects.
//!
//! "Casts rays" and "updates/draws" are independent capabilities: a light
//! fixture emits without moving, a prop moves without emitting, the player
//! does both. Objects opt into each trait separately instead of inheriting
//! from one base; the scene queries the emitter capability per object.

use std::time::Duration;

use gridlight_render::PixelBuffer;
use gridlight_types::Ray;

/// Per-frame movement intent, normalized to [-1, 1] per axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputState {
    pub move_x: f32,
    pub move_y: f32,
}

/// Anything that produces rays for the tracer.
pub trait RayEmitter {
    /// Produce this frame's rays. Called once per frame; the returned rays
    /// are consumed by the tracer and never persisted.
    fn emit(&mut self) -> Vec<Ray>;
}

/// Anything that lives in the scene: moves with input and paints itself
/// into the background before shading.
pub trait GameObject {
    fn update(&mut self, dt: Duration, input: &InputState);

    fn draw(&self, frame: &mut PixelBuffer);

    /// The object's emitter capability, if it has one.
    fn emitter(&mut self) -> Option<&mut dyn RayEmitter> {
        None
    }
}
