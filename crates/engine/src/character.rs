//! The reference emitter: a movable character that floods the scene with
//! low-energy rays in a forward cone.

use std::time::Duration;

use gridlight_core::SimpleRng;
use gridlight_render::{PixelBuffer, Rgb};
use gridlight_types::{Ray, CELL_SIZE, EMITTER_INTENSITY, EMITTER_RAYS, EMITTER_SPREAD};

use crate::object::{GameObject, InputState, RayEmitter};

/// Movement speed in world units per second.
const MOVE_SPEED: f32 = 600.0;

/// Sprite size in pixels.
const SPRITE_W: usize = 16;
const SPRITE_H: usize = 40;

/// A player-movable light source.
///
/// Rays leave from one cell ahead of the sprite, jittered across a short
/// vertical band, with a small random angular spread. Energy per ray is
/// deliberately tiny; the visual brightness comes from the sheer count.
pub struct Character {
    x: f32,
    y: f32,
    bounds: (f32, f32),
    rng: SimpleRng,
}

impl Character {
    /// `bounds` is the (width, height) of the world the character may roam.
    pub fn new(x: f32, y: f32, bounds: (f32, f32), seed: u32) -> Self {
        Self {
            x,
            y,
            bounds,
            rng: SimpleRng::new(seed),
        }
    }

    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }
}

impl RayEmitter for Character {
    fn emit(&mut self) -> Vec<Ray> {
        let cell = CELL_SIZE as f32;
        let mut rays = Vec::with_capacity(EMITTER_RAYS);

        for _ in 0..EMITTER_RAYS {
            let angle = (self.rng.next_f32() - 0.5) * 2.0 * EMITTER_SPREAD;
            // Origin jitters over a few cells of the sprite's front edge.
            let y_offset = (1 + self.rng.next_range(5)) as f32 * cell;

            rays.push(Ray::new(
                self.x + cell,
                self.y + y_offset,
                angle.cos(),
                angle.sin(),
                EMITTER_INTENSITY,
            ));
        }

        rays
    }
}

impl GameObject for Character {
    fn update(&mut self, dt: Duration, input: &InputState) {
        let step = MOVE_SPEED * dt.as_secs_f32();
        self.x += input.move_x * step;
        self.y += input.move_y * step;

        // Keep the sprite (and its ray origins) inside the world.
        let margin = 2.0 * CELL_SIZE as f32;
        self.x = self.x.clamp(margin, self.bounds.0 - SPRITE_W as f32 - margin);
        self.y = self.y.clamp(margin, self.bounds.1 - SPRITE_H as f32 - margin);
    }

    fn draw(&self, frame: &mut PixelBuffer) {
        let x = self.x as usize;
        let y = self.y as usize;
        frame.fill_rect(x, y, SPRITE_W, SPRITE_H, Rgb::new(235, 220, 160));
        // Eye strip so the facing direction reads on screen.
        frame.fill_rect(x + SPRITE_W - 4, y + 6, 3, 5, Rgb::new(40, 40, 60));
    }

    fn emitter(&mut self) -> Option<&mut dyn RayEmitter> {
        Some(self)
    }
}
