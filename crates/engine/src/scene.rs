//! Scene: the object collection and the static cave layout.
//!
//! Solidity and emissivity are written into the grid exactly once at
//! startup; the tracer never mutates them. The layout is expressed in
//! fractions of the grid so any cell-aligned resolution reproduces the same
//! cave: a ceiling and floor, thick side walls, a horizontal shelf with a
//! central opening, and two pillars rising from the lower half.

use std::time::Duration;

use gridlight_core::Grid;
use gridlight_render::PixelBuffer;
use gridlight_types::Ray;

use crate::object::{GameObject, InputState};

/// Shelf band with the cave opening, as fractions of the grid height/width.
const SHELF_TOP: f32 = 0.30;
const SHELF_BOTTOM: f32 = 0.34;
const OPENING_LEFT: f32 = 0.2375;
const OPENING_RIGHT: f32 = 0.3625;

/// Pillars: top edge and horizontal extent, as fractions.
const PILLAR1_TOP: f32 = 0.433;
const PILLAR1_LEFT: f32 = 0.206;
const PILLAR1_RIGHT: f32 = 0.2375;
const PILLAR2_TOP: f32 = 0.45;
const PILLAR2_LEFT: f32 = 0.4875;
const PILLAR2_RIGHT: f32 = 0.51875;

/// Side walls are this many cells thick regardless of resolution.
const WALL_CELLS: i32 = 3;

/// Surface attenuation factors.
const WALL_EMISSIVITY: f32 = 0.8;
const SHELF_EMISSIVITY: f32 = 0.5;
const PILLAR_EMISSIVITY: f32 = 0.7;

/// Populate a grid with the cave layout. Scene-build time only.
pub fn build_cave(grid: &mut Grid) {
    let rows = grid.rows() as i32;
    let cols = grid.cols() as i32;

    let mut solid_cells = 0usize;

    for r in 0..rows {
        let rf = r as f32 / rows as f32;

        for c in 0..cols {
            let cf = c as f32 / cols as f32;

            let mut surface: Option<f32> = None;

            // Cave shelf, interrupted by the opening.
            if (SHELF_TOP..SHELF_BOTTOM).contains(&rf)
                && !(OPENING_LEFT..OPENING_RIGHT).contains(&cf)
            {
                surface = Some(SHELF_EMISSIVITY);
            }

            // Side walls.
            if c < WALL_CELLS || c >= cols - WALL_CELLS {
                surface = Some(WALL_EMISSIVITY);
            }

            // Ceiling and floor.
            if r == 0 || r == rows - 1 {
                surface = Some(WALL_EMISSIVITY);
            }

            // Pillars.
            if rf >= PILLAR1_TOP && (PILLAR1_LEFT..PILLAR1_RIGHT).contains(&cf) {
                surface = Some(PILLAR_EMISSIVITY);
            }
            if rf >= PILLAR2_TOP && (PILLAR2_LEFT..PILLAR2_RIGHT).contains(&cf) {
                surface = Some(PILLAR_EMISSIVITY);
            }

            if let Some(emissivity) = surface {
                grid.set_surface(c, r, true, emissivity);
                solid_cells += 1;
            }
        }
    }

    log::info!(
        "cave layout: {}x{} cells, {} solid",
        cols,
        rows,
        solid_cells
    );
}

/// The object collection. Objects update and draw every frame; those with
/// the emitter capability also contribute rays.
#[derive(Default)]
pub struct Scene {
    objects: Vec<Box<dyn GameObject>>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, object: Box<dyn GameObject>) {
        self.objects.push(object);
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn update(&mut self, dt: Duration, input: &InputState) {
        for object in &mut self.objects {
            object.update(dt, input);
        }
    }

    pub fn draw(&self, frame: &mut PixelBuffer) {
        for object in &self.objects {
            object.draw(frame);
        }
    }

    /// Gather this frame's rays from every emitting object.
    pub fn collect_rays(&mut self) -> Vec<Ray> {
        let mut rays = Vec::new();
        for object in &mut self.objects {
            if let Some(emitter) = object.emitter() {
                rays.extend(emitter.emit());
            }
        }
        rays
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::Character;

    #[test]
    fn test_fractional_layout_lands_on_reference_cells() {
        // At the reference 90x160 grid the fractional layout must land on
        // known absolute cell coordinates.
        let mut grid = Grid::new(90, 160).unwrap();
        build_cave(&mut grid);

        // Shelf rows 27..=30, solid outside columns 38..=57.
        assert!(grid.get(10, 27).unwrap().is_solid);
        assert!(!grid.get(10, 26).unwrap().is_solid);
        assert!(!grid.get(10, 31).unwrap().is_solid);
        assert!(!grid.get(38, 28).unwrap().is_solid);
        assert!(!grid.get(57, 28).unwrap().is_solid);
        assert!(grid.get(58, 28).unwrap().is_solid);
        assert_eq!(grid.get(10, 28).unwrap().emissivity, SHELF_EMISSIVITY);

        // Three-cell side walls.
        assert!(grid.get(0, 50).unwrap().is_solid);
        assert!(grid.get(2, 50).unwrap().is_solid);
        assert!(!grid.get(3, 50).unwrap().is_solid);
        assert!(grid.get(159, 50).unwrap().is_solid);
        assert!(grid.get(157, 50).unwrap().is_solid);
        assert!(!grid.get(156, 50).unwrap().is_solid);

        // Ceiling and floor.
        assert!(grid.get(80, 0).unwrap().is_solid);
        assert!(grid.get(80, 89).unwrap().is_solid);
        assert!(!grid.get(80, 1).unwrap().is_solid);

        // Pillar 1: columns 33..=37 from row 39 down.
        assert!(grid.get(33, 39).unwrap().is_solid);
        assert!(grid.get(37, 80).unwrap().is_solid);
        assert!(!grid.get(33, 38).unwrap().is_solid);
        assert!(!grid.get(38, 50).unwrap().is_solid);
        assert_eq!(grid.get(35, 60).unwrap().emissivity, PILLAR_EMISSIVITY);

        // Pillar 2: columns 78..=82 from row 41 down.
        assert!(grid.get(78, 41).unwrap().is_solid);
        assert!(grid.get(82, 70).unwrap().is_solid);
        assert!(!grid.get(78, 40).unwrap().is_solid);
        assert!(!grid.get(83, 60).unwrap().is_solid);
    }

    #[test]
    fn test_scene_collects_rays_from_emitters() {
        let mut scene = Scene::new();
        scene.add(Box::new(Character::new(100.0, 100.0, (640.0, 360.0), 3)));
        scene.add(Box::new(Character::new(300.0, 100.0, (640.0, 360.0), 4)));

        let rays = scene.collect_rays();
        assert_eq!(rays.len(), 2 * gridlight_types::EMITTER_RAYS);
    }
}
