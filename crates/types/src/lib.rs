//! Shared constants and plain data types for the lighting pipeline.
//! This crate contains pure data types with no external dependencies.

/// Side length of one grid cell, in pixels/world units.
///
/// Frame buffers must have dimensions divisible by this value so that the
/// cell grid tiles them exactly.
pub const CELL_SIZE: usize = 8;

/// Maximum number of diffuse bounces before a ray is retired.
pub const RAY_DEPTH: u8 = 4;

/// Raw accumulated energy that maps to full brightness after tone mapping.
pub const MAX_INTENSITY: f32 = 25.0;

/// Temporal smoothing blend factor (weight of the new frame's value).
pub const SMOOTH_BLEND: f32 = 0.25;

/// Minimum smoothed intensity; unlit cells never go fully black.
pub const AMBIENT_FLOOR: f32 = 0.035;

/// Number of precomputed bounce jitter values shared by all workers.
pub const BOUNCE_POOL_SIZE: usize = 5000;

/// Bounce jitter amplitude; pool values are uniform in [-0.2, 0.2).
pub const BOUNCE_JITTER: f32 = 0.2;

/// Reference emitter parameters (rays per frame, initial energy, angular
/// half-spread in radians).
pub const EMITTER_RAYS: usize = 6000;
pub const EMITTER_INTENSITY: f32 = 0.02;
pub const EMITTER_SPREAD: f32 = 0.5;

/// A transient light path record.
///
/// Rays are created by emitters each frame, consumed by the ray tracer
/// within the same frame, and never persisted. The direction `(vx, vy)` is
/// not required to be unit length; bounce jitter deliberately denormalizes
/// it over time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Position in world units.
    pub x: f32,
    pub y: f32,
    /// Direction components.
    pub vx: f32,
    pub vy: f32,
    /// Energy carried; multiplicatively attenuated on each bounce.
    pub intensity: f32,
    /// Bounce count so far; bounded by [`RAY_DEPTH`].
    pub depth: u8,
}

impl Ray {
    pub fn new(x: f32, y: f32, vx: f32, vy: f32, intensity: f32) -> Self {
        Self {
            x,
            y,
            vx,
            vy,
            intensity,
            depth: 0,
        }
    }

    /// True once the ray has spent its full bounce budget.
    pub fn exhausted(&self) -> bool {
        self.depth >= RAY_DEPTH
    }
}

/// Shading reconstruction quality tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowQuality {
    /// Flat per-cell shading; fast, visibly blocky.
    Mesh,
    /// Bilinearly interpolated shading blended with the background.
    Smooth,
}

impl ShadowQuality {
    /// Switch to the other tier.
    pub fn toggle(self) -> Self {
        match self {
            ShadowQuality::Mesh => ShadowQuality::Smooth,
            ShadowQuality::Smooth => ShadowQuality::Mesh,
        }
    }

    /// Parse from string (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "mesh" => Some(ShadowQuality::Mesh),
            "smooth" => Some(ShadowQuality::Smooth),
            _ => None,
        }
    }

    /// Convert to lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ShadowQuality::Mesh => "mesh",
            ShadowQuality::Smooth => "smooth",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_new_starts_at_depth_zero() {
        let ray = Ray::new(10.0, 20.0, 1.0, 0.0, 0.02);
        assert_eq!(ray.depth, 0);
        assert!(!ray.exhausted());
    }

    #[test]
    fn test_ray_exhausted_at_max_depth() {
        let mut ray = Ray::new(0.0, 0.0, 1.0, 1.0, 1.0);
        ray.depth = RAY_DEPTH;
        assert!(ray.exhausted());
    }

    #[test]
    fn test_quality_toggle_round_trip() {
        assert_eq!(ShadowQuality::Mesh.toggle(), ShadowQuality::Smooth);
        assert_eq!(ShadowQuality::Smooth.toggle(), ShadowQuality::Mesh);
    }

    #[test]
    fn test_quality_string_round_trip() {
        for q in [ShadowQuality::Mesh, ShadowQuality::Smooth] {
            assert_eq!(ShadowQuality::from_str(q.as_str()), Some(q));
        }
        assert_eq!(ShadowQuality::from_str("ultra"), None);
    }
}
