//! Pixel reconstruction layer: framebuffer + shadow shader.
//!
//! Takes the smoothed per-cell intensity field from `gridlight-core` and
//! reconstructs a full-resolution image, either as flat per-cell blocks or
//! as a bilinearly interpolated field blended with a background image.

pub mod fb;
pub mod shader;

pub use fb::{PixelBuffer, Rgb};
pub use shader::{AreaMap, ShaderError, ShadowShader};
