//! Pixel framebuffer types for software rendering.

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }
}

/// 2D RGBA pixel buffer, 4 bytes per pixel, row-major.
///
/// Owned by the caller of the shader; the shader writes RGB and forces the
/// alpha channel opaque. Presentation (terminal, window, file) is a separate
/// concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

/// Bytes per pixel.
pub const PIXEL_STRIDE: usize = 4;

impl PixelBuffer {
    /// Create an opaque black buffer.
    pub fn new(width: usize, height: usize) -> Self {
        Self::filled(width, height, Rgb::new(0, 0, 0))
    }

    /// Create a buffer filled with one color.
    pub fn filled(width: usize, height: usize, color: Rgb) -> Self {
        let mut data = vec![0u8; width * height * PIXEL_STRIDE];
        for px in data.chunks_exact_mut(PIXEL_STRIDE) {
            px[0] = color.r;
            px[1] = color.g;
            px[2] = color.b;
            px[3] = 255;
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Bytes per row.
    pub fn row_stride(&self) -> usize {
        self.width * PIXEL_STRIDE
    }

    #[inline(always)]
    fn offset(&self, x: usize, y: usize) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.width + x) * PIXEL_STRIDE)
    }

    /// Get the pixel at (x, y). Returns None if out of bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        self.offset(x, y)
            .map(|o| Rgb::new(self.data[o], self.data[o + 1], self.data[o + 2]))
    }

    /// Set the pixel at (x, y); out-of-bounds writes are ignored.
    pub fn put(&mut self, x: usize, y: usize, color: Rgb) {
        if let Some(o) = self.offset(x, y) {
            self.data[o] = color.r;
            self.data[o + 1] = color.g;
            self.data[o + 2] = color.b;
            self.data[o + 3] = 255;
        }
    }

    /// Fill an axis-aligned rectangle, clipped to the buffer.
    pub fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: Rgb) {
        for dy in 0..h {
            for dx in 0..w {
                self.put(x + dx, y + dy, color);
            }
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Copy another buffer's contents wholesale. Dimensions must match.
    pub fn copy_from(&mut self, other: &PixelBuffer) {
        debug_assert_eq!(self.width, other.width);
        debug_assert_eq!(self.height, other.height);
        self.data.copy_from_slice(&other.data);
    }
}
