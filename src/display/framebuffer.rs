// Pixel Buffer - Stores RGBA pixel data for one screen or image
//
// Each emulated screen is 256×192 pixels. Pixels are stored row-major as
// [R, G, B, A] bytes, so a row is `width * 4` bytes long and the buffer can
// be handed to the video output without conversion.

use super::palette::Color;
use std::fmt;

/// Emulated screen width in pixels
pub const SCREEN_WIDTH: usize = 256;

/// Emulated screen height in pixels
pub const SCREEN_HEIGHT: usize = 192;

/// Total number of pixels on one screen
pub const SCREEN_SIZE: usize = SCREEN_WIDTH * SCREEN_HEIGHT;

/// Bytes per RGBA pixel
pub const BYTES_PER_PIXEL: usize = 4;

/// Rectangular grid of RGBA pixels
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    /// Pixel data as [R, G, B, A] bytes, row-major
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer filled with a single color
    ///
    /// # Arguments
    /// * `width` - Width in pixels
    /// * `height` - Height in pixels
    /// * `fill` - Initial color of every pixel
    pub fn new(width: usize, height: usize, fill: Color) -> Self {
        let data = fill.to_bytes().repeat(width * height);
        Self {
            width,
            height,
            data,
        }
    }

    /// Create a screen-sized buffer filled with a single color
    pub fn screen(fill: Color) -> Self {
        Self::new(SCREEN_WIDTH, SCREEN_HEIGHT, fill)
    }

    /// Wrap existing RGBA data
    ///
    /// # Panics
    /// Panics if `data` is not exactly `width * height * 4` bytes long
    pub fn from_rgba(width: usize, height: usize, data: Vec<u8>) -> Self {
        assert_eq!(
            data.len(),
            width * height * BYTES_PER_PIXEL,
            "RGBA data must be exactly {}×{} pixels",
            width,
            height
        );

        Self {
            width,
            height,
            data,
        }
    }

    /// Width in pixels
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Length of one row in bytes
    #[inline]
    pub fn stride(&self) -> usize {
        self.width * BYTES_PER_PIXEL
    }

    /// Check whether the buffer has the emulated screen's dimensions
    pub fn is_screen_sized(&self) -> bool {
        self.width == SCREEN_WIDTH && self.height == SCREEN_HEIGHT
    }

    #[inline]
    fn offset(&self, x: usize, y: usize) -> usize {
        y * self.stride() + x * BYTES_PER_PIXEL
    }

    /// Set a pixel at the given coordinates
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        assert!(x < self.width, "X coordinate {} out of bounds", x);
        assert!(y < self.height, "Y coordinate {} out of bounds", y);

        let offset = self.offset(x, y);
        self.data[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&color.to_bytes());
    }

    /// Get a pixel at the given coordinates
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> Color {
        assert!(x < self.width, "X coordinate {} out of bounds", x);
        assert!(y < self.height, "Y coordinate {} out of bounds", y);

        let offset = self.offset(x, y);
        let mut bytes = [0; BYTES_PER_PIXEL];
        bytes.copy_from_slice(&self.data[offset..offset + BYTES_PER_PIXEL]);
        Color::from_bytes(bytes)
    }

    /// Composite a color over the pixel at the given coordinates
    ///
    /// Coordinates outside the buffer are ignored, so callers can draw
    /// shapes that are partially off-screen.
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }

        let (x, y) = (x as usize, y as usize);
        let blended = color.blend_over(self.get_pixel(x, y));
        self.set_pixel(x, y, blended);
    }

    /// Fill the whole buffer with one color
    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for pixel in self.data.chunks_exact_mut(BYTES_PER_PIXEL) {
            pixel.copy_from_slice(&bytes);
        }
    }

    /// Alpha-composite an image onto this buffer
    ///
    /// The image's top-left corner lands at (`x`, `y`). Parts of the image
    /// that fall outside the buffer are clipped.
    pub fn draw_image(&mut self, image: &PixelBuffer, x: i32, y: i32) {
        for src_y in 0..image.height {
            for src_x in 0..image.width {
                self.blend_pixel(
                    x + src_x as i32,
                    y + src_y as i32,
                    image.get_pixel(src_x, src_y),
                );
            }
        }
    }

    /// Copy another buffer's pixels verbatim into this one
    ///
    /// # Arguments
    /// * `source` - Buffer to copy from
    /// * `x` - Destination column of the source's left edge
    /// * `y` - Destination row of the source's top edge
    ///
    /// # Panics
    /// Panics if the source doesn't fit at the given position
    pub fn copy_from(&mut self, source: &PixelBuffer, x: usize, y: usize) {
        assert!(
            x + source.width <= self.width && y + source.height <= self.height,
            "{}×{} buffer doesn't fit at ({}, {}) in a {}×{} buffer",
            source.width,
            source.height,
            x,
            y,
            self.width,
            self.height
        );

        for row in 0..source.height {
            let dst = self.offset(x, y + row);
            self.data[dst..dst + source.stride()].copy_from_slice(source.row(row));
        }
    }

    /// Get one row of pixels as raw bytes
    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.stride();
        &self.data[start..start + self.stride()]
    }

    /// Get the raw pixel data as RGBA bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get mutable access to the raw RGBA bytes
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }
}

impl fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Default for PixelBuffer {
    fn default() -> Self {
        Self::screen(Color::BLACK)
    }
}
