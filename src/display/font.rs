// Font - Scalable font loading, text measurement and text drawing
//
// Fonts are parsed from in-memory TrueType data and bound to a fixed pixel
// height when loaded. Drawing goes through a GlyphContext, which borrows a
// font and a target buffer for the length of one drawing pass.
//
// Text may contain '\n'; each line starts one line height below the last.

use super::asset::AssetError;
use super::framebuffer::PixelBuffer;
use super::palette::Color;
use ab_glyph::{point, Font as _, FontArc, GlyphId, PxScale, ScaleFont};

/// Size of a block of text in pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextSize {
    pub width: u32,
    pub height: u32,
}

/// A scalable font loaded at a fixed pixel height
#[derive(Clone)]
pub struct Font {
    font: FontArc,
    scale: PxScale,
    pixel_height: u32,
}

impl Font {
    /// Load a font from TrueType/OpenType data
    ///
    /// # Arguments
    /// * `data` - Font file contents
    /// * `pixel_height` - Height to render glyphs at, in pixels
    ///
    /// # Returns
    /// Result containing the font or an error if the data isn't a valid font
    pub fn from_memory(data: &'static [u8], pixel_height: u32) -> Result<Self, AssetError> {
        let font = FontArc::try_from_slice(data)?;

        Ok(Self {
            font,
            scale: PxScale::from(pixel_height as f32),
            pixel_height,
        })
    }

    /// Height glyphs are rendered at
    pub fn pixel_height(&self) -> u32 {
        self.pixel_height
    }

    /// Distance between the baselines of two consecutive lines
    pub fn line_height(&self) -> f32 {
        let scaled = self.font.as_scaled(self.scale);
        scaled.height() + scaled.line_gap()
    }

    /// Horizontal advance of a single line of text, kerning included
    fn line_advance(&self, line: &str) -> f32 {
        let scaled = self.font.as_scaled(self.scale);
        let mut advance = 0.0;
        let mut previous: Option<GlyphId> = None;

        for c in line.chars() {
            let id = scaled.glyph_id(c);
            if let Some(previous) = previous {
                advance += scaled.kern(previous, id);
            }
            advance += scaled.h_advance(id);
            previous = Some(id);
        }

        advance
    }

    /// Measure a block of text
    ///
    /// The width is that of the widest line. The height spans from the top
    /// of the first line to the bottom of the last.
    ///
    /// # Arguments
    /// * `text` - Text to measure, possibly with '\n' line breaks
    ///
    /// # Returns
    /// Size of the text in pixels (zero for empty text)
    pub fn measure(&self, text: &str) -> TextSize {
        if text.is_empty() {
            return TextSize::default();
        }

        let scaled = self.font.as_scaled(self.scale);
        let widest = text
            .split('\n')
            .map(|line| self.line_advance(line))
            .fold(0.0_f32, f32::max);
        let line_count = text.split('\n').count();
        let height = scaled.height() + self.line_height() * (line_count - 1) as f32;

        TextSize {
            width: widest.ceil() as u32,
            height: height.ceil() as u32,
        }
    }

    /// Begin a drawing pass onto `target`
    ///
    /// The context holds the buffer borrow until it is dropped.
    pub fn context<'a>(&'a self, target: &'a mut PixelBuffer) -> GlyphContext<'a> {
        GlyphContext { font: self, target }
    }
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("pixel_height", &self.pixel_height)
            .finish_non_exhaustive()
    }
}

/// Drawing context binding a font to a target buffer
pub struct GlyphContext<'a> {
    font: &'a Font,
    target: &'a mut PixelBuffer,
}

impl GlyphContext<'_> {
    /// Draw text with its top-left corner at (`x`, `y`)
    ///
    /// Glyph coverage is alpha-composited over the existing pixels.
    /// Anything that falls outside the buffer is clipped.
    pub fn draw_text(&mut self, text: &str, x: i32, y: i32, color: Color) {
        let font = self.font;
        let target = &mut *self.target;
        let scaled = font.font.as_scaled(font.scale);
        let line_height = font.line_height();

        for (index, line) in text.split('\n').enumerate() {
            let baseline = y as f32 + scaled.ascent() + line_height * index as f32;
            let mut caret = x as f32;
            let mut previous: Option<GlyphId> = None;

            for c in line.chars() {
                let id = scaled.glyph_id(c);
                if let Some(previous) = previous {
                    caret += scaled.kern(previous, id);
                }
                let glyph = id.with_scale_and_position(font.scale, point(caret, baseline));
                caret += scaled.h_advance(id);
                previous = Some(id);

                let Some(outlined) = scaled.outline_glyph(glyph) else {
                    continue; // whitespace has no outline
                };

                let bounds = outlined.px_bounds();
                let (left, top) = (bounds.min.x as i32, bounds.min.y as i32);
                outlined.draw(|gx, gy, coverage| {
                    let alpha = (coverage.clamp(0.0, 1.0) * color.a as f32).round() as u8;
                    if alpha > 0 {
                        target.blend_pixel(
                            left + gx as i32,
                            top + gy as i32,
                            color.with_alpha(alpha),
                        );
                    }
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_screen::assets::BODY_FONT;

    fn body_font() -> Font {
        Font::from_memory(BODY_FONT.data, 18).unwrap()
    }

    #[test]
    fn test_invalid_font() {
        assert!(matches!(
            Font::from_memory(b"not a font", 18),
            Err(AssetError::Font(_))
        ));
    }

    #[test]
    fn test_measure_empty() {
        assert_eq!(body_font().measure(""), TextSize::default());
    }

    #[test]
    fn test_measure_grows_with_text() {
        let font = body_font();
        let short = font.measure("BIOS");
        let long = font.measure("BIOS not found");
        assert!(short.width > 0);
        assert!(long.width > short.width);
        assert_eq!(short.height, long.height);
    }

    #[test]
    fn test_measure_multiline() {
        let font = body_font();
        let one = font.measure("firmware");
        let two = font.measure("firmware\nok");
        assert_eq!(two.width, one.width);
        assert!(two.height > one.height);
    }

    #[test]
    fn test_larger_font_measures_larger() {
        let small = Font::from_memory(BODY_FONT.data, 12).unwrap();
        let large = Font::from_memory(BODY_FONT.data, 24).unwrap();
        assert!(large.measure("Hello").width > small.measure("Hello").width);
        assert_eq!(large.pixel_height(), 24);
    }

    #[test]
    fn test_draw_text_touches_pixels() {
        let font = body_font();
        let mut buffer = PixelBuffer::new(64, 32, Color::BLACK);
        font.context(&mut buffer).draw_text("Hi", 2, 2, Color::WHITE);

        let lit = buffer
            .as_bytes()
            .chunks_exact(4)
            .filter(|px| px[0] > 0)
            .count();
        assert!(lit > 0);
    }

    #[test]
    fn test_draw_text_clips_off_screen() {
        let font = body_font();
        let mut buffer = PixelBuffer::new(16, 16, Color::BLACK);
        let mut context = font.context(&mut buffer);
        context.draw_text("Clipped text", -40, -10, Color::WHITE);
        context.draw_text("Clipped text", 10, 10, Color::WHITE);
    }
}
