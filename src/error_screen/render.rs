// Screen renderer - Draws one complete error screen
//
// Drawing order, later steps painting over earlier ones:
// 1. Background fill
// 2. Icon in a bottom corner
// 3. Title, centered at the top
// 4. Wrapped message, left-aligned below the title
// 5. Acknowledgment line in the bottom-right corner (bottom screen only)

use super::assets::{self, EmbeddedAsset};
use super::config::{DrawingConfig, ErrorScreenConfig};
use crate::display::{Font, PixelBuffer, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::text::word_wrap;

/// Title of the top screen
pub const ERROR_TITLE: &str = "Oh no! duoscreen couldn't start...";

/// Title of the bottom screen
pub const SOLUTION_TITLE: &str = "Here's what you can do:";

/// Closing line of the bottom screen
pub const THANK_YOU: &str = "Thank you for using duoscreen!";

/// One of the two emulated screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// Shows what went wrong
    Top,
    /// Shows what to do about it
    Bottom,
}

impl Screen {
    /// Fixed title drawn at the top of the screen
    pub fn title(self) -> &'static str {
        match self {
            Screen::Top => ERROR_TITLE,
            Screen::Bottom => SOLUTION_TITLE,
        }
    }

    /// Embedded icon drawn on the screen
    pub fn icon(self) -> EmbeddedAsset {
        match self {
            Screen::Top => assets::ERROR_ICON,
            Screen::Bottom => assets::SORRY_ICON,
        }
    }

    /// Corner the icon is anchored to
    pub fn icon_corner(self) -> Corner {
        match self {
            Screen::Top => Corner::BottomRight,
            Screen::Bottom => Corner::BottomLeft,
        }
    }
}

/// Screen corner an icon can be anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    BottomLeft,
    BottomRight,
}

/// Title and body fonts used for one rendering session
#[derive(Debug, Clone)]
pub struct ErrorFonts {
    pub title: Font,
    pub body: Font,
}

impl ErrorFonts {
    /// Load the embedded fonts at the configured sizes
    ///
    /// # Panics
    /// Panics if an embedded font is invalid
    pub fn load(drawing: &DrawingConfig) -> Self {
        Self {
            title: assets::load_font(&assets::TITLE_FONT, drawing.title_font_height),
            body: assets::load_font(&assets::BODY_FONT, drawing.body_font_height),
        }
    }
}

/// Draw an icon in a bottom corner of the target, `margin` pixels from both edges
///
/// # Panics
/// Panics unless the icon is strictly smaller than the target in both dimensions
pub fn draw_icon(target: &mut PixelBuffer, icon: &PixelBuffer, corner: Corner, margin: i32) {
    assert!(
        icon.width() < target.width(),
        "Icon is {} pixels wide but must be narrower than the {}-pixel screen",
        icon.width(),
        target.width()
    );
    assert!(
        icon.height() < target.height(),
        "Icon is {} pixels tall but must be shorter than the {}-pixel screen",
        icon.height(),
        target.height()
    );

    let x = match corner {
        Corner::BottomLeft => margin,
        Corner::BottomRight => (target.width() - icon.width()) as i32 - margin,
    };
    let y = (target.height() - icon.height()) as i32 - margin;

    target.draw_image(icon, x, y);
}

/// Render one screen
///
/// # Arguments
/// * `screen` - Which screen to draw
/// * `text` - Message to show below the title; wrapped to the configured budget
/// * `icon` - Image for the bottom corner
/// * `fonts` - Title and body fonts
/// * `config` - Sizes, colors and wrapping settings
///
/// # Returns
/// The finished screen-sized buffer
pub fn render_screen(
    screen: Screen,
    text: &str,
    icon: &PixelBuffer,
    fonts: &ErrorFonts,
    config: &ErrorScreenConfig,
) -> PixelBuffer {
    let scheme = config.colors.scheme(screen);
    let margin = config.drawing.margin_px();
    let mut buffer = PixelBuffer::screen(scheme.background);

    draw_icon(&mut buffer, icon, screen.icon_corner(), margin);

    // Origin of every image is its top-left corner, Y grows downwards
    let title = screen.title();
    let title_size = fonts.title.measure(title);
    fonts.title.context(&mut buffer).draw_text(
        title,
        (SCREEN_WIDTH as i32 - title_size.width as i32) / 2,
        margin,
        scheme.foreground,
    );

    let wrapped = word_wrap(
        text,
        config.wrap.line_width,
        config.wrap.wide_glyph_width,
        config.wrap.max_lines,
    );
    let mut body = fonts.body.context(&mut buffer);
    body.draw_text(
        &wrapped,
        margin,
        title_size.height as i32 + margin * 2,
        scheme.foreground,
    );

    if screen == Screen::Bottom {
        let size = fonts.body.measure(THANK_YOU);
        body.draw_text(
            THANK_YOU,
            SCREEN_WIDTH as i32 - size.width as i32 - margin,
            SCREEN_HEIGHT as i32 - size.height as i32 - margin,
            scheme.foreground,
        );
    }

    buffer
}

/// Render one screen with its embedded icon
///
/// The icon only lives for the duration of the call.
pub fn render_embedded_screen(
    screen: Screen,
    text: &str,
    fonts: &ErrorFonts,
    config: &ErrorScreenConfig,
) -> PixelBuffer {
    let icon = assets::load_icon(&screen.icon());
    render_screen(screen, text, &icon, fonts, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::{Color, BOTTOM_SCHEME, TOP_SCHEME};

    fn fonts() -> ErrorFonts {
        ErrorFonts::load(&DrawingConfig::default())
    }

    /// Screen drawn with an invisible icon, so only text differs from the background
    fn render_text_only(screen: Screen, text: &str, fonts: &ErrorFonts) -> PixelBuffer {
        let icon = PixelBuffer::new(16, 16, Color::TRANSPARENT);
        render_screen(screen, text, &icon, fonts, &ErrorScreenConfig::default())
    }

    /// Bounding box (min_x, min_y, max_x, max_y) of pixels where `a` and `b` differ
    fn diff_bounds(a: &PixelBuffer, b: &PixelBuffer) -> Option<(usize, usize, usize, usize)> {
        let mut bounds: Option<(usize, usize, usize, usize)> = None;
        for y in 0..a.height() {
            for x in 0..a.width() {
                if a.get_pixel(x, y) != b.get_pixel(x, y) {
                    bounds = Some(match bounds {
                        None => (x, y, x, y),
                        Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                    });
                }
            }
        }
        bounds
    }

    #[test]
    fn test_screen_properties() {
        assert_eq!(Screen::Top.title(), ERROR_TITLE);
        assert_eq!(Screen::Bottom.title(), SOLUTION_TITLE);
        assert_eq!(Screen::Top.icon_corner(), Corner::BottomRight);
        assert_eq!(Screen::Bottom.icon_corner(), Corner::BottomLeft);
        assert_eq!(Screen::Top.icon().name, "graphic_error.png");
    }

    #[test]
    fn test_draw_icon_bottom_right() {
        let mut target = PixelBuffer::screen(Color::BLACK);
        let icon = PixelBuffer::new(10, 10, Color::WHITE);
        draw_icon(&mut target, &icon, Corner::BottomRight, 8);

        // Icon spans x 238..248, y 174..184
        assert_eq!(target.get_pixel(238, 174), Color::WHITE);
        assert_eq!(target.get_pixel(247, 183), Color::WHITE);
        assert_eq!(target.get_pixel(248, 183), Color::BLACK);
        assert_eq!(target.get_pixel(247, 184), Color::BLACK);
        assert_eq!(target.get_pixel(237, 174), Color::BLACK);
    }

    #[test]
    fn test_draw_icon_bottom_left() {
        let mut target = PixelBuffer::screen(Color::BLACK);
        let icon = PixelBuffer::new(10, 10, Color::WHITE);
        draw_icon(&mut target, &icon, Corner::BottomLeft, 8);

        assert_eq!(target.get_pixel(8, 174), Color::WHITE);
        assert_eq!(target.get_pixel(7, 174), Color::BLACK);
        assert_eq!(target.get_pixel(17, 183), Color::WHITE);
    }

    #[test]
    fn test_draw_icon_largest_allowed() {
        let mut target = PixelBuffer::screen(Color::BLACK);
        let icon = PixelBuffer::new(SCREEN_WIDTH - 1, SCREEN_HEIGHT - 1, Color::WHITE);
        draw_icon(&mut target, &icon, Corner::BottomLeft, 0);
        assert_eq!(target.get_pixel(0, 1), Color::WHITE);
        assert_eq!(target.get_pixel(0, 0), Color::BLACK);
    }

    #[test]
    #[should_panic(expected = "must be narrower")]
    fn test_draw_icon_as_wide_as_screen() {
        let mut target = PixelBuffer::screen(Color::BLACK);
        let icon = PixelBuffer::new(SCREEN_WIDTH, 10, Color::WHITE);
        draw_icon(&mut target, &icon, Corner::BottomRight, 0);
    }

    #[test]
    #[should_panic(expected = "must be shorter")]
    fn test_draw_icon_as_tall_as_screen() {
        let mut target = PixelBuffer::screen(Color::BLACK);
        let icon = PixelBuffer::new(10, SCREEN_HEIGHT, Color::WHITE);
        draw_icon(&mut target, &icon, Corner::BottomRight, 0);
    }

    #[test]
    fn test_render_top_screen() {
        let config = ErrorScreenConfig::default();
        let screen = render_embedded_screen(Screen::Top, "BIOS not found", &fonts(), &config);

        assert!(screen.is_screen_sized());
        // Top-left corner is untouched background
        assert_eq!(screen.get_pixel(0, 0), TOP_SCHEME.background);
        // Some text was drawn in the title area
        let title_rows_touched = (0..40)
            .any(|y| (0..SCREEN_WIDTH).any(|x| screen.get_pixel(x, y) != TOP_SCHEME.background));
        assert!(title_rows_touched);
    }

    #[test]
    fn test_render_bottom_screen_icon_corner() {
        let config = ErrorScreenConfig::default();
        let icon = PixelBuffer::new(16, 16, Color::WHITE);
        let screen = render_screen(Screen::Bottom, "", &icon, &fonts(), &config);

        assert_eq!(screen.get_pixel(8, 192 - 8 - 16), Color::WHITE);
        assert_eq!(screen.get_pixel(0, 191), BOTTOM_SCHEME.background);
    }

    #[test]
    fn test_title_is_centered_below_margin() {
        let fonts = fonts();
        let screen = render_text_only(Screen::Top, "", &fonts);
        let background = PixelBuffer::screen(TOP_SCHEME.background);
        let title = fonts.title.measure(ERROR_TITLE);

        let (x0, y0, x1, y1) = diff_bounds(&screen, &background).unwrap();
        let left = x0 as i32;
        let right = (SCREEN_WIDTH - 1 - x1) as i32;
        assert!((left - right).abs() <= 3, "title ink spans {}..={}", x0, x1);
        assert!(y0 + 1 >= 8 && y0 <= 8 + 6, "title ink starts at row {}", y0);
        assert!(y1 <= 8 + title.height as usize);
    }

    #[test]
    fn test_body_starts_below_title() {
        let fonts = fonts();
        let empty = render_text_only(Screen::Top, "", &fonts);
        let with_body = render_text_only(Screen::Top, "BIOS", &fonts);
        let body_top = fonts.title.measure(ERROR_TITLE).height as usize + 16;

        let (x0, y0, _, _) = diff_bounds(&with_body, &empty).unwrap();
        assert!(x0 + 1 >= 8 && x0 <= 8 + 3, "body ink starts at column {}", x0);
        assert!(y0 + 1 >= body_top && y0 <= body_top + 6, "body ink starts at row {}", y0);
    }

    #[test]
    fn test_thank_you_in_bottom_right_corner() {
        let fonts = fonts();
        let screen = render_text_only(Screen::Bottom, "", &fonts);
        let size = fonts.body.measure(THANK_YOU);
        let title_bottom = 8 + fonts.title.measure(SOLUTION_TITLE).height as usize;

        // Blank out the title so only the acknowledgment line remains
        let mut below_title = screen.clone();
        for y in 0..=title_bottom {
            for x in 0..SCREEN_WIDTH {
                below_title.set_pixel(x, y, BOTTOM_SCHEME.background);
            }
        }
        let background = PixelBuffer::screen(BOTTOM_SCHEME.background);
        let (x0, y0, x1, y1) = diff_bounds(&below_title, &background).unwrap();

        let box_left = SCREEN_WIDTH - size.width as usize - 8;
        let box_top = SCREEN_HEIGHT - size.height as usize - 8;
        let (box_right, box_bottom) = (SCREEN_WIDTH - 8, SCREEN_HEIGHT - 8);
        assert!(x0 + 1 >= box_left && x1 <= box_right, "ink spans columns {}..={}", x0, x1);
        assert!(y0 + 1 >= box_top && y1 <= box_bottom, "ink spans rows {}..={}", y0, y1);
        // Right- and bottom-aligned against the margin
        assert!(x1 + 4 >= box_right);
        assert!(y1 + 4 >= box_bottom);
    }

    #[test]
    fn test_top_screen_has_no_thank_you() {
        let fonts = fonts();
        let screen = render_text_only(Screen::Top, "", &fonts);
        let size = fonts.body.measure(THANK_YOU);

        for y in SCREEN_HEIGHT - size.height as usize - 8..SCREEN_HEIGHT {
            for x in SCREEN_WIDTH - size.width as usize - 8..SCREEN_WIDTH {
                assert_eq!(screen.get_pixel(x, y), TOP_SCHEME.background, "ink at ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_huge_margin_pushes_everything_off_screen() {
        let mut config = ErrorScreenConfig::default();
        config.drawing.margin = u32::MAX;
        let fonts = fonts();

        for screen in [Screen::Top, Screen::Bottom] {
            let rendered = render_embedded_screen(screen, "BIOS not found", &fonts, &config);
            let background = PixelBuffer::screen(config.colors.scheme(screen).background);
            assert_eq!(rendered, background);
        }
    }

    #[test]
    fn test_render_is_deterministic() {
        let config = ErrorScreenConfig::default();
        let fonts = fonts();
        let text = "Put the firmware files in the system directory and restart.";
        let first = render_embedded_screen(Screen::Bottom, text, &fonts, &config);
        let second = render_embedded_screen(Screen::Bottom, text, &fonts, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_long_text_does_not_panic() {
        let config = ErrorScreenConfig::default();
        let text = "word ".repeat(2000) + &"x".repeat(500);
        let screen = render_embedded_screen(Screen::Top, &text, &fonts(), &config);
        assert!(screen.is_screen_sized());
    }
}
