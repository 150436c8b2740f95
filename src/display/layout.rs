// Screen layout - Combines the two emulated screens into one output image
//
// The handheld has a top and a bottom screen that are rendered separately.
// The host only ever receives one image, so the screens are placed next to
// each other (or one of them alone) according to the selected layout, with
// an optional gap between them.
//
// Changing the layout or gap marks the layout state dirty; it must then be
// updated for a renderer before the next combination.

use super::framebuffer::{PixelBuffer, SCREEN_HEIGHT, SCREEN_WIDTH};
use super::palette::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Color of the combined buffer where no screen is drawn
pub const CLEAR_COLOR: Color = Color::BLACK;

/// Arrangement of the two screens in the output image
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScreenLayout {
    /// Top screen above the bottom screen
    #[default]
    TopBottom,
    /// Bottom screen above the top screen
    BottomTop,
    /// Top screen left of the bottom screen
    LeftRight,
    /// Bottom screen left of the top screen
    RightLeft,
    /// Only the top screen
    TopOnly,
    /// Only the bottom screen
    BottomOnly,
}

impl ScreenLayout {
    /// All layouts, in menu order
    pub const ALL: [ScreenLayout; 6] = [
        ScreenLayout::TopBottom,
        ScreenLayout::BottomTop,
        ScreenLayout::LeftRight,
        ScreenLayout::RightLeft,
        ScreenLayout::TopOnly,
        ScreenLayout::BottomOnly,
    ];

    /// Name used in configuration files and on the command line
    pub fn name(self) -> &'static str {
        match self {
            ScreenLayout::TopBottom => "top-bottom",
            ScreenLayout::BottomTop => "bottom-top",
            ScreenLayout::LeftRight => "left-right",
            ScreenLayout::RightLeft => "right-left",
            ScreenLayout::TopOnly => "top-only",
            ScreenLayout::BottomOnly => "bottom-only",
        }
    }

    /// Size of the combined image in pixels
    ///
    /// # Arguments
    /// * `gap` - Pixels between the two screens (ignored for single-screen layouts)
    ///
    /// # Returns
    /// (width, height)
    pub fn buffer_size(self, gap: usize) -> (usize, usize) {
        match self {
            ScreenLayout::TopBottom | ScreenLayout::BottomTop => {
                (SCREEN_WIDTH, SCREEN_HEIGHT * 2 + gap)
            }
            ScreenLayout::LeftRight | ScreenLayout::RightLeft => {
                (SCREEN_WIDTH * 2 + gap, SCREEN_HEIGHT)
            }
            ScreenLayout::TopOnly | ScreenLayout::BottomOnly => (SCREEN_WIDTH, SCREEN_HEIGHT),
        }
    }

    /// Where the top-left corner of each screen lands in the combined image
    ///
    /// # Returns
    /// (top screen origin, bottom screen origin); `None` for a hidden screen
    pub fn screen_origins(self, gap: usize) -> (Option<(usize, usize)>, Option<(usize, usize)>) {
        let below = (0, SCREEN_HEIGHT + gap);
        let beside = (SCREEN_WIDTH + gap, 0);

        match self {
            ScreenLayout::TopBottom => (Some((0, 0)), Some(below)),
            ScreenLayout::BottomTop => (Some(below), Some((0, 0))),
            ScreenLayout::LeftRight => (Some((0, 0)), Some(beside)),
            ScreenLayout::RightLeft => (Some(beside), Some((0, 0))),
            ScreenLayout::TopOnly => (Some((0, 0)), None),
            ScreenLayout::BottomOnly => (None, Some((0, 0))),
        }
    }
}

impl fmt::Display for ScreenLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned for an unknown layout name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown screen layout {0:?}")]
pub struct ParseLayoutError(pub String);

impl FromStr for ScreenLayout {
    type Err = ParseLayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase().replace('_', "-");
        ScreenLayout::ALL
            .into_iter()
            .find(|layout| layout.name() == name)
            .ok_or_else(|| ParseLayoutError(s.to_string()))
    }
}

/// Rendering path the combined buffer is prepared for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Renderer {
    /// CPU-side buffer, presented as-is
    Software,
    /// Hardware-accelerated path
    ///
    /// Only recorded as layout state; the error screen always presents
    /// through the software path.
    OpenGl,
}

/// Layout state that merges two screens into one presentable buffer
pub trait ScreenCompositor {
    /// Check whether the layout must be updated before the next combination
    fn is_dirty(&self) -> bool;

    /// Re-initialize the layout state for a renderer
    fn update(&mut self, renderer: Renderer);

    /// Fill the combined buffer with the clear color
    fn clear(&mut self);

    /// Copy both screens into the combined buffer
    fn combine_screens(&mut self, top: &PixelBuffer, bottom: &PixelBuffer);

    /// The combined buffer
    fn buffer(&self) -> &PixelBuffer;
}

/// Screen layout state backed by a CPU-side buffer
#[derive(Debug)]
pub struct ScreenLayoutData {
    layout: ScreenLayout,
    screen_gap: usize,
    renderer: Option<Renderer>,
    dirty: bool,
    buffer: PixelBuffer,
}

impl ScreenLayoutData {
    /// Create layout state; it starts dirty
    ///
    /// # Arguments
    /// * `layout` - Screen arrangement
    /// * `screen_gap` - Pixels between the two screens
    pub fn new(layout: ScreenLayout, screen_gap: usize) -> Self {
        Self {
            layout,
            screen_gap,
            renderer: None,
            dirty: true,
            buffer: PixelBuffer::new(0, 0, CLEAR_COLOR),
        }
    }

    /// Current screen arrangement
    pub fn layout(&self) -> ScreenLayout {
        self.layout
    }

    /// Change the screen arrangement
    pub fn set_layout(&mut self, layout: ScreenLayout) {
        if layout != self.layout {
            self.layout = layout;
            self.dirty = true;
        }
    }

    /// Pixels between the two screens
    pub fn screen_gap(&self) -> usize {
        self.screen_gap
    }

    /// Change the gap between the two screens
    pub fn set_screen_gap(&mut self, screen_gap: usize) {
        if screen_gap != self.screen_gap {
            self.screen_gap = screen_gap;
            self.dirty = true;
        }
    }

    /// Renderer the state was last updated for
    pub fn renderer(&self) -> Option<Renderer> {
        self.renderer
    }

    /// Width of the combined buffer
    pub fn width(&self) -> usize {
        self.buffer.width()
    }

    /// Height of the combined buffer
    pub fn height(&self) -> usize {
        self.buffer.height()
    }

    /// Row stride of the combined buffer in bytes
    pub fn stride(&self) -> usize {
        self.buffer.stride()
    }
}

impl Default for ScreenLayoutData {
    fn default() -> Self {
        Self::new(ScreenLayout::default(), 0)
    }
}

impl ScreenCompositor for ScreenLayoutData {
    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn update(&mut self, renderer: Renderer) {
        let (width, height) = self.layout.buffer_size(self.screen_gap);
        log::debug!(
            "Screen layout {} updated for {:?}: {}x{} (gap {})",
            self.layout,
            renderer,
            width,
            height,
            self.screen_gap
        );

        self.buffer = PixelBuffer::new(width, height, CLEAR_COLOR);
        self.renderer = Some(renderer);
        self.dirty = false;
    }

    fn clear(&mut self) {
        self.buffer.clear(CLEAR_COLOR);
    }

    fn combine_screens(&mut self, top: &PixelBuffer, bottom: &PixelBuffer) {
        assert!(!self.dirty, "Screen layout must be updated before combining");
        assert!(top.is_screen_sized(), "Top screen must be {}×{}", SCREEN_WIDTH, SCREEN_HEIGHT);
        assert!(
            bottom.is_screen_sized(),
            "Bottom screen must be {}×{}",
            SCREEN_WIDTH,
            SCREEN_HEIGHT
        );

        let (top_origin, bottom_origin) = self.layout.screen_origins(self.screen_gap);
        if let Some((x, y)) = top_origin {
            self.buffer.copy_from(top, x, y);
        }
        if let Some((x, y)) = bottom_origin {
            self.buffer.copy_from(bottom, x, y);
        }
    }

    fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screens() -> (PixelBuffer, PixelBuffer) {
        (
            PixelBuffer::screen(Color::rgb(0xFA, 0xB7, 0xBC)),
            PixelBuffer::screen(Color::rgb(0x63, 0x7D, 0x36)),
        )
    }

    fn ready(layout: ScreenLayout, gap: usize) -> ScreenLayoutData {
        let mut data = ScreenLayoutData::new(layout, gap);
        data.update(Renderer::Software);
        data
    }

    #[test]
    fn test_starts_dirty() {
        let data = ScreenLayoutData::default();
        assert!(data.is_dirty());
        assert_eq!(data.renderer(), None);
    }

    #[test]
    fn test_update_allocates_buffer() {
        let data = ready(ScreenLayout::TopBottom, 0);
        assert!(!data.is_dirty());
        assert_eq!(data.renderer(), Some(Renderer::Software));
        assert_eq!((data.width(), data.height()), (256, 384));
        assert_eq!(data.stride(), 256 * 4);
    }

    #[test]
    fn test_buffer_sizes() {
        assert_eq!(ScreenLayout::TopBottom.buffer_size(8), (256, 392));
        assert_eq!(ScreenLayout::RightLeft.buffer_size(8), (520, 192));
        assert_eq!(ScreenLayout::BottomOnly.buffer_size(8), (256, 192));
    }

    #[test]
    fn test_changes_mark_dirty() {
        let mut data = ready(ScreenLayout::TopBottom, 0);
        data.set_layout(ScreenLayout::TopBottom);
        assert!(!data.is_dirty());

        data.set_layout(ScreenLayout::LeftRight);
        assert!(data.is_dirty());

        data.update(Renderer::Software);
        data.set_screen_gap(4);
        assert!(data.is_dirty());
    }

    #[test]
    fn test_combine_top_bottom() {
        let (top, bottom) = screens();
        let mut data = ready(ScreenLayout::TopBottom, 0);
        data.combine_screens(&top, &bottom);

        let buffer = data.buffer();
        assert_eq!(buffer.get_pixel(0, 0), top.get_pixel(0, 0));
        assert_eq!(buffer.get_pixel(255, 191), top.get_pixel(255, 191));
        assert_eq!(buffer.get_pixel(0, 192), bottom.get_pixel(0, 0));
        assert_eq!(buffer.get_pixel(255, 383), bottom.get_pixel(255, 191));
    }

    #[test]
    fn test_combine_right_left_with_gap() {
        let (top, bottom) = screens();
        let mut data = ready(ScreenLayout::RightLeft, 2);
        data.combine_screens(&top, &bottom);

        let buffer = data.buffer();
        assert_eq!(buffer.get_pixel(0, 0), bottom.get_pixel(0, 0));
        assert_eq!(buffer.get_pixel(256, 0), CLEAR_COLOR);
        assert_eq!(buffer.get_pixel(257, 100), CLEAR_COLOR);
        assert_eq!(buffer.get_pixel(258, 0), top.get_pixel(0, 0));
    }

    #[test]
    fn test_combine_single_screen() {
        let (top, bottom) = screens();
        let mut data = ready(ScreenLayout::BottomOnly, 16);
        data.combine_screens(&top, &bottom);
        assert_eq!(data.buffer(), &bottom);
    }

    #[test]
    fn test_combine_does_not_mutate_inputs() {
        let (top, bottom) = screens();
        let (top_before, bottom_before) = (top.clone(), bottom.clone());
        let mut data = ready(ScreenLayout::LeftRight, 0);
        data.combine_screens(&top, &bottom);
        assert_eq!(top, top_before);
        assert_eq!(bottom, bottom_before);
    }

    #[test]
    fn test_clear() {
        let (top, bottom) = screens();
        let mut data = ready(ScreenLayout::TopOnly, 0);
        data.combine_screens(&top, &bottom);
        data.clear();
        assert_eq!(data.buffer().get_pixel(10, 10), CLEAR_COLOR);
    }

    #[test]
    #[should_panic(expected = "must be updated")]
    fn test_combine_while_dirty() {
        let (top, bottom) = screens();
        ScreenLayoutData::default().combine_screens(&top, &bottom);
    }

    #[test]
    #[should_panic(expected = "Top screen must be")]
    fn test_combine_wrong_size() {
        let (_, bottom) = screens();
        let top = PixelBuffer::new(10, 10, Color::WHITE);
        ready(ScreenLayout::TopBottom, 0).combine_screens(&top, &bottom);
    }

    #[test]
    fn test_parse_layout() {
        assert_eq!("top-bottom".parse(), Ok(ScreenLayout::TopBottom));
        assert_eq!("Left_Right".parse(), Ok(ScreenLayout::LeftRight));
        assert!("diagonal".parse::<ScreenLayout>().is_err());

        for layout in ScreenLayout::ALL {
            assert_eq!(layout.to_string().parse(), Ok(layout));
        }
    }
}
