// Display module - Pixel buffers, text drawing and screen composition
//
// This module provides:
// - RGBA colors and the two screen color schemes
// - Pixel buffers sized for a 256×192 screen
// - Font loading, measuring and glyph drawing
// - PNG icon decoding
// - Screen layouts combining both screens into one frame
// - The video refresh boundary and a desktop window presenter

pub mod asset;
pub mod font;
pub mod framebuffer;
pub mod layout;
pub mod palette;
pub mod video;
pub mod window;

pub use asset::{decode_png, AssetError};
pub use font::{Font, GlyphContext, TextSize};
pub use framebuffer::{PixelBuffer, BYTES_PER_PIXEL, SCREEN_HEIGHT, SCREEN_SIZE, SCREEN_WIDTH};
pub use layout::{
    ParseLayoutError, Renderer, ScreenCompositor, ScreenLayout, ScreenLayoutData, CLEAR_COLOR,
};
pub use palette::{Color, ColorScheme, ParseColorError, BOTTOM_SCHEME, TOP_SCHEME};
pub use video::{FrameCapture, VideoFrame, VideoRefresh};
pub use window::{run_error_display, ErrorDisplayWindow, WindowConfig};
