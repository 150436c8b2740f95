// Error screen module - Shown instead of the game when startup fails
//
// This module provides:
// - Diagnostic messages (summary + remediation)
// - Embedded fonts and icons
// - Per-screen rendering (top: what went wrong, bottom: what to do)
// - Configuration (sizes, colors, wrapping, layout)
// - Screenshots of the presented frame
//
// Both screens are rendered once when the session is created; presenting a
// frame only combines them and hands the result to the video output.

pub mod assets;
pub mod config;
pub mod message;
pub mod render;
pub mod screenshot;

pub use config::{
    ColorConfig, ConfigError, DrawingConfig, ErrorScreenConfig, LayoutConfig, WrapConfig,
};
pub use message::DiagnosticMessage;
pub use render::{
    draw_icon, render_embedded_screen, render_screen, Corner, ErrorFonts, Screen, ERROR_TITLE,
    SOLUTION_TITLE, THANK_YOU,
};
pub use screenshot::{save_png, save_screenshot, ScreenshotError};

use crate::display::{PixelBuffer, Renderer, ScreenCompositor, VideoFrame, VideoRefresh};

/// Error screen session
///
/// Owns the diagnostic message and both rendered screens. The screens
/// never change after construction.
#[derive(Debug, Clone)]
pub struct ErrorScreen {
    message: DiagnosticMessage,
    top: PixelBuffer,
    bottom: PixelBuffer,
}

impl ErrorScreen {
    /// Create an error screen with the default configuration
    ///
    /// # Panics
    /// Panics if an embedded asset fails to load
    pub fn new(message: DiagnosticMessage) -> Self {
        Self::with_config(message, &ErrorScreenConfig::default())
    }

    /// Create an error screen with a custom configuration
    ///
    /// Fonts are loaded for the duration of this call and released before
    /// it returns; each icon only lives while its screen is drawn.
    ///
    /// # Arguments
    /// * `message` - What went wrong and how to fix it
    /// * `config` - Sizes, colors and wrapping settings
    ///
    /// # Panics
    /// Panics if an embedded asset fails to load
    pub fn with_config(message: DiagnosticMessage, config: &ErrorScreenConfig) -> Self {
        log::info!("Rendering error screen: {}", message.summary());

        let fonts = ErrorFonts::load(&config.drawing);
        let top = render_embedded_screen(Screen::Top, message.summary(), &fonts, config);
        let bottom = render_embedded_screen(Screen::Bottom, message.remediation(), &fonts, config);

        Self {
            message,
            top,
            bottom,
        }
    }

    /// The diagnostic message shown on the screens
    pub fn message(&self) -> &DiagnosticMessage {
        &self.message
    }

    /// The rendered top screen
    pub fn top_screen(&self) -> &PixelBuffer {
        &self.top
    }

    /// The rendered bottom screen
    pub fn bottom_screen(&self) -> &PixelBuffer {
        &self.bottom
    }

    /// Present both screens as one frame
    ///
    /// Re-initializes the layout for the software renderer if it is dirty,
    /// clears it, combines the two screens and sends the result to `video`.
    ///
    /// # Arguments
    /// * `layout` - Layout state that owns the combined buffer
    /// * `video` - Video output receiving the frame
    pub fn render(&self, layout: &mut impl ScreenCompositor, video: &mut impl VideoRefresh) {
        if layout.is_dirty() {
            layout.update(Renderer::Software);
        }

        layout.clear();
        layout.combine_screens(&self.top, &self.bottom);
        video.video_refresh(VideoFrame::from_buffer(layout.buffer()));
    }
}
