// duoscreen Library
// Error screen presentation for a dual-screen handheld emulator front-end

// Public modules
pub mod display;
pub mod error_screen;
pub mod text;

// Re-export main types for convenience
pub use display::{
    FrameCapture, PixelBuffer, ScreenCompositor, ScreenLayout, ScreenLayoutData, VideoFrame,
    VideoRefresh, WindowConfig,
};
pub use error_screen::{DiagnosticMessage, ErrorScreen, ErrorScreenConfig};
pub use text::word_wrap;
