// Screenshot functionality
//
// Saves a presented frame as a PNG file.

use crate::display::PixelBuffer;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Errors that can occur during screenshot operations
#[derive(Debug, thiserror::Error)]
pub enum ScreenshotError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// PNG encoding error
    #[error("PNG encoding error: {0}")]
    PngEncoding(#[from] png::EncodingError),
}

/// Save a screenshot of a presented frame
///
/// # Arguments
///
/// * `frame` - The frame to save, usually the combined buffer of both screens
/// * `dir` - Directory the screenshot is written to; created if missing
///
/// # Returns
///
/// Result containing the path to the saved screenshot or an error
///
/// # Example
///
/// ```no_run
/// use duoscreen::display::{FrameCapture, ScreenLayoutData};
/// use duoscreen::error_screen::{save_screenshot, DiagnosticMessage, ErrorScreen};
/// use std::path::Path;
///
/// let screen = ErrorScreen::new(DiagnosticMessage::new("BIOS not found", "Add the BIOS."));
/// let mut layout = ScreenLayoutData::default();
/// let mut capture = FrameCapture::new();
/// screen.render(&mut layout, &mut capture);
///
/// let frame = capture.last_frame().expect("No frame presented");
/// let path = save_screenshot(frame, Path::new("screenshots")).expect("Failed to save screenshot");
/// println!("Screenshot saved to: {}", path.display());
/// ```
pub fn save_screenshot(frame: &PixelBuffer, dir: &Path) -> Result<PathBuf, ScreenshotError> {
    fs::create_dir_all(dir)?;

    // Generate filename with timestamp
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let file_path = dir.join(format!("error_screen_{}.png", timestamp));

    save_png(&file_path, frame)?;
    log::info!("Screenshot saved to {}", file_path.display());

    Ok(file_path)
}

/// Save a pixel buffer as an RGBA PNG file
///
/// # Arguments
///
/// * `path` - Path to save the PNG file
/// * `buffer` - Pixels to encode
///
/// # Returns
///
/// Result indicating success or error
pub fn save_png(path: &Path, buffer: &PixelBuffer) -> Result<(), ScreenshotError> {
    let file = fs::File::create(path)?;
    let w = io::BufWriter::new(file);

    let mut encoder = png::Encoder::new(w, buffer.width() as u32, buffer.height() as u32);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(buffer.as_bytes())?;
    writer.finish()?;

    Ok(())
}
