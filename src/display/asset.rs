// Asset decoding - Turns embedded binary resources into drawable data
//
// Icons are stored as PNG files and decoded into RGBA pixel buffers.
// Fonts are parsed in the font module; both report failures as AssetError.

use super::framebuffer::PixelBuffer;
use std::io::Cursor;

/// Errors that can occur while decoding an embedded asset
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Invalid font data: {0}")]
    Font(#[from] ab_glyph::InvalidFont),

    #[error("PNG decoding error: {0}")]
    PngDecoding(#[from] png::DecodingError),

    #[error("Image is too large to decode")]
    ImageTooLarge,

    #[error("Unsupported PNG color type: {0:?}")]
    UnsupportedColorType(png::ColorType),
}

/// Decode a PNG image into an RGBA pixel buffer
///
/// Paletted, grayscale and 16-bit images are normalized to 8-bit RGBA.
///
/// # Arguments
/// * `bytes` - Encoded PNG file
///
/// # Returns
/// Result containing the decoded image or an error
pub fn decode_png(bytes: &[u8]) -> Result<PixelBuffer, AssetError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::normalize_to_color8());

    let mut reader = decoder.read_info()?;
    let size = reader
        .output_buffer_size()
        .ok_or(AssetError::ImageTooLarge)?;
    let mut buffer = vec![0; size];
    let info = reader.next_frame(&mut buffer)?;
    buffer.truncate(info.buffer_size());

    let rgba = match info.color_type {
        png::ColorType::Rgba => buffer,
        png::ColorType::Rgb => buffer
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], 0xFF])
            .collect(),
        png::ColorType::GrayscaleAlpha => buffer
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        png::ColorType::Grayscale => buffer.iter().flat_map(|&g| [g, g, g, 0xFF]).collect(),
        other => return Err(AssetError::UnsupportedColorType(other)),
    };

    Ok(PixelBuffer::from_rgba(
        info.width as usize,
        info.height as usize,
        rgba,
    ))
}
