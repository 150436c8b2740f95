// Embedded assets - Fonts and icons compiled into the binary
//
// The error screens can't rely on anything outside the executable: they
// are shown precisely when something about the installation is broken.
// A failure to decode one of these is a broken build, so the loaders panic.

use crate::display::{decode_png, Font, PixelBuffer};

/// A binary resource compiled into the executable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmbeddedAsset {
    /// Name used in diagnostics
    pub name: &'static str,

    /// File contents
    pub data: &'static [u8],
}

/// Font for the screen titles
pub const TITLE_FONT: EmbeddedAsset = EmbeddedAsset {
    name: "error_title_font.ttf",
    data: include_bytes!("../../assets/error_title_font.ttf"),
};

/// Font for the body text
pub const BODY_FONT: EmbeddedAsset = EmbeddedAsset {
    name: "error_body_font.ttf",
    data: include_bytes!("../../assets/error_body_font.ttf"),
};

/// Icon drawn on the top screen
pub const ERROR_ICON: EmbeddedAsset = EmbeddedAsset {
    name: "graphic_error.png",
    data: include_bytes!("../../assets/graphic_error.png"),
};

/// Icon drawn on the bottom screen
pub const SORRY_ICON: EmbeddedAsset = EmbeddedAsset {
    name: "graphic_sorry.png",
    data: include_bytes!("../../assets/graphic_sorry.png"),
};

/// Load an embedded font at the given pixel height
///
/// # Panics
/// Panics if the embedded data is not a valid font
pub fn load_font(asset: &EmbeddedAsset, pixel_height: u32) -> Font {
    Font::from_memory(asset.data, pixel_height)
        .unwrap_or_else(|e| panic!("Embedded font {} failed to load: {}", asset.name, e))
}

/// Decode an embedded icon
///
/// # Panics
/// Panics if the embedded data is not a valid PNG image
pub fn load_icon(asset: &EmbeddedAsset) -> PixelBuffer {
    decode_png(asset.data)
        .unwrap_or_else(|e| panic!("Embedded icon {} failed to load: {}", asset.name, e))
}
