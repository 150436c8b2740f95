// Color palette - RGBA colors and the error screen color schemes
//
// Colors are straight (non-premultiplied) RGBA with 8 bits per channel.
// In configuration files they are written as "#RRGGBB" or "#RRGGBBAA".

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Error returned when a color string can't be parsed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid color {0:?}, expected #RRGGBB or #RRGGBBAA")]
pub struct ParseColorError(pub String);

impl Color {
    /// Opaque black
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);

    /// Opaque white
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);

    /// Fully transparent black
    pub const TRANSPARENT: Color = Color::rgba(0x00, 0x00, 0x00, 0x00);

    /// Create an opaque color
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    /// Create a color with an alpha channel
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from [R, G, B, A] bytes
    #[inline]
    pub const fn from_bytes(bytes: [u8; 4]) -> Self {
        Self::rgba(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    /// Convert to [R, G, B, A] bytes
    #[inline]
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Same color with a different alpha
    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Composite this color over `dst` (source-over)
    ///
    /// # Arguments
    /// * `dst` - Color already in the buffer
    ///
    /// # Returns
    /// The resulting color
    pub fn blend_over(self, dst: Color) -> Color {
        match self.a {
            0xFF => return self,
            0x00 => return dst,
            _ => {}
        }

        let src_a = self.a as u32;
        let inv_a = 255 - src_a;
        let dst_a = dst.a as u32;

        // Output alpha, scaled by 255
        let out_a = src_a * 255 + dst_a * inv_a;
        if out_a == 0 {
            return Color::TRANSPARENT;
        }

        let channel = |s: u8, d: u8| -> u8 {
            let value = s as u32 * src_a * 255 + d as u32 * dst_a * inv_a;
            ((value + out_a / 2) / out_a) as u8
        };

        Color {
            r: channel(self.r, dst.r),
            g: channel(self.g, dst.g),
            b: channel(self.b, dst.b),
            a: ((out_a + 127) / 255) as u8,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)?;
        if self.a != 0xFF {
            write!(f, "{:02X}", self.a)?;
        }
        Ok(())
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseColorError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;

        if !hex.is_ascii() || !(hex.len() == 6 || hex.len() == 8) {
            return Err(invalid());
        }

        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        let alpha = if hex.len() == 8 { byte(6)? } else { 0xFF };

        Ok(Color::rgba(byte(0)?, byte(2)?, byte(4)?, alpha))
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Background and text color of one screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorScheme {
    /// Fill color
    pub background: Color,

    /// Title and body text color
    pub foreground: Color,
}

/// Top screen colors: dark pink text on light pink
pub const TOP_SCHEME: ColorScheme = ColorScheme {
    background: Color::rgb(0xFA, 0xB7, 0xBC),
    foreground: Color::rgb(0xF5, 0x6B, 0x71),
};

/// Bottom screen colors: light green text on dark green
pub const BOTTOM_SCHEME: ColorScheme = ColorScheme {
    background: Color::rgb(0x63, 0x7D, 0x36),
    foreground: Color::rgb(0xDF, 0xDE, 0x77),
};
