// Error screen configuration
//
// Groups every constant the error screens are drawn with: font sizes,
// margins, wrapping budget, colors and the screen layout. The defaults are
// what ships; a TOML file can override any section.

use super::render::Screen;
use crate::display::{
    ColorScheme, ScreenLayout, ScreenLayoutData, BOTTOM_SCHEME, SCREEN_WIDTH, TOP_SCHEME,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;

/// Errors that can occur while loading or saving the configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Error screen configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorScreenConfig {
    /// Font sizes and margins
    pub drawing: DrawingConfig,

    /// Word wrapping of the body text
    pub wrap: WrapConfig,

    /// Screen colors
    pub colors: ColorConfig,

    /// Arrangement of the two screens
    pub layout: LayoutConfig,
}

/// Font sizes and margins
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawingConfig {
    /// Title font height in pixels
    pub title_font_height: u32,

    /// Body font height in pixels
    pub body_font_height: u32,

    /// Distance between screen edges and anything drawn, in pixels
    pub margin: u32,
}

/// Word wrapping of the body text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WrapConfig {
    /// Line width in characters
    pub line_width: usize,

    /// Width of a wide glyph as a percentage of a narrow one
    pub wide_glyph_width: u32,

    /// Maximum number of lines (0 = unlimited)
    pub max_lines: usize,
}

/// Screen colors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub top: ColorScheme,
    pub bottom: ColorScheme,
}

/// Arrangement of the two screens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Screen arrangement
    pub layout: ScreenLayout,

    /// Pixels between the two screens
    pub screen_gap: usize,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            title_font_height: 14,
            body_font_height: 12,
            margin: 8,
        }
    }
}

impl Default for WrapConfig {
    fn default() -> Self {
        Self {
            line_width: 44,
            wide_glyph_width: 150,
            max_lines: 0,
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            top: TOP_SCHEME,
            bottom: BOTTOM_SCHEME,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            layout: ScreenLayout::TopBottom,
            screen_gap: 0,
        }
    }
}

impl DrawingConfig {
    /// Margin as a drawing offset
    ///
    /// Margins wider than a screen push everything off it, so larger values
    /// are clamped to the screen width.
    pub fn margin_px(&self) -> i32 {
        self.margin.min(SCREEN_WIDTH as u32) as i32
    }
}

impl ColorConfig {
    /// Color scheme of one screen
    pub fn scheme(&self, screen: Screen) -> ColorScheme {
        match screen {
            Screen::Top => self.top,
            Screen::Bottom => self.bottom,
        }
    }
}

impl LayoutConfig {
    /// Create layout state with these settings
    pub fn layout_data(&self) -> ScreenLayoutData {
        ScreenLayoutData::new(self.layout, self.screen_gap)
    }
}

impl ErrorScreenConfig {
    /// Load configuration from a TOML file
    ///
    /// Sections or keys missing from the file keep their defaults.
    ///
    /// # Arguments
    /// * `path` - Path to the TOML configuration file
    ///
    /// # Returns
    /// Result containing the configuration or an error
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Save configuration to a TOML file
    ///
    /// # Arguments
    /// * `path` - Path where the TOML configuration file will be saved
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Try to load configuration from file, or create default if it doesn't exist
    ///
    /// A file that exists but can't be read or parsed is left untouched.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// ErrorScreenConfig (either loaded or default)
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load_from_file(&path) {
            Ok(config) => config,
            Err(ConfigError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                let config = Self::default();
                // Try to save default config
                if let Err(e) = config.save_to_file(&path) {
                    log::warn!("Could not save default error screen config: {}", e);
                } else {
                    log::info!(
                        "Created default error screen config at {}",
                        path.as_ref().display()
                    );
                }
                config
            }
            Err(e) => {
                log::warn!(
                    "Could not load error screen config from {} ({}), using defaults",
                    path.as_ref().display(),
                    e
                );
                Self::default()
            }
        }
    }
}
