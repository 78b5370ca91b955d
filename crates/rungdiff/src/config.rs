//! Configuration types for Rungdiff rendering.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file by the CLI.
//!
//! - [`AppConfig`] - Top-level application configuration.
//! - [`StyleConfig`] - Theme, background color and font of rendered images.
//!
//! # Example
//!
//! ```
//! # use rungdiff::config::AppConfig;
//! # use rungdiff::draw::Theme;
//! let config = AppConfig::default();
//! assert_eq!(config.style().theme(), Theme::Dark);
//! assert!(config.style().palette().is_ok());
//! ```

use serde::Deserialize;

use rungdiff_core::{
    color::Color,
    draw::{DiffPalette, Theme},
};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    pub fn new(style: StyleConfig) -> Self {
        Self { style }
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns a mutable reference to the style configuration, used to
    /// apply command-line overrides.
    pub fn style_mut(&mut self) -> &mut StyleConfig {
        &mut self.style
    }
}

/// Visual styling configuration for rendered diagrams.
///
/// Fields that are not set fall back to the theme's defaults.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Color scheme, `dark` or `light`.
    #[serde(default)]
    theme: Theme,

    /// Background color overriding the theme's, as a color string.
    #[serde(default)]
    background_color: Option<String>,

    /// Font family of all labels.
    #[serde(default)]
    font_family: Option<String>,
}

impl StyleConfig {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    pub fn font_family(&self) -> Option<&str> {
        self.font_family.as_deref()
    }

    /// Builds the diff palette described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the background color cannot be parsed.
    pub fn palette(&self) -> Result<DiffPalette, String> {
        let mut palette = DiffPalette::new(self.theme)?;

        if let Some(background) = self.background_color()? {
            palette = palette.with_background(background);
        }
        if let Some(font_family) = self.font_family() {
            palette = palette.with_font_family(font_family);
        }

        Ok(palette)
    }
}
