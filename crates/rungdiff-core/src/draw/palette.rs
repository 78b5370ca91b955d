//! Diff-aware color and style lookup.
//!
//! | Marker    | Color                          | Stroke width | Dash | Text decoration | Weight |
//! |-----------|--------------------------------|--------------|------|-----------------|--------|
//! | Added     | green                          | 5            | none | none            | bold   |
//! | Deleted   | red                            | 1            | `4`  | line-through    | normal |
//! | Unchanged | white (dark) / black (light)   | 1            | none | none            | normal |

use std::{fmt, str::FromStr};

use serde::Deserialize;

use crate::{
    color::Color,
    diagram::DiffMarker,
    draw::{FontWeight, StrokeDefinition, StrokeStyle, TextDecoration, TextDefinition},
};

/// Color scheme of the rendered image.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// Canvas fill color of this theme.
    pub fn background_color(&self) -> &'static str {
        match self {
            Self::Dark => "#0d1117",
            Self::Light => "#f6f8fa",
        }
    }

    /// Color of unchanged entities on this theme's background.
    pub fn foreground_color(&self) -> &'static str {
        match self {
            Self::Dark => "white",
            Self::Light => "black",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            _ => Err(format!("invalid theme `{s}`, valid values: dark, light")),
        }
    }
}

/// Immutable marker-to-style table for one render call.
#[derive(Debug, Clone)]
pub struct DiffPalette {
    foreground: Color,
    added: Color,
    deleted: Color,
    background: Color,
    font_family: String,
}

impl DiffPalette {
    /// Creates the palette of a theme.
    ///
    /// # Errors
    ///
    /// Returns an error if one of the built-in colors fails to parse, which
    /// only happens if the color crate changes its accepted syntax.
    pub fn new(theme: Theme) -> Result<Self, String> {
        Ok(Self {
            foreground: Color::new(theme.foreground_color())?,
            added: Color::new("green")?,
            deleted: Color::new("red")?,
            background: Color::new(theme.background_color())?,
            font_family: TextDefinition::default().font_family().to_string(),
        })
    }

    /// Replaces the theme's background color.
    pub fn with_background(mut self, background: Color) -> Self {
        self.background = background;
        self
    }

    /// Replaces the default font family of all texts.
    pub fn with_font_family(mut self, family: &str) -> Self {
        self.font_family = family.to_string();
        self
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    /// Returns the color for entities with the given marker.
    pub fn color(&self, marker: DiffMarker) -> Color {
        match marker {
            DiffMarker::Unchanged => self.foreground,
            DiffMarker::Deleted => self.deleted,
            DiffMarker::Added => self.added,
        }
    }

    /// Returns the outline/wire stroke for the given marker.
    pub fn stroke(&self, marker: DiffMarker) -> StrokeDefinition {
        let mut stroke = StrokeDefinition::new(self.color(marker), 1.0);
        match marker {
            DiffMarker::Added => stroke.set_width(5.0),
            DiffMarker::Deleted => stroke.set_style(StrokeStyle::Dashed),
            DiffMarker::Unchanged => {}
        }
        stroke
    }

    /// Returns the label style for the given marker.
    pub fn text(&self, marker: DiffMarker) -> TextDefinition {
        let mut text = TextDefinition::new();
        text.set_font_family(&self.font_family);
        text.set_color(self.color(marker));
        match marker {
            DiffMarker::Added => text.set_weight(FontWeight::Bold),
            DiffMarker::Deleted => text.set_decoration(TextDecoration::LineThrough),
            DiffMarker::Unchanged => {}
        }
        text
    }
}
