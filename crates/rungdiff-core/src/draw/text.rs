//! Text style definitions for diagram labels.
//!
//! A [`TextDefinition`] carries font family, fill color, decoration and
//! weight; every label uses the fixed [`FONT_SIZE`].
//! [`TextDefinition::render`] turns a string into an SVG `<text>` element
//! at a given anchor point.

use svg::node::element as svg_element;

use crate::color::Color;

/// Font size of every label, one grid cell plus a quarter.
pub const FONT_SIZE: u16 = 12;

/// Default font family.
pub const DEFAULT_FONT_FAMILY: &str = "arial";

/// Horizontal alignment of a text relative to its anchor point.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    #[default]
    Middle,
    End,
}

impl TextAnchor {
    pub fn to_svg_value(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TextDecoration {
    #[default]
    None,
    LineThrough,
}

impl TextDecoration {
    /// Returns the SVG `text-decoration` value, or None for plain text.
    pub fn to_svg_value(&self) -> Option<&'static str> {
        match self {
            Self::None => None,
            Self::LineThrough => Some("line-through"),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    /// Returns the SVG `font-weight` value, or None for the default weight.
    pub fn to_svg_value(&self) -> Option<&'static str> {
        match self {
            Self::Normal => None,
            Self::Bold => Some("bold"),
        }
    }
}

/// Reusable text style.
#[derive(Debug, Clone)]
pub struct TextDefinition {
    font_family: String,
    color: Color,
    decoration: TextDecoration,
    weight: FontWeight,
}

impl TextDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn decoration(&self) -> TextDecoration {
        self.decoration
    }

    pub fn weight(&self) -> FontWeight {
        self.weight
    }

    pub fn set_font_family(&mut self, family: &str) {
        self.font_family = family.to_string();
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_decoration(&mut self, decoration: TextDecoration) {
        self.decoration = decoration;
    }

    pub fn set_weight(&mut self, weight: FontWeight) {
        self.weight = weight;
    }

    /// Renders `content` as an SVG `<text>` element.
    ///
    /// # Arguments
    ///
    /// * `content` - Text to draw
    /// * `x`, `y` - Anchor point; `y` is the baseline
    /// * `anchor` - Horizontal alignment relative to `x`
    pub fn render(&self, content: &str, x: i32, y: i32, anchor: TextAnchor) -> svg_element::Text {
        let mut text = svg_element::Text::new(content)
            .set("x", x)
            .set("y", y)
            .set("text-anchor", anchor.to_svg_value())
            .set("font-family", self.font_family.as_str())
            .set("font-size", FONT_SIZE)
            .set("fill", self.color.to_string())
            .set("fill-opacity", self.color.alpha());

        if let Some(decoration) = self.decoration.to_svg_value() {
            text = text.set("text-decoration", decoration);
        }
        if let Some(weight) = self.weight.to_svg_value() {
            text = text.set("font-weight", weight);
        }

        text
    }
}

impl Default for TextDefinition {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            color: Color::default(),
            decoration: TextDecoration::None,
            weight: FontWeight::Normal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_definition_default() {
        let text = TextDefinition::default();

        assert_eq!(text.font_family(), "arial");
        assert_eq!(text.color().to_string(), "black");
        assert_eq!(text.decoration(), TextDecoration::None);
        assert_eq!(text.weight(), FontWeight::Normal);
    }

    #[test]
    fn test_render_plain_text() {
        let rendered = TextDefinition::new()
            .render("Motor", 40, 15, TextAnchor::Middle)
            .to_string();

        assert!(rendered.contains("Motor"));
        assert!(rendered.contains("x=\"40\""));
        assert!(rendered.contains("text-anchor=\"middle\""));
        assert!(rendered.contains("font-family=\"arial\""));
        assert!(rendered.contains("font-size=\"12\""));
        assert!(!rendered.contains("text-decoration"));
        assert!(!rendered.contains("font-weight"));
    }

    #[test]
    fn test_render_decorated_text() {
        let mut definition = TextDefinition::new();
        definition.set_font_family("monospace");
        definition.set_color(Color::new("red").unwrap());
        definition.set_decoration(TextDecoration::LineThrough);
        definition.set_weight(FontWeight::Bold);

        let rendered = definition.render("IN", 5, 35, TextAnchor::Start).to_string();

        assert!(rendered.contains("text-anchor=\"start\""));
        assert!(rendered.contains("font-family=\"monospace\""));
        assert!(rendered.contains("fill=\"red\""));
        assert!(rendered.contains("text-decoration=\"line-through\""));
        assert!(rendered.contains("font-weight=\"bold\""));
    }

    #[test]
    fn test_anchor_values() {
        assert_eq!(TextAnchor::Start.to_svg_value(), "start");
        assert_eq!(TextAnchor::default().to_svg_value(), "middle");
        assert_eq!(TextAnchor::End.to_svg_value(), "end");
    }
}
