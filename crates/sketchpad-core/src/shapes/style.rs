//! Stroke and color styling for shapes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stroke widths offered by the toolbar.
pub const STROKE_WIDTH_OPTIONS: [f64; 6] = [5.0, 10.0, 20.0, 30.0, 40.0, 50.0];

/// Default fill color for new shapes.
pub const DEFAULT_FILL_COLOR: &str = "#1a1a1a";

/// Default stroke width for new shapes.
pub const DEFAULT_STROKE_WIDTH: f64 = 5.0;

/// Errors raised when a style control receives an unusable value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StyleError {
    #[error("Invalid color: {0}")]
    InvalidColor(String),
    #[error("Unsupported stroke width: {0}")]
    UnsupportedStrokeWidth(f64),
}

/// RGBA8 color decoded from a hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(color: &str) -> Option<Self> {
        let hex = color.trim().strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
        match hex.len() {
            3 => {
                // #rgb -> #rrggbb
                let r = channel(0..1)? * 17;
                let g = channel(1..2)? * 17;
                let b = channel(2..3)? * 17;
                Some(Self::new(r, g, b, 255))
            }
            6 => Some(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?, 255)),
            8 => Some(Self::new(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => None,
        }
    }
}

/// Style applied to shapes as they are drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShapeStyle {
    /// Hex color used for the stroke.
    pub fill_color: String,
    /// Stroke width in canvas pixels.
    pub stroke_width: f64,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            fill_color: DEFAULT_FILL_COLOR.to_string(),
            stroke_width: DEFAULT_STROKE_WIDTH,
        }
    }
}

impl ShapeStyle {
    /// Replace the fill color, keeping the old one if `color` is not a hex color.
    pub fn set_fill_color(&mut self, color: &str) -> Result<(), StyleError> {
        if Rgba8::from_hex(color).is_none() {
            return Err(StyleError::InvalidColor(color.to_string()));
        }
        self.fill_color = color.trim().to_string();
        Ok(())
    }

    /// Replace the stroke width with one of [`STROKE_WIDTH_OPTIONS`].
    pub fn set_stroke_width(&mut self, width: f64) -> Result<(), StyleError> {
        if !is_stroke_width_option(width) {
            return Err(StyleError::UnsupportedStrokeWidth(width));
        }
        self.stroke_width = width;
        Ok(())
    }

    /// The fill color decoded to RGBA, if it is a valid hex color.
    pub fn fill_rgba(&self) -> Option<Rgba8> {
        Rgba8::from_hex(&self.fill_color)
    }

    /// Check a style that was built without going through the setters.
    pub fn validate(&self) -> Result<(), StyleError> {
        if self.fill_rgba().is_none() {
            return Err(StyleError::InvalidColor(self.fill_color.clone()));
        }
        if !is_stroke_width_option(self.stroke_width) {
            return Err(StyleError::UnsupportedStrokeWidth(self.stroke_width));
        }
        Ok(())
    }
}

/// Whether `width` is one of the toolbar stroke widths.
pub fn is_stroke_width_option(width: f64) -> bool {
    STROKE_WIDTH_OPTIONS
        .iter()
        .any(|option| (option - width).abs() < f64::EPSILON)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_colors() {
        assert_eq!(Rgba8::from_hex("#1a1a1a"), Some(Rgba8::new(26, 26, 26, 255)));
        assert_eq!(Rgba8::from_hex("#fff"), Some(Rgba8::new(255, 255, 255, 255)));
        assert_eq!(Rgba8::from_hex("#ff000080"), Some(Rgba8::new(255, 0, 0, 128)));
        assert_eq!(Rgba8::from_hex("1a1a1a"), None);
        assert_eq!(Rgba8::from_hex("#12345"), None);
        assert_eq!(Rgba8::from_hex("#ggg"), None);
    }

    #[test]
    fn test_default_style() {
        let style = ShapeStyle::default();
        assert_eq!(style.fill_color, "#1a1a1a");
        assert!((style.stroke_width - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_set_fill_color() {
        let mut style = ShapeStyle::default();
        style.set_fill_color("#3aa9ff").unwrap();
        assert_eq!(style.fill_color, "#3aa9ff");

        let err = style.set_fill_color("blue").unwrap_err();
        assert_eq!(err, StyleError::InvalidColor("blue".to_string()));
        assert_eq!(style.fill_color, "#3aa9ff");
    }

    #[test]
    fn test_set_stroke_width() {
        let mut style = ShapeStyle::default();
        for width in STROKE_WIDTH_OPTIONS {
            style.set_stroke_width(width).unwrap();
            assert!((style.stroke_width - width).abs() < f64::EPSILON);
        }

        assert!(style.set_stroke_width(7.0).is_err());
        assert!((style.stroke_width - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate_style() {
        assert!(ShapeStyle::default().validate().is_ok());

        let style = ShapeStyle {
            fill_color: "blue".to_string(),
            stroke_width: 5.0,
        };
        assert_eq!(style.validate(), Err(StyleError::InvalidColor("blue".to_string())));

        let style = ShapeStyle {
            stroke_width: 7.0,
            ..ShapeStyle::default()
        };
        assert_eq!(style.validate(), Err(StyleError::UnsupportedStrokeWidth(7.0)));
    }

    #[test]
    fn test_partial_style_json_uses_defaults() {
        let style: ShapeStyle = serde_json::from_str(r##"{"fillColor":"#ffffff"}"##).unwrap();
        assert_eq!(style.fill_color, "#ffffff");
        assert!((style.stroke_width - DEFAULT_STROKE_WIDTH).abs() < f64::EPSILON);
    }
}
