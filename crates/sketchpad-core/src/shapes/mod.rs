//! Shape definitions for the drawing canvas.

mod style;

pub use style::{
    DEFAULT_FILL_COLOR, DEFAULT_STROKE_WIDTH, Rgba8, STROKE_WIDTH_OPTIONS, ShapeStyle, StyleError,
    is_stroke_width_option,
};

use kurbo::{BezPath, Ellipse, Point, Rect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Kind of shape being authored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum DrawMode {
    #[default]
    FreeDraw,
    StraightLine,
    Ellipse,
    Rectangle,
    Polygon,
}

impl DrawMode {
    /// All draw modes in toolbar order.
    pub const ALL: [DrawMode; 5] = [
        DrawMode::FreeDraw,
        DrawMode::StraightLine,
        DrawMode::Ellipse,
        DrawMode::Rectangle,
        DrawMode::Polygon,
    ];

    /// Name used in persisted data and by the toolbar.
    pub fn as_str(&self) -> &'static str {
        match self {
            DrawMode::FreeDraw => "freeDraw",
            DrawMode::StraightLine => "straightLine",
            DrawMode::Ellipse => "ellipse",
            DrawMode::Rectangle => "rectangle",
            DrawMode::Polygon => "polygon",
        }
    }

    /// Whether the shape is defined by an anchor plus an extent.
    pub fn is_anchored(&self) -> bool {
        matches!(self, DrawMode::Ellipse | DrawMode::Rectangle)
    }
}

impl fmt::Display for DrawMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a draw mode name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown draw mode: {0}")]
pub struct ParseDrawModeError(pub String);

impl FromStr for DrawMode {
    type Err = ParseDrawModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DrawMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| ParseDrawModeError(s.to_string()))
    }
}

/// Structural problems found in a shape record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ShapeError {
    #[error("Odd number of coordinates: {0}")]
    OddPointCount(usize),
    #[error("{mode} expects a single anchor point, got {count} coordinates")]
    AnchorExpected { mode: DrawMode, count: usize },
    #[error("Non-finite coordinate at index {0}")]
    NonFiniteCoordinate(usize),
    #[error("Invalid extent {name}: {value}")]
    InvalidExtent { name: &'static str, value: f64 },
}

/// A shape on the canvas.
///
/// `points` is a flat list of x,y pairs. Rectangles and ellipses keep only
/// their anchor there and carry their extent in `width`/`height` or
/// `radius_x`/`radius_y`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    pub draw_mode: DrawMode,
    pub points: Vec<f64>,
    pub fill_color: String,
    pub stroke_width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl Shape {
    /// Create an empty shape for `mode` with the given style.
    pub fn new(draw_mode: DrawMode, style: &ShapeStyle) -> Self {
        Self {
            draw_mode,
            points: Vec::new(),
            fill_color: style.fill_color.clone(),
            stroke_width: style.stroke_width,
            radius_x: None,
            radius_y: None,
            width: None,
            height: None,
        }
    }

    /// Create a shape from a flat coordinate list.
    pub fn with_points(draw_mode: DrawMode, points: Vec<f64>, style: &ShapeStyle) -> Self {
        Self {
            points,
            ..Self::new(draw_mode, style)
        }
    }

    /// Create a rectangle anchored at `anchor`.
    pub fn rectangle(anchor: Point, width: f64, height: f64, style: &ShapeStyle) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::with_points(DrawMode::Rectangle, vec![anchor.x, anchor.y], style)
        }
    }

    /// Create an ellipse centered on `anchor`.
    pub fn ellipse(anchor: Point, radius_x: f64, radius_y: f64, style: &ShapeStyle) -> Self {
        Self {
            radius_x: Some(radius_x),
            radius_y: Some(radius_y),
            ..Self::with_points(DrawMode::Ellipse, vec![anchor.x, anchor.y], style)
        }
    }

    /// The style this shape was drawn with.
    pub fn style(&self) -> ShapeStyle {
        ShapeStyle {
            fill_color: self.fill_color.clone(),
            stroke_width: self.stroke_width,
        }
    }

    /// Apply a style to this shape.
    pub fn set_style(&mut self, style: &ShapeStyle) {
        self.fill_color = style.fill_color.clone();
        self.stroke_width = style.stroke_width;
    }

    /// Whether the shape has no coordinates yet.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of complete x,y pairs.
    pub fn vertex_count(&self) -> usize {
        self.points.len() / 2
    }

    /// The x,y pairs as points.
    pub fn vertices(&self) -> impl Iterator<Item = Point> + '_ {
        self.points
            .chunks_exact(2)
            .map(|pair| Point::new(pair[0], pair[1]))
    }

    /// First coordinate pair: the anchor of rectangles and ellipses, the first
    /// vertex of everything else.
    pub fn anchor(&self) -> Option<Point> {
        self.vertices().next()
    }

    /// Horizontal and vertical extent; zero when unset.
    pub fn extent(&self) -> (f64, f64) {
        match self.draw_mode {
            DrawMode::Rectangle => (self.width.unwrap_or(0.0), self.height.unwrap_or(0.0)),
            DrawMode::Ellipse => (self.radius_x.unwrap_or(0.0), self.radius_y.unwrap_or(0.0)),
            _ => (0.0, 0.0),
        }
    }

    /// Whether a rectangle or ellipse has a non-zero extent.
    pub fn has_extent(&self) -> bool {
        let (w, h) = self.extent();
        w != 0.0 || h != 0.0
    }

    /// Bounding box in canvas coordinates.
    pub fn bounds(&self) -> Option<Rect> {
        let anchor = self.anchor()?;
        match self.draw_mode {
            DrawMode::Rectangle => {
                let (w, h) = self.extent();
                Some(Rect::new(anchor.x, anchor.y, anchor.x + w, anchor.y + h))
            }
            DrawMode::Ellipse => {
                let (rx, ry) = self.extent();
                Some(Rect::new(
                    anchor.x - rx,
                    anchor.y - ry,
                    anchor.x + rx,
                    anchor.y + ry,
                ))
            }
            _ => Some(
                self.vertices()
                    .fold(Rect::from_points(anchor, anchor), |rect, p| {
                        rect.union_pt(p)
                    }),
            ),
        }
    }

    /// Path representation for rendering.
    pub fn to_path(&self) -> BezPath {
        let Some(anchor) = self.anchor() else {
            return BezPath::new();
        };
        match self.draw_mode {
            DrawMode::Rectangle => {
                let (w, h) = self.extent();
                Rect::new(anchor.x, anchor.y, anchor.x + w, anchor.y + h).to_path(0.1)
            }
            DrawMode::Ellipse => Ellipse::new(anchor, self.extent(), 0.0).to_path(0.1),
            DrawMode::FreeDraw | DrawMode::StraightLine | DrawMode::Polygon => {
                let mut path = BezPath::new();
                path.move_to(anchor);
                for point in self.vertices().skip(1) {
                    path.line_to(point);
                }
                if self.draw_mode == DrawMode::Polygon {
                    path.close_path();
                }
                path
            }
        }
    }

    /// Check the structural invariants of the record.
    pub fn validate(&self) -> Result<(), ShapeError> {
        if self.points.len() % 2 != 0 {
            return Err(ShapeError::OddPointCount(self.points.len()));
        }
        if let Some(index) = self.points.iter().position(|v| !v.is_finite()) {
            return Err(ShapeError::NonFiniteCoordinate(index));
        }
        if self.draw_mode.is_anchored() && self.points.len() != 2 {
            return Err(ShapeError::AnchorExpected {
                mode: self.draw_mode,
                count: self.points.len(),
            });
        }

        let extents = [
            ("radiusX", self.radius_x),
            ("radiusY", self.radius_y),
            ("width", self.width),
            ("height", self.height),
        ];
        for (name, value) in extents {
            if let Some(value) = value {
                if !value.is_finite() || value < 0.0 {
                    return Err(ShapeError::InvalidExtent { name, value });
                }
            }
        }
        Ok(())
    }
}

/// Euclidean distance between two points.
pub fn distance(a: Point, b: Point) -> f64 {
    (a - b).hypot()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draw_mode_names() {
        for mode in DrawMode::ALL {
            assert_eq!(mode.as_str().parse::<DrawMode>().unwrap(), mode);
        }
        assert_eq!(
            "circle".parse::<DrawMode>(),
            Err(ParseDrawModeError("circle".to_string()))
        );
    }

    #[test]
    fn test_json_field_names() {
        let shape = Shape::rectangle(Point::new(10.0, 20.0), 30.0, 40.0, &ShapeStyle::default());
        let json = serde_json::to_value(&shape).unwrap();

        assert_eq!(json["drawMode"], "rectangle");
        assert_eq!(json["points"], serde_json::json!([10.0, 20.0]));
        assert_eq!(json["fillColor"], "#1a1a1a");
        assert_eq!(json["strokeWidth"], 5.0);
        assert_eq!(json["width"], 30.0);
        assert_eq!(json["height"], 40.0);
        assert!(json.get("radiusX").is_none());
    }

    #[test]
    fn test_decode_record_without_extents() {
        let json = r##"{"drawMode":"freeDraw","points":[1,2,3,4],"fillColor":"#000000","strokeWidth":10}"##;
        let shape: Shape = serde_json::from_str(json).unwrap();

        assert_eq!(shape.draw_mode, DrawMode::FreeDraw);
        assert_eq!(shape.vertex_count(), 2);
        assert_eq!(shape.width, None);
        assert!(shape.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_odd_points() {
        let shape =
            Shape::with_points(DrawMode::FreeDraw, vec![1.0, 2.0, 3.0], &ShapeStyle::default());
        assert_eq!(shape.validate(), Err(ShapeError::OddPointCount(3)));
    }

    #[test]
    fn test_validate_rejects_extra_anchor_points() {
        let mut shape = Shape::rectangle(Point::new(0.0, 0.0), 5.0, 5.0, &ShapeStyle::default());
        shape.points.extend([1.0, 1.0]);
        assert!(matches!(
            shape.validate(),
            Err(ShapeError::AnchorExpected { count: 4, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_negative_extent() {
        let shape = Shape::ellipse(Point::new(0.0, 0.0), -1.0, 5.0, &ShapeStyle::default());
        assert!(matches!(
            shape.validate(),
            Err(ShapeError::InvalidExtent { name: "radiusX", .. })
        ));
    }

    #[test]
    fn test_rectangle_bounds() {
        let shape = Shape::rectangle(Point::new(10.0, 20.0), 100.0, 50.0, &ShapeStyle::default());
        let bounds = shape.bounds().unwrap();
        assert!((bounds.x0 - 10.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 20.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 110.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ellipse_bounds_centered_on_anchor() {
        let shape = Shape::ellipse(Point::new(50.0, 50.0), 20.0, 10.0, &ShapeStyle::default());
        let bounds = shape.bounds().unwrap();
        assert!((bounds.x0 - 30.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 60.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_polyline_bounds() {
        let shape = Shape::with_points(
            DrawMode::Polygon,
            vec![0.0, 0.0, 50.0, 0.0, 80.0, 80.0],
            &ShapeStyle::default(),
        );
        let bounds = shape.bounds().unwrap();
        assert!((bounds.width() - 80.0).abs() < f64::EPSILON);
        assert!((bounds.height() - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_shape_has_no_geometry() {
        let shape = Shape::new(DrawMode::FreeDraw, &ShapeStyle::default());
        assert!(shape.is_empty());
        assert!(shape.bounds().is_none());
        assert!(shape.to_path().elements().is_empty());
    }

    #[test]
    fn test_polygon_path_is_closed() {
        let shape = Shape::with_points(
            DrawMode::Polygon,
            vec![0.0, 0.0, 50.0, 0.0, 80.0, 80.0],
            &ShapeStyle::default(),
        );
        let path = shape.to_path();
        assert!(matches!(
            path.elements().last(),
            Some(kurbo::PathEl::ClosePath)
        ));
    }

    #[test]
    fn test_distance() {
        assert!((distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)) - 5.0).abs() < f64::EPSILON);
    }
}
