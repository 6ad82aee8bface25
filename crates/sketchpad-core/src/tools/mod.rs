//! Tool system: turns pointer input into shape geometry.

use crate::config::{DEFAULT_CLOSE_RADIUS, SketchConfig};
use crate::shapes::{DrawMode, Shape, ShapeStyle, StyleError, distance};
use kurbo::Point;

/// Off-canvas cursor position the polygon tool starts from.
pub const POLYGON_PLACEHOLDER: Point = Point::new(-50.0, -50.0);

/// State of a tool interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolState {
    /// Waiting for a pointer-down.
    #[default]
    Idle,
    /// A shape is being drawn.
    Active,
}

/// Manages the current draw mode and the in-progress shape.
#[derive(Debug, Clone)]
pub struct ToolManager {
    /// Currently selected draw mode.
    current_mode: DrawMode,
    /// Current state of the tool.
    pub state: ToolState,
    /// Style applied to new shapes.
    current_style: ShapeStyle,
    /// Shape being drawn. For polygons this holds clicked vertices only.
    draft: Shape,
    /// Provisional polygon vertex following the cursor.
    cursor: Option<Point>,
    /// Polygon closing radius.
    close_radius: f64,
}

impl Default for ToolManager {
    fn default() -> Self {
        let style = ShapeStyle::default();
        Self {
            current_mode: DrawMode::default(),
            state: ToolState::default(),
            draft: Shape::new(DrawMode::default(), &style),
            current_style: style,
            cursor: None,
            close_radius: DEFAULT_CLOSE_RADIUS,
        }
    }
}

impl ToolManager {
    /// Create a new tool manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tool manager using the style and closing radius from `config`.
    ///
    /// A default style that fails validation is replaced by [`ShapeStyle::default`].
    pub fn with_config(config: &SketchConfig) -> Self {
        let style = match config.validate() {
            Ok(()) => config.default_style.clone(),
            Err(e) => {
                log::warn!("Ignoring configured default style: {}", e);
                ShapeStyle::default()
            }
        };
        Self {
            draft: Shape::new(DrawMode::default(), &style),
            current_style: style,
            close_radius: config.close_radius,
            ..Self::default()
        }
    }

    pub fn current_mode(&self) -> DrawMode {
        self.current_mode
    }

    pub fn current_style(&self) -> &ShapeStyle {
        &self.current_style
    }

    /// Switch draw mode, discarding the in-progress shape.
    ///
    /// The polygon tool is armed immediately with its cursor parked at
    /// [`POLYGON_PLACEHOLDER`].
    pub fn set_mode(&mut self, mode: DrawMode) {
        self.current_mode = mode;
        self.draft = Shape::new(mode, &self.current_style);
        if mode == DrawMode::Polygon {
            self.state = ToolState::Active;
            self.cursor = Some(POLYGON_PLACEHOLDER);
        } else {
            self.state = ToolState::Idle;
            self.cursor = None;
        }
    }

    /// Change the fill color of the current and future shapes.
    pub fn set_fill_color(&mut self, color: &str) -> Result<(), StyleError> {
        self.current_style.set_fill_color(color)?;
        self.draft.set_style(&self.current_style);
        Ok(())
    }

    /// Change the stroke width of the current and future shapes.
    pub fn set_stroke_width(&mut self, width: f64) -> Result<(), StyleError> {
        self.current_style.set_stroke_width(width)?;
        self.draft.set_style(&self.current_style);
        Ok(())
    }

    /// Handle a pointer-down. Returns a polygon when the click closes it.
    pub fn begin(&mut self, point: Point) -> Option<Shape> {
        let style = self.current_style.clone();
        match self.current_mode {
            DrawMode::FreeDraw => {
                self.draft = Shape::with_points(DrawMode::FreeDraw, vec![point.x, point.y], &style);
            }
            DrawMode::StraightLine => {
                self.draft = Shape::with_points(
                    DrawMode::StraightLine,
                    vec![point.x, point.y, point.x, point.y],
                    &style,
                );
            }
            DrawMode::Rectangle => {
                self.draft = Shape::rectangle(point, 0.0, 0.0, &style);
            }
            DrawMode::Ellipse => {
                self.draft = Shape::ellipse(point, 0.0, 0.0, &style);
            }
            DrawMode::Polygon => return self.polygon_click(point),
        }
        self.state = ToolState::Active;
        None
    }

    fn polygon_click(&mut self, point: Point) -> Option<Shape> {
        let closes = self.draft.vertex_count() >= 2
            && self
                .draft
                .anchor()
                .is_some_and(|first| distance(first, point) < self.close_radius);

        if closes {
            let polygon = std::mem::replace(
                &mut self.draft,
                Shape::new(DrawMode::Polygon, &self.current_style),
            );
            self.state = ToolState::Idle;
            self.cursor = None;
            log::debug!("Closed polygon with {} vertices", polygon.vertex_count());
            return Some(polygon);
        }

        self.draft.points.extend([point.x, point.y]);
        self.cursor = Some(point);
        self.state = ToolState::Active;
        None
    }

    /// Handle a pointer-move.
    pub fn update(&mut self, point: Point) {
        if self.state != ToolState::Active {
            return;
        }
        if self.current_mode == DrawMode::Polygon {
            self.cursor = Some(point);
            return;
        }
        let Some(anchor) = self.draft.anchor() else {
            return;
        };

        match self.current_mode {
            DrawMode::FreeDraw => self.draft.points.extend([point.x, point.y]),
            DrawMode::StraightLine => {
                self.draft.points.truncate(2);
                self.draft.points.extend([point.x, point.y]);
            }
            DrawMode::Rectangle => {
                self.draft.width = Some((point.x - anchor.x).abs());
                self.draft.height = Some((point.y - anchor.y).abs());
            }
            DrawMode::Ellipse => {
                self.draft.radius_x = Some((point.x - anchor.x).abs());
                self.draft.radius_y = Some((point.y - anchor.y).abs());
            }
            DrawMode::Polygon => {}
        }
    }

    /// Handle a pointer-up and return the shape to commit, if any.
    ///
    /// Polygons are only committed by a closing click.
    pub fn end(&mut self) -> Option<Shape> {
        if self.current_mode == DrawMode::Polygon || self.state != ToolState::Active {
            return None;
        }

        let shape = std::mem::replace(
            &mut self.draft,
            Shape::new(self.current_mode, &self.current_style),
        );
        self.state = ToolState::Idle;

        let complete = match shape.draw_mode {
            DrawMode::Rectangle | DrawMode::Ellipse => shape.has_extent(),
            _ => !shape.is_empty(),
        };
        complete.then_some(shape)
    }

    /// Cancel the current interaction.
    pub fn cancel(&mut self) {
        self.set_mode(self.current_mode);
    }

    /// Check if a tool interaction is active.
    pub fn is_active(&self) -> bool {
        self.state == ToolState::Active
    }

    /// The in-progress shape without the provisional polygon vertex.
    pub fn draft(&self) -> &Shape {
        &self.draft
    }

    /// Get the in-progress shape as it should be drawn.
    pub fn preview_shape(&self) -> Option<Shape> {
        if !self.is_active() {
            return None;
        }
        if self.current_mode == DrawMode::Polygon {
            let mut preview = self.draft.clone();
            if let Some(cursor) = self.cursor {
                preview.points.extend([cursor.x, cursor.y]);
            }
            return Some(preview);
        }
        (!self.draft.is_empty()).then(|| self.draft.clone())
    }
}
