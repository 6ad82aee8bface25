//! Canvas document and state management.

use crate::config::SketchConfig;
use crate::history::HistoryStack;
use crate::input::PointerEvent;
use crate::shapes::{DrawMode, Shape};
use crate::tools::ToolManager;
use kurbo::Point;

/// Completed shapes together with the shapes removed by undo.
///
/// Both live here so every commit, undo, redo and clear updates them in a
/// single step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CanvasDocument {
    /// Completed shapes, oldest first.
    shapes: Vec<Shape>,
    /// Undone shapes available for redo.
    history: HistoryStack,
}

impl CanvasDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document whose history holds at most `limit` undone shapes.
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            shapes: Vec::new(),
            history: HistoryStack::with_limit(limit),
        }
    }

    /// Replace the completed shapes, dropping any redo history.
    pub fn set_shapes(&mut self, shapes: Vec<Shape>) {
        self.shapes = shapes;
        self.history.clear();
    }

    /// Append a completed shape. Redo history is discarded.
    pub fn commit(&mut self, shape: Shape) {
        log::debug!("Committed {} ({} shapes)", shape.draw_mode, self.shapes.len() + 1);
        self.shapes.push(shape);
        self.history.clear();
    }

    /// Undo the last commit.
    /// Returns true if undo was performed, false if nothing to undo or the
    /// history is full.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        let Some(shape) = self.shapes.pop() else {
            return false;
        };
        if let Err(shape) = self.history.push(shape) {
            self.shapes.push(shape);
            return false;
        }
        true
    }

    /// Redo the last undone shape.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        match self.history.pop() {
            Some(shape) => {
                self.shapes.push(shape);
                true
            }
            None => false,
        }
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.shapes.is_empty() && !self.history.is_full()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.history.is_empty()
    }

    /// Clear all shapes and the redo history.
    pub fn clear(&mut self) {
        self.shapes.clear();
        self.history.clear();
    }

    /// Completed shapes in drawing order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    /// Check if the document is empty.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Get the number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }
}

/// Document plus the tool that is drawing into it.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    pub document: CanvasDocument,
    pub tool_manager: ToolManager,
}

impl Canvas {
    /// Create a new canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a canvas configured by `config`.
    pub fn with_config(config: &SketchConfig) -> Self {
        Self {
            document: CanvasDocument::with_history_limit(config.history_limit),
            tool_manager: ToolManager::with_config(config),
        }
    }

    /// Set the current draw mode. History is left untouched.
    pub fn set_mode(&mut self, mode: DrawMode) {
        self.tool_manager.set_mode(mode);
    }

    /// Feed a pointer event to the current tool.
    /// Returns true if a shape was committed.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        let committed = match event {
            PointerEvent::Down { position } => self.tool_manager.begin(position),
            PointerEvent::Move { position } => {
                self.tool_manager.update(position);
                None
            }
            PointerEvent::Up { .. } => self.tool_manager.end(),
        };

        match committed {
            Some(shape) => {
                self.document.commit(shape);
                true
            }
            None => false,
        }
    }

    pub fn pointer_down(&mut self, position: Point) -> bool {
        self.handle_pointer(PointerEvent::Down { position })
    }

    pub fn pointer_move(&mut self, position: Point) -> bool {
        self.handle_pointer(PointerEvent::Move { position })
    }

    pub fn pointer_up(&mut self, position: Point) -> bool {
        self.handle_pointer(PointerEvent::Up { position })
    }

    /// Remove every shape and abandon the in-progress one.
    pub fn clear(&mut self) {
        self.document.clear();
        self.tool_manager.cancel();
    }

    /// The in-progress shape as it should be drawn.
    pub fn preview_shape(&self) -> Option<Shape> {
        self.tool_manager.preview_shape()
    }
}
