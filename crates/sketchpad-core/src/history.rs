//! Bounded buffer of undone shapes.

use crate::shapes::Shape;

/// Maximum number of undone shapes kept for redo.
pub const MAX_UNDO_HISTORY: usize = 40;

/// Shapes removed by undo, most recent last.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryStack {
    entries: Vec<Shape>,
    limit: usize,
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStack {
    /// Create an empty stack with the default limit.
    pub fn new() -> Self {
        Self::with_limit(MAX_UNDO_HISTORY)
    }

    /// Create an empty stack holding at most `limit` shapes.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit,
        }
    }

    /// Push an undone shape.
    ///
    /// Hands the shape back when the stack is already full.
    pub fn push(&mut self, shape: Shape) -> Result<(), Shape> {
        if self.is_full() {
            return Err(shape);
        }
        self.entries.push(shape);
        Ok(())
    }

    /// Pop the most recently undone shape.
    pub fn pop(&mut self) -> Option<Shape> {
        self.entries.pop()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.limit
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}
