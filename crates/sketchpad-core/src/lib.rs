//! Sketchpad Core Library
//!
//! Platform-agnostic shape model, pointer-driven drawing tools, undo/redo
//! history and persistence for the Sketchpad drawing tool.

pub mod canvas;
pub mod config;
pub mod editor;
pub mod history;
pub mod input;
pub mod shapes;
pub mod shortcuts;
pub mod storage;
pub mod tools;

pub use canvas::{Canvas, CanvasDocument};
pub use config::{ConfigError, SketchConfig};
pub use editor::Editor;
pub use history::{HistoryStack, MAX_UNDO_HISTORY};
pub use input::{KeyEvent, Modifiers, PointerEvent};
pub use shapes::{DrawMode, Shape, ShapeStyle};
pub use shortcuts::{Action, Shortcut, ShortcutRegistry};
pub use storage::{Storage, StorageError, StorageResult};
pub use tools::{ToolManager, ToolState};
