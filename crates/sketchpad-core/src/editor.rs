//! Editing session: canvas, tools and persistence under one owner.

use crate::canvas::Canvas;
use crate::config::SketchConfig;
use crate::input::{KeyEvent, Modifiers, PointerEvent};
use crate::shapes::{DrawMode, Shape, ShapeStyle, StyleError};
use crate::shortcuts::{Action, ShortcutRegistry};
use crate::storage::{ShapeStore, Storage};

/// Controller owning all editing state.
///
/// Every change to the completed shape list is written to storage before the
/// call returns.
pub struct Editor<S: Storage> {
    canvas: Canvas,
    store: ShapeStore<S>,
}

impl<S: Storage> Editor<S> {
    /// Open a session with the default configuration.
    pub fn new(storage: S) -> Self {
        Self::open(storage, &SketchConfig::default())
    }

    /// Open a session, restoring any shapes previously saved in `storage`.
    pub fn open(storage: S, config: &SketchConfig) -> Self {
        let store = ShapeStore::new(storage, config.storage_key.clone());
        let mut canvas = Canvas::with_config(config);
        let shapes = store.load();
        log::info!("Loaded {} shapes from '{}'", shapes.len(), store.key());
        canvas.document.set_shapes(shapes);
        Self { canvas, store }
    }

    /// Completed shapes in drawing order.
    pub fn shapes(&self) -> &[Shape] {
        self.canvas.document.shapes()
    }

    /// The in-progress shape as it should be drawn.
    pub fn preview_shape(&self) -> Option<Shape> {
        self.canvas.preview_shape()
    }

    pub fn mode(&self) -> DrawMode {
        self.canvas.tool_manager.current_mode()
    }

    pub fn style(&self) -> &ShapeStyle {
        self.canvas.tool_manager.current_style()
    }

    pub fn can_undo(&self) -> bool {
        self.canvas.document.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.canvas.document.can_redo()
    }

    /// Number of undone shapes available for redo.
    pub fn history_len(&self) -> usize {
        self.canvas.document.history().len()
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn store(&self) -> &ShapeStore<S> {
        &self.store
    }

    /// Feed a pointer event. Returns true if a shape was committed.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        let committed = self.canvas.handle_pointer(event);
        if committed {
            self.persist();
        }
        committed
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        self.handle_pointer(PointerEvent::down(x, y))
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.handle_pointer(PointerEvent::moved(x, y))
    }

    pub fn pointer_up(&mut self, x: f64, y: f64) -> bool {
        self.handle_pointer(PointerEvent::up(x, y))
    }

    /// Switch draw mode, discarding the in-progress shape.
    pub fn set_mode(&mut self, mode: DrawMode) {
        log::debug!("Draw mode: {}", mode);
        self.canvas.set_mode(mode);
    }

    pub fn set_fill_color(&mut self, color: &str) -> Result<(), StyleError> {
        self.canvas.tool_manager.set_fill_color(color)
    }

    pub fn set_stroke_width(&mut self, width: f64) -> Result<(), StyleError> {
        self.canvas.tool_manager.set_stroke_width(width)
    }

    /// Undo the last commit. No-op when nothing can be undone.
    pub fn undo(&mut self) -> bool {
        let changed = self.canvas.document.undo();
        if changed {
            self.persist();
        } else {
            log::debug!("Nothing to undo");
        }
        changed
    }

    /// Redo the last undone shape. No-op when the history is empty.
    pub fn redo(&mut self) -> bool {
        let changed = self.canvas.document.redo();
        if changed {
            self.persist();
        } else {
            log::debug!("Nothing to redo");
        }
        changed
    }

    /// Remove every shape and empty the history.
    pub fn clear(&mut self) {
        self.canvas.clear();
        self.persist();
    }

    /// Abandon the in-progress shape.
    pub fn cancel(&mut self) {
        self.canvas.tool_manager.cancel();
    }

    /// Run the shortcut bound to a key press.
    /// Returns the action that was triggered, if any.
    pub fn handle_key(&mut self, event: &KeyEvent, modifiers: Modifiers) -> Option<Action> {
        let KeyEvent::Pressed(key) = event else {
            return None;
        };
        let action = ShortcutRegistry::resolve(key, modifiers)?;
        match action {
            Action::Undo => {
                self.undo();
            }
            Action::Redo => {
                self.redo();
            }
            Action::Cancel => self.cancel(),
        }
        Some(action)
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(self.shapes()) {
            log::warn!("Failed to save shapes: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, StorageError, StorageResult};

    fn draw_line<S: Storage>(editor: &mut Editor<S>, x: f64) {
        editor.set_mode(DrawMode::StraightLine);
        editor.pointer_down(x, 0.0);
        editor.pointer_move(x, 10.0);
        assert!(editor.pointer_up(x, 10.0));
    }

    #[test]
    fn test_commit_is_persisted() {
        let storage = MemoryStorage::new();
        let mut editor = Editor::new(&storage);
        draw_line(&mut editor, 1.0);

        let saved = editor.store().load();
        assert_eq!(saved, editor.shapes());
        assert_eq!(saved.len(), 1);
    }

    #[test]
    fn test_reopen_restores_shapes() {
        let storage = MemoryStorage::new();
        {
            let mut editor = Editor::new(&storage);
            draw_line(&mut editor, 1.0);
            draw_line(&mut editor, 2.0);
        }

        let editor = Editor::new(&storage);
        assert_eq!(editor.shapes().len(), 2);
        assert!(!editor.can_redo());
    }

    #[test]
    fn test_undo_redo_persisted() {
        let storage = MemoryStorage::new();
        let mut editor = Editor::new(&storage);
        draw_line(&mut editor, 1.0);
        draw_line(&mut editor, 2.0);

        assert!(editor.undo());
        assert_eq!(editor.store().load().len(), 1);
        assert_eq!(editor.history_len(), 1);

        assert!(editor.redo());
        assert_eq!(editor.store().load().len(), 2);
        assert_eq!(editor.history_len(), 0);
    }

    #[test]
    fn test_commit_after_undo_drops_redo() {
        let mut editor = Editor::new(MemoryStorage::new());
        draw_line(&mut editor, 1.0);
        draw_line(&mut editor, 2.0);
        editor.undo();

        draw_line(&mut editor, 3.0);
        assert!(!editor.redo());
        assert_eq!(editor.shapes().len(), 2);
    }

    #[test]
    fn test_clear_empties_everything() {
        let storage = MemoryStorage::new();
        let mut editor = Editor::new(&storage);
        draw_line(&mut editor, 1.0);
        draw_line(&mut editor, 2.0);
        editor.undo();

        editor.clear();
        assert!(editor.shapes().is_empty());
        assert_eq!(editor.history_len(), 0);
        assert!(!editor.undo());
        assert!(!editor.redo());
        assert_eq!(storage.get("shapes").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_malformed_storage_opens_empty() {
        let storage = MemoryStorage::new();
        storage.set("shapes", "definitely not json").unwrap();

        let mut editor = Editor::new(&storage);
        assert!(editor.shapes().is_empty());

        draw_line(&mut editor, 1.0);
        assert_eq!(editor.store().load().len(), 1);
    }

    #[test]
    fn test_keyboard_shortcuts() {
        let mut editor = Editor::new(MemoryStorage::new());
        draw_line(&mut editor, 1.0);

        let undo = KeyEvent::Pressed("z".to_string());
        assert_eq!(editor.handle_key(&undo, Modifiers::CTRL), Some(Action::Undo));
        assert!(editor.shapes().is_empty());

        let redo = KeyEvent::Pressed("y".to_string());
        assert_eq!(editor.handle_key(&redo, Modifiers::CTRL), Some(Action::Redo));
        assert_eq!(editor.shapes().len(), 1);

        assert_eq!(editor.handle_key(&undo, Modifiers::none()), None);
        let released = KeyEvent::Released("z".to_string());
        assert_eq!(editor.handle_key(&released, Modifiers::CTRL), None);
        assert_eq!(editor.shapes().len(), 1);
    }

    #[test]
    fn test_escape_cancels_polygon() {
        let mut editor = Editor::new(MemoryStorage::new());
        editor.set_mode(DrawMode::Polygon);
        editor.pointer_down(0.0, 0.0);
        editor.pointer_down(50.0, 0.0);

        let escape = KeyEvent::Pressed("Escape".to_string());
        assert_eq!(editor.handle_key(&escape, Modifiers::none()), Some(Action::Cancel));
        assert!(editor.canvas().tool_manager.draft().is_empty());
        assert!(editor.shapes().is_empty());
    }

    #[test]
    fn test_polygon_session() {
        let mut editor = Editor::new(MemoryStorage::new());
        editor.set_mode(DrawMode::Polygon);
        for (x, y) in [(0.0, 0.0), (50.0, 0.0), (80.0, 80.0)] {
            editor.pointer_move(x, y);
            assert!(!editor.pointer_down(x, y));
            editor.pointer_up(x, y);
        }
        editor.pointer_move(20.0, 20.0);
        assert!(!editor.pointer_down(20.0, 20.0));
        assert!(editor.pointer_down(3.0, 4.0));

        assert_eq!(editor.shapes().len(), 1);
        assert_eq!(editor.shapes()[0].vertex_count(), 4);
        assert_eq!(editor.store().load().len(), 1);
    }

    #[test]
    fn test_style_controls() {
        let mut editor = Editor::new(MemoryStorage::new());
        editor.set_fill_color("#3aa9ff").unwrap();
        editor.set_stroke_width(30.0).unwrap();
        assert!(editor.set_stroke_width(31.0).is_err());

        draw_line(&mut editor, 1.0);
        assert_eq!(editor.shapes()[0].fill_color, "#3aa9ff");
        assert!((editor.shapes()[0].stroke_width - 30.0).abs() < f64::EPSILON);
        assert_eq!(editor.mode(), DrawMode::StraightLine);
    }

    #[test]
    fn test_custom_storage_key() {
        let storage = MemoryStorage::new();
        let config = SketchConfig {
            storage_key: "drawing".to_string(),
            ..SketchConfig::default()
        };
        let mut editor = Editor::open(&storage, &config);
        draw_line(&mut editor, 1.0);

        assert!(storage.exists("drawing").unwrap());
        assert!(!storage.exists("shapes").unwrap());
    }

    #[test]
    fn test_invalid_configured_style_never_persisted() {
        let storage = MemoryStorage::new();
        let config = SketchConfig {
            default_style: ShapeStyle {
                fill_color: "blue".to_string(),
                stroke_width: 7.0,
            },
            ..SketchConfig::default()
        };
        let mut editor = Editor::open(&storage, &config);
        editor.pointer_down(5.0, 5.0);
        assert!(editor.pointer_up(5.0, 5.0));

        let saved = editor.store().load();
        assert_eq!(saved[0].fill_color, "#1a1a1a");
        assert!((saved[0].stroke_width - 5.0).abs() < f64::EPSILON);
    }

    struct ReadOnlyStorage;

    impl Storage for ReadOnlyStorage {
        fn get(&self, _key: &str) -> StorageResult<Option<String>> {
            Ok(None)
        }

        fn set(&self, key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Io(format!("{} is read-only", key)))
        }

        fn remove(&self, _key: &str) -> StorageResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failed_save_keeps_state() {
        let mut editor = Editor::new(ReadOnlyStorage);
        draw_line(&mut editor, 1.0);

        assert_eq!(editor.shapes().len(), 1);
        assert!(editor.undo());
        assert!(editor.shapes().is_empty());
    }
}
