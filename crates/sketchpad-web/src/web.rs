//! WebAssembly entry point and the `Sketchpad` class exported to JavaScript.

use crate::session;
use sketchpad_core::shapes::STROKE_WIDTH_OPTIONS;
use sketchpad_core::storage::create_default_storage;
use sketchpad_core::{DrawMode, Editor, KeyEvent, Modifiers, SketchConfig, Storage};
use wasm_bindgen::prelude::*;

fn js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Initialize logging and panic reporting.
#[wasm_bindgen(start)]
pub fn start() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    if console_log::init_with_level(log::Level::Info).is_ok() {
        log::info!("Starting Sketchpad (WASM)");
    }
}

/// Drawing session persisted to `localStorage`.
#[wasm_bindgen]
pub struct Sketchpad {
    editor: Editor<Box<dyn Storage>>,
}

#[wasm_bindgen]
impl Sketchpad {
    /// Open the session, restoring shapes saved by a previous visit.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Sketchpad {
        Self {
            editor: session::open_session(create_default_storage(), &SketchConfig::default()),
        }
    }

    /// Open the session with a JSON configuration.
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(config_json: &str) -> Result<Sketchpad, JsValue> {
        let config = SketchConfig::from_json(config_json).map_err(js_error)?;
        Ok(Self {
            editor: session::open_session(create_default_storage(), &config),
        })
    }

    /// Returns true if a shape was committed.
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&mut self, x: f64, y: f64) -> bool {
        self.editor.pointer_down(x, y)
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        self.editor.pointer_move(x, y)
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&mut self, x: f64, y: f64) -> bool {
        self.editor.pointer_up(x, y)
    }

    /// Select a draw mode by name (`freeDraw`, `straightLine`, `ellipse`,
    /// `rectangle` or `polygon`).
    #[wasm_bindgen(js_name = setMode)]
    pub fn set_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode: DrawMode = mode.parse().map_err(js_error)?;
        self.editor.set_mode(mode);
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String {
        self.editor.mode().to_string()
    }

    #[wasm_bindgen(js_name = setFillColor)]
    pub fn set_fill_color(&mut self, color: &str) -> Result<(), JsValue> {
        self.editor.set_fill_color(color).map_err(js_error)
    }

    #[wasm_bindgen(js_name = setStrokeWidth)]
    pub fn set_stroke_width(&mut self, width: f64) -> Result<(), JsValue> {
        self.editor.set_stroke_width(width).map_err(js_error)
    }

    #[wasm_bindgen(js_name = strokeWidthOptions)]
    pub fn stroke_width_options() -> Vec<f64> {
        STROKE_WIDTH_OPTIONS.to_vec()
    }

    pub fn undo(&mut self) -> bool {
        self.editor.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.editor.redo()
    }

    pub fn clear(&mut self) {
        self.editor.clear();
    }

    pub fn cancel(&mut self) {
        self.editor.cancel();
    }

    #[wasm_bindgen(js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.editor.can_undo()
    }

    #[wasm_bindgen(js_name = canRedo)]
    pub fn can_redo(&self) -> bool {
        self.editor.can_redo()
    }

    /// Handle a key press. Returns true if it triggered a shortcut, so the
    /// page can suppress the browser default.
    #[wasm_bindgen(js_name = keyDown)]
    pub fn key_down(&mut self, key: &str, ctrl: bool, shift: bool) -> bool {
        let modifiers = Modifiers {
            ctrl,
            shift,
            ..Modifiers::default()
        };
        self.editor
            .handle_key(&KeyEvent::Pressed(key.to_string()), modifiers)
            .is_some()
    }

    /// Completed shapes as a JSON array.
    #[wasm_bindgen(js_name = shapesJson)]
    pub fn shapes_json(&self) -> Result<String, JsValue> {
        session::shape_list_json(&self.editor).map_err(js_error)
    }

    /// The in-progress shape as JSON, or `undefined` when idle.
    #[wasm_bindgen(js_name = previewJson)]
    pub fn preview_json(&self) -> Result<Option<String>, JsValue> {
        session::preview_json(&self.editor).map_err(js_error)
    }
}

impl Default for Sketchpad {
    fn default() -> Self {
        Self::new()
    }
}
