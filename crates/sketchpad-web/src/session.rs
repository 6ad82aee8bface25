//! Platform-independent glue used by the browser bindings.

use sketchpad_core::storage::{MemoryStorage, StorageResult, encode_shapes};
use sketchpad_core::{Editor, SketchConfig, Storage};

/// Open an editor on `primary`, falling back to in-memory storage when the
/// backend could not be created (e.g. `localStorage` disabled).
pub fn open_session<S: Storage + 'static>(
    primary: StorageResult<S>,
    config: &SketchConfig,
) -> Editor<Box<dyn Storage>> {
    let storage: Box<dyn Storage> = match primary {
        Ok(storage) => Box::new(storage),
        Err(e) => {
            log::warn!("Persistent storage unavailable, drawing will not be saved: {}", e);
            Box::new(MemoryStorage::new())
        }
    };
    Editor::open(storage, config)
}

/// Completed shapes as a JSON array, in the persisted format.
pub fn shape_list_json<S: Storage>(editor: &Editor<S>) -> StorageResult<String> {
    encode_shapes(editor.shapes())
}

/// The in-progress shape as JSON, if one is being drawn.
pub fn preview_json<S: Storage>(editor: &Editor<S>) -> Result<Option<String>, serde_json::Error> {
    editor
        .preview_shape()
        .map(|shape| serde_json::to_string(&shape))
        .transpose()
}
