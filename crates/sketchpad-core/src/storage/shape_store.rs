//! JSON persistence of the completed shape list.

use super::{Storage, StorageError, StorageResult};
use crate::config::DEFAULT_STORAGE_KEY;
use crate::shapes::Shape;

/// Reads and writes the shape list under a single storage key.
pub struct ShapeStore<S: Storage> {
    storage: S,
    key: String,
}

impl<S: Storage> ShapeStore<S> {
    /// Create a store keeping its shapes under `key`.
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// Create a store using the default `"shapes"` key.
    pub fn with_default_key(storage: S) -> Self {
        Self::new(storage, DEFAULT_STORAGE_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Get a reference to the storage backend.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Load the stored shapes.
    ///
    /// Returns an empty list when nothing is stored or the stored value
    /// cannot be read or decoded; the failure is logged.
    pub fn load(&self) -> Vec<Shape> {
        match self.try_load() {
            Ok(shapes) => shapes,
            Err(e) => {
                log::error!("Failed to load shapes from '{}': {}", self.key, e);
                Vec::new()
            }
        }
    }

    /// Load the stored shapes, reporting read and decode failures.
    pub fn try_load(&self) -> StorageResult<Vec<Shape>> {
        match self.storage.get(&self.key)? {
            Some(json) => decode_shapes(&json),
            None => Ok(Vec::new()),
        }
    }

    /// Replace the stored shapes.
    pub fn save(&self, shapes: &[Shape]) -> StorageResult<()> {
        let json = encode_shapes(shapes)?;
        self.storage.set(&self.key, &json)
    }

    /// Remove the stored value entirely.
    pub fn clear(&self) -> StorageResult<()> {
        self.storage.remove(&self.key)
    }
}

/// Encode shapes as a JSON array.
pub fn encode_shapes(shapes: &[Shape]) -> StorageResult<String> {
    Ok(serde_json::to_string(shapes)?)
}

/// Decode a JSON array of shapes.
///
/// A value that is not an array is an error. Individual records that do not
/// decode or fail validation are skipped with a warning.
pub fn decode_shapes(json: &str) -> StorageResult<Vec<Shape>> {
    let records: Vec<serde_json::Value> = serde_json::from_str(json)
        .map_err(|e| StorageError::Serialization(format!("Invalid shape list: {}", e)))?;

    let mut shapes = Vec::with_capacity(records.len());
    for (index, record) in records.into_iter().enumerate() {
        let shape = match serde_json::from_value::<Shape>(record) {
            Ok(shape) => shape,
            Err(e) => {
                log::warn!("Skipping shape {}: {}", index, e);
                continue;
            }
        };
        if let Err(e) = shape.validate() {
            log::warn!("Skipping shape {}: {}", index, e);
            continue;
        }
        shapes.push(shape);
    }
    Ok(shapes)
}
