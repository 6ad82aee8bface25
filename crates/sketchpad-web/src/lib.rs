//! Sketchpad browser bindings
//!
//! Exposes the editing session to the page that renders the canvas and
//! forwards pointer and keyboard events.

mod session;

pub use session::{open_session, preview_json, shape_list_json};

#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
pub use web::Sketchpad;
