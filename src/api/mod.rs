//! Arrangement Grid WASM API
//!
//! This module provides the JavaScript-facing API for the grid editor.
//! The session grid lives in a single store owned by `helpers`; every
//! function locks it, runs one command and hands back a serialized view.
//!
//! # Module Structure
//!
//! - `helpers`: the session store, serialization, error conversion and logging
//! - `grid`: section, line, cell and settings commands plus read models
//! - `export`: JSON import/export and file naming
//! - `metrics`: stateless ruler and row-height helpers

pub mod helpers;
pub mod export;
pub mod grid;
pub mod metrics;

// Re-export all public functions to keep a flat API surface
pub use grid::*;
pub use export::{export_json, import_json, validate_document, export_file_name, title_from_file_name};
pub use metrics::{timeline_markers, total_seconds, row_height};
