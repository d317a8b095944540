//! Import/export operations for the WASM API
//!
//! - JSON: the interchange document, written and read back
//! - File names: `<title>_structure.<ext>` for JSON and PDF downloads
//! - Validation: itemized schema check without touching the grid

use wasm_bindgen::prelude::*;

use crate::api::helpers::{grid_error, lock_store, serialize};
use crate::codec::{self, ExportFormat};
use crate::error::GridError;
use crate::{wasm_error, wasm_info, wasm_log};

// ============================================================================
// JSON Export
// ============================================================================

/// Export the session grid as pretty-printed JSON
#[wasm_bindgen(js_name = exportJson)]
pub fn export_json() -> Result<String, JsValue> {
    wasm_info!("exportJson called");

    let store = lock_store()?;
    wasm_log!("  Grid has {} sections, {} lines", store.sections().len(), store.lines().len());

    let json = codec::to_json(&store).map_err(|e| {
        wasm_error!("JSON export error: {}", e);
        JsValue::from_str(&format!("JSON export error: {}", e))
    })?;

    wasm_info!("  JSON generated: {} bytes", json.len());
    Ok(json)
}

// ============================================================================
// JSON Import
// ============================================================================

/// Replace the session grid with an imported document
///
/// `file_name` supplies the title when the document has no `trackName`.
/// On any error the grid is left exactly as it was and the error message
/// lists every offending attribute.
///
/// # Returns
/// `{ title, sections, lines, descriptionsApplied, descriptionsDropped }`
#[wasm_bindgen(js_name = importJson)]
pub fn import_json(text: &str, file_name: &str) -> Result<JsValue, JsValue> {
    wasm_info!("importJson called: {} ({} bytes)", file_name, text.len());

    let mut store = lock_store()?;
    let summary = codec::import_json(&mut store, text, file_name).map_err(grid_error)?;

    if summary.descriptions_dropped > 0 {
        wasm_log!("  {} descriptions pointed outside the grid", summary.descriptions_dropped);
    }
    serialize(&summary, "Import summary serialization error")
}

/// Check a document without importing it
///
/// # Returns
/// Empty array when valid, otherwise the offending attribute paths
#[wasm_bindgen(js_name = validateDocument)]
pub fn validate_document(text: &str) -> Result<JsValue, JsValue> {
    let paths = match codec::parse_document(text) {
        Ok(_) => Vec::new(),
        Err(GridError::Validation(errors)) => errors.paths,
        Err(e) => return Err(grid_error(e)),
    };
    serialize(&paths, "Validation result serialization error")
}

// ============================================================================
// File names
// ============================================================================

/// Download name for the current title, `format` being "json" or "pdf"
#[wasm_bindgen(js_name = exportFileName)]
pub fn export_file_name(format: &str) -> Result<String, JsValue> {
    let format = match format {
        "json" => ExportFormat::Json,
        "pdf" => ExportFormat::Pdf,
        other => {
            return Err(grid_error(GridError::InvalidArgument(format!(
                "unknown export format '{}'",
                other
            ))))
        }
    };

    let store = lock_store()?;
    Ok(codec::export_file_name(&store.settings().track_title, format))
}

/// Title implied by an imported file name
#[wasm_bindgen(js_name = titleFromFileName)]
pub fn title_from_file_name(file_name: &str) -> String {
    codec::title_from_file_name(file_name)
}
