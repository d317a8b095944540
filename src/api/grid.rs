//! Grid commands for the WASM API
//!
//! Every mutating command works on the session store and returns the fresh
//! [`GridSnapshot`](crate::grid::GridSnapshot) so the page can redraw in one
//! step. Commands on unknown ids are no-ops and still return a snapshot.

use wasm_bindgen::prelude::*;

use crate::api::helpers::{deserialize, grid_error, lock_store, serialize, snapshot_of};
use crate::grid::TableSnapshot;
use crate::models::{ItemId, LinePatch, LineSpec, SectionPatch, SectionSpec, SettingsPatch, STANDARD_SECTIONS};
use crate::{wasm_info, wasm_log, wasm_warn};

// ============================================================================
// Read models
// ============================================================================

/// Current grid, ruler included
#[wasm_bindgen(js_name = getSnapshot)]
pub fn get_snapshot() -> Result<JsValue, JsValue> {
    let store = lock_store()?;
    snapshot_of(&store)
}

/// Reduced table used by the printable export
#[wasm_bindgen(js_name = getTable)]
pub fn get_table() -> Result<JsValue, JsValue> {
    let store = lock_store()?;
    serialize(&TableSnapshot::capture(&store), "Table serialization error")
}

/// The predefined section library, in menu order
#[wasm_bindgen(js_name = standardSections)]
pub fn standard_sections() -> Result<JsValue, JsValue> {
    serialize(&STANDARD_SECTIONS, "Standard section serialization error")
}

// ============================================================================
// Sections
// ============================================================================

/// Append a section built from `{ name, color, comment?, durationBars }`
#[wasm_bindgen(js_name = addSection)]
pub fn add_section(spec_js: JsValue) -> Result<JsValue, JsValue> {
    let spec: SectionSpec = deserialize(spec_js, "Invalid section")?;
    wasm_info!("addSection called: '{}' ({} bars)", spec.name, spec.duration_bars);

    let mut store = lock_store()?;
    store.add_section(spec).map_err(grid_error)?;
    snapshot_of(&store)
}

/// Append a section from the custom dialog; a blank name becomes "Custom"
#[wasm_bindgen(js_name = addCustomSection)]
pub fn add_custom_section(name: &str, color: &str, duration_bars: u32) -> Result<JsValue, JsValue> {
    wasm_info!("addCustomSection called: '{}' {} ({} bars)", name, color, duration_bars);

    let mut store = lock_store()?;
    store
        .add_section(SectionSpec::custom(name, color, duration_bars))
        .map_err(grid_error)?;
    snapshot_of(&store)
}

/// Append the library section at `index` of [`standard_sections`]
#[wasm_bindgen(js_name = addStandardSection)]
pub fn add_standard_section(index: usize) -> Result<JsValue, JsValue> {
    let mut store = lock_store()?;
    if store.add_standard_section(index).is_none() {
        wasm_warn!("addStandardSection: no library entry at index {}", index);
    }
    snapshot_of(&store)
}

#[wasm_bindgen(js_name = deleteSection)]
pub fn delete_section(section_id: &str) -> Result<JsValue, JsValue> {
    let mut store = lock_store()?;
    store.delete_section(&ItemId::from(section_id));
    snapshot_of(&store)
}

/// Drop `dragged_id` onto `target_id`
#[wasm_bindgen(js_name = moveSection)]
pub fn move_section(dragged_id: &str, target_id: &str) -> Result<JsValue, JsValue> {
    wasm_log!("moveSection called: {} -> {}", dragged_id, target_id);

    let mut store = lock_store()?;
    store.move_section(&ItemId::from(dragged_id), &ItemId::from(target_id));
    snapshot_of(&store)
}

#[wasm_bindgen(js_name = copySection)]
pub fn copy_section(section_id: &str) -> Result<JsValue, JsValue> {
    let mut store = lock_store()?;
    store.copy_section(&ItemId::from(section_id));
    snapshot_of(&store)
}

/// Apply `{ name?, color?, comment?, durationBars? }` to one section
#[wasm_bindgen(js_name = editSection)]
pub fn edit_section(section_id: &str, patch_js: JsValue) -> Result<JsValue, JsValue> {
    let patch: SectionPatch = deserialize(patch_js, "Invalid section patch")?;

    let mut store = lock_store()?;
    store
        .edit_section(&ItemId::from(section_id), patch)
        .map_err(grid_error)?;
    snapshot_of(&store)
}

// ============================================================================
// Lines
// ============================================================================

/// Append a line; `undefined` or `{}` adds a blank "New line"
#[wasm_bindgen(js_name = addLine)]
pub fn add_line(spec_js: JsValue) -> Result<JsValue, JsValue> {
    let spec: LineSpec = if spec_js.is_undefined() || spec_js.is_null() {
        LineSpec::default()
    } else {
        deserialize(spec_js, "Invalid line")?
    };

    let mut store = lock_store()?;
    store.add_line(spec);
    snapshot_of(&store)
}

#[wasm_bindgen(js_name = deleteLine)]
pub fn delete_line(line_id: &str) -> Result<JsValue, JsValue> {
    let mut store = lock_store()?;
    store.delete_line(&ItemId::from(line_id));
    snapshot_of(&store)
}

/// Exchange the positions of two lines
#[wasm_bindgen(js_name = moveLine)]
pub fn move_line(dragged_id: &str, target_id: &str) -> Result<JsValue, JsValue> {
    wasm_log!("moveLine called: {} <-> {}", dragged_id, target_id);

    let mut store = lock_store()?;
    store.move_line(&ItemId::from(dragged_id), &ItemId::from(target_id));
    snapshot_of(&store)
}

#[wasm_bindgen(js_name = copyLine)]
pub fn copy_line(line_id: &str) -> Result<JsValue, JsValue> {
    let mut store = lock_store()?;
    store.copy_line(&ItemId::from(line_id));
    snapshot_of(&store)
}

#[wasm_bindgen(js_name = editLine)]
pub fn edit_line(line_id: &str, patch_js: JsValue) -> Result<JsValue, JsValue> {
    let patch: LinePatch = deserialize(patch_js, "Invalid line patch")?;

    let mut store = lock_store()?;
    store.edit_line(&ItemId::from(line_id), patch);
    snapshot_of(&store)
}

// ============================================================================
// Cells, settings and session
// ============================================================================

/// Store a cell's text verbatim
#[wasm_bindgen(js_name = setCell)]
pub fn set_cell(line_id: &str, section_id: &str, text: &str) -> Result<JsValue, JsValue> {
    let mut store = lock_store()?;
    store.set_cell(&ItemId::from(line_id), &ItemId::from(section_id), text);
    snapshot_of(&store)
}

/// Apply `{ showTimeline?, bpm?, signatureNumerator?, signatureDenominator? }`
///
/// An out-of-range value rejects the whole patch.
#[wasm_bindgen(js_name = setSettings)]
pub fn set_settings(patch_js: JsValue) -> Result<JsValue, JsValue> {
    let patch: SettingsPatch = deserialize(patch_js, "Invalid settings")?;

    let mut store = lock_store()?;
    store.set_settings(patch).map_err(grid_error)?;
    snapshot_of(&store)
}

#[wasm_bindgen(js_name = setTrackTitle)]
pub fn set_track_title(title: &str) -> Result<JsValue, JsValue> {
    let mut store = lock_store()?;
    store.set_track_title(title);
    snapshot_of(&store)
}

/// Clear sections and lines, keeping tempo, signature and timeline toggle
#[wasm_bindgen(js_name = resetGrid)]
pub fn reset_grid() -> Result<JsValue, JsValue> {
    wasm_info!("resetGrid called");

    let mut store = lock_store()?;
    store.reset();
    snapshot_of(&store)
}

// ============================================================================
// Row layout
// ============================================================================

/// Ids of lines whose height must be re-measured, in line order
#[wasm_bindgen(js_name = takePendingRowLayouts)]
pub fn take_pending_row_layouts() -> Result<js_sys::Array, JsValue> {
    let mut store = lock_store()?;
    let ids = store.take_pending_row_layouts();
    wasm_log!("takePendingRowLayouts: {} rows", ids.len());

    Ok(ids
        .iter()
        .map(|id| JsValue::from_str(id.as_str()))
        .collect::<js_sys::Array>())
}

/// Record measured heights for one line; returns the applied row height
#[wasm_bindgen(js_name = applyRowLayout)]
pub fn apply_row_layout(line_id: &str, header_height: f64, cell_heights: Vec<f64>) -> Result<JsValue, JsValue> {
    let mut store = lock_store()?;
    let height = store.apply_row_layout(&ItemId::from(line_id), header_height, &cell_heights);
    Ok(height.map(JsValue::from_f64).unwrap_or(JsValue::UNDEFINED))
}
