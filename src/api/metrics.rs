//! Stateless metric helpers for the WASM API
//!
//! These do not touch the session store; the page can use them to preview
//! a ruler or a row height before committing a change.

use wasm_bindgen::prelude::*;

use crate::api::helpers::serialize;
use crate::metrics;
use crate::models::BAR_PIXEL_WIDTH;

/// Time ruler markers for a song of `total_bars`
#[wasm_bindgen(js_name = timelineMarkers)]
pub fn timeline_markers(total_bars: u32, bpm: u32, signature_numerator: u32) -> Result<JsValue, JsValue> {
    let markers = metrics::timeline_markers(total_bars, bpm, signature_numerator, BAR_PIXEL_WIDTH);
    serialize(&markers, "Timeline serialization error")
}

/// Song length in seconds
#[wasm_bindgen(js_name = totalSeconds)]
pub fn total_seconds(total_bars: u32, bpm: u32, signature_numerator: u32) -> f64 {
    metrics::total_seconds(total_bars, bpm, signature_numerator)
}

/// Shared height of a row from its measured header and cell heights
#[wasm_bindgen(js_name = rowHeight)]
pub fn row_height(header_height: f64, cell_heights: Vec<f64>) -> f64 {
    metrics::row_height(header_height, &cell_heights)
}
