//! Row height from measured text heights
//!
//! The page measures the intrinsic height of the line header and of each
//! cell's text; this decides the shared height of the row.

pub const MIN_ROW_HEIGHT: f64 = 50.0;

/// Vertical padding added around the tallest cell text
pub const CELL_PADDING: f64 = 8.0;

/// `max(header, tallest cell + padding, MIN_ROW_HEIGHT)`
pub fn row_height(header_height: f64, cell_heights: &[f64]) -> f64 {
    let tallest_cell = cell_heights
        .iter()
        .copied()
        .filter(|h| h.is_finite())
        .fold(None, |tallest: Option<f64>, h| {
            Some(tallest.map_or(h, |t| t.max(h)))
        });

    let cell_height = tallest_cell.map_or(0.0, |h| h + CELL_PADDING);
    let header_height = if header_height.is_finite() { header_height } else { 0.0 };

    header_height.max(cell_height).max(MIN_ROW_HEIGHT)
}
