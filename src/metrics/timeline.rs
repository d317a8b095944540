//! Time-coded ruler markers
//!
//! Markers sit on whole seconds and are scaled so the last possible second
//! lines up with the end of the bar grid. Every fifth second is major and
//! carries a label.

use serde::{Deserialize, Serialize};

/// Seconds between labelled markers
pub const MAJOR_MARKER_INTERVAL: u32 = 5;

/// One tick of the time ruler
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimelineMarker {
    pub seconds: u32,
    /// Horizontal offset in pixels from the start of the grid
    pub position: f64,
    pub major: bool,
    /// `"<seconds>s"` on major markers
    pub label: Option<String>,
}

/// Song length in seconds: one bar lasts `numerator` beats
pub fn total_seconds(total_bars: u32, bpm: u32, signature_numerator: u32) -> f64 {
    if bpm == 0 {
        return 0.0;
    }
    60.0 * f64::from(signature_numerator) * f64::from(total_bars) / f64::from(bpm)
}

/// Markers for seconds `0..=floor(total_seconds)`
///
/// An empty grid (or zero-length song) yields no markers.
pub fn timeline_markers(
    total_bars: u32,
    bpm: u32,
    signature_numerator: u32,
    pixels_per_bar: u32,
) -> Vec<TimelineMarker> {
    let total_seconds = total_seconds(total_bars, bpm, signature_numerator);
    if !total_seconds.is_finite() || total_seconds <= 0.0 {
        return Vec::new();
    }

    let total_width = f64::from(total_bars) * f64::from(pixels_per_bar);
    let last_second = total_seconds.floor() as u32;

    (0..=last_second)
        .map(|seconds| {
            let major = seconds % MAJOR_MARKER_INTERVAL == 0;
            TimelineMarker {
                seconds,
                position: f64::from(seconds) / total_seconds * total_width,
                major,
                label: major.then(|| format!("{}s", seconds)),
            }
        })
        .collect()
}
