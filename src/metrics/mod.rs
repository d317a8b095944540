//! Derived metrics for the arrangement grid
//!
//! Pure functions recomputed in full after every structural edit: bar
//! count and labels, the time ruler, and row heights.
//!
//! ## Modules
//!
//! - `timeline`: second markers from BPM and time signature
//! - `layout`: row height from measured text heights

pub mod layout;
pub mod timeline;

use serde::{Deserialize, Serialize};

use crate::models::{Section, Settings, BAR_PIXEL_WIDTH};

pub use layout::{row_height, CELL_PADDING, MIN_ROW_HEIGHT};
pub use timeline::{timeline_markers, total_seconds, TimelineMarker};

/// Sum of all section durations
pub fn total_bars(sections: &[Section]) -> u32 {
    sections.iter().map(|s| s.duration_bars).sum()
}

/// `1..=total_bars`
pub fn bar_labels(total_bars: u32) -> Vec<u32> {
    (1..=total_bars).collect()
}

/// Everything drawn above the grid: bar numbers and, when enabled, time
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Ruler {
    pub total_bars: u32,
    pub total_width: u32,
    pub total_seconds: f64,
    pub bar_labels: Vec<u32>,
    /// Empty when the timeline is hidden
    pub markers: Vec<TimelineMarker>,
}

pub fn ruler(sections: &[Section], settings: &Settings) -> Ruler {
    let total_bars = total_bars(sections);
    let markers = if settings.show_timeline {
        timeline_markers(
            total_bars,
            settings.bpm,
            settings.signature_numerator,
            BAR_PIXEL_WIDTH,
        )
    } else {
        Vec::new()
    };

    Ruler {
        total_bars,
        total_width: total_bars * BAR_PIXEL_WIDTH,
        total_seconds: total_seconds(total_bars, settings.bpm, settings.signature_numerator),
        bar_labels: bar_labels(total_bars),
        markers,
    }
}
