//! Models module for the arrangement grid
//!
//! Sections (columns), lines (rows), session settings and the ids that tie
//! them to the grid store.

pub mod ids;
pub mod line;
pub mod section;
pub mod settings;

// Re-export commonly used types
pub use ids::{IdGenerator, IdKind, ItemId, SequentialIds};
#[cfg(feature = "uuid")]
pub use ids::UuidIds;
pub use line::{Line, LinePatch, LineSpec, DEFAULT_LINE_NAMES, NEW_LINE_NAME};
pub use section::{
    Section, SectionPatch, SectionSpec, StandardSection, BAR_PIXEL_WIDTH, STANDARD_SECTIONS,
};
pub use settings::{Settings, SettingsPatch, DEFAULT_TRACK_TITLE};
