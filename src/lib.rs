//! Song Arrangement Grid WASM Module
//!
//! Core of a browser editor for song structure: sections laid out as
//! columns, instrument lines as rows, and a free-text cell at every
//! crossing. The page renders what this module hands back and calls into
//! it for every edit, import and export.

pub mod api;
pub mod codec;
pub mod error;
pub mod grid;
pub mod metrics;
pub mod models;

// Re-export commonly used types
pub use error::{GridError, ValidationErrors, ValidationPhase};
pub use grid::{GridEvent, GridSnapshot, GridStore, TableSnapshot};
pub use models::{ItemId, Line, LineSpec, Section, SectionSpec, Settings};

use wasm_bindgen::prelude::*;

// This is like the `main` function, but for WASM modules.
#[wasm_bindgen(start)]
pub fn main() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();

    #[cfg(feature = "console_log")]
    {
        if console_log::init_with_level(log::Level::Debug).is_err() {
            api::helpers::log_warn("logger already initialized");
        }
    }

    log::info!("Song arrangement grid WASM module initialized");
}
