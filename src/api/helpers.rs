//! Shared helpers for WASM API operations
//!
//! This module owns the session's grid store and contains the common
//! patterns for serialization, deserialization, error conversion and
//! console logging used by every API function.

use lazy_static::lazy_static;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::{Mutex, MutexGuard};
use wasm_bindgen::prelude::*;

use crate::error::GridError;
use crate::grid::{GridSnapshot, GridStore};
use crate::models::IdGenerator;

// WASM-owned grid (canonical source of truth for the page)
lazy_static! {
    static ref STORE: Mutex<GridStore> = Mutex::new(GridStore::defaults_with_id_generator(session_ids()));
}

/// Id source for the session store: UUIDs when the `uuid` feature is on
#[cfg(feature = "uuid")]
pub fn session_ids() -> Box<dyn IdGenerator> {
    Box::new(crate::models::UuidIds)
}

#[cfg(not(feature = "uuid"))]
pub fn session_ids() -> Box<dyn IdGenerator> {
    Box::new(crate::models::SequentialIds::new())
}

// ============================================================================
// Logging Macros
// ============================================================================

/// Log a debug message with [WASM] prefix
#[macro_export]
macro_rules! wasm_log {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_debug(&format!($($arg)*))
    };
}

/// Log an info message with [WASM] prefix
#[macro_export]
macro_rules! wasm_info {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_info(&format!($($arg)*))
    };
}

/// Log a warning message with [WASM] ⚠️ prefix
#[macro_export]
macro_rules! wasm_warn {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_warn(&format!($($arg)*))
    };
}

/// Log an error message with [WASM] ❌ prefix
#[macro_export]
macro_rules! wasm_error {
    ($($arg:tt)*) => {
        $crate::api::helpers::log_error(&format!($($arg)*))
    };
}

// ============================================================================
// Logging Helper Functions (called by macros)
// ============================================================================

pub fn log_debug(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(&format!("[WASM] {}", msg)));
}

pub fn log_info(msg: &str) {
    web_sys::console::info_1(&JsValue::from_str(&format!("[WASM] {}", msg)));
}

pub fn log_warn(msg: &str) {
    web_sys::console::warn_1(&JsValue::from_str(&format!("[WASM] ⚠️ {}", msg)));
}

pub fn log_error(msg: &str) {
    web_sys::console::error_1(&JsValue::from_str(&format!("[WASM] ❌ {}", msg)));
}

// ============================================================================
// Store Access
// ============================================================================

/// Lock the session store, reporting a poisoned lock to JavaScript
pub fn lock_store() -> Result<MutexGuard<'static, GridStore>, JsValue> {
    STORE.lock().map_err(|e| {
        let msg = format!("Failed to lock grid store: {}", e);
        log_error(&msg);
        JsValue::from_str(&msg)
    })
}

/// Serialize the read model of `store` for the renderer
pub fn snapshot_of(store: &GridStore) -> Result<JsValue, JsValue> {
    serialize(&GridSnapshot::capture(store), "Snapshot serialization error")
}

// ============================================================================
// Serialization/Deserialization Helpers
// ============================================================================

/// Deserialize a value from JavaScript with automatic error handling
pub fn deserialize<T: DeserializeOwned>(
    value: JsValue,
    error_context: &str,
) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log_error(&msg);
        JsValue::from_str(&msg)
    })
}

/// Serialize a value to JavaScript with automatic error handling
pub fn serialize<T: Serialize>(value: &T, error_context: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| {
        let msg = format!("{}: {}", error_context, e);
        log_error(&msg);
        JsValue::from_str(&msg)
    })
}

// ============================================================================
// Result Conversion Helpers
// ============================================================================

/// Convert a grid error to a JsValue carrying its user-facing message
pub fn grid_error(err: GridError) -> JsValue {
    let msg = err.to_string();
    log_error(&msg);
    JsValue::from_str(&msg)
}
