//! Import/export codec for the JSON interchange document
//!
//! ## Modules
//!
//! - `document`: serde types of the interchange format
//! - `validate`: two-phase structural validation of untyped JSON
//! - `export`: grid store -> document
//! - `import`: document -> grid store
//! - `naming`: export file names and titles derived from file names
//!
//! Rows are always called `lines` / `lineNumber`; documents using the
//! `tracks` spelling are rejected as missing `lines`.

pub mod document;
pub mod export;
pub mod import;
pub mod naming;
pub mod validate;

pub use document::{Description, DocumentSettings, GridDocument, NumberedLine, NumberedSection};
pub use export::{to_document, to_json};
pub use import::{import_json, parse_document, to_contents, ImportSummary};
pub use naming::{export_file_name, title_from_file_name, ExportFormat};
pub use validate::{is_hex_color, validate_document};
