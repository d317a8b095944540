//! File names for exported documents and titles recovered from them

use serde::{Deserialize, Serialize};

const STRUCTURE_MARKER: &str = "_structure";
const JSON_EXTENSION: &str = ".json";

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Json,
    Pdf,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Pdf => "pdf",
        }
    }
}

/// `<title>_structure.<ext>`
pub fn export_file_name(title: &str, format: ExportFormat) -> String {
    format!("{}{}.{}", title, STRUCTURE_MARKER, format.extension())
}

/// Title implied by an imported file name
///
/// A trailing `.json` is stripped, then everything from the first
/// `_structure` on is cut: `Song_structure.json` gives `Song`.
pub fn title_from_file_name(file_name: &str) -> String {
    let stem = file_name.strip_suffix(JSON_EXTENSION).unwrap_or(file_name);
    match stem.find(STRUCTURE_MARKER) {
        Some(cut) => stem[..cut].to_string(),
        None => stem.to_string(),
    }
}
