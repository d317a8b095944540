//! The JSON interchange document
//!
//! Numbering is 1-based and positional: it reflects the order at export
//! time and is not an identifier. Only non-blank cells are listed, as
//! `(sectionNumber, lineNumber, description)` entries.

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_name: Option<String>,
    pub show_timeline: bool,
    pub bpm: u32,
    pub signature_numerator: u32,
    pub signature_denominator: u32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NumberedSection {
    pub number: u64,
    pub name: String,
    pub duration: u32,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NumberedLine {
    pub number: u64,
    pub name: String,
    pub sound: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Description {
    pub section_number: u64,
    pub line_number: u64,
    pub description: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GridDocument {
    pub settings: DocumentSettings,
    pub sections: Vec<NumberedSection>,
    pub lines: Vec<NumberedLine>,
    pub descriptions: Vec<Description>,
}
