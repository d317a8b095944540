//! Interchange document -> grid store
//!
//! Parsing and validation happen before the store is touched, so a rejected
//! document leaves the current grid exactly as it was.

use serde::Serialize;
use serde_json::Value;

use crate::error::{GridError, Result};
use crate::grid::{CellPlacement, GridContents, GridStore};
use crate::models::settings::normalize_title;
use crate::models::{LineSpec, SectionSpec, Settings};

use super::document::GridDocument;
use super::naming::title_from_file_name;
use super::validate::{normalize_integers, validate_document};

/// What an import changed, for the status line
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImportSummary {
    pub title: String,
    pub sections: usize,
    pub lines: usize,
    pub descriptions_applied: usize,
    /// Descriptions pointing past the last section or line
    pub descriptions_dropped: usize,
}

/// Parse and validate raw JSON text
pub fn parse_document(text: &str) -> Result<GridDocument> {
    let mut value: Value = serde_json::from_str(text).map_err(|e| GridError::Parse(e.to_string()))?;
    validate_document(&value)?;
    normalize_integers(&mut value);
    serde_json::from_value(value).map_err(|e| GridError::Parse(e.to_string()))
}

/// Rebuild contents from a validated document
///
/// Sections and lines are ordered by `number` (stable on ties), then each
/// description is placed at `(sectionNumber - 1, lineNumber - 1)` of the
/// new order. The title comes from `settings.trackName` or, failing that,
/// from `file_name`.
pub fn to_contents(document: GridDocument, file_name: &str) -> GridContents {
    let GridDocument {
        settings,
        mut sections,
        mut lines,
        descriptions,
    } = document;

    sections.sort_by_key(|s| s.number);
    lines.sort_by_key(|l| l.number);

    let title = match settings.track_name {
        Some(name) => name,
        None => title_from_file_name(file_name),
    };

    GridContents {
        settings: Settings {
            show_timeline: settings.show_timeline,
            bpm: settings.bpm,
            signature_numerator: settings.signature_numerator,
            signature_denominator: settings.signature_denominator,
            track_title: normalize_title(&title),
        },
        sections: sections
            .into_iter()
            .map(|s| SectionSpec::new(s.name, s.color, s.duration).with_comment(s.comment.unwrap_or_default()))
            .collect(),
        lines: lines
            .into_iter()
            .map(|l| {
                LineSpec::named(l.name)
                    .with_sound(l.sound)
                    .with_comment(l.comment.unwrap_or_default())
            })
            .collect(),
        cells: descriptions
            .into_iter()
            .map(|d| CellPlacement {
                section_index: position_of(d.section_number),
                line_index: position_of(d.line_number),
                text: d.description,
            })
            .collect(),
    }
}

/// Parse, validate and replace the store contents in one step
pub fn import_json(store: &mut GridStore, text: &str, file_name: &str) -> Result<ImportSummary> {
    let document = parse_document(text)?;
    let descriptions = document.descriptions.len();
    let contents = to_contents(document, file_name);

    let dropped = store.replace(contents)?;

    let summary = ImportSummary {
        title: store.settings().track_title.clone(),
        sections: store.sections().len(),
        lines: store.lines().len(),
        descriptions_applied: descriptions - dropped,
        descriptions_dropped: dropped,
    };
    log::info!(
        "imported '{}' from {}: {} sections, {} lines, {} descriptions ({} dropped)",
        summary.title,
        file_name,
        summary.sections,
        summary.lines,
        summary.descriptions_applied,
        summary.descriptions_dropped
    );
    Ok(summary)
}

/// 1-based number to 0-based index; numbers are validated positive
fn position_of(number: u64) -> usize {
    usize::try_from(number.saturating_sub(1)).unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sorts_by_number_before_placing_cells() {
        let text = json!({
            "settings": { "showTimeline": false, "bpm": 90, "signatureNumerator": 3, "signatureDenominator": 4 },
            "sections": [
                { "number": 2, "name": "Chorus", "duration": 8, "color": "#FFE6CC" },
                { "number": 1, "name": "Verse", "duration": 8, "color": "#D5E8D4", "comment": "soft" }
            ],
            "lines": [ { "number": 1, "name": "Bass", "sound": "P-Bass" } ],
            "descriptions": [ { "sectionNumber": 2, "lineNumber": 1, "description": "octaves" } ]
        })
        .to_string();

        let contents = to_contents(parse_document(&text).unwrap(), "Song_structure.json");

        assert_eq!(contents.sections[0].name, "Verse");
        assert_eq!(contents.sections[0].comment, "soft");
        assert_eq!(contents.sections[1].comment, "");
        assert_eq!(contents.cells[0].section_index, 1);
        assert_eq!(contents.settings.track_title, "Song");
        assert_eq!(contents.settings.bpm, 90);
    }

    #[test]
    fn test_track_name_wins_over_file_name() {
        let text = json!({
            "settings": { "trackName": "Real Title", "showTimeline": true, "bpm": 120, "signatureNumerator": 4, "signatureDenominator": 4 },
            "sections": [], "lines": [], "descriptions": []
        })
        .to_string();

        let contents = to_contents(parse_document(&text).unwrap(), "other_structure.json");
        assert_eq!(contents.settings.track_title, "Real Title");
    }

    #[test]
    fn test_integer_valued_floats_are_accepted() {
        let text = r##"{
            "settings": { "showTimeline": false, "bpm": 120.0, "signatureNumerator": 4, "signatureDenominator": 4.0 },
            "sections": [ { "number": 1.0, "name": "Verse", "duration": 8.0, "color": "#D5E8D4" } ],
            "lines": [ { "number": 1, "name": "Bass", "sound": "" } ],
            "descriptions": [ { "sectionNumber": 1.0, "lineNumber": 1, "description": "roots" } ]
        }"##;

        let contents = to_contents(parse_document(text).unwrap(), "x.json");

        assert_eq!(contents.settings.bpm, 120);
        assert_eq!(contents.settings.signature_denominator, 4);
        assert_eq!(contents.sections[0].duration_bars, 8);
        assert_eq!(contents.cells[0].section_index, 0);
    }

    #[test]
    fn test_fractional_numbers_still_rejected() {
        let text = json!({
            "settings": { "showTimeline": false, "bpm": 120.5, "signatureNumerator": 4, "signatureDenominator": 4 },
            "sections": [ { "number": 1, "name": "Verse", "duration": 7.5, "color": "#D5E8D4" } ],
            "lines": [], "descriptions": []
        })
        .to_string();

        match parse_document(&text) {
            Err(GridError::Validation(errors)) => {
                assert_eq!(errors.paths(), ["settings.bpm", "sections[0].duration"]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_error_for_malformed_json() {
        assert!(matches!(parse_document("{ \"settings\": "), Err(GridError::Parse(_))));
    }
}
