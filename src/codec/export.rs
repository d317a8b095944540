//! Grid store -> interchange document

use crate::error::{GridError, Result};
use crate::grid::GridStore;

use super::document::{Description, DocumentSettings, GridDocument, NumberedLine, NumberedSection};

/// Number sections and lines by current order and list non-blank cells
///
/// Blankness is judged on trimmed text; the stored text is kept verbatim.
pub fn to_document(store: &GridStore) -> GridDocument {
    let settings = store.settings();

    let sections = store
        .sections()
        .iter()
        .enumerate()
        .map(|(i, s)| NumberedSection {
            number: i as u64 + 1,
            name: s.name.clone(),
            duration: s.duration_bars,
            color: s.color.clone(),
            comment: Some(s.comment.clone()),
        })
        .collect();

    let lines = store
        .lines()
        .iter()
        .enumerate()
        .map(|(i, l)| NumberedLine {
            number: i as u64 + 1,
            name: l.name.clone(),
            sound: l.sound.clone(),
            comment: Some(l.comment.clone()),
        })
        .collect();

    let mut descriptions = Vec::new();
    for (line_index, line) in store.lines().iter().enumerate() {
        for (section_index, text) in line.cells().iter().enumerate() {
            if text.trim().is_empty() {
                continue;
            }
            descriptions.push(Description {
                section_number: section_index as u64 + 1,
                line_number: line_index as u64 + 1,
                description: text.clone(),
            });
        }
    }

    GridDocument {
        settings: DocumentSettings {
            track_name: Some(settings.track_title.clone()),
            show_timeline: settings.show_timeline,
            bpm: settings.bpm,
            signature_numerator: settings.signature_numerator,
            signature_denominator: settings.signature_denominator,
        },
        sections,
        lines,
        descriptions,
    }
}

/// Pretty-printed JSON of [`to_document`]
pub fn to_json(store: &GridStore) -> Result<String> {
    let document = to_document(store);
    let json = serde_json::to_string_pretty(&document).map_err(|e| GridError::Serialization(e.to_string()))?;

    log::info!(
        "exported {} sections, {} lines, {} descriptions ({} bytes)",
        document.sections.len(),
        document.lines.len(),
        document.descriptions.len(),
        json.len()
    );
    Ok(json)
}
