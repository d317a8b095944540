//! Read models handed to the rendering layer
//!
//! A [`GridSnapshot`] carries everything the page needs to redraw the
//! grid after a command; a [`TableSnapshot`] is the reduced form consumed
//! by the printable (PDF) export.

use serde::Serialize;

use crate::metrics::{self, Ruler};
use crate::models::{ItemId, Settings};

use super::store::GridStore;

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SectionView {
    pub id: ItemId,
    /// 1-based position
    pub number: usize,
    pub name: String,
    pub color: String,
    pub comment: String,
    pub duration_bars: u32,
    pub width: u32,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CellView {
    pub section_id: ItemId,
    pub text: String,
    /// Background, the owning section's color
    pub color: String,
    pub width: u32,
    pub placeholder: String,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LineView {
    pub id: ItemId,
    pub number: usize,
    pub name: String,
    pub sound: String,
    pub comment: String,
    /// Last laid-out height, if the row has been measured
    pub height: Option<f64>,
    pub cells: Vec<CellView>,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GridSnapshot {
    pub title: String,
    pub settings: Settings,
    pub sections: Vec<SectionView>,
    pub lines: Vec<LineView>,
    pub ruler: Ruler,
}

/// Hint text shown in an empty cell
pub fn cell_placeholder(line_name: &str, section_name: &str) -> String {
    format!("Some description for {} on {}...", line_name, section_name)
}

impl GridSnapshot {
    pub fn capture(store: &GridStore) -> Self {
        let sections: Vec<SectionView> = store
            .sections()
            .iter()
            .enumerate()
            .map(|(i, s)| SectionView {
                id: s.id.clone(),
                number: i + 1,
                name: s.name.clone(),
                color: s.color.clone(),
                comment: s.comment.clone(),
                duration_bars: s.duration_bars,
                width: s.width(),
            })
            .collect();

        let lines = store
            .lines()
            .iter()
            .enumerate()
            .map(|(i, line)| LineView {
                id: line.id.clone(),
                number: i + 1,
                name: line.name.clone(),
                sound: line.sound.clone(),
                comment: line.comment.clone(),
                height: store.row_height(&line.id),
                cells: store
                    .sections()
                    .iter()
                    .zip(line.cells())
                    .map(|(section, text)| CellView {
                        section_id: section.id.clone(),
                        text: text.clone(),
                        color: section.color.clone(),
                        width: section.width(),
                        placeholder: cell_placeholder(&line.name, &section.name),
                    })
                    .collect(),
            })
            .collect();

        Self {
            title: store.settings().track_title.clone(),
            settings: store.settings().clone(),
            sections,
            lines,
            ruler: metrics::ruler(store.sections(), store.settings()),
        }
    }
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableColumn {
    pub name: String,
    pub color: String,
    pub duration_bars: u32,
}

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    pub name: String,
    pub sound: String,
    pub comment: String,
    pub cells: Vec<String>,
}

/// Sections x lines x cell text, with section colors
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableSnapshot {
    pub title: String,
    pub columns: Vec<TableColumn>,
    pub rows: Vec<TableRow>,
}

impl TableSnapshot {
    pub fn capture(store: &GridStore) -> Self {
        Self {
            title: store.settings().track_title.clone(),
            columns: store
                .sections()
                .iter()
                .map(|s| TableColumn {
                    name: s.name.clone(),
                    color: s.color.clone(),
                    duration_bars: s.duration_bars,
                })
                .collect(),
            rows: store
                .lines()
                .iter()
                .map(|l| TableRow {
                    name: l.name.clone(),
                    sound: l.sound.clone(),
                    comment: l.comment.clone(),
                    cells: l.cells().to_vec(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LineSpec, SectionSpec, SettingsPatch};

    #[test]
    fn test_snapshot_numbers_and_placeholders() {
        let mut store = GridStore::new();
        store.add_section(SectionSpec::new("Intro", "#DAE8FC", 4)).unwrap();
        store.add_section(SectionSpec::new("Verse", "#D5E8D4", 8)).unwrap();
        store.add_line(LineSpec::named("Drums"));

        let snapshot = GridSnapshot::capture(&store);

        assert_eq!(snapshot.sections[1].number, 2);
        assert_eq!(snapshot.sections[1].width, 240);
        let cell = &snapshot.lines[0].cells[1];
        assert_eq!(cell.color, "#D5E8D4");
        assert_eq!(cell.placeholder, "Some description for Drums on Verse...");
        assert_eq!(snapshot.ruler.bar_labels.len(), 12);
        assert!(snapshot.ruler.markers.is_empty());
    }

    #[test]
    fn test_snapshot_includes_markers_with_timeline() {
        let mut store = GridStore::with_defaults();
        store
            .set_settings(SettingsPatch { show_timeline: Some(true), ..Default::default() })
            .unwrap();

        // 20 bars of 4/4 at 120 BPM = 40 seconds
        let snapshot = GridSnapshot::capture(&store);
        assert_eq!(snapshot.ruler.markers.len(), 41);
    }

    #[test]
    fn test_table_snapshot() {
        let mut store = GridStore::with_defaults();
        let bass = store.lines()[2].id.clone();
        let verse = store.sections()[1].id.clone();
        store.set_cell(&bass, &verse, "walking");

        let table = TableSnapshot::capture(&store);
        assert_eq!(table.columns.len(), 3);
        assert_eq!(table.rows[2].name, "Bass");
        assert_eq!(table.rows[2].cells, vec!["", "walking", ""]);
    }
}
