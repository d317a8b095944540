//! Grid store: the single owner of sections, lines and cells
//!
//! Every line holds exactly one cell per section, index-aligned with the
//! section order. Each command below restores that invariant before it
//! returns and asserts it; a mismatch is a bug in this module.
//!
//! Commands that reference an unknown id do nothing and return `false` /
//! `None`. Only out-of-range durations and settings are reported as errors.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::error::{GridError, Result};
use crate::metrics;
use crate::models::section::{is_hex_color, is_valid_duration, MAX_DURATION_BARS, MIN_DURATION_BARS};
use crate::models::settings::normalize_title;
use crate::models::{
    IdGenerator, IdKind, ItemId, Line, LinePatch, LineSpec, Section, SectionPatch, SectionSpec,
    SequentialIds, Settings, SettingsPatch, DEFAULT_LINE_NAMES, DEFAULT_TRACK_TITLE,
    STANDARD_SECTIONS,
};

use super::events::{EventBus, GridEvent, SubscriptionId};

/// Sections present in a fresh editing session
const DEFAULT_SECTION_NAMES: [&str; 3] = ["Intro", "Verse", "Chorus"];

/// Cell text addressed by zero-based positions, used when rebuilding a grid
#[derive(Clone, Debug, PartialEq)]
pub struct CellPlacement {
    pub section_index: usize,
    pub line_index: usize,
    pub text: String,
}

/// Complete replacement contents for [`GridStore::replace`]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridContents {
    pub settings: Settings,
    pub sections: Vec<SectionSpec>,
    pub lines: Vec<LineSpec>,
    pub cells: Vec<CellPlacement>,
}

pub struct GridStore {
    sections: Vec<Section>,
    lines: Vec<Line>,
    settings: Settings,
    ids: Box<dyn IdGenerator>,
    /// Last laid-out height per line
    row_heights: HashMap<ItemId, f64>,
    /// Lines whose height must be recomputed after the next render
    pending_layout: HashSet<ItemId>,
    events: EventBus,
}

impl fmt::Debug for GridStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridStore")
            .field("sections", &self.sections)
            .field("lines", &self.lines)
            .field("settings", &self.settings)
            .field("listeners", &self.events.len())
            .finish()
    }
}

impl Default for GridStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GridStore {
    /// Empty grid with sequential ids
    pub fn new() -> Self {
        Self::with_id_generator(Box::new(SequentialIds::new()))
    }

    pub fn with_id_generator(ids: Box<dyn IdGenerator>) -> Self {
        Self {
            sections: Vec::new(),
            lines: Vec::new(),
            settings: Settings::default(),
            ids,
            row_heights: HashMap::new(),
            pending_layout: HashSet::new(),
            events: EventBus::default(),
        }
    }

    /// Grid of a fresh editing session: Intro, Verse, Chorus and four lines
    pub fn with_defaults() -> Self {
        Self::defaults_with_id_generator(Box::new(SequentialIds::new()))
    }

    /// [`GridStore::with_defaults`] drawing ids from `ids`
    pub fn defaults_with_id_generator(ids: Box<dyn IdGenerator>) -> Self {
        let mut store = Self::with_id_generator(ids);
        for name in DEFAULT_SECTION_NAMES {
            if let Some(standard) = STANDARD_SECTIONS.iter().find(|s| s.name == name) {
                store.push_section(standard.to_spec());
            }
        }
        for name in DEFAULT_LINE_NAMES {
            store.push_line(LineSpec::named(name));
        }
        store.assert_aligned();
        store
    }

    // ========================================================================
    // Read access
    // ========================================================================

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn section(&self, id: &ItemId) -> Option<&Section> {
        self.sections.iter().find(|s| &s.id == id)
    }

    pub fn line(&self, id: &ItemId) -> Option<&Line> {
        self.lines.iter().find(|l| &l.id == id)
    }

    pub fn section_index(&self, id: &ItemId) -> Option<usize> {
        self.sections.iter().position(|s| &s.id == id)
    }

    pub fn line_index(&self, id: &ItemId) -> Option<usize> {
        self.lines.iter().position(|l| &l.id == id)
    }

    pub fn cell(&self, line_id: &ItemId, section_id: &ItemId) -> Option<&str> {
        let section_index = self.section_index(section_id)?;
        self.line(line_id)?.cell(section_index)
    }

    pub fn total_bars(&self) -> u32 {
        metrics::total_bars(&self.sections)
    }

    pub fn row_height(&self, line_id: &ItemId) -> Option<f64> {
        self.row_heights.get(line_id).copied()
    }

    // ========================================================================
    // Section commands
    // ========================================================================

    /// Append a section; every line gains one empty cell
    pub fn add_section(&mut self, spec: SectionSpec) -> Result<Section> {
        check_duration(spec.duration_bars)?;
        check_color(&spec.color)?;

        let section = self.push_section(spec);
        self.mark_all_rows();
        self.assert_aligned();

        log::debug!("added section {} '{}' ({} bars)", section.id, section.name, section.duration_bars);
        self.events.emit(&GridEvent::SectionsChanged);
        Ok(section)
    }

    /// Append the library entry at `index`; `None` if there is no such entry
    pub fn add_standard_section(&mut self, index: usize) -> Option<Section> {
        let standard = STANDARD_SECTIONS.get(index)?;
        self.add_section(standard.to_spec()).ok()
    }

    /// Remove a section and the cell at its position from every line
    pub fn delete_section(&mut self, id: &ItemId) -> bool {
        let Some(index) = self.section_index(id) else {
            log::warn!("delete_section: no section {}", id);
            return false;
        };

        self.sections.remove(index);
        for line in &mut self.lines {
            line.cells.remove(index);
        }
        self.mark_all_rows();
        self.assert_aligned();

        log::debug!("deleted section {} at position {}", id, index);
        self.events.emit(&GridEvent::SectionsChanged);
        true
    }

    /// Move `dragged_id` to the position `target_id` occupied before the move
    ///
    /// The dragged section is removed first and then inserted at the target's
    /// original index, so `[A, B, C]` with A dropped on C becomes `[B, C, A]`
    /// and A dropped on B becomes `[B, A, C]`. Cells move the same way.
    pub fn move_section(&mut self, dragged_id: &ItemId, target_id: &ItemId) -> bool {
        let (Some(from), Some(to)) = (self.section_index(dragged_id), self.section_index(target_id))
        else {
            log::warn!("move_section: unknown section {} or {}", dragged_id, target_id);
            return false;
        };

        let section = self.sections.remove(from);
        self.sections.insert(to, section);
        for line in &mut self.lines {
            let cell = line.cells.remove(from);
            line.cells.insert(to, cell);
        }
        self.mark_all_rows();
        self.assert_aligned();

        log::debug!("moved section {} from {} to {}", dragged_id, from, to);
        self.events.emit(&GridEvent::SectionsChanged);
        true
    }

    /// Append a duplicate of a section at the end of the grid
    ///
    /// Each line's new cell copies the text found at the original section's
    /// current position.
    pub fn copy_section(&mut self, id: &ItemId) -> Option<Section> {
        let Some(index) = self.section_index(id) else {
            log::warn!("copy_section: no section {}", id);
            return None;
        };

        let spec = self.sections[index].duplicate_spec();
        let copy = Section::from_spec(self.ids.next_id(IdKind::Section), spec);
        self.sections.push(copy.clone());
        for line in &mut self.lines {
            let text = line.cells.get(index).cloned().unwrap_or_default();
            line.cells.push(text);
        }
        self.mark_all_rows();
        self.assert_aligned();

        log::debug!("copied section {} as {}", id, copy.id);
        self.events.emit(&GridEvent::SectionsChanged);
        Some(copy)
    }

    /// Update fields of a section in place
    ///
    /// Returns `Ok(false)` for an unknown id. A duration outside the allowed
    /// range is rejected and nothing changes.
    pub fn edit_section(&mut self, id: &ItemId, patch: SectionPatch) -> Result<bool> {
        if let Some(duration_bars) = patch.duration_bars {
            check_duration(duration_bars)?;
        }
        if let Some(color) = &patch.color {
            check_color(color)?;
        }
        let Some(section) = self.sections.iter_mut().find(|s| &s.id == id) else {
            log::warn!("edit_section: no section {}", id);
            return Ok(false);
        };

        section.apply(patch);
        log::debug!("edited section {}: '{}' {} bars", id, section.name, section.duration_bars);
        self.mark_all_rows();
        self.events.emit(&GridEvent::SectionsChanged);
        Ok(true)
    }

    // ========================================================================
    // Line commands
    // ========================================================================

    /// Append a line with one empty cell per section
    pub fn add_line(&mut self, spec: LineSpec) -> Line {
        let line = self.push_line(spec);
        self.assert_aligned();

        log::debug!("added line {} '{}'", line.id, line.name);
        self.events.emit(&GridEvent::LinesChanged);
        line
    }

    pub fn delete_line(&mut self, id: &ItemId) -> bool {
        let Some(index) = self.line_index(id) else {
            log::warn!("delete_line: no line {}", id);
            return false;
        };

        self.lines.remove(index);
        self.row_heights.remove(id);
        self.pending_layout.remove(id);

        log::debug!("deleted line {} at position {}", id, index);
        self.events.emit(&GridEvent::LinesChanged);
        true
    }

    /// Exchange the positions of two lines
    pub fn move_line(&mut self, dragged_id: &ItemId, target_id: &ItemId) -> bool {
        let (Some(from), Some(to)) = (self.line_index(dragged_id), self.line_index(target_id)) else {
            log::warn!("move_line: unknown line {} or {}", dragged_id, target_id);
            return false;
        };

        self.lines.swap(from, to);

        log::debug!("swapped lines at {} and {}", from, to);
        self.events.emit(&GridEvent::LinesChanged);
        true
    }

    /// Append a duplicate of a line, cells included, at the end of the grid
    pub fn copy_line(&mut self, id: &ItemId) -> Option<Line> {
        let Some(index) = self.line_index(id) else {
            log::warn!("copy_line: no line {}", id);
            return None;
        };

        let copy = self.lines[index].duplicate(self.ids.next_id(IdKind::Line));
        self.lines.push(copy.clone());
        self.pending_layout.insert(copy.id.clone());
        self.assert_aligned();

        log::debug!("copied line {} as {}", id, copy.id);
        self.events.emit(&GridEvent::LinesChanged);
        Some(copy)
    }

    pub fn edit_line(&mut self, id: &ItemId, patch: LinePatch) -> bool {
        let Some(line) = self.lines.iter_mut().find(|l| &l.id == id) else {
            log::warn!("edit_line: no line {}", id);
            return false;
        };

        line.apply(patch);
        self.pending_layout.insert(id.clone());

        log::debug!("edited line {} '{}'", id, line.name);
        self.events.emit(&GridEvent::LinesChanged);
        true
    }

    // ========================================================================
    // Cells
    // ========================================================================

    /// Store the text of one intersection verbatim
    pub fn set_cell(&mut self, line_id: &ItemId, section_id: &ItemId, text: impl Into<String>) -> bool {
        let (Some(line_index), Some(section_index)) =
            (self.line_index(line_id), self.section_index(section_id))
        else {
            log::warn!("set_cell: unknown line {} or section {}", line_id, section_id);
            return false;
        };

        self.lines[line_index].cells[section_index] = text.into();
        // Layout must see the committed text
        self.pending_layout.insert(line_id.clone());

        self.events.emit(&GridEvent::CellChanged {
            line_id: line_id.clone(),
            section_id: section_id.clone(),
        });
        true
    }

    // ========================================================================
    // Settings
    // ========================================================================

    pub fn set_settings(&mut self, patch: SettingsPatch) -> Result<()> {
        self.settings.apply(patch)?;
        log::debug!(
            "settings: timeline={} bpm={} signature={}/{}",
            self.settings.show_timeline,
            self.settings.bpm,
            self.settings.signature_numerator,
            self.settings.signature_denominator
        );
        self.events.emit(&GridEvent::SettingsChanged);
        Ok(())
    }

    /// Rename the track; a blank title becomes "New track"
    pub fn set_track_title(&mut self, title: &str) {
        self.settings.track_title = normalize_title(title);
        self.events.emit(&GridEvent::SettingsChanged);
    }

    // ========================================================================
    // Whole-grid lifecycle
    // ========================================================================

    /// Clear sections and lines and restore the default title
    ///
    /// Tempo, signature and the timeline toggle are kept.
    pub fn reset(&mut self) {
        self.sections.clear();
        self.lines.clear();
        self.row_heights.clear();
        self.pending_layout.clear();
        self.settings.track_title = DEFAULT_TRACK_TITLE.to_string();

        log::debug!("grid reset");
        self.events.emit(&GridEvent::Reset);
    }

    /// Swap in complete new contents with fresh ids
    ///
    /// Placements whose positions fall outside the new grid are dropped and
    /// counted in the return value. On error nothing changes.
    pub fn replace(&mut self, contents: GridContents) -> Result<usize> {
        for spec in &contents.sections {
            check_duration(spec.duration_bars)?;
            check_color(&spec.color)?;
        }
        SettingsPatch {
            show_timeline: Some(contents.settings.show_timeline),
            bpm: Some(contents.settings.bpm),
            signature_numerator: Some(contents.settings.signature_numerator),
            signature_denominator: Some(contents.settings.signature_denominator),
        }
        .validate()?;

        let sections: Vec<Section> = contents
            .sections
            .into_iter()
            .map(|spec| Section::from_spec(self.ids.next_id(IdKind::Section), spec))
            .collect();
        let mut lines: Vec<Line> = contents
            .lines
            .into_iter()
            .map(|spec| Line::from_spec(self.ids.next_id(IdKind::Line), spec, sections.len()))
            .collect();

        let mut dropped = 0;
        for placement in contents.cells {
            match lines
                .get_mut(placement.line_index)
                .and_then(|line| line.cells.get_mut(placement.section_index))
            {
                Some(cell) => *cell = placement.text,
                None => {
                    log::warn!(
                        "dropping cell text at section {} / line {}: outside grid",
                        placement.section_index + 1,
                        placement.line_index + 1
                    );
                    dropped += 1;
                }
            }
        }

        self.sections = sections;
        self.lines = lines;
        self.settings = Settings {
            track_title: normalize_title(&contents.settings.track_title),
            ..contents.settings
        };
        self.row_heights.clear();
        self.pending_layout.clear();
        self.mark_all_rows();
        self.assert_aligned();

        log::info!(
            "grid replaced: {} sections, {} lines, {} cell texts dropped",
            self.sections.len(),
            self.lines.len(),
            dropped
        );
        self.events.emit(&GridEvent::Replaced);
        Ok(dropped)
    }

    // ========================================================================
    // Row layout scheduling
    // ========================================================================

    /// Drain the lines awaiting a height recompute, in grid order
    pub fn take_pending_row_layouts(&mut self) -> Vec<ItemId> {
        let pending: Vec<ItemId> = self
            .lines
            .iter()
            .filter(|line| self.pending_layout.contains(&line.id))
            .map(|line| line.id.clone())
            .collect();
        self.pending_layout.clear();
        pending
    }

    /// Record the height of a row from its measured header and cell heights
    pub fn apply_row_layout(&mut self, line_id: &ItemId, header_height: f64, cell_heights: &[f64]) -> Option<f64> {
        self.line_index(line_id)?;

        let height = metrics::row_height(header_height, cell_heights);
        self.row_heights.insert(line_id.clone(), height);
        self.pending_layout.remove(line_id);
        Some(height)
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&GridEvent) + Send + 'static,
    {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn push_section(&mut self, spec: SectionSpec) -> Section {
        let section = Section::from_spec(self.ids.next_id(IdKind::Section), spec);
        self.sections.push(section.clone());
        for line in &mut self.lines {
            line.cells.push(String::new());
        }
        section
    }

    fn push_line(&mut self, spec: LineSpec) -> Line {
        let line = Line::from_spec(self.ids.next_id(IdKind::Line), spec, self.sections.len());
        self.lines.push(line.clone());
        self.pending_layout.insert(line.id.clone());
        line
    }

    fn mark_all_rows(&mut self) {
        self.pending_layout.extend(self.lines.iter().map(|l| l.id.clone()));
    }

    fn assert_aligned(&self) {
        for line in &self.lines {
            assert_eq!(
                line.cells.len(),
                self.sections.len(),
                "line {} has {} cells for {} sections",
                line.id,
                line.cells.len(),
                self.sections.len()
            );
        }
    }
}

fn check_duration(duration_bars: u32) -> Result<()> {
    if is_valid_duration(duration_bars) {
        Ok(())
    } else {
        Err(GridError::InvalidArgument(format!(
            "duration {} bars out of range ({}-{})",
            duration_bars, MIN_DURATION_BARS, MAX_DURATION_BARS
        )))
    }
}

fn check_color(color: &str) -> Result<()> {
    if is_hex_color(color) {
        Ok(())
    } else {
        Err(GridError::InvalidArgument(format!(
            "color '{}' is not of the form #RRGGBB",
            color
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn store_with(sections: &[&str], lines: &[&str]) -> GridStore {
        let mut store = GridStore::new();
        for name in sections {
            store.add_section(SectionSpec::new(*name, "#FFFFFF", 4)).unwrap();
        }
        for name in lines {
            store.add_line(LineSpec::named(*name));
        }
        store
    }

    fn section_names(store: &GridStore) -> Vec<&str> {
        store.sections().iter().map(|s| s.name.as_str()).collect()
    }

    fn id_of(store: &GridStore, name: &str) -> ItemId {
        store.sections().iter().find(|s| s.name == name).unwrap().id.clone()
    }

    #[test]
    fn test_add_section_extends_every_line() {
        let mut store = store_with(&["Intro"], &["Drums", "Bass"]);
        store.add_section(SectionSpec::new("Verse", "#D5E8D4", 8)).unwrap();

        for line in store.lines() {
            assert_eq!(line.cells().len(), 2);
        }
        assert_eq!(store.total_bars(), 12);
    }

    #[test]
    fn test_add_section_rejects_bad_duration() {
        let mut store = store_with(&[], &["Drums"]);

        assert!(matches!(
            store.add_section(SectionSpec::new("Long", "#FFFFFF", 65)),
            Err(GridError::InvalidArgument(_))
        ));
        assert!(store.add_section(SectionSpec::new("Empty", "#FFFFFF", 0)).is_err());
        assert!(store.sections().is_empty());
        assert!(store.lines()[0].cells().is_empty());
    }

    #[test]
    fn test_delete_section_removes_matching_cell() {
        let mut store = store_with(&["A", "B", "C"], &["Drums"]);
        let line = store.lines()[0].id.clone();
        for name in ["A", "B", "C"] {
            let section = id_of(&store, name);
            store.set_cell(&line, &section, name.to_lowercase());
        }

        assert!(store.delete_section(&id_of(&store, "B")));
        assert_eq!(store.lines()[0].cells(), &["a", "c"]);
    }

    #[test]
    fn test_unknown_ids_are_no_ops() {
        let mut store = store_with(&["A"], &["Drums"]);
        let ghost = ItemId::new("ghost");

        assert!(!store.delete_section(&ghost));
        assert!(!store.move_section(&ghost, &id_of(&store, "A")));
        assert!(store.copy_section(&ghost).is_none());
        assert_eq!(store.edit_section(&ghost, SectionPatch::default()), Ok(false));
        assert!(!store.delete_line(&ghost));
        assert!(!store.move_line(&ghost, &ghost));
        assert!(store.copy_line(&ghost).is_none());
        assert!(!store.set_cell(&ghost, &ghost, "x"));
        assert_eq!(store.sections().len(), 1);
        assert_eq!(store.lines().len(), 1);
    }

    #[test]
    fn test_move_section_splice_three() {
        let mut store = store_with(&["A", "B", "C"], &[]);
        store.move_section(&id_of(&store, "A"), &id_of(&store, "C"));
        assert_eq!(section_names(&store), vec!["B", "C", "A"]);

        let mut store = store_with(&["A", "B", "C"], &[]);
        store.move_section(&id_of(&store, "C"), &id_of(&store, "A"));
        assert_eq!(section_names(&store), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_move_section_splice_four_moves_cells() {
        let mut store = store_with(&["A", "B", "C", "D"], &["Keys"]);
        let line = store.lines()[0].id.clone();
        for name in ["A", "B", "C", "D"] {
            let section = id_of(&store, name);
            store.set_cell(&line, &section, name);
        }

        store.move_section(&id_of(&store, "A"), &id_of(&store, "C"));
        assert_eq!(section_names(&store), vec!["B", "C", "A", "D"]);
        assert_eq!(store.lines()[0].cells(), &["B", "C", "A", "D"]);

        store.move_section(&id_of(&store, "D"), &id_of(&store, "B"));
        assert_eq!(section_names(&store), vec!["D", "B", "C", "A"]);
        assert_eq!(store.lines()[0].cells(), &["D", "B", "C", "A"]);
    }

    #[test]
    fn test_copy_section_appends_at_end() {
        let mut store = store_with(&["A", "B", "C"], &["Drums", "Bass"]);
        let drums = store.lines()[0].id.clone();
        store.set_cell(&drums, &id_of(&store, "A"), "four on the floor");

        let copy = store.copy_section(&id_of(&store, "A")).unwrap();

        assert_eq!(copy.name, "A (copy)");
        assert_eq!(section_names(&store), vec!["A", "B", "C", "A (copy)"]);
        assert_eq!(store.lines()[0].cells()[3], "four on the floor");
        assert_eq!(store.lines()[1].cells()[3], "");
    }

    #[test]
    fn test_edit_section_rejects_bad_duration_without_change() {
        let mut store = store_with(&["A"], &[]);
        let id = id_of(&store, "A");

        let patch = SectionPatch {
            name: Some("Renamed".to_string()),
            duration_bars: Some(100),
            ..Default::default()
        };
        assert!(store.edit_section(&id, patch).is_err());
        assert_eq!(store.sections()[0].name, "A");

        let patch = SectionPatch {
            duration_bars: Some(16),
            ..Default::default()
        };
        assert_eq!(store.edit_section(&id, patch), Ok(true));
        assert_eq!(store.sections()[0].width(), 480);
    }

    #[test]
    fn test_non_hex_color_rejected_without_change() {
        let mut store = store_with(&["A"], &["Drums"]);
        let id = id_of(&store, "A");

        assert!(matches!(
            store.add_section(SectionSpec::new("Verse", "red", 8)),
            Err(GridError::InvalidArgument(_))
        ));
        assert_eq!(section_names(&store), vec!["A"]);
        assert_eq!(store.lines()[0].cells().len(), 1);

        let patch = SectionPatch {
            name: Some("Renamed".to_string()),
            color: Some(String::new()),
            ..Default::default()
        };
        assert!(store.edit_section(&id, patch).is_err());
        assert_eq!(store.sections()[0].name, "A");
        assert_eq!(store.sections()[0].color, "#FFFFFF");

        let contents = GridContents {
            sections: vec![SectionSpec::new("Bad", "#12345G", 4)],
            ..Default::default()
        };
        assert!(store.replace(contents).is_err());
        assert_eq!(section_names(&store), vec!["A"]);

        let patch = SectionPatch {
            color: Some("#d5e8d4".to_string()),
            ..Default::default()
        };
        assert_eq!(store.edit_section(&id, patch), Ok(true));
    }

    #[test]
    fn test_move_line_swaps_positions() {
        let mut store = store_with(&["A"], &["L1", "L2", "L3", "L4"]);
        let first = store.lines()[0].id.clone();
        let third = store.lines()[2].id.clone();

        store.move_line(&first, &third);
        let names: Vec<&str> = store.lines().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["L3", "L2", "L1", "L4"]);
    }

    #[test]
    fn test_copy_line_copies_cells() {
        let mut store = store_with(&["A", "B"], &["Guitar"]);
        let guitar = store.lines()[0].id.clone();
        store.set_cell(&guitar, &id_of(&store, "B"), "solo");

        let copy = store.copy_line(&guitar).unwrap();
        assert_eq!(copy.name, "Guitar (copy)");
        assert_eq!(store.lines()[1].cells(), &["", "solo"]);
    }

    #[test]
    fn test_reset_keeps_tempo() {
        let mut store = GridStore::with_defaults();
        store
            .set_settings(SettingsPatch { bpm: Some(90), ..Default::default() })
            .unwrap();
        store.set_track_title("Demo");

        store.reset();

        assert!(store.sections().is_empty());
        assert!(store.lines().is_empty());
        assert_eq!(store.settings().track_title, "New track");
        assert_eq!(store.settings().bpm, 90);
    }

    #[test]
    fn test_defaults() {
        let store = GridStore::with_defaults();
        assert_eq!(section_names(&store), vec!["Intro", "Verse", "Chorus"]);
        assert_eq!(store.lines().len(), 4);
        assert_eq!(store.total_bars(), 20);
    }

    #[test]
    fn test_defaults_use_injected_ids() {
        struct Fixed(u32);
        impl IdGenerator for Fixed {
            fn next_id(&mut self, kind: IdKind) -> ItemId {
                self.0 += 1;
                ItemId::new(format!("{:?}#{}", kind, self.0))
            }
        }

        let store = GridStore::defaults_with_id_generator(Box::new(Fixed(0)));
        assert_eq!(store.sections()[0].id.as_str(), "Section#1");
        assert_eq!(store.lines()[3].id.as_str(), "Line#7");
    }

    #[test]
    fn test_pending_layout_follows_cell_commit() {
        let mut store = store_with(&["A", "B"], &["L1", "L2"]);
        store.take_pending_row_layouts();

        let second = store.lines()[1].id.clone();
        store.set_cell(&second, &id_of(&store, "A"), "long\ntext");
        assert_eq!(store.take_pending_row_layouts(), vec![second.clone()]);
        assert!(store.take_pending_row_layouts().is_empty());

        assert_eq!(store.apply_row_layout(&second, 30.0, &[70.0, 10.0]), Some(78.0));
        assert_eq!(store.row_height(&second), Some(78.0));

        store.add_section(SectionSpec::new("C", "#000000", 2)).unwrap();
        assert_eq!(store.take_pending_row_layouts().len(), 2);
    }

    #[test]
    fn test_listener_sees_committed_cell_text() {
        let mut store = store_with(&["A"], &["L1"]);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        store.subscribe(move |event| sink.lock().unwrap().push(event.clone()));

        let line = store.lines()[0].id.clone();
        let section = id_of(&store, "A");
        store.set_cell(&line, &section, "riff");
        store.delete_section(&section);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                GridEvent::CellChanged { line_id: line, section_id: section },
                GridEvent::SectionsChanged,
            ]
        );
    }

    #[test]
    fn test_replace_drops_out_of_range_cells() {
        let mut store = GridStore::with_defaults();
        let contents = GridContents {
            settings: Settings { track_title: "  ".to_string(), ..Settings::default() },
            sections: vec![SectionSpec::new("Only", "#000000", 2)],
            lines: vec![LineSpec::named("Solo")],
            cells: vec![
                CellPlacement { section_index: 0, line_index: 0, text: "kept".to_string() },
                CellPlacement { section_index: 1, line_index: 0, text: "lost".to_string() },
                CellPlacement { section_index: 0, line_index: 4, text: "lost".to_string() },
            ],
        };

        assert_eq!(store.replace(contents), Ok(2));
        assert_eq!(section_names(&store), vec!["Only"]);
        assert_eq!(store.lines()[0].cells(), &["kept"]);
        assert_eq!(store.settings().track_title, "New track");
    }

    #[test]
    fn test_replace_is_atomic_on_error() {
        let mut store = GridStore::with_defaults();
        let contents = GridContents {
            sections: vec![SectionSpec::new("Bad", "#000000", 0)],
            ..Default::default()
        };

        assert!(store.replace(contents).is_err());
        assert_eq!(store.sections().len(), 3);
    }
}
