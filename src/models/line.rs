//! Line: one row of the arrangement grid
//!
//! A line is an instrument or performance part. It carries one free-text
//! cell per section, index-aligned with the store's section order. Only the
//! grid store resizes or reorders `cells`.

use serde::{Deserialize, Serialize};

use super::ids::ItemId;
use super::section::COPY_SUFFIX;

pub const NEW_LINE_NAME: &str = "New line";

/// Lines present in a fresh editing session
pub const DEFAULT_LINE_NAMES: [&str; 4] = ["Drums", "Guitar", "Bass", "Voice"];

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub sound: String,
    #[serde(default)]
    pub comment: String,
    pub(crate) cells: Vec<String>,
}

impl Line {
    /// New line with one empty cell per section
    pub fn from_spec(id: ItemId, spec: LineSpec, section_count: usize) -> Self {
        Self {
            id,
            name: spec.name,
            sound: spec.sound,
            comment: spec.comment,
            cells: vec![String::new(); section_count],
        }
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }

    /// Duplicate with a new id, suffixed name and a full copy of the cells
    pub fn duplicate(&self, id: ItemId) -> Self {
        Self {
            id,
            name: format!("{}{}", self.name, COPY_SUFFIX),
            sound: self.sound.clone(),
            comment: self.comment.clone(),
            cells: self.cells.clone(),
        }
    }

    pub fn apply(&mut self, patch: LinePatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(sound) = patch.sound {
            self.sound = sound;
        }
        if let Some(comment) = patch.comment {
            self.comment = comment;
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct LineSpec {
    pub name: String,
    pub sound: String,
    pub comment: String,
}

impl LineSpec {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_sound(mut self, sound: impl Into<String>) -> Self {
        self.sound = sound.into();
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

impl Default for LineSpec {
    fn default() -> Self {
        Self {
            name: NEW_LINE_NAME.to_string(),
            sound: String::new(),
            comment: String::new(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct LinePatch {
    pub name: Option<String>,
    pub sound: Option<String>,
    pub comment: Option<String>,
}
