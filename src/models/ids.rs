//! Opaque identifiers for sections and lines
//!
//! Ids are handed out by an [`IdGenerator`] owned by the grid store, so a
//! test can build a store with predictable ids while the browser build may
//! switch to random UUIDs.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, store-unique identifier of a section or a line
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for ItemId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// What an id is being generated for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdKind {
    Section,
    Line,
}

impl IdKind {
    fn prefix(self) -> &'static str {
        match self {
            IdKind::Section => "section",
            IdKind::Line => "line",
        }
    }
}

/// Source of fresh ids for the store
pub trait IdGenerator: Send {
    fn next_id(&mut self, kind: IdKind) -> ItemId;
}

/// Monotonic counter shared by both kinds: `section-1`, `line-2`, ...
#[derive(Clone, Debug, Default)]
pub struct SequentialIds {
    counter: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self, kind: IdKind) -> ItemId {
        self.counter += 1;
        ItemId(format!("{}-{}", kind.prefix(), self.counter))
    }
}

/// Random v4 UUIDs, for sessions whose ids may outlive the page
#[cfg(feature = "uuid")]
#[derive(Clone, Debug, Default)]
pub struct UuidIds;

#[cfg(feature = "uuid")]
impl IdGenerator for UuidIds {
    fn next_id(&mut self, _kind: IdKind) -> ItemId {
        ItemId(uuid::Uuid::new_v4().to_string())
    }
}
