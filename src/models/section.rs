//! Section: one column of the arrangement grid
//!
//! A section is a song part (Intro, Verse, Chorus...) laid out left to right
//! on the timeline. Its on-screen width is derived from its duration and is
//! never stored.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::ids::ItemId;

/// Horizontal pixels used by one bar on the ruler and in the grid
pub const BAR_PIXEL_WIDTH: u32 = 30;

pub const MIN_DURATION_BARS: u32 = 1;
pub const MAX_DURATION_BARS: u32 = 64;

/// Suffix appended to the name of a duplicated section or line
pub const COPY_SUFFIX: &str = " (copy)";

pub const CUSTOM_SECTION_NAME: &str = "Custom";
pub const CUSTOM_SECTION_COLOR: &str = "#DAA520";
pub const CUSTOM_SECTION_DURATION: u32 = 4;

static COLOR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("color pattern is valid"));

pub fn is_valid_duration(duration_bars: u32) -> bool {
    (MIN_DURATION_BARS..=MAX_DURATION_BARS).contains(&duration_bars)
}

/// `#RRGGBB`, either case
pub fn is_hex_color(text: &str) -> bool {
    COLOR_PATTERN.is_match(text)
}

/// A column definition
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: ItemId,
    pub name: String,
    /// `#RRGGBB`
    pub color: String,
    #[serde(default)]
    pub comment: String,
    pub duration_bars: u32,
}

impl Section {
    pub fn from_spec(id: ItemId, spec: SectionSpec) -> Self {
        Self {
            id,
            name: spec.name,
            color: spec.color,
            comment: spec.comment,
            duration_bars: spec.duration_bars,
        }
    }

    /// Rendered width in pixels
    pub fn width(&self) -> u32 {
        self.duration_bars * BAR_PIXEL_WIDTH
    }

    /// Spec for a duplicate: same color, comment and duration, suffixed name
    pub fn duplicate_spec(&self) -> SectionSpec {
        SectionSpec {
            name: format!("{}{}", self.name, COPY_SUFFIX),
            color: self.color.clone(),
            comment: self.comment.clone(),
            duration_bars: self.duration_bars,
        }
    }

    /// Apply every field present in `patch`
    pub fn apply(&mut self, patch: SectionPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(comment) = patch.comment {
            self.comment = comment;
        }
        if let Some(duration_bars) = patch.duration_bars {
            self.duration_bars = duration_bars;
        }
    }
}

/// Everything needed to create a section; the store supplies the id
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SectionSpec {
    pub name: String,
    pub color: String,
    #[serde(default)]
    pub comment: String,
    pub duration_bars: u32,
}

impl SectionSpec {
    pub fn new(name: impl Into<String>, color: impl Into<String>, duration_bars: u32) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            comment: String::new(),
            duration_bars,
        }
    }

    /// Spec from the "custom section" dialog; a blank name becomes "Custom"
    pub fn custom(name: &str, color: impl Into<String>, duration_bars: u32) -> Self {
        let name = if name.is_empty() { CUSTOM_SECTION_NAME } else { name };
        Self::new(name, color, duration_bars)
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = comment.into();
        self
    }
}

impl Default for SectionSpec {
    fn default() -> Self {
        Self::new(CUSTOM_SECTION_NAME, CUSTOM_SECTION_COLOR, CUSTOM_SECTION_DURATION)
    }
}

/// Partial update for [`Section::apply`]
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SectionPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub comment: Option<String>,
    pub duration_bars: Option<u32>,
}

/// An entry of the predefined section library
#[derive(Serialize, Clone, Copy, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StandardSection {
    pub name: &'static str,
    pub color: &'static str,
    pub duration_bars: u32,
}

impl StandardSection {
    pub fn to_spec(self) -> SectionSpec {
        SectionSpec::new(self.name, self.color, self.duration_bars)
    }
}

pub const STANDARD_SECTIONS: [StandardSection; 7] = [
    StandardSection { name: "Intro", color: "#DAE8FC", duration_bars: 4 },
    StandardSection { name: "Verse", color: "#D5E8D4", duration_bars: 8 },
    StandardSection { name: "Bridge", color: "#FFF2CC", duration_bars: 4 },
    StandardSection { name: "Chorus", color: "#FFE6CC", duration_bars: 8 },
    StandardSection { name: "Tag", color: "#F8CECC", duration_bars: 4 },
    StandardSection { name: "Middle 8", color: "#F5F5F5", duration_bars: 8 },
    StandardSection { name: "Outro", color: "#E1D5E7", duration_bars: 4 },
];

/// Look up a library entry by name
pub fn standard_section(name: &str) -> Option<StandardSection> {
    STANDARD_SECTIONS.iter().copied().find(|s| s.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_colors_are_hex() {
        assert!(is_hex_color(CUSTOM_SECTION_COLOR));
        assert!(STANDARD_SECTIONS.iter().all(|s| is_hex_color(s.color)));
        assert!(!is_hex_color(""));
    }

    #[test]
    fn test_width_follows_duration() {
        let mut section = Section::from_spec(ItemId::new("s"), SectionSpec::new("Verse", "#D5E8D4", 8));
        assert_eq!(section.width(), 240);

        section.apply(SectionPatch { duration_bars: Some(2), ..Default::default() });
        assert_eq!(section.width(), 60);
    }

    #[test]
    fn test_custom_spec_falls_back_to_default_name() {
        let spec = SectionSpec::custom("", "#123456", 3);
        assert_eq!(spec.name, "Custom");
        assert_eq!(spec.duration_bars, 3);
    }

    #[test]
    fn test_duplicate_spec_keeps_fields() {
        let section = Section::from_spec(
            ItemId::new("s"),
            SectionSpec::new("Chorus", "#FFE6CC", 8).with_comment("loud"),
        );
        let spec = section.duplicate_spec();

        assert_eq!(spec.name, "Chorus (copy)");
        assert_eq!(spec.color, "#FFE6CC");
        assert_eq!(spec.comment, "loud");
        assert_eq!(spec.duration_bars, 8);
    }

    #[test]
    fn test_duration_bounds() {
        assert!(!is_valid_duration(0));
        assert!(is_valid_duration(1));
        assert!(is_valid_duration(64));
        assert!(!is_valid_duration(65));
    }

    #[test]
    fn test_standard_library_lookup() {
        let middle = standard_section("Middle 8").unwrap();
        assert_eq!(middle.duration_bars, 8);
        assert!(standard_section("Breakdown").is_none());
    }
}
