//! Session settings: tempo, time signature, timeline toggle and title

use serde::{Deserialize, Serialize};

use crate::error::GridError;

pub const DEFAULT_TRACK_TITLE: &str = "New track";

pub const MIN_BPM: u32 = 1;
pub const MAX_BPM: u32 = 256;
pub const MIN_SIGNATURE_NUMERATOR: u32 = 1;
pub const MAX_SIGNATURE_NUMERATOR: u32 = 8;
pub const SIGNATURE_DENOMINATORS: [u32; 4] = [1, 2, 4, 8];

pub fn is_valid_bpm(bpm: u32) -> bool {
    (MIN_BPM..=MAX_BPM).contains(&bpm)
}

pub fn is_valid_numerator(numerator: u32) -> bool {
    (MIN_SIGNATURE_NUMERATOR..=MAX_SIGNATURE_NUMERATOR).contains(&numerator)
}

pub fn is_valid_denominator(denominator: u32) -> bool {
    SIGNATURE_DENOMINATORS.contains(&denominator)
}

/// Blank titles fall back to [`DEFAULT_TRACK_TITLE`]
pub fn normalize_title(title: &str) -> String {
    if title.trim().is_empty() {
        DEFAULT_TRACK_TITLE.to_string()
    } else {
        title.to_string()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub show_timeline: bool,
    pub bpm: u32,
    pub signature_numerator: u32,
    pub signature_denominator: u32,
    pub track_title: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_timeline: false,
            bpm: 120,
            signature_numerator: 4,
            signature_denominator: 4,
            track_title: DEFAULT_TRACK_TITLE.to_string(),
        }
    }
}

impl Settings {
    /// Apply `patch` if every value in it is in range; otherwise leave
    /// settings untouched
    pub fn apply(&mut self, patch: SettingsPatch) -> Result<(), GridError> {
        patch.validate()?;

        if let Some(show_timeline) = patch.show_timeline {
            self.show_timeline = show_timeline;
        }
        if let Some(bpm) = patch.bpm {
            self.bpm = bpm;
        }
        if let Some(numerator) = patch.signature_numerator {
            self.signature_numerator = numerator;
        }
        if let Some(denominator) = patch.signature_denominator {
            self.signature_denominator = denominator;
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsPatch {
    pub show_timeline: Option<bool>,
    pub bpm: Option<u32>,
    pub signature_numerator: Option<u32>,
    pub signature_denominator: Option<u32>,
}

impl SettingsPatch {
    pub fn validate(&self) -> Result<(), GridError> {
        if let Some(bpm) = self.bpm {
            if !is_valid_bpm(bpm) {
                return Err(GridError::InvalidArgument(format!(
                    "bpm {} out of range ({}-{})",
                    bpm, MIN_BPM, MAX_BPM
                )));
            }
        }
        if let Some(numerator) = self.signature_numerator {
            if !is_valid_numerator(numerator) {
                return Err(GridError::InvalidArgument(format!(
                    "signature numerator {} out of range ({}-{})",
                    numerator, MIN_SIGNATURE_NUMERATOR, MAX_SIGNATURE_NUMERATOR
                )));
            }
        }
        if let Some(denominator) = self.signature_denominator {
            if !is_valid_denominator(denominator) {
                return Err(GridError::InvalidArgument(format!(
                    "signature denominator {} must be one of 1, 2, 4, 8",
                    denominator
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_rejects_whole_patch_on_bad_value() {
        let mut settings = Settings::default();
        let patch = SettingsPatch {
            bpm: Some(90),
            signature_denominator: Some(3),
            ..Default::default()
        };

        assert!(matches!(settings.apply(patch), Err(GridError::InvalidArgument(_))));
        assert_eq!(settings.bpm, 120);
    }

    #[test]
    fn test_apply_partial_patch() {
        let mut settings = Settings::default();
        settings
            .apply(SettingsPatch {
                show_timeline: Some(true),
                signature_numerator: Some(3),
                ..Default::default()
            })
            .unwrap();

        assert!(settings.show_timeline);
        assert_eq!(settings.signature_numerator, 3);
        assert_eq!(settings.bpm, 120);
    }

    #[test]
    fn test_blank_title_normalized() {
        assert_eq!(normalize_title("   "), "New track");
        assert_eq!(normalize_title(" Song "), " Song ");
    }
}
