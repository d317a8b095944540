//! Structural validation of an imported document
//!
//! Runs on the untyped JSON value in two phases. The presence phase checks
//! the four top-level keys and stops there if any is missing. The type and
//! range phase walks every item and collects every offending attribute
//! path before failing.

use serde_json::{Map, Value};

use crate::error::ValidationErrors;
use crate::models::section::{MAX_DURATION_BARS, MIN_DURATION_BARS};
use crate::models::settings::{
    MAX_BPM, MAX_SIGNATURE_NUMERATOR, MIN_BPM, MIN_SIGNATURE_NUMERATOR, SIGNATURE_DENOMINATORS,
};

pub const REQUIRED_KEYS: [&str; 4] = ["settings", "sections", "lines", "descriptions"];

/// Largest integer a JavaScript number holds exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

pub use crate::models::section::is_hex_color;

pub fn validate_document(value: &Value) -> Result<(), ValidationErrors> {
    let missing: Vec<String> = REQUIRED_KEYS
        .iter()
        .filter(|key| value.get(**key).is_none())
        .map(|key| key.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(ValidationErrors::missing_keys(missing));
    }

    let mut errors = Vec::new();
    check_settings(&value["settings"], &mut errors);
    check_items(&value["sections"], "sections", &mut errors, check_section);
    check_items(&value["lines"], "lines", &mut errors, check_line);
    check_items(&value["descriptions"], "descriptions", &mut errors, check_description);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors::invalid_fields(errors))
    }
}

fn check_settings(settings: &Value, errors: &mut Vec<String>) {
    let Some(settings) = settings.as_object() else {
        errors.push("settings".to_string());
        return;
    };

    if !settings.get("showTimeline").is_some_and(Value::is_boolean) {
        errors.push("settings.showTimeline".to_string());
    }
    if !integer_where(settings, "bpm", |n| (MIN_BPM as i64..=MAX_BPM as i64).contains(&n)) {
        errors.push("settings.bpm".to_string());
    }
    if !integer_where(settings, "signatureNumerator", |n| {
        (MIN_SIGNATURE_NUMERATOR as i64..=MAX_SIGNATURE_NUMERATOR as i64).contains(&n)
    }) {
        errors.push("settings.signatureNumerator".to_string());
    }
    if !integer_where(settings, "signatureDenominator", |n| {
        SIGNATURE_DENOMINATORS.iter().any(|d| *d as i64 == n)
    }) {
        errors.push("settings.signatureDenominator".to_string());
    }
    if !optional_string(settings, "trackName") {
        errors.push("settings.trackName".to_string());
    }
}

fn check_items(
    items: &Value,
    name: &str,
    errors: &mut Vec<String>,
    check: fn(&Map<String, Value>, &str, &mut Vec<String>),
) {
    let Some(items) = items.as_array() else {
        errors.push(name.to_string());
        return;
    };

    for (index, item) in items.iter().enumerate() {
        let path = format!("{}[{}]", name, index);
        match item.as_object() {
            Some(fields) => check(fields, &path, errors),
            None => errors.push(path),
        }
    }
}

fn check_section(section: &Map<String, Value>, path: &str, errors: &mut Vec<String>) {
    if !positive_integer(section, "number") {
        errors.push(format!("{}.number", path));
    }
    if !section.get("name").is_some_and(Value::is_string) {
        errors.push(format!("{}.name", path));
    }
    if !integer_where(section, "duration", |n| {
        (MIN_DURATION_BARS as i64..=MAX_DURATION_BARS as i64).contains(&n)
    }) {
        errors.push(format!("{}.duration", path));
    }
    if !section.get("color").and_then(Value::as_str).is_some_and(is_hex_color) {
        errors.push(format!("{}.color", path));
    }
    if !optional_string(section, "comment") {
        errors.push(format!("{}.comment", path));
    }
}

fn check_line(line: &Map<String, Value>, path: &str, errors: &mut Vec<String>) {
    if !positive_integer(line, "number") {
        errors.push(format!("{}.number", path));
    }
    if !line.get("name").is_some_and(Value::is_string) {
        errors.push(format!("{}.name", path));
    }
    if !line.get("sound").is_some_and(Value::is_string) {
        errors.push(format!("{}.sound", path));
    }
    if !optional_string(line, "comment") {
        errors.push(format!("{}.comment", path));
    }
}

fn check_description(description: &Map<String, Value>, path: &str, errors: &mut Vec<String>) {
    if !positive_integer(description, "sectionNumber") {
        errors.push(format!("{}.sectionNumber", path));
    }
    if !positive_integer(description, "lineNumber") {
        errors.push(format!("{}.lineNumber", path));
    }
    if !description.get("description").is_some_and(Value::is_string) {
        errors.push(format!("{}.description", path));
    }
}

/// Integer value of a JSON number, `120.0` included
fn as_integer(value: &Value) -> Option<i64> {
    if let Some(n) = value.as_i64() {
        return Some(n);
    }
    let n = value.as_f64()?;
    (n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER).then_some(n as i64)
}

/// Field is an integer-valued number accepted by `accept`
fn integer_where(fields: &Map<String, Value>, key: &str, accept: impl Fn(i64) -> bool) -> bool {
    fields.get(key).and_then(as_integer).is_some_and(accept)
}

fn positive_integer(fields: &Map<String, Value>, key: &str) -> bool {
    integer_where(fields, key, |n| n > 0)
}

/// Rewrite integer-valued floats (`8.0`) as JSON integers, in place
///
/// Run after validation so typed deserialization sees plain integers.
pub fn normalize_integers(value: &mut Value) {
    match value {
        Value::Array(items) => items.iter_mut().for_each(normalize_integers),
        Value::Object(fields) => fields.values_mut().for_each(normalize_integers),
        _ => {
            if value.is_f64() {
                if let Some(n) = as_integer(value) {
                    *value = Value::from(n);
                }
            }
        }
    }
}

/// Absent, or present as a string
fn optional_string(fields: &Map<String, Value>, key: &str) -> bool {
    fields.get(key).map_or(true, Value::is_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationPhase;
    use serde_json::json;

    fn valid() -> Value {
        json!({
            "settings": { "showTimeline": true, "bpm": 120, "signatureNumerator": 4, "signatureDenominator": 4 },
            "sections": [ { "number": 1, "name": "Intro", "duration": 4, "color": "#DAE8FC" } ],
            "lines": [ { "number": 1, "name": "Drums", "sound": "" } ],
            "descriptions": [ { "sectionNumber": 1, "lineNumber": 1, "description": "hats" } ]
        })
    }

    #[test]
    fn test_valid_document_passes() {
        assert!(validate_document(&valid()).is_ok());
    }

    #[test]
    fn test_missing_keys_reported_together() {
        let err = validate_document(&json!({ "sections": [] })).unwrap_err();

        assert_eq!(err.phase, ValidationPhase::MissingKeys);
        assert_eq!(err.paths(), &["settings", "lines", "descriptions"]);
    }

    #[test]
    fn test_missing_keys_stop_before_type_checks() {
        let mut doc = valid();
        doc["settings"]["bpm"] = json!(0);
        doc.as_object_mut().unwrap().remove("descriptions");

        let err = validate_document(&doc).unwrap_err();
        assert_eq!(err.paths(), &["descriptions"]);
    }

    #[test]
    fn test_collects_every_invalid_field() {
        let mut doc = valid();
        doc["settings"]["signatureDenominator"] = json!(3);
        doc["sections"][0]["duration"] = json!(65);
        doc["sections"][0]["comment"] = json!(7);
        doc["lines"][0].as_object_mut().unwrap().remove("sound");
        doc["descriptions"][0]["lineNumber"] = json!(0);

        let err = validate_document(&doc).unwrap_err();
        assert_eq!(err.phase, ValidationPhase::InvalidFields);
        assert_eq!(
            err.paths(),
            &[
                "settings.signatureDenominator",
                "sections[0].duration",
                "sections[0].comment",
                "lines[0].sound",
                "descriptions[0].lineNumber",
            ]
        );
    }

    #[test]
    fn test_non_integer_and_wrong_container_types() {
        let mut doc = valid();
        doc["settings"]["bpm"] = json!(120.5);
        doc["settings"]["showTimeline"] = json!("yes");
        doc["lines"] = json!({});
        doc["descriptions"] = json!([42]);

        let err = validate_document(&doc).unwrap_err();
        assert!(err.contains("settings.bpm"));
        assert!(err.contains("settings.showTimeline"));
        assert!(err.contains("lines"));
        assert!(err.contains("descriptions[0]"));
    }

    #[test]
    fn test_hex_color() {
        assert!(is_hex_color("#a1B2c3"));
        assert!(!is_hex_color("red"));
        assert!(!is_hex_color("#12345"));
        assert!(!is_hex_color("#1234567"));
    }
}
