//! Lexical field rules and the `extract` entry point.
//!
//! Recognized shapes are deliberately narrow:
//! - `Name:` / `Event:` label lines for the event name.
//! - `Location:` / `Where:` / `Address:` label lines for the location.
//! - `YYYY-MM-DD` for the date. Other date notations are not recognized.
//! - `H:MM` / `HH:MM` (hour 1-12) with optional `AM`/`PM` for the time.

use crate::model::record::{CandidateRecord, FieldValue, RecordField};
use once_cell::sync::Lazy;
use regex::Regex;

static NAME_LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:name|event):[ \t]*([^\n]*)").expect("valid name label regex")
});
static LOCATION_LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:location|where|address):[ \t]*([^\n]*)")
        .expect("valid location label regex")
});
static ISO_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b([0-9]{4})-([0-9]{2})-([0-9]{2})\b").expect("valid date regex")
});
static CLOCK_TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:0?[1-9]|1[0-2]):[0-5][0-9](?:[ \t]?(?i:am|pm))?\b")
        .expect("valid time regex")
});

/// One independent extraction step: first match of `pattern` in document
/// order, reading capture group `group` (0 = whole match).
pub struct FieldRule {
    pub field: RecordField,
    pattern: &'static Lazy<Regex>,
    group: usize,
}

impl FieldRule {
    /// Runs the rule over `text`; no match yields `FieldValue::Missing`.
    pub fn apply(&self, text: &str) -> FieldValue {
        let matched = self
            .pattern
            .captures(text)
            .and_then(|caps| caps.get(self.group))
            .map(|m| m.as_str());
        FieldValue::from_match(matched)
    }
}

/// Field rules in record declaration order.
pub static FIELD_RULES: [FieldRule; 4] = [
    FieldRule {
        field: RecordField::Name,
        pattern: &NAME_LABEL_RE,
        group: 1,
    },
    FieldRule {
        field: RecordField::Date,
        pattern: &ISO_DATE_RE,
        group: 0,
    },
    FieldRule {
        field: RecordField::Time,
        pattern: &CLOCK_TIME_RE,
        group: 0,
    },
    FieldRule {
        field: RecordField::Location,
        pattern: &LOCATION_LABEL_RE,
        group: 1,
    },
];

/// Returns the rule registered for `field`.
pub fn rule_for(field: RecordField) -> &'static FieldRule {
    match field {
        RecordField::Name => &FIELD_RULES[0],
        RecordField::Date => &FIELD_RULES[1],
        RecordField::Time => &FIELD_RULES[2],
        RecordField::Location => &FIELD_RULES[3],
    }
}

/// Extracts a candidate event record from raw OCR text.
///
/// Pure function of `raw_text`. Never fails: absent fields come back as
/// `FieldValue::Missing`. A label followed by nothing on its line yields
/// `FieldValue::Present("")`, so completeness checks should use
/// [`FieldValue::is_blank`].
pub fn extract(raw_text: &str) -> CandidateRecord {
    CandidateRecord {
        name: rule_for(RecordField::Name).apply(raw_text),
        date: rule_for(RecordField::Date).apply(raw_text),
        time: rule_for(RecordField::Time).apply(raw_text),
        location: rule_for(RecordField::Location).apply(raw_text),
    }
}

#[cfg(test)]
mod tests {
    use super::{extract, rule_for, FIELD_RULES};
    use crate::model::record::{FieldValue, RecordField};

    fn present(value: &str) -> FieldValue {
        FieldValue::Present(value.to_string())
    }

    #[test]
    fn rules_are_declared_in_record_order() {
        let fields = FIELD_RULES.iter().map(|rule| rule.field).collect::<Vec<_>>();
        assert_eq!(fields, RecordField::ALL.to_vec());
        for field in RecordField::ALL {
            assert_eq!(rule_for(field).field, field);
        }
    }

    #[test]
    fn labels_are_case_insensitive() {
        let record = extract("EVENT: Launch\nwhere: Hall B");
        assert_eq!(record.name, present("Launch"));
        assert_eq!(record.location, present("Hall B"));
    }

    #[test]
    fn label_must_start_at_word_boundary() {
        let record = extract("Username: bob\nIPAddress: 10.0.0.1");
        assert_eq!(record.name, FieldValue::Missing);
        assert_eq!(record.location, FieldValue::Missing);
    }

    #[test]
    fn label_without_value_is_present_but_empty() {
        let record = extract("Name:   \nLocation:\nSomething else");
        assert_eq!(record.name, present(""));
        assert_eq!(record.location, present(""));
        assert!(record.name.is_blank());
    }

    #[test]
    fn crlf_line_endings_are_trimmed() {
        let record = extract("Name: Standup\r\nAddress: 1 Main St\r\n");
        assert_eq!(record.name, present("Standup"));
        assert_eq!(record.location, present("1 Main St"));
    }

    #[test]
    fn time_rejects_out_of_range_hours_and_minutes() {
        assert_eq!(extract("at 13:30").time, FieldValue::Missing);
        assert_eq!(extract("at 0:30").time, FieldValue::Missing);
        assert_eq!(extract("at 3:75").time, FieldValue::Missing);
        assert_eq!(extract("at 12:05").time, present("12:05"));
    }

    #[test]
    fn time_keeps_meridiem_in_any_case() {
        assert_eq!(extract("doors 7:45pm").time, present("7:45pm"));
        assert_eq!(extract("doors 07:45 Am!").time, present("07:45 Am"));
        assert_eq!(extract("doors 7:45 tonight").time, present("7:45"));
    }

    #[test]
    fn date_requires_full_iso_shape() {
        assert_eq!(extract("due 2024-5-10").date, FieldValue::Missing);
        assert_eq!(extract("due 12024-05-10").date, FieldValue::Missing);
        assert_eq!(extract("due 10/05/2024").date, FieldValue::Missing);
        assert_eq!(extract("due 2024-05-10.").date, present("2024-05-10"));
    }
}
