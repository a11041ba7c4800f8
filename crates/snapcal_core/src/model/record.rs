//! Event record shapes.
//!
//! # Responsibility
//! - Model per-field extraction results as `Missing | Present`.
//! - Gate scheduling behind a validated `ConfirmedRecord`.
//!
//! # Invariants
//! - `FieldValue` serializes as a plain string; `Missing` maps to the legacy
//!   sentinel `"Not there"` and back.
//! - `ConfirmedRecord` fields are trimmed, non-empty and never the sentinel.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Extraction result for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldValue {
    /// No pattern matched.
    Missing,
    /// Trimmed matched text. May be empty when a label had nothing after it.
    Present(String),
}

impl FieldValue {
    /// Legacy boundary string for a field that was not found.
    pub const SENTINEL: &'static str = "Not there";

    /// Wraps an optional match, trimming the matched text.
    ///
    /// A match equal to the sentinel is `Missing`, same as at the serde boundary.
    pub fn from_match(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(text) => Self::from(text.to_string()),
            None => Self::Missing,
        }
    }

    /// Returns the matched text, if any.
    pub fn as_present(&self) -> Option<&str> {
        match self {
            Self::Missing => None,
            Self::Present(value) => Some(value.as_str()),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// True for `Missing` and for whitespace-only matches.
    ///
    /// Completeness checks must use this rather than `is_missing`.
    pub fn is_blank(&self) -> bool {
        self.as_present().map_or(true, |value| value.trim().is_empty())
    }

    /// Returns the boundary string (sentinel for `Missing`).
    pub fn as_str(&self) -> &str {
        self.as_present().unwrap_or(Self::SENTINEL)
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        if value == Self::SENTINEL {
            Self::Missing
        } else {
            Self::Present(value)
        }
    }
}

impl From<FieldValue> for String {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Missing => FieldValue::SENTINEL.to_string(),
            FieldValue::Present(text) => text,
        }
    }
}

impl Display for FieldValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field identifiers shared by records and validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordField {
    Name,
    Date,
    Time,
    Location,
}

impl RecordField {
    /// All fields in record declaration order.
    pub const ALL: [RecordField; 4] = [Self::Name, Self::Date, Self::Time, Self::Location];

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Date => "date",
            Self::Time => "time",
            Self::Location => "location",
        }
    }
}

impl Display for RecordField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Unvalidated extraction output. Created once per extraction call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub name: FieldValue,
    pub date: FieldValue,
    pub time: FieldValue,
    pub location: FieldValue,
}

impl CandidateRecord {
    /// Record with every field missing, as produced for empty input.
    pub fn empty() -> Self {
        Self {
            name: FieldValue::Missing,
            date: FieldValue::Missing,
            time: FieldValue::Missing,
            location: FieldValue::Missing,
        }
    }

    pub fn field(&self, field: RecordField) -> &FieldValue {
        match field {
            RecordField::Name => &self.name,
            RecordField::Date => &self.date,
            RecordField::Time => &self.time,
            RecordField::Location => &self.location,
        }
    }

    /// Blank fields in declaration order.
    pub fn missing_fields(&self) -> Vec<RecordField> {
        RecordField::ALL
            .into_iter()
            .filter(|field| self.field(*field).is_blank())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Seeds an editable draft. Missing fields carry the sentinel text verbatim
    /// so the editor shows what was not found.
    pub fn into_draft(self) -> EventDraft {
        EventDraft {
            name: self.name.into(),
            date: self.date.into(),
            time: self.time.into(),
            location: self.location.into(),
        }
    }
}

/// Caller-edited record awaiting validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDraft {
    pub name: String,
    pub date: String,
    pub time: String,
    pub location: String,
}

impl EventDraft {
    pub fn new(
        name: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
            time: time.into(),
            location: location.into(),
        }
    }

    fn field(&self, field: RecordField) -> &str {
        match field {
            RecordField::Name => &self.name,
            RecordField::Date => &self.date,
            RecordField::Time => &self.time,
            RecordField::Location => &self.location,
        }
    }
}

/// Validation failure raised before scheduling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Every field that is empty, whitespace-only or the sentinel.
    MissingFields(Vec<RecordField>),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingFields(fields) => {
                let labels = fields
                    .iter()
                    .map(|field| field.label())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "missing required field(s): {labels}")
            }
        }
    }
}

impl Error for ValidationError {}

/// Complete record ready for scheduling. Owned by the caller; never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EventDraft", into = "EventDraft")]
pub struct ConfirmedRecord {
    name: String,
    date: String,
    time: String,
    location: String,
}

impl ConfirmedRecord {
    /// Validates and trims all four fields.
    ///
    /// # Errors
    /// - `ValidationError::MissingFields` listing every blank or sentinel field.
    pub fn new(
        name: impl Into<String>,
        date: impl Into<String>,
        time: impl Into<String>,
        location: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Self::try_from(EventDraft::new(name, date, time, location))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Summary line used by event listings, e.g. `2024-05-10 at 3:30 PM`.
    pub fn when_label(&self) -> String {
        format!("{} at {}", self.date, self.time)
    }
}

impl TryFrom<EventDraft> for ConfirmedRecord {
    type Error = ValidationError;

    fn try_from(draft: EventDraft) -> Result<Self, Self::Error> {
        let missing = RecordField::ALL
            .into_iter()
            .filter(|field| is_blank_input(draft.field(*field)))
            .collect::<Vec<_>>();
        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        Ok(Self {
            name: draft.name.trim().to_string(),
            date: draft.date.trim().to_string(),
            time: draft.time.trim().to_string(),
            location: draft.location.trim().to_string(),
        })
    }
}

impl TryFrom<CandidateRecord> for ConfirmedRecord {
    type Error = ValidationError;

    fn try_from(candidate: CandidateRecord) -> Result<Self, Self::Error> {
        Self::try_from(candidate.into_draft())
    }
}

impl From<ConfirmedRecord> for EventDraft {
    fn from(record: ConfirmedRecord) -> Self {
        EventDraft {
            name: record.name,
            date: record.date,
            time: record.time,
            location: record.location,
        }
    }
}

fn is_blank_input(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed == FieldValue::SENTINEL
}

#[cfg(test)]
mod tests {
    use super::{CandidateRecord, ConfirmedRecord, FieldValue, RecordField, ValidationError};

    #[test]
    fn field_value_blank_covers_missing_and_whitespace() {
        assert!(FieldValue::Missing.is_blank());
        assert!(FieldValue::Present("   ".to_string()).is_blank());
        assert!(FieldValue::Present(String::new()).is_blank());
        assert!(!FieldValue::Present("Room 4".to_string()).is_blank());
        assert!(!FieldValue::Present(String::new()).is_missing());
    }

    #[test]
    fn from_match_trims_present_values() {
        assert_eq!(
            FieldValue::from_match(Some("  Team Sync \r")),
            FieldValue::Present("Team Sync".to_string())
        );
        assert_eq!(FieldValue::from_match(None), FieldValue::Missing);
        assert_eq!(FieldValue::from_match(Some(" Not there ")), FieldValue::Missing);
    }

    #[test]
    fn candidate_missing_fields_follow_declaration_order() {
        let mut candidate = CandidateRecord::empty();
        candidate.date = FieldValue::Present("2024-05-10".to_string());
        candidate.location = FieldValue::Present(" ".to_string());
        assert_eq!(
            candidate.missing_fields(),
            vec![RecordField::Name, RecordField::Time, RecordField::Location]
        );
        assert!(!candidate.is_complete());
    }

    #[test]
    fn confirmed_record_reports_every_blank_field() {
        let err = ConfirmedRecord::new("", "2024-05-10", "Not there", "   ")
            .expect_err("blank fields must be rejected");
        assert_eq!(
            err,
            ValidationError::MissingFields(vec![
                RecordField::Name,
                RecordField::Time,
                RecordField::Location,
            ])
        );
        assert_eq!(err.to_string(), "missing required field(s): name, time, location");
    }

    #[test]
    fn confirmed_record_trims_values() {
        let record = ConfirmedRecord::new(" Demo ", "2024-05-10 ", " 3:30 PM", "X\n")
            .expect("complete record should validate");
        assert_eq!(record.name(), "Demo");
        assert_eq!(record.date(), "2024-05-10");
        assert_eq!(record.time(), "3:30 PM");
        assert_eq!(record.location(), "X");
        assert_eq!(record.when_label(), "2024-05-10 at 3:30 PM");
    }
}
