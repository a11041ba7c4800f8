//! Scheduling error taxonomy.

use crate::model::record::ValidationError;
use chrono::NaiveDateTime;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type for scheduling APIs.
pub type ScheduleResultOf<T> = Result<T, ScheduleError>;

/// Date/time text is present but does not resolve to a valid instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Not `YYYY-MM-DD`, or not a real calendar day.
    InvalidDate(String),
    /// Not `h:mm AM|PM` with hour 1-12 and minute 00-59.
    InvalidTime(String),
    /// Wall-clock time skipped by a DST transition in the configured zone.
    NonexistentLocalTime { local: NaiveDateTime, zone: String },
    /// Instant arithmetic left the representable range.
    OutOfRange(NaiveDateTime),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDate(value) => {
                write!(f, "invalid date `{value}`: expected a valid YYYY-MM-DD")
            }
            Self::InvalidTime(value) => {
                write!(f, "invalid time `{value}`: expected h:mm AM/PM")
            }
            Self::NonexistentLocalTime { local, zone } => {
                write!(f, "local time {local} does not exist in time zone {zone}")
            }
            Self::OutOfRange(local) => write!(f, "event time {local} is out of range"),
        }
    }
}

impl Error for ParseError {}

/// Failure raised by the scheduler. Either kind means nothing was scheduled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    Validation(ValidationError),
    Parse(ParseError),
}

impl Display for ScheduleError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Parse(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ScheduleError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Parse(err) => Some(err),
        }
    }
}

impl From<ValidationError> for ScheduleError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<ParseError> for ScheduleError {
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}
