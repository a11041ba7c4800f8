//! Wall-clock interpretation policy.
//!
//! Scanned dates and times carry no zone. The caller picks how they are read;
//! there is intentionally no default.

use crate::schedule::error::ParseError;
use chrono::{DateTime, Local, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// How a naive date-time is mapped to an absolute instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TimeZonePolicy {
    /// Treat wall-clock text as UTC.
    Utc,
    /// Treat wall-clock text as the host's local zone.
    Local,
    /// Treat wall-clock text as the given IANA zone.
    Named(Tz),
}

/// Unknown policy string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeZoneParseError(pub String);

impl Display for TimeZoneParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported time zone `{}`; expected utc|local|<IANA name>",
            self.0
        )
    }
}

impl Error for TimeZoneParseError {}

impl TimeZonePolicy {
    /// Resolves `local` to a UTC instant.
    ///
    /// DST-ambiguous times resolve to the earliest candidate. Times inside a
    /// DST gap are rejected.
    pub fn resolve(&self, local: NaiveDateTime) -> Result<DateTime<Utc>, ParseError> {
        match self {
            Self::Utc => Ok(Utc.from_utc_datetime(&local)),
            Self::Local => pick_earliest(Local.from_local_datetime(&local), local, self),
            Self::Named(tz) => pick_earliest(tz.from_local_datetime(&local), local, self),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Self::Utc => "utc".to_string(),
            Self::Local => "local".to_string(),
            Self::Named(tz) => tz.name().to_string(),
        }
    }
}

fn pick_earliest<Z: TimeZone>(
    candidates: LocalResult<DateTime<Z>>,
    local: NaiveDateTime,
    policy: &TimeZonePolicy,
) -> Result<DateTime<Utc>, ParseError> {
    match candidates {
        LocalResult::Single(instant) => Ok(instant.with_timezone(&Utc)),
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => Err(ParseError::NonexistentLocalTime {
            local,
            zone: policy.label(),
        }),
    }
}

impl FromStr for TimeZonePolicy {
    type Err = TimeZoneParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "utc" | "z" => Ok(Self::Utc),
            "local" => Ok(Self::Local),
            _ => trimmed
                .parse::<Tz>()
                .map(Self::Named)
                .map_err(|_| TimeZoneParseError(trimmed.to_string())),
        }
    }
}

impl TryFrom<String> for TimeZonePolicy {
    type Error = TimeZoneParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeZonePolicy> for String {
    fn from(value: TimeZonePolicy) -> Self {
        value.label()
    }
}

impl Display for TimeZonePolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}
