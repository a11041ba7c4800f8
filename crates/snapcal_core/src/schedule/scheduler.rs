//! Event scheduler: confirmed record + now -> schedule result and intents.
//!
//! # Invariants
//! - `end_instant = start_instant + EVENT_DURATION`.
//! - `fire_delay = max(start_instant - now - REMINDER_LEAD, 0)`.
//! - `reminder_fire_instant = max(start_instant - REMINDER_LEAD, min(now, start_instant))`.
//! - No partial output: an error means no intent was produced.
//!
//! Events closer than `REMINDER_LEAD` (or already past) still get a reminder
//! that fires immediately instead of being refused.

use crate::model::intent::{CalendarIntent, NotificationIntent, ScheduleResult, ScheduledEvent};
use crate::model::record::{ConfirmedRecord, EventDraft};
use crate::schedule::error::{ParseError, ScheduleResultOf};
use crate::schedule::time_zone::TimeZonePolicy;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Fixed calendar span of every scheduled event.
pub const EVENT_DURATION: Duration = Duration::hours(1);
/// How long before the start the reminder should fire.
pub const REMINDER_LEAD: Duration = Duration::minutes(10);

static STRICT_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$").expect("valid strict date regex")
});
static STRICT_TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(0?[1-9]|1[0-2]):([0-5][0-9]) ?([AaPp])[Mm]$").expect("valid strict time regex")
});

/// Scheduler configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// Zone used to read the record's wall-clock date and time.
    pub time_zone: TimeZonePolicy,
}

impl SchedulerConfig {
    pub fn new(time_zone: TimeZonePolicy) -> Self {
        Self { time_zone }
    }
}

/// Stateless scheduler. Safe to share and call concurrently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventScheduler {
    config: SchedulerConfig,
}

impl EventScheduler {
    pub fn new(config: SchedulerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Builds the schedule and both intents for a confirmed record.
    ///
    /// # Errors
    /// - `ScheduleError::Parse` when date and time do not form a valid instant
    ///   in the configured zone.
    pub fn build_schedule(
        &self,
        record: &ConfirmedRecord,
        now: DateTime<Utc>,
    ) -> ScheduleResultOf<ScheduledEvent> {
        let local = parse_local_datetime(record.date(), record.time())?;
        let start_instant = self.config.time_zone.resolve(local)?;
        let end_instant = start_instant
            .checked_add_signed(EVENT_DURATION)
            .ok_or(ParseError::OutOfRange(local))?;
        let lead_instant = start_instant
            .checked_sub_signed(REMINDER_LEAD)
            .ok_or(ParseError::OutOfRange(local))?;

        let fire_delay = (lead_instant - now).to_std().unwrap_or_default();
        let reminder_fire_instant = lead_instant.max(now.min(start_instant));

        let result = ScheduleResult {
            start_instant,
            end_instant,
            reminder_fire_instant,
        };

        Ok(ScheduledEvent {
            result,
            calendar: CalendarIntent {
                title: record.name().to_string(),
                start_instant,
                end_instant,
                location: record.location().to_string(),
                notes: format!("Event details: {} at {}", record.name(), record.location()),
            },
            notification: NotificationIntent {
                title: format!("Reminder: {}", record.name()),
                body: format!(
                    "Your event is coming up at {}. Location: {}",
                    record.time(),
                    record.location()
                ),
                fire_delay,
            },
        })
    }

    /// Validates a caller-edited draft, then schedules it.
    ///
    /// # Errors
    /// - `ScheduleError::Validation` when any field is blank or the sentinel.
    /// - `ScheduleError::Parse` as for [`EventScheduler::build_schedule`].
    pub fn schedule_draft(
        &self,
        draft: &EventDraft,
        now: DateTime<Utc>,
    ) -> ScheduleResultOf<ScheduledEvent> {
        let record = ConfirmedRecord::try_from(draft.clone())?;
        self.build_schedule(&record, now)
    }
}

/// Strictly parses `YYYY-MM-DD` plus `h:mm AM|PM` into a naive wall-clock time.
pub fn parse_local_datetime(date: &str, time: &str) -> Result<NaiveDateTime, ParseError> {
    Ok(parse_date(date)?.and_time(parse_time(time)?))
}

fn parse_date(value: &str) -> Result<NaiveDate, ParseError> {
    let trimmed = value.trim();
    let invalid = || ParseError::InvalidDate(trimmed.to_string());
    let caps = STRICT_DATE_RE.captures(trimmed).ok_or_else(invalid)?;
    let year = caps[1].parse::<i32>().map_err(|_| invalid())?;
    let month = caps[2].parse::<u32>().map_err(|_| invalid())?;
    let day = caps[3].parse::<u32>().map_err(|_| invalid())?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

fn parse_time(value: &str) -> Result<NaiveTime, ParseError> {
    let trimmed = value.trim();
    let invalid = || ParseError::InvalidTime(trimmed.to_string());
    let caps = STRICT_TIME_RE.captures(trimmed).ok_or_else(invalid)?;
    let hour12 = caps[1].parse::<u32>().map_err(|_| invalid())?;
    let minute = caps[2].parse::<u32>().map_err(|_| invalid())?;
    let is_pm = caps[3].eq_ignore_ascii_case("p");
    let hour24 = match (hour12, is_pm) {
        (12, false) => 0,
        (12, true) => 12,
        (hour, false) => hour,
        (hour, true) => hour + 12,
    };
    NaiveTime::from_hms_opt(hour24, minute, 0).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::{parse_local_datetime, parse_time};
    use crate::schedule::error::ParseError;
    use chrono::NaiveTime;

    #[test]
    fn midnight_and_noon_follow_twelve_hour_convention() {
        assert_eq!(parse_time("12:00 AM").unwrap(), NaiveTime::from_hms_opt(0, 0, 0).unwrap());
        assert_eq!(parse_time("12:15 pm").unwrap(), NaiveTime::from_hms_opt(12, 15, 0).unwrap());
        assert_eq!(parse_time("09:05AM").unwrap(), NaiveTime::from_hms_opt(9, 5, 0).unwrap());
        assert_eq!(parse_time("11:59 PM").unwrap(), NaiveTime::from_hms_opt(23, 59, 0).unwrap());
    }

    #[test]
    fn time_without_meridiem_is_rejected() {
        let err = parse_time("3:30").unwrap_err();
        assert_eq!(err, ParseError::InvalidTime("3:30".to_string()));
    }

    #[test]
    fn malformed_times_are_rejected() {
        for value in ["13:00 PM", "0:30 AM", "3:5 PM", "3.30 PM", "3:30  PM", "3:30 P.M."] {
            assert!(
                matches!(parse_time(value), Err(ParseError::InvalidTime(_))),
                "`{value}` should be rejected"
            );
        }
    }

    #[test]
    fn calendar_invalid_dates_are_rejected() {
        for value in ["2024-04-31", "2023-02-29", "2024-13-40", "2024/05/10", "24-05-10"] {
            assert!(
                matches!(
                    parse_local_datetime(value, "3:30 PM"),
                    Err(ParseError::InvalidDate(_))
                ),
                "`{value}` should be rejected"
            );
        }
        assert!(parse_local_datetime("2024-02-29", "3:30 PM").is_ok());
    }
}
