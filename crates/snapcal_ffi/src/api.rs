//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose extraction and scheduling as sync, use-case-level functions.
//! - Flatten core types into plain string/integer envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Missing fields cross the boundary as the legacy sentinel string.
//! - Instants cross the boundary as Unix epoch milliseconds.

use chrono::{DateTime, Utc};
use snapcal_core::{
    core_version as core_version_inner, extract, init_logging as init_logging_inner,
    location_map_url, ping as ping_inner, EventDraft, EventScheduler, ScheduleError,
    ScheduledEvent, SchedulerConfig, TimeZonePolicy,
};

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Exposes core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// Extracted fields for the review form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFields {
    /// Extracted value or `"Not there"`.
    pub name: String,
    pub date: String,
    pub time: String,
    pub location: String,
    /// Labels of blank fields (`name|date|time|location`).
    pub missing: Vec<String>,
}

/// Scheduling response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleResponse {
    /// Whether scheduling succeeded.
    pub ok: bool,
    /// Failure class on error: `validation|parse|config`.
    pub error_kind: Option<String>,
    /// Human-readable message for diagnostics/UI.
    pub message: String,
    pub start_epoch_ms: Option<i64>,
    pub end_epoch_ms: Option<i64>,
    pub reminder_epoch_ms: Option<i64>,
    /// Reminder trigger delay in whole seconds.
    pub reminder_delay_secs: Option<u64>,
    pub calendar_notes: Option<String>,
    pub notification_title: Option<String>,
    pub notification_body: Option<String>,
}

impl ScheduleResponse {
    fn success(scheduled: ScheduledEvent) -> Self {
        Self {
            ok: true,
            error_kind: None,
            message: "Event scheduled.".to_string(),
            start_epoch_ms: Some(scheduled.result.start_instant.timestamp_millis()),
            end_epoch_ms: Some(scheduled.result.end_instant.timestamp_millis()),
            reminder_epoch_ms: Some(scheduled.result.reminder_fire_instant.timestamp_millis()),
            reminder_delay_secs: Some(scheduled.notification.fire_delay_secs()),
            calendar_notes: Some(scheduled.calendar.notes),
            notification_title: Some(scheduled.notification.title),
            notification_body: Some(scheduled.notification.body),
        }
    }

    fn failure(kind: &str, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error_kind: Some(kind.to_string()),
            message: message.into(),
            start_epoch_ms: None,
            end_epoch_ms: None,
            reminder_epoch_ms: None,
            reminder_delay_secs: None,
            calendar_notes: None,
            notification_title: None,
            notification_body: None,
        }
    }
}

/// Extracts event fields from OCR text.
///
/// # FFI contract
/// - Sync call, pure, never fails.
#[flutter_rust_bridge::frb(sync)]
pub fn extract_event_fields(text: String) -> EventFields {
    let candidate = extract(&text);
    let missing = candidate
        .missing_fields()
        .into_iter()
        .map(|field| field.label().to_string())
        .collect();
    let draft = candidate.into_draft();
    EventFields {
        name: draft.name,
        date: draft.date,
        time: draft.time,
        location: draft.location,
        missing,
    }
}

/// Validates reviewed fields and computes the schedule.
///
/// Input semantics:
/// - `time_zone`: `utc`, `local` or an IANA zone name.
/// - `now_epoch_ms`: caller's current instant.
///
/// # FFI contract
/// - Sync call, pure, never panics.
/// - Returns `ok=false` with `error_kind` on any failure.
#[flutter_rust_bridge::frb(sync)]
pub fn build_event_schedule(
    name: String,
    date: String,
    time: String,
    location: String,
    time_zone: String,
    now_epoch_ms: i64,
) -> ScheduleResponse {
    let policy = match time_zone.parse::<TimeZonePolicy>() {
        Ok(policy) => policy,
        Err(err) => return ScheduleResponse::failure("config", err.to_string()),
    };
    let Some(now) = DateTime::<Utc>::from_timestamp_millis(now_epoch_ms) else {
        return ScheduleResponse::failure("config", format!("invalid now_epoch_ms: {now_epoch_ms}"));
    };

    let scheduler = EventScheduler::new(SchedulerConfig::new(policy));
    let draft = EventDraft::new(name, date, time, location);
    match scheduler.schedule_draft(&draft, now) {
        Ok(scheduled) => ScheduleResponse::success(scheduled),
        Err(err @ ScheduleError::Validation(_)) => {
            ScheduleResponse::failure("validation", err.to_string())
        }
        Err(err @ ScheduleError::Parse(_)) => ScheduleResponse::failure("parse", err.to_string()),
    }
}

/// Map search link for the "open location" action.
#[flutter_rust_bridge::frb(sync)]
pub fn location_link(location: String) -> String {
    location_map_url(&location)
}

#[cfg(test)]
mod tests {
    use super::{
        build_event_schedule, core_version, extract_event_fields, init_logging, location_link,
        ping,
    };

    const NOW_2024_05_10_T10_00_Z: i64 = 1_715_335_200_000;

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn extract_event_fields_uses_sentinel_for_missing() {
        let fields = extract_event_fields("Event: Team Sync\n2024-05-10".to_string());
        assert_eq!(fields.name, "Team Sync");
        assert_eq!(fields.date, "2024-05-10");
        assert_eq!(fields.time, "Not there");
        assert_eq!(fields.missing, vec!["time".to_string(), "location".to_string()]);
    }

    #[test]
    fn build_event_schedule_returns_epoch_millis() {
        let response = build_event_schedule(
            "Demo".to_string(),
            "2024-05-10".to_string(),
            "3:30 PM".to_string(),
            "X".to_string(),
            "utc".to_string(),
            NOW_2024_05_10_T10_00_Z,
        );
        assert!(response.ok, "{}", response.message);
        assert_eq!(
            response.start_epoch_ms,
            Some(NOW_2024_05_10_T10_00_Z + 5 * 3_600_000 + 30 * 60_000)
        );
        assert_eq!(
            response.end_epoch_ms,
            Some(NOW_2024_05_10_T10_00_Z + 6 * 3_600_000 + 30 * 60_000)
        );
        assert_eq!(response.reminder_delay_secs, Some(5 * 3600 + 20 * 60));
        assert_eq!(response.notification_title.as_deref(), Some("Reminder: Demo"));
    }

    #[test]
    fn build_event_schedule_classifies_failures() {
        let validation = build_event_schedule(
            "Demo".to_string(),
            "2024-05-10".to_string(),
            "Not there".to_string(),
            "X".to_string(),
            "utc".to_string(),
            NOW_2024_05_10_T10_00_Z,
        );
        assert_eq!(validation.error_kind.as_deref(), Some("validation"));

        let parse = build_event_schedule(
            "Demo".to_string(),
            "2024-13-40".to_string(),
            "3:30 PM".to_string(),
            "X".to_string(),
            "utc".to_string(),
            NOW_2024_05_10_T10_00_Z,
        );
        assert_eq!(parse.error_kind.as_deref(), Some("parse"));

        let config = build_event_schedule(
            "Demo".to_string(),
            "2024-05-10".to_string(),
            "3:30 PM".to_string(),
            "X".to_string(),
            "Nowhere/Special".to_string(),
            NOW_2024_05_10_T10_00_Z,
        );
        assert_eq!(config.error_kind.as_deref(), Some("config"));
        assert!(!config.ok);
    }

    #[test]
    fn location_link_encodes_query() {
        assert_eq!(
            location_link("Room 4".to_string()),
            "https://www.google.com/maps?q=Room%204"
        );
    }
}
