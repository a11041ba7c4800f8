//! Core domain logic for snapcal.
//! Turns OCR text from a photographed notice into a structured event, then
//! into calendar and reminder scheduling intents.

pub mod extract;
pub mod logging;
pub mod model;
pub mod ports;
pub mod schedule;
pub mod service;

pub use extract::field_extractor::{extract, FieldRule, FIELD_RULES};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::intent::{CalendarIntent, NotificationIntent, ScheduleResult, ScheduledEvent};
pub use model::record::{
    CandidateRecord, ConfirmedRecord, EventDraft, FieldValue, RecordField, ValidationError,
};
pub use ports::{
    CalendarService, ExternalServiceError, NotificationService, OcrService, ServiceKind,
    ServiceResult,
};
pub use schedule::clock::{Clock, FixedClock, SystemClock};
pub use schedule::error::{ParseError, ScheduleError};
pub use schedule::scheduler::{
    parse_local_datetime, EventScheduler, SchedulerConfig, EVENT_DURATION, REMINDER_LEAD,
};
pub use schedule::time_zone::{TimeZoneParseError, TimeZonePolicy};
pub use service::event_pipeline::{location_map_url, DispatchReport, EventPipeline, ScanOutcome};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
