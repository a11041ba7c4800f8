//! Scan -> review -> schedule -> dispatch use-case service.
//!
//! # Responsibility
//! - Run OCR and field extraction for a captured image.
//! - Validate a reviewed draft, build its schedule and hand both intents to
//!   their collaborators.
//!
//! # Invariants
//! - OCR failure degrades to empty text, never to a pipeline error.
//! - Validation/parse failures dispatch nothing.
//! - Calendar and notification deliveries are attempted independently.
//! - Logs carry metadata only, never recognized text or field values.

use crate::extract::field_extractor::extract;
use crate::model::intent::ScheduledEvent;
use crate::model::record::{CandidateRecord, EventDraft};
use crate::ports::{
    CalendarService, ExternalServiceError, NotificationService, OcrService, ServiceResult,
};
use crate::schedule::clock::Clock;
use crate::schedule::error::{ScheduleError, ScheduleResultOf};
use crate::schedule::scheduler::EventScheduler;
use log::{info, warn};
use std::sync::Arc;
use uuid::Uuid;

const MAP_SEARCH_BASE_URL: &str = "https://www.google.com/maps?q=";

/// Output of one scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOutcome {
    /// Correlation id for log lines of this scan.
    pub scan_id: Uuid,
    /// Recognized text; empty when OCR failed.
    pub raw_text: String,
    pub candidate: CandidateRecord,
    /// Set when OCR failed and the scan degraded to empty text.
    pub ocr_error: Option<ExternalServiceError>,
}

/// Schedule plus per-collaborator delivery results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    pub scheduled: ScheduledEvent,
    /// Calendar entry id on success.
    pub calendar: ServiceResult<String>,
    /// Notification id on success.
    pub notification: ServiceResult<String>,
}

impl DispatchReport {
    pub fn is_fully_delivered(&self) -> bool {
        self.calendar.is_ok() && self.notification.is_ok()
    }
}

/// Pipeline facade over the scheduler and external collaborators.
pub struct EventPipeline {
    scheduler: EventScheduler,
    ocr: Arc<dyn OcrService>,
    calendar: Arc<dyn CalendarService>,
    notifications: Arc<dyn NotificationService>,
    clock: Arc<dyn Clock>,
}

impl EventPipeline {
    pub fn new(
        scheduler: EventScheduler,
        ocr: Arc<dyn OcrService>,
        calendar: Arc<dyn CalendarService>,
        notifications: Arc<dyn NotificationService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            scheduler,
            ocr,
            calendar,
            notifications,
            clock,
        }
    }

    pub fn scheduler(&self) -> &EventScheduler {
        &self.scheduler
    }

    /// Recognizes `image` and extracts a candidate record.
    pub fn scan(&self, image: &[u8]) -> ScanOutcome {
        let scan_id = Uuid::new_v4();
        let (raw_text, ocr_error) = match self.ocr.recognize(image) {
            Ok(text) => (text, None),
            Err(err) => {
                warn!(
                    "event=ocr_failed module=pipeline status=degraded scan_id={} code={} retryable={}",
                    scan_id, err.code, err.retryable
                );
                (String::new(), Some(err))
            }
        };

        let candidate = extract(&raw_text);
        let missing = candidate.missing_fields();
        info!(
            "event=scan_complete module=pipeline status=ok scan_id={} image_bytes={} text_chars={} missing_fields={}",
            scan_id,
            image.len(),
            raw_text.chars().count(),
            missing.len()
        );

        ScanOutcome {
            scan_id,
            raw_text,
            candidate,
            ocr_error,
        }
    }

    /// Validates `draft`, schedules it against the injected clock and delivers
    /// both intents.
    ///
    /// # Errors
    /// - `ScheduleError::Validation` / `ScheduleError::Parse`; nothing is
    ///   dispatched in either case.
    pub fn confirm_and_dispatch(&self, draft: &EventDraft) -> ScheduleResultOf<DispatchReport> {
        let now = self.clock.now();
        let scheduled = self
            .scheduler
            .schedule_draft(draft, now)
            .inspect_err(log_rejection)?;

        let calendar = self.calendar.create_event(&scheduled.calendar);
        log_delivery("calendar", &calendar);
        let notification = self.notifications.schedule(&scheduled.notification);
        log_delivery("notification", &notification);

        info!(
            "event=dispatch_complete module=pipeline status={} reminder_delay_secs={}",
            if calendar.is_ok() && notification.is_ok() {
                "ok"
            } else {
                "partial"
            },
            scheduled.notification.fire_delay_secs()
        );

        Ok(DispatchReport {
            scheduled,
            calendar,
            notification,
        })
    }
}

/// Map search link for a location string.
pub fn location_map_url(location: &str) -> String {
    format!(
        "{MAP_SEARCH_BASE_URL}{}",
        urlencoding::encode(location.trim())
    )
}

fn log_rejection(err: &ScheduleError) {
    let kind = match err {
        ScheduleError::Validation(_) => "validation",
        ScheduleError::Parse(_) => "parse",
    };
    warn!("event=schedule_rejected module=pipeline status=error kind={kind}");
}

fn log_delivery(target: &str, result: &ServiceResult<String>) {
    match result {
        Ok(_) => info!("event=intent_delivered module=pipeline status=ok target={target}"),
        Err(err) => warn!(
            "event=intent_failed module=pipeline status=error target={target} code={} retryable={}",
            err.code, err.retryable
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::location_map_url;

    #[test]
    fn map_url_encodes_location() {
        assert_eq!(
            location_map_url(" Room 4, Main St & 5th "),
            "https://www.google.com/maps?q=Room%204%2C%20Main%20St%20%26%205th"
        );
    }
}
