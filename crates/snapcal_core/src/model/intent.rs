//! Schedule result and outbound scheduling intents.
//!
//! Intents are plain requests; delivering them belongs to external
//! collaborators (see `crate::ports`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Derived, read-only timing for one confirmed event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub start_instant: DateTime<Utc>,
    /// Always `start_instant` plus the fixed event duration.
    pub end_instant: DateTime<Utc>,
    /// Never later than `start_instant`; equals `now` when the delay was clamped
    /// before the start. For an event already past, this is `start_instant`,
    /// earlier than the actual fire moment (`now`, with a zero delay).
    pub reminder_fire_instant: DateTime<Utc>,
}

/// Request to create a calendar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarIntent {
    pub title: String,
    pub start_instant: DateTime<Utc>,
    pub end_instant: DateTime<Utc>,
    pub location: String,
    pub notes: String,
}

/// Request to schedule a one-shot reminder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationIntent {
    pub title: String,
    pub body: String,
    /// Delay relative to the `now` used for scheduling. Zero means fire at once.
    pub fire_delay: Duration,
}

impl NotificationIntent {
    /// Delay in whole seconds, as expected by one-shot trigger APIs.
    pub fn fire_delay_secs(&self) -> u64 {
        self.fire_delay.as_secs()
    }
}

/// Full output of one scheduling call. Either all parts exist or none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    pub result: ScheduleResult,
    pub calendar: CalendarIntent,
    pub notification: NotificationIntent,
}
