//! Domain model for scanned event records and their scheduling outputs.
//!
//! # Responsibility
//! - Define the candidate/draft/confirmed record shapes exchanged with callers.
//! - Define the read-only schedule result and the two outbound intents.
//!
//! # Invariants
//! - A missing field is data (`FieldValue::Missing`), never an error.
//! - A `ConfirmedRecord` can only exist with every field non-blank.
//! - `ScheduleResult::end_instant > start_instant` and
//!   `reminder_fire_instant <= start_instant`.

pub mod intent;
pub mod record;
