//! Date/time normalization and reminder arithmetic.
//!
//! # Responsibility
//! - Combine confirmed date and time text into an absolute instant.
//! - Derive the calendar span and the reminder trigger from that instant.
//!
//! # Invariants
//! - Scheduling is a pure function of (record, now, config).
//! - Wall-clock interpretation is always explicit (`TimeZonePolicy`).
//! - Reminder delays are clamped to zero, never negative.

pub mod clock;
pub mod error;
pub mod scheduler;
pub mod time_zone;
