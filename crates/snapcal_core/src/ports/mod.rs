//! External collaborator contracts.
//!
//! # Responsibility
//! - Describe the OCR, calendar and notification services the pipeline talks to.
//! - Carry collaborator failures as a uniform error envelope.
//!
//! # Invariants
//! - Core never retries a collaborator call.
//! - Implementations own timeouts and transport concerns.

use crate::model::intent::{CalendarIntent, NotificationIntent};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type for collaborator calls.
pub type ServiceResult<T> = Result<T, ExternalServiceError>;

/// Which collaborator raised an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    Ocr,
    Calendar,
    Notification,
}

impl ServiceKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Ocr => "ocr",
            Self::Calendar => "calendar",
            Self::Notification => "notification",
        }
    }
}

/// Collaborator failure envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalServiceError {
    pub service: ServiceKind,
    /// Stable machine-readable code, e.g. `permission_denied`.
    pub code: String,
    /// Human-readable detail.
    pub message: String,
    /// Whether the caller may reasonably retry.
    pub retryable: bool,
}

impl ExternalServiceError {
    pub fn new(
        service: ServiceKind,
        code: impl Into<String>,
        message: impl Into<String>,
        retryable: bool,
    ) -> Self {
        Self {
            service,
            code: code.into(),
            message: message.into(),
            retryable,
        }
    }
}

impl Display for ExternalServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} service error [{}]: {}",
            self.service.label(),
            self.code,
            self.message
        )
    }
}

impl Error for ExternalServiceError {}

/// Text recognition over a captured image.
pub trait OcrService: Send + Sync {
    /// Returns the full recognized text of `image`.
    fn recognize(&self, image: &[u8]) -> ServiceResult<String>;
}

/// Calendar backend that accepts new entries.
pub trait CalendarService: Send + Sync {
    /// Creates one entry and returns its backend id.
    fn create_event(&self, intent: &CalendarIntent) -> ServiceResult<String>;
}

/// Local or push notification backend.
pub trait NotificationService: Send + Sync {
    /// Schedules one reminder and returns its backend id.
    fn schedule(&self, intent: &NotificationIntent) -> ServiceResult<String>;
}

#[cfg(test)]
mod tests {
    use super::{ExternalServiceError, ServiceKind};

    #[test]
    fn display_includes_service_and_code() {
        let err = ExternalServiceError::new(
            ServiceKind::Calendar,
            "permission_denied",
            "Calendar access has been denied.",
            false,
        );
        assert_eq!(
            err.to_string(),
            "calendar service error [permission_denied]: Calendar access has been denied."
        );
    }
}
