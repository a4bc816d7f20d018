use serde::{Deserialize, Serialize};
use std::fmt;

use super::Station;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

/// One entry on the status queue between the worker and the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub severity: Severity,
    pub text: String,
}

impl StatusMessage {
    pub fn new(severity: Severity, text: impl Into<String>) -> Self {
        Self {
            severity,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(Severity::Info, text)
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self::new(Severity::Success, text)
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self::new(Severity::Warning, text)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(Severity::Error, text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDetails {
    pub departure: Station,
    pub arrival: Station,
    pub departure_time: String,
}

impl fmt::Display for BookingDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "예약 성공!\n출발역: {}\n도착역: {}\n출발 시간: {}",
            self.departure, self.arrival, self.departure_time
        )
    }
}

/// Result of a single reservation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    Booked(BookingDetails),
    /// The first train's button is there but does not offer a booking.
    Unavailable { label: String },
    Failed { reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AttemptProgress {
    pub attempt: u32,
    pub max_attempts: u32,
}

impl AttemptProgress {
    pub fn new(attempt: u32, max_attempts: u32) -> Self {
        Self {
            attempt,
            max_attempts,
        }
    }

    pub fn ratio(&self) -> f64 {
        if self.max_attempts == 0 {
            return 1.0;
        }
        (self.attempt as f64 / self.max_attempts as f64).min(1.0)
    }
}

impl fmt::Display for AttemptProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "현재 {}번째 시도 중... (최대 {}회)",
            self.attempt, self.max_attempts
        )
    }
}
