//! Error types for clinicbook.
//!
//! This module defines the error type shared by the record store, the
//! scheduling logic and the console, along with the configuration and I/O
//! failures that can surface at start-up.

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::records::{RecordId, RecordKind, APPOINTMENT_TIME_FORMAT};

/// The main error type for clinicbook operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Input Errors ===
    /// A value typed at the console could not be read as a number.
    #[error("invalid {field}: '{input}' is not a number")]
    InvalidInput {
        /// Which prompt the value was entered at.
        field: &'static str,
        /// The raw text entered.
        input: String,
    },

    /// A date-time string did not match `yyyy-MM-dd HH:mm`.
    #[error("invalid date/time '{input}', expected format YYYY-MM-DD HH:MM")]
    InvalidFormat {
        /// The raw text entered.
        input: String,
    },

    // === Scheduling Errors ===
    /// A referenced record does not exist.
    #[error("{kind} ID {id} not found")]
    NotFound {
        /// Which collection was searched.
        kind: RecordKind,
        /// The identifier that was looked up.
        id: RecordId,
    },

    /// The doctor already has an appointment at the requested date-time.
    #[error("doctor {doctor_id} is already booked at {}", .at.format(APPOINTMENT_TIME_FORMAT))]
    Conflict {
        /// The double-booked doctor.
        doctor_id: RecordId,
        /// The contested date-time.
        at: NaiveDateTime,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// Reading from or writing to the console failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Serialization Errors ===
    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for clinicbook operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create an invalid numeric input error.
    #[must_use]
    pub fn invalid_input(field: &'static str, input: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            input: input.into(),
        }
    }

    /// Create an invalid date-time format error.
    #[must_use]
    pub fn invalid_format(input: impl Into<String>) -> Self {
        Self::InvalidFormat {
            input: input.into(),
        }
    }

    /// Create a not-found error for the given collection.
    #[must_use]
    pub fn not_found(kind: RecordKind, id: RecordId) -> Self {
        Self::NotFound { kind, id }
    }

    /// Check if this error is a missing record.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this error is a doctor double-booking.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }

    /// Check if this error was caused by what the user typed.
    ///
    /// These abort a single console action; anything else ends the session.
    #[must_use]
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. }
                | Self::InvalidFormat { .. }
                | Self::NotFound { .. }
                | Self::Conflict { .. }
        )
    }
}
