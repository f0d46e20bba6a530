//! Core record types for clinicbook.
//!
//! This module defines the three records held by the store (patients,
//! doctors and appointments) and the text codec for appointment times.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Identifier type shared by all record collections.
pub type RecordId = u64;

/// `chrono` pattern for the `yyyy-MM-dd HH:mm` appointment time format.
pub const APPOINTMENT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Which collection a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// A registered patient.
    Patient,
    /// A doctor on staff.
    Doctor,
    /// A scheduled appointment.
    Appointment,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Patient => write!(f, "patient"),
            Self::Doctor => write!(f, "doctor"),
            Self::Appointment => write!(f, "appointment"),
        }
    }
}

/// A registered patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    /// Identifier assigned by the store.
    pub id: RecordId,
    /// Full name.
    pub name: String,
    /// Contact phone number, stored as typed.
    pub phone: String,
    /// Age in years, stored as typed.
    pub age: i32,
}

impl fmt::Display for Patient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Patient ID: {}, Name: {}, Age: {}, Phone: {}",
            self.id, self.name, self.age, self.phone
        )
    }
}

/// A doctor that appointments can be booked with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    /// Identifier assigned by the store.
    pub id: RecordId,
    /// Full name.
    pub name: String,
    /// Medical specialization, free text.
    pub specialization: String,
}

impl fmt::Display for Doctor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Doctor ID: {}, Name: {}, Specialization: {}",
            self.id, self.name, self.specialization
        )
    }
}

/// A booked appointment between a patient and a doctor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    /// Identifier assigned by the store.
    pub id: RecordId,
    /// The patient attending.
    pub patient_id: RecordId,
    /// The doctor seeing the patient.
    pub doctor_id: RecordId,
    /// When the appointment takes place, to the minute.
    pub at: NaiveDateTime,
}

impl Appointment {
    /// Check whether this appointment occupies the given doctor's slot.
    #[must_use]
    pub fn occupies(&self, doctor_id: RecordId, at: NaiveDateTime) -> bool {
        self.doctor_id == doctor_id && self.at == at
    }
}

impl fmt::Display for Appointment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Appointment ID: {}, Patient ID: {}, Doctor ID: {}, Date: {}",
            self.id,
            self.patient_id,
            self.doctor_id,
            format_appointment_time(self.at)
        )
    }
}

/// Parse an appointment time typed as `yyyy-MM-dd HH:mm`.
///
/// Surrounding whitespace is ignored. Every field must be zero-padded to its
/// full width, so `2024-6-1 9:30` and a signed or two-digit year are refused.
///
/// # Errors
///
/// Returns [`Error::InvalidFormat`] if the text does not match the pattern
/// or names a date or time that does not exist.
pub fn parse_appointment_time(input: &str) -> Result<NaiveDateTime> {
    let input = input.trim();
    match NaiveDateTime::parse_from_str(input, APPOINTMENT_TIME_FORMAT) {
        // chrono accepts short or signed fields; only the canonical text passes
        Ok(at) if format_appointment_time(at) == input => Ok(at),
        _ => Err(Error::invalid_format(input)),
    }
}

/// Format an appointment time as `yyyy-MM-dd HH:mm`.
#[must_use]
pub fn format_appointment_time(at: NaiveDateTime) -> String {
    at.format(APPOINTMENT_TIME_FORMAT).to_string()
}
