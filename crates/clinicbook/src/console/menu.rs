//! Menu entries and numeric input parsing.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Field name used when the menu selection is not a number.
pub const CHOICE_FIELD: &str = "choice";

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Register a new patient.
    RegisterPatient,
    /// Add a new doctor.
    AddDoctor,
    /// Book an appointment.
    ScheduleAppointment,
    /// List every appointment.
    ViewAppointments,
    /// List every patient.
    ViewPatients,
    /// Leave the menu loop.
    Exit,
}

impl MenuChoice {
    /// Entries in the order they are printed.
    pub const ALL: [Self; 6] = [
        Self::RegisterPatient,
        Self::AddDoctor,
        Self::ScheduleAppointment,
        Self::ViewAppointments,
        Self::ViewPatients,
        Self::Exit,
    ];

    /// The number typed to select this entry.
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Self::Exit => 0,
            Self::RegisterPatient => 1,
            Self::AddDoctor => 2,
            Self::ScheduleAppointment => 3,
            Self::ViewAppointments => 4,
            Self::ViewPatients => 5,
        }
    }

    /// Look up the entry for a typed number.
    #[must_use]
    pub fn from_number(number: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|c| i64::from(c.number()) == number)
    }

    /// Parse a menu line.
    ///
    /// Returns `Ok(None)` for a number that is not on the menu.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the line is not a number.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        parse_number::<i64>(CHOICE_FIELD, line).map(Self::from_number)
    }
}

impl fmt::Display for MenuChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::RegisterPatient => "Register Patient",
            Self::AddDoctor => "Add Doctor",
            Self::ScheduleAppointment => "Schedule Appointment",
            Self::ViewAppointments => "View All Appointments",
            Self::ViewPatients => "View All Patients",
            Self::Exit => "Exit",
        };
        write!(f, "{}. {label}", self.number())
    }
}

/// Parse a whole number typed at a prompt.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] naming `field` if `input` is not a number
/// of type `T`.
pub fn parse_number<T: FromStr>(field: &'static str, input: &str) -> Result<T> {
    input
        .trim()
        .parse()
        .map_err(|_| Error::invalid_input(field, input.trim()))
}
