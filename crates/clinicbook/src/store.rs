//! In-memory record store for clinicbook.
//!
//! This module holds the patient, doctor and appointment collections for the
//! lifetime of the process, along with the identifier sequences that number
//! them.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::records::{Appointment, Doctor, Patient, RecordId};

/// First patient identifier handed out by default.
pub const DEFAULT_PATIENT_START: u32 = 101;

/// First doctor identifier handed out by default.
pub const DEFAULT_DOCTOR_START: u32 = 201;

/// First appointment identifier handed out by default.
pub const DEFAULT_APPOINTMENT_START: u32 = 301;

/// Starting identifiers for each collection.
///
/// Starts are 32-bit while identifiers are 64-bit, so a sequence can never
/// run out however high it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdSequences {
    /// First patient identifier.
    pub patient_start: u32,
    /// First doctor identifier.
    pub doctor_start: u32,
    /// First appointment identifier.
    pub appointment_start: u32,
}

impl Default for IdSequences {
    fn default() -> Self {
        Self {
            patient_start: DEFAULT_PATIENT_START,
            doctor_start: DEFAULT_DOCTOR_START,
            appointment_start: DEFAULT_APPOINTMENT_START,
        }
    }
}

/// A monotonically increasing identifier counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Sequence {
    next: RecordId,
}

impl Sequence {
    fn starting_at(start: u32) -> Self {
        Self {
            next: RecordId::from(start),
        }
    }

    fn allocate(&mut self) -> RecordId {
        let id = self.next;
        // A u32 start leaves more of u64 than any session can use
        self.next = self.next.saturating_add(1);
        id
    }
}

/// In-memory store for patients, doctors and appointments.
///
/// Records are kept in insertion order and never updated or removed, so
/// identifiers are never reused. Lookups are linear scans.
#[derive(Debug, Clone)]
pub struct RecordStore {
    patients: Vec<Patient>,
    doctors: Vec<Doctor>,
    appointments: Vec<Appointment>,
    next_patient: Sequence,
    next_doctor: Sequence,
    next_appointment: Sequence,
}

impl Default for RecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordStore {
    /// Create an empty store with the default identifier sequences.
    #[must_use]
    pub fn new() -> Self {
        Self::with_sequences(IdSequences::default())
    }

    /// Create an empty store whose identifiers start at the given values.
    #[must_use]
    pub fn with_sequences(sequences: IdSequences) -> Self {
        Self {
            patients: Vec::new(),
            doctors: Vec::new(),
            appointments: Vec::new(),
            next_patient: Sequence::starting_at(sequences.patient_start),
            next_doctor: Sequence::starting_at(sequences.doctor_start),
            next_appointment: Sequence::starting_at(sequences.appointment_start),
        }
    }

    /// Register the two sample patients and two sample doctors.
    pub fn seed_sample_data(&mut self) {
        self.add_patient("Alice Smith", "555-1234", 30);
        self.add_patient("Bob Johnson", "555-5678", 55);
        self.add_doctor("Dr. Chen", "Cardiology");
        self.add_doctor("Dr. Garcia", "Pediatrics");
        debug!("Seeded sample data");
    }

    /// Register a new patient and return the stored record.
    pub fn add_patient(
        &mut self,
        name: impl Into<String>,
        phone: impl Into<String>,
        age: i32,
    ) -> Patient {
        let patient = Patient {
            id: self.next_patient.allocate(),
            name: name.into(),
            phone: phone.into(),
            age,
        };
        debug!("Registered patient {}", patient.id);
        self.patients.push(patient.clone());
        patient
    }

    /// Add a new doctor and return the stored record.
    pub fn add_doctor(
        &mut self,
        name: impl Into<String>,
        specialization: impl Into<String>,
    ) -> Doctor {
        let doctor = Doctor {
            id: self.next_doctor.allocate(),
            name: name.into(),
            specialization: specialization.into(),
        };
        debug!("Added doctor {}", doctor.id);
        self.doctors.push(doctor.clone());
        doctor
    }

    /// Append an appointment without any checks.
    ///
    /// Callers go through [`crate::schedule::schedule`], which validates the
    /// references and the doctor's slot first.
    pub(crate) fn insert_appointment(
        &mut self,
        patient_id: RecordId,
        doctor_id: RecordId,
        at: NaiveDateTime,
    ) -> Appointment {
        let appointment = Appointment {
            id: self.next_appointment.allocate(),
            patient_id,
            doctor_id,
            at,
        };
        debug!(
            "Inserted appointment {} for doctor {}",
            appointment.id, doctor_id
        );
        self.appointments.push(appointment.clone());
        appointment
    }

    /// All patients in registration order.
    #[must_use]
    pub fn list_patients(&self) -> &[Patient] {
        &self.patients
    }

    /// All doctors in registration order.
    #[must_use]
    pub fn list_doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    /// All appointments in scheduling order.
    #[must_use]
    pub fn list_appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    /// Look up a patient by identifier.
    #[must_use]
    pub fn find_patient(&self, id: RecordId) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    /// Look up a doctor by identifier.
    #[must_use]
    pub fn find_doctor(&self, id: RecordId) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id == id)
    }

    /// Look up an appointment by identifier.
    #[must_use]
    pub fn find_appointment(&self, id: RecordId) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == id)
    }

    /// Get record counts.
    #[must_use]
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            patients: self.patients.len(),
            doctors: self.doctors.len(),
            appointments: self.appointments.len(),
        }
    }
}

/// Record counts for each collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    /// Number of registered patients.
    pub patients: usize,
    /// Number of registered doctors.
    pub doctors: usize,
    /// Number of scheduled appointments.
    pub appointments: usize,
}
