//! Appointment scheduling.
//!
//! Booking checks that both parties exist and that the doctor is free at
//! the requested minute. Overlapping durations, patient double-booking and
//! past dates are not considered.

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::records::{format_appointment_time, Appointment, RecordId, RecordKind};
use crate::store::RecordStore;

/// Placeholder shown when an appointment references an unknown record.
const UNKNOWN_NAME: &str = "N/A";

/// Book an appointment for `patient_id` with `doctor_id` at `at`.
///
/// Checks run in order: the patient must exist, then the doctor, then the
/// doctor must not already have an appointment at exactly `at`. The store
/// is only modified when every check passes.
///
/// # Errors
///
/// Returns [`Error::NotFound`] for an unknown patient or doctor, or
/// [`Error::Conflict`] if the doctor is already booked at that time.
pub fn schedule(
    store: &mut RecordStore,
    patient_id: RecordId,
    doctor_id: RecordId,
    at: NaiveDateTime,
) -> Result<Appointment> {
    if store.find_patient(patient_id).is_none() {
        warn!("Rejected booking: unknown patient {}", patient_id);
        return Err(Error::not_found(RecordKind::Patient, patient_id));
    }
    if store.find_doctor(doctor_id).is_none() {
        warn!("Rejected booking: unknown doctor {}", doctor_id);
        return Err(Error::not_found(RecordKind::Doctor, doctor_id));
    }
    if is_doctor_booked(store, doctor_id, at) {
        warn!(
            "Rejected booking: doctor {} already booked at {}",
            doctor_id,
            format_appointment_time(at)
        );
        return Err(Error::Conflict { doctor_id, at });
    }

    let appointment = store.insert_appointment(patient_id, doctor_id, at);
    debug!(
        "Scheduled appointment {} for patient {} with doctor {}",
        appointment.id, patient_id, doctor_id
    );
    Ok(appointment)
}

/// Check whether `doctor_id` already has an appointment at exactly `at`.
#[must_use]
pub fn is_doctor_booked(store: &RecordStore, doctor_id: RecordId, at: NaiveDateTime) -> bool {
    store
        .list_appointments()
        .iter()
        .any(|a| a.occupies(doctor_id, at))
}

/// An appointment with the patient and doctor names resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppointmentSummary {
    /// The underlying appointment.
    pub appointment: Appointment,
    /// Patient name, or `N/A` if the patient cannot be found.
    pub patient_name: String,
    /// Doctor name, or `N/A` if the doctor cannot be found.
    pub doctor_name: String,
}

impl std::fmt::Display for AppointmentSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | Date: {} | Patient: {} (ID:{}) | Doctor: {} (ID:{})",
            self.appointment.id,
            format_appointment_time(self.appointment.at),
            self.patient_name,
            self.appointment.patient_id,
            self.doctor_name,
            self.appointment.doctor_id
        )
    }
}

/// Summarize every appointment in scheduling order.
#[must_use]
pub fn appointment_summaries(store: &RecordStore) -> Vec<AppointmentSummary> {
    store
        .list_appointments()
        .iter()
        .map(|appointment| AppointmentSummary {
            patient_name: store
                .find_patient(appointment.patient_id)
                .map_or_else(|| UNKNOWN_NAME.to_string(), |p| p.name.clone()),
            doctor_name: store
                .find_doctor(appointment.doctor_id)
                .map_or_else(|| UNKNOWN_NAME.to_string(), |d| d.name.clone()),
            appointment: appointment.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::parse_appointment_time;

    fn when(text: &str) -> NaiveDateTime {
        parse_appointment_time(text).unwrap()
    }

    fn create_test_store() -> RecordStore {
        let mut store = RecordStore::new();
        store.add_patient("Alice Smith", "555-1234", 30);
        store.add_patient("Bob Johnson", "555-5678", 55);
        store.add_doctor("Dr. Chen", "Cardiology");
        store.add_doctor("Dr. Garcia", "Pediatrics");
        store
    }

    #[test]
    fn test_schedule_success() {
        let mut store = create_test_store();
        let appointment = schedule(&mut store, 101, 201, when("2024-06-01 09:30")).unwrap();

        assert_eq!(appointment.id, 301);
        assert_eq!(appointment.patient_id, 101);
        assert_eq!(appointment.doctor_id, 201);
        assert_eq!(store.list_appointments(), [appointment]);
    }

    #[test]
    fn test_schedule_sequential_ids() {
        let mut store = create_test_store();
        let times = ["2024-06-01 09:00", "2024-06-01 10:00", "2024-06-01 11:00"];
        for (n, time) in (1..).zip(times) {
            let appointment = schedule(&mut store, 101, 201, when(time)).unwrap();
            assert_eq!(appointment.id, 300 + n);
        }
    }

    #[test]
    fn test_schedule_unknown_patient() {
        let mut store = create_test_store();
        let err = schedule(&mut store, 999, 201, when("2024-06-01 09:30")).unwrap_err();

        assert!(matches!(
            err,
            Error::NotFound {
                kind: RecordKind::Patient,
                id: 999
            }
        ));
        assert!(store.list_appointments().is_empty());
    }

    #[test]
    fn test_schedule_unknown_doctor() {
        let mut store = create_test_store();
        let err = schedule(&mut store, 101, 999, when("2024-06-01 09:30")).unwrap_err();

        assert!(matches!(
            err,
            Error::NotFound {
                kind: RecordKind::Doctor,
                id: 999
            }
        ));
        assert!(store.list_appointments().is_empty());
    }

    #[test]
    fn test_schedule_checks_patient_before_doctor() {
        let mut store = create_test_store();
        let err = schedule(&mut store, 999, 998, when("2024-06-01 09:30")).unwrap_err();
        assert!(matches!(
            err,
            Error::NotFound {
                kind: RecordKind::Patient,
                ..
            }
        ));
    }

    #[test]
    fn test_schedule_conflict() {
        let mut store = create_test_store();
        schedule(&mut store, 101, 201, when("2024-06-01 09:30")).unwrap();

        let err = schedule(&mut store, 101, 201, when("2024-06-01 09:30")).unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(store.list_appointments().len(), 1);
    }

    #[test]
    fn test_schedule_conflict_ignores_patient() {
        let mut store = create_test_store();
        schedule(&mut store, 101, 201, when("2024-06-01 09:30")).unwrap();

        let err = schedule(&mut store, 102, 201, when("2024-06-01 09:30")).unwrap_err();
        assert!(err.is_conflict());
    }

    #[test]
    fn test_schedule_failed_conflict_does_not_consume_id() {
        let mut store = create_test_store();
        schedule(&mut store, 101, 201, when("2024-06-01 09:30")).unwrap();
        assert!(schedule(&mut store, 101, 201, when("2024-06-01 09:30")).is_err());

        let next = schedule(&mut store, 101, 201, when("2024-06-01 10:30")).unwrap();
        assert_eq!(next.id, 302);
    }

    #[test]
    fn test_schedule_same_doctor_different_time() {
        let mut store = create_test_store();
        schedule(&mut store, 101, 201, when("2024-06-01 09:30")).unwrap();
        assert!(schedule(&mut store, 102, 201, when("2024-06-01 09:31")).is_ok());
    }

    #[test]
    fn test_schedule_different_doctor_same_time() {
        let mut store = create_test_store();
        schedule(&mut store, 101, 201, when("2024-06-01 09:30")).unwrap();
        assert!(schedule(&mut store, 101, 202, when("2024-06-01 09:30")).is_ok());
    }

    #[test]
    fn test_schedule_patient_double_booking_allowed() {
        let mut store = create_test_store();
        schedule(&mut store, 101, 201, when("2024-06-01 09:30")).unwrap();
        schedule(&mut store, 101, 202, when("2024-06-01 09:30")).unwrap();
        assert_eq!(store.list_appointments().len(), 2);
    }

    #[test]
    fn test_schedule_past_date_allowed() {
        let mut store = create_test_store();
        assert!(schedule(&mut store, 101, 201, when("1999-01-01 00:00")).is_ok());
    }

    #[test]
    fn test_is_doctor_booked() {
        let mut store = create_test_store();
        assert!(!is_doctor_booked(&store, 201, when("2024-06-01 09:30")));

        schedule(&mut store, 101, 201, when("2024-06-01 09:30")).unwrap();
        assert!(is_doctor_booked(&store, 201, when("2024-06-01 09:30")));
        assert!(!is_doctor_booked(&store, 202, when("2024-06-01 09:30")));
    }

    #[test]
    fn test_appointment_summaries() {
        let mut store = create_test_store();
        schedule(&mut store, 101, 201, when("2024-06-01 09:30")).unwrap();

        let summaries = appointment_summaries(&store);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].patient_name, "Alice Smith");
        assert_eq!(summaries[0].doctor_name, "Dr. Chen");
        assert_eq!(
            summaries[0].to_string(),
            "301 | Date: 2024-06-01 09:30 | Patient: Alice Smith (ID:101) | Doctor: Dr. Chen (ID:201)"
        );
    }

    #[test]
    fn test_appointment_summaries_unknown_names() {
        let mut store = RecordStore::new();
        store.insert_appointment(101, 201, when("2024-06-01 09:30"));

        let summaries = appointment_summaries(&store);
        assert_eq!(summaries[0].patient_name, "N/A");
        assert_eq!(summaries[0].doctor_name, "N/A");
    }

    #[test]
    fn test_appointment_summaries_empty() {
        let store = create_test_store();
        assert!(appointment_summaries(&store).is_empty());
    }
}
