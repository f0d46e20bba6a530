//! `clinicbook` - An in-memory appointment book for a small clinic
//!
//! This library provides the record store for patients, doctors and
//! appointments, the scheduling rules that guard doctor double-booking, and
//! the interactive console that drives them.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod console;
pub mod error;
pub mod logging;
pub mod records;
pub mod schedule;
pub mod store;

pub use config::Config;
pub use console::Console;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use records::{Appointment, Doctor, Patient, RecordId, RecordKind};
pub use schedule::{appointment_summaries, schedule, AppointmentSummary};
pub use store::{IdSequences, RecordStore, StoreStats};
