//! Interactive console for clinicbook.
//!
//! The console prints a numbered menu, reads one line per prompt, and runs
//! the selected action against its [`RecordStore`]. Mistakes in what the
//! user typed abort only the current action; the loop then shows the menu
//! again. Reading or writing the console streams failing ends the session.
//!
//! The console is generic over its input and output so sessions can be
//! scripted:
//!
//! ```
//! use std::io::Cursor;
//! use clinicbook::{Console, RecordStore};
//!
//! let input = Cursor::new("2\nDr. Chen\nCardiology\n0\n");
//! let mut console = Console::new(input, Vec::new(), RecordStore::new());
//! console.run().unwrap();
//! assert_eq!(console.store().list_doctors()[0].id, 201);
//! ```

mod menu;

use std::io::{BufRead, Write};

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::records::{parse_appointment_time, RecordKind};
use crate::schedule::{appointment_summaries, schedule};
use crate::store::RecordStore;

pub use menu::{parse_number, MenuChoice, CHOICE_FIELD};

/// Field name used when the age is not a number.
pub const AGE_FIELD: &str = "age";

/// Field name used when a patient ID is not a number.
pub const PATIENT_ID_FIELD: &str = "patient ID";

/// Field name used when a doctor ID is not a number.
pub const DOCTOR_ID_FIELD: &str = "doctor ID";

/// Title used when none is configured.
pub const DEFAULT_CLINIC_NAME: &str = "Healthcare Appointment System";

const SAMPLE_DATA_BANNER: &str = "--- Initial Sample Data Loaded ---";

/// Whether the menu loop should keep going after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Exit,
}

/// A menu-driven session over a record store.
#[derive(Debug)]
pub struct Console<R, W> {
    input: R,
    output: W,
    store: RecordStore,
    clinic_name: String,
    banner: Option<&'static str>,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// Create a console over `store` with the default title.
    pub fn new(input: R, output: W, store: RecordStore) -> Self {
        Self {
            input,
            output,
            store,
            clinic_name: DEFAULT_CLINIC_NAME.to_string(),
            banner: None,
        }
    }

    /// Create a console with a fresh store set up from `config`.
    ///
    /// Seeds the sample records when `console.sample_data` is set.
    pub fn from_config(config: &Config, input: R, output: W) -> Self {
        let mut store = RecordStore::with_sequences(config.id_sequences());
        let banner = if config.console.sample_data {
            store.seed_sample_data();
            Some(SAMPLE_DATA_BANNER)
        } else {
            None
        };

        Self {
            banner,
            ..Self::new(input, output, store).with_clinic_name(&config.console.clinic_name)
        }
    }

    /// Set the title printed above the menu.
    #[must_use]
    pub fn with_clinic_name(mut self, name: impl Into<String>) -> Self {
        self.clinic_name = name.into();
        self
    }

    /// The records held by this session.
    #[must_use]
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Consume the console, returning its output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the menu loop until the user exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    pub fn run(&mut self) -> Result<()> {
        info!("Session started");
        if let Some(banner) = self.banner {
            writeln!(self.output, "{banner}")?;
        }

        loop {
            self.print_menu()?;
            let Some(line) = self.read_line()? else {
                debug!("Input closed at menu");
                break;
            };

            let step = match MenuChoice::parse(&line) {
                Ok(Some(choice)) => self.dispatch(choice),
                Ok(None) => {
                    writeln!(self.output, "**Invalid choice. Please try again.**")?;
                    Ok(Step::Continue)
                }
                Err(err) => Err(err),
            };

            match step {
                Ok(Step::Continue) => {}
                Ok(Step::Exit) => break,
                Err(err) if err.is_user_error() => self.report(&err)?,
                Err(err) => return Err(err),
            }
        }

        writeln!(self.output, "Exiting system. Goodbye!")?;
        let stats = self.store.stats();
        info!(
            "Session ended with {} patients, {} doctors, {} appointments",
            stats.patients, stats.doctors, stats.appointments
        );
        Ok(())
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<Step> {
        debug!("Menu choice: {:?}", choice);
        match choice {
            MenuChoice::RegisterPatient => self.register_patient(),
            MenuChoice::AddDoctor => self.add_doctor(),
            MenuChoice::ScheduleAppointment => self.schedule_appointment(),
            MenuChoice::ViewAppointments => self.view_appointments().map(|()| Step::Continue),
            MenuChoice::ViewPatients => self.view_patients().map(|()| Step::Continue),
            MenuChoice::Exit => Ok(Step::Exit),
        }
    }

    fn register_patient(&mut self) -> Result<Step> {
        writeln!(self.output, "\n--- Register New Patient ---")?;
        let Some(name) = self.prompt("Enter Name: ")? else {
            return Ok(Step::Exit);
        };
        let Some(phone) = self.prompt("Enter Phone: ")? else {
            return Ok(Step::Exit);
        };
        let Some(age) = self.prompt("Enter Age: ")? else {
            return Ok(Step::Exit);
        };
        let age = parse_number(AGE_FIELD, &age)?;

        let patient = self.store.add_patient(name, phone, age);
        writeln!(self.output, "SUCCESS: Patient registered. {patient}")?;
        Ok(Step::Continue)
    }

    fn add_doctor(&mut self) -> Result<Step> {
        writeln!(self.output, "\n--- Add New Doctor ---")?;
        let Some(name) = self.prompt("Enter Name: ")? else {
            return Ok(Step::Exit);
        };
        let Some(specialization) = self.prompt("Enter Specialization: ")? else {
            return Ok(Step::Exit);
        };

        let doctor = self.store.add_doctor(name, specialization);
        writeln!(self.output, "SUCCESS: Doctor added. {doctor}")?;
        Ok(Step::Continue)
    }

    fn schedule_appointment(&mut self) -> Result<Step> {
        writeln!(self.output, "\n--- Schedule Appointment ---")?;
        if self.store.list_patients().is_empty() || self.store.list_doctors().is_empty() {
            writeln!(
                self.output,
                "**Cannot schedule: No patients or doctors registered.**"
            )?;
            return Ok(Step::Continue);
        }

        self.view_patients()?;
        let Some(patient_id) = self.prompt("Enter Patient ID for appointment: ")? else {
            return Ok(Step::Exit);
        };
        let patient_id = parse_number(PATIENT_ID_FIELD, &patient_id)?;
        if self.store.find_patient(patient_id).is_none() {
            return Err(Error::not_found(RecordKind::Patient, patient_id));
        }

        self.view_doctors()?;
        let Some(doctor_id) = self.prompt("Enter Doctor ID for appointment: ")? else {
            return Ok(Step::Exit);
        };
        let doctor_id = parse_number(DOCTOR_ID_FIELD, &doctor_id)?;
        if self.store.find_doctor(doctor_id).is_none() {
            return Err(Error::not_found(RecordKind::Doctor, doctor_id));
        }

        let Some(at) = self.prompt("Enter Appointment Date/Time (format YYYY-MM-DD HH:MM): ")?
        else {
            return Ok(Step::Exit);
        };
        let at = parse_appointment_time(&at)?;

        let appointment = schedule(&mut self.store, patient_id, doctor_id, at)?;
        writeln!(self.output, "SUCCESS: Appointment scheduled. {appointment}")?;
        Ok(Step::Continue)
    }

    fn view_appointments(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- All Scheduled Appointments ---")?;
        let summaries = appointment_summaries(&self.store);
        if summaries.is_empty() {
            writeln!(self.output, "No appointments scheduled yet.")?;
        }
        for summary in summaries {
            writeln!(self.output, "{summary}")?;
        }
        Ok(())
    }

    fn view_patients(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- All Registered Patients ---")?;
        let patients = self.store.list_patients();
        if patients.is_empty() {
            writeln!(self.output, "No patients registered.")?;
        }
        for patient in patients {
            writeln!(self.output, "{patient}")?;
        }
        Ok(())
    }

    fn view_doctors(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- All Registered Doctors ---")?;
        let doctors = self.store.list_doctors();
        if doctors.is_empty() {
            writeln!(self.output, "No doctors registered.")?;
        }
        for doctor in doctors {
            writeln!(self.output, "{doctor}")?;
        }
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output, "\n--- {} ---", self.clinic_name)?;
        for choice in MenuChoice::ALL {
            writeln!(self.output, "{choice}")?;
        }
        write!(self.output, "Enter choice: ")?;
        self.output.flush()?;
        Ok(())
    }

    fn report(&mut self, err: &Error) -> Result<()> {
        debug!("Action aborted: {}", err);
        writeln!(self.output, "**{}**", user_message(err))?;
        Ok(())
    }

    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        self.read_line()
    }

    /// Read one line without its terminator, or `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }
}

/// The text shown to the user when an action is aborted.
fn user_message(err: &Error) -> String {
    match err {
        Error::InvalidInput { field, .. } if *field == CHOICE_FIELD => {
            "Invalid input. Please enter a number.".to_string()
        }
        Error::InvalidInput { field, .. } if *field == AGE_FIELD => {
            "Invalid age entered. Registration failed.".to_string()
        }
        Error::InvalidInput { field, input } => {
            format!("Invalid {field} '{input}'. Please enter a number.")
        }
        Error::NotFound { kind, .. } => match kind {
            RecordKind::Patient => "Error: Patient ID not found.".to_string(),
            RecordKind::Doctor => "Error: Doctor ID not found.".to_string(),
            RecordKind::Appointment => "Error: Appointment ID not found.".to_string(),
        },
        Error::InvalidFormat { .. } => {
            "Invalid date/time format. Scheduling failed. Use YYYY-MM-DD HH:MM.".to_string()
        }
        Error::Conflict { .. } => "ERROR: Doctor is already booked at this time.".to_string(),
        other => other.to_string(),
    }
}
