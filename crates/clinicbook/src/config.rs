//! Configuration management for clinicbook.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::console::DEFAULT_CLINIC_NAME;
use crate::error::{Error, Result};
use crate::store::{
    IdSequences, DEFAULT_APPOINTMENT_START, DEFAULT_DOCTOR_START, DEFAULT_PATIENT_START,
};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory under the user config dir holding our files.
const CONFIG_DIR_NAME: &str = "clinicbook";

/// Prefix for environment variable overrides.
const ENV_PREFIX: &str = "CLINICBOOK_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `CLINICBOOK_`, sections split by `__`)
/// 2. TOML config file at `~/.config/clinicbook/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Console configuration.
    pub console: ConsoleConfig,
    /// Identifier sequence configuration.
    pub identifiers: IdentifierConfig,
}

/// Console-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Title shown above the menu.
    pub clinic_name: String,
    /// Load two sample patients and two sample doctors at start-up.
    pub sample_data: bool,
}

/// Starting identifiers for each record collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentifierConfig {
    /// First patient identifier.
    pub patient_start: u32,
    /// First doctor identifier.
    pub doctor_start: u32,
    /// First appointment identifier.
    pub appointment_start: u32,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            clinic_name: DEFAULT_CLINIC_NAME.to_string(),
            sample_data: true,
        }
    }
}

impl Default for IdentifierConfig {
    fn default() -> Self {
        Self {
            patient_start: DEFAULT_PATIENT_START,
            doctor_start: DEFAULT_DOCTOR_START,
            appointment_start: DEFAULT_APPOINTMENT_START,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// A missing config file is not an error; defaults and environment
    /// variables still apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.console.clinic_name.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: "clinic_name must not be empty".to_string(),
            });
        }

        let starts = [
            ("patient_start", self.identifiers.patient_start),
            ("doctor_start", self.identifiers.doctor_start),
            ("appointment_start", self.identifiers.appointment_start),
        ];
        for (name, value) in starts {
            if value == 0 {
                return Err(Error::ConfigValidation {
                    message: format!("{name} must be greater than 0"),
                });
            }
        }

        Ok(())
    }

    /// Render the configuration as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Get the identifier sequences for a new record store.
    #[must_use]
    pub fn id_sequences(&self) -> IdSequences {
        IdSequences {
            patient_start: self.identifiers.patient_start,
            doctor_start: self.identifiers.doctor_start,
            appointment_start: self.identifiers.appointment_start,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.console.clinic_name, "Healthcare Appointment System");
        assert!(config.console.sample_data);
    }

    #[test]
    fn test_default_identifier_config() {
        let ids = IdentifierConfig::default();

        assert_eq!(ids.patient_start, 101);
        assert_eq!(ids.doctor_start, 201);
        assert_eq!(ids.appointment_start, 301);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_blank_clinic_name() {
        let mut config = Config::default();
        config.console.clinic_name = "   ".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("clinic_name"));
    }

    #[test]
    fn test_validate_zero_start() {
        let mut config = Config::default();
        config.identifiers.doctor_start = 0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("doctor_start"));
    }

    #[test]
    fn test_id_sequences() {
        let mut config = Config::default();
        config.identifiers.appointment_start = 9000;

        let sequences = config.id_sequences();
        assert_eq!(sequences.patient_start, 101);
        assert_eq!(sequences.doctor_start, 201);
        assert_eq!(sequences.appointment_start, 9000);
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("clinicbook"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        Jail::expect_with(|_jail| {
            let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_load_from_toml_file() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "clinic.toml",
                r#"
                [console]
                clinic_name = "Riverside Clinic"
                sample_data = false

                [identifiers]
                patient_start = 1
                "#,
            )?;

            let config = Config::load_from(Some(PathBuf::from("clinic.toml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config.console.clinic_name, "Riverside Clinic");
            assert!(!config.console.sample_data);
            assert_eq!(config.identifiers.patient_start, 1);
            assert_eq!(config.identifiers.doctor_start, 201);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("clinic.toml", "[console]\nsample_data = true\n")?;
            jail.set_env("CLINICBOOK_CONSOLE__SAMPLE_DATA", "false");
            jail.set_env("CLINICBOOK_IDENTIFIERS__DOCTOR_START", "500");

            let config = Config::load_from(Some(PathBuf::from("clinic.toml")))
                .map_err(|e| e.to_string())?;
            assert!(!config.console.sample_data);
            assert_eq!(config.identifiers.doctor_start, 500);
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        Jail::expect_with(|jail| {
            jail.create_file("clinic.toml", "[identifiers]\nappointment_start = 0\n")?;

            let result = Config::load_from(Some(PathBuf::from("clinic.toml")));
            assert!(matches!(result, Err(Error::ConfigValidation { .. })));
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_malformed_toml() {
        Jail::expect_with(|jail| {
            jail.create_file("clinic.toml", "[console\nsample_data = \"maybe\"")?;

            let result = Config::load_from(Some(PathBuf::from("clinic.toml")));
            assert!(matches!(result, Err(Error::ConfigLoad(_))));
            Ok(())
        });
    }

    #[test]
    fn test_config_serialize() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("clinic_name"));
        assert!(json.contains("patient_start"));
    }

    #[test]
    fn test_to_json() {
        let json = Config::default().to_json().unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Config::default());
        assert!(json.contains("\"clinic_name\": \"Healthcare Appointment System\""));
    }

    #[test]
    fn test_console_config_deserialize() {
        let json = r#"{"sample_data": false}"#;
        let console: ConsoleConfig = serde_json::from_str(json).unwrap();
        assert!(!console.sample_data);
        assert_eq!(console.clinic_name, "Healthcare Appointment System");
    }
}
