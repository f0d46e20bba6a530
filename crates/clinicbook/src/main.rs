//! `clinicbook` - CLI for the clinic appointment book
//!
//! This binary runs the interactive appointment menu and offers a few
//! commands for inspecting configuration.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use clinicbook::cli::{Cli, Command, ConfigCommand, RunCommand};
use clinicbook::{init_logging, Config, Console};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    let config_path = cli.config.clone();
    match cli.command_or_default() {
        Command::Run(run_cmd) => handle_run(config_path, &run_cmd),
        Command::Config(config_cmd) => handle_config(config_path, config_cmd),
    }
}

fn load_config(config_path: Option<PathBuf>) -> anyhow::Result<Config> {
    Config::load_from(config_path).context("loading configuration")
}

fn handle_run(config_path: Option<PathBuf>, cmd: &RunCommand) -> anyhow::Result<()> {
    let mut config = load_config(config_path)?;
    if cmd.no_sample_data {
        config.console.sample_data = false;
    }

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut console = Console::from_config(&config, stdin.lock(), stdout.lock());
    console.run().context("console session failed")?;
    Ok(())
}

fn handle_config(config_path: Option<PathBuf>, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = load_config(config_path)?;
            if json {
                println!("{}", config.to_json()?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Console]");
                println!("  Clinic name:        {}", config.console.clinic_name);
                println!("  Sample data:        {}", config.console.sample_data);
                println!();
                println!("[Identifiers]");
                println!("  Patient start:      {}", config.identifiers.patient_start);
                println!("  Doctor start:       {}", config.identifiers.doctor_start);
                println!(
                    "  Appointment start:  {}",
                    config.identifiers.appointment_start
                );
            }
        }
        ConfigCommand::Path => {
            let path = config_path.unwrap_or_else(Config::default_config_path);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_from(Some(path.clone()))
                .with_context(|| format!("{} is not a valid configuration", path.display()))?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}
