use crate::domain::model::EvaluateOptions;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "vitals")]
#[command(about = "Vital-sign triage, dose and blood-pressure helpers")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(long, global = true)]
    pub log_verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Classify a single heart-rate / SpO2 reading
    Evaluate {
        #[arg(long, allow_negative_numbers = true)]
        hr: i32,

        #[arg(long, allow_negative_numbers = true)]
        spo2: i32,

        /// Replace the computed status with this label
        #[arg(long = "override")]
        override_status: Option<String>,

        /// Show the reading on the console
        #[arg(short, long)]
        verbose: bool,

        /// Opaque flag shown alongside the reading
        #[arg(long)]
        force: Option<bool>,

        /// Do not append to the vitals log
        #[arg(long)]
        no_log: bool,

        /// Append " (DBG)" to status messages
        #[arg(long)]
        debug: bool,

        /// Log file, overrides the config file
        #[arg(long)]
        log_file: Option<String>,

        /// Print the evaluation as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify every row of a CSV file with columns hr,spo2[,override_status]
    Batch {
        #[arg(short, long)]
        input: String,

        #[arg(long)]
        no_log: bool,

        #[arg(long)]
        debug: bool,

        #[arg(long)]
        log_file: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Weight-based medication dose
    Dose {
        #[arg(long, allow_negative_numbers = true)]
        weight: f64,

        #[arg(long, allow_negative_numbers = true)]
        age: f64,

        #[arg(long)]
        code: String,

        #[arg(long)]
        urgent: bool,
    },

    /// Blood-pressure risk for a patient
    Bp {
        #[arg(long, default_value = "patient")]
        name: String,

        #[arg(long, allow_negative_numbers = true)]
        age: i32,

        #[arg(long)]
        systolic: i32,

        #[arg(long)]
        diastolic: i32,
    },
}

impl Command {
    /// Evaluation options for the `evaluate` subcommand.
    pub fn evaluate_options(&self) -> Option<EvaluateOptions> {
        match self {
            Command::Evaluate {
                override_status,
                verbose,
                force,
                no_log,
                ..
            } => Some(EvaluateOptions {
                log: !no_log,
                override_status: override_status.clone(),
                verbose: *verbose,
                force: *force,
            }),
            Command::Batch { no_log, .. } => Some(EvaluateOptions {
                log: !no_log,
                ..EvaluateOptions::default()
            }),
            _ => None,
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(path) = &self.config {
            validation::validate_path("config", path)?;
        }
        match &self.command {
            Command::Batch { input, .. } => validation::validate_path("input", input),
            Command::Dose { code, .. } => validation::validate_non_empty_string("code", code),
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_evaluate() {
        let config = CliConfig::try_parse_from([
            "vitals", "evaluate", "--hr", "130", "--spo2", "95", "--override", "MANUAL", "-v",
            "--force", "true", "--no-log",
        ])
        .unwrap();

        let options = config.command.evaluate_options().unwrap();
        assert!(!options.log);
        assert!(options.verbose);
        assert_eq!(options.force, Some(true));
        assert_eq!(options.override_status.as_deref(), Some("MANUAL"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_negative_reading() {
        let config =
            CliConfig::try_parse_from(["vitals", "evaluate", "--hr", "-1", "--spo2", "90"]).unwrap();
        match config.command {
            Command::Evaluate { hr, .. } => assert_eq!(hr, -1),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_dose_and_validate() {
        let config = CliConfig::try_parse_from([
            "vitals", "dose", "--weight", "10", "--age", "5", "--code", " ",
        ])
        .unwrap();
        assert!(config.command.evaluate_options().is_none());
        assert!(config.validate().is_err());
    }
}
