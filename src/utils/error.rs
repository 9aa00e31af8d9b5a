use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingField {
    Hr,
    Spo2,
}

impl fmt::Display for ReadingField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadingField::Hr => write!(f, "hr"),
            ReadingField::Spo2 => write!(f, "spo2"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Config,
    System,
}

#[derive(Error, Debug)]
pub enum VitalsError {
    #[error("Invalid {field} value: {value} (outside bound {bound})")]
    InvalidReading {
        field: ReadingField,
        value: i32,
        bound: i32,
    },

    #[error("Invalid dose input '{field}' = {value}: {reason}")]
    InvalidDose {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unknown drug_code: {code}")]
    UnknownDrug { code: String },

    #[error("Invalid patient age: {age}")]
    InvalidPatientAge { age: i32 },

    #[error("Invalid config value for '{field}' = '{value}': {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration parse error: {message}")]
    ConfigParse { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl VitalsError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            VitalsError::InvalidReading { .. }
            | VitalsError::InvalidDose { .. }
            | VitalsError::UnknownDrug { .. }
            | VitalsError::InvalidPatientAge { .. } => ErrorCategory::Input,
            VitalsError::InvalidConfigValue { .. } | VitalsError::ConfigParse { .. } => {
                ErrorCategory::Config
            }
            VitalsError::Io(_) | VitalsError::Csv(_) | VitalsError::Serialization(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Input => 1,
            ErrorCategory::Config => 2,
            ErrorCategory::System => 3,
        }
    }
}

/// Failure of a log sink. Recovered inside the evaluator and never returned
/// from `evaluate`.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("log sink I/O failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("log sink unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, VitalsError>;
