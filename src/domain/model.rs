use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive domain of a raw heart-rate reading, beats/min.
pub const HR_LIMIT_MIN: i32 = 0;
pub const HR_LIMIT_MAX: i32 = 300;
/// Inclusive domain of a raw SpO2 reading, percent.
pub const SPO2_LIMIT_MIN: i32 = 0;
pub const SPO2_LIMIT_MAX: i32 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    pub hr: i32,
    pub spo2: i32,
}

/// `norm_hr` is deliberately unclamped: heart rates outside
/// `[hr_min, hr_max]` map outside `[0, 1]` and still feed the thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NormalizedReading {
    pub norm_hr: f64,
    pub norm_spo2: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum Status {
    Ok,
    Warning,
    /// Rendered as `SEVERE?`; log consumers match on the literal.
    Severe,
    Critical,
    Override(String),
}

impl Status {
    pub fn as_str(&self) -> &str {
        match self {
            Status::Ok => "OK",
            Status::Warning => "WARNING",
            Status::Severe => "SEVERE?",
            Status::Critical => "CRITICAL",
            Status::Override(label) => label.as_str(),
        }
    }

    pub fn is_override(&self) -> bool {
        matches!(self, Status::Override(_))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.as_str().to_string()
    }
}

/// Reference bounds and decision thresholds used by the evaluator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub hr_min: f64,
    pub hr_max: f64,
    pub norm_hr_critical: f64,
    pub norm_spo2_critical: f64,
    pub norm_hr_warning: f64,
    pub spo2_severe: i32,
    pub hr_severe: i32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            hr_min: 40.0,
            hr_max: 180.0,
            norm_hr_critical: 0.7,
            norm_spo2_critical: 0.3,
            norm_hr_warning: 0.4,
            spo2_severe: 88,
            hr_severe: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluateOptions {
    /// Append the reading to the log sink.
    pub log: bool,
    /// Non-empty value replaces the computed status verbatim.
    pub override_status: Option<String>,
    /// Forward the result to the display sink.
    pub verbose: bool,
    /// Opaque flag passed through to the display sink.
    pub force: Option<bool>,
}

impl Default for EvaluateOptions {
    fn default() -> Self {
        Self {
            log: true,
            override_status: None,
            verbose: false,
            force: None,
        }
    }
}

impl EvaluateOptions {
    pub fn without_log(mut self) -> Self {
        self.log = false;
        self
    }

    pub fn with_override(mut self, status: impl Into<String>) -> Self {
        self.override_status = Some(status.into());
        self
    }

    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = Some(force);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub reading: Reading,
    pub normalized: NormalizedReading,
    pub status: Status,
    pub message: String,
    /// Diagnostics from recovered side-effect failures.
    pub warnings: Vec<String>,
}
