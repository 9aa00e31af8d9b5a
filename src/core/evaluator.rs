use crate::core::{DisplaySink, LogSink, NullSink};
use crate::domain::model::{
    EvaluateOptions, Evaluation, NormalizedReading, Reading, Status, Thresholds, HR_LIMIT_MAX,
    HR_LIMIT_MIN, SPO2_LIMIT_MAX, SPO2_LIMIT_MIN,
};
use crate::utils::error::{ReadingField, Result};
use crate::utils::validation::validate_reading;

const DEBUG_SUFFIX: &str = " (DBG)";

/// Normalizes and classifies heart-rate / SpO2 readings.
///
/// `evaluate` takes `&mut self` because it replaces the retained last
/// message; callers sharing one evaluator across threads must wrap it in
/// their own lock.
pub struct VitalStatusEvaluator<L = NullSink, D = NullSink> {
    debug_mode: bool,
    thresholds: Thresholds,
    last_status_message: Option<String>,
    log_sink: L,
    display: D,
}

impl VitalStatusEvaluator {
    pub fn new(debug_mode: bool) -> Self {
        Self {
            debug_mode,
            thresholds: Thresholds::default(),
            last_status_message: None,
            log_sink: NullSink,
            display: NullSink,
        }
    }
}

impl<L: LogSink, D: DisplaySink> VitalStatusEvaluator<L, D> {
    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_log_sink<S: LogSink>(self, log_sink: S) -> VitalStatusEvaluator<S, D> {
        VitalStatusEvaluator {
            debug_mode: self.debug_mode,
            thresholds: self.thresholds,
            last_status_message: self.last_status_message,
            log_sink,
            display: self.display,
        }
    }

    pub fn with_display<S: DisplaySink>(self, display: S) -> VitalStatusEvaluator<L, S> {
        VitalStatusEvaluator {
            debug_mode: self.debug_mode,
            thresholds: self.thresholds,
            last_status_message: self.last_status_message,
            log_sink: self.log_sink,
            display,
        }
    }

    pub fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Message produced by the most recent successful evaluation.
    pub fn last_message(&self) -> Option<&str> {
        self.last_status_message.as_deref()
    }

    pub fn log_sink(&self) -> &L {
        &self.log_sink
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn normalize_hr(&self, hr: i32) -> f64 {
        (f64::from(hr) - self.thresholds.hr_min) / (self.thresholds.hr_max - self.thresholds.hr_min)
    }

    pub fn normalize_spo2(&self, spo2: i32) -> f64 {
        f64::from(spo2) / 100.0
    }

    pub fn normalize(&self, hr: i32, spo2: i32) -> NormalizedReading {
        NormalizedReading {
            norm_hr: self.normalize_hr(hr),
            norm_spo2: self.normalize_spo2(spo2),
        }
    }

    /// First matching rule wins: critical, then severe/warning, then ok.
    pub fn classify(&self, norm_hr: f64, norm_spo2: f64, hr: i32, spo2: i32) -> Status {
        let t = &self.thresholds;
        if norm_hr > t.norm_hr_critical && norm_spo2 < t.norm_spo2_critical {
            Status::Critical
        } else if norm_hr > t.norm_hr_warning {
            if spo2 < t.spo2_severe || hr > t.hr_severe {
                Status::Severe
            } else {
                Status::Warning
            }
        } else {
            Status::Ok
        }
    }

    pub fn evaluate(&mut self, hr: i32, spo2: i32, options: &EvaluateOptions) -> Result<Evaluation> {
        // hr is checked first and short-circuits the spo2 check
        validate_reading(ReadingField::Hr, hr, HR_LIMIT_MIN, HR_LIMIT_MAX)?;
        validate_reading(ReadingField::Spo2, spo2, SPO2_LIMIT_MIN, SPO2_LIMIT_MAX)?;

        let normalized = self.normalize(hr, spo2);

        let status = match options.override_status.as_deref() {
            Some(label) if !label.is_empty() => {
                tracing::debug!(hr, spo2, status = label, "Status overridden by caller");
                Status::Override(label.to_string())
            }
            _ => self.classify(normalized.norm_hr, normalized.norm_spo2, hr, spo2),
        };

        tracing::debug!(
            hr,
            spo2,
            norm_hr = normalized.norm_hr,
            norm_spo2 = normalized.norm_spo2,
            status = %status,
            "Evaluated vital signs"
        );

        if options.verbose {
            self.display.show(hr, spo2, options.force, &status);
        }

        let mut message = format!("Last status: {}", status);
        if self.debug_mode {
            message.push_str(DEBUG_SUFFIX);
        }
        self.last_status_message = Some(message.clone());

        let mut warnings = Vec::new();
        if options.log {
            let line = format_log_line(hr, spo2, &normalized, &status);
            if let Err(e) = self.log_sink.append(&line) {
                tracing::warn!("Error writing to log sink: {}", e);
                warnings.push(format!("Error writing to log sink: {}", e));
            }
        }

        Ok(Evaluation {
            reading: Reading { hr, spo2 },
            normalized,
            status,
            message,
            warnings,
        })
    }
}

/// Persisted log record, newline terminated.
pub fn format_log_line(hr: i32, spo2: i32, normalized: &NormalizedReading, status: &Status) -> String {
    format!(
        "HR={}, SpO2={}, NormHR={:.2}, NormSpO2={:.2}, STATUS={}\n",
        hr, spo2, normalized.norm_hr, normalized.norm_spo2, status
    )
}
