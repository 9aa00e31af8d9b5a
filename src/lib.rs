pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};
pub use config::TomlConfig;

pub use adapters::{ConsoleDisplay, FileLogSink, MemoryLogSink};
pub use core::dose::{calculate_medication_dose, DoseTable};
pub use core::evaluator::VitalStatusEvaluator;
pub use domain::model::{EvaluateOptions, Evaluation, Status, Thresholds};
pub use utils::error::{Result, SinkError, VitalsError};
