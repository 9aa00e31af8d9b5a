pub mod assessment;
pub mod batch;
pub mod dose;
pub mod evaluator;

pub use crate::domain::model::{EvaluateOptions, Evaluation, NormalizedReading, Status, Thresholds};
pub use crate::domain::ports::{DisplaySink, LogSink, NullSink};
pub use crate::utils::error::Result;
