use crate::domain::model::Status;
use crate::utils::error::SinkError;

/// Append-only text destination for evaluated readings.
pub trait LogSink {
    fn append(&mut self, line: &str) -> Result<(), SinkError>;
}

/// Fire-and-forget presentation of an evaluation.
pub trait DisplaySink {
    fn show(&mut self, hr: i32, spo2: i32, force: Option<bool>, status: &Status);
}

impl<T: LogSink + ?Sized> LogSink for Box<T> {
    fn append(&mut self, line: &str) -> Result<(), SinkError> {
        (**self).append(line)
    }
}

impl<T: DisplaySink + ?Sized> DisplaySink for Box<T> {
    fn show(&mut self, hr: i32, spo2: i32, force: Option<bool>, status: &Status) {
        (**self).show(hr, spo2, force, status)
    }
}

/// Discards everything. Default collaborator for a bare evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    fn append(&mut self, _line: &str) -> Result<(), SinkError> {
        Ok(())
    }
}

impl DisplaySink for NullSink {
    fn show(&mut self, _hr: i32, _spo2: i32, _force: Option<bool>, _status: &Status) {}
}
