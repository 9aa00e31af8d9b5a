// Adapters layer: concrete sinks for logs and display output.

pub mod display;
pub mod log_sink;

pub use display::ConsoleDisplay;
pub use log_sink::{FileLogSink, MemoryLogSink, DEFAULT_LOG_FILE};
