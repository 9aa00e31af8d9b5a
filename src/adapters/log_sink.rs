use crate::core::LogSink;
use crate::utils::error::SinkError;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

pub const DEFAULT_LOG_FILE: &str = "vitals_log.txt";

/// Appends each line to a file, creating it (and its parent directory) on
/// first write. Existing content is never truncated.
#[derive(Debug, Clone)]
pub struct FileLogSink {
    path: PathBuf,
}

impl FileLogSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileLogSink {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_FILE)
    }
}

impl LogSink for FileLogSink {
    fn append(&mut self, line: &str) -> Result<(), SinkError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}

/// Shared in-memory buffer. Clones observe the same lines.
#[derive(Debug, Clone, Default)]
pub struct MemoryLogSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryLogSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }
}

impl LogSink for MemoryLogSink {
    fn append(&mut self, line: &str) -> Result<(), SinkError> {
        let mut lines = self
            .lines
            .lock()
            .map_err(|e| SinkError::Unavailable(e.to_string()))?;
        lines.push(line.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_sink_appends() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("logs").join("vitals.txt");
        let mut sink = FileLogSink::new(&path);

        sink.append("first\n").unwrap();
        sink.append("second\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_file_sink_reports_unwritable_path() {
        let temp_dir = TempDir::new().unwrap();
        // a directory cannot be opened for appending
        let mut sink = FileLogSink::new(temp_dir.path());
        assert!(matches!(sink.append("x\n"), Err(SinkError::Io(_))));
    }

    #[test]
    fn test_memory_sink_clones_share_buffer() {
        let sink = MemoryLogSink::new();
        let mut writer = sink.clone();
        writer.append("a\n").unwrap();
        assert_eq!(sink.lines(), vec!["a\n".to_string()]);
    }
}
