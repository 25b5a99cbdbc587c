//! Side-channel result file for the calling pipeline.
//!
//! CI runners hand each step a file path; appending `name=value` lines to it
//! publishes step outputs. Values are written verbatim — there is no escaping
//! of `=` or newlines — so only short status summaries belong here, never log
//! text.

use crate::error::{ActionError, Result};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Append-only `name=value` output file.
#[derive(Debug, Clone)]
pub struct OutputFile {
    path: PathBuf,
}

impl OutputFile {
    /// Wrap the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Append one `name=value` line, creating the file if needed.
    pub fn append(&self, name: &str, value: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                ActionError::OutputError(format!("Failed to open {}: {}", self.path.display(), e))
            })?;

        writeln!(file, "{}={}", name, value).map_err(|e| {
            ActionError::OutputError(format!("Failed to write {}: {}", self.path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_single_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("step_output");
        let output = OutputFile::new(&path);

        output.append("status", "success").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "status=success\n");
    }

    #[test]
    fn test_appends_accumulate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("step_output");
        let output = OutputFile::new(&path);

        output.append("status", "success").unwrap();
        output.append("task_id", "5205").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "status=success\ntask_id=5205\n");
    }

    #[test]
    fn test_preserves_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("step_output");
        std::fs::write(&path, "earlier=value\n").unwrap();

        OutputFile::new(&path).append("status", "error").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "earlier=value\nstatus=error\n");
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let output = OutputFile::new("/nonexistent-dir/step_output");
        let err = output.append("status", "success").unwrap_err();
        assert!(err.to_string().contains("Output error"));
    }
}
