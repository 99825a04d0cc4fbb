use std::path::PathBuf;

use thiserror::Error;

/// Failures a single config target or the keyboard step can report.
///
/// None of these stop a run; the orchestrator turns each into a failed
/// `UpdateResult` and moves on.
#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("config file not found: {}", .0.display())]
    TargetMissing(PathBuf),

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid substitution pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("device control failed: {0}")]
    DeviceControl(String),
}
