use std::path::PathBuf;
use std::process::ExitStatus;

/// A recognized GPS line whose value could not be used as-is. These never
/// stop an extraction, the line parser hands them back next to whatever
/// value should still be applied.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FieldError {
    #[error("Invalid coordinate format: {0}")]
    MalformedCoordinate(String),
    #[error("Invalid altitude value: {0:?}")]
    MalformedAltitude(String),
    #[error("No value separator on line: {0}")]
    MissingValue(String),
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("Failed to start {cmd}: {source}")]
    Spawn {
        cmd: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Error running ExifTool ({status}): {stderr}")]
    ExternalTool { status: ExitStatus, stderr: String },
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Trace storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Trace serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    #[error("Path is neither a file nor a dir: {}", .0.display())]
    NotFileOrDir(PathBuf),
}
