use super::error::ExtractError;
use super::line::ParsedLine;
use super::trace::{GpsTrace, TraceAssembler};
use super::utils;
use std::path::Path;
use std::process::Command;

/// Where the traces come from. The batch only needs this so it can be
/// driven without exiftool installed.
pub trait GpsSource {
    fn extract(&self, path: &Path) -> Result<GpsTrace, ExtractError>;
}

pub struct ExifTool {
    cmd_path: String,
}

impl ExifTool {
    pub fn new(cmd_path: &str) -> Self {
        Self {
            cmd_path: cmd_path.to_string(),
        }
    }

    // Runs `exiftool -ee -gps* <file>`. The `-ee` flag makes it read the
    // embedded telemetry stream so we get one block per GPS sample instead
    // of only the first one in the container.
    fn run(&self, path: &Path) -> Result<String, ExtractError> {
        tracing::debug!(cmd = %self.cmd_path, path = %path.display(), "running exiftool");
        let output = Command::new(&self.cmd_path)
            .arg("-ee")
            .arg("-gps*")
            .arg(path)
            .output()
            .map_err(|source| ExtractError::Spawn {
                cmd: self.cmd_path.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ExtractError::ExternalTool {
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl GpsSource for ExifTool {
    fn extract(&self, path: &Path) -> Result<GpsTrace, ExtractError> {
        if !path.is_file() {
            return Err(ExtractError::FileNotFound(path.to_path_buf()));
        }
        let output = self.run(path)?;
        let trace = extract_from_output(&output);
        if trace.is_empty() {
            tracing::info!(path = %utils::path_to_string(path), "no GPS data found");
        }
        Ok(trace)
    }
}

/// Single pass over the tool's text output. Malformed fields are logged
/// and skipped, they never stop the extraction.
pub fn extract_from_output(output: &str) -> GpsTrace {
    let mut asm = TraceAssembler::new();
    for (idx, line) in output.lines().enumerate() {
        if let ParsedLine::Recovered { kind, error, .. } = asm.feed_line(line) {
            tracing::warn!(line = idx + 1, field = ?kind, "{error}");
        }
    }
    asm.finish()
}
