use std::path::PathBuf;

#[derive(Debug, PartialEq, Copy, Clone)]
pub enum RunType {
    Dry,
    Exec,
}

pub const DEFAULT_EXIFTOOL: &str = "exiftool";
pub const DEFAULT_OUTPUT_DIR: &str = "gps_data";
pub const DEFAULT_EXTENSION: &str = "MP4";

/// Everything an extraction batch needs to know besides the input path.
#[derive(Debug, Clone)]
pub struct Settings {
    pub exiftool: String,
    pub output_dir: PathBuf,
    pub extension: String,
    pub recursive: bool,
    pub mode: RunType,
}
