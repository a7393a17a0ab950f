use eyre::Result;
use gpstrace::extract::{self, ExifTool, GpsSource};
use std::io::Write;
use std::path::Path;

// Prints the trace as it would be persisted, without touching the output
// directory. With `text` the file is a saved `exiftool -ee -gps*` dump.
pub fn exec(path: &Path, text: bool, exiftool: &str) -> Result<()> {
    let trace = if text {
        let data = std::fs::read_to_string(path)?;
        extract::extract_from_output(&data)
    } else {
        ExifTool::new(exiftool).extract(path)?
    };

    let mut stdout = std::io::stdout();
    writeln!(stdout, "{}", trace.to_json()?)?;
    stdout.flush()?;

    eprintln!("Found {} GPS samples", trace.len());

    Ok(())
}
