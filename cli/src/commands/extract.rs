use eyre::Result;
use gpstrace::batch::{self, BatchReport, TraceNotifier};
use gpstrace::config::{RunType, Settings};
use gpstrace::dir::collect_media_files;
use gpstrace::error::{ExtractError, StoreError};
use gpstrace::extract::ExifTool;
use gpstrace::file::{FilePath, TraceId};
use gpstrace::store::DirTraceStore;
use gpstrace::utils;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};

struct ConsoleNotifier {
    progress: ProgressBar,
    out_dir: PathBuf,
    mode: RunType,
}

impl ConsoleNotifier {
    fn new(progress: ProgressBar, out_dir: &Path, mode: &RunType) -> Self {
        Self {
            progress,
            out_dir: out_dir.to_path_buf(),
            mode: *mode,
        }
    }
}

// The line printed for a new trace. Dry runs never create the file.
fn written_line(mode: &RunType, src: &str, out: &str, samples: usize) -> String {
    match mode {
        RunType::Dry => format!("{} -> would write {} ({} samples)", src, out, samples),
        RunType::Exec => format!("{} -> {} ({} samples)", src, out, samples),
    }
}

impl TraceNotifier for ConsoleNotifier {
    fn processing(&self, src: &FilePath) -> () {
        self.progress.set_message(format!("Processing {}...", src.file_name()));
        self.progress.inc(1);
    }

    fn written(&self, src: &FilePath, samples: usize) -> () {
        let out = TraceId::new(src.value())
            .map(|id| utils::path_to_string(&self.out_dir.join(id.json_file_name())))
            .unwrap_or_default();
        let line = written_line(&self.mode, src.as_str(), &out, samples);
        self.progress.suspend(|| println!("{line}"));
    }

    fn skipped(&self, src: &FilePath) -> () {
        self.progress.suspend(|| {
            println!("{} -> The data is the same as the existing file.", src.as_str())
        });
    }

    fn conflict(&self, src: &FilePath) -> () {
        self.progress.suspend(|| {
            eprintln!(
                "{} -> Data differs from the existing JSON file! Stopping.",
                src.as_str()
            );
        });
    }

    fn no_gps_data(&self, src: &FilePath) -> () {
        self.progress
            .suspend(|| println!("{} -> No GPS data found", src.as_str()));
    }

    fn extract_error(&self, src: &FilePath, err: &ExtractError) -> () {
        self.progress.suspend(|| eprintln!("{} -> {}", src.as_str(), err));
    }

    fn store_error(&self, src: &FilePath, err: &StoreError) -> () {
        self.progress.suspend(|| eprintln!("{} -> {}", src.as_str(), err));
    }
}

pub fn print_mode(mode: &RunType) {
    match mode {
        RunType::Dry => println!("DRY RUN:: run `extract --exec 'path/to'` to write the traces"),
        _ => {}
    }
}

pub fn exec(path: &Path, settings: &Settings) -> Result<BatchReport> {
    let time = std::time::Instant::now();

    println!(
        "Collecting *.{} files in '{}'",
        settings.extension,
        utils::path_to_string(path)
    );
    let files = collect_media_files(path, &settings.extension, settings.recursive)?;

    print_mode(&settings.mode);

    let progress = ProgressBar::new(files.len().try_into()?).with_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?,
    );
    let source = ExifTool::new(&settings.exiftool);
    let store = DirTraceStore::new(&settings.output_dir, &settings.mode);
    let nf = ConsoleNotifier::new(progress.clone(), store.dir(), &settings.mode);

    let report = batch::process_files(&source, &store, &nf, &files);
    progress.finish_and_clear();

    let duration = indicatif::HumanDuration(time.elapsed());
    println!(
        "{} written, {} unchanged, {} without GPS, {} failed. Took {}",
        report.written, report.skipped, report.empty, report.failed, duration
    );
    if let Some(src) = &report.conflict {
        eprintln!(
            "Exiting because the data for {} has changed. {} of {} files were not processed.",
            src.file_name(),
            files.len() - report.attempted,
            files.len()
        );
    }

    print_mode(&settings.mode);

    Ok(report)
}
