use super::error::{ExtractError, StoreError};
use super::extract::GpsSource;
use super::file::{FilePath, MediaFile};
use super::reconcile::{reconcile, Outcome};
use super::store::TraceStore;

pub trait TraceNotifier {
    fn processing(&self, src: &FilePath) -> ();
    fn written(&self, src: &FilePath, samples: usize) -> ();
    fn skipped(&self, src: &FilePath) -> ();
    fn conflict(&self, src: &FilePath) -> ();
    fn no_gps_data(&self, src: &FilePath) -> ();
    fn extract_error(&self, src: &FilePath, err: &ExtractError) -> ();
    fn store_error(&self, src: &FilePath, err: &StoreError) -> ();
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct BatchReport {
    pub attempted: usize,
    pub written: usize,
    pub skipped: usize,
    pub empty: usize,
    pub failed: usize,
    pub conflict: Option<FilePath>,
}

impl BatchReport {
    pub fn halted(&self) -> bool {
        self.conflict.is_some()
    }
}

// Files are handled one after the other. Extraction and storage errors only
// cost the file they happened on, a conflict stops the whole batch so the
// remaining files are never looked at.
pub fn process_files<X: GpsSource, S: TraceStore, N: TraceNotifier>(
    source: &X,
    store: &S,
    nf: &N,
    files: &[MediaFile],
) -> BatchReport {
    let mut report = BatchReport::default();

    for file in files {
        report.attempted += 1;
        nf.processing(&file.src);

        let trace = match source.extract(file.path()) {
            Ok(trace) => trace,
            Err(err) => {
                nf.extract_error(&file.src, &err);
                report.failed += 1;
                continue;
            }
        };

        if trace.is_empty() {
            nf.no_gps_data(&file.src);
            report.empty += 1;
            continue;
        }

        match reconcile(store, &file.id, &trace) {
            Ok(Outcome::Written) => {
                nf.written(&file.src, trace.len());
                report.written += 1;
            }
            Ok(Outcome::Skipped) => {
                nf.skipped(&file.src);
                report.skipped += 1;
            }
            Ok(Outcome::Conflict) => {
                nf.conflict(&file.src);
                report.conflict = Some(file.src.clone());
                break;
            }
            Err(err) => {
                nf.store_error(&file.src, &err);
                report.failed += 1;
            }
        }
    }

    report
}
