use super::error::CollectError;
use super::file::MediaFile;
use std::path::Path;
use walkdir::WalkDir;

fn has_extension(path: &Path, extension: &str) -> bool {
    // Case sensitive on purpose: `MP4` and `mp4` are different filters.
    path.extension().and_then(|x| x.to_str()) == Some(extension)
}

fn get_valid_walk_entry(entry: &walkdir::DirEntry, extension: &str) -> Option<MediaFile> {
    let path = entry.path();
    if entry.file_type().is_file() && has_extension(path, extension) {
        MediaFile::new(path)
    } else {
        None
    }
}

// Accept either a directory or a file path.
// If it is a file, it will return a vector of just that file when the
// extension matches. If it is a directory, only its direct children are
// looked at unless `recursive` is set. The result is sorted by path so
// batches always run in the same order.
pub fn collect_media_files(
    path: &Path,
    extension: &str,
    recursive: bool,
) -> Result<Vec<MediaFile>, CollectError> {
    if path.is_file() {
        let files = MediaFile::new(path)
            .filter(|_| has_extension(path, extension))
            .into_iter()
            .collect();
        Ok(files)
    } else if path.is_dir() {
        let walker = WalkDir::new(path)
            .min_depth(1)
            .sort_by_file_name();
        let walker = if recursive {
            walker
        } else {
            walker.max_depth(1)
        };
        let files = walker
            .into_iter()
            .filter_map(Result::ok)
            .filter_map(|x| get_valid_walk_entry(&x, extension))
            .collect::<Vec<_>>();
        Ok(files)
    } else {
        Err(CollectError::NotFileOrDir(path.to_path_buf()))
    }
}
