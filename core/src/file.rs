use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FilePath(PathBuf);

impl FilePath {
    pub fn new(path: &Path) -> Self {
        Self(path.to_path_buf())
    }

    pub fn value(&self) -> &PathBuf {
        &self.0
    }

    pub fn as_str(&self) -> &str {
        self.value().to_str().unwrap_or_default()
    }

    pub fn file_name(&self) -> String {
        self.value()
            .file_name()
            .map(|x| x.to_string_lossy().into())
            .unwrap_or_else(|| self.to_string())
    }
}

impl std::fmt::Display for FilePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value().display())
    }
}

/// The base name of a media file. Its trace is persisted as `<stem>.json`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TraceId(String);

impl TraceId {
    pub fn new(path: &Path) -> Option<Self> {
        path.file_stem()
            .map(|stem| Self(stem.to_string_lossy().into()))
            .filter(|id| !id.0.is_empty())
    }

    pub fn value(&self) -> &str {
        &self.0
    }

    pub fn json_file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl From<&str> for TraceId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MediaFile {
    pub src: FilePath,
    pub id: TraceId,
}

impl MediaFile {
    // None for paths without a file stem, like `..` or `/`.
    pub fn new(path: &Path) -> Option<Self> {
        let id = TraceId::new(path)?;
        Some(Self {
            src: FilePath::new(path),
            id,
        })
    }

    pub fn path(&self) -> &Path {
        self.src.value()
    }
}
