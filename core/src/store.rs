use super::config::RunType;
use super::error::StoreError;
use super::file::TraceId;
use super::trace::GpsTrace;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Raw persisted trace files, keyed by the source file's base name.
pub trait TraceStore {
    fn load(&self, id: &TraceId) -> Result<Option<String>, StoreError>;
    fn save(&self, id: &TraceId, data: &str) -> Result<(), StoreError>;
    fn list(&self) -> Result<Vec<String>, StoreError>;
}

/// `<dir>/<stem>.json` files. The directory is created on the first write.
pub struct DirTraceStore {
    dir: PathBuf,
    mode: RunType,
}

impl DirTraceStore {
    pub fn new(dir: &Path, mode: &RunType) -> Self {
        Self {
            dir: dir.to_path_buf(),
            mode: *mode,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, id: &TraceId) -> PathBuf {
        self.dir.join(id.json_file_name())
    }
}

impl TraceStore for DirTraceStore {
    fn load(&self, id: &TraceId) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(self.path_for(id)) {
            Ok(data) => Ok(Some(data)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, id: &TraceId, data: &str) -> Result<(), StoreError> {
        if self.mode == RunType::Exec {
            std::fs::create_dir_all(&self.dir)?;
            std::fs::write(self.path_for(id), data)?;
        }
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        if !self.dir.is_dir() {
            return Ok(vec![]);
        }
        let mut names = vec![];
        for entry in std::fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            if name.ends_with(".json") && entry.file_type()?.is_file() {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }
}

#[derive(Default)]
pub struct MemoryTraceStore {
    pub files: RefCell<BTreeMap<String, String>>,
}

impl MemoryTraceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trace(self, id: &str, trace: &GpsTrace) -> Self {
        let data = trace.to_json().unwrap_or_default();
        self.files
            .borrow_mut()
            .insert(TraceId::from(id).json_file_name(), data);
        self
    }

    pub fn get(&self, id: &str) -> Option<String> {
        self.files
            .borrow()
            .get(&TraceId::from(id).json_file_name())
            .cloned()
    }
}

impl TraceStore for MemoryTraceStore {
    fn load(&self, id: &TraceId) -> Result<Option<String>, StoreError> {
        Ok(self.files.borrow().get(&id.json_file_name()).cloned())
    }

    fn save(&self, id: &TraceId, data: &str) -> Result<(), StoreError> {
        self.files
            .borrow_mut()
            .insert(id.json_file_name(), data.to_string());
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.files.borrow().keys().cloned().collect())
    }
}
