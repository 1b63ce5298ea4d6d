pub(crate) mod mapping;

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::debug;
use quiz_core::model::TopicKey;

use crate::repository::{QuestionRecord, QuestionStore, StorageError};

/// Default directory holding `<topic>_questions.json` files.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Question store backed by one JSON file per topic in a directory.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    root: PathBuf,
}

impl JsonDirStore {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of the resource backing `key`.
    #[must_use]
    pub fn path_for(&self, key: &TopicKey) -> PathBuf {
        self.root.join(key.file_name())
    }

    /// Write `records` as the question bank for `key`, creating the directory.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory or file cannot be written.
    pub fn write_topic(&self, key: &TopicKey, records: &[QuestionRecord]) -> Result<(), StorageError> {
        let body = mapping::render_document(records)?;
        std::fs::create_dir_all(&self.root).map_err(|e| StorageError::Io(e.to_string()))?;
        std::fs::write(self.path_for(key), body).map_err(|e| StorageError::Io(e.to_string()))
    }
}

impl Default for JsonDirStore {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}

impl QuestionStore for JsonDirStore {
    fn read_topic(&self, key: &TopicKey) -> Result<Vec<QuestionRecord>, StorageError> {
        let path = self.path_for(key);
        debug!("reading question bank {}", path.display());
        let raw = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => StorageError::NotFound,
            _ => StorageError::Io(format!("{}: {e}", path.display())),
        })?;
        mapping::parse_document(&path.display().to_string(), &raw)
    }
}
