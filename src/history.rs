use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::StorageError;

/// Key the result history is stored under
pub const RESULTS_KEY: &str = "typingResults";

/// Persisted outcome of one completed test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResult {
    /// ISO-8601 UTC timestamp, also the identity of the record
    pub date: String,
    pub wpm: u32,
    pub accuracy: u32,
    pub mistakes: u32,
    pub duration: u32,
}

impl TestResult {
    pub fn timestamp(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.date)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// String key-value store the history persists through
pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// One `<key>.json` file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|source| StorageError::Io {
            path: self.dir.clone(),
            source,
        })?;
        let path = self.path_for(key);
        fs::write(&path, value).map_err(|source| StorageError::Io { path, source })
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io { path, source }),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Ordered collection of results kept in a [`Storage`].
pub struct History {
    store: Box<dyn Storage>,
}

impl std::fmt::Debug for History {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("History").finish_non_exhaustive()
    }
}

impl History {
    pub fn new<S: Storage + 'static>(store: S) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Every stored result, one per distinct date.
    ///
    /// A missing or unreadable value loads as empty. When duplicates are
    /// found the deduplicated list is written back.
    pub fn load(&mut self) -> Vec<TestResult> {
        let stored = self.read_all();
        let unique = dedup_by_date(&stored);

        if unique.len() != stored.len() {
            debug!(
                removed = stored.len() - unique.len(),
                "dropping duplicate results"
            );
            if let Err(e) = self.write_all(&unique) {
                warn!(error = %e, "failed to write back deduplicated results");
            }
        }
        unique
    }

    pub fn append(&mut self, result: TestResult) -> Result<(), StorageError> {
        let mut results = self.read_all();
        results.push(result);
        self.write_all(&results)
    }

    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.store.remove(RESULTS_KEY)
    }

    fn read_all(&self) -> Vec<TestResult> {
        let raw = match self.store.get(RESULTS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "failed to read results");
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(error = %e, "stored results are malformed, treating as empty");
            Vec::new()
        })
    }

    fn write_all(&mut self, results: &[TestResult]) -> Result<(), StorageError> {
        let encoded = serde_json::to_string(results)?;
        self.store.set(RESULTS_KEY, &encoded)
    }
}

/// Last record per date wins; order follows each date's first appearance.
pub fn dedup_by_date(results: &[TestResult]) -> Vec<TestResult> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut unique: Vec<TestResult> = Vec::with_capacity(results.len());

    for result in results {
        match index.get(result.date.as_str()) {
            Some(&pos) => unique[pos] = result.clone(),
            None => {
                index.insert(result.date.as_str(), unique.len());
                unique.push(result.clone());
            }
        }
    }
    unique
}
