use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::session::TestDuration;

/// User preferences that outlive a run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Last duration picked on the test page
    pub duration: TestDuration,
    /// Filter directive used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            duration: TestDuration::default(),
            log_level: "info".to_string(),
        }
    }
}

pub trait ConfigStore {
    /// Never fails; anything unusable yields the defaults.
    fn load(&self) -> Config;
    fn save(&self, cfg: &Config) -> io::Result<()>;
}

/// Pretty-printed JSON at a fixed path
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Config {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Config::default(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "config unreadable, using defaults");
                return Config::default();
            }
        };

        serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "config malformed, using defaults");
            Config::default()
        })
    }

    fn save(&self, cfg: &Config) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_vec_pretty(cfg)?)?;
        debug!(path = %self.path.display(), "config saved");
        Ok(())
    }
}

/// Keeps nothing; for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct NullConfigStore;

impl ConfigStore for NullConfigStore {
    fn load(&self) -> Config {
        Config::default()
    }

    fn save(&self, _cfg: &Config) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn saved_duration_is_loaded_back() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("nested").join("config.json"));
        let cfg = Config {
            duration: TestDuration::Sixty,
            log_level: "debug".into(),
        };

        store.save(&cfg).unwrap();

        assert_eq!(store.load(), cfg);
        let text = fs::read_to_string(store.path()).unwrap();
        assert!(text.contains("\"duration\": 60"));
    }

    #[test]
    fn missing_config_is_default() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("config.json"));

        assert_eq!(store.load(), Config::default());
        assert!(!store.path().exists());
    }

    #[test]
    fn unsupported_duration_falls_back_to_default() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{\"duration\": 45}").unwrap();

        assert_eq!(FileConfigStore::with_path(&path).load(), Config::default());
    }

    #[test]
    fn partial_config_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{\"duration\": 15}").unwrap();

        let loaded = FileConfigStore::with_path(&path).load();

        assert_eq!(loaded.duration, TestDuration::Fifteen);
        assert_eq!(loaded.log_level, "info");
    }

    #[test]
    fn null_store_keeps_nothing() {
        let store = NullConfigStore;
        store
            .save(&Config {
                duration: TestDuration::Fifteen,
                log_level: "trace".into(),
            })
            .unwrap();

        assert_eq!(store.load(), Config::default());
    }
}
