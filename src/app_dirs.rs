use directories::ProjectDirs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "swiftype";

/// Centralized application directory resolution
#[derive(Debug, Clone)]
pub struct AppDirs {
    data_dir: PathBuf,
    config_dir: PathBuf,
}

impl AppDirs {
    /// Platform directories, with `$HOME/.local/state/swiftype` preferred for data.
    pub fn resolve() -> Self {
        let proj_dirs = ProjectDirs::from("", "", APP_NAME);

        let data_dir = if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("state")
                .join(APP_NAME)
        } else if let Some(ref pd) = proj_dirs {
            pd.data_local_dir().to_path_buf()
        } else {
            PathBuf::from(format!(".{APP_NAME}"))
        };

        let config_dir = proj_dirs
            .map(|pd| pd.config_dir().to_path_buf())
            .unwrap_or_else(|| data_dir.clone());

        Self {
            data_dir,
            config_dir,
        }
    }

    /// Everything under a single directory.
    pub fn in_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            data_dir: dir.as_ref().to_path_buf(),
            config_dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Directory holding the stored results
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join("config.json")
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join(format!("{APP_NAME}.log"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_dir_places_everything_together() {
        let dirs = AppDirs::in_dir("/tmp/st");

        assert_eq!(dirs.data_dir(), Path::new("/tmp/st"));
        assert_eq!(dirs.config_path(), PathBuf::from("/tmp/st/config.json"));
        assert_eq!(dirs.log_path(), PathBuf::from("/tmp/st/swiftype.log"));
    }

    #[test]
    fn test_resolve_names_app_dirs() {
        let dirs = AppDirs::resolve();

        assert!(dirs.config_path().ends_with("config.json"));
        assert!(dirs.data_dir().to_string_lossy().contains(APP_NAME));
    }
}
