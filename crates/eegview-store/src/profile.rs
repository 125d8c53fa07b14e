//! Profile directory discovery and layout.

use eegview_core::error::{EegviewError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// The `.eegview/` directory holding a session's persisted state.
///
/// Fixed file names are the persistence keys: `settings.json`,
/// `theme.json`, `dataset.json`, `result.json`, plus an optional
/// `config.toml` for the layered configuration's file layer.
#[derive(Debug, Clone)]
pub struct Profile {
    root: PathBuf,
}

impl Profile {
    pub const DIR_NAME: &'static str = ".eegview";

    /// Find a profile by walking up from `start`.
    pub fn discover_from(start: &Path) -> Option<Profile> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(Self::DIR_NAME);
            if candidate.is_dir() {
                return Some(Profile { root: candidate });
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Find a profile starting at the current directory.
    pub fn discover() -> Option<Profile> {
        std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_from(&cwd))
    }

    /// Create a profile under `parent`.
    pub fn init(parent: &Path, force: bool) -> Result<Profile> {
        let root = parent.join(Self::DIR_NAME);
        if root.exists() && !force {
            return Err(EegviewError::ProfileExists { path: root });
        }
        fs::create_dir_all(&root)?;
        Ok(Profile { root })
    }

    /// Open an existing profile directory directly.
    pub fn open(root: PathBuf) -> Result<Profile> {
        if root.is_dir() {
            Ok(Profile { root })
        } else {
            Err(EegviewError::ProfileNotFound)
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn settings_path(&self) -> PathBuf {
        self.root.join("settings.json")
    }

    pub fn theme_path(&self) -> PathBuf {
        self.root.join("theme.json")
    }

    pub fn dataset_path(&self) -> PathBuf {
        self.root.join("dataset.json")
    }

    pub fn result_path(&self) -> PathBuf {
        self.root.join("result.json")
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join("config.toml")
    }
}
