//! In-memory store implementations for development and testing.
//!
//! These implementations use `RwLock::unwrap()` intentionally. Lock
//! poisoning only occurs when another thread panicked while holding the
//! lock, which is an unrecoverable state. Real sessions use the JSON
//! profile stores.

use crate::models::{DatasetSnapshot, ResultSnapshot};
use crate::ports::{SettingsStore, SnapshotStore, ThemeStore};
use chrono::Utc;
use eegview_core::error::Result;
use eegview_core::models::{AnalysisResult, AnalysisSettings, DatasetDescriptor, ThemePreference};
use std::sync::{Arc, RwLock};

/// In-memory implementation of every store port.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    settings: Arc<RwLock<Option<AnalysisSettings>>>,
    theme: Arc<RwLock<Option<ThemePreference>>>,
    dataset: Arc<RwLock<Option<DatasetSnapshot>>>,
    result: Arc<RwLock<Option<ResultSnapshot>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self) -> Result<Option<AnalysisSettings>> {
        Ok(self.settings.read().unwrap().clone())
    }

    fn save(&self, settings: &AnalysisSettings) -> Result<()> {
        *self.settings.write().unwrap() = Some(settings.clone());
        Ok(())
    }
}

impl ThemeStore for MemoryStore {
    fn load(&self) -> Result<Option<ThemePreference>> {
        Ok(*self.theme.read().unwrap())
    }

    fn save(&self, theme: ThemePreference) -> Result<()> {
        *self.theme.write().unwrap() = Some(theme);
        Ok(())
    }
}

impl SnapshotStore for MemoryStore {
    fn load_dataset(&self) -> Result<Option<DatasetSnapshot>> {
        Ok(self.dataset.read().unwrap().clone())
    }

    fn save_dataset(&self, descriptor: &DatasetDescriptor) -> Result<()> {
        *self.dataset.write().unwrap() = Some(DatasetSnapshot {
            saved_at: Utc::now(),
            descriptor: descriptor.clone(),
        });
        Ok(())
    }

    fn clear_dataset(&self) -> Result<()> {
        *self.dataset.write().unwrap() = None;
        Ok(())
    }

    fn load_result(&self) -> Result<Option<ResultSnapshot>> {
        Ok(self.result.read().unwrap().clone())
    }

    fn save_result(&self, result: &AnalysisResult) -> Result<()> {
        *self.result.write().unwrap() = Some(ResultSnapshot {
            saved_at: Utc::now(),
            result: result.clone(),
        });
        Ok(())
    }

    fn clear_result(&self) -> Result<()> {
        *self.result.write().unwrap() = None;
        Ok(())
    }
}
