//! Store port definitions
//!
//! Persistence is an explicit adapter boundary: nothing in the pipeline
//! reaches for ambient global state. Loads return `Ok(None)` for both
//! missing and unreadable data, so a corrupt file degrades to defaults
//! instead of aborting startup.

use crate::models::{DatasetSnapshot, ResultSnapshot};
use eegview_core::error::Result;
use eegview_core::models::{AnalysisResult, AnalysisSettings, DatasetDescriptor, ThemePreference};

/// Port for the persisted analysis settings.
pub trait SettingsStore {
    fn load(&self) -> Result<Option<AnalysisSettings>>;

    /// Written on every committed settings change.
    fn save(&self, settings: &AnalysisSettings) -> Result<()>;
}

/// Port for the persisted theme preference.
pub trait ThemeStore {
    fn load(&self) -> Result<Option<ThemePreference>>;

    fn save(&self, theme: ThemePreference) -> Result<()>;
}

/// Port for the session snapshots shared between invocations.
///
/// A new successful upload replaces the dataset snapshot; a new successful
/// analysis replaces the result snapshot entirely. Snapshots are never
/// merged.
pub trait SnapshotStore {
    fn load_dataset(&self) -> Result<Option<DatasetSnapshot>>;
    fn save_dataset(&self, descriptor: &DatasetDescriptor) -> Result<()>;
    fn clear_dataset(&self) -> Result<()>;

    fn load_result(&self) -> Result<Option<ResultSnapshot>>;
    fn save_result(&self, result: &AnalysisResult) -> Result<()>;
    fn clear_result(&self) -> Result<()>;
}
