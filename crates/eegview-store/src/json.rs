//! JSON-file store adapters over a profile directory.

use crate::models::{DatasetSnapshot, ResultSnapshot};
use crate::ports::{SettingsStore, SnapshotStore, ThemeStore};
use crate::profile::Profile;
use chrono::Utc;
use eegview_core::error::{EegviewError, Result};
use eegview_core::models::{AnalysisResult, AnalysisSettings, DatasetDescriptor, ThemePreference};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// File-backed implementation of every store port.
#[derive(Debug, Clone)]
pub struct JsonProfileStore {
    profile: Profile,
}

impl JsonProfileStore {
    pub fn new(profile: Profile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }
}

/// Read a JSON file, treating corruption like absence.
///
/// A file that fails to parse is reported with a warning and ignored, so a
/// damaged profile never prevents startup.
fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    match serde_json::from_str(&content) {
        Ok(value) => Ok(Some(value)),
        Err(err) => {
            tracing::warn!(
                path = %path.display(),
                "ignoring corrupt state file ({}), falling back to defaults",
                err
            );
            Ok(None)
        }
    }
}

fn save_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let content = serde_json::to_string_pretty(value)
        .map_err(|e| EegviewError::Serialization(e.to_string()))?;
    fs::write(path, content)?;
    Ok(())
}

fn remove_if_present(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path)?;
    }
    Ok(())
}

impl SettingsStore for JsonProfileStore {
    fn load(&self) -> Result<Option<AnalysisSettings>> {
        load_json(&self.profile.settings_path())
    }

    fn save(&self, settings: &AnalysisSettings) -> Result<()> {
        save_json(&self.profile.settings_path(), settings)
    }
}

impl ThemeStore for JsonProfileStore {
    fn load(&self) -> Result<Option<ThemePreference>> {
        load_json(&self.profile.theme_path())
    }

    fn save(&self, theme: ThemePreference) -> Result<()> {
        save_json(&self.profile.theme_path(), &theme)
    }
}

impl SnapshotStore for JsonProfileStore {
    fn load_dataset(&self) -> Result<Option<DatasetSnapshot>> {
        load_json(&self.profile.dataset_path())
    }

    fn save_dataset(&self, descriptor: &DatasetDescriptor) -> Result<()> {
        let snapshot = DatasetSnapshot {
            saved_at: Utc::now(),
            descriptor: descriptor.clone(),
        };
        save_json(&self.profile.dataset_path(), &snapshot)
    }

    fn clear_dataset(&self) -> Result<()> {
        remove_if_present(&self.profile.dataset_path())
    }

    fn load_result(&self) -> Result<Option<ResultSnapshot>> {
        load_json(&self.profile.result_path())
    }

    fn save_result(&self, result: &AnalysisResult) -> Result<()> {
        let snapshot = ResultSnapshot {
            saved_at: Utc::now(),
            result: result.clone(),
        };
        save_json(&self.profile.result_path(), &snapshot)
    }

    fn clear_result(&self) -> Result<()> {
        remove_if_present(&self.profile.result_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eegview_core::models::{AnalysisStatus, AnalysisType, NotchFreq};
    use std::collections::BTreeMap;
    use std::io::Write;

    fn store() -> (tempfile::TempDir, JsonProfileStore) {
        let dir = tempfile::tempdir().unwrap();
        let profile = Profile::init(dir.path(), false).unwrap();
        (dir, JsonProfileStore::new(profile))
    }

    #[test]
    fn settings_round_trip_is_deep_equal() {
        let (_dir, store) = store();
        assert!(SettingsStore::load(&store).unwrap().is_none());

        let settings = AnalysisSettings {
            filter_range: [0.5, 45.0],
            notch_freq: NotchFreq::Hz60,
            analysis_type: AnalysisType::Custom,
            custom_bands: "delta:1-4,theta:4-8".to_string(),
            apply_ica: false,
            ..Default::default()
        };
        SettingsStore::save(&store, &settings).unwrap();

        // A second store over the same profile simulates a fresh launch.
        let reopened = JsonProfileStore::new(store.profile().clone());
        let loaded = SettingsStore::load(&reopened).unwrap().unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn theme_round_trip() {
        let (_dir, store) = store();
        ThemeStore::save(&store, ThemePreference::Dark).unwrap();
        assert_eq!(
            ThemeStore::load(&store).unwrap(),
            Some(ThemePreference::Dark)
        );
    }

    #[test]
    fn corrupt_settings_degrade_to_none() {
        let (_dir, store) = store();
        let mut file = fs::File::create(store.profile().settings_path()).unwrap();
        file.write_all(b"{not json").unwrap();

        assert!(SettingsStore::load(&store).unwrap().is_none());
    }

    #[test]
    fn dataset_snapshot_replaces_previous() {
        let (_dir, store) = store();
        let mut channels = BTreeMap::new();
        channels.insert("Cz".to_string(), vec![0.0, 1.0]);
        let first = DatasetDescriptor {
            file_path: "uploads/first.edf".to_string(),
            channel_count: 1,
            time: vec![0.0, 0.004],
            channels: channels.clone(),
        };
        store.save_dataset(&first).unwrap();

        let second = DatasetDescriptor {
            file_path: "uploads/second.edf".to_string(),
            ..first
        };
        store.save_dataset(&second).unwrap();

        let loaded = store.load_dataset().unwrap().unwrap();
        assert_eq!(loaded.descriptor.file_path, "uploads/second.edf");

        store.clear_dataset().unwrap();
        assert!(store.load_dataset().unwrap().is_none());
    }

    #[test]
    fn result_snapshot_round_trip() {
        let (_dir, store) = store();
        let result = AnalysisResult {
            status: AnalysisStatus::Success,
            message: None,
            features: None,
        };
        store.save_result(&result).unwrap();
        let loaded = store.load_result().unwrap().unwrap();
        assert_eq!(loaded.result, result);
    }
}
