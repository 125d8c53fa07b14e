//! Error types for eegview

use std::collections::BTreeMap;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EegviewError {
    // Intake errors
    #[error("Unsupported file extension '{extension}'. Allowed: {allowed}")]
    InvalidExtension { extension: String, allowed: String },

    #[error("'{name}' is {size_bytes} bytes, above the {max_bytes} byte upload ceiling")]
    FileTooLarge {
        name: String,
        size_bytes: u64,
        max_bytes: u64,
    },

    #[error("Failed to read '{path}'")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Pre-flight validation: never reaches the network
    #[error("Settings validation failed on {n} field(s)", n = .fields.len())]
    Validation { fields: BTreeMap<String, String> },

    #[error("No dataset loaded. Upload a recording first")]
    NoDataset,

    #[error("An analysis is already in progress")]
    AlreadyProcessing,

    // Transport errors
    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Parse(String),

    // Channel-specific errors
    #[error("Analysis channel is not connected")]
    NotConnected,

    #[error("Analysis timed out after {after_secs}s")]
    Timeout { after_secs: u64 },

    // Profile errors
    #[error("Profile not found. Run 'eegview init' first")]
    ProfileNotFound,

    #[error("Profile already exists at {path}")]
    ProfileExists { path: PathBuf },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {reason}")]
    ConfigInvalid { key: String, reason: String },

    // IO errors (persistence)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl EegviewError {
    /// Build a validation error from field/message pairs.
    pub fn validation<K, V, I>(fields: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        EegviewError::Validation {
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// True for failures resolved locally, before any network attempt.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            EegviewError::InvalidExtension { .. }
                | EegviewError::FileTooLarge { .. }
                | EegviewError::ReadFailed { .. }
                | EegviewError::Validation { .. }
                | EegviewError::NoDataset
                | EegviewError::AlreadyProcessing
        )
    }
}

pub type Result<T> = std::result::Result<T, EegviewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_display_counts_fields() {
        let err = EegviewError::validation([
            ("filterRange", "lower must be less than upper"),
            ("customBands", "required"),
        ]);
        assert_eq!(err.to_string(), "Settings validation failed on 2 field(s)");
    }

    #[test]
    fn local_errors_are_classified() {
        assert!(EegviewError::AlreadyProcessing.is_local());
        assert!(EegviewError::NoDataset.is_local());
        assert!(!EegviewError::NotConnected.is_local());
        assert!(!EegviewError::Network("refused".into()).is_local());
    }
}
