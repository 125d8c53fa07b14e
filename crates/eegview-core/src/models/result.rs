use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome discriminator on analysis responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Success,
    Error,
    #[serde(other)]
    Unknown,
}

/// Feature payload returned by a successful analysis.
///
/// Every sub-field is optional: the renderer guards each tab independently,
/// so a response missing `connectivity` still renders band powers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisFeatures {
    /// Channel names, in the order per-channel vectors are indexed
    #[serde(default)]
    pub channels: Option<Vec<String>>,

    /// Band name -> per-channel power
    #[serde(default)]
    pub band_powers: Option<BTreeMap<String, Vec<f64>>>,

    /// Temporal feature name (mean, std, kurtosis, skewness) -> per-channel
    /// value
    #[serde(default)]
    pub temporal: Option<BTreeMap<String, Vec<f64>>>,

    /// Channel-by-channel correlation matrix
    #[serde(default)]
    pub connectivity: Option<Vec<Vec<f64>>>,
}

/// A complete analysis response.
///
/// Transient: a new successful analysis replaces the previous result
/// entirely, results are never merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub status: AnalysisStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default)]
    pub features: Option<AnalysisFeatures>,
}

impl AnalysisResult {
    /// Channel names, when the payload carries them.
    pub fn channel_names(&self) -> Option<&[String]> {
        self.features
            .as_ref()
            .and_then(|f| f.channels.as_deref())
    }
}
