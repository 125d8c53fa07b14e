use chrono::{DateTime, Utc};
use eegview_core::models::{AnalysisResult, DatasetDescriptor};
use serde::{Deserialize, Serialize};

/// Persisted dataset state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSnapshot {
    /// When the upload completed
    pub saved_at: DateTime<Utc>,

    pub descriptor: DatasetDescriptor,
}

/// Persisted analysis result state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultSnapshot {
    /// When the analysis completed
    pub saved_at: DateTime<Utc>,

    pub result: AnalysisResult,
}
