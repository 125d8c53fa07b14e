use crate::error::{EegviewError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Normalized description of an uploaded recording, as returned by the
/// backend after a successful upload.
///
/// Immutable once constructed; a new upload replaces the descriptor wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetDescriptor {
    /// Server-side path identifying the stored recording
    pub file_path: String,

    /// Number of channels in the recording
    pub channel_count: usize,

    /// Shared time axis, in seconds
    pub time: Vec<f64>,

    /// Per-channel samples, keyed by channel name. Every sample vector has
    /// the same length as `time`.
    pub channels: BTreeMap<String, Vec<f64>>,
}

impl DatasetDescriptor {
    /// Structural validation applied before a server response is accepted.
    ///
    /// Checks that the declared channel count matches the channel map and
    /// that every channel is sampled on the shared time axis.
    pub fn validate_shape(&self) -> Result<()> {
        if self.channel_count != self.channels.len() {
            return Err(EegviewError::Parse(format!(
                "channel_count is {} but {} channels were provided",
                self.channel_count,
                self.channels.len()
            )));
        }
        let expected = self.time.len();
        for (name, samples) in &self.channels {
            if samples.len() != expected {
                return Err(EegviewError::Parse(format!(
                    "channel '{}' has {} samples but the time axis has {}",
                    name,
                    samples.len(),
                    expected
                )));
            }
        }
        Ok(())
    }

    pub fn channel_names(&self) -> Vec<&str> {
        self.channels.keys().map(String::as_str).collect()
    }

    pub fn sample_count(&self) -> usize {
        self.time.len()
    }

    pub fn duration_secs(&self) -> f64 {
        match (self.time.first(), self.time.last()) {
            (Some(first), Some(last)) => last - first,
            _ => 0.0,
        }
    }
}
