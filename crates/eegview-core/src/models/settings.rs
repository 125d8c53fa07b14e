use crate::error::{EegviewError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Mains interference filter selection.
///
/// Serialized as the plain frequency (0 = disabled) to match the backend
/// contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum NotchFreq {
    Off,
    Hz50,
    Hz60,
}

impl From<NotchFreq> for u16 {
    fn from(value: NotchFreq) -> u16 {
        match value {
            NotchFreq::Off => 0,
            NotchFreq::Hz50 => 50,
            NotchFreq::Hz60 => 60,
        }
    }
}

impl TryFrom<u16> for NotchFreq {
    type Error = String;

    fn try_from(value: u16) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(NotchFreq::Off),
            50 => Ok(NotchFreq::Hz50),
            60 => Ok(NotchFreq::Hz60),
            other => Err(format!("invalid notch frequency {}: use 0, 50, or 60", other)),
        }
    }
}

impl fmt::Display for NotchFreq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotchFreq::Off => write!(f, "off"),
            NotchFreq::Hz50 => write!(f, "50 Hz"),
            NotchFreq::Hz60 => write!(f, "60 Hz"),
        }
    }
}

/// Analysis depth requested from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisType {
    /// Full analysis including time-frequency decomposition, ERPs, and
    /// connectivity metrics
    Comprehensive,
    /// Basic preprocessing and power spectrum analysis
    Quick,
    /// Caller-specified frequency bands and parameters
    Custom,
}

impl AnalysisType {
    pub fn description(&self) -> &'static str {
        match self {
            AnalysisType::Comprehensive => {
                "Full analysis including time-frequency decomposition, ERPs, and connectivity metrics"
            }
            AnalysisType::Quick => "Basic preprocessing and power spectrum analysis",
            AnalysisType::Custom => "Specify custom frequency bands and analysis parameters",
        }
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisType::Comprehensive => write!(f, "comprehensive"),
            AnalysisType::Quick => write!(f, "quick"),
            AnalysisType::Custom => write!(f, "custom"),
        }
    }
}

/// Bandpass filter family applied server-side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    Butterworth,
    Chebyshev,
    Elliptic,
    Bessel,
}

/// Advanced preprocessing parameters, forwarded to the backend unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvancedSettings {
    pub ica_components: u32,
    pub epoch_length: f64,
    pub overlap_percentage: f64,
    pub baseline_correction: bool,
    pub artifact_rejection_threshold: f64,
    pub interpolate_channels: bool,
    pub filter_order: u32,
    pub filter_type: FilterType,
}

impl Default for AdvancedSettings {
    fn default() -> Self {
        Self {
            ica_components: 20,
            epoch_length: 2.0,
            overlap_percentage: 50.0,
            baseline_correction: true,
            artifact_rejection_threshold: 100.0,
            interpolate_channels: true,
            filter_order: 4,
            filter_type: FilterType::Butterworth,
        }
    }
}

/// Analysis job configuration.
///
/// Persisted across sessions and validated locally before every submission;
/// a failed validation never reaches the network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSettings {
    /// Bandpass range in Hz, low then high
    pub filter_range: [f64; 2],

    pub notch_freq: NotchFreq,

    pub analysis_type: AnalysisType,

    /// Band list in `name:start-end,...` form. Required when
    /// `analysis_type` is `Custom`, optional otherwise.
    #[serde(default)]
    pub custom_bands: String,

    /// Apply Independent Component Analysis for artifact removal
    #[serde(rename = "applyICA")]
    pub apply_ica: bool,

    #[serde(rename = "advancedSettings", default)]
    pub advanced: AdvancedSettings,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            filter_range: [1.0, 40.0],
            notch_freq: NotchFreq::Hz50,
            analysis_type: AnalysisType::Comprehensive,
            custom_bands: String::new(),
            apply_ica: true,
            advanced: AdvancedSettings::default(),
        }
    }
}

impl AnalysisSettings {
    /// Local pre-flight validation.
    ///
    /// Returns a field-keyed message map so a form can attach each message
    /// to its input. A `Validation` error here means no network call was
    /// attempted.
    pub fn validate(&self) -> Result<()> {
        let mut fields = BTreeMap::new();

        if self.filter_range[0] >= self.filter_range[1] {
            fields.insert(
                "filterRange".to_string(),
                "Lower frequency must be less than upper frequency".to_string(),
            );
        }

        if self.analysis_type == AnalysisType::Custom && self.custom_bands.is_empty() {
            fields.insert(
                "customBands".to_string(),
                "Custom frequency bands are required".to_string(),
            );
        } else if !self.custom_bands.is_empty() {
            if let Err(message) = parse_bands(&self.custom_bands) {
                fields.insert("customBands".to_string(), message);
            }
        }

        if fields.is_empty() {
            Ok(())
        } else {
            Err(EegviewError::Validation { fields })
        }
    }

    /// Parsed band list, if one is supplied and well-formed.
    pub fn bands(&self) -> Option<Vec<Band>> {
        if self.custom_bands.is_empty() {
            None
        } else {
            parse_bands(&self.custom_bands).ok()
        }
    }
}

/// A named frequency band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    pub name: String,
    pub low_hz: u32,
    pub high_hz: u32,
}

/// Parse a `name:start-end(,name:start-end)*` band list.
///
/// Names are alphanumeric/underscore identifiers, bounds are integers in Hz
/// with start < end. The error string is user-facing and mirrors the form's
/// inline hint.
pub fn parse_bands(spec: &str) -> std::result::Result<Vec<Band>, String> {
    const FORMAT_HINT: &str = "Invalid format. Use: band:start-end,band:start-end";

    let mut bands = Vec::new();
    for entry in spec.split(',') {
        let (name, range) = entry.split_once(':').ok_or(FORMAT_HINT)?;
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(FORMAT_HINT.to_string());
        }
        let (low, high) = range.split_once('-').ok_or(FORMAT_HINT)?;
        let low_hz: u32 = low.parse().map_err(|_| FORMAT_HINT.to_string())?;
        let high_hz: u32 = high.parse().map_err(|_| FORMAT_HINT.to_string())?;
        if low_hz >= high_hz {
            return Err(format!(
                "Band '{}': start must be less than end ({}-{})",
                name, low_hz, high_hz
            ));
        }
        bands.push(Band {
            name: name.to_string(),
            low_hz,
            high_hz,
        });
    }
    Ok(bands)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_form_defaults() {
        let s = AnalysisSettings::default();
        assert_eq!(s.filter_range, [1.0, 40.0]);
        assert_eq!(s.notch_freq, NotchFreq::Hz50);
        assert_eq!(s.analysis_type, AnalysisType::Comprehensive);
        assert!(s.apply_ica);
        assert_eq!(s.advanced.ica_components, 20);
        assert_eq!(s.advanced.filter_type, FilterType::Butterworth);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn inverted_filter_range_is_rejected_locally() {
        let s = AnalysisSettings {
            filter_range: [40.0, 40.0],
            ..Default::default()
        };
        let err = s.validate().unwrap_err();
        assert!(err.is_local());
        match err {
            EegviewError::Validation { fields } => {
                assert!(fields.contains_key("filterRange"));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn custom_type_requires_bands() {
        let s = AnalysisSettings {
            analysis_type: AnalysisType::Custom,
            custom_bands: String::new(),
            ..Default::default()
        };
        let err = s.validate().unwrap_err();
        match err {
            EegviewError::Validation { fields } => {
                assert_eq!(
                    fields.get("customBands").map(String::as_str),
                    Some("Custom frequency bands are required")
                );
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn well_formed_band_list_passes() {
        let s = AnalysisSettings {
            analysis_type: AnalysisType::Custom,
            custom_bands: "delta:1-4,theta:4-8".to_string(),
            ..Default::default()
        };
        assert!(s.validate().is_ok());
        let bands = s.bands().unwrap();
        assert_eq!(bands.len(), 2);
        assert_eq!(bands[0].name, "delta");
        assert_eq!(bands[1].low_hz, 4);
        assert_eq!(bands[1].high_hz, 8);
    }

    #[test]
    fn malformed_band_lists_are_rejected() {
        for bad in ["delta", "delta:1", "delta:1-", ":1-4", "delta:4-1", "delta:1-4,"] {
            assert!(parse_bands(bad).is_err(), "expected rejection of {bad:?}");
        }
    }

    #[test]
    fn settings_round_trip_through_json() {
        let s = AnalysisSettings {
            analysis_type: AnalysisType::Custom,
            custom_bands: "alpha:8-13".to_string(),
            notch_freq: NotchFreq::Hz60,
            ..Default::default()
        };
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"applyICA\""));
        assert!(json.contains("\"notchFreq\":60"));
        let back: AnalysisSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }
}
