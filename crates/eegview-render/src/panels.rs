//! Per-tab panel builders with isolated guards.

use crate::colors::channel_palette;
use crate::figure::{ChartFigure, ChartKind, ChartSeries};
use eegview_core::models::{AnalysisFeatures, AnalysisResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Visualization tabs. Each tab guards its own required sub-fields: a
/// response missing `connectivity` still renders band powers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tab {
    BandPowers,
    Temporal,
    Connectivity,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::BandPowers, Tab::Temporal, Tab::Connectivity];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::BandPowers => "Band Powers",
            Tab::Temporal => "Temporal Features",
            Tab::Connectivity => "Connectivity",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Why a panel has nothing to draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmptyReason {
    /// The result carries no data for this panel
    NoData,
    /// The result names no channels
    NoChannels,
    /// The data is present but its dimensions disagree
    MalformedShape(String),
}

impl fmt::Display for EmptyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyReason::NoData => write!(f, "No analysis data available for this panel"),
            EmptyReason::NoChannels => write!(f, "The analysis result contains no channels"),
            EmptyReason::MalformedShape(detail) => {
                write!(f, "Unexpected data shape: {}", detail)
            }
        }
    }
}

/// A rendered panel: either a chart or a typed empty/warning state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Panel {
    Chart(ChartFigure),
    Empty(EmptyReason),
}

impl Panel {
    pub fn as_chart(&self) -> Option<&ChartFigure> {
        match self {
            Panel::Chart(figure) => Some(figure),
            Panel::Empty(_) => None,
        }
    }
}

/// Render one tab of an analysis result.
pub fn render(result: &AnalysisResult, tab: Tab) -> Panel {
    let features = match &result.features {
        Some(features) => features,
        None => return Panel::Empty(EmptyReason::NoData),
    };
    let channels = match &features.channels {
        Some(channels) if !channels.is_empty() => channels.as_slice(),
        Some(_) => return Panel::Empty(EmptyReason::NoChannels),
        None => return Panel::Empty(EmptyReason::NoChannels),
    };

    match tab {
        Tab::BandPowers => band_powers_panel(features, channels),
        Tab::Temporal => temporal_panel(features, channels),
        Tab::Connectivity => connectivity_panel(features, channels),
    }
}

/// One bar series per channel across the band labels.
fn band_powers_panel(features: &AnalysisFeatures, channels: &[String]) -> Panel {
    let band_powers = match &features.band_powers {
        Some(bands) if !bands.is_empty() => bands,
        _ => return Panel::Empty(EmptyReason::NoData),
    };

    if let Some(detail) = shape_mismatch(band_powers, channels.len()) {
        return Panel::Empty(EmptyReason::MalformedShape(detail));
    }

    let palette = channel_palette(channels.len());
    let labels: Vec<String> = band_powers.keys().cloned().collect();
    let series = channels
        .iter()
        .enumerate()
        .map(|(idx, channel)| ChartSeries {
            name: channel.clone(),
            values: band_powers.values().map(|powers| powers[idx]).collect(),
            color: palette[idx].to_css(),
        })
        .collect();

    Panel::Chart(ChartFigure {
        title: "EEG Band Powers per Channel".to_string(),
        kind: ChartKind::Bar,
        labels,
        series,
    })
}

/// One line series per temporal feature across the channel labels.
fn temporal_panel(features: &AnalysisFeatures, channels: &[String]) -> Panel {
    let temporal = match &features.temporal {
        Some(temporal) if !temporal.is_empty() => temporal,
        _ => return Panel::Empty(EmptyReason::NoData),
    };

    if let Some(detail) = shape_mismatch(temporal, channels.len()) {
        return Panel::Empty(EmptyReason::MalformedShape(detail));
    }

    let palette = channel_palette(temporal.len());
    let series = temporal
        .iter()
        .enumerate()
        .map(|(idx, (feature, values))| ChartSeries {
            name: feature.clone(),
            values: values.clone(),
            color: palette[idx].to_css(),
        })
        .collect();

    Panel::Chart(ChartFigure {
        title: "Temporal Features per Channel".to_string(),
        kind: ChartKind::Line,
        labels: channels.to_vec(),
        series,
    })
}

/// One bar series per channel row of the correlation matrix.
fn connectivity_panel(features: &AnalysisFeatures, channels: &[String]) -> Panel {
    let connectivity = match &features.connectivity {
        Some(matrix) if !matrix.is_empty() => matrix,
        _ => return Panel::Empty(EmptyReason::NoData),
    };

    if connectivity.len() != channels.len() {
        return Panel::Empty(EmptyReason::MalformedShape(format!(
            "connectivity has {} rows for {} channels",
            connectivity.len(),
            channels.len()
        )));
    }
    for (idx, row) in connectivity.iter().enumerate() {
        if row.len() != channels.len() {
            return Panel::Empty(EmptyReason::MalformedShape(format!(
                "connectivity row {} has {} columns for {} channels",
                idx,
                row.len(),
                channels.len()
            )));
        }
    }

    let palette = channel_palette(channels.len());
    let series = channels
        .iter()
        .enumerate()
        .map(|(idx, channel)| ChartSeries {
            name: channel.clone(),
            values: connectivity[idx].clone(),
            color: palette[idx].to_css(),
        })
        .collect();

    Panel::Chart(ChartFigure {
        title: "Channel Connectivity Matrix".to_string(),
        kind: ChartKind::Bar,
        labels: channels.to_vec(),
        series,
    })
}

/// Check that every per-channel vector matches the channel count.
fn shape_mismatch(map: &BTreeMap<String, Vec<f64>>, channel_count: usize) -> Option<String> {
    for (name, values) in map {
        if values.len() != channel_count {
            return Some(format!(
                "'{}' has {} values for {} channels",
                name,
                values.len(),
                channel_count
            ));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use eegview_core::models::AnalysisStatus;
    use std::collections::HashSet;

    fn result_with(features: Option<AnalysisFeatures>) -> AnalysisResult {
        AnalysisResult {
            status: AnalysisStatus::Success,
            message: None,
            features,
        }
    }

    fn full_features() -> AnalysisFeatures {
        let mut band_powers = BTreeMap::new();
        band_powers.insert("alpha".to_string(), vec![1.0, 2.0]);
        band_powers.insert("delta".to_string(), vec![3.0, 4.0]);
        let mut temporal = BTreeMap::new();
        temporal.insert("mean".to_string(), vec![0.1, 0.2]);
        temporal.insert("std".to_string(), vec![0.3, 0.4]);
        AnalysisFeatures {
            channels: Some(vec!["C3".to_string(), "C4".to_string()]),
            band_powers: Some(band_powers),
            temporal: Some(temporal),
            connectivity: Some(vec![vec![1.0, 0.5], vec![0.5, 1.0]]),
        }
    }

    #[test]
    fn band_powers_build_one_series_per_channel() {
        let panel = render(&result_with(Some(full_features())), Tab::BandPowers);
        let figure = panel.as_chart().expect("chart");
        assert_eq!(figure.kind, ChartKind::Bar);
        assert_eq!(figure.labels, vec!["alpha", "delta"]);
        assert_eq!(figure.series.len(), 2);
        assert_eq!(figure.series[0].name, "C3");
        assert_eq!(figure.series[0].values, vec![1.0, 3.0]);
        assert_eq!(figure.series[1].values, vec![2.0, 4.0]);

        let colors: HashSet<&str> =
            figure.series.iter().map(|s| s.color.as_str()).collect();
        assert_eq!(colors.len(), 2, "channel colors must be distinct");
    }

    #[test]
    fn repeated_renders_are_identical() {
        let result = result_with(Some(full_features()));
        assert_eq!(
            render(&result, Tab::BandPowers),
            render(&result, Tab::BandPowers)
        );
    }

    #[test]
    fn missing_features_render_no_data() {
        let panel = render(&result_with(None), Tab::BandPowers);
        assert_eq!(panel, Panel::Empty(EmptyReason::NoData));
    }

    #[test]
    fn empty_channel_list_renders_no_channels() {
        let features = AnalysisFeatures {
            channels: Some(vec![]),
            ..full_features()
        };
        for tab in Tab::ALL {
            assert_eq!(
                render(&result_with(Some(features.clone())), tab),
                Panel::Empty(EmptyReason::NoChannels)
            );
        }
    }

    #[test]
    fn empty_band_power_map_is_a_warning_not_a_panic() {
        let features = AnalysisFeatures {
            band_powers: Some(BTreeMap::new()),
            ..full_features()
        };
        let panel = render(&result_with(Some(features)), Tab::BandPowers);
        assert_eq!(panel, Panel::Empty(EmptyReason::NoData));
    }

    #[test]
    fn shape_mismatch_degrades_only_its_own_tab() {
        let mut features = full_features();
        features
            .band_powers
            .as_mut()
            .unwrap()
            .insert("beta".to_string(), vec![9.0]);
        let result = result_with(Some(features));

        assert!(matches!(
            render(&result, Tab::BandPowers),
            Panel::Empty(EmptyReason::MalformedShape(_))
        ));
        // The other tabs are untouched by the bad band vector.
        assert!(render(&result, Tab::Temporal).as_chart().is_some());
        assert!(render(&result, Tab::Connectivity).as_chart().is_some());
    }

    #[test]
    fn non_square_connectivity_is_malformed() {
        let mut features = full_features();
        features.connectivity = Some(vec![vec![1.0, 0.5]]);
        assert!(matches!(
            render(&result_with(Some(features)), Tab::Connectivity),
            Panel::Empty(EmptyReason::MalformedShape(_))
        ));
    }

    #[test]
    fn missing_connectivity_degrades_to_no_data() {
        let mut features = full_features();
        features.connectivity = None;
        let result = result_with(Some(features));
        assert_eq!(
            render(&result, Tab::Connectivity),
            Panel::Empty(EmptyReason::NoData)
        );
        assert!(render(&result, Tab::BandPowers).as_chart().is_some());
    }

    #[test]
    fn temporal_series_follow_feature_order() {
        let panel = render(&result_with(Some(full_features())), Tab::Temporal);
        let figure = panel.as_chart().expect("chart");
        assert_eq!(figure.kind, ChartKind::Line);
        assert_eq!(figure.labels, vec!["C3", "C4"]);
        assert_eq!(figure.series[0].name, "mean");
        assert_eq!(figure.series[1].name, "std");
    }
}
