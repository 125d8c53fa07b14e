//! Raw-signal preview of an uploaded dataset.

use crate::colors::channel_palette;
use crate::figure::{decimate_points, TraceFigure, TraceSeries};
use eegview_core::models::DatasetDescriptor;

/// Point budget per channel before decimation kicks in.
pub const MAX_TRACE_POINTS: usize = 2048;

/// One line series per channel over the shared time axis.
pub fn dataset_trace(descriptor: &DatasetDescriptor, max_points: usize) -> TraceFigure {
    let palette = channel_palette(descriptor.channels.len());
    let series = descriptor
        .channels
        .iter()
        .enumerate()
        .map(|(idx, (name, samples))| {
            let points: Vec<[f64; 2]> = descriptor
                .time
                .iter()
                .zip(samples)
                .map(|(t, v)| [*t, *v])
                .collect();
            TraceSeries {
                name: name.clone(),
                points: decimate_points(&points, max_points),
                color: palette[idx].to_css(),
            }
        })
        .collect();

    TraceFigure {
        title: descriptor.file_path.clone(),
        series,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, HashSet};

    #[test]
    fn one_series_per_channel_with_distinct_colors() {
        let n = 256;
        let mut channels = BTreeMap::new();
        channels.insert("C1".to_string(), (0..n).map(|i| i as f64).collect());
        channels.insert("C2".to_string(), (0..n).map(|i| -(i as f64)).collect());
        let descriptor = DatasetDescriptor {
            file_path: "uploads/rec.edf".to_string(),
            channel_count: 2,
            time: (0..n).map(|i| i as f64 * 0.004).collect(),
            channels,
        };

        let figure = dataset_trace(&descriptor, MAX_TRACE_POINTS);
        assert_eq!(figure.series.len(), 2);
        for series in &figure.series {
            assert_eq!(series.points.len(), n);
        }
        let colors: HashSet<&str> = figure.series.iter().map(|s| s.color.as_str()).collect();
        assert_eq!(colors.len(), 2);
    }

    #[test]
    fn long_recordings_are_decimated() {
        let n = 10_000;
        let mut channels = BTreeMap::new();
        channels.insert("Cz".to_string(), vec![0.0; n]);
        let descriptor = DatasetDescriptor {
            file_path: "uploads/long.edf".to_string(),
            channel_count: 1,
            time: (0..n).map(|i| i as f64).collect(),
            channels,
        };

        let figure = dataset_trace(&descriptor, 512);
        assert_eq!(figure.series[0].points.len(), 512);
    }
}
