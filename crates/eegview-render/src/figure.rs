use serde::{Deserialize, Serialize};

/// Mark type for a category chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
}

/// One label-indexed series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub name: String,

    /// One value per figure label
    pub values: Vec<f64>,

    /// CSS color string
    pub color: String,
}

/// A category chart over a shared label axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartFigure {
    pub title: String,
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
}

/// One time-indexed series of a signal trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceSeries {
    pub name: String,

    /// `[t, value]` pairs
    pub points: Vec<[f64; 2]>,

    /// CSS color string
    pub color: String,
}

/// A raw-signal preview figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceFigure {
    pub title: String,
    pub series: Vec<TraceSeries>,
}

/// Downsample to at most `max_points` by bucketed selection.
pub fn decimate_points(points: &[[f64; 2]], max_points: usize) -> Vec<[f64; 2]> {
    if max_points == 0 || points.len() <= max_points {
        return points.to_vec();
    }
    let bucket_size = points.len() as f64 / max_points as f64;
    let mut result = Vec::with_capacity(max_points);
    for i in 0..max_points {
        let start = (i as f64 * bucket_size).floor() as usize;
        if start >= points.len() {
            break;
        }
        result.push(points[start]);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_inputs_pass_through_unchanged() {
        let points = vec![[0.0, 1.0], [1.0, 2.0]];
        assert_eq!(decimate_points(&points, 10), points);
    }

    #[test]
    fn long_inputs_shrink_to_the_budget() {
        let points: Vec<[f64; 2]> = (0..1000).map(|i| [i as f64, 0.0]).collect();
        let decimated = decimate_points(&points, 100);
        assert_eq!(decimated.len(), 100);
        assert_eq!(decimated[0], [0.0, 0.0]);
        // Monotone in time
        assert!(decimated.windows(2).all(|w| w[0][0] < w[1][0]));
    }
}
