//! eegview Render - Chart-ready series mapping
//!
//! Maps analysis results and dataset previews into chart figures a drawing
//! layer can consume directly. Each visualization tab guards its own fields,
//! so one malformed series degrades one panel rather than blanking the
//! whole view, and channel colors are a deterministic function of channel
//! count and index so repeated renders are visually stable.

pub mod colors;
pub mod figure;
pub mod format;
pub mod panels;
pub mod preview;
pub mod theme;

pub use colors::{channel_palette, text_color_for, Hsl};
pub use figure::{decimate_points, ChartFigure, ChartKind, ChartSeries, TraceFigure, TraceSeries};
pub use format::format_amplitude;
pub use panels::{render, EmptyReason, Panel, Tab};
pub use preview::{dataset_trace, MAX_TRACE_POINTS};
pub use theme::{chart_chrome, ChartChrome};
