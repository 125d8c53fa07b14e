//! Domain models shared across the pipeline

pub mod connection;
pub mod dataset;
pub mod file;
pub mod result;
pub mod settings;
pub mod theme;

pub use connection::{ConnectionState, ReconnectPolicy};
pub use dataset::DatasetDescriptor;
pub use file::{FileKind, PendingFile, UploadedFile};
pub use result::{AnalysisFeatures, AnalysisResult, AnalysisStatus};
pub use settings::{
    parse_bands, AdvancedSettings, AnalysisSettings, AnalysisType, Band, FilterType, NotchFreq,
};
pub use theme::{ResolvedTheme, ThemePreference};
