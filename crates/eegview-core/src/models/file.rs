use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Recording formats the backend accepts.
///
/// The enum is the extension allow-list: anything that does not map to a
/// variant is rejected at intake, before any bytes are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Edf,
    Bdf,
    Gdf,
    Set,
    Eeg,
}

impl FileKind {
    pub const ALL: [FileKind; 5] = [
        FileKind::Edf,
        FileKind::Bdf,
        FileKind::Gdf,
        FileKind::Set,
        FileKind::Eeg,
    ];

    /// Match an extension (without the dot) case-insensitively.
    pub fn from_extension(ext: &str) -> Option<FileKind> {
        match ext.to_lowercase().as_str() {
            "edf" => Some(FileKind::Edf),
            "bdf" => Some(FileKind::Bdf),
            "gdf" => Some(FileKind::Gdf),
            "set" => Some(FileKind::Set),
            "eeg" => Some(FileKind::Eeg),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            FileKind::Edf => "edf",
            FileKind::Bdf => "bdf",
            FileKind::Gdf => "gdf",
            FileKind::Set => "set",
            FileKind::Eeg => "eeg",
        }
    }

    /// The allow-list rendered for error messages: ".edf, .bdf, ..."
    pub fn allowed_list() -> String {
        Self::ALL
            .iter()
            .map(|k| format!(".{}", k.extension()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

/// A selected file that passed extension and size checks but has not been
/// read yet.
#[derive(Debug, Clone)]
pub struct PendingFile {
    /// Path on the local filesystem
    pub path: PathBuf,

    /// File name as presented to the backend
    pub name: String,

    /// Recording format
    pub kind: FileKind,

    /// On-disk size
    pub size_bytes: u64,
}

/// A validated file with its bytes in memory, ready for upload.
///
/// Discarded after a successful upload or when the selection is reset.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub name: String,
    pub kind: FileKind,
    pub size_bytes: u64,
    pub bytes: Vec<u8>,
}
