//! File intake: extension and size checks before any bytes are read.

use crate::config::ClientConfig;
use crate::error::{EegviewError, Result};
use crate::models::{FileKind, PendingFile, UploadedFile};
use std::path::Path;

/// Validate a selected file against the allow-list and the configured
/// upload ceiling.
///
/// Purely local: no file contents are touched, only metadata. Rejections
/// therefore cost nothing regardless of file size.
pub async fn inspect(path: &Path, config: &ClientConfig) -> Result<PendingFile> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_string();

    let kind = FileKind::from_extension(&extension).ok_or_else(|| {
        EegviewError::InvalidExtension {
            extension,
            allowed: FileKind::allowed_list(),
        }
    })?;

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("recording")
        .to_string();

    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|source| EegviewError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
    let size_bytes = metadata.len();

    if size_bytes > config.max_upload_bytes {
        return Err(EegviewError::FileTooLarge {
            name,
            size_bytes,
            max_bytes: config.max_upload_bytes,
        });
    }

    Ok(PendingFile {
        path: path.to_path_buf(),
        name,
        kind,
        size_bytes,
    })
}

/// Read a validated file into memory.
pub async fn read(pending: PendingFile) -> Result<UploadedFile> {
    let bytes = tokio::fs::read(&pending.path)
        .await
        .map_err(|source| EegviewError::ReadFailed {
            path: pending.path.clone(),
            source,
        })?;

    Ok(UploadedFile {
        name: pending.name,
        kind: pending.kind,
        size_bytes: pending.size_bytes,
        bytes,
    })
}

/// Validate and read in one step.
pub async fn prepare(path: &Path, config: &ClientConfig) -> Result<UploadedFile> {
    let pending = inspect(path, config).await?;
    read(pending).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use std::io::Write;

    fn tiny_config(max_upload_bytes: u64) -> ClientConfig {
        ClientConfig {
            max_upload_bytes,
            ..ClientConfig::default()
        }
    }

    #[tokio::test]
    async fn disallowed_extension_is_rejected_without_reading() {
        // The path does not exist: if the extension check did not short
        // circuit, this would surface as ReadFailed instead.
        let err = inspect(Path::new("/nonexistent/recording.fif"), &ClientConfig::default())
            .await
            .unwrap_err();
        match err {
            EegviewError::InvalidExtension { extension, allowed } => {
                assert_eq!(extension, "fif");
                assert!(allowed.contains(".edf"));
            }
            other => panic!("expected InvalidExtension, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn extension_check_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rec.EDF");
        std::fs::File::create(&path).unwrap().write_all(b"0123").unwrap();

        let pending = inspect(&path, &ClientConfig::default()).await.unwrap();
        assert_eq!(pending.kind, FileKind::Edf);
        assert_eq!(pending.size_bytes, 4);
    }

    #[tokio::test]
    async fn oversize_file_is_rejected_before_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.edf");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(&[0u8; 64])
            .unwrap();

        let err = inspect(&path, &tiny_config(16)).await.unwrap_err();
        match err {
            EegviewError::FileTooLarge {
                size_bytes,
                max_bytes,
                ..
            } => {
                assert_eq!(size_bytes, 64);
                assert_eq!(max_bytes, 16);
            }
            other => panic!("expected FileTooLarge, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn prepare_loads_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rec.bdf");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"signal")
            .unwrap();

        let file = prepare(&path, &ClientConfig::default()).await.unwrap();
        assert_eq!(file.name, "rec.bdf");
        assert_eq!(file.bytes, b"signal");
    }

    #[tokio::test]
    async fn missing_file_surfaces_read_failed() {
        let err = inspect(Path::new("/nonexistent/recording.edf"), &ClientConfig::default())
            .await
            .unwrap_err();
        assert!(matches!(err, EegviewError::ReadFailed { .. }));
    }
}
