//! Archive materialization: turn the response body into a file on disk.
//!
//! Uses atomic write (temp file + rename) so a crash or write failure never
//! leaves a truncated `certificates.zip` behind — the archive either appears
//! complete or not at all. Content is written byte-for-byte; the zip is
//! opaque to this crate.

use crate::error::CertigenError;
use crate::output::DownloadArtifact;
use std::path::{Path, PathBuf};
use tracing::info;

/// Write the archive to `path`, creating parent directories as needed.
///
/// Returns the final path. An existing file at `path` is replaced.
///
/// # Errors
/// [`CertigenError::ArchiveWriteFailed`] on any filesystem failure; the
/// temp file is best-effort removed so nothing stale lingers.
pub async fn write_archive(
    artifact: &DownloadArtifact,
    path: impl AsRef<Path>,
) -> Result<PathBuf, CertigenError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| write_failed(path, e))?;
        }
    }

    let tmp_path = tmp_path_for(path);
    if let Err(e) = tokio::fs::write(&tmp_path, &artifact.bytes).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(write_failed(path, e));
    }

    if let Err(e) = tokio::fs::rename(&tmp_path, path).await {
        let _ = tokio::fs::remove_file(&tmp_path).await;
        return Err(write_failed(path, e));
    }

    info!(
        "Wrote {} bytes to {}",
        artifact.bytes.len(),
        path.display()
    );
    Ok(path.to_path_buf())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "archive".into());
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_failed(path: &Path, source: std::io::Error) -> CertigenError {
    CertigenError::ArchiveWriteFailed {
        path: path.to_path_buf(),
        source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn artifact(bytes: Vec<u8>) -> DownloadArtifact {
        DownloadArtifact {
            file_name: "certificates.zip".to_string(),
            bytes,
        }
    }

    #[tokio::test]
    async fn writes_bytes_exactly() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("certificates.zip");
        // Arbitrary binary content including zip magic and a NUL run.
        let body = [b"PK\x03\x04".as_slice(), &[0u8; 64], &[0xFF, 0x00, 0x7F]].concat();

        let written = write_archive(&artifact(body.clone()), &target).await.unwrap();
        assert_eq!(written, target);
        assert_eq!(std::fs::read(&target).unwrap(), body);
    }

    #[tokio::test]
    async fn creates_missing_parent_directories() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("out/deep/certificates.zip");
        write_archive(&artifact(vec![1, 2, 3]), &target).await.unwrap();
        assert_eq!(std::fs::read(&target).unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn replaces_existing_archive() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("certificates.zip");
        std::fs::write(&target, b"stale").unwrap();

        write_archive(&artifact(vec![9, 9]), &target).await.unwrap();
        assert_eq!(std::fs::read(&target).unwrap(), vec![9, 9]);
    }

    #[tokio::test]
    async fn leaves_no_temp_file_behind() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("certificates.zip");
        write_archive(&artifact(vec![5; 10]), &target).await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec!["certificates.zip"]);
    }
}
