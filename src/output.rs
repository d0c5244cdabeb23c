//! Output types returned by a successful submission.

use serde::{Deserialize, Serialize};

/// Default file name for the downloaded archive.
pub const DEFAULT_ARCHIVE_NAME: &str = "certificates.zip";

/// The binary archive returned by the service, plus its suggested file name.
///
/// Ephemeral: produced by the submission pipeline, consumed by
/// [`crate::pipeline::materialize::write_archive`]. The bytes are exactly
/// the response body — no encoding transform is applied anywhere between the
/// socket and the file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadArtifact {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl DownloadArtifact {
    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Result of one successful submission.
#[derive(Debug, Clone)]
pub struct SubmitOutput {
    /// The downloaded archive.
    pub artifact: DownloadArtifact,
    /// Timing and size figures for the attempt.
    pub stats: SubmitStats,
}

/// Timing and size figures for one submission attempt.
///
/// Serializable for the CLI's `--json` mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitStats {
    /// Endpoint the request was sent to.
    pub endpoint: String,
    /// Bytes of file payload uploaded (excludes multipart framing).
    pub request_bytes: u64,
    /// Bytes of archive received.
    pub archive_bytes: u64,
    /// Wall-clock duration of the round trip in milliseconds.
    pub duration_ms: u64,
}
