//! Error types for the certigen-client library.
//!
//! [`CertigenError`] spans the whole submission lifecycle, but the variants
//! fall into two groups with different surfacing rules:
//!
//! * **Validation errors** (missing fields, oversized files, out-of-range
//!   font size) are detected synchronously, before any network I/O, and each
//!   carries its own user-facing message.
//!
//! * **Submission errors** (transport failures, non-2xx responses, empty
//!   bodies) stay distinct at the type level for logging and tests, but
//!   [`CertigenError::user_message`] collapses them into one generic retry
//!   message. A form user cannot act differently on a 500 versus a dropped
//!   connection, so the form never distinguishes them.

use crate::form::FieldName;
use std::path::PathBuf;
use thiserror::Error;

/// Generic user-facing message for any failed submission attempt.
///
/// Transport and service failures both map here; see the module docs.
pub const SUBMIT_FAILED_MESSAGE: &str =
    "An error occurred while processing the files. Please try again.";

/// User-facing message shown when required fields are missing.
pub const REQUIRED_FIELDS_MESSAGE: &str =
    "Please upload an image, an Excel file, and select the font size.";

/// All errors returned by the certigen-client library.
#[derive(Debug, Error)]
pub enum CertigenError {
    // ── Acquisition errors ────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("permission denied reading '{path}'")]
    PermissionDenied { path: PathBuf },

    // ── Validation errors ─────────────────────────────────────────────────
    /// One or more required fields are absent; no request was sent.
    #[error("required fields missing: {}", format_fields(.missing))]
    MissingFields { missing: Vec<FieldName> },

    /// A file exceeds its per-field size threshold. The offending field has
    /// been cleared; all other fields are untouched.
    #[error("{field} is {actual_bytes} bytes, over the {max_bytes}-byte limit")]
    FileTooLarge {
        field: FieldName,
        actual_bytes: u64,
        max_bytes: u64,
    },

    /// Font size outside the accepted 1–999 range.
    #[error("font size {value} is out of range (must be 1-999)")]
    FontSizeOutOfRange { value: u32 },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Transport errors ──────────────────────────────────────────────────
    /// The request never produced a response (connection refused, DNS
    /// failure, connection dropped mid-body).
    #[error("request to '{endpoint}' failed: {reason}")]
    RequestFailed { endpoint: String, reason: String },

    /// The configured request timeout elapsed while in flight.
    #[error("request to '{endpoint}' timed out after {secs}s")]
    RequestTimeout { endpoint: String, secs: u64 },

    // ── Service errors ────────────────────────────────────────────────────
    /// The endpoint responded but did not fulfil the request.
    #[error("service responded with HTTP {status}")]
    ServiceFailure { status: u16 },

    /// The endpoint returned 2xx with an empty body; there is no archive to save.
    #[error("service returned an empty response body")]
    EmptyArchive,

    // ── Output errors ─────────────────────────────────────────────────────
    /// Could not write the downloaded archive to disk.
    #[error("failed to write archive '{path}': {source}")]
    ArchiveWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl CertigenError {
    /// True for errors detected before any network I/O.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CertigenError::MissingFields { .. }
                | CertigenError::FileTooLarge { .. }
                | CertigenError::FontSizeOutOfRange { .. }
        )
    }

    /// The message a form user sees for this error.
    ///
    /// Validation errors keep the wording of the original upload form;
    /// transport and service failures collapse into
    /// [`SUBMIT_FAILED_MESSAGE`].
    pub fn user_message(&self) -> String {
        match self {
            CertigenError::MissingFields { .. } => REQUIRED_FIELDS_MESSAGE.to_string(),
            CertigenError::FileTooLarge {
                field, max_bytes, ..
            } => format!(
                "{} size exceeds the maximum limit of {}MB.",
                field.label(),
                max_bytes / (1024 * 1024)
            ),
            CertigenError::FontSizeOutOfRange { .. } => {
                "Font size must be a whole number between 1 and 999.".to_string()
            }
            CertigenError::RequestFailed { .. }
            | CertigenError::RequestTimeout { .. }
            | CertigenError::ServiceFailure { .. }
            | CertigenError::EmptyArchive => SUBMIT_FAILED_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

fn format_fields(fields: &[FieldName]) -> String {
    fields
        .iter()
        .map(|f| f.label())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_too_large_display_names_field() {
        let e = CertigenError::FileTooLarge {
            field: FieldName::Image,
            actual_bytes: 25 * 1024 * 1024,
            max_bytes: 20 * 1024 * 1024,
        };
        let msg = e.to_string();
        assert!(msg.contains("Image"), "got: {msg}");
    }

    #[test]
    fn file_too_large_user_message_matches_form_wording() {
        let image = CertigenError::FileTooLarge {
            field: FieldName::Image,
            actual_bytes: 25 * 1024 * 1024,
            max_bytes: 20 * 1024 * 1024,
        };
        assert_eq!(
            image.user_message(),
            "Image size exceeds the maximum limit of 20MB."
        );

        let excel = CertigenError::FileTooLarge {
            field: FieldName::Spreadsheet,
            actual_bytes: 5 * 1024 * 1024,
            max_bytes: 4 * 1024 * 1024,
        };
        assert_eq!(
            excel.user_message(),
            "Excel size exceeds the maximum limit of 4MB."
        );

        let font = CertigenError::FileTooLarge {
            field: FieldName::Font,
            actual_bytes: 3 * 1024 * 1024,
            max_bytes: 2 * 1024 * 1024,
        };
        assert_eq!(
            font.user_message(),
            "Font file size exceeds the maximum limit of 2MB."
        );
    }

    #[test]
    fn transport_and_service_share_the_generic_message() {
        let transport = CertigenError::RequestFailed {
            endpoint: "http://localhost:1".into(),
            reason: "connection refused".into(),
        };
        let service = CertigenError::ServiceFailure { status: 500 };
        assert_eq!(transport.user_message(), SUBMIT_FAILED_MESSAGE);
        assert_eq!(service.user_message(), SUBMIT_FAILED_MESSAGE);
        assert_eq!(
            CertigenError::EmptyArchive.user_message(),
            SUBMIT_FAILED_MESSAGE
        );
    }

    #[test]
    fn missing_fields_user_message() {
        let e = CertigenError::MissingFields {
            missing: vec![FieldName::Image, FieldName::Font],
        };
        assert_eq!(e.user_message(), REQUIRED_FIELDS_MESSAGE);
        assert!(e.to_string().contains("Image"));
        assert!(e.is_validation());
    }

    #[test]
    fn service_failure_is_not_validation() {
        assert!(!CertigenError::ServiceFailure { status: 502 }.is_validation());
        assert!(!CertigenError::EmptyArchive.is_validation());
    }
}
