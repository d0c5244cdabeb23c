//! # certigen-client
//!
//! Client for a remote certificate-generation service: collect an image, a
//! spreadsheet of names, an optional TrueType font, and a font size; validate
//! them locally; submit them as one multipart request; and save the returned
//! archive as `certificates.zip`.
//!
//! All of the heavy lifting (rendering names onto the image, parsing the
//! spreadsheet, rasterising the font) happens behind the HTTP endpoint. This
//! crate owns everything in front of it: per-field size limits enforced
//! before a byte leaves the machine, a submission lifecycle with a busy flag
//! that can never stick, and byte-exact materialization of the archive.
//!
//! ## Pipeline Overview
//!
//! ```text
//! form fields
//!  │
//!  ├─ 1. Validate     size thresholds at attach time; presence at submit
//!  ├─ 2. Multipart    parts: image, excel, [font_file], font_size
//!  ├─ 3. Request      one async POST, binary response, no retry
//!  └─ 4. Materialize  atomic write of certificates.zip
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use certigen_client::{FilePart, FormSession, SubmitConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut session = FormSession::new();
//!     session.attach_image(Some(FilePart::from_path("template.png").await?))?;
//!     session.attach_spreadsheet(Some(FilePart::from_path("names.xlsx").await?))?;
//!     session.set_font_size(24)?;
//!
//!     let config = SubmitConfig::default();
//!     let (stats, path) = session.submit_to_file(&config, "certificates.zip").await?;
//!     eprintln!("{} bytes -> {}", stats.archive_bytes, path.display());
//!     Ok(())
//! }
//! ```
//!
//! ## Validation contract
//!
//! | Field       | Part name   | Required | Limit  |
//! |-------------|-------------|----------|--------|
//! | image       | `image`     | yes      | 20 MB  |
//! | spreadsheet | `excel`     | yes      | 4 MB   |
//! | font        | `font_file` | no       | 2 MB   |
//! | font size   | `font_size` | yes      | 1–999  |
//!
//! An oversized file is rejected when attached and only that field is
//! cleared. A form missing a required field never produces a request.
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `certigen` binary (clap + anyhow + indicatif + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! certigen-client = { version = "0.1", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod form;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod session;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{SubmitConfig, SubmitConfigBuilder, DEFAULT_ENDPOINT};
pub use error::{CertigenError, REQUIRED_FIELDS_MESSAGE, SUBMIT_FAILED_MESSAGE};
pub use form::{FieldName, FilePart, FormState, UploadRequest, FONT_SIZE_MAX, FONT_SIZE_MIN};
pub use output::{DownloadArtifact, SubmitOutput, SubmitStats, DEFAULT_ARCHIVE_NAME};
pub use progress::{NoopSubmitObserver, ObserverHandle, SubmitObserver};
pub use session::{FormSession, SubmissionState};
