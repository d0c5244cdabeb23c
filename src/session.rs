//! One form session: state, validation policy, and the submit lifecycle.
//!
//! [`FormSession`] owns a [`FormState`] and drives it through the
//! submission state machine:
//!
//! ```text
//! Idle ──▶ Validating ──▶ InFlight ──▶ Succeeded
//!              │                           │
//!              └──────────▶ Failed ◀───────┘
//! ```
//!
//! `InFlight` is entered only when validation passed; a validation failure
//! goes straight to `Failed` without any network I/O. Both terminal states
//! leave the form populated and resubmittable — there is no page-reload
//! equivalent anywhere in this crate.
//!
//! ## The busy flag
//!
//! `busy` is raised when a request goes in flight and cleared by a drop
//! guard, so it is false after success, after failure, and after a panic in
//! the response path. `submit` takes `&mut self`, which is the re-submission
//! gate: a session cannot start a second request while one is in flight.

use crate::config::SubmitConfig;
use crate::error::CertigenError;
use crate::form::{FilePart, FormState};
use crate::output::{SubmitOutput, SubmitStats};
use crate::pipeline::{materialize, request, validate};
use crate::pipeline::validate::SizeLimit;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::warn;

/// Where a session is in the submission lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    /// No submission attempted yet, or the form was reset.
    #[default]
    Idle,
    /// A submit attempt is running its pre-flight checks.
    Validating,
    /// The request has been sent; no response yet.
    InFlight,
    /// The archive was received.
    Succeeded,
    /// Validation, transport, or the service failed.
    Failed,
}

impl SubmissionState {
    /// True for states that end a submission attempt.
    pub fn is_terminal(&self) -> bool {
        matches!(self, SubmissionState::Succeeded | SubmissionState::Failed)
    }
}

/// Raises the busy flag for the lifetime of one in-flight request.
///
/// Clearing happens in `Drop`, so it runs on every exit path, including an
/// unwind out of the response handling.
struct BusyGuard(Arc<AtomicBool>);

impl BusyGuard {
    fn engage(flag: Arc<AtomicBool>) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// An explicit, owned form session.
///
/// Replaces the module-scope mutable fields of the original form with a
/// value the caller owns and passes around. Attach methods apply the size
/// validator and, on rejection, clear only the offending field while
/// recording the user-visible message.
#[derive(Default)]
pub struct FormSession {
    form: FormState,
    state: SubmissionState,
    busy: Arc<AtomicBool>,
    last_error: Option<String>,
}

impl FormSession {
    pub fn new() -> Self {
        Self::default()
    }

    // ── State accessors ───────────────────────────────────────────────────

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// True while a request is in flight.
    pub fn busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// The last user-visible error message, if any.
    pub fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    // ── Field attachment (validating setters) ─────────────────────────────

    /// Attach or clear the image. Oversized files are rejected and the
    /// image field is cleared; no other field is touched.
    pub fn attach_image(&mut self, candidate: Option<FilePart>) -> Result<(), CertigenError> {
        let accepted = self.checked(candidate, SizeLimit::IMAGE)?;
        self.form.set_image(accepted);
        Ok(())
    }

    /// Attach or clear the spreadsheet. Same rejection policy as
    /// [`attach_image`](Self::attach_image), scoped to this field.
    pub fn attach_spreadsheet(&mut self, candidate: Option<FilePart>) -> Result<(), CertigenError> {
        let accepted = self.checked(candidate, SizeLimit::SPREADSHEET)?;
        self.form.set_spreadsheet(accepted);
        Ok(())
    }

    /// Attach or clear the optional font file.
    pub fn attach_font(&mut self, candidate: Option<FilePart>) -> Result<(), CertigenError> {
        let accepted = self.checked(candidate, SizeLimit::FONT)?;
        self.form.set_font(accepted);
        Ok(())
    }

    /// Set the font size (1–999).
    pub fn set_font_size(&mut self, size: u16) -> Result<(), CertigenError> {
        self.form.set_font_size(size).inspect_err(|e| {
            self.last_error = Some(e.user_message());
        })
    }

    /// Run the size validator; on rejection clear the limit's own field and
    /// record the message the form shows.
    fn checked(
        &mut self,
        candidate: Option<FilePart>,
        limit: SizeLimit,
    ) -> Result<Option<FilePart>, CertigenError> {
        match validate::check_size(candidate, limit) {
            Ok(accepted) => Ok(accepted),
            Err(e) => {
                warn!("{} rejected: {}", limit.field, e);
                self.clear_field(limit);
                self.last_error = Some(e.user_message());
                Err(e)
            }
        }
    }

    fn clear_field(&mut self, limit: SizeLimit) {
        use crate::form::FieldName;
        match limit.field {
            FieldName::Image => self.form.set_image(None),
            FieldName::Spreadsheet => self.form.set_spreadsheet(None),
            FieldName::Font => self.form.set_font(None),
            FieldName::FontSize => self.form.clear_font_size(),
        }
    }

    // ── Submission ────────────────────────────────────────────────────────

    /// Submit the form and return the downloaded archive.
    ///
    /// Validation runs first; if it fails, no request is sent and the
    /// session moves to `Failed` with the required-fields message. On a
    /// submittable form the request goes in flight exactly once — no retry,
    /// no cancellation — and the session ends in `Succeeded` or `Failed`.
    /// The busy flag is false when this returns, whatever happened.
    pub async fn submit(
        &mut self,
        config: &SubmitConfig,
    ) -> Result<SubmitOutput, CertigenError> {
        self.state = SubmissionState::Validating;

        let upload = match self.form.to_request() {
            Ok(r) => r,
            Err(e) => {
                self.state = SubmissionState::Failed;
                self.last_error = Some(e.user_message());
                return Err(e);
            }
        };

        let _busy = BusyGuard::engage(Arc::clone(&self.busy));
        self.state = SubmissionState::InFlight;

        if let Some(ref obs) = config.observer {
            obs.on_submit_start(upload.total_bytes());
        }

        let started = Instant::now();
        match request::post_request(&upload, config).await {
            Ok(artifact) => {
                if let Some(ref obs) = config.observer {
                    obs.on_submit_complete(artifact.len());
                }
                self.state = SubmissionState::Succeeded;
                self.last_error = None;
                Ok(SubmitOutput {
                    stats: SubmitStats {
                        endpoint: config.endpoint.clone(),
                        request_bytes: upload.total_bytes(),
                        archive_bytes: artifact.len(),
                        duration_ms: started.elapsed().as_millis() as u64,
                    },
                    artifact,
                })
            }
            Err(e) => {
                if let Some(ref obs) = config.observer {
                    obs.on_submit_error(&e.to_string());
                }
                self.state = SubmissionState::Failed;
                self.last_error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Submit the form and write the archive to `path`.
    ///
    /// The write is atomic (temp file + rename); a write failure is
    /// surfaced as [`CertigenError::ArchiveWriteFailed`] rather than
    /// silently dropped.
    pub async fn submit_to_file(
        &mut self,
        config: &SubmitConfig,
        path: impl AsRef<Path>,
    ) -> Result<(SubmitStats, PathBuf), CertigenError> {
        let output = self.submit(config).await?;
        let written = materialize::write_archive(&output.artifact, path)
            .await
            .inspect_err(|e| {
                self.last_error = Some(e.user_message());
            })?;

        if let Some(ref obs) = config.observer {
            obs.on_archive_written(&written);
        }
        Ok((output.stats, written))
    }

    /// Blocking wrapper around [`submit`](Self::submit).
    ///
    /// Creates a temporary tokio runtime internally.
    pub fn submit_sync(&mut self, config: &SubmitConfig) -> Result<SubmitOutput, CertigenError> {
        tokio::runtime::Runtime::new()
            .map_err(|e| CertigenError::Internal(format!("failed to create tokio runtime: {e}")))?
            .block_on(self.submit(config))
    }
}
