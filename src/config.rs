//! Configuration for a submission.
//!
//! All behaviour is controlled through [`SubmitConfig`], built via its
//! [`SubmitConfigBuilder`]. Keeping every knob in one struct makes it
//! trivial to share a config across submissions and to log exactly what a
//! run was configured with.

use crate::error::CertigenError;
use crate::progress::ObserverHandle;
use std::fmt;

/// Endpoint of the hosted certificate-generation service.
pub const DEFAULT_ENDPOINT: &str = "https://certi-gen-v5kq3.ondigitalocean.app/process";

/// Configuration for submitting a form to the certificate service.
///
/// Built via [`SubmitConfig::builder()`] or [`SubmitConfig::default()`].
///
/// # Example
/// ```rust
/// use certigen_client::SubmitConfig;
///
/// let config = SubmitConfig::builder()
///     .endpoint("http://localhost:8000/process")
///     .request_timeout_secs(120)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct SubmitConfig {
    /// URL the multipart POST is sent to. Default: [`DEFAULT_ENDPOINT`].
    pub endpoint: String,

    /// Suggested file name for the downloaded archive.
    /// Default: `certificates.zip`.
    pub archive_name: String,

    /// Request timeout in seconds. Default: `None` (no timeout).
    ///
    /// Generation time grows with the number of names in the spreadsheet,
    /// so the client waits indefinitely unless the caller opts in to a
    /// bound. A timeout surfaces as [`CertigenError::RequestTimeout`].
    pub request_timeout_secs: Option<u64>,

    /// Lifecycle observer. Default: `None` (no events delivered).
    pub observer: Option<ObserverHandle>,
}

impl Default for SubmitConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            archive_name: crate::output::DEFAULT_ARCHIVE_NAME.to_string(),
            request_timeout_secs: None,
            observer: None,
        }
    }
}

impl fmt::Debug for SubmitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubmitConfig")
            .field("endpoint", &self.endpoint)
            .field("archive_name", &self.archive_name)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("observer", &self.observer.as_ref().map(|_| "<dyn SubmitObserver>"))
            .finish()
    }
}

impl SubmitConfig {
    /// Create a new builder for `SubmitConfig`.
    pub fn builder() -> SubmitConfigBuilder {
        SubmitConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`SubmitConfig`].
pub struct SubmitConfigBuilder {
    config: SubmitConfig,
}

impl SubmitConfigBuilder {
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = endpoint.into();
        self
    }

    pub fn archive_name(mut self, name: impl Into<String>) -> Self {
        self.config.archive_name = name.into();
        self
    }

    pub fn request_timeout_secs(mut self, secs: u64) -> Self {
        self.config.request_timeout_secs = Some(secs);
        self
    }

    pub fn observer(mut self, observer: ObserverHandle) -> Self {
        self.config.observer = Some(observer);
        self
    }

    /// Build the configuration, validating constraints.
    ///
    /// # Errors
    /// [`CertigenError::InvalidConfig`] when the endpoint is not an
    /// HTTP/HTTPS URL, the archive name is empty, or the timeout is zero.
    pub fn build(self) -> Result<SubmitConfig, CertigenError> {
        let c = &self.config;
        if !c.endpoint.starts_with("http://") && !c.endpoint.starts_with("https://") {
            return Err(CertigenError::InvalidConfig(format!(
                "endpoint must be an http(s) URL, got '{}'",
                c.endpoint
            )));
        }
        if c.archive_name.trim().is_empty() {
            return Err(CertigenError::InvalidConfig(
                "archive name must not be empty".into(),
            ));
        }
        if c.request_timeout_secs == Some(0) {
            return Err(CertigenError::InvalidConfig(
                "request timeout must be at least 1 second".into(),
            ));
        }
        Ok(self.config)
    }
}
