//! The HTTP leg of the pipeline: one POST, one binary response.
//!
//! This is the only stage with network I/O. The contract is deliberately
//! minimal: no retry, no backoff, no cancellation — a submission either
//! yields the complete archive or a single error. By default there is no
//! request timeout either (generation can take a while for large name
//! lists); callers opt in via [`SubmitConfig::request_timeout_secs`].
//!
//! [`SubmitConfig::request_timeout_secs`]: crate::config::SubmitConfig

use crate::config::SubmitConfig;
use crate::error::CertigenError;
use crate::form::UploadRequest;
use crate::output::DownloadArtifact;
use crate::pipeline::multipart;
use tracing::{debug, info};

/// Send one upload request and return the archive the service produced.
///
/// # Errors
/// * [`CertigenError::RequestTimeout`] — configured timeout elapsed
/// * [`CertigenError::RequestFailed`] — transport-level failure
/// * [`CertigenError::ServiceFailure`] — endpoint answered with non-2xx
/// * [`CertigenError::EmptyArchive`] — 2xx but nothing in the body
pub async fn post_request(
    request: &UploadRequest,
    config: &SubmitConfig,
) -> Result<DownloadArtifact, CertigenError> {
    let endpoint = config.endpoint.as_str();
    info!(
        "Submitting {} bytes across {} parts to {}",
        request.total_bytes(),
        if request.font.is_some() { 4 } else { 3 },
        endpoint
    );

    let client = build_client(config)?;
    let form = multipart::build_form(request)?;

    let response = client
        .post(endpoint)
        .multipart(form)
        .send()
        .await
        .map_err(|e| map_send_error(e, config))?;

    let status = response.status();
    if !status.is_success() {
        return Err(CertigenError::ServiceFailure {
            status: status.as_u16(),
        });
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| map_send_error(e, config))?;

    if bytes.is_empty() {
        return Err(CertigenError::EmptyArchive);
    }

    debug!("Received {} byte archive", bytes.len());

    Ok(DownloadArtifact {
        file_name: config.archive_name.clone(),
        bytes: bytes.to_vec(),
    })
}

/// Build the HTTP client, applying the optional request timeout.
fn build_client(config: &SubmitConfig) -> Result<reqwest::Client, CertigenError> {
    let mut builder = reqwest::Client::builder();
    if let Some(secs) = config.request_timeout_secs {
        builder = builder.timeout(std::time::Duration::from_secs(secs));
    }
    builder
        .build()
        .map_err(|e| CertigenError::Internal(format!("failed to build HTTP client: {e}")))
}

fn map_send_error(e: reqwest::Error, config: &SubmitConfig) -> CertigenError {
    if e.is_timeout() {
        CertigenError::RequestTimeout {
            endpoint: config.endpoint.clone(),
            secs: config.request_timeout_secs.unwrap_or(0),
        }
    } else {
        CertigenError::RequestFailed {
            endpoint: config.endpoint.clone(),
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds_with_and_without_timeout() {
        let mut config = SubmitConfig::default();
        assert!(build_client(&config).is_ok());
        config.request_timeout_secs = Some(30);
        assert!(build_client(&config).is_ok());
    }

    // Transport, status, and body handling are covered end-to-end against a
    // mock server in tests/submit.rs.
}
