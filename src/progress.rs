//! Observer trait for submission lifecycle events.
//!
//! Inject an `Arc<dyn SubmitObserver>` via
//! [`crate::config::SubmitConfigBuilder::observer`] to receive events as a
//! submission moves through its lifecycle. The callback approach keeps the
//! library ignorant of how the host application communicates: the CLI feeds
//! a terminal spinner, a GUI could feed a channel, tests record counters.
//!
//! All methods have default no-op implementations so callers only override
//! what they care about.

use std::sync::Arc;

/// Called by [`crate::session::FormSession`] as a submission progresses.
///
/// Implementations must be `Send + Sync`. With a single request in flight
/// per session the methods are never called concurrently, but the observer
/// may be shared across sessions.
pub trait SubmitObserver: Send + Sync {
    /// Called once validation has passed, before the request is sent.
    ///
    /// # Arguments
    /// * `payload_bytes` — total file bytes about to be uploaded
    fn on_submit_start(&self, payload_bytes: u64) {
        let _ = payload_bytes;
    }

    /// Called when the service returned the archive.
    ///
    /// # Arguments
    /// * `archive_bytes` — size of the received archive
    fn on_submit_complete(&self, archive_bytes: u64) {
        let _ = archive_bytes;
    }

    /// Called when the submission failed after the request was sent.
    ///
    /// # Arguments
    /// * `error` — human-readable error description
    fn on_submit_error(&self, error: &str) {
        let _ = error;
    }

    /// Called after the archive has been written to disk
    /// (only on the `submit_to_file` path).
    fn on_archive_written(&self, path: &std::path::Path) {
        let _ = path;
    }
}

/// A no-op implementation for callers that don't need lifecycle events.
pub struct NoopSubmitObserver;

impl SubmitObserver for NoopSubmitObserver {}

/// Convenience alias matching the type stored in
/// [`crate::config::SubmitConfig`].
pub type ObserverHandle = Arc<dyn SubmitObserver>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

    struct TrackingObserver {
        starts: AtomicUsize,
        completes: AtomicUsize,
        errors: AtomicUsize,
        last_archive_bytes: AtomicU64,
    }

    impl SubmitObserver for TrackingObserver {
        fn on_submit_start(&self, _payload_bytes: u64) {
            self.starts.fetch_add(1, Ordering::SeqCst);
        }

        fn on_submit_complete(&self, archive_bytes: u64) {
            self.completes.fetch_add(1, Ordering::SeqCst);
            self.last_archive_bytes.store(archive_bytes, Ordering::SeqCst);
        }

        fn on_submit_error(&self, _error: &str) {
            self.errors.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn noop_observer_does_not_panic() {
        let obs = NoopSubmitObserver;
        obs.on_submit_start(100);
        obs.on_submit_complete(2048);
        obs.on_submit_error("boom");
        obs.on_archive_written(std::path::Path::new("certificates.zip"));
    }

    #[test]
    fn tracking_observer_receives_events() {
        let tracker = TrackingObserver {
            starts: AtomicUsize::new(0),
            completes: AtomicUsize::new(0),
            errors: AtomicUsize::new(0),
            last_archive_bytes: AtomicU64::new(0),
        };

        tracker.on_submit_start(6 * 1024 * 1024);
        tracker.on_submit_complete(512);
        tracker.on_submit_error("HTTP 500");

        assert_eq!(tracker.starts.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.completes.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.errors.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.last_archive_bytes.load(Ordering::SeqCst), 512);
    }

    #[test]
    fn arc_dyn_observer_works() {
        let obs: ObserverHandle = Arc::new(NoopSubmitObserver);
        obs.on_submit_start(10);
        obs.on_submit_complete(20);
    }
}
