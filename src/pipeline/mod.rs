//! Pipeline stages for one form submission.
//!
//! Each submodule implements exactly one step, so each is independently
//! testable and the session only sequences them.
//!
//! ## Data Flow
//!
//! ```text
//! form ──▶ validate ──▶ multipart ──▶ request ──▶ materialize
//! (state)  (size/presence) (body)     (POST)      (certificates.zip)
//! ```
//!
//! 1. [`validate`]    — per-field size thresholds, checked at attach time
//! 2. [`multipart`]   — named parts for the service's wire contract
//! 3. [`request`]     — the single async POST; the only stage with network I/O
//! 4. [`materialize`] — atomic byte-exact write of the returned archive

pub mod materialize;
pub mod multipart;
pub mod request;
pub mod validate;
