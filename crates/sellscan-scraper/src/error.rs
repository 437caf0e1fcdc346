use thiserror::Error;

/// Errors surfaced by a [`crate::page::BrowserPage`] implementation.
///
/// The pipeline never propagates these: every call site converts a failure
/// into an empty or partial result for the current unit of work.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("timed out after {timeout_secs}s waiting for {what}")]
    Timeout { what: String, timeout_secs: u64 },

    #[error("driver error: {0}")]
    Driver(String),
}
