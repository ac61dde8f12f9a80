use thiserror::Error;

/// Failures a listing backend can report. Callers need to tell "no such
/// row" apart from "the operation failed"; everything else hangs off the
/// latter.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No row for the requested id.
    #[error("listing not found")]
    NotFound,

    /// The request never completed (connect, timeout, decode).
    #[error("store request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The backend answered with an error status.
    #[error("store rejected the operation: {0}")]
    Backend(String),
}
