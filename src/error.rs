// WHY: Typed error taxonomy for the reconciliation engine
// Aborted and FetchFailed are absorbed at the orchestrator boundary;
// only InvariantViolation escapes correct_text as a hard failure

use thiserror::Error;

/// Errors raised while running a reconciliation pass
#[derive(Debug, Error)]
pub enum EngineError {
    /// The pass's cancellation token was triggered
    #[error("correction pass aborted")]
    Aborted,

    /// The fetch collaborator failed with a non-abort error
    #[error("correction fetch failed: {0}")]
    FetchFailed(String),

    /// Programming-error fast-fail; unreachable in correct operation
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

/// Errors raised by the fetch collaborator
#[derive(Debug, Error)]
pub enum FetchError {
    /// The forwarded cancellation token was triggered
    #[error("fetch aborted")]
    Aborted,

    /// The correction backend could not be reached
    #[error("correction service unavailable: {0}")]
    Unavailable(String),

    /// Any other failure (malformed response, protocol error)
    #[error("fetch failed: {0}")]
    Unknown(String),
}

impl From<FetchError> for EngineError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Aborted => EngineError::Aborted,
            other => EngineError::FetchFailed(other.to_string()),
        }
    }
}
