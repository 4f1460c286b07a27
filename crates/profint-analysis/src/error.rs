use profint_source::SourceError;
use thiserror::Error;

/// Failures that abort a run before any analysis happens.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("profile not found: {identifier}")]
    NotFound { identifier: String },

    #[error("failed to fetch profile: {0}")]
    Source(#[from] SourceError),
}
