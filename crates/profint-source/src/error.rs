use thiserror::Error;

/// The categories of data a source supplies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Profile,
    Relationships,
    Posts,
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Resource::Profile => write!(f, "profile"),
            Resource::Relationships => write!(f, "relationships"),
            Resource::Posts => write!(f, "posts"),
        }
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    /// The target identifier does not resolve to a profile.
    #[error("profile not found: {identifier}")]
    NotFound { identifier: String },

    /// A data category could not be fetched for this run.
    #[error("{resource} unavailable: {reason}")]
    Unavailable { resource: Resource, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("rate limited by source (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid source base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl SourceError {
    /// Wraps any failure for `resource` as [`SourceError::Unavailable`].
    #[must_use]
    pub fn unavailable(resource: Resource, cause: &impl std::fmt::Display) -> Self {
        SourceError::Unavailable {
            resource,
            reason: cause.to_string(),
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::NotFound { .. })
    }
}
