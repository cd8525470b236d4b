//! Typed errors for the research library.
//!
//! Backend failures are expected and routine: the fallback chain logs and
//! swallows them. They are still typed so callers and tests can tell a
//! transport failure from a bad payload.

use thiserror::Error;

/// Errors a single search backend can raise for one query.
#[derive(Debug, Error)]
pub enum SearchBackendError {
    /// Request could not be sent or the body could not be read
    #[error("{backend} HTTP error: {source}")]
    Http {
        backend: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Provider answered with a non-success status
    #[error("{backend} returned status {status}")]
    Status { backend: &'static str, status: u16 },

    /// Provider payload could not be interpreted
    #[error("{backend} returned an unparsable payload: {reason}")]
    Parse {
        backend: &'static str,
        reason: String,
    },

    /// Backend is missing credentials or configuration
    #[error("{backend} is not configured: {reason}")]
    NotConfigured {
        backend: &'static str,
        reason: String,
    },
}

impl SearchBackendError {
    /// Wrap a transport error from `reqwest`.
    pub fn http(backend: &'static str, error: reqwest::Error) -> Self {
        Self::Http {
            backend,
            source: Box::new(error),
        }
    }

    /// Name of the backend that produced the error.
    pub fn backend(&self) -> &'static str {
        match self {
            Self::Http { backend, .. }
            | Self::Status { backend, .. }
            | Self::Parse { backend, .. }
            | Self::NotConfigured { backend, .. } => backend,
        }
    }
}

/// Result type alias for backend searches.
pub type BackendResult<T> = std::result::Result<T, SearchBackendError>;
