use reqwest::StatusCode;

/// Failures of a single endpoint call. None of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("malformed URL {url:?}: {reason}")]
    MalformedUrl { url: String, reason: String },

    #[error("request to {url} failed")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} answered with status {status}: {body}")]
    UnexpectedStatus {
        url: String,
        status: StatusCode,
        body: String,
    },

    #[error("failed to read response body from {url}")]
    Read {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to decode response body")]
    Decode(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ApiError>;
