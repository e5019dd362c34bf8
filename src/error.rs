use thiserror::Error;

/// Fetch failures. None of these are retried.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("failed to read response body from {url}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// The body could not be treated as an HTML document at all.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("response body is empty")]
    Empty,

    #[error("response body is not an HTML document")]
    NotHtml,
}
