use reqwest::StatusCode;
use tekstowo_model::ModelError;
use thiserror::Error;

pub type Result<T, E = CrawlError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum CrawlError {
    /// Connection failure, timeout, or an unreadable body.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: StatusCode },

    /// An element the page is expected to contain was missing.
    #[error("{what} not found on {url}")]
    Parse { url: String, what: &'static str },

    #[error(transparent)]
    Model(#[from] ModelError),
}
