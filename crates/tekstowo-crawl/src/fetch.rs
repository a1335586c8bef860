use std::future::Future;

use crate::config::CrawlConfig;
use crate::error::{CrawlError, Result};

/// Retrieves page bodies. The crawl logic only sees this trait, so tests can
/// serve canned HTML.
pub trait Fetcher {
    /// Fetch `url` and return the body of a successful (2xx) response.
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String>>;
}

/// Fetcher backed by a shared reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &CrawlConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| CrawlError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CrawlError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.text().await.map_err(|source| CrawlError::Transport {
            url: url.to_string(),
            source,
        })
    }
}
