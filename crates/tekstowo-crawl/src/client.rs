use crate::config::CrawlConfig;
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::throttle::{RequestClass, RequestGate};

/// Access to the lyrics site: configuration, a fetcher, and the request gate
/// every fetch goes through.
///
/// The enumerating and extracting operations live in their own modules
/// (`pagination`, `artists`, `songs`, `extract`) as further `impl` blocks.
#[derive(Debug)]
pub struct SiteClient<F> {
    pub(crate) config: CrawlConfig,
    fetcher: F,
    gate: RequestGate,
}

impl<F: Fetcher> SiteClient<F> {
    pub fn new(config: CrawlConfig, fetcher: F) -> Self {
        let gate = RequestGate::new(config.delays.clone());
        Self {
            config,
            fetcher,
            gate,
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Wait on the gate, then fetch `url`. The gate pass is held until the
    /// body has arrived or the fetch has failed.
    pub(crate) async fn get(&self, class: RequestClass, url: &str) -> Result<String> {
        let _pass = self.gate.enter(class).await;
        tracing::debug!(url = %url, ?class, "Fetching");
        let body = self.fetcher.fetch(url).await?;
        tracing::trace!(url = %url, bytes = body.len(), "Received HTML");
        Ok(body)
    }
}
