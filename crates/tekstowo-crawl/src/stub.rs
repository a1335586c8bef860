//! In-memory collaborators for driving the crawler in tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;
use std::time::Duration;

use reqwest::StatusCode;
use tokio::time::Instant;

use crate::classify::LanguageClassifier;
use crate::client::SiteClient;
use crate::config::CrawlConfig;
use crate::error::{CrawlError, Result};
use crate::fetch::Fetcher;
use crate::output::ArtifactStore;
use crate::throttle::Delays;

pub(crate) const ORIGIN: &str = "https://www.tekstowo.pl";

/// Serves canned bodies by URL; unknown URLs answer 404.
#[derive(Default)]
pub(crate) struct StubFetcher {
    pages: HashMap<String, std::result::Result<String, StatusCode>>,
    latency: Duration,
    requests: Mutex<Vec<(String, Instant)>>,
}

impl StubFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn page(mut self, url: &str, body: impl Into<String>) -> Self {
        self.pages.insert(url.to_string(), Ok(body.into()));
        self
    }

    pub(crate) fn status(mut self, url: &str, status: StatusCode) -> Self {
        self.pages.insert(url.to_string(), Err(status));
        self
    }

    /// Take `latency` to answer every request.
    pub(crate) fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Every URL requested so far, in order.
    pub(crate) fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(url, _)| url.clone())
            .collect()
    }

    /// When each request was sent, in order.
    pub(crate) fn request_times(&self) -> Vec<Instant> {
        self.requests.lock().unwrap().iter().map(|(_, at)| *at).collect()
    }
}

impl Fetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), Instant::now()));
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        match self.pages.get(url) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(status)) => Err(CrawlError::Status {
                url: url.to_string(),
                status: *status,
            }),
            None => Err(CrawlError::Status {
                url: url.to_string(),
                status: StatusCode::NOT_FOUND,
            }),
        }
    }
}

/// A client that never throttles.
pub(crate) fn client(fetcher: StubFetcher) -> SiteClient<StubFetcher> {
    client_with_delays(fetcher, Delays::none())
}

/// A client with the production courtesy delays, for paused-clock tests.
pub(crate) fn throttled_client(fetcher: StubFetcher) -> SiteClient<StubFetcher> {
    client_with_delays(fetcher, Delays::default())
}

fn client_with_delays(fetcher: StubFetcher, delays: Delays) -> SiteClient<StubFetcher> {
    let config = CrawlConfig {
        origin: ORIGIN.to_string(),
        delays,
        ..CrawlConfig::default()
    };
    SiteClient::new(config, fetcher)
}

/// The paused clock fires timers on whole milliseconds, so allow a little
/// slack per sleep.
pub(crate) fn assert_elapsed(start: Instant, expected: Duration) {
    let elapsed = start.elapsed();
    assert!(
        elapsed >= expected && elapsed < expected + Duration::from_millis(50),
        "elapsed {elapsed:?}, expected about {expected:?}"
    );
}

/// Check the time between each request and the next, with the same slack
/// as [`assert_elapsed`].
pub(crate) fn assert_request_gaps(fetcher: &StubFetcher, expected: &[Duration]) {
    let times = fetcher.request_times();
    let gaps: Vec<Duration> = times.windows(2).map(|pair| pair[1] - pair[0]).collect();
    assert_eq!(gaps.len(), expected.len(), "gaps {gaps:?}, expected {expected:?}");
    for (gap, want) in gaps.iter().zip(expected) {
        assert!(
            *gap >= *want && *gap < *want + Duration::from_millis(50),
            "gaps {gaps:?}, expected {expected:?}"
        );
    }
}

/// Answers the same code for any text it is asked about.
pub(crate) struct FixedClassifier(pub(crate) &'static str);

impl LanguageClassifier for FixedClassifier {
    fn detect(&self, _text: &str) -> Option<String> {
        Some(self.0.to_string())
    }
}

#[derive(Default)]
pub(crate) struct MemoryStore {
    files: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub(crate) fn names(&self) -> Vec<String> {
        self.files.lock().unwrap().keys().cloned().collect()
    }

    pub(crate) fn contents(&self, name: &str) -> Option<String> {
        self.files.lock().unwrap().get(name).cloned()
    }
}

impl ArtifactStore for MemoryStore {
    fn persist(&self, name: &str, contents: &str) -> anyhow::Result<()> {
        self.files
            .lock()
            .unwrap()
            .insert(name.to_string(), contents.to_string());
        Ok(())
    }
}

/// A store whose writes always fail.
pub(crate) struct BrokenStore;

impl ArtifactStore for BrokenStore {
    fn persist(&self, name: &str, _contents: &str) -> anyhow::Result<()> {
        anyhow::bail!("disk full while writing {name}")
    }
}
