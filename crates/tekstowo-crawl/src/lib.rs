pub mod artists;
pub mod classify;
pub mod client;
pub mod config;
pub mod crawler;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod normalize;
pub mod output;
pub mod pagination;
pub mod songs;
pub mod throttle;

#[cfg(test)]
pub(crate) mod stub;

pub use classify::{classify, LanguageClassifier, WhatlangClassifier};
pub use client::SiteClient;
pub use config::CrawlConfig;
pub use crawler::{CrawlStats, Crawler};
pub use error::{CrawlError, Result};
pub use fetch::{Fetcher, HttpFetcher};
pub use output::{save, ArtifactStore, DirStore, SaveOutcome};
pub use throttle::{Delays, GatePass, RequestClass, RequestGate};
