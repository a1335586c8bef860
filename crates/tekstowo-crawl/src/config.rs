use std::time::Duration;

use tekstowo_model::Letter;

use crate::throttle::Delays;

pub const DEFAULT_ORIGIN: &str = "https://www.tekstowo.pl";

/// Settings shared by every request the crawler makes.
#[derive(Debug, Clone)]
pub struct CrawlConfig {
    /// Scheme and host that relative links are joined to, without a trailing slash.
    pub origin: String,
    pub user_agent: String,
    /// Upper bound on a single request, connect to last byte.
    pub timeout: Duration,
    pub delays: Delays,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            user_agent: concat!("tekstowo/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(60),
            delays: Delays::default(),
        }
    }
}

impl CrawlConfig {
    /// First listing page for a letter, e.g. `.../artysci_na,Q.html`.
    pub fn listing_url(&self, letter: Letter) -> String {
        format!("{}/artysci_na,{}.html", self.origin, letter.as_segment())
    }

    /// Numbered listing page, e.g. `.../artysci_na,Q,strona,2.html`.
    pub fn listing_page_url(&self, letter: Letter, page: u32) -> String {
        format!(
            "{}/artysci_na,{},strona,{page}.html",
            self.origin,
            letter.as_segment()
        )
    }

    /// Resolve an href found on a page.
    ///
    /// Relative hrefs are appended to the origin verbatim, so an href
    /// missing its leading slash yields a URL like `{origin}piosenka,...`
    /// which the song filter recognizes and drops.
    pub fn join(&self, href: &str) -> String {
        if href.starts_with("http://") || href.starts_with("https://") {
            href.to_string()
        } else {
            format!("{}{href}", self.origin)
        }
    }
}
