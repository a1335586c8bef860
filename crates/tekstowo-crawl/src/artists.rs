use scraper::{Html, Selector};
use tekstowo_model::Letter;

use crate::client::SiteClient;
use crate::config::CrawlConfig;
use crate::fetch::Fetcher;
use crate::throttle::RequestClass;

/// Path fragment shared by every artist song-index link.
const ARTIST_LINK_MARKER: &str = "piosenki_";

/// Artist song-index URLs linked from a listing page, in document order.
pub fn parse_artist_links(html: &str, config: &CrawlConfig) -> Vec<String> {
    let document = Html::parse_document(html);
    let link_sel = Selector::parse("a[href]").expect("valid selector");

    document
        .select(&link_sel)
        .filter_map(|link| link.value().attr("href"))
        .filter(|href| href.contains(ARTIST_LINK_MARKER))
        .map(|href| config.join(href))
        .collect()
}

impl<F: Fetcher> SiteClient<F> {
    /// Collect artist URLs from listing pages `1..=max_page` of `letter`.
    ///
    /// Duplicates across pages are kept. A page that cannot be fetched is
    /// logged and skipped.
    pub async fn enumerate_artists(&self, letter: Letter, max_page: u32) -> (Vec<String>, usize) {
        tracing::info!(letter = %letter, pages = max_page, "Collecting artists starting with {letter}");

        let mut urls = Vec::new();
        for page in 1..=max_page {
            let url = self.config.listing_page_url(letter, page);
            match self.get(RequestClass::Listing, &url).await {
                Ok(html) => {
                    let found = parse_artist_links(&html, &self.config);
                    tracing::debug!(letter = %letter, page, artists = found.len(), "Visited {page}/{max_page}");
                    urls.extend(found);
                }
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "Skipping listing page");
                }
            }
        }

        let count = urls.len();
        tracing::info!(letter = %letter, artists = count, "Letter {letter} artists collected");
        (urls, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub::{self, assert_elapsed, assert_request_gaps, StubFetcher};
    use reqwest::StatusCode;
    use std::time::Duration;
    use tokio::time::Instant;

    fn listing(hrefs: &[&str]) -> String {
        let links: String = hrefs
            .iter()
            .map(|href| format!(r#"<li><a href="{href}">artist</a></li>"#))
            .collect();
        format!(
            r#"<html><body>
            <nav><a href="/">Strona główna</a><a href="/logowanie.html">Zaloguj</a></nav>
            <ul class="artists">{links}</ul>
            <a class="page-link" href="/artysci_na,A,strona,2.html">2</a>
            </body></html>"#
        )
    }

    fn page_url(page: u32) -> String {
        format!("{}/artysci_na,A,strona,{page}.html", stub::ORIGIN)
    }

    #[test]
    fn test_parse_artist_links() {
        let config = CrawlConfig::default();
        let html = listing(&["/piosenki_artysty,abba.html", "/piosenki_artysty,adele.html"]);

        let links = parse_artist_links(&html, &config);

        assert_eq!(
            links,
            vec![
                "https://www.tekstowo.pl/piosenki_artysty,abba.html",
                "https://www.tekstowo.pl/piosenki_artysty,adele.html",
            ]
        );
    }

    #[test]
    fn test_parse_artist_links_ignores_anchors_without_href() {
        let config = CrawlConfig::default();
        let html = r#"<a name="piosenki_top">top</a><a href="/piosenki_artysty,abba.html">ABBA</a>"#;
        assert_eq!(parse_artist_links(html, &config).len(), 1);
    }

    #[tokio::test]
    async fn test_enumerate_artists_keeps_duplicates_across_pages() {
        let fetcher = StubFetcher::new()
            .page(&page_url(1), listing(&["/piosenki_artysty,abba.html", "/piosenki_artysty,adele.html"]))
            .page(&page_url(2), listing(&["/piosenki_artysty,adele.html", "/piosenki_artysty,aerosmith.html"]));
        let client = stub::client(fetcher);

        let (urls, count) = client.enumerate_artists("A".parse().unwrap(), 2).await;

        assert_eq!(count, 4);
        assert_eq!(urls.len(), 4);
        assert_eq!(urls[1], urls[2]);
        assert_eq!(client.fetcher().requests(), vec![page_url(1), page_url(2)]);
    }

    #[tokio::test]
    async fn test_enumerate_artists_skips_failed_page() {
        let fetcher = StubFetcher::new()
            .page(&page_url(1), listing(&["/piosenki_artysty,abba.html"]))
            .status(&page_url(2), StatusCode::INTERNAL_SERVER_ERROR)
            .page(&page_url(3), listing(&["/piosenki_artysty,avicii.html"]));
        let client = stub::client(fetcher);

        let (urls, count) = client.enumerate_artists("A".parse().unwrap(), 3).await;

        assert_eq!(count, 2);
        assert_eq!(
            urls,
            vec![
                "https://www.tekstowo.pl/piosenki_artysty,abba.html",
                "https://www.tekstowo.pl/piosenki_artysty,avicii.html",
            ]
        );
        assert_eq!(client.fetcher().requests().len(), 3);
    }

    #[tokio::test]
    async fn test_enumerate_artists_zero_pages() {
        let client = stub::client(StubFetcher::new());
        let (urls, count) = client.enumerate_artists("A".parse().unwrap(), 0).await;
        assert!(urls.is_empty());
        assert_eq!(count, 0);
        assert!(client.fetcher().requests().is_empty());
    }

    fn three_listing_pages() -> StubFetcher {
        StubFetcher::new()
            .page(&page_url(1), listing(&["/piosenki_artysty,abba.html"]))
            .page(&page_url(2), listing(&["/piosenki_artysty,adele.html"]))
            .page(&page_url(3), listing(&["/piosenki_artysty,avicii.html"]))
    }

    #[tokio::test(start_paused = true)]
    async fn test_listing_pages_are_two_seconds_apart() {
        let client = stub::throttled_client(three_listing_pages());

        let (_, count) = client.enumerate_artists("A".parse().unwrap(), 3).await;

        assert_eq!(count, 3);
        assert_request_gaps(client.fetcher(), &[Duration::from_secs(2); 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_listing_pages_still_pause() {
        let fetcher = three_listing_pages().latency(Duration::from_secs(3));
        let client = stub::throttled_client(fetcher);
        let start = Instant::now();

        client.enumerate_artists("A".parse().unwrap(), 3).await;

        // 3 s response + 2 s pause between pages, then the last response
        assert_request_gaps(client.fetcher(), &[Duration::from_secs(5); 2]);
        assert_elapsed(start, Duration::from_secs(13));
    }
}
