use scraper::{Html, Selector};
use tekstowo_model::{Letter, PageTable};

use crate::client::SiteClient;
use crate::fetch::Fetcher;
use crate::throttle::RequestClass;

/// Class shared by every pagination control (numbered pages and the
/// previous/next arrows).
pub(crate) const PAGE_LINK: &str = ".page-link";

/// Largest numeric label among the page's pagination controls, or 0 when
/// there are none.
pub fn parse_max_page(html: &str) -> u32 {
    let document = Html::parse_document(html);
    let page_sel = Selector::parse(PAGE_LINK).expect("valid selector");

    document
        .select(&page_sel)
        .filter_map(|link| link.text().collect::<String>().trim().parse::<u32>().ok())
        .max()
        .unwrap_or(0)
}

impl<F: Fetcher> SiteClient<F> {
    /// Highest page number linked from the listing at `url`.
    ///
    /// Returns 0 for a listing without pagination and when the page cannot
    /// be fetched; the failure is logged, not returned.
    pub async fn resolve_max_page(&self, url: &str) -> u32 {
        self.resolve_max_page_as(RequestClass::Probe, url).await
    }

    async fn resolve_max_page_as(&self, class: RequestClass, url: &str) -> u32 {
        match self.get(class, url).await {
            Ok(html) => parse_max_page(&html),
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Could not resolve page count");
                0
            }
        }
    }

    /// Number of listing pages to walk for `letter`. A listing without
    /// pagination still has its first page, so this is never below 1.
    pub async fn listing_pages(&self, letter: Letter) -> u32 {
        let url = self.config.listing_url(letter);
        let pages = self.resolve_max_page(&url).await.max(1);
        tracing::info!(letter = %letter, pages, "Letter has {pages} pages of artists");
        pages
    }

    /// Resolve the listing page count for every letter bucket.
    pub async fn build_page_table(&self) -> PageTable {
        tracing::info!("Building page table, please wait...");

        let mut table = PageTable::new();
        for letter in Letter::all() {
            let url = self.config.listing_url(letter);
            let pages = self
                .resolve_max_page_as(RequestClass::PageTable, &url)
                .await
                .max(1);
            tracing::debug!(letter = %letter, pages, "Resolved listing pages");
            table.insert(letter, pages);
        }

        tracing::info!(letters = table.len(), "Page table built");
        table
    }
}
