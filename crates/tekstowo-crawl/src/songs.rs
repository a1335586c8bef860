use std::collections::HashSet;

use scraper::{Html, Selector};

use crate::client::SiteClient;
use crate::config::CrawlConfig;
use crate::error::{CrawlError, Result};
use crate::fetch::Fetcher;
use crate::pagination::PAGE_LINK;
use crate::throttle::RequestClass;

/// Label of the "next page" pagination control, compared lowercased.
pub const NEXT_PAGE_LABEL: &str = "następna";

/// Path of the "add new lyrics" action, listed among an artist's songs.
const ADD_LYRICS_MARKER: &str = "dodaj_tekst";

/// First path segment of a song page. A song href missing its leading slash
/// joins into `{origin}piosenka,...`.
const SONG_PATH: &str = "piosenka";

/// What one page of an artist's song index yields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistPage {
    /// Display name from the page header, without the "(N tekstów)" suffix.
    pub artist: String,
    /// Accepted song URLs on this page, in document order.
    pub songs: Vec<String>,
    /// Target of the "next page" control, if the page has one.
    pub next_page: Option<String>,
}

/// Parse one page of an artist's song index.
///
/// Returns `None` when the page has no artist header.
pub fn parse_artist_page(html: &str, config: &CrawlConfig) -> Option<ArtistPage> {
    let document = Html::parse_document(html);
    let header_sel = Selector::parse(".col-md-7.col-lg-8.px-0").expect("valid selector");
    let block_sel = Selector::parse(".box-przeboje").expect("valid selector");
    let title_sel = Selector::parse(".title").expect("valid selector");
    let page_sel = Selector::parse(PAGE_LINK).expect("valid selector");

    let header = document.select(&header_sel).next()?;
    let header_text = header.text().collect::<String>();
    let artist = header_text
        .split(" (")
        .next()
        .unwrap_or_default()
        .trim()
        .to_string();

    let mut songs = Vec::new();
    for block in document.select(&block_sel) {
        let Some(title) = block.select(&title_sel).next() else {
            continue;
        };
        // Listing templates also show other artists' songs; keep only ours.
        if !title.text().collect::<String>().trim().contains(&artist) {
            continue;
        }
        let Some(href) = title.value().attr("href") else {
            continue;
        };
        let url = config.join(href);
        if is_excluded_song(&url, config) {
            tracing::trace!(url = %url, "Excluded song link");
            continue;
        }
        songs.push(url);
    }

    let next_page = document
        .select(&page_sel)
        .last()
        .filter(|control| {
            control
                .text()
                .collect::<String>()
                .to_lowercase()
                .contains(NEXT_PAGE_LABEL)
        })
        .and_then(|control| control.value().attr("href"))
        .map(|href| config.join(href));

    Some(ArtistPage {
        artist,
        songs,
        next_page,
    })
}

fn is_excluded_song(url: &str, config: &CrawlConfig) -> bool {
    let slashless = url
        .strip_prefix(config.origin.as_str())
        .is_some_and(|rest| rest.starts_with(SONG_PATH));
    slashless || url.contains(ADD_LYRICS_MARKER)
}

impl<F: Fetcher> SiteClient<F> {
    /// Collect the song URLs of one artist, following "next page" controls
    /// until the last pagination control is no longer a "next" link.
    ///
    /// Each URL appears once. A page that cannot be fetched or has no artist
    /// header fails the whole artist, so callers can tell "no songs" apart
    /// from "could not collect songs".
    pub async fn enumerate_songs(&self, artist_url: &str) -> Result<Vec<String>> {
        let mut urls = Vec::new();
        let mut seen = HashSet::new();
        let mut visited = HashSet::new();
        let mut current = artist_url.to_string();
        let mut artist = String::new();

        loop {
            let html = self.get(RequestClass::Artist, &current).await?;
            let page = parse_artist_page(&html, &self.config).ok_or_else(|| CrawlError::Parse {
                url: current.clone(),
                what: "artist header",
            })?;
            visited.insert(current.clone());

            for song in page.songs {
                if seen.insert(song.clone()) {
                    urls.push(song);
                }
            }
            if artist.is_empty() {
                artist = page.artist;
            }

            match page.next_page {
                Some(next) if visited.contains(&next) => {
                    tracing::warn!(url = %next, "Next page already visited, stopping");
                    break;
                }
                Some(next) => current = next,
                None => break,
            }
        }

        tracing::info!(
            artist = %artist,
            pages = visited.len(),
            songs = urls.len(),
            "Artist {artist}, collected {} song URLs",
            urls.len()
        );
        Ok(urls)
    }
}
