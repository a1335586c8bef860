use scraper::{Html, Selector};
use tekstowo_model::SongContent;

use crate::client::SiteClient;
use crate::error::CrawlError;
use crate::fetch::Fetcher;
use crate::throttle::RequestClass;

/// Template artifact marking the end of the translation text.
const TRANSLATION_END: &str = "\t\t";

/// Extract title, lyrics and translation from a song page.
///
/// Returns `None` when the page has no title element. A missing lyrics body
/// gives empty lyrics; a missing translation container gives no translation.
pub fn parse_song_page(html: &str) -> Option<SongContent> {
    let document = Html::parse_document(html);
    let title_sel = Selector::parse(".col-lg-7").expect("valid selector");
    let lyrics_sel = Selector::parse(".inner-text").expect("valid selector");
    let translation_sel = Selector::parse("div#translation").expect("valid selector");

    let title = document
        .select(&title_sel)
        .next()?
        .text()
        .collect::<String>()
        .trim()
        .to_string();

    let lyrics = document
        .select(&lyrics_sel)
        .next()
        .map(|body| body.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let translation = document.select(&translation_sel).next().map(|container| {
        let text = container.text().collect::<String>();
        text.trim()
            .split(TRANSLATION_END)
            .next()
            .unwrap_or_default()
            .to_string()
    });

    Some(SongContent {
        title: Some(title),
        lyrics,
        translation,
    })
}

impl<F: Fetcher> SiteClient<F> {
    /// Fetch and parse one song page.
    ///
    /// Never fails: an unreachable or unparseable page is logged and yields
    /// [`SongContent::degraded`].
    pub async fn extract_song(&self, song_url: &str) -> SongContent {
        let html = match self.get(RequestClass::Song, song_url).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!(url = %song_url, error = %e, "Could not fetch song");
                return SongContent::degraded();
            }
        };

        match parse_song_page(&html) {
            Some(content) => {
                tracing::debug!(
                    url = %song_url,
                    chars = content.lyrics.chars().count(),
                    translated = content.translation.is_some(),
                    "Extracted song"
                );
                content
            }
            None => {
                let e = CrawlError::Parse {
                    url: song_url.to_string(),
                    what: "song title",
                };
                tracing::warn!(error = %e, "Could not parse song");
                SongContent::degraded()
            }
        }
    }
}
