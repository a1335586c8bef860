use tekstowo_model::{Letter, PageLimit};

use crate::classify::{classify, LanguageClassifier};
use crate::client::SiteClient;
use crate::error::Result;
use crate::fetch::Fetcher;
use crate::output::{save, ArtifactStore, SaveOutcome};

/// Counters for one crawl of a letter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    pub artists: usize,
    /// Artists whose song index could not be collected.
    pub failed_artists: usize,
    pub songs: usize,
    /// Songs whose page could not be fetched or parsed.
    pub degraded_songs: usize,
    pub files_written: usize,
}

/// Drives letter → artists → songs → extraction → classification → save,
/// one request at a time.
pub struct Crawler<F, C, S> {
    client: SiteClient<F>,
    classifier: C,
    store: S,
}

impl<F, C, S> Crawler<F, C, S>
where
    F: Fetcher,
    C: LanguageClassifier,
    S: ArtifactStore,
{
    pub fn new(client: SiteClient<F>, classifier: C, store: S) -> Self {
        Self {
            client,
            classifier,
            store,
        }
    }

    pub fn client(&self) -> &SiteClient<F> {
        &self.client
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Crawl every song of every artist listed under `letter`.
    ///
    /// Only a page limit that cannot be resolved for the letter is an
    /// error; failing artists and songs are logged and skipped.
    pub async fn run(&self, letter: Letter, limit: &PageLimit) -> Result<CrawlStats> {
        let max_page = limit.pages_for(letter)?;
        let (artists, count) = self.client.enumerate_artists(letter, max_page).await;

        let mut stats = CrawlStats {
            artists: count,
            ..CrawlStats::default()
        };

        for (index, artist_url) in artists.iter().enumerate() {
            tracing::info!(artist = index + 1, of = count, url = %artist_url, "Crawling artist");

            let songs = match self.client.enumerate_songs(artist_url).await {
                Ok(songs) => songs,
                Err(e) => {
                    tracing::error!(url = %artist_url, error = %e, "Could not collect songs, skipping artist");
                    stats.failed_artists += 1;
                    continue;
                }
            };

            for song_url in &songs {
                stats.songs += 1;
                let (outcome, degraded) = self.crawl_song(song_url).await;
                if degraded {
                    stats.degraded_songs += 1;
                }
                stats.files_written += outcome.files_written();
            }
        }

        Ok(stats)
    }

    /// Extract, classify and save one song. The flag reports whether the
    /// page came back degraded.
    async fn crawl_song(&self, song_url: &str) -> (SaveOutcome, bool) {
        let content = self.client.extract_song(song_url).await;

        let lang_original = classify(&self.classifier, Some(content.lyrics.as_str()));
        let lang_translation = classify(&self.classifier, content.translation.as_deref());
        tracing::debug!(
            url = %song_url,
            original = %lang_original,
            translation = %lang_translation,
            "Classified song"
        );

        let title = content.title.as_deref().unwrap_or_default();
        let outcome = save(
            &self.store,
            title,
            &content.lyrics,
            content.translation.as_deref(),
            &lang_original,
            &lang_translation,
        );
        (outcome, content.is_degraded())
    }
}
