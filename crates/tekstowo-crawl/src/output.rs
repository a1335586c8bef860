use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tekstowo_model::{artifact_name, persistable_code, ContentKind, Language};

use crate::normalize;

/// Somewhere to put named text blobs.
pub trait ArtifactStore {
    /// Write `contents` under `name`, replacing anything already there.
    fn persist(&self, name: &str, contents: &str) -> Result<()>;
}

/// Stores artifacts as UTF-8 files in a single directory.
#[derive(Debug, Clone)]
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    /// Use `dir` for output, creating it if it doesn't exist.
    pub fn create(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory {}", dir.display()))?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ArtifactStore for DirStore {
    fn persist(&self, name: &str, contents: &str) -> Result<()> {
        let path = self.dir.join(name);
        fs::write(&path, contents).with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::debug!(path = %path.display(), bytes = contents.len(), "Wrote artifact");
        Ok(())
    }
}

/// File names written by one [`save`] call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveOutcome {
    pub original: Option<String>,
    pub translation: Option<String>,
}

impl SaveOutcome {
    pub fn files_written(&self) -> usize {
        usize::from(self.original.is_some()) + usize::from(self.translation.is_some())
    }
}

/// Save a song's lyrics and translation, each only if it is long enough and
/// its language was determined. Text is written as extracted, apart from
/// composing decomposed diacritics; the length check sees the same text.
///
/// Skipped content and failed writes are logged; nothing is returned as an
/// error.
pub fn save<S>(
    store: &S,
    title: &str,
    original: &str,
    translation: Option<&str>,
    lang_original: &Language,
    lang_translation: &Language,
) -> SaveOutcome
where
    S: ArtifactStore + ?Sized,
{
    let original = write_artifact(store, title, ContentKind::Original, Some(original), lang_original);
    let translation = write_artifact(
        store,
        title,
        ContentKind::Translation,
        translation,
        lang_translation,
    );
    SaveOutcome {
        original,
        translation,
    }
}

fn write_artifact<S>(
    store: &S,
    title: &str,
    kind: ContentKind,
    text: Option<&str>,
    lang: &Language,
) -> Option<String>
where
    S: ArtifactStore + ?Sized,
{
    let text = text.map(normalize::compose_diacritics);
    let (Some(text), Some(code)) = (text.as_deref(), persistable_code(text.as_deref(), lang)) else {
        match kind {
            ContentKind::Original => {
                tracing::info!(title = %title, lang = %lang, "{title}: Lyrics not found or empty")
            }
            ContentKind::Translation => {
                tracing::info!(title = %title, lang = %lang, "{title}: Translation not found or empty")
            }
        }
        return None;
    };

    let name = artifact_name(title, kind, code);
    match store.persist(&name, text) {
        Ok(()) => {
            tracing::info!(title = %title, file = %name, "Saved {kind}: {title}");
            Some(name)
        }
        Err(e) => {
            let error = format!("{e:#}");
            tracing::error!(title = %title, file = %name, error = %error, "Could not save {kind}");
            None
        }
    }
}
