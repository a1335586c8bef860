use std::fmt;

/// Text must be longer than this many characters to be worth saving.
pub const MIN_CONTENT_CHARS: usize = 10;

/// Language codes must be shorter than this to be used in a file name.
pub const MAX_LANG_CODE_CHARS: usize = 3;

/// Text scraped from a single song page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SongContent {
    /// `None` when the page could not be fetched or had no title.
    pub title: Option<String>,
    /// Original lyrics; empty when the page had none.
    pub lyrics: String,
    /// `None` when the page had no translation section.
    pub translation: Option<String>,
}

impl SongContent {
    /// The result returned for a page that could not be fetched or parsed.
    pub fn degraded() -> Self {
        Self::default()
    }

    pub fn is_degraded(&self) -> bool {
        self.title.is_none()
    }
}

/// Outcome of language identification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Language {
    /// Short language code, e.g. "pl" or "en".
    Code(String),
    /// No input, or the classifier could not decide.
    Undetermined,
}

impl Language {
    pub fn code(&self) -> Option<&str> {
        match self {
            Language::Code(code) => Some(code),
            Language::Undetermined => None,
        }
    }

    /// The code, if it is short enough to name an artifact.
    pub fn usable_code(&self) -> Option<&str> {
        self.code()
            .filter(|code| code.chars().count() < MAX_LANG_CODE_CHARS)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Code(code) => f.write_str(code),
            Language::Undetermined => f.write_str("undetermined"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Original,
    Translation,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentKind::Original => f.write_str("lyrics"),
            ContentKind::Translation => f.write_str("translation"),
        }
    }
}

/// Replace path separators so a title can be used as a file name.
pub fn sanitize_title(title: &str) -> String {
    title.replace(['/', '\\'], "-")
}

/// File name for a saved artifact:
/// `{title}__{LANG}.txt` or `{title}__TRAN__{LANG}.txt`.
pub fn artifact_name(title: &str, kind: ContentKind, code: &str) -> String {
    let title = sanitize_title(title);
    let lang = code.to_uppercase();
    match kind {
        ContentKind::Original => format!("{title}__{lang}.txt"),
        ContentKind::Translation => format!("{title}__TRAN__{lang}.txt"),
    }
}

/// Returns the language code to save `text` under, or `None` when the text
/// is missing, too short, or its language is unusable.
pub fn persistable_code<'a>(text: Option<&str>, lang: &'a Language) -> Option<&'a str> {
    let code = lang.usable_code()?;
    let long_enough = text.is_some_and(|t| t.chars().count() > MIN_CONTENT_CHARS);
    long_enough.then_some(code)
}
