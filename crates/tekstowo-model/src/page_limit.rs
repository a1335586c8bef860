use std::collections::BTreeMap;

use crate::error::ModelError;
use crate::letter::Letter;

/// Highest listing page per letter bucket, as resolved from the site.
///
/// Serializes as a JSON object keyed by letter token, e.g.
/// `{"A": 41, "B": 37, ..., "pozostale": 5}`.
pub type PageTable = BTreeMap<Letter, u32>;

/// How many listing pages to walk for a letter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageLimit {
    /// The same number of pages for every letter.
    Fixed(u32),
    /// A precomputed per-letter table.
    PerLetter(PageTable),
}

impl PageLimit {
    /// Resolve the page count for `letter`.
    ///
    /// Fails with [`ModelError::InvalidArgument`] when the table has no
    /// entry for the letter.
    pub fn pages_for(&self, letter: Letter) -> Result<u32, ModelError> {
        match self {
            PageLimit::Fixed(pages) => Ok(*pages),
            PageLimit::PerLetter(table) => table.get(&letter).copied().ok_or_else(|| {
                ModelError::InvalidArgument(format!("page table has no entry for letter {letter}"))
            }),
        }
    }
}
