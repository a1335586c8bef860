use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Path segment the site uses for artists whose name does not start with A-Z.
pub const OTHER_SEGMENT: &str = "pozostale";

/// An artist-index bucket: one of the 26 ASCII letters, or the "other"
/// bucket for names starting with a digit or a non-Latin character.
///
/// Ordering follows the site's index: `A` through `Z`, then the sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Letter(Bucket);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
enum Bucket {
    /// Always an uppercase ASCII letter.
    Alpha(u8),
    Other,
}

impl Letter {
    /// The sentinel bucket for non-alphabetic artist names.
    pub const OTHER: Letter = Letter(Bucket::Other);

    /// Build a letter bucket from a single ASCII letter, in either case.
    pub fn alpha(c: char) -> Result<Self, ModelError> {
        if c.is_ascii_alphabetic() {
            Ok(Self(Bucket::Alpha(c.to_ascii_uppercase() as u8)))
        } else {
            Err(ModelError::InvalidLetter(c.to_string()))
        }
    }

    /// All 27 buckets in index order.
    pub fn all() -> impl Iterator<Item = Letter> {
        (b'A'..=b'Z')
            .map(|b| Letter(Bucket::Alpha(b)))
            .chain(std::iter::once(Letter::OTHER))
    }

    pub fn is_other(&self) -> bool {
        self.0 == Bucket::Other
    }

    /// The token used in listing URLs (`A`, `B`, ..., `pozostale`).
    pub fn as_segment(&self) -> String {
        match self.0 {
            Bucket::Alpha(b) => char::from(b).to_string(),
            Bucket::Other => OTHER_SEGMENT.to_string(),
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Bucket::Alpha(b) => write!(f, "{}", char::from(b)),
            Bucket::Other => f.write_str(OTHER_SEGMENT),
        }
    }
}

impl FromStr for Letter {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(OTHER_SEGMENT) {
            return Ok(Letter::OTHER);
        }

        let mut chars = trimmed.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Letter::alpha(c).map_err(|_| ModelError::InvalidLetter(s.to_string())),
            _ => Err(ModelError::InvalidLetter(s.to_string())),
        }
    }
}

impl TryFrom<String> for Letter {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Letter> for String {
    fn from(letter: Letter) -> Self {
        letter.as_segment()
    }
}
