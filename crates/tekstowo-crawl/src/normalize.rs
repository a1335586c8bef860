use std::borrow::Cow;

use unicode_normalization::{is_nfc, UnicodeNormalization};

/// Compose Polish diacritics that arrive as a base letter plus a combining
/// mark (`z` + U+0307 for `ż`). Text already in NFC is returned untouched;
/// nothing else about the lyrics changes.
pub fn compose_diacritics(text: &str) -> Cow<'_, str> {
    if is_nfc(text) {
        Cow::Borrowed(text)
    } else {
        Cow::Owned(text.nfc().collect())
    }
}
