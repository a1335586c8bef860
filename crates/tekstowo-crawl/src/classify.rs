use tekstowo_model::Language;

/// Identifies the language of a piece of text.
pub trait LanguageClassifier {
    /// A language code for `text`, or `None` when no language can be
    /// determined.
    fn detect(&self, text: &str) -> Option<String>;
}

/// Classifier backed by `whatlang`, reporting ISO 639-1 codes where one
/// exists and ISO 639-3 codes otherwise.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatlangClassifier;

impl LanguageClassifier for WhatlangClassifier {
    fn detect(&self, text: &str) -> Option<String> {
        let info = whatlang::detect(text)?;
        let code = info.lang().code();
        Some(iso_639_1(code).unwrap_or(code).to_string())
    }
}

/// Classify optional text. Absent or blank text is `Undetermined` without
/// consulting the classifier.
pub fn classify<C>(classifier: &C, text: Option<&str>) -> Language
where
    C: LanguageClassifier + ?Sized,
{
    let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
        return Language::Undetermined;
    };

    match classifier.detect(text) {
        Some(code) => Language::Code(code),
        None => Language::Undetermined,
    }
}

fn iso_639_1(code: &str) -> Option<&'static str> {
    let short = match code {
        "afr" => "af",
        "aka" => "ak",
        "amh" => "am",
        "ara" => "ar",
        "aze" => "az",
        "bel" => "be",
        "ben" => "bn",
        "bul" => "bg",
        "cat" => "ca",
        "ces" => "cs",
        "cmn" => "zh",
        "dan" => "da",
        "deu" => "de",
        "ell" => "el",
        "eng" => "en",
        "epo" => "eo",
        "est" => "et",
        "fin" => "fi",
        "fra" => "fr",
        "guj" => "gu",
        "heb" => "he",
        "hin" => "hi",
        "hrv" => "hr",
        "hun" => "hu",
        "hye" => "hy",
        "ind" => "id",
        "ita" => "it",
        "jav" => "jv",
        "jpn" => "ja",
        "kan" => "kn",
        "kat" => "ka",
        "khm" => "km",
        "kor" => "ko",
        "lat" => "la",
        "lav" => "lv",
        "lit" => "lt",
        "mal" => "ml",
        "mar" => "mr",
        "mkd" => "mk",
        "mya" => "my",
        "nep" => "ne",
        "nld" => "nl",
        "nob" => "nb",
        "ori" => "or",
        "pan" => "pa",
        "pes" => "fa",
        "pol" => "pl",
        "por" => "pt",
        "ron" => "ro",
        "rus" => "ru",
        "sin" => "si",
        "slk" => "sk",
        "slv" => "sl",
        "sna" => "sn",
        "spa" => "es",
        "srp" => "sr",
        "swe" => "sv",
        "tam" => "ta",
        "tel" => "te",
        "tgl" => "tl",
        "tha" => "th",
        "tuk" => "tk",
        "tur" => "tr",
        "ukr" => "uk",
        "urd" => "ur",
        "uzb" => "uz",
        "vie" => "vi",
        "yid" => "yi",
        "zul" => "zu",
        _ => return None,
    };
    Some(short)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    /// Counts how often it is asked, and never decides.
    #[derive(Default)]
    struct CountingClassifier {
        calls: Cell<usize>,
    }

    impl LanguageClassifier for CountingClassifier {
        fn detect(&self, _text: &str) -> Option<String> {
            self.calls.set(self.calls.get() + 1);
            None
        }
    }

    #[test]
    fn test_absent_text_skips_classifier() {
        let classifier = CountingClassifier::default();
        assert_eq!(classify(&classifier, None), Language::Undetermined);
        assert_eq!(classify(&classifier, Some("   \n\t")), Language::Undetermined);
        assert_eq!(classifier.calls.get(), 0);
    }

    #[test]
    fn test_classifier_failure_is_undetermined() {
        let classifier = CountingClassifier::default();
        assert_eq!(classify(&classifier, Some("la la la")), Language::Undetermined);
        assert_eq!(classifier.calls.get(), 1);
    }

    #[test]
    fn test_whatlang_polish() {
        let text = "Wlazł kotek na płotek i mruga, ładna to piosenka, niedługa. \
                    Nie długa, nie krótka, lecz w sam raz, zaśpiewaj koteczku jeszcze raz.";
        assert_eq!(classify(&WhatlangClassifier, Some(text)), Language::Code("pl".into()));
    }

    #[test]
    fn test_whatlang_english() {
        let text = "You can dance, you can jive, having the time of your life. \
                    See that girl, watch that scene, digging the dancing queen.";
        assert_eq!(classify(&WhatlangClassifier, Some(text)), Language::Code("en".into()));
    }

    #[test]
    fn test_whatlang_cannot_decide() {
        assert_eq!(classify(&WhatlangClassifier, Some("123 456 !!!")), Language::Undetermined);
    }

    #[test]
    fn test_iso_639_1() {
        assert_eq!(iso_639_1("pol"), Some("pl"));
        assert_eq!(iso_639_1("eng"), Some("en"));
        assert_eq!(iso_639_1("xyz"), None);
    }
}
