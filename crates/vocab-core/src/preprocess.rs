use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    /// Turn raw input into the word that is searched, recorded and bookmarked.
    /// Whitespace-only input becomes empty.
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // Compatibility forms (full-width letters, ligatures) fold to plain text
        let text: String = text.nfkc().collect();

        text.replace(['\n', '\r'], " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}
