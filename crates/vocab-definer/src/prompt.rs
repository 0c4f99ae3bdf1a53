pub const DICTIONARY_PREAMBLE: &str = "Consider that you are a dictionary AI. We will give you a word and you need to give all the dictionary details in good form, including examples, meanings, definitions, synonyms, phonetics etc.";

pub fn build_prompt(word: &str) -> String {
    format!("{DICTIONARY_PREAMBLE} The Word is {word}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_follows_preamble() {
        let prompt = build_prompt("serendipity");

        assert!(prompt.starts_with(DICTIONARY_PREAMBLE));
        assert!(prompt.ends_with("The Word is serendipity"));
    }
}
