use crate::token::Token;

/// Longest n-gram the pipeline generates unless configured otherwise.
pub const DEFAULT_MAX_N: usize = 3;

/// A window of consecutive word tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NGram<'t, 'a> {
    /// Index of the first token in the token stream
    pub start: usize,
    pub tokens: &'t [Token<'a>],
}

impl<'t, 'a> NGram<'t, 'a> {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn words(&self) -> impl Iterator<Item = &'a str> + 't {
        self.tokens.iter().map(|t| t.text)
    }

    /// The n-gram as written, words joined by single spaces.
    pub fn surface(&self) -> String {
        self.words().collect::<Vec<_>>().join(" ")
    }
}

/// Every window of 1..=`max_n` consecutive tokens made only of words.
///
/// Windows are emitted by length, then by position. Repeats are kept: their
/// multiplicity is what term frequency counts.
pub fn generate_ngrams<'t, 'a>(tokens: &'t [Token<'a>], max_n: usize) -> Vec<NGram<'t, 'a>> {
    let mut ngrams = Vec::new();

    for n in 1..=max_n {
        for (start, window) in tokens.windows(n).enumerate() {
            if window.iter().all(Token::is_word) {
                ngrams.push(NGram { start, tokens: window });
            }
        }
    }

    ngrams
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::tokenize;
    use crate::token::TokenKind;
    use proptest::prelude::*;

    fn surfaces(text: &str, max_n: usize) -> Vec<String> {
        let tokens = tokenize(text);
        generate_ngrams(&tokens, max_n).iter().map(NGram::surface).collect()
    }

    #[test]
    fn test_windows_up_to_max_n() {
        assert_eq!(
            surfaces("один два три", 2),
            vec!["один", "два", "три", "один два", "два три"]
        );
    }

    #[test]
    fn test_punctuation_breaks_windows() {
        assert_eq!(surfaces("Привет, мир!", 3), vec!["Привет", "мир"]);
    }

    #[test]
    fn test_fragment_breaks_windows() {
        assert_eq!(surfaces("кот и пес", 3), vec!["кот", "пес"]);
        assert!(surfaces("а", 3).is_empty());
    }

    #[test]
    fn test_repeats_are_kept() {
        assert_eq!(surfaces("hello hello", 1), vec!["hello", "hello"]);
    }

    #[test]
    fn test_start_indexes() {
        let tokens = tokenize("мир, большой мир");
        let starts: Vec<_> = generate_ngrams(&tokens, 2).iter().map(|g| g.start).collect();
        assert_eq!(starts, vec![0, 2, 3, 2]);
    }

    proptest! {
        #[test]
        fn test_ngrams_contain_only_words(text in "[а-я a-z0-9,.!?-]{0,60}", max_n in 1usize..5) {
            let tokens = tokenize(&text);
            for ngram in generate_ngrams(&tokens, max_n) {
                prop_assert!(ngram.len() <= max_n);
                for token in ngram.tokens {
                    prop_assert_eq!(token.kind, TokenKind::Word);
                    prop_assert!(token.text.split('-').all(|part| part.chars().count() >= 2));
                }
            }
        }
    }
}
