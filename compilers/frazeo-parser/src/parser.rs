use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{anychar, char},
    combinator::{map, recognize, verify},
    multi::many0,
    sequence::{pair, preceded},
    IResult,
};

use crate::token::{Span, Token, TokenKind};

/// Word characters as regex `\w` has them: letters and digits of any script,
/// plus `_`. Surface-form vectorizing splits on the same rule.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn whitespace(input: &str) -> IResult<&str, &str> {
    take_while(char::is_whitespace)(input)
}

/// One hyphen-separated part of a word: at least two word characters.
fn word_part(input: &str) -> IResult<&str, &str> {
    verify(take_while1(is_word_char), |part: &str| part.chars().nth(1).is_some())(input)
}

/// `part(-part)*`, e.g. "кто-то", "из-за", "2024".
fn word(input: &str) -> IResult<&str, &str> {
    recognize(pair(word_part, many0(preceded(char('-'), word_part))))(input)
}

fn raw_token(input: &str) -> IResult<&str, TokenKind> {
    alt((
        map(word, |_| TokenKind::Word),
        map(take_while1(is_word_char), |_| TokenKind::Fragment),
        map(anychar, TokenKind::Punctuation),
    ))(input)
}

/// Splits text into word, fragment and punctuation tokens. Whitespace is
/// dropped; spans are byte offsets into `text`.
pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut input = text;
    let mut tokens = Vec::new();

    loop {
        // 1. Skip whitespace
        let Ok((rest, _)) = whitespace(input) else {
            break;
        };
        input = rest;

        if input.is_empty() {
            break;
        }

        // 2. Take exactly one token; `anychar` guarantees progress
        let Ok((rest, kind)) = raw_token(input) else {
            break;
        };

        let start = text.len() - input.len();
        let end = text.len() - rest.len();
        tokens.push(Token {
            span: Span::new(start, end),
            text: &text[start..end],
            kind,
        });
        input = rest;
    }

    tokens
}

/// Splits text into sentences after `.`, `!` or `?` followed by whitespace.
/// Pieces are trimmed and empty ones dropped.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        if let Some(&(next_idx, next)) = chars.peek() {
            if next.is_whitespace() {
                sentences.push(&text[start..next_idx]);
                start = next_idx;
            }
        }
    }
    sentences.push(&text[start..]);

    sentences
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<(&str, TokenKind)> {
        tokenize(text).into_iter().map(|t| (t.text, t.kind)).collect()
    }

    #[test]
    fn test_words_and_punctuation() {
        assert_eq!(
            kinds("Привет, мир!"),
            vec![
                ("Привет", TokenKind::Word),
                (",", TokenKind::Punctuation(',')),
                ("мир", TokenKind::Word),
                ("!", TokenKind::Punctuation('!')),
            ]
        );
    }

    #[test]
    fn test_hyphenated_word_is_one_token() {
        assert_eq!(kinds("test-test"), vec![("test-test", TokenKind::Word)]);
        assert_eq!(kinds("из-за"), vec![("из-за", TokenKind::Word)]);
    }

    #[test]
    fn test_short_hyphen_part_splits() {
        assert_eq!(
            kinds("ab-c"),
            vec![
                ("ab", TokenKind::Word),
                ("-", TokenKind::Punctuation('-')),
                ("c", TokenKind::Fragment),
            ]
        );
    }

    #[test]
    fn test_single_letters_are_fragments() {
        assert_eq!(
            kinds("кот и пес"),
            vec![
                ("кот", TokenKind::Word),
                ("и", TokenKind::Fragment),
                ("пес", TokenKind::Word),
            ]
        );
    }

    #[test]
    fn test_underscore_is_word_char() {
        assert_eq!(kinds("snake_case"), vec![("snake_case", TokenKind::Word)]);
        assert_eq!(kinds("_"), vec![("_", TokenKind::Fragment)]);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            kinds("123 5.0"),
            vec![
                ("123", TokenKind::Word),
                ("5", TokenKind::Fragment),
                (".", TokenKind::Punctuation('.')),
                ("0", TokenKind::Fragment),
            ]
        );
    }

    #[test]
    fn test_spans_point_into_input() {
        let text = "  Красная\u{a0}шапочка. ";
        for token in tokenize(text) {
            assert_eq!(&text[token.span.start..token.span.end], token.text);
        }
        assert_eq!(tokenize(text).len(), 3);
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \n\t").is_empty());
    }

    #[test]
    fn test_split_sentences() {
        let text = "Первое предложение. Второе!  Третье? 5.0 не делится";
        assert_eq!(
            split_sentences(text),
            vec!["Первое предложение.", "Второе!", "Третье?", "5.0 не делится"]
        );
        assert!(split_sentences("   ").is_empty());
    }
}
