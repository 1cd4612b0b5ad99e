//! Marks lemmatized phrases inside a sentence whatever their inflection.
//!
//! Each phrase word is expanded into the surface forms of the sentence that
//! lemmatize to it, so `машинный обучение` finds `машинного обучения`. Longer
//! phrases claim their spans first; a later match that overlaps a claimed
//! span is dropped.

use std::collections::BTreeMap;
use std::ops::Range;

use frazeo_morph::MorphOracle;
use frazeo_parser::{tokenize, Lemmatizer, TokenKind};
use regex::Regex;
use serde::Serialize;
use tracing::trace;

use crate::error::HighlightError;

/// Characters allowed between two words of one phrase occurrence.
const WORD_GAP: &str = r"[\s,;:\-–—]+";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightSpan {
    /// Character (not byte) offset into the sentence
    pub start: usize,
    pub end: usize,
    pub attribute: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HighlightedSentence {
    pub text: String,
    /// Non-overlapping, ordered by `start`
    pub spans: Vec<HighlightSpan>,
}

impl HighlightedSentence {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            spans: Vec::new(),
        }
    }

    pub fn fragment(&self, span: &HighlightSpan) -> &str {
        &self.text[self.byte_range(span)]
    }

    /// Byte range of a character-offset span, for slicing `text`.
    pub fn byte_range(&self, span: &HighlightSpan) -> Range<usize> {
        let byte_at = |chars: usize| {
            self.text
                .char_indices()
                .nth(chars)
                .map_or(self.text.len(), |(idx, _)| idx)
        };
        byte_at(span.start)..byte_at(span.end)
    }

    /// Wraps every span with `open(attribute)` and `close`.
    pub fn render<F>(&self, open: F, close: &str) -> String
    where
        F: Fn(&str) -> String,
    {
        let mut out = String::with_capacity(self.text.len());
        let mut cursor = 0;
        for span in &self.spans {
            let bytes = self.byte_range(span);
            out.push_str(&self.text[cursor..bytes.start]);
            out.push_str(&open(&span.attribute));
            out.push_str(&self.text[bytes.clone()]);
            out.push_str(close);
            cursor = bytes.end;
        }
        out.push_str(&self.text[cursor..]);
        out
    }

    pub fn to_html(&self) -> String {
        self.render(|color| format!("<span style=\"color: {color}\">"), "</span>")
    }
}

pub struct Highlighter<'o, O: ?Sized> {
    lemmatizer: Lemmatizer<'o, O>,
}

impl<'o, O: MorphOracle + ?Sized> Highlighter<'o, O> {
    pub fn new(oracle: &'o O) -> Self {
        Self {
            lemmatizer: Lemmatizer::new(oracle),
        }
    }

    /// Highlights each `(lemmatized phrase, attribute)` pair in `sentence`.
    pub fn highlight<P, A>(&self, sentence: &str, phrases: &[(P, A)]) -> Result<HighlightedSentence, HighlightError>
    where
        P: AsRef<str>,
        A: AsRef<str>,
    {
        let forms = self.surface_forms(sentence);

        let mut ordered = phrases.iter().collect::<Vec<_>>();
        ordered.sort_by_key(|(phrase, _)| std::cmp::Reverse(phrase.as_ref().split_whitespace().count()));

        // Claimed byte ranges; converted to character offsets at the end
        let mut claimed: Vec<(Range<usize>, &str)> = Vec::new();
        for (phrase, attribute) in ordered {
            let Some(pattern) = phrase_pattern(phrase.as_ref(), &forms)? else {
                continue;
            };

            for found in pattern.find_iter(sentence) {
                let overlaps = claimed
                    .iter()
                    .any(|(r, _)| found.start() < r.end && r.start < found.end());
                if overlaps {
                    continue;
                }
                trace!(phrase = phrase.as_ref(), at = found.start(), "highlight");
                claimed.push((found.range(), attribute.as_ref()));
            }
        }

        claimed.sort_by_key(|(r, _)| r.start);
        let spans = claimed
            .into_iter()
            .map(|(bytes, attribute)| {
                let start = sentence[..bytes.start].chars().count();
                HighlightSpan {
                    start,
                    end: start + sentence[bytes].chars().count(),
                    attribute: attribute.to_string(),
                }
            })
            .collect();
        Ok(HighlightedSentence {
            text: sentence.to_string(),
            spans,
        })
    }

    /// Lemma of every word in the sentence mapped to its distinct surfaces.
    fn surface_forms<'s>(&self, sentence: &'s str) -> BTreeMap<String, Vec<&'s str>> {
        let mut forms: BTreeMap<String, Vec<&'s str>> = BTreeMap::new();
        for token in tokenize(sentence) {
            if matches!(token.kind, TokenKind::Punctuation(_)) {
                continue;
            }
            let entry = forms.entry(self.lemmatizer.lemmatize_word(token.text)).or_default();
            if !entry.contains(&token.text) {
                entry.push(token.text);
            }
        }
        forms
    }
}

fn phrase_pattern(phrase: &str, forms: &BTreeMap<String, Vec<&str>>) -> Result<Option<Regex>, HighlightError> {
    let words = phrase
        .split_whitespace()
        .map(|word| {
            let lemma = word.to_lowercase();
            let mut alternatives = match forms.get(&lemma) {
                Some(surfaces) => surfaces.iter().map(|s| regex::escape(s)).collect::<Vec<_>>(),
                None => vec![regex::escape(word)],
            };
            alternatives.sort_by_key(|a| std::cmp::Reverse(a.len()));
            format!("(?:{})", alternatives.join("|"))
        })
        .collect::<Vec<_>>();

    if words.is_empty() {
        return Ok(None);
    }

    let source = format!(r"(?i)\b{}\b", words.join(WORD_GAP));
    Ok(Some(Regex::new(&source)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use frazeo_morph::LexiconOracle;
    use frazeo_protocol::{Case, Lexicon, PartOfSpeech};

    fn oracle() -> LexiconOracle {
        LexiconOracle::from_lexicon(
            Lexicon::new(1)
                .with_form("машинного", "машинный", PartOfSpeech::Adjective, Some(Case::Genitive))
                .with_form("обучения", "обучение", PartOfSpeech::Noun, Some(Case::Genitive))
                .with_form("обучение", "обучение", PartOfSpeech::Noun, Some(Case::Nominative))
                .with_form("сети", "сеть", PartOfSpeech::Noun, Some(Case::Genitive)),
        )
    }

    #[test]
    fn test_inflected_phrase_highlighted_once() {
        let oracle = oracle();
        let highlighter = Highlighter::new(&oracle);

        let result = highlighter
            .highlight("Основы машинного обучения и обучения.", &[("машинный обучение", "green"), ("обучение", "black")])
            .unwrap();

        assert_eq!(result.spans.len(), 2);
        assert_eq!(result.fragment(&result.spans[0]), "машинного обучения");
        assert_eq!(result.spans[0].attribute, "green");
        assert_eq!(result.fragment(&result.spans[1]), "обучения");
        assert_eq!(result.spans[1].attribute, "black");
        assert_eq!(
            result.to_html(),
            "Основы <span style=\"color: green\">машинного обучения</span> и \
             <span style=\"color: black\">обучения</span>."
        );
    }

    #[test]
    fn test_spans_count_characters() {
        let oracle = oracle();
        let highlighter = Highlighter::new(&oracle);

        let sentence = "Основы машинного обучения";
        let result = highlighter.highlight(sentence, &[("машинный обучение", "green")]).unwrap();

        let span = &result.spans[0];
        assert_eq!((span.start, span.end), (7, 25));
        assert_eq!(span.end, sentence.chars().count());
        assert_eq!(result.byte_range(span), 13..sentence.len());
        assert_eq!(result.fragment(span), "машинного обучения");
    }

    #[test]
    fn test_longer_phrase_wins_regardless_of_order() {
        let oracle = oracle();
        let highlighter = Highlighter::new(&oracle);

        let result = highlighter
            .highlight("Теория машинного обучения", &[("обучение", "black"), ("машинный обучение", "orange")])
            .unwrap();

        assert_eq!(result.spans.len(), 1);
        assert_eq!(result.fragment(&result.spans[0]), "машинного обучения");
        assert_eq!(result.spans[0].attribute, "orange");
    }

    #[test]
    fn test_case_insensitive_and_separators() {
        let oracle = oracle();
        let highlighter = Highlighter::new(&oracle);

        let result = highlighter
            .highlight("МАШИННОГО, обучения хватит", &[("машинный обучение", "green")])
            .unwrap();

        assert_eq!(result.spans.len(), 1);
        assert_eq!(result.fragment(&result.spans[0]), "МАШИННОГО, обучения");
    }

    #[test]
    fn test_literal_fallback_when_form_absent() {
        let oracle = oracle();
        let highlighter = Highlighter::new(&oracle);

        let result = highlighter.highlight("Узел сети", &[("узел", "black"), ("граф", "green")]).unwrap();
        assert_eq!(result.spans.len(), 1);
        assert_eq!(result.fragment(&result.spans[0]), "Узел");

        let whole_word = highlighter.highlight("Подузел сети", &[("узел", "black")]).unwrap();
        assert!(whole_word.spans.is_empty());
    }

    #[test]
    fn test_metacharacters_are_escaped() {
        let oracle = oracle();
        let highlighter = Highlighter::new(&oracle);

        let result = highlighter.highlight("Язык C++ и сети", &[("c++", "black"), ("(", "green")]);
        assert!(result.is_ok());
    }

    #[test]
    fn test_render_custom_markers() {
        let sentence = HighlightedSentence {
            text: "один два три".into(),
            spans: vec![
                HighlightSpan { start: 0, end: 4, attribute: "a".into() },
                HighlightSpan { start: 9, end: 12, attribute: "b".into() },
            ],
        };

        assert_eq!(sentence.render(|a| format!("[{a}:"), "]"), "[a:один] два [b:три]");
        assert_eq!(HighlightedSentence::plain("текст").to_html(), "текст");
    }
}
