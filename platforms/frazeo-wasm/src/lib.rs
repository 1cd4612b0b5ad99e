use frazeo_classifier::PhraseTag;
use frazeo_morph::{CachedOracle, LexiconOracle, MorphOracle};
use frazeo_parser::{tokenize, TokenKind};
use frazeo_protocol::{Case, PartOfSpeech};
use frazeo_ranker::{FrazeoConfig, PhraseAnalyzer};
use frazeo_search::Highlighter;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Per-token view for the browser's debug panel
#[derive(Serialize)]
pub struct TokenDebug {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub kind: &'static str,
    pub lemma: Option<String>,
    pub pos: Option<PartOfSpeech>,
    /// Pattern tag (`N`, `ADJ`, ...) the classifier sees
    pub tag: Option<&'static str>,
    pub case: Option<Case>,
}

#[derive(Deserialize)]
struct PhraseInput {
    text: String,
    color: String,
}

#[derive(Serialize)]
struct HighlightOutput {
    html: String,
    sentence: frazeo_search::HighlightedSentence,
}

fn js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Phrase analysis running in the browser over a compiled lexicon
/// (fetched by JS as raw bytes).
#[wasm_bindgen]
pub struct FrazeoEngine {
    oracle: CachedOracle<LexiconOracle>,
    config: FrazeoConfig,
}

#[wasm_bindgen]
impl FrazeoEngine {
    #[wasm_bindgen(constructor)]
    pub fn new(lexicon: &[u8]) -> Result<FrazeoEngine, JsValue> {
        let oracle = LexiconOracle::from_archive(lexicon).map_err(js_error)?;
        Ok(Self {
            oracle: CachedOracle::new(oracle),
            config: FrazeoConfig::default(),
        })
    }

    /// Replaces the analysis settings with a TOML document.
    pub fn configure(&mut self, toml: &str) -> Result<(), JsValue> {
        self.config = FrazeoConfig::from_toml_str(toml).map_err(js_error)?;
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn version(&self) -> u32 {
        self.oracle.inner().version()
    }

    /// Text -> ranked, classified phrases as a JS object.
    pub fn analyze(&self, text: &str) -> Result<JsValue, JsValue> {
        let analyzer = PhraseAnalyzer::new(&self.oracle, self.config.clone());
        let report = analyzer.analyze(text).map_err(js_error)?;
        serde_wasm_bindgen::to_value(&report).map_err(JsValue::from)
    }

    /// `phrases` is an array of `{ text, color }` with lemmatized texts.
    pub fn highlight(&self, sentence: &str, phrases: JsValue) -> Result<JsValue, JsValue> {
        let phrases: Vec<PhraseInput> = serde_wasm_bindgen::from_value(phrases)?;
        let pairs = phrases
            .iter()
            .map(|p| (p.text.as_str(), p.color.as_str()))
            .collect::<Vec<_>>();

        let sentence = Highlighter::new(&self.oracle)
            .highlight(sentence, &pairs)
            .map_err(js_error)?;
        let output = HighlightOutput {
            html: sentence.to_html(),
            sentence,
        };
        serde_wasm_bindgen::to_value(&output).map_err(JsValue::from)
    }

    pub fn tokens(&self, text: &str) -> Result<JsValue, JsValue> {
        let tokens = tokenize(text)
            .into_iter()
            .map(|token| {
                let (kind, analysis) = match token.kind {
                    TokenKind::Word => ("Word", Some(self.oracle.analyze(token.text))),
                    TokenKind::Fragment => ("Fragment", None),
                    TokenKind::Punctuation(_) => ("Punctuation", None),
                };
                TokenDebug {
                    text: token.text.to_string(),
                    start: token.span.start,
                    end: token.span.end,
                    kind,
                    pos: analysis.as_ref().map(|a| a.pos),
                    tag: analysis.as_ref().map(|a| PhraseTag::from(a.pos).short()),
                    case: analysis.as_ref().and_then(|a| a.case),
                    lemma: analysis.map(|a| a.lemma),
                }
            })
            .collect::<Vec<_>>();

        serde_wasm_bindgen::to_value(&tokens).map_err(JsValue::from)
    }
}
