use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use frazeo_morph::{encode_lexicon, CachedOracle, LexiconOracle};
use frazeo_protocol::{Document, Lexicon, TermRecord};
use frazeo_ranker::{FrazeoConfig, PhraseAnalyzer};
use frazeo_search::DictionarySearch;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Russian phrase extraction, ranking and search")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compiles a JSON lexicon to the binary archive
    Compile {
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Extracts, ranks and classifies the phrases of a text ("-" reads stdin)
    Analyze {
        #[arg(short, long, value_name = "FILE")]
        lexicon: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Also classify prepositional and adverbial phrase types
        #[arg(long)]
        extended: bool,

        #[arg(long)]
        pretty: bool,

        #[arg(value_name = "FILE")]
        text: PathBuf,
    },
    /// Searches dictionary records and the sentences that mention them
    Search {
        #[arg(short, long, value_name = "FILE")]
        lexicon: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// JSON array of dictionary records
        #[arg(long, value_name = "FILE")]
        terms: PathBuf,

        /// JSON array of documents
        #[arg(long, value_name = "FILE")]
        documents: PathBuf,

        /// Print sentences as HTML instead of JSON
        #[arg(long)]
        html: bool,

        query: String,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Compile { input, output } => compile(&input, &output),
        Command::Analyze {
            lexicon,
            config,
            extended,
            pretty,
            text,
        } => {
            let mut config = load_config(config.as_deref())?;
            config.extended_patterns |= extended;
            analyze(&lexicon, config, &text, pretty)
        }
        Command::Search {
            lexicon,
            config,
            terms,
            documents,
            html,
            query,
        } => search(&lexicon, load_config(config.as_deref())?, &terms, &documents, html, &query),
    }
}

fn compile(input: &Path, output: &Path) -> anyhow::Result<()> {
    info!(input = %input.display(), "reading lexicon source");
    let source = fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?;
    let lexicon: Lexicon = serde_json::from_str(&source).context("parsing lexicon JSON")?;

    info!(
        version = lexicon.version,
        forms = lexicon.forms.len(),
        stems = lexicon.stems.len(),
        paradigms = lexicon.paradigms.len(),
        "compiling lexicon"
    );
    let bytes = encode_lexicon(&lexicon)?;
    fs::write(output, &bytes).with_context(|| format!("writing {}", output.display()))?;

    info!(output = %output.display(), bytes = bytes.len(), "lexicon written");
    Ok(())
}

fn analyze(lexicon: &Path, config: FrazeoConfig, text: &Path, pretty: bool) -> anyhow::Result<()> {
    let oracle = load_oracle(lexicon)?;
    let text = read_text(text)?;

    let report = PhraseAnalyzer::new(&oracle, config).analyze(&text)?;
    info!(
        phrases = report.total_phrases,
        types = report.unique_phrase_types,
        cached_forms = oracle.len(),
        "analysis finished"
    );
    print_json(&report, pretty)
}

fn search(
    lexicon: &Path,
    config: FrazeoConfig,
    terms: &Path,
    documents: &Path,
    html: bool,
    query: &str,
) -> anyhow::Result<()> {
    let oracle = load_oracle(lexicon)?;
    let terms: Vec<TermRecord> = read_json(terms)?;
    let documents: Vec<Document> = read_json(documents)?;

    let matches = DictionarySearch::new(&oracle, config.ngram_max, config.search)
        .search(query, &terms, &documents)?;
    info!(query, hits = matches.len(), "search finished");

    if !html {
        return print_json(&matches, true);
    }
    for found in &matches {
        println!("{} ({:.3})", found.term.text, found.score);
        for sentence in &found.sentences {
            println!("  [{}] {}", sentence.document, sentence.sentence.to_html());
        }
    }
    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<FrazeoConfig> {
    let Some(path) = path else {
        return Ok(FrazeoConfig::default());
    };
    let source = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    FrazeoConfig::from_toml_str(&source).with_context(|| format!("loading config {}", path.display()))
}

fn load_oracle(path: &Path) -> anyhow::Result<CachedOracle<LexiconOracle>> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let oracle = LexiconOracle::from_archive(&bytes).with_context(|| format!("loading lexicon {}", path.display()))?;
    info!(version = oracle.version(), "lexicon loaded");
    Ok(CachedOracle::new(oracle))
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text).context("reading stdin")?;
        return Ok(text);
    }
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let source = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&source).with_context(|| format!("parsing {}", path.display()))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> anyhow::Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{out}");
    Ok(())
}
