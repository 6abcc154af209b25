use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use factex::{extract, xml, Config, Format, GrammarSet, MorphSource};
use lexer::Lexicon;

/// Extract academic facts from text and print them as an XML fact document.
#[derive(Debug, Parser)]
#[command(name = "factex", version)]
struct Cli {
    /// Input text file. Reads stdin when absent.
    input: Option<PathBuf>,

    /// TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Extra lexicon merged over the builtin one.
    #[arg(long)]
    lexicon: Option<PathBuf>,

    /// Document identifier. Defaults to the input path.
    #[arg(long)]
    url: Option<String>,

    #[arg(long, value_enum)]
    format: Option<Format>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };

    let text = match &cli.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading stdin")?;
            buf
        }
    };

    let lexicon = match cli.lexicon.as_ref().or(config.lexicon.as_ref()) {
        Some(path) => Some(
            Lexicon::load(path).with_context(|| format!("loading lexicon {}", path.display()))?,
        ),
        None => None,
    };

    let grammars = GrammarSet::new().context("building grammars")?;
    let source = MorphSource::with_lexicon(lexicon)?;
    let facts = extract(&text, &grammars, &source);
    tracing::info!(facts = facts.len(), "extraction finished");

    let url = cli
        .url
        .or(config.url)
        .or_else(|| cli.input.as_ref().map(|p| p.display().to_string()))
        .unwrap_or_default();

    match cli.format.unwrap_or(config.format) {
        Format::Xml => println!("{}", xml::to_xml(&facts, &url)?),
        Format::Json => println!("{}", serde_json::to_string_pretty(&facts)?),
    }
    Ok(())
}
