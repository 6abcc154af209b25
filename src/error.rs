use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Grammar(#[from] rules::GrammarError),
    #[error(transparent)]
    Lexicon(#[from] lexer::LexiconError),
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("failed to write xml: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),
    #[error("output is not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, Error>;
