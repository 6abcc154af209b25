//! Tokenization and morphological tagging for fact extraction.
//!
//! The lexer turns text into [`Token`]s annotated with a normal form and a
//! set of grammemes taken from a [`Lexicon`]. It is a small deterministic
//! stand-in for a full morphological analyzer.

use std::collections::BTreeSet;
use std::fmt::{self, Display};

mod error;
mod lexicon;
mod parser;

pub use error::LexiconError;
pub use lexicon::{Entry, Lexicon};

/// The broad class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    /// A run of Cyrillic letters.
    Russian,
    /// A run of ASCII letters.
    Latin,
    /// A run of ASCII digits.
    Int,
    /// A single punctuation or symbol character.
    Punct,
    /// Letters of mixed or other scripts.
    Other,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            TokenKind::Russian => "RU",
            TokenKind::Latin => "LATIN",
            TokenKind::Int => "INT",
            TokenKind::Punct => "PUNCT",
            TokenKind::Other => "OTHER",
        };
        write!(f, "{}", s)
    }
}

/// A tagged token. Offsets are byte offsets into the tokenized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub start: usize,
    pub end: usize,
    pub text: String,
    pub kind: TokenKind,
    /// Part of speech, when the lexicon knows the word.
    pub pos: Option<String>,
    /// Dictionary form. Falls back to the lowercased surface text.
    pub normal: String,
    pub grams: BTreeSet<String>,
}

impl Token {
    /// Create an untagged token. The normal form is the lowercased text.
    pub fn new(start: usize, end: usize, text: &str, kind: TokenKind) -> Self {
        Token {
            start,
            end,
            text: text.to_owned(),
            kind,
            pos: None,
            normal: text.to_lowercase(),
            grams: BTreeSet::new(),
        }
    }

    pub fn has_gram(&self, gram: &str) -> bool {
        self.grams.contains(gram)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}[{}..{}]:{}", self.text, self.start, self.end, self.kind)
    }
}

/// Split `text` into tokens and tag each one with `lexicon`.
///
/// Never fails. Whitespace separates tokens and is otherwise dropped.
pub fn tokenize(text: &str, lexicon: &Lexicon) -> Vec<Token> {
    let mut tokens = parser::scan(text);
    for token in tokens.iter_mut() {
        lexicon.tag(token);
    }
    tracing::trace!(count = tokens.len(), "tokenized input");
    tokens
}
