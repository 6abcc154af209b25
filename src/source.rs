//! The token source: tokenization, tagging and person-name recognition.

use lexer::{Lexicon, Token};
use rules::{Grammar, Rule};

use crate::error::Result;
use crate::grammars::PersonName;

/// Hands the extractor tagged tokens and the first person name among them.
pub trait TokenSource {
    fn tokenize(&self, text: &str) -> Vec<Token>;

    /// The first person name in `tokens`, which came from [`tokenize`].
    ///
    /// [`tokenize`]: TokenSource::tokenize
    fn first_name(&self, tokens: &[Token]) -> Option<PersonName>;
}

/// Lexicon-backed token source.
#[derive(Debug, Clone)]
pub struct MorphSource {
    lexicon: Lexicon,
    grammar: Grammar,
    names: Rule,
}

impl MorphSource {
    pub fn new(lexicon: Lexicon) -> Result<Self> {
        Ok(MorphSource {
            lexicon,
            grammar: Grammar::new(),
            names: crate::grammars::person_name()?,
        })
    }

    /// Source using the builtin lexicon merged with `extra`.
    pub fn with_lexicon(extra: Option<Lexicon>) -> Result<Self> {
        let mut lexicon = Lexicon::builtin()?;
        if let Some(extra) = extra {
            lexicon.merge(extra);
        }
        Self::new(lexicon)
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }
}

impl TokenSource for MorphSource {
    fn tokenize(&self, text: &str) -> Vec<Token> {
        lexer::tokenize(text, &self.lexicon)
    }

    fn first_name(&self, tokens: &[Token]) -> Option<PersonName> {
        let found = self.grammar.find_all(&self.names, tokens).next()?;
        match found.interpret::<PersonName>() {
            Ok(name) => Some(name),
            Err(e) => {
                tracing::warn!(error = %e, span = %found.span(), "discarding person name");
                None
            }
        }
    }
}
