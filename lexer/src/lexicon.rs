use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::LexiconError;
use crate::Token;

const BUILTIN: &str = include_str!("../data/lexicon.toml");

/// A single lexeme: every surface form shares the same normal form and tags.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Entry {
    pub forms: Vec<String>,
    pub normal: String,
    #[serde(default)]
    pub pos: Option<String>,
    #[serde(default)]
    pub grams: BTreeSet<String>,
}

#[derive(Debug, Deserialize)]
struct LexiconFile {
    #[serde(default)]
    entry: Vec<Entry>,
}

/// Maps lowercased surface forms to lexemes.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    entries: Vec<Entry>,
    forms: HashMap<String, usize>,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// The lexicon shipped with the crate, covering the vocabulary of the
    /// academic fact grammars.
    pub fn builtin() -> Result<Self, LexiconError> {
        Self::from_toml_str(BUILTIN)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, LexiconError> {
        let file: LexiconFile = toml::from_str(s)?;
        let mut lexicon = Self::new();
        for entry in file.entry {
            lexicon.insert(entry)?;
        }
        Ok(lexicon)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LexiconError> {
        let path = path.as_ref();
        let data = fs::read_to_string(path).map_err(|source| LexiconError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&data)
    }

    /// Add an entry. Forms already present are re-pointed at the new entry.
    pub fn insert(&mut self, entry: Entry) -> Result<(), LexiconError> {
        if entry.forms.is_empty() {
            return Err(LexiconError::EmptyEntry {
                normal: entry.normal,
            });
        }
        let idx = self.entries.len();
        for form in &entry.forms {
            self.forms.insert(form.to_lowercase(), idx);
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Add every entry of `other`, overriding forms both lexicons know.
    pub fn merge(&mut self, other: Lexicon) {
        for entry in other.entries {
            // Entries from a built lexicon are never empty.
            let _ = self.insert(entry);
        }
    }

    pub fn lookup(&self, word: &str) -> Option<&Entry> {
        self.forms
            .get(&word.to_lowercase())
            .map(|&idx| &self.entries[idx])
    }

    /// Copy normal form and tags onto a token when its surface form is known.
    pub fn tag(&self, token: &mut Token) {
        if let Some(entry) = self.lookup(&token.text) {
            token.normal = entry.normal.clone();
            token.pos = entry.pos.clone();
            token.grams = entry.grams.clone();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
