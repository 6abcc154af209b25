//! Extraction of academic facts from Russian text.
//!
//! Text is tokenized and tagged by a [`TokenSource`], the domain grammars
//! in [`GrammarSet`] are matched over the tokens, and the results are
//! gathered into a [`FactCollection`] that serializes to the `fdo_objects`
//! XML document.
//!
//! ```no_run
//! use factex::{extract, xml, GrammarSet, MorphSource};
//!
//! # fn main() -> Result<(), factex::Error> {
//! let grammars = GrammarSet::new()?;
//! let source = MorphSource::with_lexicon(None)?;
//! let facts = extract("кафедра \"Информатики\" — доцент", &grammars, &source);
//! println!("{}", xml::to_xml(&facts, "resume.txt")?);
//! # Ok(())
//! # }
//! ```

pub mod config;
mod error;
mod extract;
pub mod facts;
pub mod grammars;
pub mod source;
pub mod xml;

pub use config::{Config, Format};
pub use error::{Error, Result};
pub use extract::extract;
pub use facts::{Attribute, Fact, FactCollection, FactKind};
pub use grammars::GrammarSet;
pub use source::{MorphSource, TokenSource};
