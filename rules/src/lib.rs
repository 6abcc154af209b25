//! Grammar combinators over tagged tokens, and the interpretation of their
//! matches into facts.

mod error;
mod grammar;
mod interpret;
mod matches;
pub mod predicate;
mod reserve;
mod rule;
mod span;
mod state;

pub use error::{GrammarError, InterpretError};
pub use grammar::Grammar;
pub use interpret::{Binding, Fact, FieldSpec, Normalization, Record, Schema, Value};
pub use matches::{Match, Matches};
pub use predicate::Predicate;
pub use rule::{literal, not_, or_, reference, rule, Rule};
pub use span::{join_tokens, RelativeLocation, Span};
pub use state::MAX_DEPTH;

pub use lexer::{Token, TokenKind};
