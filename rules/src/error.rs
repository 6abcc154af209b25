use thiserror::Error;

/// Defects in how a grammar was put together.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("rule '{0}' is already defined")]
    DuplicateRule(String),
    #[error("fact '{fact}' has no field '{field}'")]
    UnknownField { fact: String, field: String },
    #[error("reference to undefined rule '{0}'")]
    UnresolvedReference(String),
}

/// Failures turning a match into a fact.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpretError {
    #[error("required field '{field}' of fact '{fact}' was not captured")]
    MissingRequiredField { fact: String, field: String },
    #[error("match carries no fact interpretation")]
    NoFact,
}
