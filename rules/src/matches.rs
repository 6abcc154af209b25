use std::iter::FusedIterator;

use lexer::Token;

use crate::error::InterpretError;
use crate::grammar::Grammar;
use crate::interpret::{Binding, Fact, Normalization, Record, Schema, Value};
use crate::reserve::Capture;
use crate::rule::Rule;
use crate::span::{join_tokens, Span};

/// A successful match of a rule, with the interpretation captures recorded
/// along the way.
#[derive(Debug, Clone)]
pub struct Match<'a> {
    tokens: &'a [Token],
    span: Span,
    captures: Vec<Capture<'a>>,
}

impl<'a> Match<'a> {
    pub(crate) fn new(tokens: &'a [Token], span: Span, captures: Vec<Capture<'a>>) -> Self {
        Match {
            tokens,
            span,
            captures,
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// The matched tokens.
    pub fn tokens(&self) -> &'a [Token] {
        &self.tokens[self.span.start..self.span.end]
    }

    /// Surface text of the match, spaced as in the source.
    pub fn text(&self) -> String {
        join_tokens(self.tokens(), |tok| tok.text.as_str())
    }

    /// Resolve the outermost fact captured by this match.
    pub fn fact(&self) -> Result<Record, InterpretError> {
        let (idx, schema) = self
            .captures
            .iter()
            .enumerate()
            .find_map(|(idx, cap)| match cap.binding {
                Binding::Fact(schema) => Some((idx, schema)),
                _ => None,
            })
            .ok_or(InterpretError::NoFact)?;
        self.resolve_fact(idx, schema)
    }

    pub fn interpret<F: Fact>(&self) -> Result<F, InterpretError> {
        F::from_record(&self.fact()?)
    }

    /// Direct children of the capture at `idx`.
    fn children(&self, idx: usize) -> impl Iterator<Item = usize> + '_ {
        let end = idx + self.captures[idx].descendants;
        let mut next = idx + 1;
        std::iter::from_fn(move || {
            if next > end {
                return None;
            }
            let child = next;
            next += self.captures[child].descendants + 1;
            Some(child)
        })
    }

    fn resolve_fact(&self, idx: usize, schema: &Schema) -> Result<Record, InterpretError> {
        let mut record = Record::empty(schema);
        self.collect_fields(idx, schema, &mut record)?;
        for spec in schema.fields() {
            if spec.required && record.get(&spec.name).is_absent() {
                return Err(InterpretError::MissingRequiredField {
                    fact: schema.name().to_owned(),
                    field: spec.name.clone(),
                });
            }
        }
        Ok(record)
    }

    /// Fill `record` from the field captures under `idx`. A fact capture of
    /// the same kind contributes its fields to the enclosing record.
    fn collect_fields(
        &self,
        idx: usize,
        schema: &Schema,
        record: &mut Record,
    ) -> Result<(), InterpretError> {
        for child in self.children(idx) {
            match self.captures[child].binding {
                Binding::Field { fact, field, mode } if fact.as_str() == schema.name() => {
                    let value = self.resolve_field(child, *mode)?;
                    if !record.set(field, value) {
                        tracing::warn!(fact = %fact, field = %field, "field missing from schema");
                    }
                }
                Binding::Fact(inner) if inner.name() == schema.name() => {
                    self.collect_fields(child, schema, record)?
                }
                other => tracing::trace!(binding = %other, "ignoring capture of another fact"),
            }
        }
        Ok(())
    }

    fn resolve_field(&self, idx: usize, mode: Normalization) -> Result<Value, InterpretError> {
        for child in self.children(idx) {
            if let Binding::Fact(schema) = self.captures[child].binding {
                return self.resolve_fact(child, schema).map(Value::Record);
            }
        }

        let span = self.captures[idx].span;
        let tokens = &self.tokens[span.start..span.end];
        Ok(match mode {
            _ if span.is_empty() => Value::Absent,
            Normalization::Raw => Value::Text(join_tokens(tokens, |tok| tok.text.as_str())),
            Normalization::Normal => Value::Text(join_tokens(tokens, |tok| tok.normal.as_str())),
            Normalization::Nested => Value::Absent,
        })
    }
}

/// Iterator over the non-overlapping matches of a rule, left to right.
#[derive(Debug)]
pub struct Matches<'a> {
    grammar: &'a Grammar,
    rule: &'a Rule,
    tokens: &'a [Token],
    pos: usize,
}

impl<'a> Matches<'a> {
    pub(crate) fn new(grammar: &'a Grammar, rule: &'a Rule, tokens: &'a [Token]) -> Self {
        Matches {
            grammar,
            rule,
            tokens,
            pos: 0,
        }
    }
}

impl<'a> Iterator for Matches<'a> {
    type Item = Match<'a>;

    fn next(&mut self) -> Option<Match<'a>> {
        while self.pos < self.tokens.len() {
            match self.grammar.match_at(self.rule, self.tokens, self.pos) {
                Some(m) if !m.span().is_empty() => {
                    tracing::trace!(span = %m.span(), "match");
                    self.pos = m.span().end;
                    return Some(m);
                }
                _ => self.pos += 1,
            }
        }
        None
    }
}

impl FusedIterator for Matches<'_> {}
