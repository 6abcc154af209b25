use std::collections::BTreeMap;

use lexer::Token;

use crate::error::GrammarError;
use crate::matches::{Match, Matches};
use crate::rule::Rule;
use crate::span::Span;
use crate::state::{State, StateResult};

/// A set of named rules, and the matcher that runs rules against tokens.
///
/// Named rules are shared by reference: any rule may contain a
/// [`Rule::Reference`] to a name defined here, including its own.
#[derive(Debug, Clone, Default)]
pub struct Grammar {
    rules: BTreeMap<String, Rule>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn define(&mut self, name: impl Into<String>, rule: Rule) -> Result<(), GrammarError> {
        let name = name.into();
        if self.rules.contains_key(&name) {
            return Err(GrammarError::DuplicateRule(name));
        }
        self.rules.insert(name, rule);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Rule> {
        self.rules.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.keys().map(String::as_str)
    }

    /// Check that every reference in every defined rule resolves.
    pub fn validate(&self) -> Result<(), GrammarError> {
        self.rules.values().try_for_each(|rule| self.check(rule))
    }

    /// Check that every reference in `rule` resolves.
    pub fn check(&self, rule: &Rule) -> Result<(), GrammarError> {
        match rule {
            Rule::Literal(_) => Ok(()),
            Rule::Sequence(rules) | Rule::Alternative(rules) => {
                rules.iter().try_for_each(|r| self.check(r))
            }
            Rule::Negation(rule)
            | Rule::Optional(rule)
            | Rule::Repeat { rule, .. }
            | Rule::Interpreted(rule, _) => self.check(rule),
            Rule::Reference(name) => match self.rules.contains_key(name) {
                true => Ok(()),
                false => Err(GrammarError::UnresolvedReference(name.clone())),
            },
        }
    }

    /// Attempt `rule` at exactly `start`.
    pub fn match_at<'a>(
        &'a self,
        rule: &'a Rule,
        tokens: &'a [Token],
        start: usize,
    ) -> Option<Match<'a>> {
        if start > tokens.len() {
            return None;
        }
        match self.apply(rule, State::new(tokens, start)) {
            Ok(state) => {
                let span = Span::new(start, state.cursor());
                Some(Match::new(tokens, span, state.into_captures()))
            }
            Err(_) => None,
        }
    }

    /// Scan `tokens` left to right for non-overlapping matches of `rule`.
    pub fn find_all<'a>(&'a self, rule: &'a Rule, tokens: &'a [Token]) -> Matches<'a> {
        Matches::new(self, rule, tokens)
    }

    fn apply<'a>(&'a self, rule: &'a Rule, state: State<'a>) -> StateResult<State<'a>> {
        match rule {
            Rule::Literal(pred) => state.match_token(|tok| pred.test(tok)),
            Rule::Sequence(rules) => {
                state.sequence(rules.iter().map(|r| move |s: State<'a>| self.apply(r, s)))
            }
            Rule::Alternative(rules) => {
                state.alternative(rules.iter().map(|r| move |s: State<'a>| self.apply(r, s)))
            }
            Rule::Negation(inner) => state.negate(|s| self.apply(inner, s)),
            Rule::Optional(inner) => state.optional(|s| self.apply(inner, s)),
            Rule::Repeat { rule, min, max } => state.repeat(*min, *max, |s| self.apply(rule, s)),
            Rule::Reference(name) => match self.rules.get(name) {
                Some(target) => state.descend(|s| self.apply(target, s)),
                None => {
                    tracing::warn!(rule = %name, "reference to undefined rule");
                    Err(state)
                }
            },
            Rule::Interpreted(inner, binding) => state.capture(binding, |s| self.apply(inner, s)),
        }
    }
}
