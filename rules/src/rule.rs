use std::fmt::{self, Display};

use crate::interpret::Binding;
use crate::predicate::Predicate;

/// A node in a grammar tree.
///
/// Rules are plain values: build them once, clone them freely, and share
/// sub-rules across grammars through named [`Rule::Reference`]s.
#[derive(Debug, Clone)]
pub enum Rule {
    /// Exactly one token satisfying the predicate.
    Literal(Predicate),
    Sequence(Vec<Rule>),
    /// First alternative that matches wins.
    Alternative(Vec<Rule>),
    /// Exactly one token at which the inner rule doesn't match.
    Negation(Box<Rule>),
    Optional(Box<Rule>),
    /// Greedy repetition without backtracking. `max` of `None` is unbounded.
    Repeat {
        rule: Box<Rule>,
        min: usize,
        max: Option<usize>,
    },
    /// A rule defined by name in a [`Grammar`](crate::Grammar).
    Reference(String),
    Interpreted(Box<Rule>, Binding),
}

impl Rule {
    pub fn optional(self) -> Rule {
        Rule::Optional(Box::new(self))
    }

    /// One or more repetitions.
    pub fn repeatable(self) -> Rule {
        self.repeat(1, None)
    }

    pub fn repeat(self, min: usize, max: Option<usize>) -> Rule {
        Rule::Repeat {
            rule: Box::new(self),
            min,
            max,
        }
    }

    pub fn interpretation(self, binding: Binding) -> Rule {
        Rule::Interpreted(Box::new(self), binding)
    }
}

impl From<Predicate> for Rule {
    fn from(pred: Predicate) -> Self {
        Rule::Literal(pred)
    }
}

pub fn literal(pred: Predicate) -> Rule {
    Rule::Literal(pred)
}

/// Sequence of rules matched back to back.
pub fn rule<I>(rules: I) -> Rule
where
    I: IntoIterator<Item = Rule>,
{
    Rule::Sequence(rules.into_iter().collect())
}

pub fn or_<I>(rules: I) -> Rule
where
    I: IntoIterator<Item = Rule>,
{
    Rule::Alternative(rules.into_iter().collect())
}

pub fn not_(rule: Rule) -> Rule {
    Rule::Negation(Box::new(rule))
}

pub fn reference(name: impl Into<String>) -> Rule {
    Rule::Reference(name.into())
}

fn fmt_joined(f: &mut fmt::Formatter, sep: &str, rules: &[Rule]) -> fmt::Result {
    for (i, rule) in rules.iter().enumerate() {
        if i > 0 {
            write!(f, " {} ", sep)?;
        }
        write!(f, "{}", rule)?;
    }
    Ok(())
}

impl Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Rule::Literal(pred) => write!(f, "{}", pred),
            Rule::Sequence(rules) => {
                write!(f, "( ")?;
                fmt_joined(f, ",", rules)?;
                write!(f, " )")
            }
            Rule::Alternative(rules) => {
                write!(f, "( ")?;
                fmt_joined(f, "|", rules)?;
                write!(f, " )")
            }
            Rule::Negation(rule) => write!(f, "- {}", rule),
            Rule::Optional(rule) => write!(f, "[ {} ]", rule),
            Rule::Repeat { rule, min, max } => match max {
                Some(max) => write!(f, "{{ {} }}{}..{}", rule, min, max),
                None => write!(f, "{{ {} }}{}..", rule, min),
            },
            Rule::Reference(name) => write!(f, "{}", name),
            Rule::Interpreted(rule, binding) => write!(f, "{} @ {}", rule, binding),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpret::{FieldSpec, Schema};
    use crate::predicate::{eq, in_};

    #[test]
    fn display_rules() {
        let schema = Schema::new("Department").with_field(FieldSpec::text("definition"));
        let quoted = rule(vec![
            reference("quote"),
            not_(reference("quote")).repeatable(),
            reference("quote"),
        ]);
        let tests = vec![
            (literal(eq("по")), "\"по\""),
            (
                or_(vec![literal(eq(".")), literal(eq(";"))]),
                "( \".\" | \";\" )",
            ),
            (
                quoted.clone(),
                "( quote , { - quote }1.. , quote )",
            ),
            (
                literal(in_(vec!["-", "–"])).optional(),
                "[ in(-|–) ]",
            ),
            (
                quoted.interpretation(schema.field("definition").unwrap()),
                "( quote , { - quote }1.. , quote ) @ Department.definition",
            ),
            (literal(eq("x")).repeat(0, Some(2)), "{ \"x\" }0..2"),
        ];

        for (rule, want) in tests {
            assert_eq!(rule.to_string(), want);
        }
    }
}
