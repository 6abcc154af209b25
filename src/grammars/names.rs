use derive::Fact;
use rules::predicate::{gram, is_capitalized};
use rules::{literal, or_, rule, GrammarError, Predicate, Rule};

use super::{fact, field};

/// A person name as found in text. Any part may be missing.
#[derive(Debug, Clone, PartialEq, Eq, Fact)]
#[fact(name = "Name")]
pub struct PersonName {
    pub first: Option<String>,
    pub middle: Option<String>,
    pub last: Option<String>,
}

impl PersonName {
    /// `last first middle`, skipping missing parts. `None` without a first
    /// name.
    pub fn full_name(&self) -> Option<String> {
        self.first.as_ref()?;
        let parts: Vec<&str> = [&self.last, &self.first, &self.middle]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .collect();
        Some(parts.join(" "))
    }
}

fn part(grammeme: &str) -> Predicate {
    gram(grammeme).and(is_capitalized())
}

/// ( surname , given , [ patronymic ]
/// | given , [ patronymic ] , [ surname ]
/// | surname ) @ Name
pub fn person_name() -> Result<Rule, GrammarError> {
    let first = || -> Result<Rule, GrammarError> {
        Ok(literal(part("Name")).interpretation(field::<PersonName>("first")?))
    };
    let middle = || -> Result<Rule, GrammarError> {
        Ok(literal(part("Patr")).interpretation(field::<PersonName>("middle")?))
    };
    let last = || -> Result<Rule, GrammarError> {
        Ok(literal(part("Surn")).interpretation(field::<PersonName>("last")?))
    };

    Ok(or_(vec![
        rule(vec![last()?, first()?, middle()?.optional()]),
        rule(vec![first()?, middle()?.optional(), last()?.optional()]),
        last()?,
    ])
    .interpretation(fact::<PersonName>()))
}
