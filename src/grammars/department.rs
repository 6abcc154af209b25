use derive::Fact;
use rules::predicate::dictionary;
use rules::{literal, reference, rule, GrammarError, Rule};

use super::{fact, field, HYPHEN, QUOTED};

/// A department affiliation, e.g. `кафедра "Информатики" — доцент`.
#[derive(Debug, Clone, PartialEq, Eq, Fact)]
pub struct Department {
    /// The unit keyword with its quoted name, as written.
    pub definition: String,
    #[fact(normalized)]
    pub position: Option<String>,
}

const UNITS: [&str; 2] = ["кафедра", "отдел"];
const POSITIONS: [&str; 4] = ["доцент", "аспирант", "ассистент", "профессор"];

/// ( ( unit , quoted ) @ definition , [ hyphen , position @ position ] ) @ Department
pub fn department() -> Result<Rule, GrammarError> {
    let definition = rule(vec![literal(dictionary(UNITS)), reference(QUOTED)])
        .interpretation(field::<Department>("definition")?);
    let position = rule(vec![
        reference(HYPHEN),
        literal(dictionary(POSITIONS)).interpretation(field::<Department>("position")?),
    ]);

    Ok(rule(vec![definition, position.optional()]).interpretation(fact::<Department>()))
}
