//! Domain grammars for academic facts.
//!
//! Rules shared between grammars are defined once by name in a single
//! [`Grammar`] and referenced from the top level rules.

use rules::predicate::{dictionary, in_};
use rules::{literal, not_, reference, rule, Binding, Grammar, GrammarError, Rule};

mod department;
mod names;
mod thesis;

pub use department::Department;
pub use names::{person_name, PersonName};
pub use thesis::{AcademicDegree, Branch, Speciality, Thesis};

pub const QUOTES: [&str; 7] = ["\"", "'", "«", "»", "„", "“", "”"];
pub const HYPHENS: [&str; 3] = ["-", "—", "–"];

const QUOTE: &str = "quote";
const HYPHEN: &str = "hyphen";
/// quote , { - quote }1.. , quote
const QUOTED: &str = "quoted";

/// Binding marking a rule as producing fact `F`.
fn fact<F: rules::Fact>() -> Binding {
    F::schema().binding()
}

/// Binding storing a match into field `name` of fact `F`.
fn field<F: rules::Fact>(name: &str) -> Result<Binding, GrammarError> {
    F::schema().field(name)
}

/// Every domain grammar, built once and shared by extraction runs.
#[derive(Debug, Clone)]
pub struct GrammarSet {
    grammar: Grammar,
    department: Rule,
    thesis: Rule,
}

impl GrammarSet {
    pub fn new() -> Result<Self, GrammarError> {
        let mut grammar = Grammar::new();
        grammar.define(QUOTE, literal(in_(QUOTES)))?;
        grammar.define(HYPHEN, literal(dictionary(HYPHENS)))?;
        grammar.define(
            QUOTED,
            rule(vec![
                reference(QUOTE),
                not_(reference(QUOTE)).repeatable(),
                reference(QUOTE),
            ]),
        )?;

        let department = department::department()?;
        let thesis = thesis::thesis(&mut grammar)?;

        grammar.validate()?;
        for top in [&department, &thesis] {
            grammar.check(top)?;
        }
        tracing::debug!(rules = grammar.names().count(), "grammar set built");

        Ok(GrammarSet {
            grammar,
            department,
            thesis,
        })
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn department(&self) -> &Rule {
        &self.department
    }

    pub fn thesis(&self) -> &Rule {
        &self.thesis
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexer::{tokenize, Lexicon, Token};

    fn toks(input: &str) -> Vec<Token> {
        tokenize(input, &Lexicon::builtin().unwrap())
    }

    #[test]
    fn builds() {
        let set = GrammarSet::new().unwrap();
        assert!(set.grammar().get(QUOTED).is_some());
        assert_eq!(set.grammar().validate(), Ok(()));
    }

    #[test]
    fn quoted_spans() {
        let set = GrammarSet::new().unwrap();
        let quoted = reference(QUOTED);
        let tests = vec![
            ("«Прикладная информатика»", vec!["«Прикладная информатика»"]),
            ("\"А\" и „Б“", vec!["\"А\"", "„Б“"]),
            ("\"\" пусто", vec![]),
        ];
        for (input, expected) in tests {
            let tokens = toks(input);
            let got: Vec<String> = set
                .grammar()
                .find_all(&quoted, &tokens)
                .map(|m| m.text())
                .collect();
            assert_eq!(got, expected, "input: {}", input);
        }
    }
}
