use tracing::{debug, warn};

use crate::facts::{FactCollection, FactKind};
use crate::grammars::{Department, GrammarSet, Thesis};
use crate::source::TokenSource;

/// Run every domain grammar over `text` and collect what they find.
///
/// Grammars run in a fixed order: the scientist name, then departments,
/// then theses. Each appends its facts as it finds them.
pub fn extract<S: TokenSource>(text: &str, grammars: &GrammarSet, source: &S) -> FactCollection {
    let mut facts = FactCollection::new();
    let tokens = source.tokenize(text);
    debug!(tokens = tokens.len(), "tokenized");

    if let Some(name) = source.first_name(&tokens) {
        match name.full_name() {
            Some(full) => {
                facts.add_fact(FactKind::Scientist, full);
            }
            None => debug!("first person name has no given name"),
        }
    }

    let mut found = 0;
    for m in grammars.grammar().find_all(grammars.department(), &tokens) {
        match m.interpret::<Department>() {
            Ok(department) => {
                found += 1;
                facts.add_fact(FactKind::Department, department.definition);
            }
            Err(e) => warn!(error = %e, span = %m.span(), "discarding department match"),
        }
    }
    debug!(found, "department pass");

    let mut found = 0;
    for m in grammars.grammar().find_all(grammars.thesis(), &tokens) {
        match m.interpret::<Thesis>() {
            Ok(thesis) => {
                found += 1;
                facts.add_facts(thesis_attributes(thesis));
            }
            Err(e) => warn!(error = %e, span = %m.span(), "discarding thesis match"),
        }
    }
    debug!(found, "thesis pass");

    facts
}

/// One thesis becomes one fact carrying its speciality and degree.
fn thesis_attributes(thesis: Thesis) -> Vec<(FactKind, String)> {
    let mut attributes = vec![(FactKind::Thesis, thesis.title)];
    if let Some(speciality) = thesis.speciality {
        attributes.push((FactKind::Speciality, speciality.label()));
    }
    if let Some(degree) = thesis.degree {
        attributes.push((FactKind::AcademicDegree, degree.degree));
        attributes.push((FactKind::BranchOfScience, degree.branch.name));
    }
    attributes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grammars::PersonName;
    use lexer::{tokenize, Lexicon, Token};
    use std::cell::Cell;

    /// A source with a fixed name that counts tokenizer runs.
    struct FixedSource(Option<PersonName>, Cell<usize>);

    impl FixedSource {
        fn new(name: Option<PersonName>) -> Self {
            FixedSource(name, Cell::new(0))
        }
    }

    impl TokenSource for FixedSource {
        fn tokenize(&self, text: &str) -> Vec<Token> {
            self.1.set(self.1.get() + 1);
            tokenize(text, &Lexicon::builtin().unwrap())
        }

        fn first_name(&self, _tokens: &[Token]) -> Option<PersonName> {
            self.0.clone()
        }
    }

    fn kinds(facts: &FactCollection) -> Vec<Vec<FactKind>> {
        facts
            .iter()
            .map(|f| f.attributes.iter().map(|a| a.kind).collect())
            .collect()
    }

    #[test]
    fn scientist_requires_given_name() {
        let grammars = GrammarSet::new().unwrap();
        let surname_only = FixedSource::new(Some(PersonName {
            first: None,
            middle: None,
            last: Some("Шульга".to_owned()),
        }));
        assert!(extract("Шульга", &grammars, &surname_only).is_empty());

        let full = FixedSource::new(Some(PersonName {
            first: Some("Татьяна".to_owned()),
            middle: None,
            last: Some("Шульга".to_owned()),
        }));
        let facts = extract("", &grammars, &full);
        assert_eq!(facts.len(), 1);
        assert_eq!(facts.facts()[0].attributes[0].value, "Шульга Татьяна");
    }

    #[test]
    fn tokenizes_once() {
        let grammars = GrammarSet::new().unwrap();
        let source = FixedSource::new(None);
        extract("кафедра «Информатики» — доцент", &grammars, &source);
        assert_eq!(source.1.get(), 1);
    }

    #[test]
    fn grammar_order() {
        let grammars = GrammarSet::new().unwrap();
        let source = FixedSource::new(None);
        let text = "диссертация «Модели» на соискание степени доктора технических наук. \
                    кафедра «Информатики»";
        let facts = extract(text, &grammars, &source);
        assert_eq!(
            kinds(&facts),
            vec![
                vec![FactKind::Department],
                vec![FactKind::Thesis],
            ]
        );
    }

    #[test]
    fn thesis_fact_layout() {
        let grammars = GrammarSet::new().unwrap();
        let source = FixedSource::new(None);
        let text = "докторская диссертация «Модели» на соискание степени доктора \
                    технических наук по специальности 05.13.18 - «ММ»";
        let facts = extract(text, &grammars, &source);
        let values: Vec<(FactKind, &str)> = facts.facts()[0]
            .attributes
            .iter()
            .map(|a| (a.kind, a.value.as_str()))
            .collect();
        assert_eq!(
            values,
            vec![
                (FactKind::Thesis, "Модели"),
                (FactKind::Speciality, "05.13.18 - ММ"),
                (FactKind::AcademicDegree, "доктор"),
                (FactKind::BranchOfScience, "технический"),
            ]
        );
    }
}
