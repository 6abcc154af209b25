//! The ordered collection of facts found in one text.

use std::fmt::{self, Display};

use serde::Serialize;

/// The kind of an extracted value. Doubles as its XML element name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FactKind {
    Scientist,
    Department,
    Thesis,
    Speciality,
    AcademicDegree,
    BranchOfScience,
}

impl FactKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FactKind::Scientist => "Scientist",
            FactKind::Department => "Department",
            FactKind::Thesis => "Thesis",
            FactKind::Speciality => "Speciality",
            FactKind::AcademicDegree => "AcademicDegree",
            FactKind::BranchOfScience => "BranchOfScience",
        }
    }
}

impl Display for FactKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    pub kind: FactKind,
    pub value: String,
}

/// A group of attributes discovered together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fact {
    pub id: usize,
    pub attributes: Vec<Attribute>,
}

/// Append-only, in discovery order. Duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FactCollection {
    facts: Vec<Fact>,
}

impl FactCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a fact holding a single attribute. Returns the new fact's id, or
    /// `None` if the value was empty.
    pub fn add_fact(&mut self, kind: FactKind, value: impl Into<String>) -> Option<usize> {
        self.add_facts(std::iter::once((kind, value.into())))
    }

    /// Add one fact holding every non-empty attribute. Nothing is added, and
    /// no id is used, when all values are empty.
    pub fn add_facts<I>(&mut self, attributes: I) -> Option<usize>
    where
        I: IntoIterator<Item = (FactKind, String)>,
    {
        let attributes: Vec<Attribute> = attributes
            .into_iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(kind, value)| Attribute { kind, value })
            .collect();
        if attributes.is_empty() {
            return None;
        }

        let id = self.facts.len() + 1;
        self.facts.push(Fact { id, attributes });
        Some(id)
    }

    pub fn facts(&self) -> &[Fact] {
        &self.facts
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Fact> {
        self.facts.iter()
    }

    pub fn len(&self) -> usize {
        self.facts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

impl<'a> IntoIterator for &'a FactCollection {
    type Item = &'a Fact;
    type IntoIter = std::slice::Iter<'a, Fact>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn ids_follow_insertion() {
        let mut facts = FactCollection::new();
        assert_eq!(facts.add_fact(FactKind::Scientist, "Шульга Татьяна"), Some(1));
        assert_eq!(facts.add_fact(FactKind::Department, ""), None);
        assert_eq!(
            facts.add_facts(vec![
                (FactKind::Thesis, "Методы".to_owned()),
                (FactKind::Speciality, String::new()),
                (FactKind::AcademicDegree, "доктор".to_owned()),
            ]),
            Some(2)
        );
        assert_eq!(facts.add_facts(Vec::new()), None);
        assert_eq!(facts.add_fact(FactKind::Scientist, "Шульга Татьяна"), Some(3));

        let got: Vec<(usize, Vec<FactKind>)> = facts
            .iter()
            .map(|f| (f.id, f.attributes.iter().map(|a| a.kind).collect()))
            .collect();
        assert_eq!(
            got,
            vec![
                (1, vec![FactKind::Scientist]),
                (2, vec![FactKind::Thesis, FactKind::AcademicDegree]),
                (3, vec![FactKind::Scientist]),
            ]
        );
    }

    #[test]
    fn serializes_to_json() {
        let mut facts = FactCollection::new();
        facts.add_fact(FactKind::BranchOfScience, "технический");
        let json = serde_json::to_string(&facts).unwrap();
        assert_eq!(
            json,
            r#"{"facts":[{"id":1,"attributes":[{"kind":"BranchOfScience","value":"технический"}]}]}"#
        );
    }
}
