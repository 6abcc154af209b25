//! Fact schemas and the records produced from interpreted matches.

use std::fmt::{self, Display};
use std::sync::Arc;

use crate::error::{GrammarError, InterpretError};

/// How a field's captured tokens turn into a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalization {
    /// Surface text of the captured tokens.
    Raw,
    /// Normal forms of the captured tokens.
    Normal,
    /// A nested fact captured inside the field.
    Nested,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub mode: Normalization,
    pub required: bool,
}

impl FieldSpec {
    pub fn text(name: impl Into<String>) -> Self {
        FieldSpec {
            name: name.into(),
            mode: Normalization::Raw,
            required: false,
        }
    }

    pub fn nested(name: impl Into<String>) -> Self {
        FieldSpec {
            name: name.into(),
            mode: Normalization::Nested,
            required: false,
        }
    }

    pub fn normalized(mut self) -> Self {
        self.mode = Normalization::Normal;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// The named field layout of one fact kind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    name: String,
    fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new(name: impl Into<String>) -> Self {
        Schema {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Binding that marks a rule as producing this fact.
    pub fn binding(&self) -> Binding {
        Binding::Fact(Arc::new(self.clone()))
    }

    /// Binding that stores a rule's match into the named field.
    pub fn field(&self, name: &str) -> Result<Binding, GrammarError> {
        let spec = self
            .fields
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| GrammarError::UnknownField {
                fact: self.name.clone(),
                field: name.to_owned(),
            })?;
        Ok(Binding::Field {
            fact: self.name.clone(),
            field: spec.name.clone(),
            mode: spec.mode,
        })
    }
}

/// What an interpreted rule records on a successful match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    Fact(Arc<Schema>),
    Field {
        fact: String,
        field: String,
        mode: Normalization,
    },
}

impl Binding {
    /// Use normal forms for a field binding. No-op for fact bindings.
    pub fn normalized(self) -> Self {
        match self {
            Binding::Field { fact, field, .. } => Binding::Field {
                fact,
                field,
                mode: Normalization::Normal,
            },
            fact => fact,
        }
    }
}

impl Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Binding::Fact(schema) => write!(f, "{}", schema.name()),
            Binding::Field { fact, field, mode } => match mode {
                Normalization::Normal => write!(f, "{}.{}.normalized", fact, field),
                _ => write!(f, "{}.{}", fact, field),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Absent,
    Text(String),
    Record(Record),
}

impl Value {
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }
}

static ABSENT: Value = Value::Absent;

/// A resolved fact: every schema field in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    name: String,
    fields: Vec<(String, Value)>,
}

impl Record {
    /// A record with every field of `schema` absent.
    pub fn empty(schema: &Schema) -> Self {
        Record {
            name: schema.name().to_owned(),
            fields: schema
                .fields()
                .iter()
                .map(|f| (f.name.clone(), Value::Absent))
                .collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// The value of a field, `Value::Absent` for unknown names.
    pub fn get(&self, field: &str) -> &Value {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map_or(&ABSENT, |(_, value)| value)
    }

    pub fn text(&self, field: &str) -> Option<&str> {
        match self.get(field) {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn record(&self, field: &str) -> Option<&Record> {
        match self.get(field) {
            Value::Record(r) => Some(r),
            _ => None,
        }
    }

    /// Set a known field. Returns false if the schema has no such field.
    pub fn set(&mut self, field: &str, value: Value) -> bool {
        match self.fields.iter_mut().find(|(name, _)| name == field) {
            Some((_, slot)) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

/// A typed fact decoded from a [`Record`].
///
/// Usually derived with `#[derive(Fact)]`.
pub trait Fact: Sized {
    fn schema() -> Schema;

    fn from_record(record: &Record) -> Result<Self, InterpretError>;
}
