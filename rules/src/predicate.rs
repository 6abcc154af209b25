use std::collections::BTreeSet;
use std::fmt::{self, Debug, Display};
use std::sync::Arc;

use lexer::{Token, TokenKind};

/// A test over a single token.
///
/// Predicates are total: a token of the wrong kind or with malformed text
/// simply doesn't match.
#[derive(Clone)]
pub enum Predicate {
    /// Surface text equals the string exactly.
    Eq(String),
    /// Surface text equals the string ignoring case.
    Caseless(String),
    Kind(TokenKind),
    /// Integer token within an inclusive range.
    Range { min: i64, max: i64 },
    /// Surface text is in the set.
    In(BTreeSet<String>),
    /// Lowercased surface text is in the (lowercased) set.
    InCaseless(BTreeSet<String>),
    /// Surface text has exactly this many characters.
    LengthEq(usize),
    Capitalized,
    /// Normal form equals the string.
    Normalized(String),
    /// Normal form is in the set.
    Dictionary(BTreeSet<String>),
    /// Token carries the grammeme.
    Gram(String),
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
    Custom(Arc<dyn Fn(&Token) -> bool + Send + Sync>),
}

impl Predicate {
    pub fn test(&self, token: &Token) -> bool {
        match self {
            Predicate::Eq(s) => token.text == *s,
            Predicate::Caseless(s) => token.text.to_lowercase() == *s,
            Predicate::Kind(kind) => token.kind == *kind,
            Predicate::Range { min, max } => {
                token.kind == TokenKind::Int
                    && token
                        .text
                        .parse::<i64>()
                        .map_or(false, |v| *min <= v && v <= *max)
            }
            Predicate::In(set) => set.contains(&token.text),
            Predicate::InCaseless(set) => set.contains(&token.text.to_lowercase()),
            Predicate::LengthEq(n) => token.text.chars().count() == *n,
            Predicate::Capitalized => capitalized(&token.text),
            Predicate::Normalized(s) => token.normal == *s,
            Predicate::Dictionary(set) => set.contains(&token.normal),
            Predicate::Gram(gram) => token.has_gram(gram),
            Predicate::And(preds) => preds.iter().all(|p| p.test(token)),
            Predicate::Or(preds) => preds.iter().any(|p| p.test(token)),
            Predicate::Not(pred) => !pred.test(token),
            Predicate::Custom(f) => f(token),
        }
    }

    pub fn and(self, other: Predicate) -> Predicate {
        match self {
            Predicate::And(mut preds) => {
                preds.push(other);
                Predicate::And(preds)
            }
            pred => Predicate::And(vec![pred, other]),
        }
    }

    pub fn or(self, other: Predicate) -> Predicate {
        match self {
            Predicate::Or(mut preds) => {
                preds.push(other);
                Predicate::Or(preds)
            }
            pred => Predicate::Or(vec![pred, other]),
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Predicate {
        Predicate::Not(Box::new(self))
    }
}

fn capitalized(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) if first.is_uppercase() => chars.all(|c| !c.is_uppercase()),
        _ => false,
    }
}

fn set<I, S>(items: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

pub fn eq(s: impl Into<String>) -> Predicate {
    Predicate::Eq(s.into())
}

pub fn caseless(s: impl Into<String>) -> Predicate {
    Predicate::Caseless(s.into().to_lowercase())
}

pub fn kind(kind: TokenKind) -> Predicate {
    Predicate::Kind(kind)
}

pub fn gte(min: i64) -> Predicate {
    Predicate::Range { min, max: i64::MAX }
}

pub fn lte(max: i64) -> Predicate {
    Predicate::Range { min: i64::MIN, max }
}

pub fn range(min: i64, max: i64) -> Predicate {
    Predicate::Range { min, max }
}

pub fn in_<I, S>(items: I) -> Predicate
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Predicate::In(set(items))
}

pub fn in_caseless<I, S>(items: I) -> Predicate
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Predicate::InCaseless(
        items
            .into_iter()
            .map(|s| s.into().to_lowercase())
            .collect(),
    )
}

pub fn length_eq(n: usize) -> Predicate {
    Predicate::LengthEq(n)
}

pub fn is_capitalized() -> Predicate {
    Predicate::Capitalized
}

pub fn normalized(s: impl Into<String>) -> Predicate {
    Predicate::Normalized(s.into())
}

/// Match any token whose normal form is one of `items`.
pub fn dictionary<I, S>(items: I) -> Predicate
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Predicate::Dictionary(set(items))
}

pub fn gram(gram: impl Into<String>) -> Predicate {
    Predicate::Gram(gram.into())
}

pub fn custom<F>(f: F) -> Predicate
where
    F: Fn(&Token) -> bool + Send + Sync + 'static,
{
    Predicate::Custom(Arc::new(f))
}

fn fmt_set(f: &mut fmt::Formatter, name: &str, set: &BTreeSet<String>) -> fmt::Result {
    let items: Vec<&str> = set.iter().map(String::as_str).collect();
    write!(f, "{}({})", name, items.join("|"))
}

fn fmt_list(f: &mut fmt::Formatter, sep: &str, preds: &[Predicate]) -> fmt::Result {
    write!(f, "(")?;
    for (i, p) in preds.iter().enumerate() {
        if i > 0 {
            write!(f, " {} ", sep)?;
        }
        write!(f, "{}", p)?;
    }
    write!(f, ")")
}

impl Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Predicate::Eq(s) => write!(f, "\"{}\"", s),
            Predicate::Caseless(s) => write!(f, "caseless(\"{}\")", s),
            Predicate::Kind(kind) => write!(f, "{}", kind),
            Predicate::Range { min, max } => write!(f, "range({}, {})", min, max),
            Predicate::In(set) => fmt_set(f, "in", set),
            Predicate::InCaseless(set) => fmt_set(f, "in_caseless", set),
            Predicate::LengthEq(n) => write!(f, "length({})", n),
            Predicate::Capitalized => write!(f, "capitalized"),
            Predicate::Normalized(s) => write!(f, "normalized(\"{}\")", s),
            Predicate::Dictionary(set) => fmt_set(f, "dictionary", set),
            Predicate::Gram(gram) => write!(f, "gram({})", gram),
            Predicate::And(preds) => fmt_list(f, "&", preds),
            Predicate::Or(preds) => fmt_list(f, "|", preds),
            Predicate::Not(pred) => write!(f, "!{}", pred),
            Predicate::Custom(_) => write!(f, "custom"),
        }
    }
}

impl Debug for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Predicate({})", self)
    }
}
