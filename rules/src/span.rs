use std::fmt::{self, Display};

use lexer::Token;

/// Describes the location of a span relative to another span.
#[derive(Debug, PartialEq)]
pub enum RelativeLocation {
    Before,
    After,
    /// The span is completely contained inside the other span, or both
    /// spans cover the same tokens.
    Within,
    /// The span completely encompasses the other span.
    Encompasses,
    /// The spans share some tokens but neither contains the other.
    Overlaps,
}

/// A half-open range of token indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Describes this span's location relative to `other`.
    pub fn relative_location(&self, other: &Self) -> RelativeLocation {
        if self.start <= other.start && self.end <= other.start {
            RelativeLocation::Before
        } else if self.start >= other.end {
            RelativeLocation::After
        } else if self.start >= other.start && self.end <= other.end {
            RelativeLocation::Within
        } else if self.start <= other.start && self.end >= other.end {
            RelativeLocation::Encompasses
        } else {
            RelativeLocation::Overlaps
        }
    }

    /// Check if this span contains the entirety of the other span.
    pub fn contains(&self, other: &Self) -> bool {
        self.start <= other.start && self.end >= other.end
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Join one form of each token back into text.
///
/// Tokens that were adjacent in the input are glued together, tokens that
/// were separated by whitespace get a single space.
pub fn join_tokens<'t, F>(tokens: &'t [Token], form: F) -> String
where
    F: Fn(&'t Token) -> &'t str,
{
    let mut out = String::new();
    let mut prev_end: Option<usize> = None;
    for tok in tokens {
        if let Some(end) = prev_end {
            if tok.start > end {
                out.push(' ');
            }
        }
        out.push_str(form(tok));
        prev_end = Some(tok.end);
    }
    out
}
