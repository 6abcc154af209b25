use lexer::Token;

use crate::interpret::Binding;
use crate::reserve::{Capture, CaptureTape};
use crate::span::Span;

pub type StateResult<T> = Result<T, T>;

/// Reference chains deeper than this fail to match.
pub const MAX_DEPTH: usize = 256;

/// Restore point for a failed attempt.
#[derive(Debug, Clone, Copy)]
pub struct Mark {
    cursor: usize,
    captures: usize,
}

/// Matcher state over a token stream.
///
/// Every combinator hands back the state unmodified when it fails, so the
/// caller can try something else from the same position.
#[derive(Debug)]
pub struct State<'a> {
    tokens: &'a [Token],
    cursor: usize,
    captures: CaptureTape<'a>,
    depth: usize,
}

impl<'a> State<'a> {
    pub fn new(tokens: &'a [Token], start: usize) -> Self {
        State {
            tokens,
            cursor: start.min(tokens.len()),
            captures: CaptureTape::new(),
            depth: 0,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn into_captures(self) -> Vec<Capture<'a>> {
        self.captures.into()
    }

    fn mark(&self) -> Mark {
        Mark {
            cursor: self.cursor,
            captures: self.captures.len(),
        }
    }

    fn reset(mut self, mark: Mark) -> Self {
        self.cursor = mark.cursor;
        self.captures.truncate(mark.captures);
        self
    }

    /// Consume one token if it satisfies `pred`.
    pub fn match_token<P>(mut self, pred: P) -> StateResult<Self>
    where
        P: FnOnce(&Token) -> bool,
    {
        match self.tokens.get(self.cursor) {
            Some(tok) if pred(tok) => {
                self.cursor += 1;
                Ok(self)
            }
            _ => Err(self),
        }
    }

    /// Apply each function in turn, each starting where the last one ended.
    pub fn sequence<I, F>(self, fs: I) -> StateResult<Self>
    where
        I: IntoIterator<Item = F>,
        F: FnOnce(Self) -> StateResult<Self>,
    {
        let mark = self.mark();
        let mut state = self;
        for f in fs {
            state = match f(state) {
                Ok(state) => state,
                Err(state) => return Err(state.reset(mark)),
            };
        }
        Ok(state)
    }

    /// Try each function from the same position, returning the first success.
    pub fn alternative<I, F>(self, fs: I) -> StateResult<Self>
    where
        I: IntoIterator<Item = F>,
        F: FnOnce(Self) -> StateResult<Self>,
    {
        let mut state = self;
        for f in fs {
            match f(state) {
                Ok(state) => return Ok(state),
                Err(s) => state = s,
            }
        }
        Err(state)
    }

    /// Consume one token if `f` fails to match at the current position.
    /// Anything `f` captured is discarded.
    pub fn negate<F>(self, f: F) -> StateResult<Self>
    where
        F: FnOnce(Self) -> StateResult<Self>,
    {
        if self.cursor >= self.tokens.len() {
            return Err(self);
        }
        let mark = self.mark();
        match f(self) {
            Ok(state) => Err(state.reset(mark)),
            Err(mut state) => {
                state.cursor += 1;
                Ok(state)
            }
        }
    }

    /// Attempt to apply some func to state, returning Ok regardless of what
    /// the function returns.
    pub fn optional<F>(self, f: F) -> StateResult<Self>
    where
        F: FnOnce(Self) -> StateResult<Self>,
    {
        match f(self) {
            Ok(state) => Ok(state),
            Err(state) => Ok(state),
        }
    }

    /// Greedily apply `f` up to `max` times, failing if it matched fewer
    /// than `min` times. Stops early if `f` succeeds without consuming.
    pub fn repeat<F>(self, min: usize, max: Option<usize>, f: F) -> StateResult<Self>
    where
        F: Fn(Self) -> StateResult<Self>,
    {
        let mark = self.mark();
        let mut count = 0;
        let mut state = self;
        while max.map_or(true, |max| count < max) {
            let before = state.cursor;
            match f(state) {
                Ok(next) => {
                    state = next;
                    count += 1;
                    if state.cursor == before {
                        break;
                    }
                }
                Err(prev) => {
                    state = prev;
                    break;
                }
            }
        }
        if count < min {
            Err(state.reset(mark))
        } else {
            Ok(state)
        }
    }

    /// Apply `f` one reference level deeper, failing past `MAX_DEPTH`.
    pub fn descend<F>(mut self, f: F) -> StateResult<Self>
    where
        F: FnOnce(Self) -> StateResult<Self>,
    {
        if self.depth >= MAX_DEPTH {
            tracing::warn!(depth = self.depth, "reference depth limit reached");
            return Err(self);
        }
        self.depth += 1;
        match f(self) {
            Ok(mut state) => {
                state.depth -= 1;
                Ok(state)
            }
            Err(mut state) => {
                state.depth -= 1;
                Err(state)
            }
        }
    }

    /// Record the region matched by `f` under `binding`.
    ///
    /// The capture is placed before anything `f` captures, keeping the tape
    /// in pre-order.
    pub fn capture<F>(mut self, binding: &'a Binding, f: F) -> StateResult<Self>
    where
        F: FnOnce(Self) -> StateResult<Self>,
    {
        let mark = self.mark();
        let start = self.cursor;
        let pos = self.captures.reserve_next();
        match f(self) {
            Ok(mut state) => {
                let span = Span::new(start, state.cursor);
                state.captures.insert_at_reserved(pos, binding, span);
                Ok(state)
            }
            Err(state) => Err(state.reset(mark)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lexer::{tokenize, Lexicon};

    fn toks(input: &str) -> Vec<Token> {
        tokenize(input, &Lexicon::new())
    }

    fn is<'a>(s: &'static str) -> impl Fn(State<'a>) -> StateResult<State<'a>> {
        move |state: State<'a>| state.match_token(|t| t.text == s)
    }

    #[test]
    fn match_token_advances() {
        let tokens = toks("a b");
        let state = State::new(&tokens, 0);
        let state = state.match_token(|t| t.text == "a").unwrap();
        assert_eq!(state.cursor(), 1);
        let state = state.match_token(|t| t.text == "a").unwrap_err();
        assert_eq!(state.cursor(), 1);
        let state = state.match_token(|t| t.text == "b").unwrap();
        // Out of tokens is just a failed match.
        let state = state.match_token(|_| true).unwrap_err();
        assert_eq!(state.cursor(), 2);
    }

    #[test]
    fn sequence_restores_on_failure() {
        let tokens = toks("a b c");
        let state = State::new(&tokens, 0);
        let state = state.sequence(vec![is("a"), is("b"), is("x")]).unwrap_err();
        assert_eq!(state.cursor(), 0);
        let state = state.sequence(vec![is("a"), is("b")]).unwrap();
        assert_eq!(state.cursor(), 2);
    }

    #[test]
    fn alternative_first_match_wins() {
        let tokens = toks("a b");
        let state = State::new(&tokens, 0);
        let state = state.alternative(vec![is("x"), is("a"), is("b")]).unwrap();
        assert_eq!(state.cursor(), 1);
        let state = state.alternative(vec![is("x"), is("a")]).unwrap_err();
        assert_eq!(state.cursor(), 1);
    }

    #[test]
    fn negate_consumes_single_token() {
        let tokens = toks("a b");
        let state = State::new(&tokens, 0);
        let state = state.negate(is("b")).unwrap();
        assert_eq!(state.cursor(), 1);
        let state = state.negate(is("b")).unwrap_err();
        assert_eq!(state.cursor(), 1);

        let state = State::new(&tokens, 2);
        assert!(state.negate(is("b")).is_err());
    }

    #[test]
    fn repeat_bounds() {
        let tokens = toks("a a a b");
        let tests = vec![
            (0, None, Some(3)),
            (1, None, Some(3)),
            (3, None, Some(3)),
            (4, None, None),
            (0, Some(2), Some(2)),
            (0, Some(0), Some(0)),
        ];
        for (min, max, want) in tests {
            let res = State::new(&tokens, 0).repeat(min, max, is("a"));
            match want {
                Some(cursor) => {
                    assert_eq!(res.map(|s| s.cursor()).ok(), Some(cursor), "min {} max {:?}", min, max)
                }
                None => assert_eq!(res.unwrap_err().cursor(), 0),
            }
        }
    }

    #[test]
    fn repeat_stops_on_zero_width() {
        let tokens = toks("a");
        let state = State::new(&tokens, 0)
            .repeat(0, None, |s| s.optional(is("x")))
            .unwrap();
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn capture_records_pre_order() {
        let outer = Binding::Fact(Default::default());
        let inner = Binding::Fact(Default::default());
        let tokens = toks("a b");
        let state = State::new(&tokens, 0)
            .capture(&outer, |s| {
                s.match_token(|t| t.text == "a")
                    .and_then(|s| s.capture(&inner, is("b")))
            })
            .unwrap();
        let caps = state.into_captures();
        let spans: Vec<(Span, usize)> = caps.iter().map(|c| (c.span, c.descendants)).collect();
        assert_eq!(spans, vec![(Span::new(0, 2), 1), (Span::new(1, 2), 0)]);
    }

    #[test]
    fn failed_capture_leaves_no_trace() {
        let binding = Binding::Fact(Default::default());
        let tokens = toks("a b");
        let state = State::new(&tokens, 0)
            .capture(&binding, |s| s.sequence(vec![is("a"), is("x")]))
            .unwrap_err();
        assert_eq!(state.cursor(), 0);
        assert!(state.into_captures().is_empty());
    }
}
