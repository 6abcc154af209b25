use crate::interpret::Binding;
use crate::span::Span;

/// An interpreted region recorded while matching.
///
/// Captures are stored in pre-order: a capture is followed by its
/// `descendants` nested captures.
#[derive(Debug, Clone)]
pub struct Capture<'a> {
    pub binding: &'a Binding,
    pub span: Span,
    pub descendants: usize,
}

/// Allows for inserting into a `CaptureTape` at a specific position.
pub struct ReservePos(usize);

#[derive(Debug)]
enum Slot<'a> {
    Value(Capture<'a>),
    Marker,
}

/// Capture storage that lets a parent reserve its slot before its children
/// are matched, keeping the tape in pre-order.
#[derive(Debug, Default)]
pub struct CaptureTape<'a> {
    vec: Vec<Slot<'a>>,
}

impl<'a> CaptureTape<'a> {
    pub fn new() -> Self {
        CaptureTape { vec: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.vec.len()
    }

    /// Reserve the next position in the tape.
    pub fn reserve_next(&mut self) -> ReservePos {
        let idx = self.vec.len();
        self.vec.push(Slot::Marker);
        ReservePos(idx)
    }

    /// Fill a previously reserved position. Everything pushed after the
    /// reservation becomes a descendant of the capture.
    pub fn insert_at_reserved(&mut self, pos: ReservePos, binding: &'a Binding, span: Span) {
        let descendants = self.vec.len() - pos.0 - 1;
        self.vec[pos.0] = Slot::Value(Capture {
            binding,
            span,
            descendants,
        });
    }

    /// Drop everything recorded after `len`.
    pub fn truncate(&mut self, len: usize) {
        self.vec.truncate(len);
    }
}

impl<'a> From<CaptureTape<'a>> for Vec<Capture<'a>> {
    fn from(tape: CaptureTape<'a>) -> Self {
        tape.vec
            .into_iter()
            .filter_map(|v| match v {
                Slot::Value(v) => Some(v),
                Slot::Marker => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(tape: CaptureTape) -> Vec<(Span, usize)> {
        let v: Vec<Capture> = tape.into();
        v.iter().map(|c| (c.span, c.descendants)).collect()
    }

    #[test]
    fn no_reservations() {
        let b = Binding::Fact(Default::default());
        let mut tape = CaptureTape::new();
        let p = tape.reserve_next();
        tape.insert_at_reserved(p, &b, Span::new(0, 1));
        let p = tape.reserve_next();
        tape.insert_at_reserved(p, &b, Span::new(1, 2));
        assert_eq!(spans(tape), vec![(Span::new(0, 1), 0), (Span::new(1, 2), 0)]);
    }

    #[test]
    fn nested_reservations() {
        let b = Binding::Fact(Default::default());
        let mut tape = CaptureTape::new();
        let outer = tape.reserve_next();
        let inner = tape.reserve_next();
        let leaf = tape.reserve_next();
        tape.insert_at_reserved(leaf, &b, Span::new(1, 2));
        tape.insert_at_reserved(inner, &b, Span::new(0, 2));
        let sibling = tape.reserve_next();
        tape.insert_at_reserved(sibling, &b, Span::new(2, 3));
        tape.insert_at_reserved(outer, &b, Span::new(0, 3));
        assert_eq!(
            spans(tape),
            vec![
                (Span::new(0, 3), 3),
                (Span::new(0, 2), 1),
                (Span::new(1, 2), 0),
                (Span::new(2, 3), 0),
            ]
        );
    }

    #[test]
    fn truncate_discards_failed_attempts() {
        let b = Binding::Fact(Default::default());
        let mut tape = CaptureTape::new();
        let kept = tape.reserve_next();
        let mark = tape.len();
        let _abandoned = tape.reserve_next();
        tape.truncate(mark);
        tape.insert_at_reserved(kept, &b, Span::new(0, 4));
        assert_eq!(spans(tape), vec![(Span::new(0, 4), 0)]);
    }
}
