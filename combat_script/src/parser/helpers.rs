use pest::iterators::Pair;

use super::{Rule, ScriptLine};

/// Read position over the preprocessed lines.
///
/// Progress checks compare positions rather than remaining lengths, and
/// consuming a line never shifts the underlying slice.
pub(super) struct LineCursor<'a> {
    lines: &'a [ScriptLine],
    pos: usize,
}

impl<'a> LineCursor<'a> {
    pub(super) fn new(lines: &'a [ScriptLine]) -> Self {
        Self { lines, pos: 0 }
    }

    pub(super) fn position(&self) -> usize {
        self.pos
    }

    pub(super) fn is_at_end(&self) -> bool {
        self.pos >= self.lines.len()
    }

    pub(super) fn peek(&self) -> Option<&'a ScriptLine> {
        self.lines.get(self.pos)
    }

    pub(super) fn advance(&mut self) -> Option<&'a ScriptLine> {
        let line = self.lines.get(self.pos)?;
        self.pos += 1;
        Some(line)
    }

    /// Consume the next line only if its text satisfies `pred`.
    pub(super) fn next_if(&mut self, pred: impl FnOnce(&str) -> bool) -> Option<&'a ScriptLine> {
        match self.peek() {
            Some(line) if pred(&line.text) => self.advance(),
            _ => None,
        }
    }
}

/// Convert a 1-based slot number from the script to a zero-based index.
pub(super) fn slot_index(raw: &str, slots: u8) -> Option<u8> {
    let n: u8 = raw.trim().parse().ok()?;
    (1..=slots).contains(&n).then(|| n - 1)
}

/// First `int` pair under `pair`, as text.
pub(super) fn first_int<'i>(pair: Pair<'i, Rule>) -> Option<&'i str> {
    pair.into_inner().find(|p| p.as_rule() == Rule::int).map(|p| p.as_str())
}
