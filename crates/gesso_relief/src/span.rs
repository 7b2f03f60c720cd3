//! Byte spans into the analyzed source file.

use serde::{Deserialize, Serialize};

/// Source span `[start, end)` in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Placeholder for nodes synthesized without a source position
    pub const EMPTY: Self = Self { start: 0, end: 0 };

    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    #[inline]
    pub const fn len(self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.end <= self.start
    }

    /// Whether `other` lies entirely within this span
    #[inline]
    pub const fn contains(self, other: Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Smallest span covering both
    #[inline]
    pub fn merge(self, other: Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }

    /// Slice the span out of `source`, if it is in bounds
    pub fn source_text(self, source: &str) -> Option<&str> {
        source.get(self.start as usize..self.end as usize)
    }
}

/// Access to the span of a node.
pub trait GetSpan {
    fn span(&self) -> Span;
}

impl GetSpan for Span {
    #[inline]
    fn span(&self) -> Span {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_and_merge() {
        let outer = Span::new(10, 40);
        assert!(outer.contains(Span::new(12, 20)));
        assert!(!outer.contains(Span::new(5, 20)));
        assert_eq!(Span::new(3, 8).merge(Span::new(6, 12)), Span::new(3, 12));
    }

    #[test]
    fn test_source_text() {
        let source = "final x = 1;";
        assert_eq!(Span::new(6, 7).source_text(source), Some("x"));
        assert_eq!(Span::new(6, 99).source_text(source), None);
        assert_eq!(Span::new(4, 4).len(), 0);
    }
}
