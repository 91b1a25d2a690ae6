// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Byte spans and multi-segment source text.
//!
//! A property value may be split across several fold boundaries in the
//! source. [`Segments`] keeps the pieces as borrowed slices so the scanner
//! stays zero-copy; callers resolve to a contiguous string only when they
//! need one.

use std::borrow::Cow;
use std::fmt::{self, Display};
use std::ops::Range;

/// A byte range in the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    /// Start position of the span
    pub start: usize,
    /// End position of the span
    pub end: usize,
}

impl Span {
    /// Create a new span from start and end positions
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Convert to a standard range
    #[must_use]
    pub const fn into_range(self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}

impl Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// A text segment with its position in the source
pub type Segment<'src> = (&'src str, Span);

/// Source text split across fold boundaries, kept as borrowed segments.
#[derive(Default, Clone, Debug)]
pub struct Segments<'src> {
    segments: Vec<Segment<'src>>,
    len: usize,
}

impl<'src> Segments<'src> {
    /// Create a new `Segments` from a vector of segments
    #[must_use]
    pub(crate) fn new(segments: Vec<Segment<'src>>) -> Self {
        let len = segments.iter().map(|(s, _)| s.len()).sum();
        Self { segments, len }
    }

    /// Get the total length in bytes of all segments
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the segments contain no text
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Get the full span from first to last segment
    #[must_use]
    pub fn span(&self) -> Span {
        match (self.segments.first(), self.segments.last()) {
            (Some((_, first)), Some((_, last))) => Span::new(first.start, last.end),
            _ => Span::new(0, 0),
        }
    }

    /// Resolve segments into a single string.
    ///
    /// Borrows from the source when the value was not folded, allocates
    /// otherwise.
    #[must_use]
    pub fn resolve(&self) -> Cow<'src, str> {
        match self.segments.as_slice() {
            [(s, _)] => Cow::Borrowed(s),
            segments => {
                let mut s = String::with_capacity(self.len);
                for (seg, _) in segments {
                    s.push_str(seg);
                }
                Cow::Owned(s)
            }
        }
    }

    /// Convert to an owned `String` using the known capacity
    #[must_use]
    pub fn to_owned(&self) -> String {
        let mut s = String::with_capacity(self.len);
        for (seg, _) in &self.segments {
            s.push_str(seg);
        }
        s
    }

    /// Compare segments to a string ignoring ASCII case
    #[must_use]
    pub fn eq_str_ignore_ascii_case(&self, mut other: &str) -> bool {
        if other.len() != self.len {
            return false;
        }

        for (seg, _) in &self.segments {
            let Some((head, tail)) = other.split_at_checked(seg.len()) else {
                return false;
            };
            if !head.eq_ignore_ascii_case(seg) {
                return false;
            }
            other = tail;
        }

        true
    }
}

impl Display for Segments<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (seg, _) in &self.segments {
            seg.fmt(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segments<'src>(parts: &[(&'src str, usize)]) -> Segments<'src> {
        Segments::new(
            parts
                .iter()
                .map(|&(s, start)| (s, Span::new(start, start + s.len())))
                .collect(),
        )
    }

    #[test]
    fn resolves_single_segment_without_allocating() {
        let segs = segments(&[("SUMMARY", 0)]);
        assert!(matches!(segs.resolve(), Cow::Borrowed("SUMMARY")));
    }

    #[test]
    fn resolves_folded_segments() {
        let segs = segments(&[("Team ", 8), ("Meeting", 15)]);
        assert_eq!(segs.resolve(), "Team Meeting");
        assert_eq!(segs.len(), 12);
        assert_eq!(segs.span(), Span::new(8, 22));
    }

    #[test]
    fn compares_ignoring_ascii_case() {
        let segs = segments(&[("BE", 0), ("gin", 2)]);
        assert!(segs.eq_str_ignore_ascii_case("BEGIN"));
        assert!(segs.eq_str_ignore_ascii_case("begin"));
        assert!(!segs.eq_str_ignore_ascii_case("BEGIN:"));
        assert!(!segs.eq_str_ignore_ascii_case("END"));
    }

    #[test]
    fn empty_segments_are_empty() {
        let segs = Segments::default();
        assert!(segs.is_empty());
        assert_eq!(segs.span(), Span::new(0, 0));
        assert_eq!(segs.resolve(), "");
    }
}
