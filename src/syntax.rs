// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Wire-format front end: lexer, content-line scanner, and tree builder.
//!
//! ```text
//! Source Text → Lexer → Token Stream → Scanner → Content Lines → Tree Builder → Raw Tree
//! ```
//!
//! Folding is erased by the lexer, so content lines arrive at the scanner
//! already unfolded. The tree builder pairs BEGIN/END lines with an explicit
//! stack, so nesting depth never grows the call stack. The whole front end
//! is all-or-nothing: the first structural problem aborts with a
//! [`StructureError`] and no partial tree escapes.

pub mod lexer;
pub mod scanner;
pub mod tree_builder;

pub use self::lexer::{SpannedToken, Token, tokenize};
pub use self::scanner::{ContentLine, ScannedParameter, ScannedParameterValue, scan_content_lines};
pub use self::tree_builder::{RawComponent, RawProperty, build_tree};

/// A structural defect in the input: the content-line grammar or the
/// BEGIN/END nesting is broken.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StructureError {
    /// A content line does not match `name *(";" param) ":" value CRLF`.
    #[error("line {line}: malformed content line: {reason}")]
    MalformedLine {
        /// What is wrong with the line
        reason: &'static str,
        /// 1-based physical line number
        line: usize,
    },

    /// An END line closes a different component than the innermost open one.
    #[error("line {line}: END:{found} does not close BEGIN:{expected}")]
    MismatchedEnd {
        /// Name of the innermost open component
        expected: String,
        /// Name on the END line
        found: String,
        /// 1-based physical line number
        line: usize,
    },

    /// An END line with no open component.
    #[error("line {line}: END:{name} without a matching BEGIN")]
    UnmatchedEnd {
        /// Name on the END line
        name: String,
        /// 1-based physical line number
        line: usize,
    },

    /// Input ended while a component was still open.
    #[error("line {line}: BEGIN:{name} is never closed")]
    UnclosedComponent {
        /// Name of the unclosed component
        name: String,
        /// 1-based physical line number of the BEGIN line
        line: usize,
    },

    /// A property line outside any BEGIN/END pair.
    #[error("line {line}: property {name} appears outside any component")]
    PropertyOutsideComponent {
        /// Property name
        name: String,
        /// 1-based physical line number
        line: usize,
    },

    /// The input holds no components at all.
    #[error("input contains no calendar data")]
    EmptyInput,

    /// More than one root component where exactly one was expected.
    #[error("expected a single root component, found {count}")]
    MultipleRoots {
        /// Number of root components found
        count: usize,
    },
}

/// 1-based physical line number of a byte offset.
pub(crate) fn line_number(src: &str, offset: usize) -> usize {
    src.as_bytes()
        .iter()
        .take(offset)
        .filter(|&&b| b == b'\n')
        .count()
        + 1
}
