// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Lexer for the RFC 5545 content-line grammar.
//!
//! Line folding (CRLF followed by SPACE or HTAB) is a lexer skip rule, so
//! downstream stages only ever see logical lines.

use std::fmt::{self, Display};

use logos::Logos;

use crate::span::Span;

/// Tokenize iCalendar source text into spanned tokens.
///
/// Lexing never fails: bytes the grammar does not allow come back as
/// [`Token::Error`] and are rejected by the scanner.
pub fn tokenize(src: &str) -> impl IntoIterator<Item = SpannedToken<'_>> {
    Token::lexer(src).spanned().map(|(tok, span)| match tok {
        Ok(tok) => SpannedToken(tok, Span::new(span.start, span.end)),
        Err(()) => SpannedToken(Token::Error, Span::new(span.start, span.end)),
    })
}

/// Token emitted by the iCalendar lexer
#[derive(PartialEq, Eq, Clone, Copy, Logos)]
#[logos(skip r#"\r\n[ \t]"#)] // skip folding
pub enum Token<'src> {
    /// Double quote ("), delimits quoted parameter values
    #[token(r#"""#)]
    DQuote,

    /// Comma (,), separates list values
    #[token(",")]
    Comma,

    /// Colon (:), separates name+parameters from the value
    #[token(":")]
    Colon,

    /// Semicolon (;), introduces a parameter
    #[token(";")]
    Semicolon,

    /// Equal sign (=), separates parameter name from its values
    #[token("=")]
    Equal,

    /// Unfolded CRLF, terminates a content line
    #[token("\r\n")]
    Newline,

    /// Name characters: 0-9, A-Z, a-z, underscore, hyphen
    #[regex("[0-9A-Za-z_-]+")]
    Word(&'src str),

    /// Everything else the grammar allows: printable ASCII symbols and
    /// non-ASCII UTF-8 runs
    #[regex(r#"[\t !#$%&'()*+./<>?@\[\\\]\^`\{|\}~]+"#)]
    #[regex(r#"[^\x00-\x7F]+"#)]
    Text(&'src str),

    /// Byte sequence outside the grammar (control characters, bare CR or LF)
    Error,
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DQuote => write!(f, "DQuote"),
            Self::Comma => write!(f, "Comma"),
            Self::Colon => write!(f, "Colon"),
            Self::Semicolon => write!(f, "Semicolon"),
            Self::Equal => write!(f, "Equal"),
            Self::Newline => write!(f, "Newline"),
            Self::Word(s) => write!(f, "Word({s})"),
            Self::Text(s) => write!(f, "Text({s})"),
            Self::Error => write!(f, "Error"),
        }
    }
}

impl fmt::Debug for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

/// A token with its span in the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpannedToken<'src>(pub Token<'src>, pub Span);

impl Display for SpannedToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.0, self.1)
    }
}
