// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Scanner for iCalendar content lines.
//!
//! Converts the token stream into content lines per RFC 5545:
//!
//! ```text
//! contentline = name *(";" param) ":" value CRLF
//! ```
//!
//! The scanner is all-or-nothing: the first malformed line aborts the scan.
//! Blank lines are tolerated (trailing CRLF is common in the wild) but
//! everything else must match the grammar.

use std::iter::Peekable;

use crate::span::{Segments, Span};
use crate::syntax::lexer::{SpannedToken, Token};
use crate::syntax::{StructureError, line_number};

/// A scanned iCalendar content line.
#[derive(Debug, Clone)]
pub struct ContentLine<'src> {
    /// Property name (e.g., "DTSTART", "SUMMARY")
    pub name: Segments<'src>,

    /// Property parameters in source order
    pub parameters: Vec<ScannedParameter<'src>>,

    /// Raw property value, still folded-segment form
    pub value: Segments<'src>,

    /// Span of the entire content line
    pub span: Span,
}

/// A scanned parameter: `name=value` or `name=value1,value2`.
#[derive(Debug, Clone)]
pub struct ScannedParameter<'src> {
    /// Parameter name (e.g., "TZID", "VALUE")
    pub name: Segments<'src>,

    /// Parameter values split on commas
    pub values: Vec<ScannedParameterValue<'src>>,
}

/// A single parameter value.
#[derive(Debug, Clone)]
pub struct ScannedParameterValue<'src> {
    /// The value text, without surrounding quotes
    pub value: Segments<'src>,

    /// Whether the value was quoted in the source
    pub quoted: bool,
}

/// Scan a token stream into content lines.
///
/// # Errors
///
/// Returns [`StructureError::MalformedLine`] on the first line that does not
/// match the content-line grammar.
pub fn scan_content_lines<'src>(
    src: &str,
    tokens: impl IntoIterator<Item = SpannedToken<'src>>,
) -> Result<Vec<ContentLine<'src>>, StructureError> {
    let mut tokens = tokens.into_iter().peekable();
    let mut lines = Vec::new();

    while let Some(&SpannedToken(token, span)) = tokens.peek() {
        match token {
            Token::Newline => {
                tokens.next(); // blank line
            }
            Token::Error => {
                return Err(malformed(src, span, "invalid character"));
            }
            _ => lines.push(scan_line(src, &mut tokens)?),
        }
    }

    Ok(lines)
}

fn malformed(src: &str, span: Span, reason: &'static str) -> StructureError {
    StructureError::MalformedLine {
        reason,
        line: line_number(src, span.start),
    }
}

/// Scan a single content line. The caller guarantees the next token is
/// neither a newline nor a lexing error.
fn scan_line<'src>(
    src: &str,
    tokens: &mut Peekable<impl Iterator<Item = SpannedToken<'src>>>,
) -> Result<ContentLine<'src>, StructureError> {
    let Some(&SpannedToken(_, line_start)) = tokens.peek() else {
        return Err(malformed(src, Span::new(0, 0), "empty content line"));
    };

    let name = scan_name(tokens);
    if name.is_empty() {
        return Err(malformed(src, line_start, "missing property name"));
    }

    let mut parameters = Vec::new();
    while let Some(&SpannedToken(Token::Semicolon, semi_span)) = tokens.peek() {
        tokens.next();
        match scan_parameter(tokens) {
            Ok(param) => parameters.push(param),
            Err(reason) => return Err(malformed(src, semi_span, reason)),
        }
    }

    match tokens.next() {
        Some(SpannedToken(Token::Colon, _)) => {}
        Some(SpannedToken(_, span)) => {
            return Err(malformed(src, span, "missing ':' between name and value"));
        }
        None => {
            return Err(malformed(src, line_start, "missing ':' between name and value"));
        }
    }

    let (value, value_end) = scan_value(src, tokens)?;

    // The terminating CRLF is optional on the last line of the input.
    let end = match tokens.next() {
        Some(SpannedToken(Token::Newline, span)) => span.end,
        _ => value_end.max(line_start.end),
    };

    Ok(ContentLine {
        name,
        parameters,
        value,
        span: Span::new(line_start.start, end),
    })
}

/// Collect consecutive Word tokens (names can be hyphenated, e.g.
/// "LAST-MODIFIED", and a hyphen splits into a single Word token anyway).
fn scan_name<'src>(
    tokens: &mut Peekable<impl Iterator<Item = SpannedToken<'src>>>,
) -> Segments<'src> {
    let mut segments = Vec::new();
    while let Some(&SpannedToken(Token::Word(text), span)) = tokens.peek() {
        segments.push((text, span));
        tokens.next();
    }
    Segments::new(segments)
}

fn scan_parameter<'src>(
    tokens: &mut Peekable<impl Iterator<Item = SpannedToken<'src>>>,
) -> Result<ScannedParameter<'src>, &'static str> {
    let name = scan_name(tokens);
    if name.is_empty() {
        return Err("empty parameter name");
    }

    match tokens.next() {
        Some(SpannedToken(Token::Equal, _)) => {}
        _ => return Err("missing '=' after parameter name"),
    }

    let mut values = Vec::new();
    loop {
        values.push(scan_parameter_value(tokens)?);
        match tokens.peek() {
            Some(&SpannedToken(Token::Comma, _)) => {
                tokens.next();
            }
            _ => break,
        }
    }

    Ok(ScannedParameter { name, values })
}

fn scan_parameter_value<'src>(
    tokens: &mut Peekable<impl Iterator<Item = SpannedToken<'src>>>,
) -> Result<ScannedParameterValue<'src>, &'static str> {
    if let Some(&SpannedToken(Token::DQuote, _)) = tokens.peek() {
        tokens.next();
        let mut segments = Vec::new();
        loop {
            match tokens.next() {
                Some(SpannedToken(Token::DQuote, _)) => {
                    return Ok(ScannedParameterValue {
                        value: Segments::new(segments),
                        quoted: true,
                    });
                }
                Some(SpannedToken(Token::Newline | Token::Error, _)) | None => {
                    return Err("unterminated quoted parameter value");
                }
                Some(SpannedToken(token, span)) => {
                    segments.push((token_text(token), span));
                }
            }
        }
    }

    // Unquoted: collect until a separator.
    let mut segments = Vec::new();
    while let Some(&SpannedToken(token, span)) = tokens.peek() {
        match token {
            Token::Semicolon | Token::Colon | Token::Comma | Token::Equal | Token::Newline => break,
            Token::Error => return Err("invalid character"),
            _ => {
                segments.push((token_text(token), span));
                tokens.next();
            }
        }
    }

    // Empty parameter values are allowed (paramtext = *SAFE-CHAR).
    Ok(ScannedParameterValue {
        value: Segments::new(segments),
        quoted: false,
    })
}

fn scan_value<'src>(
    src: &str,
    tokens: &mut Peekable<impl Iterator<Item = SpannedToken<'src>>>,
) -> Result<(Segments<'src>, usize), StructureError> {
    let mut segments = Vec::new();
    let mut end = 0;

    while let Some(&SpannedToken(token, span)) = tokens.peek() {
        match token {
            Token::Newline => break,
            Token::Error => return Err(malformed(src, span, "invalid character")),
            _ => {
                segments.push((token_text(token), span));
                end = span.end;
                tokens.next();
            }
        }
    }

    Ok((Segments::new(segments), end))
}

/// Text of a token inside a value or parameter value position.
fn token_text(token: Token<'_>) -> &str {
    match token {
        Token::Word(s) | Token::Text(s) => s,
        Token::Comma => ",",
        Token::Colon => ":",
        Token::Semicolon => ";",
        Token::Equal => "=",
        Token::DQuote => "\"",
        Token::Newline | Token::Error => "",
    }
}
