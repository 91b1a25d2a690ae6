// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Text value type (RFC 5545 Section 3.3.11): escaping and lists.
//!
//! Parsing is lenient where real-world data demands it: a bare `;` is
//! accepted as a literal even though a strict producer would escape it.
//! A bare `,` still separates list entries, and a backslash must start a
//! valid escape sequence.

use std::fmt::{self, Write};

use chumsky::prelude::*;

use crate::value::Extra;

/// Format Definition:
///
/// ```txt
/// text       = *(TSAFE-CHAR / ":" / DQUOTE / ESCAPED-CHAR)
/// ESCAPED-CHAR = ("\\" / "\;" / "\," / "\N" / "\n")
/// ```
///
/// Returns the list of COMMA-separated entries with escapes resolved. A
/// property with a single text value is a one-element list.
pub fn values_text<'src>() -> impl Parser<'src, &'src str, Vec<String>, Extra<'src>> {
    let escaped = just('\\').ignore_then(
        select! {
            '\\' => '\\',
            ';' => ';',
            ',' => ',',
            'n' => '\n',
            'N' => '\n',
        }
        .map_err(|err: Rich<'src, char>| Rich::custom(*err.span(), "invalid escape sequence")),
    );

    // Anything except the escape introducer and the list separator. This
    // deliberately admits an unescaped ';'.
    let literal = any().filter(|&c: &char| c != '\\' && c != ',');

    choice((escaped, literal))
        .repeated()
        .collect::<String>()
        .separated_by(just(','))
        .at_least(1)
        .collect()
}

/// Write `text` with RFC 5545 escaping applied.
///
/// Backslash, semicolon, and comma gain a backslash; a newline becomes
/// `\n`. Carriage returns are dropped so CRLF line breaks inside a value
/// do not double up.
pub fn write_escaped_text<W: Write>(writer: &mut W, text: &str) -> fmt::Result {
    for c in text.chars() {
        match c {
            '\\' => writer.write_str("\\\\")?,
            ';' => writer.write_str("\\;")?,
            ',' => writer.write_str("\\,")?,
            '\n' => writer.write_str("\\n")?,
            '\r' => {}
            _ => writer.write_char(c)?,
        }
    }
    Ok(())
}
