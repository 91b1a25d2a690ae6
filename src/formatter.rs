// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! iCalendar (RFC 5545) formatter module.
//!
//! Serializes a [`Component`] tree back to the RFC 5545 text format,
//! writing to any `std::io::Write` implementer. Content lines end with
//! CRLF and are folded at 75 octets by default, never in the middle of a
//! UTF-8 sequence.

use std::io::{self, Write};

use crate::component::Component;
use crate::keyword::{KW_BEGIN, KW_ENCODING, KW_END, KW_TZID, KW_VALUE};
use crate::parameter::Parameter;
use crate::property::{Property, PropertyKind};
use crate::value::{Encoding, Value, ValueKind};

/// Convenience function to format a component tree to a `String` (uses
/// default options).
///
/// # Errors
///
/// Returns an error if writing to the internal buffer fails or if the
/// output contains invalid UTF-8 data.
pub fn format(component: &Component) -> io::Result<String> {
    FormatOptions::default().write_to_string(component)
}

/// Formatting options for the iCalendar formatter.
#[derive(Debug, Clone, Copy)]
pub struct FormatOptions {
    /// Maximum line length in octets before folding.
    /// - `None`: no line folding
    /// - `Some(n)`: fold lines longer than n octets
    ///
    /// Default: `Some(75)` for RFC 5545 compliance.
    pub folding: Option<usize>,

    /// Line folding style.
    ///
    /// Default: `FoldingStyle::Space` (CRLF + SPACE).
    pub folding_style: FoldingStyle,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            folding: Some(75),
            folding_style: FoldingStyle::default(),
        }
    }
}

impl FormatOptions {
    /// Set the line folding option.
    #[must_use]
    pub const fn folding(mut self, folding: Option<usize>) -> Self {
        self.folding = folding;
        self
    }

    /// Set the line folding style.
    #[must_use]
    pub const fn folding_style(mut self, style: FoldingStyle) -> Self {
        self.folding_style = style;
        self
    }

    /// Convenience method to write a component tree to any `Write`
    /// implementer.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write(&self, component: &Component, w: &mut impl Write) -> io::Result<()> {
        let mut formatter = Formatter::new(w, *self);
        formatter.write(component)
    }

    /// Convenience method to write a component tree to a `String`.
    ///
    /// # Errors
    /// Returns an error if writing fails or if the output contains invalid
    /// UTF-8 data.
    pub fn write_to_string(&self, component: &Component) -> io::Result<String> {
        let mut buffer = Vec::new();
        self.write(component, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }
}

/// Line folding style for RFC 5545 formatting.
///
/// RFC 5545 specifies that folded lines should start with CRLF followed by
/// a whitespace character (SPACE or TAB).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FoldingStyle {
    /// CRLF + SPACE (RFC 5545 default)
    #[default]
    Space,
    /// CRLF + TAB
    Tab,
}

impl FoldingStyle {
    /// Get the folding sequence for this style.
    const fn as_bytes(self) -> &'static [u8] {
        match self {
            Self::Space => b"\r\n ",
            Self::Tab => b"\r\n\t",
        }
    }

    /// Length of the continuation character after CRLF.
    const fn continuation_len() -> usize {
        1 // both SPACE and TAB are 1 byte
    }
}

/// iCalendar formatter that writes to any `Write` implementer.
#[derive(Debug)]
pub struct Formatter<W: Write> {
    /// The underlying writer.
    writer: W,
    /// Formatting options.
    options: FormatOptions,
    /// Current line length in bytes (excluding the pending CRLF).
    line_length: usize,
}

impl<W: Write> Formatter<W> {
    /// Create a new formatter with options.
    #[must_use]
    pub fn new(writer: W, options: FormatOptions) -> Self {
        Self {
            writer,
            options,
            line_length: 0,
        }
    }

    /// Consumes this formatter, returning the underlying writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Write a component tree to the underlying writer.
    ///
    /// Traversal is iterative, so adversarial nesting depth cannot
    /// exhaust the stack.
    ///
    /// # Errors
    /// Returns an error if writing fails.
    pub fn write(&mut self, component: &Component) -> io::Result<()> {
        enum Frame<'a> {
            Enter(&'a Component),
            Leave(&'a Component),
        }

        let mut stack = vec![Frame::Enter(component)];
        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(component) => {
                    write!(self, "{KW_BEGIN}:{}", component.kind)?;
                    self.writeln()?;
                    for property in component.properties() {
                        self.write_property(property)?;
                    }
                    stack.push(Frame::Leave(component));
                    stack.extend(component.children().iter().rev().map(Frame::Enter));
                }
                Frame::Leave(component) => {
                    write!(self, "{KW_END}:{}", component.kind)?;
                    self.writeln()?;
                }
            }
        }
        Ok(())
    }

    /// Write one content line: name, parameters, COLON, value, CRLF.
    ///
    /// The value-shaping parameters are derived from the value itself:
    /// `VALUE=` whenever the runtime kind differs from the property's
    /// default, `TZID=` for zoned non-UTC date-times, and
    /// `ENCODING=BASE64` for base64 binary data.
    fn write_property(&mut self, property: &Property) -> io::Result<()> {
        write!(self, "{}", property.kind)?;

        let kind = property.value.kind();
        if kind != property.kind.default_value_kind() && kind != ValueKind::Unknown {
            write!(self, ";{KW_VALUE}={kind}")?;
        }
        if let Some(tzid) = property.value.tzid() {
            write!(self, ";{KW_TZID}=")?;
            self.write_parameter_value(tzid)?;
        }
        if let Value::Binary(binary) = &property.value {
            // 8BIT is the default encoding and needs no parameter
            if binary.encoding == Encoding::Base64 {
                write!(self, ";{KW_ENCODING}={}", binary.encoding)?;
            }
        }
        for parameter in &property.parameters {
            self.write_parameter(parameter)?;
        }

        write!(self, ":")?;
        match (&property.kind, &property.value) {
            // GEO joins its two floats with a SEMICOLON (Section 3.8.1.6)
            (PropertyKind::Geo, Value::Float(values)) => {
                for (i, value) in values.iter().enumerate() {
                    if i > 0 {
                        write!(self, ";")?;
                    }
                    write!(self, "{value}")?;
                }
            }
            _ => write!(self, "{}", property.value)?,
        }
        self.writeln()
    }

    fn write_parameter(&mut self, parameter: &Parameter) -> io::Result<()> {
        write!(self, ";{}=", parameter.kind)?;
        for (i, value) in parameter.values.iter().enumerate() {
            if i > 0 {
                write!(self, ",")?;
            }
            self.write_parameter_value(value)?;
        }
        Ok(())
    }

    /// Parameter values containing COLON, SEMICOLON, or COMMA must be
    /// quoted (RFC 5545 Section 3.2).
    fn write_parameter_value(&mut self, value: &str) -> io::Result<()> {
        if value.contains([':', ';', ',']) {
            write!(self, "\"{value}\"")
        } else {
            write!(self, "{value}")
        }
    }

    /// Write a CRLF line ending.
    fn writeln(&mut self) -> io::Result<()> {
        self.writer.write_all(b"\r\n")?;
        self.line_length = 0;
        Ok(())
    }

    /// Insert line folding: CRLF + whitespace.
    fn insert_fold(&mut self) -> io::Result<()> {
        self.writer.write_all(self.options.folding_style.as_bytes())?;
        self.line_length = FoldingStyle::continuation_len();
        Ok(())
    }
}

impl<W: Write> Write for Formatter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let Some(max_len) = self.options.folding else {
            // folding disabled, write directly
            return self.writer.write(buf);
        };

        let mut remaining = buf;
        #[expect(clippy::indexing_slicing)]
        while !remaining.is_empty() {
            let available = max_len.saturating_sub(self.line_length);
            let budget = available.min(remaining.len());
            let safe = find_safe_write_length(remaining, budget);

            // Nothing fits before the limit (or a multi-byte character
            // straddles it): fold and retry with a fresh line.
            if safe == 0 {
                if self.line_length > FoldingStyle::continuation_len() {
                    self.insert_fold()?;
                    continue;
                }
                // The line is already fresh, so a single character cannot
                // fit under the limit. Exceed it rather than loop forever.
                let char_len = utf8_char_len(remaining[0]).min(remaining.len());
                let written = self.writer.write(&remaining[..char_len])?;
                self.line_length += written;
                remaining = &remaining[written..];
                continue;
            }

            let written = self.writer.write(&remaining[..safe])?;
            self.line_length += written;
            remaining = &remaining[written..];
        }

        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Find the maximum number of bytes we can write without breaking a UTF-8
/// sequence.
///
/// UTF-8 encoding:
/// - 0xxxxxxx: 1 byte (ASCII)
/// - 110xxxxx: 2 bytes
/// - 1110xxxx: 3 bytes
/// - 11110xxx: 4 bytes
/// - 10xxxxxx: continuation byte (not a start byte)
/// Length of the UTF-8 sequence starting with `first`.
const fn utf8_char_len(first: u8) -> usize {
    match first {
        0xF0.. => 4,
        0xE0.. => 3,
        0xC0.. => 2,
        _ => 1,
    }
}

fn find_safe_write_length(buf: &[u8], max_bytes: usize) -> usize {
    if max_bytes >= buf.len() {
        return buf.len();
    }

    // Back off while the byte after the cut is a continuation byte, so
    // the cut never lands inside a multi-byte sequence.
    let mut pos = max_bytes;
    #[expect(clippy::indexing_slicing)]
    while pos > 0 && (buf[pos] & 0xC0) == 0x80 {
        pos -= 1;
    }
    pos
}
