// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Tree builder: pairs BEGIN/END content lines into a raw component tree.
//!
//! Stack-based: BEGIN pushes a component, a property lands on the top of
//! the stack, END pops and attaches to the parent (or to the root list).
//! Component names are matched case-insensitively, as RFC 5545 requires.

use crate::keyword::{KW_BEGIN, KW_END};
use crate::span::{Segments, Span};
use crate::syntax::scanner::{ContentLine, ScannedParameter};
use crate::syntax::{StructureError, line_number};

/// A raw iCalendar component: names and values still unresolved text.
#[derive(Debug, Clone)]
pub struct RawComponent<'src> {
    /// Component name as written (e.g., "VCALENDAR", "VEVENT")
    pub name: Segments<'src>,
    /// Properties in source order
    pub properties: Vec<RawProperty<'src>>,
    /// Nested components in source order
    pub children: Vec<RawComponent<'src>>,
    /// Span of the BEGIN line
    pub span: Span,
}

/// A raw property: name, parameters, and the untyped value text.
#[derive(Debug, Clone)]
pub struct RawProperty<'src> {
    /// Property name as written
    pub name: Segments<'src>,
    /// Parameters in source order (duplicates preserved)
    pub parameters: Vec<ScannedParameter<'src>>,
    /// Raw value text
    pub value: Segments<'src>,
    /// Span of the content line
    pub span: Span,
}

/// Build the raw component tree from scanned content lines.
///
/// # Errors
///
/// Fails on the first nesting defect: an END that closes nothing or the
/// wrong component, a BEGIN left open at end of input, a property outside
/// any component, or a BEGIN/END line that carries parameters.
pub fn build_tree<'src>(
    src: &str,
    lines: Vec<ContentLine<'src>>,
) -> Result<Vec<RawComponent<'src>>, StructureError> {
    let mut stack: Vec<RawComponent<'src>> = Vec::new();
    let mut roots = Vec::new();

    for line in lines {
        let line_no = line_number(src, line.span.start);

        if line.name.eq_str_ignore_ascii_case(KW_BEGIN) {
            check_delimiter_line(&line, line_no)?;
            stack.push(RawComponent {
                name: line.value,
                properties: Vec::new(),
                children: Vec::new(),
                span: line.span,
            });
        } else if line.name.eq_str_ignore_ascii_case(KW_END) {
            check_delimiter_line(&line, line_no)?;
            let Some(component) = stack.pop() else {
                return Err(StructureError::UnmatchedEnd {
                    name: line.value.to_owned(),
                    line: line_no,
                });
            };
            if !component.name.eq_str_ignore_ascii_case(&line.value.resolve()) {
                return Err(StructureError::MismatchedEnd {
                    expected: component.name.to_owned(),
                    found: line.value.to_owned(),
                    line: line_no,
                });
            }
            match stack.last_mut() {
                Some(parent) => parent.children.push(component),
                None => roots.push(component),
            }
        } else if let Some(current) = stack.last_mut() {
            current.properties.push(RawProperty {
                name: line.name,
                parameters: line.parameters,
                value: line.value,
                span: line.span,
            });
        } else {
            return Err(StructureError::PropertyOutsideComponent {
                name: line.name.to_owned(),
                line: line_no,
            });
        }
    }

    if let Some(component) = stack.first() {
        return Err(StructureError::UnclosedComponent {
            name: component.name.to_owned(),
            line: line_number(src, component.span.start),
        });
    }

    Ok(roots)
}

/// BEGIN/END lines take a bare component name: no parameters, no empty value.
fn check_delimiter_line(line: &ContentLine<'_>, line_no: usize) -> Result<(), StructureError> {
    if !line.parameters.is_empty() {
        return Err(StructureError::MalformedLine {
            reason: "BEGIN/END lines must not carry parameters",
            line: line_no,
        });
    }
    if line.value.is_empty() {
        return Err(StructureError::MalformedLine {
            reason: "BEGIN/END line is missing a component name",
            line: line_no,
        });
    }
    Ok(())
}
