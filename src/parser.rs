// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! iCalendar (RFC 5545) parser module.
//!
//! Drives the full pipeline: tokenize, scan content lines, build the raw
//! component tree, then analyze names and values into the typed model.
//! Parsing is fail-fast: the first structural or value defect aborts with
//! a [`ParseError`] carrying the line number, there are no partial trees.

use crate::component::{Component, ComponentKind};
use crate::parameter::{Parameter, ParameterKind};
use crate::property::{Property, PropertyKind};
use crate::syntax::{
    RawComponent, RawProperty, StructureError, build_tree, line_number, scan_content_lines,
    tokenize,
};
use crate::value::{
    Encoding, PeriodEnd, Value, ValueKind, binary::parse_encoding, numeric::values_float_pair,
    parse_value, run,
};

/// An error produced while parsing iCalendar text.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// The BEGIN/END structure of the input is broken.
    #[error(transparent)]
    Structure(#[from] StructureError),
    /// A property value does not match its value type's grammar.
    #[error(transparent)]
    ValueFormat(#[from] ValueFormatError),
    /// An explicit `VALUE=` parameter names a type this implementation
    /// does not model.
    #[error("unsupported value type {name:?} on {property} at line {line}")]
    UnsupportedValueType {
        /// The `VALUE` parameter's value as written
        name: String,
        /// Name of the property carrying the parameter
        property: String,
        /// Physical line number (1-based)
        line: usize,
    },
}

/// A property value that does not match its value type's grammar.
#[derive(Debug, thiserror::Error)]
#[error("invalid {value_type} value for {property} at line {line}: {detail}")]
pub struct ValueFormatError {
    /// Name of the offending property
    pub property: String,
    /// The value type the grammar expected
    pub value_type: &'static str,
    /// What the grammar rejected
    pub detail: String,
    /// Physical line number (1-based)
    pub line: usize,
}

/// Parse iCalendar text into its single root component.
///
/// # Errors
///
/// Fails on the first defect, and additionally when the input holds no
/// root component or more than one. Use [`parse_all`] for streams that
/// concatenate several calendars.
pub fn parse(src: &str) -> Result<Component, ParseError> {
    let mut components = parse_all(src)?;
    if components.len() > 1 {
        return Err(StructureError::MultipleRoots { count: components.len() }.into());
    }
    components.pop().ok_or_else(|| StructureError::EmptyInput.into())
}

/// Parse iCalendar text into every root component it holds.
///
/// # Errors
///
/// Fails on the first structural or value defect. An input with no
/// components at all yields an empty list.
pub fn parse_all(src: &str) -> Result<Vec<Component>, ParseError> {
    let lines = scan_content_lines(src, tokenize(src))?;
    let roots = build_tree(src, lines)?;
    roots.into_iter().map(|raw| analyze_component(src, raw)).collect()
}

struct Frame<'src> {
    component: Component,
    pending: std::vec::IntoIter<RawComponent<'src>>,
}

/// Turn one raw component tree into the typed model.
///
/// The walk is iterative, adversarial nesting depth cannot exhaust the
/// stack.
fn analyze_component(src: &str, raw: RawComponent<'_>) -> Result<Component, ParseError> {
    let mut current = open_frame(src, raw)?;
    let mut stack = Vec::new();

    loop {
        if let Some(child) = current.pending.next() {
            let child = open_frame(src, child)?;
            stack.push(std::mem::replace(&mut current, child));
        } else {
            match stack.pop() {
                Some(mut parent) => {
                    parent.component.add_child(current.component);
                    current = parent;
                }
                None => return Ok(current.component),
            }
        }
    }
}

fn open_frame<'src>(src: &str, raw: RawComponent<'src>) -> Result<Frame<'src>, ParseError> {
    let mut component = Component::new(ComponentKind::from_name(&raw.name.resolve()));
    for property in raw.properties {
        component.add_property(analyze_property(src, property)?);
    }
    Ok(Frame { component, pending: raw.children.into_iter() })
}

/// Analyze one content line into a typed property.
///
/// The three value-shaping parameters are consumed here: `VALUE=`
/// selects the grammar, `TZID=` is folded into the date-time values, and
/// `ENCODING=` governs binary decoding. They are re-derived from the
/// value on output, everything else is carried through as-is.
fn analyze_property(src: &str, raw: RawProperty<'_>) -> Result<Property, ParseError> {
    let line = line_number(src, raw.span.start);
    let name = raw.name.resolve().into_owned();
    let kind = PropertyKind::from_name(&name);

    let mut value_kind = kind.default_value_kind();
    let mut tzid: Option<String> = None;
    let mut encoding = Encoding::EightBit; // the RFC default
    let mut parameters = Vec::new();

    for parameter in raw.parameters {
        let parameter_kind = ParameterKind::from_name(&parameter.name.resolve());
        let first_value = parameter
            .values
            .first()
            .map_or_else(String::new, |v| v.value.resolve().into_owned());

        match parameter_kind {
            ParameterKind::Value => {
                value_kind = ValueKind::from_name(&first_value).ok_or_else(|| {
                    ParseError::UnsupportedValueType {
                        name: first_value.clone(),
                        property: name.clone(),
                        line,
                    }
                })?;
            }
            ParameterKind::TzId => tzid = Some(first_value),
            ParameterKind::Encoding => {
                encoding = parse_encoding(&first_value).map_err(|detail| ValueFormatError {
                    property: name.clone(),
                    value_type: ValueKind::Binary.as_str(),
                    detail,
                    line,
                })?;
            }
            _ => parameters.push(Parameter {
                kind: parameter_kind,
                values: parameter
                    .values
                    .iter()
                    .map(|v| v.value.resolve().into_owned())
                    .collect(),
            }),
        }
    }

    let raw_value = raw.value.resolve();
    let parsed = if kind == PropertyKind::Geo && value_kind == ValueKind::Float {
        // GEO joins its two floats with a SEMICOLON (Section 3.8.1.6)
        run(values_float_pair(), &raw_value).map(Value::Float)
    } else {
        parse_value(value_kind, &raw_value, encoding)
    };
    let value = parsed.map_err(|detail| ValueFormatError {
        property: name.clone(),
        value_type: value_kind.as_str(),
        detail,
        line,
    })?;

    Ok(Property { kind, value: apply_tzid(tzid, value, &mut parameters), parameters })
}

/// Fold a `TZID=` parameter into the date-time values it scopes.
///
/// Only floating times take the zone; a `Z`-suffixed (UTC) entry keeps
/// its own classification, and bare dates have no time to zone. A `TZID`
/// that no entry takes (date-only values, all-UTC lists, non-date-time
/// values) is kept as an ordinary parameter so it survives a round trip.
fn apply_tzid(tzid: Option<String>, value: Value, parameters: &mut Vec<Parameter>) -> Value {
    let Some(tzid) = tzid else {
        return value;
    };
    let mut consumed = false;
    let value = match value {
        Value::DateTime(mut values) => {
            for dt in &mut values {
                if dt.time.is_some() && dt.tzid.is_none() {
                    dt.tzid = Some(tzid.clone());
                    consumed = true;
                }
            }
            Value::DateTime(values)
        }
        Value::Period(mut periods) => {
            for period in &mut periods {
                if period.start.tzid.is_none() {
                    period.start.tzid = Some(tzid.clone());
                    consumed = true;
                }
                if let PeriodEnd::Explicit(end) = &mut period.end {
                    if end.tzid.is_none() {
                        end.tzid = Some(tzid.clone());
                        consumed = true;
                    }
                }
            }
            Value::Period(periods)
        }
        other => other,
    };
    if !consumed {
        parameters.push(Parameter::new(ParameterKind::TzId, tzid));
    }
    value
}

#[cfg(test)]
mod tests {
    #![expect(clippy::indexing_slicing)]

    use super::*;
    use crate::value::{ValueDateTime, ValueKind};

    #[test]
    fn parses_a_minimal_calendar() {
        let src = "\
BEGIN:VCALENDAR\r\n\
PRODID:-//Example//EN\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
UID:1@example.com\r\n\
DTSTAMP:20250601T120000Z\r\n\
SUMMARY:Team sync\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";
        let calendar = parse(src).unwrap();
        assert_eq!(calendar.kind, ComponentKind::VCalendar);
        assert_eq!(calendar.children().len(), 1);

        let event = &calendar.children()[0];
        assert_eq!(event.kind, ComponentKind::VEvent);
        assert_eq!(
            event.property(&PropertyKind::Summary).unwrap().value,
            Value::Text(vec!["Team sync".to_owned()])
        );
        match &event.property(&PropertyKind::DtStamp).unwrap().value {
            Value::DateTime(values) => assert!(values[0].is_utc()),
            other => panic!("expected a date-time, got {other:?}"),
        }
    }

    #[test]
    fn requires_exactly_one_root() {
        assert!(matches!(
            parse(""),
            Err(ParseError::Structure(StructureError::EmptyInput))
        ));

        let two = "BEGIN:VCALENDAR\r\nEND:VCALENDAR\r\nBEGIN:VCALENDAR\r\nEND:VCALENDAR\r\n";
        assert!(matches!(
            parse(two),
            Err(ParseError::Structure(StructureError::MultipleRoots { count: 2 }))
        ));
        assert_eq!(parse_all(two).unwrap().len(), 2);
    }

    #[test]
    fn value_parameter_overrides_the_default_kind() {
        let src = "\
BEGIN:VCALENDAR\r\n\
BEGIN:VEVENT\r\n\
DTSTART;VALUE=DATE:20011221\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";
        let calendar = parse(src).unwrap();
        let event = &calendar.children()[0];
        let dtstart = event.property(&PropertyKind::DtStart).unwrap();
        assert_eq!(dtstart.value.kind(), ValueKind::Date);
        // the VALUE parameter was consumed, not stored
        assert!(dtstart.parameter(&ParameterKind::Value).is_none());
    }

    #[test]
    fn rejects_unsupported_value_types() {
        let src = "\
BEGIN:VCALENDAR\r\n\
X-WAKE;VALUE=TIME:070000\r\n\
END:VCALENDAR\r\n";
        match parse(src) {
            Err(ParseError::UnsupportedValueType { name, property, line }) => {
                assert_eq!(name, "TIME");
                assert_eq!(property, "X-WAKE");
                assert_eq!(line, 2);
            }
            other => panic!("expected UnsupportedValueType, got {other:?}"),
        }
    }

    #[test]
    fn folds_tzid_into_floating_date_times() {
        let src = "\
BEGIN:VCALENDAR\r\n\
BEGIN:VEVENT\r\n\
DTSTART;TZID=America/New_York:20250101T090000\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";
        let calendar = parse(src).unwrap();
        let dtstart = &calendar.children()[0].property(&PropertyKind::DtStart).unwrap();
        match &dtstart.value {
            Value::DateTime(values) => {
                assert_eq!(values[0].tzid.as_deref(), Some("America/New_York"));
            }
            other => panic!("expected a date-time, got {other:?}"),
        }
        assert!(dtstart.parameter(&ParameterKind::TzId).is_none());
    }

    #[test]
    fn reports_value_errors_with_line_numbers() {
        let src = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
BEGIN:VEVENT\r\n\
DTSTART:not-a-date\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";
        match parse(src) {
            Err(ParseError::ValueFormat(err)) => {
                assert_eq!(err.property, "DTSTART");
                assert_eq!(err.line, 4);
            }
            other => panic!("expected ValueFormat, got {other:?}"),
        }
    }

    #[test]
    fn unknown_properties_pass_through_verbatim() {
        let src = "\
BEGIN:VCALENDAR\r\n\
X-CUSTOM-PROP:anything; even \\ odd, text\r\n\
END:VCALENDAR\r\n";
        let calendar = parse(src).unwrap();
        let prop = &calendar.properties()[0];
        assert_eq!(prop.kind, PropertyKind::XName("X-CUSTOM-PROP".to_owned()));
        assert_eq!(
            prop.value,
            Value::Unknown("anything; even \\ odd, text".to_owned())
        );
    }

    #[test]
    fn decodes_base64_attachments() {
        let src = "\
BEGIN:VCALENDAR\r\n\
ATTACH;FMTTYPE=text/plain;ENCODING=BASE64;VALUE=BINARY:SGVsbG8=\r\n\
END:VCALENDAR\r\n";
        let calendar = parse(src).unwrap();
        match &calendar.properties()[0].value {
            Value::Binary(binary) => {
                assert_eq!(binary.data, b"Hello");
                assert_eq!(binary.encoding, Encoding::Base64);
            }
            other => panic!("expected binary, got {other:?}"),
        }
        // FMTTYPE stays; ENCODING and VALUE were consumed
        assert_eq!(calendar.properties()[0].parameters.len(), 1);
    }

    #[test]
    fn utc_entries_ignore_a_stray_tzid() {
        let src = "\
BEGIN:VCALENDAR\r\n\
BEGIN:VEVENT\r\n\
DTSTART;TZID=America/New_York:20250101T090000Z\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";
        let calendar = parse(src).unwrap();
        let dtstart = calendar.children()[0].property(&PropertyKind::DtStart).unwrap();
        match &dtstart.value {
            Value::DateTime(values) => assert!(values[0].is_utc()),
            other => panic!("expected a date-time, got {other:?}"),
        }
        // the zone did not apply, so the parameter is carried through
        assert_eq!(
            dtstart.parameter(&ParameterKind::TzId).and_then(Parameter::value),
            Some("America/New_York")
        );
    }

    #[test]
    fn tzid_on_date_only_values_is_preserved() {
        let src = "\
BEGIN:VCALENDAR\r\n\
BEGIN:VEVENT\r\n\
DTSTART;TZID=America/New_York;VALUE=DATE:20011221\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";
        let calendar = parse(src).unwrap();
        let dtstart = calendar.children()[0].property(&PropertyKind::DtStart).unwrap();
        match &dtstart.value {
            Value::DateTime(values) => assert!(values[0].is_date_only()),
            other => panic!("expected a date, got {other:?}"),
        }
        // bare dates have no time to zone, the parameter stays
        assert_eq!(
            dtstart.parameter(&ParameterKind::TzId).and_then(Parameter::value),
            Some("America/New_York")
        );
    }

    #[test]
    fn parses_folded_lines() {
        let src = "\
BEGIN:VCALENDAR\r\n\
DESCRIPTION:The quick brown fox \r\n jumps over the lazy dog\r\n\
END:VCALENDAR\r\n";
        let calendar = parse(src).unwrap();
        assert_eq!(
            calendar.properties()[0].value,
            Value::Text(vec!["The quick brown fox jumps over the lazy dog".to_owned()])
        );
    }

    #[test]
    fn exrule_parses_as_a_recurrence_rule() {
        let src = "\
BEGIN:VCALENDAR\r\n\
BEGIN:VEVENT\r\n\
RRULE:FREQ=DAILY;COUNT=10\r\n\
EXRULE:FREQ=DAILY;INTERVAL=2\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";
        let calendar = parse(src).unwrap();
        let event = &calendar.children()[0];
        assert!(matches!(
            event.property(&PropertyKind::ExRule).unwrap().value,
            Value::RecurrenceRule(_)
        ));
    }

    #[test]
    fn date_only_values_have_no_time() {
        let src = "\
BEGIN:VCALENDAR\r\n\
BEGIN:VEVENT\r\n\
EXDATE;VALUE=DATE:20011221,20011222\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";
        let calendar = parse(src).unwrap();
        match &calendar.children()[0].property(&PropertyKind::ExDate).unwrap().value {
            Value::DateTime(values) => {
                assert_eq!(values.len(), 2);
                assert!(values.iter().all(ValueDateTime::is_date_only));
            }
            other => panic!("expected dates, got {other:?}"),
        }
    }
}
