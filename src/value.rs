// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Property value types (RFC 5545 Section 3.3).
//!
//! Each value type has a parse-from-text/format-to-text pair. [`Value`]
//! is the tagged union over all of them; [`ValueKind`] names them the way
//! the `VALUE` parameter does, and [`parse_value`] dispatches raw value
//! text to the right grammar.

pub mod binary;
pub mod datetime;
pub mod duration;
pub mod numeric;
pub mod period;
pub mod rrule;
pub mod text;

use std::fmt::{self, Display};

use chumsky::error::Rich;
use chumsky::prelude::*;

pub use crate::value::binary::{Encoding, ValueBinary};
pub use crate::value::datetime::{ValueDate, ValueDateTime, ValueTime, ValueUtcOffset};
pub use crate::value::duration::ValueDuration;
pub use crate::value::period::{PeriodEnd, ValuePeriod};
pub use crate::value::rrule::{
    RecurrenceFrequency, RecurrenceLimit, ValueRecurrenceRule, WeekDay, WeekDayNum,
};

use crate::keyword::{
    KW_BINARY, KW_BOOLEAN, KW_CAL_ADDRESS, KW_DATE, KW_DATETIME, KW_DURATION, KW_FALSE, KW_FLOAT,
    KW_INTEGER, KW_PERIOD, KW_RECUR, KW_TEXT, KW_TRUE, KW_URI, KW_UTC_OFFSET,
};

/// The chumsky error type shared by all value grammars.
pub(crate) type Extra<'src> = extra::Err<Rich<'src, char>>;

/// A property value.
///
/// Multi-valued types hold every COMMA-separated entry of the content
/// line; a single value is a one-element list.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Inline binary data (Section 3.3.1)
    Binary(ValueBinary),
    /// Boolean (Section 3.3.2)
    Boolean(bool),
    /// Calendar user address, stored verbatim (Section 3.3.3)
    CalAddress(String),
    /// Dates and date-times, bare dates have no time portion
    /// (Sections 3.3.4 and 3.3.5)
    DateTime(Vec<ValueDateTime>),
    /// Durations (Section 3.3.6)
    Duration(Vec<ValueDuration>),
    /// Floats (Section 3.3.7)
    Float(Vec<f64>),
    /// Integers (Section 3.3.8)
    Integer(Vec<i32>),
    /// Periods of time (Section 3.3.9)
    Period(Vec<ValuePeriod>),
    /// Recurrence rule (Section 3.3.10)
    RecurrenceRule(ValueRecurrenceRule),
    /// Text entries with escapes resolved (Section 3.3.11)
    Text(Vec<String>),
    /// URI, stored verbatim (Section 3.3.13)
    Uri(String),
    /// UTC offset (Section 3.3.14)
    UtcOffset(ValueUtcOffset),
    /// Raw value text of a property with no known type, kept verbatim
    Unknown(String),
}

/// A value type name, as the `VALUE` parameter spells it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// BINARY
    Binary,
    /// BOOLEAN
    Boolean,
    /// CAL-ADDRESS
    CalAddress,
    /// DATE
    Date,
    /// DATE-TIME
    DateTime,
    /// DURATION
    Duration,
    /// FLOAT
    Float,
    /// INTEGER
    Integer,
    /// PERIOD
    Period,
    /// RECUR
    Recur,
    /// TEXT
    Text,
    /// URI
    Uri,
    /// UTC-OFFSET
    UtcOffset,
    /// No known type; the value passes through verbatim. Never written
    /// as a `VALUE` parameter.
    Unknown,
}

impl ValueKind {
    /// Look up a `VALUE` parameter name, case-insensitively.
    ///
    /// Returns `None` for names this implementation does not model
    /// (including IANA-registered ones like `TIME`).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name.to_ascii_uppercase().as_str() {
            KW_BINARY => Self::Binary,
            KW_BOOLEAN => Self::Boolean,
            KW_CAL_ADDRESS => Self::CalAddress,
            KW_DATE => Self::Date,
            KW_DATETIME => Self::DateTime,
            KW_DURATION => Self::Duration,
            KW_FLOAT => Self::Float,
            KW_INTEGER => Self::Integer,
            KW_PERIOD => Self::Period,
            KW_RECUR => Self::Recur,
            KW_TEXT => Self::Text,
            KW_URI => Self::Uri,
            KW_UTC_OFFSET => Self::UtcOffset,
            _ => return None,
        };
        Some(kind)
    }

    /// The name as the `VALUE` parameter spells it.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Binary => KW_BINARY,
            Self::Boolean => KW_BOOLEAN,
            Self::CalAddress => KW_CAL_ADDRESS,
            Self::Date => KW_DATE,
            Self::DateTime => KW_DATETIME,
            Self::Duration => KW_DURATION,
            Self::Float => KW_FLOAT,
            Self::Integer => KW_INTEGER,
            Self::Period => KW_PERIOD,
            Self::Recur => KW_RECUR,
            Self::Text => KW_TEXT,
            Self::Uri => KW_URI,
            Self::UtcOffset => KW_UTC_OFFSET,
            Self::Unknown => "UNKNOWN",
        }
    }
}

impl Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    /// The kind of this value at runtime.
    ///
    /// A date-time list whose entries are all bare dates reports
    /// [`ValueKind::Date`], which is what drives the derived
    /// `VALUE=DATE` parameter on output.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Binary(_) => ValueKind::Binary,
            Self::Boolean(_) => ValueKind::Boolean,
            Self::CalAddress(_) => ValueKind::CalAddress,
            Self::DateTime(values) => {
                if !values.is_empty() && values.iter().all(ValueDateTime::is_date_only) {
                    ValueKind::Date
                } else {
                    ValueKind::DateTime
                }
            }
            Self::Duration(_) => ValueKind::Duration,
            Self::Float(_) => ValueKind::Float,
            Self::Integer(_) => ValueKind::Integer,
            Self::Period(_) => ValueKind::Period,
            Self::RecurrenceRule(_) => ValueKind::Recur,
            Self::Text(_) => ValueKind::Text,
            Self::Uri(_) => ValueKind::Uri,
            Self::UtcOffset(_) => ValueKind::UtcOffset,
            Self::Unknown(_) => ValueKind::Unknown,
        }
    }

    /// The `TZID` to write as a parameter: the zone of the first zoned,
    /// non-UTC date-time, if any. UTC is carried by the `Z` suffix instead.
    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        fn zone(dt: &ValueDateTime) -> Option<&str> {
            if dt.is_utc() { None } else { dt.tzid.as_deref() }
        }
        match self {
            Self::DateTime(values) => values.iter().find_map(zone),
            Self::Period(periods) => periods.iter().find_map(|p| {
                zone(&p.start).or_else(|| match &p.end {
                    PeriodEnd::Explicit(end) => zone(end),
                    PeriodEnd::Duration(_) => None,
                })
            }),
            _ => None,
        }
    }
}

/// Parse raw value text as the given kind.
///
/// `encoding` only matters for [`ValueKind::Binary`]; everything else
/// ignores it.
///
/// # Errors
///
/// Returns a human-readable description of the first grammar violation.
pub(crate) fn parse_value(kind: ValueKind, raw: &str, encoding: Encoding) -> Result<Value, String> {
    match kind {
        ValueKind::Binary => binary::parse_binary(raw, encoding).map(Value::Binary),
        ValueKind::Boolean => numeric::parse_boolean(raw).map(Value::Boolean),
        ValueKind::CalAddress => Ok(Value::CalAddress(raw.to_owned())),
        ValueKind::Date => run(datetime::values_date(), raw).map(Value::DateTime),
        // DTSTART and friends may hold bare dates under VALUE=DATE; be
        // lenient and accept them here too, the runtime kind records it.
        ValueKind::DateTime => {
            let entry = choice((datetime::value_date_time(), datetime::value_date_only()));
            run(entry.separated_by(just(',')).at_least(1).collect(), raw).map(Value::DateTime)
        }
        ValueKind::Duration => run(duration::values_duration(), raw).map(Value::Duration),
        ValueKind::Float => run(numeric::values_float(), raw).map(Value::Float),
        ValueKind::Integer => run(numeric::values_integer(), raw).map(Value::Integer),
        ValueKind::Period => run(period::values_period(), raw).map(Value::Period),
        ValueKind::Recur => run(rrule::value_recurrence_rule(), raw).map(Value::RecurrenceRule),
        ValueKind::Text => run(text::values_text(), raw).map(Value::Text),
        ValueKind::Uri => Ok(Value::Uri(raw.to_owned())),
        ValueKind::UtcOffset => run(datetime::value_utc_offset(), raw).map(Value::UtcOffset),
        ValueKind::Unknown => Ok(Value::Unknown(raw.to_owned())),
    }
}

/// Run a value grammar over the whole input, reducing chumsky's error
/// list to its first message.
pub(crate) fn run<'src, T>(
    parser: impl Parser<'src, &'src str, T, Extra<'src>>,
    src: &'src str,
) -> Result<T, String> {
    parser.parse(src).into_result().map_err(|errors| {
        errors
            .first()
            .map_or_else(|| "invalid value".to_owned(), ToString::to_string)
    })
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Binary(binary) => binary.fmt(f),
            Self::Boolean(b) => f.write_str(if *b { KW_TRUE } else { KW_FALSE }),
            Self::CalAddress(s) | Self::Uri(s) | Self::Unknown(s) => f.write_str(s),
            Self::DateTime(values) => write_joined(f, values),
            Self::Duration(values) => write_joined(f, values),
            Self::Float(values) => write_joined(f, values),
            Self::Integer(values) => write_joined(f, values),
            Self::Period(values) => write_joined(f, values),
            Self::RecurrenceRule(rule) => rule.fmt(f),
            Self::Text(values) => {
                for (i, entry) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    text::write_escaped_text(f, entry)?;
                }
                Ok(())
            }
            Self::UtcOffset(offset) => offset.fmt(f),
        }
    }
}

fn write_joined<T: Display>(f: &mut fmt::Formatter<'_>, values: &[T]) -> fmt::Result {
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        value.fmt(f)?;
    }
    Ok(())
}
