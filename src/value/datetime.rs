// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Date, Date-Time, and UTC Offset value types (RFC 5545 Sections 3.3.4,
//! 3.3.5, 3.3.12, and 3.3.14).

use std::fmt::{self, Display};

use chumsky::prelude::*;

use crate::keyword::KW_UTC;
use crate::value::Extra;

/// A calendar date.
///
/// The day of month is bounded by the grammar (01-31) but is deliberately
/// not checked against the month length: `20010230` parses and formats
/// back unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueDate {
    /// Full year (0000-9999)
    pub year: u16,
    /// Month of year (1-12)
    pub month: u8,
    /// Day of month (1-31)
    pub day: u8,
}

/// A time of day with second precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueTime {
    /// Hour (0-23)
    pub hour: u8,
    /// Minute (0-59)
    pub minute: u8,
    /// Second (0-60, 60 for leap seconds)
    pub second: u8,
}

/// A date with an optional time and an optional zone reference.
///
/// - `time == None` is a bare date (`VALUE=DATE` form).
/// - `tzid == Some("UTC")` formats with the `Z` suffix.
/// - any other `Some` names a VTIMEZONE and formats as a `TZID=` parameter.
/// - `None` is a floating local time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueDateTime {
    /// The date portion
    pub date: ValueDate,
    /// The time portion, absent for bare dates
    pub time: Option<ValueTime>,
    /// Zone reference, `"UTC"` or a VTIMEZONE identifier
    pub tzid: Option<String>,
}

impl ValueDateTime {
    /// A bare date without a time portion.
    #[must_use]
    pub const fn date_only(date: ValueDate) -> Self {
        Self {
            date,
            time: None,
            tzid: None,
        }
    }

    /// A floating local date-time.
    #[must_use]
    pub const fn floating(date: ValueDate, time: ValueTime) -> Self {
        Self {
            date,
            time: Some(time),
            tzid: None,
        }
    }

    /// A date-time fixed to UTC (`Z` suffix).
    #[must_use]
    pub fn utc(date: ValueDate, time: ValueTime) -> Self {
        Self {
            date,
            time: Some(time),
            tzid: Some(KW_UTC.to_owned()),
        }
    }

    /// A date-time local to the named time zone.
    #[must_use]
    pub fn zoned(date: ValueDate, time: ValueTime, tzid: impl Into<String>) -> Self {
        Self {
            date,
            time: Some(time),
            tzid: Some(tzid.into()),
        }
    }

    /// Whether this value has no time portion.
    #[must_use]
    pub const fn is_date_only(&self) -> bool {
        self.time.is_none()
    }

    /// Whether this value is fixed to UTC.
    #[must_use]
    pub fn is_utc(&self) -> bool {
        self.tzid.as_deref() == Some(KW_UTC)
    }
}

/// An offset from UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValueUtcOffset {
    /// Whether the offset is ahead of UTC
    pub positive: bool,
    /// Hours (0-23)
    pub hours: u8,
    /// Minutes (0-59)
    pub minutes: u8,
    /// Seconds (0-59)
    pub seconds: u8,
}

/// A fixed-width run of ASCII digits.
pub(crate) fn fixed_digits<'src>(len: usize) -> impl Parser<'src, &'src str, u32, Extra<'src>> + Copy {
    select! { c @ '0'..='9' => c }
        .repeated()
        .exactly(len)
        .collect::<String>()
        .try_map(|s: String, span| match lexical::parse_partial::<u32, _>(s.as_bytes()) {
            Ok((value, read)) if read == s.len() => Ok(value),
            _ => Err(Rich::custom(span, "invalid digits")),
        })
}

/// Format Definition:
///
/// ```txt
/// date          = date-value
/// date-value    = date-fullyear date-month date-mday
/// date-fullyear = 4DIGIT
/// date-month    = 2DIGIT  ; 01-12
/// date-mday     = 2DIGIT  ; 01-28, 01-29, 01-30, 01-31 based on month/year
/// ```
pub fn value_date<'src>() -> impl Parser<'src, &'src str, ValueDate, Extra<'src>> {
    fixed_digits(4)
        .then(fixed_digits(2))
        .then(fixed_digits(2))
        .try_map(|((year, month), day), span| {
            let year =
                u16::try_from(year).map_err(|_| Rich::custom(span, "year out of range"))?;
            let month = u8::try_from(month)
                .ok()
                .filter(|m| (1..=12).contains(m))
                .ok_or_else(|| Rich::custom(span, "month out of range"))?;
            let day = u8::try_from(day)
                .ok()
                .filter(|d| (1..=31).contains(d))
                .ok_or_else(|| Rich::custom(span, "day out of range"))?;
            Ok(ValueDate { year, month, day })
        })
}

/// Format Definition:
///
/// ```txt
/// time        = time-hour time-minute time-second
/// time-hour   = 2DIGIT  ; 00-23
/// time-minute = 2DIGIT  ; 00-59
/// time-second = 2DIGIT  ; 00-60 (leap second)
/// ```
pub fn value_time<'src>() -> impl Parser<'src, &'src str, ValueTime, Extra<'src>> {
    fixed_digits(2)
        .then(fixed_digits(2))
        .then(fixed_digits(2))
        .try_map(|((hour, minute), second), span| {
            let hour = u8::try_from(hour)
                .ok()
                .filter(|h| *h <= 23)
                .ok_or_else(|| Rich::custom(span, "hour out of range"))?;
            let minute = u8::try_from(minute)
                .ok()
                .filter(|m| *m <= 59)
                .ok_or_else(|| Rich::custom(span, "minute out of range"))?;
            let second = u8::try_from(second)
                .ok()
                .filter(|s| *s <= 60)
                .ok_or_else(|| Rich::custom(span, "second out of range"))?;
            Ok(ValueTime { hour, minute, second })
        })
}

/// Format Definition:
///
/// ```txt
/// date-time = date "T" time ["Z"]
/// ```
pub fn value_date_time<'src>() -> impl Parser<'src, &'src str, ValueDateTime, Extra<'src>> {
    value_date()
        .then_ignore(just('T'))
        .then(value_time())
        .then(just('Z').or_not())
        .map(|((date, time), zulu)| ValueDateTime {
            date,
            time: Some(time),
            tzid: zulu.map(|_| KW_UTC.to_owned()),
        })
}

/// A bare date parsed into the date-time model with no time portion.
pub fn value_date_only<'src>() -> impl Parser<'src, &'src str, ValueDateTime, Extra<'src>> {
    value_date().map(ValueDateTime::date_only)
}

/// COMMA-separated date-time list (e.g., EXDATE).
pub fn values_date_time<'src>() -> impl Parser<'src, &'src str, Vec<ValueDateTime>, Extra<'src>> {
    value_date_time()
        .separated_by(just(','))
        .at_least(1)
        .collect()
}

/// COMMA-separated bare-date list.
pub fn values_date<'src>() -> impl Parser<'src, &'src str, Vec<ValueDateTime>, Extra<'src>> {
    value_date_only()
        .separated_by(just(','))
        .at_least(1)
        .collect()
}

/// Format Definition:
///
/// ```txt
/// utc-offset = ("+" / "-") time-hour time-minute [time-second]
/// ```
///
/// "-0000" and "-000000" are not allowed.
pub fn value_utc_offset<'src>() -> impl Parser<'src, &'src str, ValueUtcOffset, Extra<'src>> {
    let sign = select! { '+' => true, '-' => false };
    sign.then(fixed_digits(2))
        .then(fixed_digits(2))
        .then(fixed_digits(2).or_not())
        .try_map(|(((positive, hours), minutes), seconds), span| {
            let hours = u8::try_from(hours)
                .ok()
                .filter(|h| *h <= 23)
                .ok_or_else(|| Rich::custom(span, "offset hours out of range"))?;
            let minutes = u8::try_from(minutes)
                .ok()
                .filter(|m| *m <= 59)
                .ok_or_else(|| Rich::custom(span, "offset minutes out of range"))?;
            let seconds = match seconds {
                Some(s) => u8::try_from(s)
                    .ok()
                    .filter(|s| *s <= 59)
                    .ok_or_else(|| Rich::custom(span, "offset seconds out of range"))?,
                None => 0,
            };
            if !positive && hours == 0 && minutes == 0 && seconds == 0 {
                return Err(Rich::custom(span, "negative zero offset is not allowed"));
            }
            Ok(ValueUtcOffset { positive, hours, minutes, seconds })
        })
}

impl Display for ValueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}{:02}", self.year, self.month, self.day)
    }
}

impl Display for ValueTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}{:02}", self.hour, self.minute, self.second)
    }
}

impl Display for ValueDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.date.fmt(f)?;
        if let Some(time) = &self.time {
            write!(f, "T{time}")?;
            if self.is_utc() {
                f.write_str("Z")?;
            }
        }
        Ok(())
    }
}

impl Display for ValueUtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.positive { '+' } else { '-' };
        write!(f, "{sign}{:02}{:02}", self.hours, self.minutes)?;
        if self.seconds != 0 {
            write!(f, "{:02}", self.seconds)?;
        }
        Ok(())
    }
}
