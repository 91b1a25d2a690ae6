// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Duration value type (RFC 5545 Section 3.3.6).

use std::fmt::{self, Display};

use chumsky::prelude::*;

use crate::value::Extra;

/// A signed duration broken into calendar fields.
///
/// Fields are kept exactly as written: `PT90M` stays 90 minutes and is not
/// normalized to an hour and a half. A duration with all fields zero
/// formats as `PT0S`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValueDuration {
    /// Whether the duration is negative
    pub negative: bool,
    /// Weeks
    pub weeks: u32,
    /// Days
    pub days: u32,
    /// Hours
    pub hours: u32,
    /// Minutes
    pub minutes: u32,
    /// Seconds
    pub seconds: u32,
}

impl ValueDuration {
    /// Whether every field is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.weeks == 0 && self.days == 0 && self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }
}

/// Format Definition:
///
/// ```txt
/// dur-value  = (["+"] / "-") "P" (dur-date / dur-time / dur-week)
///
/// dur-date   = dur-day [dur-time]
/// dur-time   = "T" (dur-hour / dur-minute / dur-second)
/// dur-week   = 1*DIGIT "W"
/// dur-hour   = 1*DIGIT "H" [dur-minute]
/// dur-minute = 1*DIGIT "M" [dur-second]
/// dur-second = 1*DIGIT "S"
/// dur-day    = 1*DIGIT "D"
/// ```
pub fn value_duration<'src>() -> impl Parser<'src, &'src str, ValueDuration, Extra<'src>> {
    // case-sensitive
    let int = select! { c @ '0'..='9' => c }
        .repeated()
        .at_least(1)
        .at_most(10) // u32 max is 10 digits: 4_294_967_295
        .collect::<String>()
        .try_map(|s: String, span| match lexical::parse_partial::<u32, _>(s.as_bytes()) {
            Ok((value, read)) if read == s.len() => Ok(value),
            _ => Err(Rich::custom(span, "duration field out of range")),
        });

    let week = int.then_ignore(just('W'));
    let day = int.then_ignore(just('D'));
    let hour = int.then_ignore(just('H'));
    let minute = int.then_ignore(just('M'));
    let second = int.then_ignore(just('S'));

    // dur-time = "T" (dur-hour / dur-minute / dur-second)
    let time = just('T').ignore_then(choice((
        hour.then(minute.then(second.or_not()).or_not())
            .map(|(h, ms)| match ms {
                Some((m, s)) => (h, m, s.unwrap_or(0)),
                None => (h, 0, 0),
            }),
        minute.then(second.or_not()).map(|(m, s)| (0, m, s.unwrap_or(0))),
        second.map(|s| (0, 0, s)),
    )));

    let sign = select! { c @ ('+' | '-') => c }
        .or_not()
        .map(|sign| matches!(sign, Some('-')));
    let prefix = sign.then_ignore(just('P'));

    choice((
        // RFC 5545 keeps dur-week exclusive, but real producers (libical
        // included) combine weeks with day and time parts, and the model
        // represents such values, so the grammar accepts the union.
        prefix
            .then(week.then(day.or_not()).then(time.or_not()))
            .map(|(negative, ((weeks, days), time))| {
                let (hours, minutes, seconds) = time.unwrap_or((0, 0, 0));
                ValueDuration {
                    negative,
                    weeks,
                    days: days.unwrap_or(0),
                    hours,
                    minutes,
                    seconds,
                }
            }),
        prefix.then(day.then(time.or_not())).map(|(negative, (days, time))| {
            let (hours, minutes, seconds) = time.unwrap_or((0, 0, 0));
            ValueDuration { negative, weeks: 0, days, hours, minutes, seconds }
        }),
        prefix.then(time).map(|(negative, (hours, minutes, seconds))| ValueDuration {
            negative,
            weeks: 0,
            days: 0,
            hours,
            minutes,
            seconds,
        }),
    ))
}

/// COMMA-separated duration list.
pub fn values_duration<'src>() -> impl Parser<'src, &'src str, Vec<ValueDuration>, Extra<'src>> {
    value_duration()
        .separated_by(just(','))
        .at_least(1)
        .collect()
}

impl Display for ValueDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        f.write_str("P")?;

        // Zero durations have no natural designator; PT0S matches what
        // libical-era producers emit.
        if self.is_zero() {
            return f.write_str("T0S");
        }

        if self.weeks != 0 {
            write!(f, "{}W", self.weeks)?;
        }
        if self.days != 0 {
            write!(f, "{}D", self.days)?;
        }
        if self.hours != 0 || self.minutes != 0 || self.seconds != 0 {
            f.write_str("T")?;
            if self.hours != 0 {
                write!(f, "{}H", self.hours)?;
            }
            // The grammar reaches seconds only through minutes, so a zero
            // minutes field must still be written between hours and seconds.
            if self.minutes != 0 || (self.hours != 0 && self.seconds != 0) {
                write!(f, "{}M", self.minutes)?;
            }
            if self.seconds != 0 {
                write!(f, "{}S", self.seconds)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn dur(
        negative: bool,
        weeks: u32,
        days: u32,
        hours: u32,
        minutes: u32,
        seconds: u32,
    ) -> ValueDuration {
        ValueDuration { negative, weeks, days, hours, minutes, seconds }
    }

    #[test]
    fn parses_duration() {
        fn parse(src: &str) -> Result<ValueDuration, Vec<Rich<'_, char>>> {
            value_duration().parse(src).into_result()
        }

        #[rustfmt::skip]
        let success_cases = [
            // examples from RFC 5545 Section 3.3.6
            ("P15DT5H0M20S", dur(false, 0, 15, 5, 0, 20)),
            ("P7W",          dur(false, 7, 0, 0, 0, 0)),
            // extra tests
            ("+P3W",         dur(false, 3, 0, 0, 0, 0)),
            ("-P1W",         dur(true,  1, 0, 0, 0, 0)),
            ("-PT15M",       dur(true,  0, 0, 0, 15, 0)),
            ("PT30S",        dur(false, 0, 0, 0, 0, 30)),
            ("PT1H30M",      dur(false, 0, 0, 1, 30, 0)),
            ("P1D",          dur(false, 0, 1, 0, 0, 0)),
            ("PT0S",         dur(false, 0, 0, 0, 0, 0)),
            ("P0D",          dur(false, 0, 0, 0, 0, 0)),
            // fields are not normalized
            ("PT90M",        dur(false, 0, 0, 0, 90, 0)),
            // weeks combined with day/time parts (beyond strict RFC 5545)
            ("P1W2D",        dur(false, 1, 2, 0, 0, 0)),
            ("P2W3DT1H30M",  dur(false, 2, 3, 1, 30, 0)),
            ("-P1WT10S",     dur(true,  1, 0, 0, 0, 10)),
        ];
        for (src, expected) in success_cases {
            assert_eq!(parse(src).unwrap(), expected, "failed to parse: {src}");
        }

        let fail_cases = [
            "P",           // missing duration value
            "PT",          // missing time value
            "P3X",         // invalid designator
            "P-3W",        // sign in the wrong position
            "P3DT4H5M6",   // missing 'S' designator
            "3W",          // missing 'P' designator
            "P10H11M12S",  // missing 'T' designator
        ];
        for src in fail_cases {
            assert!(parse(src).is_err(), "should fail: {src}");
        }
    }

    #[test]
    fn formats_duration() {
        #[rustfmt::skip]
        let cases = [
            (dur(false, 0, 15, 5, 0, 20), "P15DT5H0M20S"),
            (dur(false, 7, 0, 0, 0, 0),   "P7W"),
            (dur(true,  0, 0, 0, 15, 0),  "-PT15M"),
            (dur(false, 0, 0, 0, 0, 0),   "PT0S"),
            (dur(true,  0, 0, 0, 0, 0),   "-PT0S"),
            (dur(false, 0, 1, 0, 30, 0),  "P1DT30M"),
            (dur(false, 1, 2, 0, 0, 0),   "P1W2D"),
            (dur(false, 2, 0, 4, 0, 0),   "P2WT4H"),
        ];
        for (duration, expected) in cases {
            assert_eq!(duration.to_string(), expected);
        }
    }

    #[test]
    fn week_and_day_durations_round_trip() {
        #[rustfmt::skip]
        let cases = [
            dur(false, 1, 2, 0, 0, 0),
            dur(false, 2, 3, 1, 30, 0),
            dur(true,  1, 0, 0, 0, 10),
        ];
        for duration in cases {
            let formatted = duration.to_string();
            let parsed = value_duration().parse(formatted.as_str()).into_result().unwrap();
            assert_eq!(parsed, duration, "failed to round-trip: {formatted}");
        }
    }

    #[test]
    fn zero_duration_round_trips() {
        let zero = ValueDuration::default();
        let formatted = zero.to_string();
        assert_eq!(formatted, "PT0S");
        let parsed = value_duration().parse(formatted.as_str()).into_result().unwrap();
        assert_eq!(parsed, zero);
    }
}
