// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Recurrence Rule value type (RFC 5545 Section 3.3.10).
//!
//! BY\* lists are kept exactly as written: order, duplicates, and
//! out-of-range entries all survive a parse/format cycle. The only
//! structural checks are the ones the grammar itself demands: FREQ is
//! required, no rule part may repeat, and COUNT and UNTIL cannot both be
//! present (the [`RecurrenceLimit`] enum makes the last one unrepresentable).

use std::fmt::{self, Display};

use chumsky::prelude::*;

use crate::keyword::{
    KW_BYDAY, KW_BYHOUR, KW_BYMINUTE, KW_BYMONTH, KW_BYMONTHDAY, KW_BYSECOND, KW_BYSETPOS,
    KW_BYWEEKNO, KW_BYYEARDAY, KW_COUNT, KW_FREQ, KW_INTERVAL, KW_UNTIL, KW_WKST,
};
use crate::value::Extra;
use crate::value::datetime::{ValueDateTime, value_date_only, value_date_time};

/// Recurrence frequency (the FREQ rule part).
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(ascii_case_insensitive, serialize_all = "UPPERCASE")]
pub enum RecurrenceFrequency {
    /// Every second
    Secondly,
    /// Every minute
    Minutely,
    /// Every hour
    Hourly,
    /// Every day
    Daily,
    /// Every week
    Weekly,
    /// Every month
    Monthly,
    /// Every year
    Yearly,
}

/// Day of week, formatted as the RFC 5545 two-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(ascii_case_insensitive)]
pub enum WeekDay {
    /// Sunday
    #[strum(serialize = "SU")]
    Sunday,
    /// Monday
    #[strum(serialize = "MO")]
    Monday,
    /// Tuesday
    #[strum(serialize = "TU")]
    Tuesday,
    /// Wednesday
    #[strum(serialize = "WE")]
    Wednesday,
    /// Thursday
    #[strum(serialize = "TH")]
    Thursday,
    /// Friday
    #[strum(serialize = "FR")]
    Friday,
    /// Saturday
    #[strum(serialize = "SA")]
    Saturday,
}

/// A BYDAY entry: a weekday with an optional ordinal (e.g., `1MO`, `-1FR`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekDayNum {
    /// Which occurrence within the interval, negative counts from the end
    pub occurrence: Option<i8>,
    /// Day of week
    pub day: WeekDay,
}

impl Display for WeekDayNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(occurrence) = self.occurrence {
            write!(f, "{occurrence}")?;
        }
        self.day.fmt(f)
    }
}

/// How a recurrence is bounded: COUNT and UNTIL are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecurrenceLimit {
    /// Number of occurrences
    Count(u32),
    /// Last instant of the recurrence (inclusive)
    Until(ValueDateTime),
}

/// A recurrence rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueRecurrenceRule {
    /// Recurrence frequency (required)
    pub frequency: RecurrenceFrequency,
    /// COUNT or UNTIL bound, unbounded when absent
    pub limit: Option<RecurrenceLimit>,
    /// Interval between occurrences, defaults to 1 when absent
    pub interval: Option<u32>,
    /// BYSECOND list
    pub by_second: Vec<u8>,
    /// BYMINUTE list
    pub by_minute: Vec<u8>,
    /// BYHOUR list
    pub by_hour: Vec<u8>,
    /// BYDAY list
    pub by_day: Vec<WeekDayNum>,
    /// BYMONTHDAY list
    pub by_month_day: Vec<i8>,
    /// BYYEARDAY list
    pub by_year_day: Vec<i16>,
    /// BYWEEKNO list
    pub by_week_no: Vec<i8>,
    /// BYMONTH list
    pub by_month: Vec<u8>,
    /// BYSETPOS list
    pub by_set_pos: Vec<i16>,
    /// WKST week start
    pub week_start: Option<WeekDay>,
}

impl ValueRecurrenceRule {
    /// A rule with the given frequency and nothing else.
    #[must_use]
    pub const fn new(frequency: RecurrenceFrequency) -> Self {
        Self {
            frequency,
            limit: None,
            interval: None,
            by_second: Vec::new(),
            by_minute: Vec::new(),
            by_hour: Vec::new(),
            by_day: Vec::new(),
            by_month_day: Vec::new(),
            by_year_day: Vec::new(),
            by_week_no: Vec::new(),
            by_month: Vec::new(),
            by_set_pos: Vec::new(),
            week_start: None,
        }
    }
}

/// One rule part, before assembly into a rule.
enum RulePart {
    Freq(RecurrenceFrequency),
    Until(ValueDateTime),
    Count(u32),
    Interval(u32),
    BySecond(Vec<u8>),
    ByMinute(Vec<u8>),
    ByHour(Vec<u8>),
    ByDay(Vec<WeekDayNum>),
    ByMonthDay(Vec<i8>),
    ByYearDay(Vec<i16>),
    ByWeekNo(Vec<i8>),
    ByMonth(Vec<u8>),
    BySetPos(Vec<i16>),
    WkSt(WeekDay),
}

/// Format Definition:
///
/// ```txt
/// recur           = recur-rule-part *( ";" recur-rule-part )
/// recur-rule-part = ( "FREQ" "=" freq ) / ( "UNTIL" "=" enddate )
///                 / ( "COUNT" "=" 1*DIGIT ) / ( "INTERVAL" "=" 1*DIGIT )
///                 / ( "BYSECOND" "=" byseclist ) / ( "BYMINUTE" "=" byminlist )
///                 / ( "BYHOUR" "=" byhrlist ) / ( "BYDAY" "=" bywdaylist )
///                 / ( "BYMONTHDAY" "=" bymodaylist ) / ( "BYYEARDAY" "=" byyrdaylist )
///                 / ( "BYWEEKNO" "=" bywknolist ) / ( "BYMONTH" "=" bymolist )
///                 / ( "BYSETPOS" "=" bysplist ) / ( "WKST" "=" weekday )
/// ```
pub fn value_recurrence_rule<'src>()
-> impl Parser<'src, &'src str, ValueRecurrenceRule, Extra<'src>> {
    rule_part()
        .separated_by(just(';'))
        .at_least(1)
        .collect::<Vec<_>>()
        .try_map(|parts, span| build_rule(parts).map_err(|msg| Rich::custom(span, msg)))
}

fn rule_part<'src>() -> impl Parser<'src, &'src str, RulePart, Extra<'src>> {
    let digit = select! { c @ '0'..='9' => c };
    let sign = select! { c @ ('+' | '-') => c };

    let int = digit
        .repeated()
        .at_least(1)
        .at_most(10)
        .collect::<String>()
        .try_map(|s: String, span| {
            lexical::parse::<u32, _>(s.as_bytes()).map_err(|_| Rich::custom(span, "number out of range"))
        });

    let small = digit
        .repeated()
        .at_least(1)
        .at_most(2)
        .collect::<String>()
        .try_map(|s: String, span| {
            lexical::parse::<u8, _>(s.as_bytes()).map_err(|_| Rich::custom(span, "number out of range"))
        });

    let signed_small = sign
        .or_not()
        .then(digit.repeated().at_least(1).at_most(2).collect::<String>())
        .try_map(|(sign, s): (Option<char>, String), span| {
            let mut buf = String::with_capacity(3);
            buf.extend(sign);
            buf.push_str(&s);
            lexical::parse::<i8, _>(buf.as_bytes()).map_err(|_| Rich::custom(span, "number out of range"))
        });

    let signed_mid = sign
        .or_not()
        .then(digit.repeated().at_least(1).at_most(3).collect::<String>())
        .try_map(|(sign, s): (Option<char>, String), span| {
            let mut buf = String::with_capacity(4);
            buf.extend(sign);
            buf.push_str(&s);
            lexical::parse::<i16, _>(buf.as_bytes()).map_err(|_| Rich::custom(span, "number out of range"))
        });

    let letters = select! { c @ ('A'..='Z' | 'a'..='z') => c };

    let freq = letters
        .repeated()
        .at_least(1)
        .at_most(8)
        .collect::<String>()
        .try_map(|s: String, span| {
            s.parse::<RecurrenceFrequency>()
                .map_err(|_| Rich::custom(span, "invalid frequency"))
        });

    let weekday = letters
        .repeated()
        .exactly(2)
        .collect::<String>()
        .try_map(|s: String, span| {
            s.parse::<WeekDay>().map_err(|_| Rich::custom(span, "invalid weekday"))
        });

    let weekday_num = signed_small
        .or_not()
        .then(weekday)
        .map(|(occurrence, day)| WeekDayNum { occurrence, day });

    // UNTIL takes either a date-time or a bare date.
    let until = choice((value_date_time(), value_date_only()));

    macro_rules! list {
        ($item:expr) => {
            $item.separated_by(just(',')).at_least(1).collect::<Vec<_>>()
        };
    }

    macro_rules! part {
        ($name:expr, $value:expr, $variant:expr) => {
            just($name).ignore_then(just('=')).ignore_then($value).map($variant)
        };
    }

    choice((
        part!(KW_FREQ, freq, RulePart::Freq),
        part!(KW_UNTIL, until, RulePart::Until),
        part!(KW_COUNT, int, RulePart::Count),
        part!(KW_INTERVAL, int, RulePart::Interval),
        part!(KW_BYSECOND, list!(small), RulePart::BySecond),
        part!(KW_BYMINUTE, list!(small), RulePart::ByMinute),
        part!(KW_BYHOUR, list!(small), RulePart::ByHour),
        part!(KW_BYDAY, list!(weekday_num), RulePart::ByDay),
        part!(KW_BYMONTHDAY, list!(signed_small), RulePart::ByMonthDay),
        part!(KW_BYYEARDAY, list!(signed_mid), RulePart::ByYearDay),
        part!(KW_BYWEEKNO, list!(signed_small), RulePart::ByWeekNo),
        part!(KW_BYMONTH, list!(small), RulePart::ByMonth),
        part!(KW_BYSETPOS, list!(signed_mid), RulePart::BySetPos),
        part!(KW_WKST, weekday, RulePart::WkSt),
    ))
}

fn build_rule(parts: Vec<RulePart>) -> Result<ValueRecurrenceRule, &'static str> {
    let mut frequency = None;
    let mut limit = None;
    let mut interval = None;
    let mut by_second = None;
    let mut by_minute = None;
    let mut by_hour = None;
    let mut by_day = None;
    let mut by_month_day = None;
    let mut by_year_day = None;
    let mut by_week_no = None;
    let mut by_month = None;
    let mut by_set_pos = None;
    let mut week_start = None;

    for part in parts {
        match part {
            RulePart::Freq(v) => {
                if frequency.replace(v).is_some() {
                    return Err("FREQ must not occur more than once");
                }
            }
            RulePart::Until(v) => match limit.replace(RecurrenceLimit::Until(v)) {
                Some(RecurrenceLimit::Until(_)) => return Err("UNTIL must not occur more than once"),
                Some(RecurrenceLimit::Count(_)) => return Err("COUNT and UNTIL are mutually exclusive"),
                None => {}
            },
            RulePart::Count(v) => match limit.replace(RecurrenceLimit::Count(v)) {
                Some(RecurrenceLimit::Count(_)) => return Err("COUNT must not occur more than once"),
                Some(RecurrenceLimit::Until(_)) => return Err("COUNT and UNTIL are mutually exclusive"),
                None => {}
            },
            RulePart::Interval(v) => {
                if interval.replace(v).is_some() {
                    return Err("INTERVAL must not occur more than once");
                }
            }
            RulePart::BySecond(v) => {
                if by_second.replace(v).is_some() {
                    return Err("BYSECOND must not occur more than once");
                }
            }
            RulePart::ByMinute(v) => {
                if by_minute.replace(v).is_some() {
                    return Err("BYMINUTE must not occur more than once");
                }
            }
            RulePart::ByHour(v) => {
                if by_hour.replace(v).is_some() {
                    return Err("BYHOUR must not occur more than once");
                }
            }
            RulePart::ByDay(v) => {
                if by_day.replace(v).is_some() {
                    return Err("BYDAY must not occur more than once");
                }
            }
            RulePart::ByMonthDay(v) => {
                if by_month_day.replace(v).is_some() {
                    return Err("BYMONTHDAY must not occur more than once");
                }
            }
            RulePart::ByYearDay(v) => {
                if by_year_day.replace(v).is_some() {
                    return Err("BYYEARDAY must not occur more than once");
                }
            }
            RulePart::ByWeekNo(v) => {
                if by_week_no.replace(v).is_some() {
                    return Err("BYWEEKNO must not occur more than once");
                }
            }
            RulePart::ByMonth(v) => {
                if by_month.replace(v).is_some() {
                    return Err("BYMONTH must not occur more than once");
                }
            }
            RulePart::BySetPos(v) => {
                if by_set_pos.replace(v).is_some() {
                    return Err("BYSETPOS must not occur more than once");
                }
            }
            RulePart::WkSt(v) => {
                if week_start.replace(v).is_some() {
                    return Err("WKST must not occur more than once");
                }
            }
        }
    }

    let Some(frequency) = frequency else {
        return Err("FREQ is required");
    };

    Ok(ValueRecurrenceRule {
        frequency,
        limit,
        interval,
        by_second: by_second.unwrap_or_default(),
        by_minute: by_minute.unwrap_or_default(),
        by_hour: by_hour.unwrap_or_default(),
        by_day: by_day.unwrap_or_default(),
        by_month_day: by_month_day.unwrap_or_default(),
        by_year_day: by_year_day.unwrap_or_default(),
        by_week_no: by_week_no.unwrap_or_default(),
        by_month: by_month.unwrap_or_default(),
        by_set_pos: by_set_pos.unwrap_or_default(),
        week_start,
    })
}

impl Display for ValueRecurrenceRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{KW_FREQ}={}", self.frequency)?;
        match &self.limit {
            Some(RecurrenceLimit::Until(until)) => write!(f, ";{KW_UNTIL}={until}")?,
            Some(RecurrenceLimit::Count(count)) => write!(f, ";{KW_COUNT}={count}")?,
            None => {}
        }
        if let Some(interval) = self.interval {
            write!(f, ";{KW_INTERVAL}={interval}")?;
        }
        write_list(f, KW_BYSECOND, &self.by_second)?;
        write_list(f, KW_BYMINUTE, &self.by_minute)?;
        write_list(f, KW_BYHOUR, &self.by_hour)?;
        write_list(f, KW_BYDAY, &self.by_day)?;
        write_list(f, KW_BYMONTHDAY, &self.by_month_day)?;
        write_list(f, KW_BYYEARDAY, &self.by_year_day)?;
        write_list(f, KW_BYWEEKNO, &self.by_week_no)?;
        write_list(f, KW_BYMONTH, &self.by_month)?;
        write_list(f, KW_BYSETPOS, &self.by_set_pos)?;
        if let Some(week_start) = self.week_start {
            write!(f, ";{KW_WKST}={week_start}")?;
        }
        Ok(())
    }
}

fn write_list<T: Display>(f: &mut fmt::Formatter<'_>, name: &str, values: &[T]) -> fmt::Result {
    if values.is_empty() {
        return Ok(());
    }
    write!(f, ";{name}=")?;
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{value}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Result<ValueRecurrenceRule, Vec<Rich<'_, char>>> {
        value_recurrence_rule().parse(src).into_result()
    }

    #[test]
    fn parses_rfc_examples() {
        // RFC 5545 Section 3.8.5.3
        let rule = parse("FREQ=DAILY;COUNT=10").unwrap();
        assert_eq!(rule.frequency, RecurrenceFrequency::Daily);
        assert_eq!(rule.limit, Some(RecurrenceLimit::Count(10)));

        let rule = parse("FREQ=YEARLY;UNTIL=20000131T140000Z;BYMONTH=1;BYDAY=SU,MO,TU,WE,TH,FR,SA")
            .unwrap();
        assert_eq!(rule.frequency, RecurrenceFrequency::Yearly);
        assert!(matches!(rule.limit, Some(RecurrenceLimit::Until(_))));
        assert_eq!(rule.by_month, vec![1]);
        assert_eq!(rule.by_day.len(), 7);

        let rule = parse("FREQ=MONTHLY;INTERVAL=2;BYDAY=1SU,-1SU").unwrap();
        assert_eq!(rule.interval, Some(2));
        assert_eq!(
            rule.by_day,
            vec![
                WeekDayNum { occurrence: Some(1), day: WeekDay::Sunday },
                WeekDayNum { occurrence: Some(-1), day: WeekDay::Sunday },
            ]
        );

        // UNTIL as a bare date
        let rule = parse("FREQ=WEEKLY;UNTIL=19971224").unwrap();
        match rule.limit {
            Some(RecurrenceLimit::Until(until)) => assert!(until.is_date_only()),
            other => panic!("expected UNTIL, got {other:?}"),
        }
    }

    #[test]
    fn keeps_lists_as_written() {
        // duplicates and out-of-range entries survive
        let rule = parse("FREQ=MINUTELY;BYSECOND=5,5,61,0").unwrap();
        assert_eq!(rule.by_second, vec![5, 5, 61, 0]);

        let rule = parse("FREQ=MONTHLY;BYMONTHDAY=-3,1,31").unwrap();
        assert_eq!(rule.by_month_day, vec![-3, 1, 31]);

        let rule = parse("FREQ=YEARLY;BYYEARDAY=-1,100,366").unwrap();
        assert_eq!(rule.by_year_day, vec![-1, 100, 366]);
    }

    #[test]
    fn rejects_malformed_rules() {
        #[rustfmt::skip]
        let fail_cases = [
            "",                                    // empty
            "COUNT=10",                            // FREQ is required
            "FREQ=SOMETIMES",                      // unknown frequency
            "FREQ=DAILY;FREQ=WEEKLY",              // duplicate part
            "FREQ=DAILY;COUNT=1;COUNT=2",          // duplicate part
            "FREQ=DAILY;COUNT=10;UNTIL=20000131",  // COUNT and UNTIL together
            "FREQ=DAILY;UNTIL=20000131;COUNT=10",  // other order
            "FREQ=DAILY;BYDAY=XX",                 // bad weekday
            "FREQ=DAILY;COUNT=",                   // missing number
            "FREQ=DAILY;;COUNT=10",                // empty part
        ];
        for src in fail_cases {
            assert!(parse(src).is_err(), "should fail: {src}");
        }
    }

    #[test]
    fn formats_in_canonical_part_order() {
        let rule = parse("FREQ=MONTHLY;BYDAY=1SU,-1SU;INTERVAL=2").unwrap();
        assert_eq!(rule.to_string(), "FREQ=MONTHLY;INTERVAL=2;BYDAY=1SU,-1SU");
    }

    #[test]
    fn round_trips_through_text() {
        let cases = [
            "FREQ=DAILY;COUNT=10",
            "FREQ=YEARLY;UNTIL=20000131T140000Z;BYMONTH=1,2,3",
            "FREQ=MINUTELY;INTERVAL=15;BYSECOND=0,30",
            "FREQ=WEEKLY;BYDAY=MO,WE,FR;WKST=SU",
        ];
        for src in cases {
            let rule = parse(src).unwrap();
            assert_eq!(rule.to_string(), src, "canonical form should match: {src}");
        }
    }
}
