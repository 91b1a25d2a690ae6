// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Period of Time value type (RFC 5545 Section 3.3.9).

use std::fmt::{self, Display};

use chumsky::prelude::*;

use crate::value::Extra;
use crate::value::datetime::{ValueDateTime, value_date_time};
use crate::value::duration::{ValueDuration, value_duration};

/// How a period ends: either an explicit end date-time or a duration
/// measured from the start. Exactly one of the two, by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodEnd {
    /// Explicit end of the period
    Explicit(ValueDateTime),
    /// Duration measured from the start
    Duration(ValueDuration),
}

/// A period of time: a start and how it ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValuePeriod {
    /// Start of the period
    pub start: ValueDateTime,
    /// End of the period
    pub end: PeriodEnd,
}

/// Format Definition:
///
/// ```txt
/// period          = period-explicit / period-start
/// period-explicit = date-time "/" date-time
/// period-start    = date-time "/" dur-value
/// ```
pub fn value_period<'src>() -> impl Parser<'src, &'src str, ValuePeriod, Extra<'src>> {
    value_date_time()
        .then_ignore(just('/'))
        .then(choice((
            value_duration().map(PeriodEnd::Duration),
            value_date_time().map(PeriodEnd::Explicit),
        )))
        .map(|(start, end)| ValuePeriod { start, end })
}

/// COMMA-separated period list (e.g., FREEBUSY).
pub fn values_period<'src>() -> impl Parser<'src, &'src str, Vec<ValuePeriod>, Extra<'src>> {
    value_period().separated_by(just(',')).at_least(1).collect()
}

impl Display for ValuePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/", self.start)?;
        match &self.end {
            PeriodEnd::Explicit(end) => end.fmt(f),
            PeriodEnd::Duration(duration) => duration.fmt(f),
        }
    }
}
