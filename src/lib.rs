// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Parse, represent, and serialize iCalendar (RFC 5545) component trees.

#![warn(
    trivial_casts,
    trivial_numeric_casts,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications,
    clippy::dbg_macro,
    clippy::indexing_slicing,
    clippy::pedantic
)]
// Allow certain clippy lints that are too restrictive for this crate
#![allow(
    clippy::option_option,
    clippy::similar_names,
    clippy::single_match_else,
    clippy::match_bool
)]

pub mod component;
pub mod formatter;
pub mod keyword;
pub mod parameter;
mod parser;
pub mod property;
pub mod span;
pub mod syntax;
pub mod value;

pub use crate::component::{Component, ComponentKind, ValidationWarning};
pub use crate::formatter::{FoldingStyle, FormatOptions, Formatter, format};
pub use crate::parameter::{Parameter, ParameterKind};
pub use crate::parser::{ParseError, ValueFormatError, parse, parse_all};
pub use crate::property::{Property, PropertyKind};
pub use crate::span::{Segments, Span};
pub use crate::syntax::StructureError;
pub use crate::value::{
    Encoding, PeriodEnd, RecurrenceFrequency, RecurrenceLimit, Value, ValueBinary, ValueDate,
    ValueDateTime, ValueDuration, ValueKind, ValuePeriod, ValueRecurrenceRule, ValueTime,
    ValueUtcOffset, WeekDay, WeekDayNum,
};
