// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Properties (RFC 5545 Sections 3.7 and 3.8): names, their default
//! value types, and the property struct itself.

use std::fmt::{self, Display};

use crate::keyword::{
    KW_ACTION, KW_ATTACH, KW_ATTENDEE, KW_CALSCALE, KW_CATEGORIES, KW_CLASS, KW_COMMENT,
    KW_COMPLETED, KW_CONTACT, KW_CREATED, KW_DESCRIPTION, KW_DTEND, KW_DTSTAMP, KW_DTSTART,
    KW_DUE, KW_DURATION, KW_EXDATE, KW_EXRULE, KW_FREEBUSY, KW_GEO, KW_LAST_MODIFIED,
    KW_LOCATION, KW_METHOD, KW_ORGANIZER, KW_PERCENT_COMPLETE, KW_PRIORITY, KW_PRODID, KW_RDATE,
    KW_RECURRENCE_ID, KW_RELATED_TO, KW_REPEAT, KW_REQUEST_STATUS, KW_RESOURCES, KW_RRULE,
    KW_SEQUENCE, KW_STATUS, KW_SUMMARY, KW_TRANSP, KW_TRIGGER, KW_TZID, KW_TZNAME,
    KW_TZOFFSETFROM, KW_TZOFFSETTO, KW_TZURL, KW_UID, KW_URL, KW_VERSION,
};
use crate::parameter::{Parameter, ParameterKind};
use crate::value::{Value, ValueKind};

/// A property name: the RFC 5545 set plus `EXRULE` (RFC 2445) and
/// extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyKind {
    /// ACTION
    Action,
    /// ATTACH
    Attach,
    /// ATTENDEE
    Attendee,
    /// CALSCALE
    CalScale,
    /// CATEGORIES
    Categories,
    /// CLASS
    Class,
    /// COMMENT
    Comment,
    /// COMPLETED
    Completed,
    /// CONTACT
    Contact,
    /// CREATED
    Created,
    /// DESCRIPTION
    Description,
    /// DTEND
    DtEnd,
    /// DTSTAMP
    DtStamp,
    /// DTSTART
    DtStart,
    /// DUE
    Due,
    /// DURATION
    Duration,
    /// EXDATE
    ExDate,
    /// EXRULE (RFC 2445, still produced by older implementations)
    ExRule,
    /// FREEBUSY
    FreeBusy,
    /// GEO
    Geo,
    /// LAST-MODIFIED
    LastModified,
    /// LOCATION
    Location,
    /// METHOD
    Method,
    /// ORGANIZER
    Organizer,
    /// PERCENT-COMPLETE
    PercentComplete,
    /// PRIORITY
    Priority,
    /// PRODID
    ProdId,
    /// RDATE
    RDate,
    /// RECURRENCE-ID
    RecurrenceId,
    /// RELATED-TO
    RelatedTo,
    /// REPEAT
    Repeat,
    /// REQUEST-STATUS
    RequestStatus,
    /// RESOURCES
    Resources,
    /// RRULE
    RRule,
    /// SEQUENCE
    Sequence,
    /// STATUS
    Status,
    /// SUMMARY
    Summary,
    /// TRANSP
    Transp,
    /// TRIGGER
    Trigger,
    /// TZID (the property inside VTIMEZONE, not the parameter)
    TzId,
    /// TZNAME
    TzName,
    /// TZOFFSETFROM
    TzOffsetFrom,
    /// TZOFFSETTO
    TzOffsetTo,
    /// TZURL
    TzUrl,
    /// UID
    Uid,
    /// URL
    Url,
    /// VERSION
    Version,
    /// An experimental property ("X-" prefix), name stored uppercased
    XName(String),
    /// An unrecognized property assumed IANA-registered, name stored
    /// uppercased
    Iana(String),
}

impl PropertyKind {
    /// Look up a property name, case-insensitively. Unrecognized names
    /// become [`PropertyKind::XName`] or [`PropertyKind::Iana`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let upper = name.to_ascii_uppercase();
        match upper.as_str() {
            KW_ACTION => Self::Action,
            KW_ATTACH => Self::Attach,
            KW_ATTENDEE => Self::Attendee,
            KW_CALSCALE => Self::CalScale,
            KW_CATEGORIES => Self::Categories,
            KW_CLASS => Self::Class,
            KW_COMMENT => Self::Comment,
            KW_COMPLETED => Self::Completed,
            KW_CONTACT => Self::Contact,
            KW_CREATED => Self::Created,
            KW_DESCRIPTION => Self::Description,
            KW_DTEND => Self::DtEnd,
            KW_DTSTAMP => Self::DtStamp,
            KW_DTSTART => Self::DtStart,
            KW_DUE => Self::Due,
            KW_DURATION => Self::Duration,
            KW_EXDATE => Self::ExDate,
            KW_EXRULE => Self::ExRule,
            KW_FREEBUSY => Self::FreeBusy,
            KW_GEO => Self::Geo,
            KW_LAST_MODIFIED => Self::LastModified,
            KW_LOCATION => Self::Location,
            KW_METHOD => Self::Method,
            KW_ORGANIZER => Self::Organizer,
            KW_PERCENT_COMPLETE => Self::PercentComplete,
            KW_PRIORITY => Self::Priority,
            KW_PRODID => Self::ProdId,
            KW_RDATE => Self::RDate,
            KW_RECURRENCE_ID => Self::RecurrenceId,
            KW_RELATED_TO => Self::RelatedTo,
            KW_REPEAT => Self::Repeat,
            KW_REQUEST_STATUS => Self::RequestStatus,
            KW_RESOURCES => Self::Resources,
            KW_RRULE => Self::RRule,
            KW_SEQUENCE => Self::Sequence,
            KW_STATUS => Self::Status,
            KW_SUMMARY => Self::Summary,
            KW_TRANSP => Self::Transp,
            KW_TRIGGER => Self::Trigger,
            KW_TZID => Self::TzId,
            KW_TZNAME => Self::TzName,
            KW_TZOFFSETFROM => Self::TzOffsetFrom,
            KW_TZOFFSETTO => Self::TzOffsetTo,
            KW_TZURL => Self::TzUrl,
            KW_UID => Self::Uid,
            KW_URL => Self::Url,
            KW_VERSION => Self::Version,
            _ if upper.starts_with("X-") => Self::XName(upper),
            _ => Self::Iana(upper),
        }
    }

    /// The canonical (uppercase) property name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Action => KW_ACTION,
            Self::Attach => KW_ATTACH,
            Self::Attendee => KW_ATTENDEE,
            Self::CalScale => KW_CALSCALE,
            Self::Categories => KW_CATEGORIES,
            Self::Class => KW_CLASS,
            Self::Comment => KW_COMMENT,
            Self::Completed => KW_COMPLETED,
            Self::Contact => KW_CONTACT,
            Self::Created => KW_CREATED,
            Self::Description => KW_DESCRIPTION,
            Self::DtEnd => KW_DTEND,
            Self::DtStamp => KW_DTSTAMP,
            Self::DtStart => KW_DTSTART,
            Self::Due => KW_DUE,
            Self::Duration => KW_DURATION,
            Self::ExDate => KW_EXDATE,
            Self::ExRule => KW_EXRULE,
            Self::FreeBusy => KW_FREEBUSY,
            Self::Geo => KW_GEO,
            Self::LastModified => KW_LAST_MODIFIED,
            Self::Location => KW_LOCATION,
            Self::Method => KW_METHOD,
            Self::Organizer => KW_ORGANIZER,
            Self::PercentComplete => KW_PERCENT_COMPLETE,
            Self::Priority => KW_PRIORITY,
            Self::ProdId => KW_PRODID,
            Self::RDate => KW_RDATE,
            Self::RecurrenceId => KW_RECURRENCE_ID,
            Self::RelatedTo => KW_RELATED_TO,
            Self::Repeat => KW_REPEAT,
            Self::RequestStatus => KW_REQUEST_STATUS,
            Self::Resources => KW_RESOURCES,
            Self::RRule => KW_RRULE,
            Self::Sequence => KW_SEQUENCE,
            Self::Status => KW_STATUS,
            Self::Summary => KW_SUMMARY,
            Self::Transp => KW_TRANSP,
            Self::Trigger => KW_TRIGGER,
            Self::TzId => KW_TZID,
            Self::TzName => KW_TZNAME,
            Self::TzOffsetFrom => KW_TZOFFSETFROM,
            Self::TzOffsetTo => KW_TZOFFSETTO,
            Self::TzUrl => KW_TZURL,
            Self::Uid => KW_UID,
            Self::Url => KW_URL,
            Self::Version => KW_VERSION,
            Self::XName(name) | Self::Iana(name) => name,
        }
    }

    /// The value type this property holds when no `VALUE` parameter says
    /// otherwise (the "Value Type" line of each RFC 5545 Section 3.8
    /// definition).
    #[must_use]
    pub fn default_value_kind(&self) -> ValueKind {
        match self {
            Self::Action
            | Self::CalScale
            | Self::Categories
            | Self::Class
            | Self::Comment
            | Self::Contact
            | Self::Description
            | Self::Location
            | Self::Method
            | Self::ProdId
            | Self::RelatedTo
            | Self::RequestStatus
            | Self::Resources
            | Self::Status
            | Self::Summary
            | Self::Transp
            | Self::TzId
            | Self::TzName
            | Self::Uid
            | Self::Version => ValueKind::Text,
            Self::Completed
            | Self::Created
            | Self::DtEnd
            | Self::DtStamp
            | Self::DtStart
            | Self::Due
            | Self::ExDate
            | Self::LastModified
            | Self::RDate
            | Self::RecurrenceId => ValueKind::DateTime,
            // TRIGGER defaults to a duration relative to the start
            Self::Duration | Self::Trigger => ValueKind::Duration,
            Self::FreeBusy => ValueKind::Period,
            Self::ExRule | Self::RRule => ValueKind::Recur,
            Self::PercentComplete | Self::Priority | Self::Repeat | Self::Sequence => {
                ValueKind::Integer
            }
            Self::Geo => ValueKind::Float,
            Self::Attach | Self::TzUrl | Self::Url => ValueKind::Uri,
            Self::Attendee | Self::Organizer => ValueKind::CalAddress,
            Self::TzOffsetFrom | Self::TzOffsetTo => ValueKind::UtcOffset,
            Self::XName(_) | Self::Iana(_) => ValueKind::Unknown,
        }
    }
}

impl Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A property: a name, a typed value, and its parameters.
///
/// The `VALUE`, `TZID`, and `ENCODING` parameters are consumed into the
/// [`Value`] at parse time and re-derived on output; `parameters` holds
/// everything else, in source order.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// Property name
    pub kind: PropertyKind,
    /// The typed value
    pub value: Value,
    /// Parameters other than the value-shaping three, in source order
    pub parameters: Vec<Parameter>,
}

impl Property {
    /// A property with no parameters.
    #[must_use]
    pub const fn new(kind: PropertyKind, value: Value) -> Self {
        Self { kind, value, parameters: Vec::new() }
    }

    /// The first parameter with the given kind.
    #[must_use]
    pub fn parameter(&self, kind: &ParameterKind) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.kind == *kind)
    }

    /// Append a parameter, builder style.
    #[must_use]
    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }
}
