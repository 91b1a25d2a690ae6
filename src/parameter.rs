// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Property parameters (RFC 5545 Section 3.2).
//!
//! Parameters are kept as names and raw string values; only the three
//! parameters that change how a value is read (`VALUE`, `TZID`,
//! `ENCODING`) get interpreted, and that happens in the parser. The rest
//! travel through untouched.

use std::fmt::{self, Display};

use crate::keyword::{
    KW_ALTREP, KW_CN, KW_CUTYPE, KW_DELEGATED_FROM, KW_DELEGATED_TO, KW_DIR, KW_ENCODING,
    KW_FBTYPE, KW_FMTTYPE, KW_LANGUAGE, KW_MEMBER, KW_PARTSTAT, KW_RANGE, KW_RELATED, KW_RELTYPE,
    KW_ROLE, KW_RSVP, KW_SENT_BY, KW_TZID, KW_VALUE,
};

/// A parameter name: the RFC 5545 Section 3.2 set, plus experimental and
/// IANA extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterKind {
    /// ALTREP - alternate text representation
    AltRep,
    /// CN - common name
    CommonName,
    /// CUTYPE - calendar user type
    CalendarUserType,
    /// DELEGATED-FROM
    DelegatedFrom,
    /// DELEGATED-TO
    DelegatedTo,
    /// DIR - directory entry reference
    Dir,
    /// ENCODING - inline encoding
    Encoding,
    /// FBTYPE - free/busy time type
    FreeBusyType,
    /// FMTTYPE - format type (MIME media type)
    FormatType,
    /// LANGUAGE
    Language,
    /// MEMBER - group or list membership
    Member,
    /// PARTSTAT - participation status
    ParticipationStatus,
    /// RANGE - recurrence identifier range
    Range,
    /// RELATED - alarm trigger relationship
    Related,
    /// RELTYPE - relationship type
    RelationshipType,
    /// ROLE - participation role
    Role,
    /// RSVP - RSVP expectation
    Rsvp,
    /// SENT-BY
    SentBy,
    /// TZID - time zone identifier
    TzId,
    /// VALUE - value data type
    Value,
    /// An experimental parameter ("X-" prefix), name stored uppercased
    XName(String),
    /// An unrecognized parameter assumed IANA-registered, name stored
    /// uppercased
    Iana(String),
}

impl ParameterKind {
    /// Look up a parameter name, case-insensitively. Unrecognized names
    /// become [`ParameterKind::XName`] or [`ParameterKind::Iana`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        let upper = name.to_ascii_uppercase();
        match upper.as_str() {
            KW_ALTREP => Self::AltRep,
            KW_CN => Self::CommonName,
            KW_CUTYPE => Self::CalendarUserType,
            KW_DELEGATED_FROM => Self::DelegatedFrom,
            KW_DELEGATED_TO => Self::DelegatedTo,
            KW_DIR => Self::Dir,
            KW_ENCODING => Self::Encoding,
            KW_FBTYPE => Self::FreeBusyType,
            KW_FMTTYPE => Self::FormatType,
            KW_LANGUAGE => Self::Language,
            KW_MEMBER => Self::Member,
            KW_PARTSTAT => Self::ParticipationStatus,
            KW_RANGE => Self::Range,
            KW_RELATED => Self::Related,
            KW_RELTYPE => Self::RelationshipType,
            KW_ROLE => Self::Role,
            KW_RSVP => Self::Rsvp,
            KW_SENT_BY => Self::SentBy,
            KW_TZID => Self::TzId,
            KW_VALUE => Self::Value,
            _ if upper.starts_with("X-") => Self::XName(upper),
            _ => Self::Iana(upper),
        }
    }

    /// The canonical (uppercase) parameter name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::AltRep => KW_ALTREP,
            Self::CommonName => KW_CN,
            Self::CalendarUserType => KW_CUTYPE,
            Self::DelegatedFrom => KW_DELEGATED_FROM,
            Self::DelegatedTo => KW_DELEGATED_TO,
            Self::Dir => KW_DIR,
            Self::Encoding => KW_ENCODING,
            Self::FreeBusyType => KW_FBTYPE,
            Self::FormatType => KW_FMTTYPE,
            Self::Language => KW_LANGUAGE,
            Self::Member => KW_MEMBER,
            Self::ParticipationStatus => KW_PARTSTAT,
            Self::Range => KW_RANGE,
            Self::Related => KW_RELATED,
            Self::RelationshipType => KW_RELTYPE,
            Self::Role => KW_ROLE,
            Self::Rsvp => KW_RSVP,
            Self::SentBy => KW_SENT_BY,
            Self::TzId => KW_TZID,
            Self::Value => KW_VALUE,
            Self::XName(name) | Self::Iana(name) => name,
        }
    }
}

impl Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A property parameter: a name and one or more values.
///
/// Multi-valued parameters (e.g., `MEMBER`, `DELEGATED-TO`) hold every
/// COMMA-separated entry; a single value is a one-element list. Quotes
/// are resolved at scan time and re-applied on output whenever a value
/// contains a character that needs them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name
    pub kind: ParameterKind,
    /// Parameter values, unquoted
    pub values: Vec<String>,
}

impl Parameter {
    /// A parameter with a single value.
    #[must_use]
    pub fn new(kind: ParameterKind, value: impl Into<String>) -> Self {
        Self { kind, values: vec![value.into()] }
    }

    /// The first value, which is the only one for single-valued
    /// parameters.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_up_names_case_insensitively() {
        assert_eq!(ParameterKind::from_name("TZID"), ParameterKind::TzId);
        assert_eq!(ParameterKind::from_name("tzid"), ParameterKind::TzId);
        assert_eq!(ParameterKind::from_name("Sent-By"), ParameterKind::SentBy);
    }

    #[test]
    fn classifies_extension_names() {
        assert_eq!(
            ParameterKind::from_name("x-custom"),
            ParameterKind::XName("X-CUSTOM".to_owned())
        );
        assert_eq!(
            ParameterKind::from_name("SOMEDAY-REGISTERED"),
            ParameterKind::Iana("SOMEDAY-REGISTERED".to_owned())
        );
    }

    #[test]
    fn round_trips_names() {
        for name in ["ALTREP", "CN", "DELEGATED-FROM", "ENCODING", "VALUE", "X-FOO"] {
            assert_eq!(ParameterKind::from_name(name).as_str(), name);
        }
    }

    #[test]
    fn first_value_accessor() {
        let param = Parameter {
            kind: ParameterKind::Member,
            values: vec!["mailto:a@example.com".to_owned(), "mailto:b@example.com".to_owned()],
        };
        assert_eq!(param.value(), Some("mailto:a@example.com"));
        assert_eq!(Parameter { kind: ParameterKind::Rsvp, values: vec![] }.value(), None);
    }
}
