// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Round-trip tests for the iCalendar parser and formatter.
//!
//! These tests verify that parsing and formatting preserves both the
//! component tree and, for canonically written input, the exact bytes.

use pretty_assertions::assert_eq;

use icaltree::{format, parse};

/// Parsing, formatting, and parsing again must give back an equal tree.
fn assert_tree_round_trips(original: &str) {
    let calendar = parse(original).unwrap();
    let formatted = format(&calendar).unwrap();
    let reparsed = parse(&formatted).unwrap();
    assert_eq!(calendar, reparsed, "tree changed across a round trip:\n{formatted}");
}

/// Canonically written input must come back byte-for-byte.
fn assert_bytes_round_trip(original: &str) {
    let calendar = parse(original).unwrap();
    let formatted = format(&calendar).unwrap();
    assert_eq!(original, formatted);
}

#[test]
fn round_trip_simple_calendar() {
    let original = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example Corp.//Cal Client 1.0//EN\r\n\
BEGIN:VEVENT\r\n\
UID:12345@example.com\r\n\
DTSTAMP:20250110T120000Z\r\n\
DTSTART:20250110T140000Z\r\n\
DTEND:20250110T150000Z\r\n\
SUMMARY:Test Event\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    assert_bytes_round_trip(original);
}

#[test]
fn round_trip_date_only_and_utc_forms() {
    // date-only values keep their derived VALUE=DATE parameter, UTC
    // values keep the Z suffix and gain no parameter at all
    let original = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example//EN\r\n\
BEGIN:VEVENT\r\n\
UID:dates@example.com\r\n\
DTSTAMP:20011221T180000Z\r\n\
DTSTART;VALUE=DATE:20011221\r\n\
EXDATE;VALUE=DATE:20011222,20011223\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    assert_bytes_round_trip(original);
}

#[test]
fn round_trip_zoned_date_times() {
    let original = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example//EN\r\n\
BEGIN:VTIMEZONE\r\n\
TZID:America/New_York\r\n\
BEGIN:STANDARD\r\n\
DTSTART:20071104T020000\r\n\
TZOFFSETFROM:-0400\r\n\
TZOFFSETTO:-0500\r\n\
TZNAME:EST\r\n\
END:STANDARD\r\n\
BEGIN:DAYLIGHT\r\n\
DTSTART:20070311T020000\r\n\
TZOFFSETFROM:-0500\r\n\
TZOFFSETTO:-0400\r\n\
TZNAME:EDT\r\n\
END:DAYLIGHT\r\n\
END:VTIMEZONE\r\n\
BEGIN:VEVENT\r\n\
UID:zoned@example.com\r\n\
DTSTAMP:20250110T120000Z\r\n\
DTSTART;TZID=America/New_York:20250101T090000\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    assert_bytes_round_trip(original);

    // the zone definition is reachable from the tree
    let calendar = parse(original).unwrap();
    assert!(calendar.timezone("America/New_York").is_some());
}

#[test]
fn round_trip_durations_and_triggers() {
    let original = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example//EN\r\n\
BEGIN:VEVENT\r\n\
UID:alarmed@example.com\r\n\
DTSTAMP:20250110T120000Z\r\n\
DTSTART:20250110T140000Z\r\n\
DURATION:P15DT5H0M20S\r\n\
BEGIN:VALARM\r\n\
ACTION:DISPLAY\r\n\
DESCRIPTION:Reminder\r\n\
TRIGGER:-PT15M\r\n\
END:VALARM\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    assert_bytes_round_trip(original);
}

#[test]
fn round_trip_week_and_day_durations() {
    // weeks combined with day/time parts go beyond strict RFC 5545, but
    // the model represents them and the formatter emits them
    let original = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example//EN\r\n\
BEGIN:VEVENT\r\n\
UID:mixed-duration@example.com\r\n\
DTSTAMP:20250110T120000Z\r\n\
DTSTART:20250110T140000Z\r\n\
DURATION:P1W2D\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    assert_bytes_round_trip(original);
    assert_tree_round_trips(original);
}

#[test]
fn round_trip_tzid_on_date_only_values() {
    // a bare date has no time to zone, so the TZID parameter is carried
    // through instead of being folded into the value
    let original = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example//EN\r\n\
BEGIN:VEVENT\r\n\
UID:zoned-date@example.com\r\n\
DTSTAMP:20250110T120000Z\r\n\
DTSTART;VALUE=DATE;TZID=America/New_York:20011221\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    assert_bytes_round_trip(original);

    let formatted = format(&parse(original).unwrap()).unwrap();
    assert!(formatted.contains("TZID=America/New_York"), "got: {formatted}");
}

#[test]
fn round_trip_zero_durations() {
    let original = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example//EN\r\n\
BEGIN:VALARM\r\n\
ACTION:DISPLAY\r\n\
TRIGGER:PT0S\r\n\
END:VALARM\r\n\
END:VCALENDAR\r\n";

    assert_bytes_round_trip(original);

    // P0D normalizes to PT0S but the tree stays equal
    assert_tree_round_trips(&original.replace("PT0S", "P0D"));
}

#[test]
fn round_trip_recurrence_rules() {
    let original = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example//EN\r\n\
BEGIN:VEVENT\r\n\
UID:recurring@example.com\r\n\
DTSTAMP:20250110T120000Z\r\n\
DTSTART:20250110T140000Z\r\n\
RRULE:FREQ=MONTHLY;INTERVAL=2;BYDAY=1SU,-1SU;WKST=MO\r\n\
EXRULE:FREQ=DAILY;UNTIL=20260101T000000Z\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    assert_bytes_round_trip(original);
}

#[test]
fn round_trip_long_lenient_by_lists() {
    // 61 BYSECOND entries, duplicates and leap-second 60 included, in a
    // line long enough to be folded on output
    let seconds: Vec<String> = (0..=60).map(|s| s.to_string()).collect();
    let original = format!(
        "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example//EN\r\n\
BEGIN:VEVENT\r\n\
UID:seconds@example.com\r\n\
DTSTAMP:20250110T120000Z\r\n\
RRULE:FREQ=MINUTELY;BYSECOND={}\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n",
        seconds.join(",")
    );

    let calendar = parse(&original).unwrap();
    let formatted = format(&calendar).unwrap();
    for line in formatted.split("\r\n") {
        assert!(line.len() <= 75, "unfolded line in output: {line}");
    }
    assert_eq!(calendar, parse(&formatted).unwrap());
}

#[test]
fn round_trip_text_escapes_and_unicode() {
    let original = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example//EN\r\n\
BEGIN:VEVENT\r\n\
UID:text@example.com\r\n\
DTSTAMP:20250110T120000Z\r\n\
SUMMARY:Café réunion\r\n\
DESCRIPTION:Line one\\nLine two\\, with a comma and a \\\\ backslash\r\n\
CATEGORIES:MEETING,PROJECT\\,INTERNAL\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    assert_bytes_round_trip(original);

    let calendar = parse(original).unwrap();
    let event = &calendar.children()[0];
    let description = event
        .property(&icaltree::PropertyKind::Description)
        .unwrap();
    assert_eq!(
        description.value,
        icaltree::Value::Text(vec![
            "Line one\nLine two, with a comma and a \\ backslash".to_owned()
        ])
    );
}

#[test]
fn round_trip_x_properties_verbatim() {
    let original = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example//EN\r\n\
X-CUSTOM-PROP;X-FLAG=1:opaque; payload, kept \\ verbatim\r\n\
END:VCALENDAR\r\n";

    assert_bytes_round_trip(original);
}

#[test]
fn round_trip_draft_components() {
    let original = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example//EN\r\n\
BEGIN:VAGENDA\r\n\
UID:agenda@example.com\r\n\
END:VAGENDA\r\n\
BEGIN:VQUERY\r\n\
QUERYID:fetch-events\r\n\
END:VQUERY\r\n\
END:VCALENDAR\r\n";

    assert_bytes_round_trip(original);
}

#[test]
fn round_trip_attendees_with_quoted_parameters() {
    let original = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example//EN\r\n\
BEGIN:VEVENT\r\n\
UID:party@example.com\r\n\
DTSTAMP:20250110T120000Z\r\n\
ORGANIZER;CN=\"Smith, John\":mailto:jsmith@example.com\r\n\
ATTENDEE;MEMBER=\"mailto:devs@example.com\",\"mailto:ops@example.com\";RSVP=TR\r\n UE:mailto:anna@example.com\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    assert_tree_round_trips(original);

    let calendar = parse(original).unwrap();
    let event = &calendar.children()[0];
    let attendee = event.property(&icaltree::PropertyKind::Attendee).unwrap();
    let member = attendee
        .parameter(&icaltree::ParameterKind::Member)
        .unwrap();
    assert_eq!(member.values.len(), 2);
    assert_eq!(
        attendee
            .parameter(&icaltree::ParameterKind::Rsvp)
            .and_then(icaltree::Parameter::value),
        Some("TRUE"),
        "folded parameter value should reassemble"
    );
}

#[test]
fn round_trip_binary_attachment() {
    let original = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example//EN\r\n\
BEGIN:VEVENT\r\n\
UID:attached@example.com\r\n\
DTSTAMP:20250110T120000Z\r\n\
ATTACH;FMTTYPE=text/plain;VALUE=BINARY;ENCODING=BASE64:SGVsbG8gV29ybGQ=\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    assert_tree_round_trips(original);

    let formatted = format(&parse(original).unwrap()).unwrap();
    assert!(
        formatted.contains("VALUE=BINARY;ENCODING=BASE64"),
        "derived parameters missing: {formatted}"
    );
    assert!(formatted.contains("SGVsbG8gV29ybGQ="));
}

#[test]
fn round_trip_freebusy_periods_and_geo() {
    let original = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example//EN\r\n\
BEGIN:VFREEBUSY\r\n\
UID:busy@example.com\r\n\
DTSTAMP:20250110T120000Z\r\n\
FREEBUSY:19970101T180000Z/19970102T070000Z,19970103T180000Z/PT5H30M\r\n\
END:VFREEBUSY\r\n\
BEGIN:VEVENT\r\n\
UID:located@example.com\r\n\
DTSTAMP:20250110T120000Z\r\n\
GEO:37.386013;-122.082932\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

    assert_bytes_round_trip(original);
}

#[test]
fn folded_lines_unfold_and_refold() {
    // a description long enough to be folded, fed in pre-folded form
    let body = "The quick brown fox jumps over the lazy dog. ".repeat(5);
    let folded_input = format!(
        "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:-//Example//EN\r\nDESCRIPTION:{}\r\n {}\r\nEND:VCALENDAR\r\n",
        &body[..60],
        &body[60..],
    );

    let calendar = parse(&folded_input).unwrap();
    match &calendar.properties()[2].value {
        icaltree::Value::Text(values) => assert_eq!(values[0], body),
        other => panic!("expected text, got {other:?}"),
    }

    let formatted = format(&calendar).unwrap();
    for line in formatted.split("\r\n") {
        assert!(line.len() <= 75);
    }
    assert_eq!(calendar, parse(&formatted).unwrap());
}

#[test]
fn output_always_uses_crlf() {
    let original = "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:x\r\nEND:VCALENDAR\r\n";
    let formatted = format(&parse(original).unwrap()).unwrap();
    assert!(!formatted.replace("\r\n", "").contains(['\r', '\n']));
    assert!(formatted.ends_with("\r\n"));
}
