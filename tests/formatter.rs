// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Formatter tests: folding behavior and output stability through the
//! public API.

use pretty_assertions::assert_eq;

use icaltree::{FoldingStyle, FormatOptions, format, parse};

fn calendar_with_description(len: usize) -> icaltree::Component {
    let src = format!(
        "BEGIN:VCALENDAR\r\nVERSION:2.0\r\nPRODID:x\r\nDESCRIPTION:{}\r\nEND:VCALENDAR\r\n",
        "d".repeat(len)
    );
    parse(&src).unwrap()
}

#[test]
fn lines_at_exactly_75_octets_are_not_folded() {
    // "DESCRIPTION:" is 12 octets, so 63 value octets make exactly 75
    let calendar = calendar_with_description(63);
    let output = format(&calendar).unwrap();
    assert!(!output.contains("\r\n "), "75-octet line should not fold: {output}");

    // one more octet forces a fold
    let calendar = calendar_with_description(64);
    let output = format(&calendar).unwrap();
    assert!(output.contains("\r\n "), "76-octet line should fold: {output}");
}

#[test]
fn folded_output_reparses_to_the_same_tree() {
    let calendar = calendar_with_description(500);
    for options in [
        FormatOptions::default(),
        FormatOptions::default().folding_style(FoldingStyle::Tab),
        FormatOptions::default().folding(Some(20)),
        FormatOptions::default().folding(None),
    ] {
        let output = options.write_to_string(&calendar).unwrap();
        assert_eq!(parse(&output).unwrap(), calendar, "options: {options:?}");
    }
}

#[test]
fn custom_fold_width_is_honored() {
    let calendar = calendar_with_description(100);
    let output = FormatOptions::default()
        .folding(Some(30))
        .write_to_string(&calendar)
        .unwrap();
    for line in output.split("\r\n") {
        assert!(line.len() <= 30, "line exceeds 30 octets: {line}");
    }
}

#[test]
fn output_is_deterministic() {
    let src = "BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example//EN\r\n\
BEGIN:VEVENT\r\n\
UID:1@example.com\r\n\
DTSTAMP:20250110T120000Z\r\n\
SUMMARY:Stable output\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";
    let calendar = parse(src).unwrap();
    assert_eq!(format(&calendar).unwrap(), format(&calendar).unwrap());
    assert_eq!(format(&calendar).unwrap(), src);
}

#[test]
fn writing_to_an_io_writer_matches_the_string_form() {
    let calendar = calendar_with_description(200);
    let options = FormatOptions::default();

    let mut buffer = Vec::new();
    options.write(&calendar, &mut buffer).unwrap();
    assert_eq!(
        String::from_utf8(buffer).unwrap(),
        options.write_to_string(&calendar).unwrap()
    );
}
