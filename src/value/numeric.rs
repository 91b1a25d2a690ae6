// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Integer, Float, and Boolean value types (RFC 5545 Sections 3.3.8,
//! 3.3.7, 3.3.2), plus the semicolon-separated float pair used by GEO.

use chumsky::prelude::*;

use crate::keyword::{KW_FALSE, KW_TRUE};
use crate::value::Extra;

/// Format Definition:
///
/// ```txt
/// integer = (["+"] / "-") 1*DIGIT
/// ```
pub fn value_integer<'src>() -> impl Parser<'src, &'src str, i32, Extra<'src>> {
    sign()
        .or_not()
        .then(
            select! { c @ '0'..='9' => c }
                .repeated()
                .at_least(1)
                .at_most(10) // i32 max is 10 digits: 2_147_483_647
                .collect::<String>(),
        )
        .try_map(|(sign, digits): (Option<char>, String), span| {
            let mut buf = String::with_capacity(11);
            buf.extend(sign);
            buf.push_str(&digits);
            lexical::parse::<i32, _>(buf.as_bytes())
                .map_err(|_| Rich::custom(span, "integer out of range"))
        })
}

/// COMMA-separated integer list.
pub fn values_integer<'src>() -> impl Parser<'src, &'src str, Vec<i32>, Extra<'src>> {
    value_integer().separated_by(just(',')).at_least(1).collect()
}

/// Format Definition:
///
/// ```txt
/// float = (["+"] / "-") 1*DIGIT ["." 1*DIGIT]
/// ```
pub fn value_float<'src>() -> impl Parser<'src, &'src str, f64, Extra<'src>> {
    let digits = select! { c @ '0'..='9' => c }.repeated().at_least(1).collect::<String>();

    sign()
        .or_not()
        .then(digits)
        .then(just('.').ignore_then(digits).or_not())
        .try_map(|((sign, int), frac): ((Option<char>, String), Option<String>), span| {
            let mut buf = String::new();
            buf.extend(sign);
            buf.push_str(&int);
            if let Some(frac) = frac {
                buf.push('.');
                buf.push_str(&frac);
            }
            lexical::parse::<f64, _>(buf.as_bytes())
                .map_err(|_| Rich::custom(span, "float out of range"))
        })
}

/// COMMA-separated float list.
pub fn values_float<'src>() -> impl Parser<'src, &'src str, Vec<f64>, Extra<'src>> {
    value_float().separated_by(just(',')).at_least(1).collect()
}

/// The GEO value: latitude and longitude joined by a SEMICOLON
/// (RFC 5545 Section 3.8.1.6).
pub fn values_float_pair<'src>() -> impl Parser<'src, &'src str, Vec<f64>, Extra<'src>> {
    value_float()
        .then_ignore(just(';'))
        .then(value_float())
        .map(|(latitude, longitude)| vec![latitude, longitude])
}

/// Parse a BOOLEAN value (RFC 5545 Section 3.3.2). Case-insensitive.
pub fn parse_boolean(s: &str) -> Result<bool, String> {
    if s.eq_ignore_ascii_case(KW_TRUE) {
        Ok(true)
    } else if s.eq_ignore_ascii_case(KW_FALSE) {
        Ok(false)
    } else {
        Err(format!("expected TRUE or FALSE, found {s:?}"))
    }
}

fn sign<'src>() -> impl Parser<'src, &'src str, char, Extra<'src>> + Copy {
    select! { c @ ('+' | '-') => c }
}

#[cfg(test)]
mod tests {
    #![expect(clippy::float_cmp)]

    use super::*;

    #[test]
    fn parses_integer() {
        fn parse(src: &str) -> Result<i32, Vec<Rich<'_, char>>> {
            value_integer().parse(src).into_result()
        }

        #[rustfmt::skip]
        let success_cases = [
            // examples from RFC 5545 Section 3.3.8
            ("1234567890",  1_234_567_890),
            ("-1234567890", -1_234_567_890),
            ("+1234567890", 1_234_567_890),
            ("432109876",   432_109_876),
            ("0",           0),
        ];
        for (src, expected) in success_cases {
            assert_eq!(parse(src).unwrap(), expected, "failed to parse: {src}");
        }

        let fail_cases = [
            "",            // empty
            "+",           // sign only
            "1.5",         // float
            "12345678901", // more than 10 digits
            "2147483648",  // i32::MAX + 1
            "1 2",         // embedded space
        ];
        for src in fail_cases {
            assert!(parse(src).is_err(), "should fail: {src}");
        }
    }

    #[test]
    fn parses_float() {
        fn parse(src: &str) -> Result<f64, Vec<Rich<'_, char>>> {
            value_float().parse(src).into_result()
        }

        #[rustfmt::skip]
        let success_cases = [
            // examples from RFC 5545 Section 3.3.7
            ("1000000.0000001", 1_000_000.000_000_1),
            ("1.333",           1.333),
            ("-3.14",           -3.14),
            ("12",              12.0),
            ("+5.0",            5.0),
        ];
        for (src, expected) in success_cases {
            assert_eq!(parse(src).unwrap(), expected, "failed to parse: {src}");
        }

        let fail_cases = [
            "",      // empty
            ".5",    // missing integer part
            "1.",    // missing fraction digits
            "1e5",   // exponents are not in the grammar
            "NaN",   // not a number literal
        ];
        for src in fail_cases {
            assert!(parse(src).is_err(), "should fail: {src}");
        }
    }

    #[test]
    fn parses_geo_pair() {
        // example from RFC 5545 Section 3.8.1.6
        let parsed = values_float_pair().parse("37.386013;-122.082932").into_result().unwrap();
        assert_eq!(parsed, vec![37.386_013, -122.082_932]);

        let fail_cases = [
            "37.386013",             // missing longitude
            "37.386013;",            // empty longitude
            "37.386013,-122.082932", // comma instead of semicolon
        ];
        for src in fail_cases {
            assert!(
                values_float_pair().parse(src).into_result().is_err(),
                "should fail: {src}"
            );
        }
    }

    #[test]
    fn parses_boolean() {
        assert_eq!(parse_boolean("TRUE"), Ok(true));
        assert_eq!(parse_boolean("FALSE"), Ok(false));
        assert_eq!(parse_boolean("true"), Ok(true));
        assert_eq!(parse_boolean("False"), Ok(false));
        assert!(parse_boolean("YES").is_err());
        assert!(parse_boolean("").is_err());
    }

    #[test]
    fn parses_lists() {
        let parsed = values_integer().parse("1,-2,3").into_result().unwrap();
        assert_eq!(parsed, vec![1, -2, 3]);

        let parsed = values_float().parse("1.5,2.5").into_result().unwrap();
        assert_eq!(parsed, vec![1.5, 2.5]);
    }
}
