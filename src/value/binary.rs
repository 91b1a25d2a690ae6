// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Binary value type (RFC 5545 Section 3.3.1) and the ENCODING parameter
//! values that govern it (Section 3.2.7).

use std::fmt::{self, Display};
use std::str::FromStr;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

/// Inline binary data together with the encoding it was transported in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueBinary {
    /// Decoded bytes
    pub data: Vec<u8>,
    /// Wire encoding, restored on output
    pub encoding: Encoding,
}

/// The ENCODING parameter (RFC 5545 Section 3.2.7).
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display, strum::EnumString)]
#[strum(ascii_case_insensitive)]
pub enum Encoding {
    /// Text encoding, the value is the bytes themselves
    #[strum(serialize = "8BIT")]
    EightBit,
    /// Standard Base64 with padding
    #[strum(serialize = "BASE64")]
    Base64,
}

/// Decode a binary value as transported with the given encoding.
pub fn parse_binary(s: &str, encoding: Encoding) -> Result<ValueBinary, String> {
    let data = match encoding {
        Encoding::EightBit => s.as_bytes().to_vec(),
        Encoding::Base64 => BASE64.decode(s).map_err(|err| format!("invalid base64: {err}"))?,
    };
    Ok(ValueBinary { data, encoding })
}

impl Display for ValueBinary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.encoding {
            Encoding::EightBit => {
                // 8BIT data that is not UTF-8 cannot appear in a text line.
                match std::str::from_utf8(&self.data) {
                    Ok(s) => f.write_str(s),
                    Err(_) => Err(fmt::Error),
                }
            }
            Encoding::Base64 => f.write_str(&BASE64.encode(&self.data)),
        }
    }
}

/// Parse an ENCODING parameter value.
pub fn parse_encoding(s: &str) -> Result<Encoding, String> {
    Encoding::from_str(s).map_err(|_| format!("expected 8BIT or BASE64, found {s:?}"))
}
