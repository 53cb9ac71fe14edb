//! ISUPPORT value escaping.
//!
//! A value byte must be escaped when it is banned in an IRC middle parameter
//! (NUL, LF, CR, SPACE) or has meaning inside a token (`=`, `\`). Escaped bytes
//! are written as `\xHH` with uppercase hex; every other byte passes through.

use bytes::Bytes;

use super::token::TokenName;

const HEX: &[u8; 16] = b"0123456789ABCDEF";

/// Whether a value byte has to be written as `\xHH`.
#[inline]
pub const fn is_reserved(byte: u8) -> bool {
    matches!(byte, b'\0' | b'\n' | b'\r' | b' ' | b'=' | b'\\')
}

/// Append the escaped form of `value` to `out`.
pub fn escape_value(value: &[u8], out: &mut Vec<u8>) {
    out.reserve(value.len());
    for &byte in value {
        if is_reserved(byte) {
            out.extend_from_slice(&[b'\\', b'x', HEX[(byte >> 4) as usize], HEX[(byte & 0x0F) as usize]]);
        } else {
            out.push(byte);
        }
    }
}

/// Append `=value` (escaped) to a token buffer. Empty values append nothing.
pub fn append_value(buffer: &mut Vec<u8>, value: &[u8]) {
    if value.is_empty() {
        return;
    }
    buffer.push(b'=');
    escape_value(value, buffer);
}

/// Render one token parameter: `NAME` or `NAME=escaped-value`.
pub fn render_token(name: &TokenName, value: &[u8]) -> Bytes {
    let mut buffer = Vec::with_capacity(name.as_str().len() + 1 + value.len());
    buffer.extend_from_slice(name.as_str().as_bytes());
    append_value(&mut buffer, value);
    Bytes::from(buffer)
}

fn hex_digit(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        _ => None,
    }
}

/// Reverse [`escape_value`].
///
/// A backslash that does not start a complete `\xHH` sequence is kept as-is.
pub fn unescape_value(value: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(value.len());
    let mut i = 0;
    while i < value.len() {
        if value[i] == b'\\' && i + 3 < value.len() && value[i + 1] == b'x' {
            if let (Some(hi), Some(lo)) = (hex_digit(value[i + 2]), hex_digit(value[i + 3])) {
                out.push((hi << 4) | lo);
                i += 4;
                continue;
            }
        }
        out.push(value[i]);
        i += 1;
    }
    out
}
