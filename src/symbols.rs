//! Printable encoding of byte strings, six bits per symbol.
//!
//! Bytes are read as one big-endian bit string and cut into 6-bit chunks,
//! each mapped through [`ALPHABET`]. This is ordinary base64 without `=`
//! padding; instead the output is padded with the zero symbol `A` up to a
//! fixed length. The codec knows nothing about boards or matches.

use tracing::debug;

use crate::constants::ALPHABET;
use crate::error::{CodecError, Result};

/// Value of a symbol, or `None` if `c` is not in the alphabet.
pub fn symbol_value(c: char) -> Option<u8> {
    let v = match c {
        'A'..='Z' => c as u8 - b'A',
        'a'..='z' => c as u8 - b'a' + 26,
        '0'..='9' => c as u8 - b'0' + 52,
        '+' => 62,
        '/' => 63,
        _ => return None,
    };
    Some(v)
}

/// Encode `bytes` as exactly `len` symbols.
///
/// Fails with [`CodecError::Range`] when `len` symbols cannot hold every bit
/// of `bytes`.
pub fn to_symbols(bytes: &[u8], len: usize) -> Result<String> {
    if bytes.len() * 8 > len * 6 {
        return Err(CodecError::range(
            "symbols",
            format!("{len} symbols cannot hold {} bytes", bytes.len()),
        ));
    }
    Ok(write_symbols(bytes, len))
}

/// [`to_symbols`] for callers whose sizes are fixed and known to fit.
pub(crate) fn write_symbols(bytes: &[u8], len: usize) -> String {
    let mut out = String::with_capacity(len);
    let mut acc: u32 = 0;
    let mut nbits: u32 = 0;

    for &b in bytes {
        acc = (acc << 8) | u32::from(b);
        nbits += 8;
        while nbits >= 6 {
            nbits -= 6;
            out.push(ALPHABET[((acc >> nbits) & 0x3F) as usize] as char);
        }
        acc &= (1u32 << nbits) - 1;
    }
    if nbits > 0 {
        out.push(ALPHABET[((acc << (6 - nbits)) & 0x3F) as usize] as char);
    }
    while out.len() < len {
        out.push(ALPHABET[0] as char);
    }
    out
}

/// Decode exactly `len` symbols back into `len * 6 / 8` bytes.
///
/// Fails with [`CodecError::Format`] on a wrong length or a character outside
/// the alphabet. Bits left over after the last whole byte are ignored, as
/// GNU Backgammon does. `field` names the identifier in error messages.
pub fn from_symbols(text: &str, len: usize, field: &'static str) -> Result<Vec<u8>> {
    let count = text.chars().count();
    if count != len {
        debug!(field, count, len, "rejecting identifier of wrong length");
        return Err(CodecError::format(
            field,
            format!("expected {len} characters, got {count}"),
        ));
    }

    let mut out = Vec::with_capacity(len * 6 / 8);
    let mut acc: u32 = 0;
    let mut nbits: u32 = 0;

    for (offset, c) in text.chars().enumerate() {
        let Some(v) = symbol_value(c) else {
            debug!(field, offset, "rejecting identifier with invalid character");
            return Err(CodecError::format(
                field,
                format!("invalid character {c:?} at offset {offset}"),
            ));
        };
        acc = (acc << 6) | u32::from(v);
        nbits += 6;
        if nbits >= 8 {
            nbits -= 8;
            out.push((acc >> nbits) as u8);
        }
        acc &= (1u32 << nbits) - 1;
    }
    Ok(out)
}
