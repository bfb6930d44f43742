//! Base32 (RFC 4648 alphabet, no padding) as used by authenticator apps.

use super::OtpError;

const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

const fn symbol_value(symbol: u8) -> Option<u8> {
    match symbol {
        b'A'..=b'Z' => Some(symbol - b'A'),
        b'2'..=b'7' => Some(symbol - b'2' + 26),
        _ => None,
    }
}

/// Decode a human-typed secret into key bytes.
///
/// Input is case-insensitive. Each character carries 5 bits, packed most
/// significant first. Leftover bits of a final partial group become one more
/// byte, padded with zero bits on the right, unless they are all zero as in
/// canonical RFC 4648 input.
///
/// # Errors
/// Returns [`OtpError::InvalidEncoding`] on the first character outside
/// `{A-Z, 2-7}`.
pub fn decode(input: &str) -> Result<Vec<u8>, OtpError> {
    let mut bytes = Vec::with_capacity((input.len() * 5).div_ceil(8));
    let mut buffer: u32 = 0;
    let mut bits: u32 = 0;

    for (position, character) in input.chars().enumerate() {
        let value = u8::try_from(character.to_ascii_uppercase())
            .ok()
            .and_then(symbol_value)
            .ok_or(OtpError::InvalidEncoding {
                character,
                position,
            })?;

        buffer = (buffer << 5) | u32::from(value);
        bits += 5;

        if bits >= 8 {
            bits -= 8;
            bytes.push(((buffer >> bits) & 0xff) as u8);
            buffer &= (1 << bits) - 1;
        }
    }

    if bits > 0 && buffer != 0 {
        bytes.push(((buffer << (8 - bits)) & 0xff) as u8);
    }

    Ok(bytes)
}

/// Encode key bytes as unpadded upper-case Base32.
#[must_use]
pub fn encode(bytes: &[u8]) -> String {
    let mut encoded = String::with_capacity((bytes.len() * 8).div_ceil(5));
    let mut buffer: u32 = 0;
    let mut bits: u32 = 0;

    for &byte in bytes {
        buffer = (buffer << 8) | u32::from(byte);
        bits += 8;

        while bits >= 5 {
            bits -= 5;
            encoded.push(char::from(ALPHABET[((buffer >> bits) & 0x1f) as usize]));
        }
        buffer &= (1 << bits) - 1;
    }

    if bits > 0 {
        encoded.push(char::from(ALPHABET[((buffer << (5 - bits)) & 0x1f) as usize]));
    }

    encoded
}
