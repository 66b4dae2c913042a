//! Bijective base-26 short code codec.
//!
//! Converts allocated integer IDs to compact alphabetic codes and back.
//! Codes use the uppercase alphabet only; decoding is case-insensitive.

use crate::error::AppError;
use serde_json::json;

/// Symbol set for code encoding. Index position is the digit value.
const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

const BASE: u64 = ALPHABET.len() as u64;

/// Encodes a non-negative ID as a base-26 alphabetic code.
///
/// The mapping is a bijection between `{0, 1, 2, ...}` and non-empty
/// uppercase strings with no leading `A` (the zero digit). Zero itself is
/// special-cased to `"A"` because the division loop would otherwise emit no
/// digit at all.
///
/// # Examples
///
/// ```
/// use seqlink::utils::codec::encode;
///
/// assert_eq!(encode(0), "A");
/// assert_eq!(encode(25), "Z");
/// assert_eq!(encode(26), "BA");
/// assert_eq!(encode(1024), "BNK");
/// ```
pub fn encode(id: u64) -> String {
    if id == 0 {
        return (ALPHABET[0] as char).to_string();
    }

    let mut id = id;
    let mut digits = String::new();
    while id > 0 {
        digits.push(ALPHABET[(id % BASE) as usize] as char);
        id /= BASE;
    }

    digits.chars().rev().collect()
}

/// Decodes a short code back to its integer ID.
///
/// Accepts mixed case; codes are folded to uppercase before decoding since
/// the encoder only ever emits uppercase.
///
/// # Errors
///
/// Returns [`AppError::InvalidInput`] for an empty code, a character outside
/// `A-Z`/`a-z`, or a code long enough to overflow `u64`.
pub fn decode(code: &str) -> Result<u64, AppError> {
    if code.is_empty() {
        return Err(AppError::invalid_input(
            "Short code must not be empty",
            json!({}),
        ));
    }

    let mut acc: u64 = 0;
    for c in code.chars() {
        let upper = c.to_ascii_uppercase();
        if !upper.is_ascii_uppercase() {
            return Err(AppError::invalid_input(
                "Short code contains a character outside the alphabet",
                json!({ "code": code, "character": c.to_string() }),
            ));
        }

        let index = (upper as u8 - b'A') as u64;
        acc = acc
            .checked_mul(BASE)
            .and_then(|v| v.checked_add(index))
            .ok_or_else(|| {
                AppError::invalid_input(
                    "Short code is too long to decode",
                    json!({ "code": code }),
                )
            })?;
    }

    Ok(acc)
}
