//! Testament value codec
//!
//! Reversible encoding between a numeric asset value and the opaque
//! `FHE-…` ciphertext string stored in will records.
//!
//! # Not real encryption
//!
//! The tag stands in for a homomorphic scheme that never shipped: the
//! payload is base64 of the value's decimal rendering, reversible by anyone
//! holding the ledger blob. Treat persisted blobs as public. A real
//! cipher can replace this pair behind the same signatures.
//!
//! # Tolerance
//!
//! Callers feed raw user input and legacy blobs written before the tag
//! existed, so both directions bend rather than break: [`encode`] maps
//! non-finite input to zero, and [`decode`] falls back to a lenient numeric
//! parse of the raw string when the tagged format does not match.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use thiserror::Error;

/// Prefix marking a value produced by [`encode`].
const TAG: &str = "FHE-";

/// Errors from ciphertext decoding.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The string is neither tagged ciphertext nor anything numeric.
    #[error("ciphertext has no numeric content: {0:?}")]
    Unreadable(String),
}

/// Encode an asset value into an opaque ciphertext string.
///
/// Deterministic and reversible: `decode(encode(v)) == v` for every finite
/// `v`. Non-finite input (NaN, ±infinity) encodes as zero.
pub fn encode(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    format!("{TAG}{}", BASE64.encode(value.to_string()))
}

/// Decode a ciphertext produced by [`encode`].
///
/// A string that does not match the tagged format — untagged legacy values,
/// hand-edited blobs, truncated payloads — is recovered with a best-effort
/// numeric parse of the raw string rather than rejected. Only a string with
/// no numeric prefix at all is an error; this function never panics.
pub fn decode(ciphertext: &str) -> Result<f64, CodecError> {
    if let Some(value) = decode_tagged(ciphertext) {
        return Ok(value);
    }
    parse_numeric(ciphertext).ok_or_else(|| CodecError::Unreadable(ciphertext.to_string()))
}

/// Strict tagged-format parse. `None` means malformed; the caller falls
/// back to the lenient path and the condition is never surfaced.
fn decode_tagged(ciphertext: &str) -> Option<f64> {
    let payload = ciphertext.strip_prefix(TAG)?;
    let bytes = BASE64.decode(payload).ok()?;
    let text = String::from_utf8(bytes).ok()?;
    text.trim().parse::<f64>().ok()
}

/// Lenient numeric parse: the longest leading float the decimal grammar
/// accepts, ignoring whatever trails it (`"2.5 ETH"` parses as `2.5`).
///
/// This is the grammar legacy untagged values and raw form input were
/// written against. Word spellings of specials (`inf`, `NaN`) are not
/// accepted.
pub fn parse_numeric(input: &str) -> Option<f64> {
    let input = input.trim_start();
    let first = input.chars().next()?;
    if !(first.is_ascii_digit() || matches!(first, '+' | '-' | '.')) {
        return None;
    }
    (1..=input.len())
        .rev()
        .filter(|&end| input.is_char_boundary(end))
        .find_map(|end| {
            let prefix = &input[..end];
            if prefix
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
            {
                prefix.parse::<f64>().ok()
            } else {
                None
            }
        })
}
