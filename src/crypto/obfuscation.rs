//! Reversible snapshot obfuscation (format `v1`)
//!
//! This is NOT encryption. The key is a constant compiled into the binary; the
//! transform only keeps exported data from being readable at a glance.
//!
//! encode: percent-escape (URI component rules) → XOR with the cyclic key →
//! base64. decode runs the same steps backwards.
//!
//! Empty input or an empty key is returned unchanged. Any other failure yields
//! an empty string, which callers must treat as corrupt data.

use base64::{engine::general_purpose::STANDARD, Engine};
use tracing::debug;

use crate::error::{NestError, NestResult};

/// Format tag of the data produced by this module
pub const FORMAT_TAG: &str = "v1";

/// Fixed obfuscation key bound to the `v1` format
pub const V1_KEY: &str = "nestbook::v1::local-obfuscation";

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// A codec holding its key, as owned by the persistence service
#[derive(Debug, Clone)]
pub struct Codec {
    key: String,
}

impl Codec {
    /// Create a codec using the given key
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    /// Codec using the fixed `v1` key
    pub fn v1() -> Self {
        Self::new(V1_KEY)
    }

    pub fn encode(&self, plaintext: &str) -> String {
        encode(plaintext, &self.key)
    }

    pub fn decode(&self, obfuscated: &str) -> String {
        decode(obfuscated, &self.key)
    }
}

/// Obfuscate `plaintext` under `key`
pub fn encode(plaintext: &str, key: &str) -> String {
    if plaintext.is_empty() || key.is_empty() {
        return plaintext.to_string();
    }

    match try_encode(plaintext, key) {
        Ok(encoded) => encoded,
        Err(e) => {
            debug!("obfuscation encode failed: {}", e);
            String::new()
        }
    }
}

/// Reverse [`encode`]
pub fn decode(obfuscated: &str, key: &str) -> String {
    if obfuscated.is_empty() || key.is_empty() {
        return obfuscated.to_string();
    }

    match try_decode(obfuscated, key) {
        Ok(decoded) => decoded,
        Err(e) => {
            debug!("obfuscation decode failed: {}", e);
            String::new()
        }
    }
}

fn try_encode(plaintext: &str, key: &str) -> NestResult<String> {
    let key = key_units(key)?;
    let escaped = escape_component(plaintext);
    let mixed = xor_cycle(escaped.as_bytes(), &key);
    Ok(STANDARD.encode(mixed))
}

fn try_decode(obfuscated: &str, key: &str) -> NestResult<String> {
    let key = key_units(key)?;
    let raw = STANDARD
        .decode(obfuscated.trim())
        .map_err(|e| NestError::Validation(format!("Invalid base64: {}", e)))?;
    let unmixed = xor_cycle(&raw, &key);
    unescape_component(&unmixed)
}

/// Key characters are single-byte code units; anything above U+00FF is rejected
fn key_units(key: &str) -> NestResult<Vec<u8>> {
    key.chars()
        .map(|c| {
            u8::try_from(u32::from(c)).map_err(|_| {
                NestError::Validation(format!("Key character {:?} is not a single byte", c))
            })
        })
        .collect()
}

fn xor_cycle(bytes: &[u8], key: &[u8]) -> Vec<u8> {
    bytes
        .iter()
        .zip(key.iter().cycle())
        .map(|(b, k)| b ^ k)
        .collect()
}

/// Bytes left as-is by URI component escaping
fn is_unreserved(b: u8) -> bool {
    b.is_ascii_alphanumeric()
        || matches!(b, b'-' | b'_' | b'.' | b'!' | b'~' | b'*' | b'\'' | b'(' | b')')
}

fn escape_component(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for &b in text.as_bytes() {
        if is_unreserved(b) {
            out.push(char::from(b));
        } else {
            out.push('%');
            out.push(char::from(HEX_DIGITS[usize::from(b >> 4)]));
            out.push(char::from(HEX_DIGITS[usize::from(b & 0x0F)]));
        }
    }
    out
}

/// Undo [`escape_component`]. Runs of `%XX` must form valid UTF-8; any other
/// byte is taken as the code point of the same value.
fn unescape_component(bytes: &[u8]) -> NestResult<String> {
    let mut out = String::with_capacity(bytes.len());
    let mut pending: Vec<u8> = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let pair = bytes
                .get(i + 1..i + 3)
                .ok_or_else(|| NestError::Validation("Truncated escape sequence".into()))?;
            pending.push(hex_pair(pair)?);
            i += 3;
            continue;
        }

        flush_escaped(&mut pending, &mut out)?;
        out.push(char::from(bytes[i]));
        i += 1;
    }

    flush_escaped(&mut pending, &mut out)?;
    Ok(out)
}

fn flush_escaped(pending: &mut Vec<u8>, out: &mut String) -> NestResult<()> {
    if pending.is_empty() {
        return Ok(());
    }
    let text = std::str::from_utf8(pending)
        .map_err(|e| NestError::Validation(format!("Escaped bytes are not UTF-8: {}", e)))?;
    out.push_str(text);
    pending.clear();
    Ok(())
}

fn hex_pair(pair: &[u8]) -> NestResult<u8> {
    let digit = |b: u8| -> NestResult<u8> {
        char::from(b)
            .to_digit(16)
            .map(|d| d as u8)
            .ok_or_else(|| NestError::Validation(format!("Invalid hex digit {:?}", char::from(b))))
    };
    Ok(digit(pair[0])? << 4 | digit(pair[1])?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let samples = [
            "hello",
            r#"{"profile":{"name":"Ada"},"diary":[]}"#,
            "spaces and / slashes ? & = #",
            "ünïcødé – 日本語 👶",
            "100% sure",
        ];

        for key in ["k", V1_KEY, "another key"] {
            for plaintext in samples {
                let encoded = encode(plaintext, key);
                assert_ne!(encoded, plaintext);
                assert_eq!(decode(&encoded, key), plaintext);
            }
        }
    }

    #[test]
    fn test_identity_on_empty_input_or_key() {
        assert_eq!(encode("", V1_KEY), "");
        assert_eq!(decode("", V1_KEY), "");
        assert_eq!(encode("plain", ""), "plain");
        assert_eq!(decode("plain", ""), "plain");
    }

    #[test]
    fn test_output_is_base64() {
        let encoded = encode("some data", V1_KEY);
        assert!(STANDARD.decode(&encoded).is_ok());
    }

    #[test]
    fn test_escaping_matches_uri_component_rules() {
        assert_eq!(escape_component("a-b_c.d!e~f*g'h(i)j"), "a-b_c.d!e~f*g'h(i)j");
        assert_eq!(escape_component("a b/c"), "a%20b%2Fc");
        assert_eq!(escape_component("é"), "%C3%A9");
    }

    #[test]
    fn test_known_vector() {
        // "A" XOR "B" = 0x03, base64 of [0x03] is "Aw=="
        assert_eq!(encode("A", "B"), "Aw==");
        assert_eq!(decode("Aw==", "B"), "A");
    }

    #[test]
    fn test_invalid_base64_decodes_to_empty() {
        assert_eq!(decode("not base64 at all!", V1_KEY), "");
    }

    #[test]
    fn test_broken_escape_decodes_to_empty() {
        // XOR with a zero key leaves bytes untouched, so the payload is the
        // escaped text itself
        let key = "\u{0}";
        assert_eq!(decode(&STANDARD.encode("%E"), key), "");
        assert_eq!(decode(&STANDARD.encode("%ZZ"), key), "");
        assert_eq!(decode(&STANDARD.encode("%C3"), key), "");
        assert_eq!(decode(&STANDARD.encode("%C3%A9"), key), "é");
    }

    #[test]
    fn test_wide_key_character_fails() {
        assert_eq!(encode("data", "ключ"), "");
        assert_eq!(decode("ZGF0YQ==", "ключ"), "");
    }

    #[test]
    fn test_wrong_key_does_not_round_trip() {
        let encoded = encode("secret diary", "first");
        assert_ne!(decode(&encoded, "second"), "secret diary");
    }

    #[test]
    fn test_codec_uses_its_key() {
        let codec = Codec::v1();
        let encoded = codec.encode("payload");
        assert_eq!(encoded, encode("payload", V1_KEY));
        assert_eq!(codec.decode(&encoded), "payload");
    }
}
