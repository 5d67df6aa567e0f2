//! PIN record encoding and in-memory PIN handling
//!
//! The stored PIN record is the base64 text of the PIN. This is a minimal
//! obfuscation for a local unlock gate, kept as-is so existing records keep
//! verifying.

use std::fmt;

use base64::{engine::general_purpose::STANDARD, Engine};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{NestError, NestResult};

/// Minimum number of digits accepted from the CLI
pub const MIN_PIN_LEN: usize = 4;

/// Maximum number of digits accepted from the CLI
pub const MAX_PIN_LEN: usize = 8;

/// Encode a PIN into its stored record form
pub fn encode(pin: &str) -> String {
    STANDARD.encode(pin.as_bytes())
}

/// Check a candidate PIN against a stored record
pub fn matches(record: &str, candidate: &str) -> bool {
    !record.is_empty() && record == encode(candidate)
}

/// A PIN typed by the user, zeroed on drop
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct PinCode {
    digits: String,
}

impl PinCode {
    /// Validate user input as a PIN of 4 to 8 ASCII digits
    pub fn parse(input: impl Into<String>) -> NestResult<Self> {
        let pin = Self {
            digits: input.into(),
        };
        let trimmed_len = pin.digits.trim().len();

        if trimmed_len != pin.digits.len() {
            return Err(NestError::Validation(
                "PIN cannot contain surrounding whitespace".into(),
            ));
        }
        if !(MIN_PIN_LEN..=MAX_PIN_LEN).contains(&pin.digits.len()) {
            return Err(NestError::Validation(format!(
                "PIN must be {} to {} digits",
                MIN_PIN_LEN, MAX_PIN_LEN
            )));
        }
        if !pin.digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(NestError::Validation("PIN must contain only digits".into()));
        }

        Ok(pin)
    }

    pub fn as_str(&self) -> &str {
        &self.digits
    }
}

impl PartialEq for PinCode {
    fn eq(&self, other: &Self) -> bool {
        self.digits == other.digits
    }
}

// Never print the digits
impl fmt::Debug for PinCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PinCode")
            .field("len", &self.digits.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_is_base64_text() {
        assert_eq!(encode("1234"), "MTIzNA==");
        assert_eq!(STANDARD.decode(encode("0000")).unwrap(), b"0000");
    }

    #[test]
    fn test_matches() {
        let record = encode("1234");
        assert!(matches(&record, "1234"));
        assert!(!matches(&record, "0000"));
        assert!(!matches("", ""));
    }

    #[test]
    fn test_parse_valid() {
        let pin = PinCode::parse("123456").unwrap();
        assert_eq!(pin.as_str(), "123456");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(PinCode::parse("123").is_err());
        assert!(PinCode::parse("123456789").is_err());
        assert!(PinCode::parse("12a4").is_err());
        assert!(PinCode::parse(" 1234").is_err());
        assert!(PinCode::parse("1234").is_ok());
    }

    #[test]
    fn test_debug_hides_digits() {
        let pin = PinCode::parse("9876").unwrap();
        let debug = format!("{:?}", pin);
        assert!(!debug.contains("9876"));
        assert!(debug.contains("PinCode"));
    }
}
