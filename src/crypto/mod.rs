//! Obfuscation helpers for nestbook
//!
//! Nothing in here is cryptographically secure. The snapshot codec and the
//! PIN encoding only hide stored data from casual inspection.

pub mod obfuscation;
pub mod pin;

pub use obfuscation::{Codec, FORMAT_TAG, V1_KEY};
pub use pin::PinCode;
