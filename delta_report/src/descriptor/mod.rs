//! Descriptor decoding: compact signatures to readable text
//!
//! Pure functions with no logging of their own; callers decide whether a
//! decode failure matters.

pub mod decoder;
pub mod error;

pub use decoder::{decode, decode_type, decode_with, DecodeOptions, DescriptorDecoder};
pub use error::{DecodeResult, DescriptorDecodeError};

/// Split a member key into `(selector, descriptor)` at the first `(`
pub fn split_member_key(key: &str) -> Option<(&str, &str)> {
    key.find('(').map(|index| key.split_at(index))
}
