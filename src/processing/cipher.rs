//! # Keystream Cipher
//!
//! Byte-wise XOR against a repeating password. Applying the same key twice
//! returns the original bytes, so one operation serves both directions.
//!
//! This provides confidentiality against casual inspection only; it is not
//! authenticated and not cryptographically strong.

use crate::common::error::{Result, StegoError};

/// A validated, non-empty XOR key that repeats indefinitely.
///
/// The key is checked once at construction, so [`Keystream::apply`] can never
/// cycle over an empty buffer.
#[derive(Debug, Clone)]
pub struct Keystream {
    key: Vec<u8>,
}

impl Keystream {
    /// Create a keystream from a password.
    ///
    /// # Errors
    /// - [`StegoError::EmptyKey`] if `key` is empty
    pub fn new(key: &[u8]) -> Result<Self> {
        if key.is_empty() {
            return Err(StegoError::EmptyKey);
        }

        Ok(Self { key: key.to_vec() })
    }

    /// Key byte used at position `index` of the data.
    fn byte_at(&self, index: usize) -> u8 {
        self.key[index % self.key.len()]
    }

    /// XOR `data` against the keystream, starting from the first key byte.
    pub fn apply(&self, data: &[u8]) -> Vec<u8> {
        data.iter()
            .enumerate()
            .map(|(i, byte)| byte ^ self.byte_at(i))
            .collect()
    }
}

/// XOR `data` with `key` repeated to the length of `data`.
///
/// # Errors
/// - [`StegoError::EmptyKey`] if `key` is empty
///
/// # Example
/// ```
/// use pixel_stego::transform;
///
/// let ciphertext = transform(b"Hi", b"k").unwrap();
/// assert_eq!(transform(&ciphertext, b"k").unwrap(), b"Hi");
/// ```
pub fn transform(data: &[u8], key: &[u8]) -> Result<Vec<u8>> {
    Ok(Keystream::new(key)?.apply(data))
}
