// File:    cipher.rs
// Author:  apezoo
// Date:    2026-10-18
//
// Description: XOR stream cipher keyed by the bits of an exchanged key.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! This module contains the XOR transform used to encrypt and decrypt with an
//! exchanged key. It is illustrative only and offers no real security.

use crate::bit::{Bit, bits_from_bytes, bytes_from_bits};
use crate::error::{ProtocolError, Result};
use sha2::{Digest, Sha256};

/// A symmetric in-place transform keyed by a bit sequence.
pub trait StreamCipher {
    /// Transforms `message` in place with `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::EmptyKey`] when `key` is empty.
    fn transform(&self, message: &mut [Bit], key: &[Bit]) -> Result<()>;
}

/// XOR of message and key, repeating the key when it is shorter than the
/// message. Applying it twice with the same key restores the message.
#[derive(Debug, Clone, Copy, Default)]
pub struct XorCipher;

impl StreamCipher for XorCipher {
    fn transform(&self, message: &mut [Bit], key: &[Bit]) -> Result<()> {
        if key.is_empty() {
            return Err(ProtocolError::EmptyKey);
        }
        for (bit, &k) in message.iter_mut().zip(key.iter().cycle()) {
            *bit ^= k;
        }
        Ok(())
    }
}

/// Applies the XOR keystream to bytes, most significant bit first.
///
/// # Errors
///
/// Returns [`ProtocolError::EmptyKey`] when `key` is empty.
pub fn transform_bytes(message: &mut [u8], key: &[Bit]) -> Result<()> {
    let mut bits = bits_from_bytes(message);
    XorCipher.transform(&mut bits, key)?;
    message.copy_from_slice(&bytes_from_bits(&bits));
    Ok(())
}

/// SHA-256 fingerprint of a key, as lowercase hex.
///
/// The key length is hashed along with the packed bits, so keys that differ
/// only in trailing zero bits still get distinct fingerprints.
#[must_use]
pub fn key_fingerprint(key: &[Bit]) -> String {
    let mut hasher = Sha256::new();
    hasher.update((key.len() as u64).to_be_bytes());
    hasher.update(bytes_from_bits(key));
    format!("{:x}", hasher.finalize())
}
