// File:    bit.rs
// Author:  apezoo
// Date:    2026-10-18
//
// Description: Two-state symbols carried by qubits: bit values and measurement bases.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! Bit values, measurement bases and helpers for rendering bit sequences.

use crate::error::{ProtocolError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitXor, BitXorAssign};

/// A classical bit value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bit {
    /// The value 0.
    Zero,
    /// The value 1.
    One,
}

impl Bit {
    /// Returns `true` for [`Bit::One`].
    #[must_use]
    pub const fn is_one(self) -> bool {
        matches!(self, Self::One)
    }
}

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        if value { Self::One } else { Self::Zero }
    }
}

impl From<Bit> for bool {
    fn from(bit: Bit) -> Self {
        bit.is_one()
    }
}

impl TryFrom<char> for Bit {
    type Error = ProtocolError;

    fn try_from(c: char) -> Result<Self> {
        match c {
            '0' => Ok(Self::Zero),
            '1' => Ok(Self::One),
            other => Err(ProtocolError::InvalidBit(other)),
        }
    }
}

impl BitXor for Bit {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        Self::from(self.is_one() ^ rhs.is_one())
    }
}

impl BitXorAssign for Bit {
    fn bitxor_assign(&mut self, rhs: Self) {
        *self = *self ^ rhs;
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(if self.is_one() { "1" } else { "0" })
    }
}

/// One of the two measurement frames ("polarizations").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Basis {
    /// The `+` frame.
    Rectilinear,
    /// The `x` frame.
    Diagonal,
}

impl Basis {
    /// The other basis.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Rectilinear => Self::Diagonal,
            Self::Diagonal => Self::Rectilinear,
        }
    }
}

impl From<bool> for Basis {
    fn from(value: bool) -> Self {
        if value {
            Self::Diagonal
        } else {
            Self::Rectilinear
        }
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Rectilinear => "+",
            Self::Diagonal => "x",
        })
    }
}

/// Renders a bit sequence as a string of `'0'`/`'1'` characters.
#[must_use]
pub fn to_bit_string(bits: &[Bit]) -> String {
    bits.iter().map(ToString::to_string).collect()
}

/// Parses a string of `'0'`/`'1'` characters. Whitespace is ignored.
///
/// # Errors
///
/// Returns [`ProtocolError::InvalidBit`] for any other character.
pub fn parse_bits(s: &str) -> Result<Vec<Bit>> {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .map(Bit::try_from)
        .collect()
}

/// Unpacks bytes into bits, most significant bit first.
#[must_use]
pub fn bits_from_bytes(bytes: &[u8]) -> Vec<Bit> {
    bytes
        .iter()
        .flat_map(|&byte| (0..8).rev().map(move |shift| Bit::from(((byte >> shift) & 1) == 1)))
        .collect()
}

/// Packs bits into bytes, most significant bit first.
///
/// A trailing partial byte is padded with zero bits.
#[must_use]
pub fn bytes_from_bits(bits: &[Bit]) -> Vec<u8> {
    bits.chunks(8)
        .map(|chunk| {
            chunk
                .iter()
                .enumerate()
                .fold(0u8, |acc, (i, bit)| acc | (u8::from(bit.is_one()) << (7 - i)))
        })
        .collect()
}

/// Serde adapter storing a `Vec<Bit>` as a `'0'/'1'` string.
pub mod as_bit_string {
    use super::{Bit, parse_bits, to_bit_string};
    use serde::{Deserialize, Deserializer, Serializer, de};

    /// Serializes the bits as a string.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(bits: &[Bit], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&to_bit_string(bits))
    }

    /// Parses the bits back from a string.
    ///
    /// # Errors
    ///
    /// Fails on characters other than `'0'` and `'1'`.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Bit>, D::Error> {
        let s = String::deserialize(deserializer)?;
        parse_bits(&s).map_err(de::Error::custom)
    }
}
