// File:    error.rs
// Author:  apezoo
// Date:    2026-10-18
//
// Description: Error type shared by the key exchange, reconciliation and cipher operations.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

use thiserror::Error;

/// Internal-consistency faults raised by the protocol model.
///
/// None of these are expected during a well-formed run. They mark a caller
/// that handed the protocol inconsistent input, so there is nothing to retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Two sequences that must line up index-for-index have different lengths.
    #[error("{what}: expected length {expected}, got {actual}")]
    LengthMismatch {
        /// Which sequence was rejected.
        what: &'static str,
        /// Length of the reference sequence.
        expected: usize,
        /// Length of the offending sequence.
        actual: usize,
    },

    /// A second basis announcement arrived for a session that already has a key.
    #[error("peer bases were already recorded for this session")]
    AlreadyReconciled,

    /// A key was requested before the peer's bases were announced.
    #[error("session has not been reconciled yet")]
    NotReconciled,

    /// The stream cipher was handed a zero-length key.
    #[error("key must contain at least one bit")]
    EmptyKey,

    /// A bit string contained something other than '0' or '1'.
    #[error("invalid bit character {0:?}")]
    InvalidBit(char),

    /// An exchange was asked to run a second time.
    #[error("exchange has already been run; start a new one")]
    ExchangeAlreadyRun,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ProtocolError>;

/// Fails with [`ProtocolError::LengthMismatch`] unless `actual == expected`.
pub(crate) const fn ensure_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(ProtocolError::LengthMismatch {
            what,
            expected,
            actual,
        })
    }
}
