// File:    reconcile.rs
// Author:  apezoo
// Date:    2026-10-18
//
// Description: Sifting step that keeps the bits whose bases agree.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

use crate::bit::{Basis, Bit};
use crate::error::{Result, ensure_len};

/// Derives a shared key from two basis sequences and one value sequence.
///
/// Keeps `values[i]` for every index where `bases_a[i] == bases_b[i]`, in index
/// order. Both parties run this over the same announcements and so keep the
/// same positions.
///
/// # Errors
///
/// Returns [`crate::ProtocolError::LengthMismatch`] unless all three sequences
/// have the same length.
pub fn reconcile(bases_a: &[Basis], bases_b: &[Basis], values: &[Bit]) -> Result<Vec<Bit>> {
    ensure_len("peer bases", bases_a.len(), bases_b.len())?;
    ensure_len("values", bases_a.len(), values.len())?;

    Ok(bases_a
        .iter()
        .zip(bases_b)
        .zip(values)
        .filter(|((a, b), _)| a == b)
        .map(|(_, &value)| value)
        .collect())
}

/// Counts the indices where two basis sequences agree.
///
/// # Errors
///
/// Returns [`crate::ProtocolError::LengthMismatch`] when the lengths differ.
pub fn agreement_count(bases_a: &[Basis], bases_b: &[Basis]) -> Result<usize> {
    ensure_len("peer bases", bases_a.len(), bases_b.len())?;
    Ok(bases_a.iter().zip(bases_b).filter(|(a, b)| a == b).count())
}
