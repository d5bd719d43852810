// File:    qubit.rs
// Author:  apezoo
// Date:    2026-10-18
//
// Description: Two-basis, two-value qubit abstraction with collapsing measurement.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

use crate::bit::{Basis, Bit};
use crate::entropy::Entropy;
use log::trace;

/// A simulated quantum bit: a value prepared in a basis.
///
/// Not `Clone`: a qubit has exactly one holder at a time, and measuring it is
/// the only way its state changes.
#[derive(Debug, PartialEq, Eq)]
pub struct Qubit {
    value: Bit,
    basis: Basis,
}

impl Qubit {
    /// Prepares a qubit holding `value` in `basis`.
    #[must_use]
    pub const fn new(value: Bit, basis: Basis) -> Self {
        Self { value, basis }
    }

    /// Measures the qubit in `basis`.
    ///
    /// Measuring in the basis the qubit currently holds returns its value and
    /// leaves it untouched. Measuring in the other basis collapses it: the
    /// qubit moves to `basis` and takes a fresh uniformly random value drawn
    /// from `entropy`, which is returned. The previous value is lost.
    pub fn measure(&mut self, basis: Basis, entropy: &mut Entropy) -> Bit {
        if self.basis != basis {
            let collapsed = entropy.bit();
            trace!(
                "qubit collapsed {}/{} -> {}/{}",
                self.value, self.basis, collapsed, basis
            );
            self.basis = basis;
            self.value = collapsed;
        }
        self.value
    }

    /// The value currently held.
    #[must_use]
    pub const fn value(&self) -> Bit {
        self.value
    }

    /// The basis the qubit is currently prepared in.
    #[must_use]
    pub const fn basis(&self) -> Basis {
        self.basis
    }
}
