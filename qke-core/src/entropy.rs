// File:    entropy.rs
// Author:  apezoo
// Date:    2026-10-18
//
// Description: Seedable randomness provider injected into every party of an exchange.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! The single source of nondeterminism in the crate.
//!
//! Every random basis choice, random bit value and measurement collapse draws
//! from an [`Entropy`] owned by the party performing it. Given the same seed, a
//! run is reproduced exactly.

use crate::bit::{Basis, Bit};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// A seedable random generator.
#[derive(Debug, Clone)]
pub struct Entropy {
    rng: StdRng,
}

impl Entropy {
    /// Creates a deterministic generator from a seed.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a generator seeded from the operating system.
    #[must_use]
    pub fn from_os() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Derives an independent child generator.
    ///
    /// Forking advances this generator, so the sequence of children is itself
    /// reproducible from the parent's seed.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        Self::seeded(self.rng.next_u64())
    }

    /// Draws a uniformly random bit.
    pub fn bit(&mut self) -> Bit {
        Bit::from(self.rng.random_bool(0.5))
    }

    /// Draws a uniformly random basis.
    pub fn basis(&mut self) -> Basis {
        Basis::from(self.rng.random_bool(0.5))
    }

    /// Draws `count` independent random bits.
    pub fn bits(&mut self, count: usize) -> Vec<Bit> {
        (0..count).map(|_| self.bit()).collect()
    }

    /// Draws `count` independent random bases.
    pub fn bases(&mut self, count: usize) -> Vec<Basis> {
        (0..count).map(|_| self.basis()).collect()
    }

    /// Fills `buffer` with random bytes.
    pub fn fill_bytes(&mut self, buffer: &mut [u8]) {
        self.rng.fill_bytes(buffer);
    }
}
