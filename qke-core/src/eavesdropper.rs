// File:    eavesdropper.rs
// Author:  apezoo
// Date:    2026-10-18
//
// Description: Intercept-and-observe attacker that recovers part of the exchanged key.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! An attacker on the physical path.
//!
//! The eavesdropper measures every qubit in a guessed basis before the
//! legitimate receiver does, then listens to the public basis announcements.
//! At each position the legitimate parties keep, it measures the qubit again in
//! the originator's basis. That second measurement only reproduces the
//! originator's bit when the first, physical interception already used the
//! originator's basis. Everywhere else the interception had collapsed the
//! qubit to a random value, so the recovered bit is a coin toss.

use crate::bit::{Basis, Bit};
use crate::entropy::Entropy;
use crate::error::{ProtocolError, Result, ensure_len};
use crate::qubit::Qubit;

/// The two public basis announcements of one exchange.
#[derive(Debug, Clone)]
struct Observation {
    originator_bases: Vec<Basis>,
    receiver_bases: Vec<Basis>,
}

/// An intercept-resend attacker.
#[derive(Debug)]
pub struct Eavesdropper {
    entropy: Entropy,
    planned_bases: Option<Vec<Basis>>,
    interception_bases: Vec<Basis>,
    intercepted_values: Vec<Bit>,
    observation: Option<Observation>,
}

impl Eavesdropper {
    /// An eavesdropper that guesses each interception basis at random.
    #[must_use]
    pub const fn new(entropy: Entropy) -> Self {
        Self {
            entropy,
            planned_bases: None,
            interception_bases: Vec::new(),
            intercepted_values: Vec::new(),
            observation: None,
        }
    }

    /// An eavesdropper that intercepts with a fixed basis sequence.
    ///
    /// The sequence must match the number of qubits it will intercept.
    #[must_use]
    pub const fn with_bases(entropy: Entropy, bases: Vec<Basis>) -> Self {
        Self {
            entropy,
            planned_bases: Some(bases),
            interception_bases: Vec::new(),
            intercepted_values: Vec::new(),
            observation: None,
        }
    }

    /// Measures every qubit in transit, before the legitimate receiver.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::LengthMismatch`] when a fixed basis sequence
    /// does not cover exactly the intercepted qubits.
    pub fn intercept(&mut self, qubits: &mut [Qubit]) -> Result<()> {
        let bases = match &self.planned_bases {
            Some(planned) => {
                ensure_len("eavesdropper bases", qubits.len(), planned.len())?;
                planned.clone()
            }
            None => self.entropy.bases(qubits.len()),
        };

        self.intercepted_values = qubits
            .iter_mut()
            .zip(&bases)
            .map(|(qubit, &basis)| qubit.measure(basis, &mut self.entropy))
            .collect();
        self.interception_bases = bases;
        self.observation = None;
        Ok(())
    }

    /// Records the two public basis announcements.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::LengthMismatch`] when the announcements differ
    /// in length.
    pub fn observe(&mut self, originator_bases: &[Basis], receiver_bases: &[Basis]) -> Result<()> {
        ensure_len(
            "receiver announcement",
            originator_bases.len(),
            receiver_bases.len(),
        )?;
        self.observation = Some(Observation {
            originator_bases: originator_bases.to_vec(),
            receiver_bases: receiver_bases.to_vec(),
        });
        Ok(())
    }

    /// Recovers the key bits at every position the legitimate parties kept.
    ///
    /// Each kept qubit is measured in the originator's announced basis. The
    /// result is derived afresh on every call from the qubits' current state.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::NotReconciled`] before the announcements were
    /// observed, or [`ProtocolError::LengthMismatch`] when `qubits` does not
    /// line up with them.
    pub fn recover_key(&mut self, qubits: &mut [Qubit]) -> Result<Vec<Bit>> {
        let observation = self
            .observation
            .as_ref()
            .ok_or(ProtocolError::NotReconciled)?;
        ensure_len(
            "intercepted qubits",
            observation.originator_bases.len(),
            qubits.len(),
        )?;

        let mut key = Vec::new();
        for ((qubit, &origin), &receiver) in qubits
            .iter_mut()
            .zip(&observation.originator_bases)
            .zip(&observation.receiver_bases)
        {
            if origin == receiver {
                key.push(qubit.measure(origin, &mut self.entropy));
            }
        }
        Ok(key)
    }

    /// For each position of the sifted key, whether the interception basis
    /// matched the originator's basis.
    ///
    /// Recovered bits are guaranteed correct exactly where this is `true`.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::NotReconciled`] before the announcements were
    /// observed.
    pub fn reliable_positions(&self) -> Result<Vec<bool>> {
        let observation = self
            .observation
            .as_ref()
            .ok_or(ProtocolError::NotReconciled)?;
        ensure_len(
            "interception bases",
            observation.originator_bases.len(),
            self.interception_bases.len(),
        )?;

        Ok(observation
            .originator_bases
            .iter()
            .zip(&observation.receiver_bases)
            .zip(&self.interception_bases)
            .filter(|((origin, receiver), _)| origin == receiver)
            .map(|((origin, _), intercepted)| origin == intercepted)
            .collect())
    }

    /// The bases used at interception.
    #[must_use]
    pub fn interception_bases(&self) -> &[Basis] {
        &self.interception_bases
    }

    /// The values read at interception.
    #[must_use]
    pub fn intercepted_values(&self) -> &[Bit] {
        &self.intercepted_values
    }
}
