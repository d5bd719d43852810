// File:    endpoint.rs
// Author:  apezoo
// Date:    2026-10-18
//
// Description: A key exchange party that originates or receives qubits and reconciles bases.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

use crate::bit::{Basis, Bit};
use crate::channel::{Ack, Channel};
use crate::entropy::Entropy;
use crate::error::{ProtocolError, Result};
use crate::qubit::Qubit;
use crate::reconcile::reconcile;
use log::debug;

/// Per-exchange state. Replaced wholesale whenever a new session starts.
#[derive(Debug, Default)]
struct Session {
    bases: Vec<Basis>,
    values: Vec<Bit>,
    peer_bases: Option<Vec<Basis>>,
    key: Option<Vec<Bit>>,
    received: Vec<Qubit>,
}

/// One party of the key exchange.
#[derive(Debug)]
pub struct Endpoint {
    entropy: Entropy,
    session: Session,
}

impl Endpoint {
    /// Creates an endpoint drawing all of its randomness from `entropy`.
    #[must_use]
    pub fn new(entropy: Entropy) -> Self {
        Self {
            entropy,
            session: Session::default(),
        }
    }

    /// Starts a session as the originator and prepares `qubit_count` qubits.
    ///
    /// Bases and values are drawn independently and uniformly at random.
    pub fn prepare(&mut self, qubit_count: usize) -> Vec<Qubit> {
        let bases = self.entropy.bases(qubit_count);
        let values = self.entropy.bits(qubit_count);
        let qubits = values
            .iter()
            .zip(&bases)
            .map(|(&value, &basis)| Qubit::new(value, basis))
            .collect();

        self.session = Session {
            bases,
            values,
            ..Session::default()
        };
        qubits
    }

    /// Runs a full exchange as the originator over `channel`.
    ///
    /// The qubits go out first. Only after the far end has measured them and
    /// acknowledged with its own bases are this endpoint's bases announced.
    ///
    /// # Errors
    ///
    /// Propagates any consistency fault raised by the channel or by
    /// reconciliation.
    pub fn originate<C: Channel + ?Sized>(
        &mut self,
        qubit_count: usize,
        channel: &mut C,
    ) -> Result<()> {
        let qubits = self.prepare(qubit_count);
        let ack = channel.send(qubits)?;
        self.record_peer_bases(ack.bases)?;
        channel.announce_bases(&self.session.bases)
    }

    /// Starts a session as the receiver and measures every incoming qubit.
    ///
    /// Each qubit is measured in a freshly drawn random basis. The endpoint
    /// keeps the qubits and returns its bases as the acknowledgement that
    /// travels back to the origin.
    pub fn receive(&mut self, mut qubits: Vec<Qubit>) -> Ack {
        let bases = self.entropy.bases(qubits.len());
        let values = qubits
            .iter_mut()
            .zip(&bases)
            .map(|(qubit, &basis)| qubit.measure(basis, &mut self.entropy))
            .collect();

        self.session = Session {
            bases: bases.clone(),
            values,
            received: qubits,
            ..Session::default()
        };
        Ack { bases }
    }

    /// Stores the peer's announced bases and derives the shared key.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::AlreadyReconciled`] on a second announcement
    /// in the same session, or [`ProtocolError::LengthMismatch`] when the
    /// announcement does not line up with this endpoint's own bases.
    pub fn record_peer_bases(&mut self, bases: Vec<Basis>) -> Result<()> {
        if self.session.peer_bases.is_some() {
            return Err(ProtocolError::AlreadyReconciled);
        }
        let key = reconcile(&self.session.bases, &bases, &self.session.values)?;
        debug!(
            "Reconciled {} of {} positions into the key.",
            key.len(),
            bases.len()
        );
        self.session.peer_bases = Some(bases);
        self.session.key = Some(key);
        Ok(())
    }

    /// The reconciled key, once the peer's bases are known.
    #[must_use]
    pub fn key(&self) -> Option<&[Bit]> {
        self.session.key.as_deref()
    }

    /// The reconciled key.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::NotReconciled`] before the peer's bases arrive.
    pub fn require_key(&self) -> Result<&[Bit]> {
        self.key().ok_or(ProtocolError::NotReconciled)
    }

    /// This endpoint's bases for the current session.
    #[must_use]
    pub fn bases(&self) -> &[Basis] {
        &self.session.bases
    }

    /// The generated (originator) or measured (receiver) values.
    #[must_use]
    pub fn values(&self) -> &[Bit] {
        &self.session.values
    }

    /// The bases the peer announced, if any.
    #[must_use]
    pub fn peer_bases(&self) -> Option<&[Basis]> {
        self.session.peer_bases.as_deref()
    }

    /// The qubits this endpoint holds after receiving them.
    #[must_use]
    pub fn received_qubits(&self) -> &[Qubit] {
        &self.session.received
    }

    /// Physical access to the received qubits.
    ///
    /// Anyone on the physical path can measure these again; the eavesdropper
    /// uses this to recover key bits after the announcements.
    pub fn received_qubits_mut(&mut self) -> &mut [Qubit] {
        &mut self.session.received
    }
}

impl Channel for Endpoint {
    fn send(&mut self, qubits: Vec<Qubit>) -> Result<Ack> {
        Ok(self.receive(qubits))
    }

    fn announce_bases(&mut self, bases: &[Basis]) -> Result<()> {
        self.record_peer_bases(bases.to_vec())
    }
}
