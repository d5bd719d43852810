// File:    channel.rs
// Author:  apezoo
// Date:    2026-10-18
//
// Description: Transport abstraction between endpoints, plus a line that can carry a wiretap.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! The two messages a transport has to carry: the qubit batch and the basis
//! announcement. Calls are synchronous; each completes before the next begins.

use crate::bit::Basis;
use crate::eavesdropper::Eavesdropper;
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::qubit::Qubit;
use log::debug;

/// Acknowledgement for a delivered qubit batch.
///
/// Carries the receiver's basis announcement back to the origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    /// The bases the receiver measured in.
    pub bases: Vec<Basis>,
}

/// Carries protocol traffic to the far endpoint.
pub trait Channel {
    /// Hands the qubits over and waits for the far end to measure them.
    ///
    /// # Errors
    ///
    /// Implementations surface consistency faults from whatever sits on the line.
    fn send(&mut self, qubits: Vec<Qubit>) -> Result<Ack>;

    /// Delivers the sender's basis announcement.
    ///
    /// # Errors
    ///
    /// Propagates the far end's reconciliation faults.
    fn announce_bases(&mut self, bases: &[Basis]) -> Result<()>;
}

/// A line to a receiving endpoint with an optional eavesdropper spliced in.
///
/// The tap always touches the qubits before the receiver does, and sees both
/// basis announcements.
#[derive(Debug)]
pub struct TappedLine<'a> {
    receiver: &'a mut Endpoint,
    tap: Option<&'a mut Eavesdropper>,
    receiver_announcement: Option<Vec<Basis>>,
}

impl<'a> TappedLine<'a> {
    /// A line with no tap.
    #[must_use]
    pub const fn direct(receiver: &'a mut Endpoint) -> Self {
        Self {
            receiver,
            tap: None,
            receiver_announcement: None,
        }
    }

    /// A line with `tap` sitting between the origin and `receiver`.
    #[must_use]
    pub const fn tapped(receiver: &'a mut Endpoint, tap: Option<&'a mut Eavesdropper>) -> Self {
        Self {
            receiver,
            tap,
            receiver_announcement: None,
        }
    }
}

impl Channel for TappedLine<'_> {
    fn send(&mut self, mut qubits: Vec<Qubit>) -> Result<Ack> {
        if let Some(tap) = self.tap.as_deref_mut() {
            tap.intercept(&mut qubits)?;
            debug!("Eavesdropper intercepted {} qubits.", qubits.len());
        }
        let ack = self.receiver.receive(qubits);
        self.receiver_announcement = Some(ack.bases.clone());
        Ok(ack)
    }

    fn announce_bases(&mut self, bases: &[Basis]) -> Result<()> {
        if let Some(tap) = self.tap.as_deref_mut() {
            let receiver_bases = self.receiver_announcement.as_deref().unwrap_or_default();
            tap.observe(bases, receiver_bases)?;
        }
        self.receiver.record_peer_bases(bases.to_vec())
    }
}
