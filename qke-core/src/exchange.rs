// File:    exchange.rs
// Author:  apezoo
// Date:    2026-10-18
//
// Description: Orchestrates one complete key exchange, optionally with an eavesdropper on the line.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! A single orchestrated exchange run.
//!
//! The run owns both endpoints and, optionally, an eavesdropper. Its steps are
//! fixed: the originator prepares and sends its qubits, the eavesdropper (if
//! any) measures them, the receiver measures them, both announcements are
//! exchanged and observed, and finally the eavesdropper recovers what it can.

use crate::bit::Basis;
use crate::channel::TappedLine;
use crate::cipher::key_fingerprint;
use crate::eavesdropper::Eavesdropper;
use crate::endpoint::Endpoint;
use crate::entropy::Entropy;
use crate::error::{ProtocolError, Result};
use crate::report::{EavesdropperReport, ExchangeReport, mismatch_count, ratio};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use uuid::{Builder, Uuid};

/// Error rate above which eavesdropping is suspected.
pub const DEFAULT_ERROR_THRESHOLD: f64 = 0.11;

/// Number of qubits exchanged when nothing else is configured.
pub const DEFAULT_QUBIT_COUNT: usize = 16;

/// Parameters of one exchange run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExchangeConfig {
    /// Number of qubits the originator sends.
    pub qubit_count: usize,
    /// Seed for a reproducible run. Unseeded runs draw from the OS.
    pub seed: Option<u64>,
    /// Whether an eavesdropper sits on the line.
    pub eavesdropper: bool,
    /// Fixed interception bases for the eavesdropper.
    pub eavesdropper_bases: Option<Vec<Basis>>,
    /// Error rate above which the report flags eavesdropping.
    pub error_threshold: f64,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            qubit_count: DEFAULT_QUBIT_COUNT,
            seed: None,
            eavesdropper: false,
            eavesdropper_bases: None,
            error_threshold: DEFAULT_ERROR_THRESHOLD,
        }
    }
}

impl ExchangeConfig {
    /// A configuration exchanging `qubit_count` qubits.
    #[must_use]
    pub fn new(qubit_count: usize) -> Self {
        Self {
            qubit_count,
            ..Self::default()
        }
    }

    /// Makes the run reproducible from `seed`.
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Puts an eavesdropper with random interception bases on the line.
    #[must_use]
    pub const fn with_eavesdropper(mut self) -> Self {
        self.eavesdropper = true;
        self
    }

    /// Puts an eavesdropper with fixed interception bases on the line.
    #[must_use]
    pub fn with_eavesdropper_bases(mut self, bases: Vec<Basis>) -> Self {
        self.eavesdropper = true;
        self.eavesdropper_bases = Some(bases);
        self
    }

    /// Sets the error rate above which eavesdropping is flagged.
    #[must_use]
    pub const fn with_error_threshold(mut self, threshold: f64) -> Self {
        self.error_threshold = threshold;
        self
    }
}

/// One exchange between an originator and a receiver.
#[derive(Debug)]
pub struct Exchange {
    config: ExchangeConfig,
    session_id: Uuid,
    originator: Endpoint,
    receiver: Endpoint,
    eavesdropper: Option<Eavesdropper>,
    completed: bool,
}

impl Exchange {
    /// Sets up the parties for a run.
    ///
    /// Each party gets its own generator forked from the run's entropy. The
    /// eavesdropper is forked last, so for a given seed the legitimate parties
    /// behave identically with or without it.
    #[must_use]
    pub fn new(config: ExchangeConfig) -> Self {
        let mut entropy = config.seed.map_or_else(Entropy::from_os, Entropy::seeded);

        let mut id_bytes = [0u8; 16];
        entropy.fill_bytes(&mut id_bytes);
        let session_id = Builder::from_random_bytes(id_bytes).into_uuid();

        let originator = Endpoint::new(entropy.fork());
        let receiver = Endpoint::new(entropy.fork());
        let eavesdropper = config.eavesdropper.then(|| {
            let tap_entropy = entropy.fork();
            match &config.eavesdropper_bases {
                Some(bases) => Eavesdropper::with_bases(tap_entropy, bases.clone()),
                None => Eavesdropper::new(tap_entropy),
            }
        });

        Self {
            config,
            session_id,
            originator,
            receiver,
            eavesdropper,
            completed: false,
        }
    }

    /// Runs the exchange and summarizes it.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::ExchangeAlreadyRun`] on a second call, and
    /// propagates consistency faults such as a fixed eavesdropper basis
    /// sequence of the wrong length.
    pub fn run(&mut self) -> Result<ExchangeReport> {
        if self.completed {
            return Err(ProtocolError::ExchangeAlreadyRun);
        }
        self.completed = true;

        let qubit_count = self.config.qubit_count;
        info!(
            "Session {}: exchanging {qubit_count} qubits ({}).",
            self.session_id,
            if self.eavesdropper.is_some() {
                "tapped line"
            } else {
                "direct line"
            }
        );

        let mut line = TappedLine::tapped(&mut self.receiver, self.eavesdropper.as_mut());
        self.originator.originate(qubit_count, &mut line)?;

        let recovered = match self.eavesdropper.as_mut() {
            Some(tap) => Some((
                tap.recover_key(self.receiver.received_qubits_mut())?,
                tap.reliable_positions()?,
                tap.interception_bases().to_vec(),
            )),
            None => None,
        };

        let originator_key = self.originator.require_key()?.to_vec();
        let receiver_key = self.receiver.require_key()?.to_vec();
        let sifted_length = originator_key.len();
        let mismatches = mismatch_count(&originator_key, &receiver_key);
        let error_rate = ratio(mismatches, sifted_length);
        let eavesdropping_suspected = error_rate > self.config.error_threshold;

        debug!(
            "Session {}: sifted {sifted_length} of {qubit_count} positions, {mismatches} mismatches.",
            self.session_id
        );
        if eavesdropping_suspected {
            warn!(
                "Session {}: error rate {:.1}% exceeds threshold {:.1}%; line may be tapped.",
                self.session_id,
                error_rate * 100.0,
                self.config.error_threshold * 100.0
            );
        }

        let eavesdropper = recovered.map(|(recovered_key, reliable, interception_bases)| {
            let agreement = recovered_key
                .iter()
                .zip(&originator_key)
                .filter(|(x, y)| x == y)
                .count();
            debug!(
                "Session {}: eavesdropper agrees on {agreement} of {sifted_length} key bits.",
                self.session_id
            );
            EavesdropperReport {
                reliable_positions: reliable.iter().filter(|&&r| r).count(),
                agreement,
                agreement_rate: ratio(agreement, sifted_length),
                recovered_key,
                interception_bases,
            }
        });

        info!("Session {} complete.", self.session_id);
        Ok(ExchangeReport {
            session_id: self.session_id,
            seed: self.config.seed,
            qubit_count,
            originator_fingerprint: key_fingerprint(&originator_key),
            receiver_fingerprint: key_fingerprint(&receiver_key),
            originator_key,
            receiver_key,
            sifted_length,
            mismatches,
            error_rate,
            eavesdropping_suspected,
            eavesdropper,
        })
    }

    /// The session identifier.
    #[must_use]
    pub const fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// The configuration this exchange was built from.
    #[must_use]
    pub const fn config(&self) -> &ExchangeConfig {
        &self.config
    }

    /// The originating endpoint.
    #[must_use]
    pub const fn originator(&self) -> &Endpoint {
        &self.originator
    }

    /// The receiving endpoint.
    #[must_use]
    pub const fn receiver(&self) -> &Endpoint {
        &self.receiver
    }

    /// The eavesdropper, when one is on the line.
    #[must_use]
    pub const fn eavesdropper(&self) -> Option<&Eavesdropper> {
        self.eavesdropper.as_ref()
    }
}
