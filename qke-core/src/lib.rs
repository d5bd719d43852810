// File:    lib.rs
// Author:  apezoo
// Date:    2026-10-18
//
// Description: The main library crate for qke-core, simulating BB84-style quantum key exchange.
//
// License:
// This project is licensed under the terms of the GNU AGPLv3 license.
// See the LICENSE.md file in the project root for full license information.

//! # QKE Core Library
//!
//! This library simulates a simplified BB84 quantum key exchange between two
//! endpoints, an intercept-resend eavesdropper, and an XOR stream cipher keyed
//! by the exchanged bits. All randomness flows through a seedable [`Entropy`].

/// Bit values, measurement bases and bit-string helpers.
pub mod bit;
/// Transport abstraction between endpoints.
pub mod channel;
/// XOR stream cipher and key fingerprints.
pub mod cipher;
/// Intercept-resend attacker.
pub mod eavesdropper;
/// Protocol parties.
pub mod endpoint;
/// Seedable randomness provider.
pub mod entropy;
/// Protocol error type.
pub mod error;
/// Orchestrated exchange runs.
pub mod exchange;
/// Simulated qubits.
pub mod qubit;
/// Key sifting.
pub mod reconcile;
/// Exchange reports.
pub mod report;

pub use bit::{Basis, Bit};
pub use channel::{Ack, Channel, TappedLine};
pub use cipher::{StreamCipher, XorCipher};
pub use eavesdropper::Eavesdropper;
pub use endpoint::Endpoint;
pub use entropy::Entropy;
pub use error::{ProtocolError, Result};
pub use exchange::{Exchange, ExchangeConfig};
pub use qubit::Qubit;
pub use reconcile::reconcile;
pub use report::{EavesdropperReport, ExchangeReport};
