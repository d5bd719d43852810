use crate::bit::{Basis, Bit, as_bit_string};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use uuid::Uuid;

/// What the eavesdropper got out of an exchange.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EavesdropperReport {
    /// The key recovered from the intercepted qubits.
    #[serde(with = "as_bit_string")]
    pub recovered_key: Vec<Bit>,
    /// Sifted positions where the interception basis matched the originator's.
    pub reliable_positions: usize,
    /// Positions where the recovered key equals the originator's key.
    pub agreement: usize,
    /// `agreement` as a fraction of the sifted length.
    pub agreement_rate: f64,
    /// The bases the eavesdropper measured in at interception, one per qubit.
    pub interception_bases: Vec<Basis>,
}

/// Outcome of one exchange run.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExchangeReport {
    /// Identifier of the session.
    pub session_id: Uuid,
    /// Seed the run was derived from, if it was seeded.
    pub seed: Option<u64>,
    /// Number of qubits sent.
    pub qubit_count: usize,
    /// The originator's reconciled key.
    #[serde(with = "as_bit_string")]
    pub originator_key: Vec<Bit>,
    /// The receiver's reconciled key.
    #[serde(with = "as_bit_string")]
    pub receiver_key: Vec<Bit>,
    /// Number of positions kept by sifting.
    pub sifted_length: usize,
    /// Positions where the two legitimate keys disagree.
    pub mismatches: usize,
    /// `mismatches` as a fraction of the sifted length (0 for an empty key).
    pub error_rate: f64,
    /// Whether the error rate exceeded the configured threshold.
    pub eavesdropping_suspected: bool,
    /// SHA-256 fingerprint of the originator's key.
    pub originator_fingerprint: String,
    /// SHA-256 fingerprint of the receiver's key.
    pub receiver_fingerprint: String,
    /// Present when an eavesdropper sat on the line.
    pub eavesdropper: Option<EavesdropperReport>,
}

impl ExchangeReport {
    /// Whether both legitimate parties ended up with the same key.
    #[must_use]
    pub fn keys_match(&self) -> bool {
        self.originator_key == self.receiver_key
    }

    /// Writes the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the report cannot be serialized or the file cannot
    /// be written.
    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let report_str = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        fs::write(path, report_str)
    }

    /// Loads a report previously written by [`ExchangeReport::save`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> std::io::Result<Self> {
        let report_str = fs::read_to_string(path)?;
        serde_json::from_str(&report_str).map_err(std::io::Error::other)
    }
}

/// Counts the positions where two equally long keys differ.
pub(crate) fn mismatch_count(a: &[Bit], b: &[Bit]) -> usize {
    a.iter().zip(b).filter(|(x, y)| x != y).count()
}

/// `part / whole`, or 0 when `whole` is 0.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
