#![allow(missing_docs)]
use qke_core::{Basis, Eavesdropper, Entropy, ProtocolError, Qubit};

fn qubits(entropy: &mut Entropy, count: usize) -> Vec<Qubit> {
    (0..count)
        .map(|_| Qubit::new(entropy.bit(), entropy.basis()))
        .collect()
}

#[test]
fn test_recover_key_before_observe_fails() {
    let mut entropy = Entropy::seeded(1);
    let mut line = qubits(&mut entropy, 8);
    let mut tap = Eavesdropper::new(entropy.fork());
    tap.intercept(&mut line).expect("random bases cover any batch");

    assert_eq!(tap.recover_key(&mut line).unwrap_err(), ProtocolError::NotReconciled);
}

#[test]
fn test_reliable_positions_before_observe_fails() {
    let mut entropy = Entropy::seeded(2);
    let mut line = qubits(&mut entropy, 8);
    let mut tap = Eavesdropper::new(entropy.fork());
    tap.intercept(&mut line).expect("random bases cover any batch");

    assert_eq!(tap.reliable_positions().unwrap_err(), ProtocolError::NotReconciled);
}

#[test]
fn test_observe_rejects_announcements_of_different_lengths() {
    let mut tap = Eavesdropper::new(Entropy::seeded(3));
    let err = tap
        .observe(&[Basis::Rectilinear; 4], &[Basis::Diagonal; 3])
        .unwrap_err();

    assert_eq!(
        err,
        ProtocolError::LengthMismatch {
            what: "receiver announcement",
            expected: 4,
            actual: 3,
        }
    );
    assert_eq!(tap.reliable_positions().unwrap_err(), ProtocolError::NotReconciled);
}

#[test]
fn test_recover_key_rejects_misaligned_qubits() {
    let mut entropy = Entropy::seeded(4);
    let mut line = qubits(&mut entropy, 4);
    let mut tap = Eavesdropper::new(entropy.fork());
    tap.intercept(&mut line).expect("random bases cover any batch");
    tap.observe(&[Basis::Rectilinear; 4], &[Basis::Rectilinear; 4])
        .expect("aligned announcements");

    let err = tap.recover_key(&mut line[..3]).unwrap_err();
    assert!(matches!(
        err,
        ProtocolError::LengthMismatch { expected: 4, actual: 3, .. }
    ));
}

#[test]
fn test_observed_untouched_qubits_are_recovered() {
    let mut entropy = Entropy::seeded(5);
    let bases = vec![Basis::Diagonal; 6];
    let mut line = qubits(&mut entropy, 6);
    let mut tap = Eavesdropper::with_bases(entropy.fork(), bases.clone());
    tap.intercept(&mut line).expect("fixed bases cover the batch");
    tap.observe(&bases, &bases).expect("aligned announcements");

    let recovered = tap.recover_key(&mut line).expect("observed");

    assert_eq!(recovered, tap.intercepted_values());
    assert_eq!(tap.reliable_positions().expect("observed"), vec![true; 6]);
}
