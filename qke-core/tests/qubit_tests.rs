#![allow(missing_docs)]
use qke_core::{Basis, Bit, Entropy, Qubit};

const BASES: [Basis; 2] = [Basis::Rectilinear, Basis::Diagonal];
const VALUES: [Bit; 2] = [Bit::Zero, Bit::One];

#[test]
fn test_same_basis_measurement_keeps_value() {
    let mut entropy = Entropy::seeded(1);
    for value in VALUES {
        for basis in BASES {
            let mut qubit = Qubit::new(value, basis);
            for _ in 0..10 {
                assert_eq!(qubit.measure(basis, &mut entropy), value);
            }
            assert_eq!(qubit.value(), value);
            assert_eq!(qubit.basis(), basis);
        }
    }
}

#[test]
fn test_same_basis_measurement_many_random_qubits() {
    let mut entropy = Entropy::seeded(10_000);
    for _ in 0..10_000 {
        let value = entropy.bit();
        let basis = entropy.basis();
        let mut qubit = Qubit::new(value, basis);
        assert_eq!(qubit.measure(qubit.basis(), &mut entropy), value);
    }
}

#[test]
fn test_cross_basis_measurement_moves_qubit_to_requested_basis() {
    let mut entropy = Entropy::seeded(2);
    let mut qubit = Qubit::new(Bit::One, Basis::Rectilinear);

    let first = qubit.measure(Basis::Diagonal, &mut entropy);

    assert_eq!(qubit.basis(), Basis::Diagonal);
    assert_eq!(qubit.value(), first);
    // Collapsed into the new basis, so measuring there again is stable.
    for _ in 0..10 {
        assert_eq!(qubit.measure(Basis::Diagonal, &mut entropy), first);
    }
}

#[test]
fn test_cross_basis_measurement_is_uniform() {
    let mut entropy = Entropy::seeded(3);
    let trials = 10_000;
    let mut ones = 0;

    for i in 0..trials {
        let basis = BASES[i % 2];
        let mut qubit = Qubit::new(Bit::Zero, basis);
        if qubit.measure(basis.opposite(), &mut entropy).is_one() {
            ones += 1;
        }
    }

    // Expect 5000 +/- 50 (one standard deviation).
    assert!(
        (4_700..=5_300).contains(&ones),
        "cross-basis outcomes not uniform: {ones} ones in {trials} trials"
    );
}

#[test]
fn test_cross_basis_measurement_can_lose_the_prepared_value() {
    let mut entropy = Entropy::seeded(4);
    let flipped = (0..200)
        .filter(|_| {
            let mut qubit = Qubit::new(Bit::One, Basis::Rectilinear);
            qubit.measure(Basis::Diagonal, &mut entropy);
            qubit.measure(Basis::Rectilinear, &mut entropy) == Bit::Zero
        })
        .count();

    assert!(flipped > 0, "a round trip through the other basis never lost the value");
    assert!(flipped < 200, "a round trip through the other basis always lost the value");
}
