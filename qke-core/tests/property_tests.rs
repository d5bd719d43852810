#![allow(missing_docs)]
//! Property-based tests for sifting, the cipher and the exchange protocol.

use proptest::prelude::*;
use qke_core::reconcile::agreement_count;
use qke_core::{Basis, Bit, Exchange, ExchangeConfig, StreamCipher, XorCipher, reconcile};

fn bits(max_len: usize) -> impl Strategy<Value = Vec<Bit>> {
    prop::collection::vec(any::<bool>().prop_map(Bit::from), 0..max_len)
}

fn aligned_inputs() -> impl Strategy<Value = (Vec<Basis>, Vec<Basis>, Vec<Bit>)> {
    prop::collection::vec(any::<(bool, bool, bool)>(), 0..128).prop_map(|rows| {
        let mut bases_a = Vec::with_capacity(rows.len());
        let mut bases_b = Vec::with_capacity(rows.len());
        let mut values = Vec::with_capacity(rows.len());
        for (a, b, v) in rows {
            bases_a.push(Basis::from(a));
            bases_b.push(Basis::from(b));
            values.push(Bit::from(v));
        }
        (bases_a, bases_b, values)
    })
}

proptest! {
    #[test]
    fn prop_reconciled_length_is_agreement_count((bases_a, bases_b, values) in aligned_inputs()) {
        let key = reconcile(&bases_a, &bases_b, &values).expect("aligned inputs");

        prop_assert_eq!(key.len(), agreement_count(&bases_a, &bases_b).expect("aligned inputs"));

        let expected: Vec<Bit> = (0..values.len())
            .filter(|&i| bases_a[i] == bases_b[i])
            .map(|i| values[i])
            .collect();
        prop_assert_eq!(key, expected);
    }

    #[test]
    fn prop_cipher_is_an_involution(message in bits(256), key in bits(64)) {
        prop_assume!(!key.is_empty());

        let mut transformed = message.clone();
        XorCipher.transform(&mut transformed, &key).expect("non-empty key");
        XorCipher.transform(&mut transformed, &key).expect("non-empty key");

        prop_assert_eq!(transformed, message);
    }

    #[test]
    fn prop_untapped_exchange_always_agrees(seed in any::<u64>(), qubits in 0usize..300) {
        let report = Exchange::new(ExchangeConfig::new(qubits).with_seed(seed))
            .run()
            .expect("exchange succeeds");

        prop_assert!(report.keys_match());
        prop_assert!(report.sifted_length <= qubits);
        prop_assert_eq!(report.mismatches, 0);
    }

    #[test]
    fn prop_recovered_key_has_sifted_length(seed in any::<u64>(), qubits in 0usize..300) {
        let report = Exchange::new(ExchangeConfig::new(qubits).with_seed(seed).with_eavesdropper())
            .run()
            .expect("exchange succeeds");
        let tap = report.eavesdropper.expect("eavesdropper on the line");

        prop_assert_eq!(tap.recovered_key.len(), report.sifted_length);
        prop_assert!(tap.reliable_positions <= tap.agreement);
    }
}
