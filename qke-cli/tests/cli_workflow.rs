#![allow(missing_docs)]
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn qke_cli() -> Command {
    Command::new(env!("CARGO_BIN_EXE_qke-cli"))
}

#[test]
fn test_exchange_prints_matching_keys() {
    qke_cli()
        .arg("exchange")
        .arg("--qubits")
        .arg("256")
        .arg("--seed")
        .arg("42")
        .assert()
        .success()
        .stdout(predicate::str::contains("Qubits sent: 256"))
        .stdout(predicate::str::contains("Keys match: yes"))
        .stdout(predicate::str::contains("Eavesdropping suspected: no"))
        .stdout(predicate::str::contains("Eavesdropper key").not());
}

#[test]
fn test_exchange_is_reproducible_with_seed() {
    let run = || {
        qke_cli()
            .args(["exchange", "--qubits", "64", "--seed", "5"])
            .output()
            .expect("Failed to run qke-cli")
    };
    let first = run();
    let second = run();

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_exchange_with_eavesdropper_is_detected() {
    qke_cli()
        .args(["exchange", "--qubits", "1024", "--seed", "9", "--eavesdrop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Keys match: no"))
        .stdout(predicate::str::contains("Eavesdropping suspected: yes"))
        .stdout(predicate::str::contains("Eavesdropper key = "));
}

#[test]
fn test_exchange_writes_report() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let report_path = temp_dir.path().join("report.json");

    qke_cli()
        .args(["exchange", "--qubits", "128", "--seed", "3", "--eavesdrop"])
        .arg("--report")
        .arg(&report_path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Report saved to"));

    let report_str = fs::read_to_string(&report_path).expect("Failed to read report");
    let report: serde_json::Value = serde_json::from_str(&report_str).expect("Report is not JSON");
    assert_eq!(report["qubit_count"].as_u64(), Some(128));
    assert_eq!(report["seed"].as_u64(), Some(3));
    assert!(report["eavesdropper"]["recovered_key"].is_string());
}

#[test]
fn test_attack_with_default_message() {
    qke_cli()
        .args(["attack", "--qubits", "64", "--seed", "11"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Man in the middle scenario:"))
        .stdout(predicate::str::contains(
            "Message = 01010101010101010101010101010101010101010101010101",
        ))
        .stdout(predicate::str::contains("QKE key = "))
        .stdout(predicate::str::contains("Ciphertext = "))
        .stdout(predicate::str::contains("Cracked key = "))
        .stdout(predicate::str::contains("Cracked message = "))
        .stdout(predicate::str::contains("Recovered 50/50 message bits."));
}

#[test]
fn test_attack_with_text_message() {
    qke_cli()
        .args(["attack", "--qubits", "256", "--seed", "2", "--text", "attack at dawn"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cracked text = attack at dawn"));
}

#[test]
fn test_attack_rejects_invalid_message() {
    qke_cli()
        .args(["attack", "--seed", "1", "--message", "01x1"])
        .assert()
        .failure();
}

#[test]
fn test_attack_rejects_message_and_text_together() {
    qke_cli()
        .args(["attack", "--message", "0101", "--text", "hi"])
        .assert()
        .failure();
}

#[test]
fn test_attack_with_zero_qubits_fails() {
    qke_cli()
        .args(["attack", "--qubits", "0", "--seed", "1"])
        .assert()
        .failure();
}

#[test]
fn test_exchange_with_raised_threshold() {
    qke_cli()
        .args(["exchange", "--qubits", "1024", "--seed", "9", "--eavesdrop"])
        .args(["--threshold", "0.5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Keys match: no"))
        .stdout(predicate::str::contains("Eavesdropping suspected: no"));
}

#[test]
fn test_exchange_rejects_threshold_out_of_range() {
    for threshold in ["1.5", "-0.1", "nan"] {
        qke_cli()
            .args(["exchange", "--seed", "1", "--threshold", threshold])
            .assert()
            .failure();
    }
}
