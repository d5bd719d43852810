//! A command-line interface for the simulated quantum key exchange.

use clap::{Args, Parser, Subcommand};
use log::{error, info};
use qke_core::bit::{bits_from_bytes, bytes_from_bits, parse_bits, to_bit_string};
use qke_core::exchange::{DEFAULT_ERROR_THRESHOLD, DEFAULT_QUBIT_COUNT};
use qke_core::{Bit, Exchange, ExchangeConfig, ExchangeReport, StreamCipher, XorCipher};
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "EXAMPLES:\n  \n# Exchange a 16-qubit key\nqke-cli exchange\n\n# Reproducible 1024-qubit exchange with an eavesdropper, saving a JSON report\nqke-cli exchange --qubits 1024 --seed 7 --eavesdrop --report ./report.json\n\n# Man-in-the-middle demonstration with the default message\nqke-cli attack --seed 7\n\n# Man-in-the-middle demonstration on a text message\nqke-cli attack --qubits 256 --text \"attack at dawn\""
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one key exchange and print both keys
    Exchange {
        #[command(flatten)]
        run: RunArgs,

        /// Put an eavesdropper on the line
        #[arg(long)]
        eavesdrop: bool,

        /// Error rate above which eavesdropping is reported
        #[arg(long, default_value_t = DEFAULT_ERROR_THRESHOLD, value_parser = parse_threshold)]
        threshold: f64,

        /// Write the exchange report as JSON to this file
        #[arg(long, value_name = "REPORT_FILE")]
        report: Option<PathBuf>,
    },
    /// Exchange a key with an eavesdropper on the line, encrypt a message and crack it
    Attack {
        #[command(flatten)]
        run: RunArgs,

        /// Message as a string of 0/1 characters. Defaults to 50 alternating bits.
        #[arg(long, value_name = "BITS", conflicts_with = "text")]
        message: Option<String>,

        /// Message as UTF-8 text
        #[arg(long, value_name = "TEXT")]
        text: Option<String>,
    },
}

#[derive(Args)]
struct RunArgs {
    /// Number of qubits to send
    #[arg(short, long, default_value_t = DEFAULT_QUBIT_COUNT)]
    qubits: usize,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
}

impl RunArgs {
    fn config(&self) -> ExchangeConfig {
        let config = ExchangeConfig::new(self.qubits);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

/// Accepts error-rate thresholds in `0.0..=1.0`; NaN is rejected too.
fn parse_threshold(s: &str) -> Result<f64, String> {
    let threshold: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if (0.0..=1.0).contains(&threshold) {
        Ok(threshold)
    } else {
        Err(format!("{threshold} is not between 0.0 and 1.0"))
    }
}

fn run_exchange(config: ExchangeConfig) -> ExchangeReport {
    Exchange::new(config).run().unwrap_or_else(|e| {
        error!("Key exchange failed: {e}");
        std::process::exit(1);
    })
}

const fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn print_report(report: &ExchangeReport) {
    println!("Session: {}", report.session_id);
    println!("{:-<40}", "");
    println!("Qubits sent: {}", report.qubit_count);
    println!("Sifted key length: {}", report.sifted_length);
    println!("Originator key = {}", to_bit_string(&report.originator_key));
    println!("Receiver key   = {}", to_bit_string(&report.receiver_key));
    println!("Keys match: {}", yes_no(report.keys_match()));
    println!(
        "Error rate: {:.2}% ({} mismatches)",
        report.error_rate * 100.0,
        report.mismatches
    );
    println!("Originator fingerprint: {}", report.originator_fingerprint);
    println!("Receiver fingerprint:   {}", report.receiver_fingerprint);
    println!(
        "Eavesdropping suspected: {}",
        yes_no(report.eavesdropping_suspected)
    );

    if let Some(tap) = &report.eavesdropper {
        println!();
        println!("Eavesdropper key = {}", to_bit_string(&tap.recovered_key));
        println!(
            "Eavesdropper agreement: {}/{} ({:.2}%), {} guaranteed by basis guess",
            tap.agreement,
            report.sifted_length,
            tap.agreement_rate * 100.0,
            tap.reliable_positions
        );
    }
}

fn transform_or_exit(message: &mut [Bit], key: &[Bit], what: &str) {
    if let Err(e) = XorCipher.transform(message, key) {
        error!("Failed to apply {what}: {e}");
        std::process::exit(1);
    }
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match &cli.command {
        Commands::Exchange {
            run,
            eavesdrop,
            threshold,
            report,
        } => {
            let mut config = run.config().with_error_threshold(*threshold);
            if *eavesdrop {
                config = config.with_eavesdropper();
            }
            let exchange_report = run_exchange(config);
            print_report(&exchange_report);

            if let Some(path) = report {
                if let Err(e) = exchange_report.save(path) {
                    error!("Failed to write report to '{}': {e}", path.display());
                    std::process::exit(1);
                }
                println!();
                println!("Report saved to '{}'", path.display());
            }
        }
        Commands::Attack { run, message, text } => {
            let msg = match (message, text) {
                (Some(bits), _) => parse_bits(bits).unwrap_or_else(|e| {
                    error!("Invalid --message: {e}");
                    std::process::exit(1);
                }),
                (None, Some(text)) => bits_from_bytes(text.as_bytes()),
                (None, None) => (0..50).map(|i| Bit::from(i % 2 == 1)).collect(),
            };

            let exchange_report = run_exchange(run.config().with_eavesdropper());
            info!(
                "Exchange {} produced a {}-bit key.",
                exchange_report.session_id, exchange_report.sifted_length
            );
            let qke_key = &exchange_report.receiver_key;
            let cracked_key = exchange_report
                .eavesdropper
                .as_ref()
                .map(|tap| tap.recovered_key.clone())
                .unwrap_or_default();
            if qke_key.is_empty() || cracked_key.is_empty() {
                error!("The exchange produced an empty key. Send more qubits.");
                std::process::exit(1);
            }

            let mut ciphertext = msg.clone();
            transform_or_exit(&mut ciphertext, qke_key, "the exchanged key");
            let mut cracked_msg = ciphertext.clone();
            transform_or_exit(&mut cracked_msg, &cracked_key, "the cracked key");

            let recovered_bits = msg
                .iter()
                .zip(&cracked_msg)
                .filter(|(a, b)| a == b)
                .count();

            println!("Man in the middle scenario:");
            println!("Message = {}", to_bit_string(&msg));
            println!("QKE key = {}", to_bit_string(qke_key));
            println!("Ciphertext = {}", to_bit_string(&ciphertext));
            println!("Cracked key = {}", to_bit_string(&cracked_key));
            println!("Cracked message = {}", to_bit_string(&cracked_msg));
            if text.is_some() {
                println!(
                    "Cracked text = {}",
                    String::from_utf8_lossy(&bytes_from_bits(&cracked_msg))
                );
            }
            println!("Recovered {recovered_bits}/{} message bits.", msg.len());
        }
    }
}
