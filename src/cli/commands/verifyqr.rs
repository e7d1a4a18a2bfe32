//! `qrsa verifyqr` - Recover and verify the message inside a QR code.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use qrsa::crypto::{calculate_key_id, read_public_key};
use qrsa::recovery::SizeMode;
use qrsa::verification::{verify_symbol, VerificationReport};

use crate::exit_codes;

#[derive(Args, Debug)]
pub struct VerifyqrArgs {
    /// Image containing the QR code
    #[arg(long)]
    pub qr: PathBuf,

    /// Public key file; a private key is accepted and its public half used
    #[arg(long, short, env = "QRSA_KEY")]
    pub key: PathBuf,

    /// Signature size in bytes; 0 searches the power-of-two sizes 4..=32768
    #[arg(long, default_value_t = 0)]
    pub size: usize,

    /// Print a JSON verification report instead of the message
    #[arg(long)]
    pub json: bool,
}

pub fn cmd_verifyqr(args: VerifyqrArgs) -> i32 {
    match run_verifyqr(args) {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => exit_codes::report(&e),
    }
}

fn run_verifyqr(args: VerifyqrArgs) -> Result<()> {
    let public_key = read_public_key(&args.key)
        .with_context(|| format!("failed to load key: {}", args.key.display()))?;
    let mode = SizeMode::from_declared(args.size);

    let result = verify_symbol(&args.qr, &public_key, mode);

    if args.json {
        let key_id = calculate_key_id(&public_key)?;
        let report = VerificationReport::from_result(&result, Some(&key_id));
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    let verified = result?;
    info!(
        signature_size = verified.signature_size,
        hash_method = %verified.hash_method,
        "QR code verified"
    );

    if !args.json {
        io::stdout()
            .write_all(&verified.message)
            .context("failed to write message to stdout")?;
    }
    Ok(())
}
