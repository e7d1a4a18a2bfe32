//! `qrsa verify` - Check a detached signature.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use qrsa::crypto::{read_public_key, verify};

use crate::cli::input::MessageArgs;
use crate::exit_codes;

#[derive(Args, Debug)]
pub struct VerifyArgs {
    #[command(flatten)]
    pub input: MessageArgs,

    /// Detached signature file
    #[arg(long, short)]
    pub sig: PathBuf,

    /// Public key file; a private key is accepted and its public half used
    #[arg(long, short, env = "QRSA_KEY")]
    pub key: PathBuf,
}

pub fn cmd_verify(args: VerifyArgs) -> i32 {
    match run_verify(args) {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => exit_codes::report(&e),
    }
}

fn run_verify(args: VerifyArgs) -> Result<()> {
    let public_key = read_public_key(&args.key)
        .with_context(|| format!("failed to load key: {}", args.key.display()))?;
    let signature = fs::read(&args.sig)
        .with_context(|| format!("failed to read signature: {}", args.sig.display()))?;
    let message = args.input.read()?;

    let hash_method = verify(&message, &signature, &public_key)?;
    println!("{hash_method}");
    Ok(())
}
