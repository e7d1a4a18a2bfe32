//! `qrsa sign` - Produce a detached signature.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use qrsa::crypto::{read_private_key, sign, HashMethod};

use crate::cli::input::MessageArgs;
use crate::exit_codes;

#[derive(Args, Debug)]
pub struct SignArgs {
    #[command(flatten)]
    pub input: MessageArgs,

    /// Private key file (PKCS#1 or PKCS#8 PEM)
    #[arg(long, short, env = "QRSA_KEY")]
    pub key: PathBuf,

    /// Signature output file; raw bytes go to stdout when omitted
    #[arg(long, short)]
    pub out: Option<PathBuf>,

    /// Digest signed with PKCS#1 v1.5 (MD5, SHA-1, SHA-224, SHA-256, SHA-384, SHA-512)
    #[arg(long, default_value_t = HashMethod::Sha256)]
    pub hash_method: HashMethod,
}

pub fn cmd_sign(args: SignArgs) -> i32 {
    match run_sign(args) {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => exit_codes::report(&e),
    }
}

fn run_sign(args: SignArgs) -> Result<()> {
    let private_key = read_private_key(&args.key)
        .with_context(|| format!("failed to load private key: {}", args.key.display()))?;
    let message = args.input.read()?;

    let signature = sign(&message, &private_key, args.hash_method)?;
    info!(
        message_len = message.len(),
        signature_len = signature.len(),
        hash_method = %args.hash_method,
        "signed message"
    );

    match &args.out {
        Some(out) => fs::write(out, &signature)
            .with_context(|| format!("failed to write signature: {}", out.display()))?,
        None => io::stdout()
            .write_all(&signature)
            .context("failed to write signature to stdout")?,
    }

    Ok(())
}
