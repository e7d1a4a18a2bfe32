//! `qrsa signqr` - Sign a message and wrap message and signature into a QR code.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use qrsa::crypto::{read_private_key, HashMethod};
use qrsa::symbol::{render_terminal, write_symbol, ErrorCorrection};
use qrsa::verification::sign_to_symbol;

use crate::cli::input::MessageArgs;
use crate::exit_codes;

#[derive(Args, Debug)]
pub struct SignqrArgs {
    #[command(flatten)]
    pub input: MessageArgs,

    /// Private key file (PKCS#1 or PKCS#8 PEM)
    #[arg(long, short, env = "QRSA_KEY")]
    pub key: PathBuf,

    /// Output file: `.txt` for ASCII art, otherwise an image; printed to the terminal when omitted
    #[arg(long, short)]
    pub out: Option<PathBuf>,

    /// Digest signed with PKCS#1 v1.5
    #[arg(long, default_value_t = HashMethod::Sha256)]
    pub hash_method: HashMethod,

    /// QR error correction level (L, M, Q, H)
    #[arg(long, default_value_t = ErrorCorrection::Medium)]
    pub error_correction: ErrorCorrection,
}

pub fn cmd_signqr(args: SignqrArgs) -> i32 {
    match run_signqr(args) {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => exit_codes::report(&e),
    }
}

fn run_signqr(args: SignqrArgs) -> Result<()> {
    let private_key = read_private_key(&args.key)
        .with_context(|| format!("failed to load private key: {}", args.key.display()))?;
    let message = args.input.read()?;

    let code = sign_to_symbol(
        &message,
        &private_key,
        args.hash_method,
        args.error_correction,
    )?;

    match &args.out {
        Some(out) => {
            write_symbol(&code, out)
                .with_context(|| format!("failed to write QR code: {}", out.display()))?;
            info!(path = %out.display(), "wrote signed QR code");
        }
        None => println!("{}", render_terminal(&code)),
    }

    Ok(())
}
