//! `qrsa create` - Generate an RSA key.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use qrsa::crypto::{
    calculate_key_id, generate_key_pair, load_public_key, signature_size, DEFAULT_KEY_BITS,
};

use crate::exit_codes;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Modulus size in bits
    #[arg(long, default_value_t = DEFAULT_KEY_BITS)]
    pub size: usize,

    /// Private key output file (PKCS#1 PEM); printed to stdout when omitted
    #[arg(long, short)]
    pub out: Option<PathBuf>,

    /// Public key output file (PKCS#1 PEM)
    #[arg(long)]
    pub pubout: Option<PathBuf>,
}

pub fn cmd_create(args: CreateArgs) -> i32 {
    match run_create(args) {
        Ok(()) => exit_codes::SUCCESS,
        Err(e) => exit_codes::report(&e),
    }
}

fn run_create(args: CreateArgs) -> Result<()> {
    let key_pair = generate_key_pair(args.size)
        .with_context(|| format!("failed to generate {}-bit RSA key", args.size))?;

    let public_key = load_public_key(&key_pair.public_key_pem)?;
    let key_id = calculate_key_id(&public_key)?;
    info!(
        bits = args.size,
        signature_size = signature_size(&public_key),
        %key_id,
        "generated RSA key"
    );

    if let Some(pubout) = &args.pubout {
        fs::write(pubout, &key_pair.public_key_pem)
            .with_context(|| format!("failed to write public key: {}", pubout.display()))?;
    }

    match &args.out {
        Some(out) => write_private_key(out, &key_pair.private_key_pem)?,
        None => io::stdout()
            .write_all(key_pair.private_key_pem.as_bytes())
            .context("failed to write private key to stdout")?,
    }

    Ok(())
}

fn write_private_key(path: &Path, pem: &str) -> Result<()> {
    fs::write(path, pem)
        .with_context(|| format!("failed to write private key: {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = fs::Permissions::from_mode(0o600);
        fs::set_permissions(path, perms)
            .with_context(|| format!("failed to set permissions on: {}", path.display()))?;
    }

    Ok(())
}
