use clap::{Parser, Subcommand};

use super::commands::{create, sign, signqr, verify, verifyqr};

#[derive(Parser)]
#[command(
    name = "qrsa",
    version,
    about = "Sign messages with RSA, carry them in QR codes, verify them with the public key"
)]
pub struct Cli {
    /// Raise log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Create a new RSA key
    Create(create::CreateArgs),
    /// Sign a message or data file/stream
    Sign(sign::SignArgs),
    /// Verify a message or data file/stream against a detached signature
    Verify(verify::VerifyArgs),
    /// Sign a message or data file/stream and wrap it into a QR code
    Signqr(signqr::SignqrArgs),
    /// Verify a QR code, given the public key
    Verifyqr(verifyqr::VerifyqrArgs),
}
