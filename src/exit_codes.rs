//! Process exit codes for `qrsa`.

use qrsa::Error;

pub const SUCCESS: i32 = 0;
pub const VERIFICATION_FAILED: i32 = 1;
pub const GENERAL_ERROR: i32 = 2; // Usage, IO, key or encoding failure
pub const FRAMING_ERROR: i32 = 3; // Payload shorter than the declared --size
pub const NO_SYMBOL_FOUND: i32 = 4;

/// Print an error chain and pick the exit code for it.
pub fn report(err: &anyhow::Error) -> i32 {
    eprintln!("error: {err:#}");
    match err.downcast_ref::<Error>() {
        Some(Error::VerificationFailed(_)) => VERIFICATION_FAILED,
        Some(Error::Framing { .. }) => FRAMING_ERROR,
        Some(Error::NoSymbolFound) => NO_SYMBOL_FOUND,
        _ => GENERAL_ERROR,
    }
}
