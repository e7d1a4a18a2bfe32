//! Signature size recovery.
//!
//! A QR symbol carries only raw bytes, so a verifier holding a payload and a
//! public key does not know where the message ends and the signature begins.
//! It either gets the size out of band ([`SizeMode::Declared`]) or recovers it
//! by trial ([`SizeMode::Blind`]): each size in [`CANDIDATE_SIGNATURE_SIZES`]
//! is tried in increasing order and the first one whose split verifies wins.

use rsa::RsaPublicKey;
use tracing::{debug, info, warn};

use crate::crypto::{self, HashMethod};
use crate::error::{Error, Result};
use crate::framing::unframe;

/// Trial signature sizes for blind mode: `2^2` through `2^15` bytes.
///
/// RSA moduli are conventionally a power of two in bits, so their signature
/// length in bytes almost always lands on one of these.
pub const CANDIDATE_SIGNATURE_SIZES: [usize; 14] = [
    4, 8, 16, 32, 64, 128, 256, 512, 1024, 2048, 4096, 8192, 16384, 32768,
];

/// Oracle answering whether a signature is valid for a message.
///
/// Implementations must be side-effect free as far as the search is
/// concerned; a failed trial is an ordinary outcome, not an error to report.
pub trait SignatureVerifier {
    /// Return the hash method the signature was made with, or an error if it
    /// does not validate.
    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<HashMethod>;
}

impl SignatureVerifier for RsaPublicKey {
    fn verify(&self, message: &[u8], signature: &[u8]) -> Result<HashMethod> {
        crypto::verify(message, signature, self)
    }
}

/// How the verifier learns the signature size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeMode {
    /// Size known out of band.
    Declared(usize),
    /// Size recovered by trial over [`CANDIDATE_SIGNATURE_SIZES`].
    #[default]
    Blind,
}

impl SizeMode {
    /// Map a user-supplied size to a mode; `0` means "not given".
    pub fn from_declared(size: usize) -> Self {
        if size == 0 {
            SizeMode::Blind
        } else {
            SizeMode::Declared(size)
        }
    }
}

/// A message whose signature validated, borrowed from the payload it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveredMessage<'a> {
    pub message: &'a [u8],
    pub signature: &'a [u8],
    pub hash_method: HashMethod,
}

impl RecoveredMessage<'_> {
    pub fn signature_size(&self) -> usize {
        self.signature.len()
    }
}

/// Why a blind search ended without a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExhaustReason {
    /// The payload cannot hold the next candidate, so no larger one can fit either.
    PayloadTooShort { next_size: usize },
    /// Every candidate size was tried and none validated.
    AllCandidatesFailed,
}

/// Terminal state of a blind search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome<'a> {
    Found(RecoveredMessage<'a>),
    Exhausted {
        /// Number of candidate splits handed to the verifier.
        tried: usize,
        reason: ExhaustReason,
    },
}

/// Search the candidate sizes in increasing order and stop at the first that verifies.
///
/// The smallest validating size always wins; larger candidates are never
/// looked at once one succeeds.
pub fn search<'a, V>(payload: &'a [u8], verifier: &V) -> SearchOutcome<'a>
where
    V: SignatureVerifier + ?Sized,
{
    let mut tried = 0;

    for size in CANDIDATE_SIGNATURE_SIZES {
        let Ok((message, signature)) = unframe(payload, size) else {
            debug!(
                payload_len = payload.len(),
                size, "payload too short for candidate, giving up"
            );
            return SearchOutcome::Exhausted {
                tried,
                reason: ExhaustReason::PayloadTooShort { next_size: size },
            };
        };

        tried += 1;
        match verifier.verify(message, signature) {
            Ok(hash_method) => {
                info!(size, %hash_method, "signature size recovered");
                return SearchOutcome::Found(RecoveredMessage {
                    message,
                    signature,
                    hash_method,
                });
            }
            Err(e) => debug!(size, error = %e, "candidate rejected"),
        }
    }

    SearchOutcome::Exhausted {
        tried,
        reason: ExhaustReason::AllCandidatesFailed,
    }
}

/// Split and verify a payload.
///
/// In declared mode a short payload is reported as [`Error::Framing`] and a
/// bad signature as [`Error::VerificationFailed`]. In blind mode both
/// exhaustion reasons surface as [`Error::VerificationFailed`], since from the
/// caller's side no signature could be found.
pub fn recover<'a, V>(payload: &'a [u8], verifier: &V, mode: SizeMode) -> Result<RecoveredMessage<'a>>
where
    V: SignatureVerifier + ?Sized,
{
    match mode {
        SizeMode::Declared(size) => {
            let (message, signature) = unframe(payload, size)?;
            let hash_method = verifier.verify(message, signature)?;
            Ok(RecoveredMessage {
                message,
                signature,
                hash_method,
            })
        }
        SizeMode::Blind => match search(payload, verifier) {
            SearchOutcome::Found(recovered) => Ok(recovered),
            SearchOutcome::Exhausted { tried, reason } => {
                warn!(tried, ?reason, "no candidate signature size validated");
                let message = match reason {
                    ExhaustReason::PayloadTooShort { next_size } => format!(
                        "no valid signature found before payload of {} bytes ran out at size {}; try providing --size",
                        payload.len(),
                        next_size
                    ),
                    ExhaustReason::AllCandidatesFailed => format!(
                        "none of the {} candidate signature sizes validated; provide --size",
                        tried
                    ),
                };
                Err(Error::VerificationFailed(message))
            }
        },
    }
}
