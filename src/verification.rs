use std::path::Path;

use qrcode::QrCode;
use rsa::RsaPrivateKey;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::crypto::{self, HashMethod};
use crate::error::{Error, ErrorCode, Result};
use crate::framing::frame;
use crate::recovery::{recover, SignatureVerifier, SizeMode};
use crate::symbol::{self, ErrorCorrection};

/// Sign a message and frame it with its signature.
pub fn sign_to_payload(
    message: &[u8],
    private_key: &RsaPrivateKey,
    hash_method: HashMethod,
) -> Result<Vec<u8>> {
    let signature = crypto::sign(message, private_key, hash_method)?;
    Ok(frame(message, &signature))
}

/// Sign a message and encode the framed payload as a QR symbol.
pub fn sign_to_symbol(
    message: &[u8],
    private_key: &RsaPrivateKey,
    hash_method: HashMethod,
    correction: ErrorCorrection,
) -> Result<QrCode> {
    let payload = sign_to_payload(message, private_key, hash_method)?;
    info!(
        message_len = message.len(),
        payload_len = payload.len(),
        %hash_method,
        "signed payload"
    );
    symbol::encode(&payload, correction)
}

/// A message recovered from a payload whose signature validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedPayload {
    pub message: Vec<u8>,
    pub signature_size: usize,
    pub hash_method: HashMethod,
}

/// Split and verify an in-memory payload.
pub fn verify_payload<V>(payload: &[u8], verifier: &V, mode: SizeMode) -> Result<VerifiedPayload>
where
    V: SignatureVerifier + ?Sized,
{
    let recovered = recover(payload, verifier, mode)?;
    Ok(VerifiedPayload {
        message: recovered.message.to_vec(),
        signature_size: recovered.signature_size(),
        hash_method: recovered.hash_method,
    })
}

/// Decode the QR symbol in an image file and verify its payload.
///
/// Fails with [`Error::NoSymbolFound`] before any verification is attempted
/// if the image holds no readable symbol.
pub fn verify_symbol<V>(image_path: &Path, verifier: &V, mode: SizeMode) -> Result<VerifiedPayload>
where
    V: SignatureVerifier + ?Sized,
{
    let payload = symbol::read_symbol(image_path)?;
    info!(payload_len = payload.len(), ?mode, "decoded payload");
    verify_payload(&payload, verifier, mode)
}

/// Structured verification result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature_size: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash_method: Option<HashMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_len: Option<usize>,
    pub verified_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<ErrorCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl VerificationReport {
    pub fn success(verified: &VerifiedPayload, key_id: Option<&str>) -> Self {
        Self {
            valid: true,
            key_id: key_id.map(|s| s.to_string()),
            signature_size: Some(verified.signature_size),
            hash_method: Some(verified.hash_method),
            message: Some(String::from_utf8_lossy(&verified.message).into_owned()),
            message_len: Some(verified.message.len()),
            verified_at: chrono::Utc::now().to_rfc3339(),
            error_code: None,
            error_message: None,
        }
    }

    pub fn failure(error: &Error, key_id: Option<&str>) -> Self {
        Self {
            valid: false,
            key_id: key_id.map(|s| s.to_string()),
            signature_size: None,
            hash_method: None,
            message: None,
            message_len: None,
            verified_at: chrono::Utc::now().to_rfc3339(),
            error_code: Some(error.code()),
            error_message: Some(error.to_string()),
        }
    }

    pub fn from_result(result: &Result<VerifiedPayload>, key_id: Option<&str>) -> Self {
        match result {
            Ok(verified) => Self::success(verified, key_id),
            Err(e) => Self::failure(e, key_id),
        }
    }
}
