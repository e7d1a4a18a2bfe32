use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("RSA error: {0}")]
    Rsa(#[from] rsa::Error),

    #[error("PKCS#1 error: {0}")]
    Pkcs1(String),

    #[error("Invalid key format")]
    InvalidKeyFormat,

    #[error("Unknown hash method: {0}")]
    UnknownHashMethod(String),

    #[error("payload smaller than {signature_size} (payload is {payload_len} bytes)")]
    Framing {
        payload_len: usize,
        signature_size: usize,
    },

    #[error("Verification failed: {0}")]
    VerificationFailed(String),

    #[error("no QR in this image")]
    NoSymbolFound,

    #[error("Symbol error: {0}")]
    Symbol(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Structured code for this error, as carried in verification reports.
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::Framing { .. } => ErrorCode::PayloadTooShort,
            Error::VerificationFailed(_) => ErrorCode::SignatureInvalid,
            Error::NoSymbolFound => ErrorCode::NoSymbolFound,
            Error::Rsa(_)
            | Error::Pkcs1(_)
            | Error::InvalidKeyFormat
            | Error::UnknownHashMethod(_) => ErrorCode::KeyInvalid,
            Error::Symbol(_) | Error::Image(_) | Error::Io(_) => {
                ErrorCode::Internal
            }
        }
    }
}

impl From<rsa::pkcs1::Error> for Error {
    fn from(err: rsa::pkcs1::Error) -> Self {
        Error::Pkcs1(err.to_string())
    }
}

impl From<qrcode::types::QrError> for Error {
    fn from(err: qrcode::types::QrError) -> Self {
        Error::Symbol(err.to_string())
    }
}

/// Error codes for structured verification results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "SIGNATURE_INVALID")]
    SignatureInvalid,
    #[serde(rename = "PAYLOAD_TOO_SHORT")]
    PayloadTooShort,
    #[serde(rename = "NO_SYMBOL_FOUND")]
    NoSymbolFound,
    #[serde(rename = "KEY_INVALID")]
    KeyInvalid,
    #[serde(rename = "INTERNAL")]
    Internal,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorCode::SignatureInvalid => "SIGNATURE_INVALID",
            ErrorCode::PayloadTooShort => "PAYLOAD_TOO_SHORT",
            ErrorCode::NoSymbolFound => "NO_SYMBOL_FOUND",
            ErrorCode::KeyInvalid => "KEY_INVALID",
            ErrorCode::Internal => "INTERNAL",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_framing_message_names_sizes() {
        let err = Error::Framing {
            payload_len: 5,
            signature_size: 128,
        };
        assert_eq!(
            err.to_string(),
            "payload smaller than 128 (payload is 5 bytes)"
        );
        assert_eq!(err.code(), ErrorCode::PayloadTooShort);
    }

    #[test]
    fn test_key_loading_failures_are_key_invalid() {
        let err = crate::crypto::load_public_key("not a key").unwrap_err();
        assert!(matches!(err, Error::InvalidKeyFormat));
        assert_eq!(err.code(), ErrorCode::KeyInvalid);

        let err: Error = "WHIRLPOOL".parse::<crate::crypto::HashMethod>().unwrap_err();
        assert_eq!(err.code(), ErrorCode::KeyInvalid);
    }

    #[test]
    fn test_error_code_serde_names() {
        let json = serde_json::to_string(&ErrorCode::NoSymbolFound).unwrap();
        assert_eq!(json, "\"NO_SYMBOL_FOUND\"");
        let code: ErrorCode = serde_json::from_str("\"SIGNATURE_INVALID\"").unwrap();
        assert_eq!(code, ErrorCode::SignatureInvalid);
        assert_eq!(code.to_string(), "SIGNATURE_INVALID");
    }
}
