//! Payload framing: `message || signature`, with no delimiter and no length field.
//!
//! The signature is a fixed-length trailing suffix whose length only the
//! signing key determines. Reading a payload back therefore needs the
//! signature size from somewhere else, see [`crate::recovery`].

use crate::error::{Error, Result};

/// Concatenate a message and its detached signature into one payload.
pub fn frame(message: &[u8], signature: &[u8]) -> Vec<u8> {
    let mut payload = Vec::with_capacity(message.len() + signature.len());
    payload.extend_from_slice(message);
    payload.extend_from_slice(signature);
    payload
}

/// Split a payload into `(message, signature)`, taking the last
/// `signature_size` bytes as the signature.
///
/// This only partitions bytes; nothing is verified.
///
/// # Errors
///
/// Returns [`Error::Framing`] if the payload is shorter than `signature_size`.
pub fn unframe(payload: &[u8], signature_size: usize) -> Result<(&[u8], &[u8])> {
    if payload.len() < signature_size {
        return Err(Error::Framing {
            payload_len: payload.len(),
            signature_size,
        });
    }
    Ok(payload.split_at(payload.len() - signature_size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_is_plain_concatenation() {
        let payload = frame(b"hello", &[0xAA; 128]);
        assert_eq!(payload.len(), 133);
        assert_eq!(&payload[..5], b"hello");
        assert!(payload[5..].iter().all(|b| *b == 0xAA));
    }

    #[test]
    fn test_unframe_reverses_frame() {
        let signature: Vec<u8> = (0..=255u8).collect();
        let payload = frame(b"some message", &signature);
        let (message, recovered) = unframe(&payload, signature.len()).unwrap();
        assert_eq!(message, b"some message");
        assert_eq!(recovered, signature.as_slice());
    }

    #[test]
    fn test_unframe_zero_size() {
        let (message, signature) = unframe(b"abc", 0).unwrap();
        assert_eq!(message, b"abc");
        assert!(signature.is_empty());
    }

    #[test]
    fn test_unframe_exact_size_leaves_empty_message() {
        let (message, signature) = unframe(b"abcd", 4).unwrap();
        assert!(message.is_empty());
        assert_eq!(signature, b"abcd");
    }

    #[test]
    fn test_unframe_too_small() {
        for size in [6, 8, 1024] {
            let err = unframe(b"hello", size).unwrap_err();
            match err {
                Error::Framing {
                    payload_len,
                    signature_size,
                } => {
                    assert_eq!(payload_len, 5);
                    assert_eq!(signature_size, size);
                }
                other => panic!("expected framing error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_unframe_empty_payload() {
        assert!(unframe(&[], 0).is_ok());
        assert!(unframe(&[], 1).is_err());
    }
}
