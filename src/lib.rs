//! # QRSA
//!
//! RSA-signed messages carried inside QR codes.
//!
//! A signer concatenates a message and its detached PKCS#1 v1.5 signature into
//! one payload and encodes it as a QR symbol. A verifier holding only the
//! symbol and the public key recovers the message: the payload stores no
//! length field, so the split point is either declared out of band or found by
//! trying each power-of-two signature size from 4 to 32768 bytes until the
//! signature validates.
//!
//! ## Features
//!
//! - **Payload Framing**: `message || signature`, nothing else
//! - **Blind Size Recovery**: ordered trial search, smallest valid size wins
//! - **RSA Keys**: PKCS#1 and PKCS#8/SPKI PEM, public key derived from a private key
//! - **QR Codec**: byte-mode encoding to images or ASCII, decoding from images
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use qrsa::crypto::{generate_key_pair, load_private_key, load_public_key, HashMethod};
//! use qrsa::recovery::SizeMode;
//! use qrsa::verification::{sign_to_payload, verify_payload};
//!
//! let key_pair = generate_key_pair(1024).unwrap();
//! let private_key = load_private_key(&key_pair.private_key_pem).unwrap();
//! let public_key = load_public_key(&key_pair.public_key_pem).unwrap();
//!
//! let payload = sign_to_payload(b"hello", &private_key, HashMethod::Sha256).unwrap();
//! assert_eq!(payload.len(), 5 + 128);
//!
//! let verified = verify_payload(&payload, &public_key, SizeMode::Blind).unwrap();
//! assert_eq!(verified.message, b"hello");
//! assert_eq!(verified.signature_size, 128);
//! ```
//!
//! ## Error Handling
//!
//! All fallible operations return [`error::Result`]. A blind search that finds
//! no valid split is always reported as [`error::Error::VerificationFailed`],
//! never as an empty success.

pub mod crypto;
pub mod error;
pub mod framing;
pub mod recovery;
pub mod symbol;
pub mod verification;

pub use error::{Error, ErrorCode, Result};
pub use framing::{frame, unframe};
pub use recovery::{recover, search, SearchOutcome, SignatureVerifier, SizeMode};
