//! AES-CBC + HMAC-SHA2 composite AEAD for JWE content encryption.
//!
//! Implements `A128CBC-HS256`, `A192CBC-HS384` and `A256CBC-HS512`
//! (RFC 7518 §5.2) behind the generic [`Aead`] seal/open contract.
//!
//! # Wire format
//!
//! ```text
//! ciphertext || tag
//! ```
//!
//! `ciphertext` is PKCS#7-padded CBC output, always block aligned. `tag` is
//! the HMAC over `AAD || nonce || ciphertext || BE64(bits(AAD))`, truncated
//! to half the composite key length. No length field is carried.
//!
//! # Security invariants
//!
//! - Open verifies the tag in constant time before any decryption.
//! - Nonces are never generated or stored here; the caller must keep them
//!   unique per key.
//! - Key material never appears in `Debug` output or log events.

pub mod aead;
pub mod algorithm;
pub mod buffer;
pub mod engine;
pub mod error;
pub mod keys;
pub mod padding;
pub mod tag;

pub use aead::Aead;
pub use algorithm::{new_aes, ContentEncryption, UnknownAlgorithm};
pub use engine::CbcHmac;
pub use error::{Error, ErrorKind};
pub use keys::HashAlgorithm;

/// Nonce (CBC IV) length in bytes for every variant.
pub const NONCE_SIZE: usize = 16;
