//! Compact text envelope for sealed content.
//!
//! ```text
//! v1.<base64url-no-pad(nonce)>.<base64url-no-pad(ciphertext+tag)>
//! ```
//!
//! The `v1` prefix leaves room for a future envelope revision.

use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use cbc_hmac::NONCE_SIZE;
use thiserror::Error;

/// Prefix that appears at the start of every envelope.
pub const VERSION_PREFIX: &str = "v1";

/// Errors produced while parsing an envelope.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvelopeError {
    /// The string does not match `v1.<nonce>.<ciphertext>`.
    #[error("invalid envelope format")]
    InvalidFormat,

    /// The nonce decoded to the wrong number of bytes.
    #[error("invalid envelope nonce length: {0} bytes")]
    InvalidNonce(usize),
}

/// A parsed, sealed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    /// Nonce used as the CBC IV.
    pub nonce: [u8; NONCE_SIZE],
    /// Ciphertext followed by the authentication tag.
    pub ciphertext: Vec<u8>,
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}",
            VERSION_PREFIX,
            URL_SAFE_NO_PAD.encode(self.nonce),
            URL_SAFE_NO_PAD.encode(&self.ciphertext),
        )
    }
}

impl FromStr for Envelope {
    type Err = EnvelopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.splitn(3, '.').collect();
        if parts.len() != 3 || parts[0] != VERSION_PREFIX {
            return Err(EnvelopeError::InvalidFormat);
        }
        let nonce_bytes = URL_SAFE_NO_PAD
            .decode(parts[1])
            .map_err(|_| EnvelopeError::InvalidFormat)?;
        let nonce: [u8; NONCE_SIZE] = nonce_bytes
            .as_slice()
            .try_into()
            .map_err(|_| EnvelopeError::InvalidNonce(nonce_bytes.len()))?;

        let ciphertext = URL_SAFE_NO_PAD
            .decode(parts[2])
            .map_err(|_| EnvelopeError::InvalidFormat)?;

        Ok(Self { nonce, ciphertext })
    }
}
