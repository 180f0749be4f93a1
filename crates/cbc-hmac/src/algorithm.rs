//! JOSE content-encryption identifiers for the AES-CBC + HMAC-SHA2 family
//! (RFC 7518 §5.2).

use std::fmt;
use std::str::FromStr;

use aes::cipher::KeyInit;
use aes::{Aes128, Aes192, Aes256};
use serde::{Deserialize, Serialize};

use crate::aead::Aead;
use crate::engine::CbcHmac;
use crate::error::Error;
use crate::keys::HashAlgorithm;

/// The `enc` name did not match any supported algorithm.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("unknown content encryption algorithm: {0:?}")]
pub struct UnknownAlgorithm(pub String);

/// An AES-CBC + HMAC-SHA2 content-encryption algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentEncryption {
    /// `A128CBC-HS256`: AES-128, HMAC-SHA-256, 32 byte key, 16 byte tag.
    #[serde(rename = "A128CBC-HS256")]
    A128CbcHs256,
    /// `A192CBC-HS384`: AES-192, HMAC-SHA-384, 48 byte key, 24 byte tag.
    #[serde(rename = "A192CBC-HS384")]
    A192CbcHs384,
    /// `A256CBC-HS512`: AES-256, HMAC-SHA-512, 64 byte key, 32 byte tag.
    #[serde(rename = "A256CBC-HS512")]
    A256CbcHs512,
}

impl ContentEncryption {
    /// Every supported algorithm, smallest key first.
    pub const ALL: [ContentEncryption; 3] = [
        ContentEncryption::A128CbcHs256,
        ContentEncryption::A192CbcHs384,
        ContentEncryption::A256CbcHs512,
    ];

    /// JOSE `enc` header value.
    pub fn as_str(self) -> &'static str {
        match self {
            ContentEncryption::A128CbcHs256 => "A128CBC-HS256",
            ContentEncryption::A192CbcHs384 => "A192CBC-HS384",
            ContentEncryption::A256CbcHs512 => "A256CBC-HS512",
        }
    }

    /// Composite key length in bytes.
    pub fn key_len(self) -> usize {
        match self {
            ContentEncryption::A128CbcHs256 => 32,
            ContentEncryption::A192CbcHs384 => 48,
            ContentEncryption::A256CbcHs512 => 64,
        }
    }

    /// Authentication tag length in bytes (half the key length).
    pub fn tag_len(self) -> usize {
        self.key_len() / 2
    }

    /// Hash used for the integrity half.
    pub fn hash(self) -> HashAlgorithm {
        match self {
            ContentEncryption::A128CbcHs256 => HashAlgorithm::Sha256,
            ContentEncryption::A192CbcHs384 => HashAlgorithm::Sha384,
            ContentEncryption::A256CbcHs512 => HashAlgorithm::Sha512,
        }
    }

    /// The algorithm whose composite key is `len` bytes, if any.
    pub fn from_key_len(len: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|alg| alg.key_len() == len)
    }

    /// Build an AEAD context for this algorithm.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedKeyLength`] if `key` is not
    /// [`ContentEncryption::key_len`] bytes.
    pub fn new_aead(self, key: &[u8]) -> Result<Box<dyn Aead + Send + Sync>, Error> {
        if key.len() != self.key_len() {
            return Err(Error::UnsupportedKeyLength(key.len()));
        }
        let aead: Box<dyn Aead + Send + Sync> = match self {
            ContentEncryption::A128CbcHs256 => Box::new(CbcHmac::new(key, Aes128::new_from_slice)?),
            ContentEncryption::A192CbcHs384 => Box::new(CbcHmac::new(key, Aes192::new_from_slice)?),
            ContentEncryption::A256CbcHs512 => Box::new(CbcHmac::new(key, Aes256::new_from_slice)?),
        };
        Ok(aead)
    }
}

impl fmt::Display for ContentEncryption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentEncryption {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|alg| alg.as_str() == s)
            .ok_or_else(|| UnknownAlgorithm(s.to_owned()))
    }
}

/// Build the AES-CBC + HMAC-SHA2 context matching the composite key length.
///
/// # Errors
///
/// Returns [`Error::UnsupportedKeyLength`] unless `key` is 32, 48 or 64 bytes.
pub fn new_aes(key: &[u8]) -> Result<Box<dyn Aead + Send + Sync>, Error> {
    ContentEncryption::from_key_len(key.len())
        .ok_or(Error::UnsupportedKeyLength(key.len()))?
        .new_aead(key)
}
