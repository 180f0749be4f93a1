//! Composite key splitting and hash selection.
//!
//! A composite key `K` is split at its midpoint: `MAC_KEY = K[..n/2]`,
//! `ENC_KEY = K[n/2..]`. The half-key length picks the HMAC hash and is also
//! the authentication tag length.

use std::fmt;

use crate::error::Error;

/// Hash function used by the integrity half of the construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// SHA-256, selected by 16 byte half keys.
    Sha256,
    /// SHA-384, selected by 24 byte half keys.
    Sha384,
    /// SHA-512, selected by 32 byte half keys.
    Sha512,
}

impl HashAlgorithm {
    /// Selects the hash for a half-key length, or `None` if the length is
    /// not one of 16, 24 or 32.
    pub fn for_half_key_len(len: usize) -> Option<Self> {
        match len {
            16 => Some(HashAlgorithm::Sha256),
            24 => Some(HashAlgorithm::Sha384),
            32 => Some(HashAlgorithm::Sha512),
            _ => None,
        }
    }

    /// Native digest length in bytes, before tag truncation.
    pub fn output_len(self) -> usize {
        match self {
            HashAlgorithm::Sha256 => 32,
            HashAlgorithm::Sha384 => 48,
            HashAlgorithm::Sha512 => 64,
        }
    }

    /// Short display name, e.g. `"SHA-256"`.
    pub fn as_str(self) -> &'static str {
        match self {
            HashAlgorithm::Sha256 => "SHA-256",
            HashAlgorithm::Sha384 => "SHA-384",
            HashAlgorithm::Sha512 => "SHA-512",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The two halves of a composite key plus the hash they select.
///
/// Borrows from the composite key; nothing is copied.
#[derive(Clone, Copy)]
pub struct SplitKey<'a> {
    /// First half, used only as the HMAC key.
    pub integrity: &'a [u8],
    /// Second half, used only to key the block cipher.
    pub encryption: &'a [u8],
    /// Hash selected by the half-key length.
    pub hash: HashAlgorithm,
}

impl SplitKey<'_> {
    /// Length of each half in bytes. Also the tag length.
    pub fn half_len(&self) -> usize {
        self.integrity.len()
    }
}

impl fmt::Debug for SplitKey<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplitKey")
            .field("half_len", &self.half_len())
            .field("hash", &self.hash)
            .finish_non_exhaustive()
    }
}

/// Split a composite key into its integrity and encryption halves.
///
/// # Errors
///
/// Returns [`Error::UnsupportedKeyLength`] unless the key is 32, 48 or 64 bytes.
pub fn split(key: &[u8]) -> Result<SplitKey<'_>, Error> {
    if key.len() % 2 != 0 {
        return Err(Error::UnsupportedKeyLength(key.len()));
    }
    let half = key.len() / 2;
    let hash = HashAlgorithm::for_half_key_len(half).ok_or(Error::UnsupportedKeyLength(key.len()))?;
    let (integrity, encryption) = key.split_at(half);
    Ok(SplitKey {
        integrity,
        encryption,
        hash,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_selection_by_half_length() {
        assert_eq!(HashAlgorithm::for_half_key_len(16), Some(HashAlgorithm::Sha256));
        assert_eq!(HashAlgorithm::for_half_key_len(24), Some(HashAlgorithm::Sha384));
        assert_eq!(HashAlgorithm::for_half_key_len(32), Some(HashAlgorithm::Sha512));
        assert_eq!(HashAlgorithm::for_half_key_len(20), None);
        assert_eq!(HashAlgorithm::for_half_key_len(0), None);
    }

    #[test]
    fn split_takes_mac_key_first() {
        let key: Vec<u8> = (0u8..32).collect();
        let split = split(&key).unwrap();
        assert_eq!(split.integrity, &key[..16]);
        assert_eq!(split.encryption, &key[16..]);
        assert_eq!(split.hash, HashAlgorithm::Sha256);
        assert_eq!(split.half_len(), 16);
    }

    #[test]
    fn split_supported_lengths() {
        for (len, hash) in [
            (32, HashAlgorithm::Sha256),
            (48, HashAlgorithm::Sha384),
            (64, HashAlgorithm::Sha512),
        ] {
            let key = vec![7u8; len];
            let split = split(&key).unwrap();
            assert_eq!(split.hash, hash);
            assert_eq!(split.integrity.len(), len / 2);
            assert_eq!(split.encryption.len(), len / 2);
        }
    }

    #[test]
    fn split_rejects_unsupported_lengths() {
        for len in [0, 16, 33, 40, 63, 65, 128] {
            assert_eq!(
                split(&vec![0u8; len]).unwrap_err(),
                Error::UnsupportedKeyLength(len)
            );
        }
    }

    #[test]
    fn debug_hides_key_material() {
        let key = [0xABu8; 32];
        let rendered = format!("{:?}", split(&key).unwrap());
        assert!(!rendered.contains("171"));
        assert!(rendered.contains("Sha256"));
    }
}
