//! Authentication tag computation.
//!
//! The MAC input is
//!
//! ```text
//! AAD || Nonce || Ciphertext || BE64(bit_length(AAD))
//! ```
//!
//! and the tag is the leading `tag_len` bytes of `HMAC(MAC_KEY, input)`,
//! where `tag_len` equals the half-key length, not the digest length.

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};
use zeroize::Zeroizing;

use crate::keys::HashAlgorithm;

/// Big-endian bit length of the AAD, the final field of the MAC input.
pub fn aad_bit_len(aad: &[u8]) -> [u8; 8] {
    ((aad.len() as u64) << 3).to_be_bytes()
}

/// Keyed tag generator bound to one integrity key.
pub struct TagComputer {
    hash: HashAlgorithm,
    key: Zeroizing<Vec<u8>>,
    tag_len: usize,
}

impl TagComputer {
    /// Create a tag computer that truncates to `tag_len` bytes.
    ///
    /// `tag_len` must not exceed the native output length of `hash`.
    pub fn new(hash: HashAlgorithm, integrity_key: &[u8], tag_len: usize) -> Self {
        debug_assert!(tag_len <= hash.output_len());
        Self {
            hash,
            key: Zeroizing::new(integrity_key.to_vec()),
            tag_len,
        }
    }

    /// Tag length in bytes.
    pub fn tag_len(&self) -> usize {
        self.tag_len
    }

    /// Hash this computer uses.
    pub fn hash(&self) -> HashAlgorithm {
        self.hash
    }

    /// Compute the truncated tag over `aad`, `nonce` and `ciphertext`.
    ///
    /// # Panics
    ///
    /// Panics if HMAC refuses the integrity key. HMAC accepts keys of any
    /// length, so this only fires on a broken hmac implementation.
    pub fn compute(&self, aad: &[u8], nonce: &[u8], ciphertext: &[u8]) -> Vec<u8> {
        let digest = match self.hash {
            HashAlgorithm::Sha256 => mac::<Hmac<Sha256>>(&self.key, aad, nonce, ciphertext),
            HashAlgorithm::Sha384 => mac::<Hmac<Sha384>>(&self.key, aad, nonce, ciphertext),
            HashAlgorithm::Sha512 => mac::<Hmac<Sha512>>(&self.key, aad, nonce, ciphertext),
        };
        match digest {
            Ok(mut digest) => {
                digest.truncate(self.tag_len);
                digest
            }
            Err(e) => panic!("failed to compute authentication tag: {e}"),
        }
    }
}

impl fmt::Debug for TagComputer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagComputer")
            .field("hash", &self.hash)
            .field("tag_len", &self.tag_len)
            .field("key", &"[REDACTED]")
            .finish()
    }
}

fn mac<M: Mac + hmac::digest::KeyInit>(
    key: &[u8],
    aad: &[u8],
    nonce: &[u8],
    ciphertext: &[u8],
) -> Result<Vec<u8>, hmac::digest::InvalidLength> {
    let mut m = <M as Mac>::new_from_slice(key)?;
    m.update(aad);
    m.update(nonce);
    m.update(ciphertext);
    m.update(&aad_bit_len(aad));
    Ok(m.finalize().into_bytes().to_vec())
}
