//! The AEAD capability consumed by a content-encryption step.

use crate::error::Error;

/// An authenticated cipher with associated data.
///
/// Upstream code holds implementors opaquely (usually as
/// `Box<dyn Aead + Send + Sync>`) and only needs these four operations.
/// Both `seal` and `open` take a prefix buffer `dst` and return it with the
/// output appended.
pub trait Aead {
    /// Required nonce length in bytes.
    fn nonce_size(&self) -> usize;

    /// Maximum number of bytes `seal` adds beyond the plaintext length.
    fn overhead(&self) -> usize;

    /// Encrypt and authenticate `plaintext`, authenticating `aad` as well.
    ///
    /// Returns `dst || ciphertext || tag`. The nonce must be unique per key;
    /// reuse is not detected.
    ///
    /// # Panics
    ///
    /// Panics if `nonce` is not [`Aead::nonce_size`] bytes.
    fn seal(&self, dst: Vec<u8>, nonce: &[u8], plaintext: &[u8], aad: &[u8]) -> Vec<u8>;

    /// Verify and decrypt `ciphertext` (which carries the trailing tag).
    ///
    /// Returns `dst || plaintext`.
    fn open(&self, dst: Vec<u8>, nonce: &[u8], ciphertext: &[u8], aad: &[u8])
        -> Result<Vec<u8>, Error>;
}
