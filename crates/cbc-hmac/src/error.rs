//! Error types for context construction and the open path.

use thiserror::Error;

use crate::NONCE_SIZE;

/// Broad classification of an [`Error`].
///
/// Callers that report failures to untrusted parties should collapse
/// [`ErrorKind::Authentication`] and [`ErrorKind::Padding`] into one outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The context could not be built from the supplied key or cipher.
    Configuration,
    /// The ciphertext or nonce is malformed; nothing was authenticated.
    Input,
    /// The authentication tag did not match.
    Authentication,
    /// The tag matched but the decrypted padding is malformed.
    Padding,
}

/// Errors produced by the composite AEAD.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// The composite key does not split into 16, 24 or 32 byte halves.
    #[error("unsupported composite key length: {0} bytes (expected 32, 48 or 64)")]
    UnsupportedKeyLength(usize),

    /// The block-cipher factory rejected the encryption half of the key.
    #[error("failed to initialise block cipher from encryption key")]
    BlockCipher,

    /// The block cipher's block size cannot be driven by a 16 byte nonce.
    #[error("unsupported block size: {0} bytes (expected {NONCE_SIZE})")]
    UnsupportedBlockSize(usize),

    /// The nonce passed to open is not [`NONCE_SIZE`] bytes.
    #[error("invalid nonce length: {0} bytes (expected {NONCE_SIZE})")]
    InvalidNonceLength(usize),

    /// The combined ciphertext and tag is shorter than the tag itself.
    #[error("invalid ciphertext (too short): {0} bytes")]
    CiphertextTooShort(usize),

    /// The ciphertext, once the tag is removed, is not block aligned.
    #[error("invalid ciphertext (invalid length: {len} % {block_size} != 0)")]
    MisalignedCiphertext {
        /// Length of the ciphertext without the tag.
        len: usize,
        /// Block size of the underlying cipher.
        block_size: usize,
    },

    /// The authentication tag did not match the recomputed tag.
    #[error("invalid ciphertext (tag mismatch)")]
    TagMismatch,

    /// The decrypted plaintext carries malformed padding.
    #[error("invalid padding")]
    InvalidPadding,
}

impl Error {
    /// Returns the [`ErrorKind`] this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnsupportedKeyLength(_) | Error::BlockCipher | Error::UnsupportedBlockSize(_) => {
                ErrorKind::Configuration
            }
            Error::InvalidNonceLength(_)
            | Error::CiphertextTooShort(_)
            | Error::MisalignedCiphertext { .. } => ErrorKind::Input,
            Error::TagMismatch => ErrorKind::Authentication,
            Error::InvalidPadding => ErrorKind::Padding,
        }
    }
}
