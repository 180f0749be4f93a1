//! CBC + HMAC composite AEAD.
//!
//! **Open verifies before it decrypts.** The tag is recomputed over the
//! received ciphertext and compared in constant time; only a matching tag
//! leads to CBC decryption and unpadding. A padding failure is therefore
//! never observable without a valid tag.
//!
//! The keyed block cipher is stored once; every seal and open chains a fresh
//! CBC instance built from a clone of it, so a context can be shared across
//! threads without locking.

use std::fmt;

use cbc::cipher::{
    generic_array::GenericArray, BlockCipher, BlockDecryptMut, BlockEncryptMut, InnerIvInit,
    InvalidLength,
};
use subtle::ConstantTimeEq;
use tracing::debug;
use zeroize::Zeroizing;

use crate::aead::Aead;
use crate::buffer::append_or_allocate;
use crate::error::Error;
use crate::keys::{self, HashAlgorithm};
use crate::padding::{pad, pad_len, unpad};
use crate::tag::TagComputer;
use crate::NONCE_SIZE;

/// Composite AEAD context for one composite key.
///
/// Immutable after construction. `C` is the block cipher keyed with the
/// encryption half; for the JOSE algorithms it is one of the AES sizes.
pub struct CbcHmac<C> {
    cipher: C,
    tag: TagComputer,
    key_size: usize,
}

impl<C> CbcHmac<C>
where
    C: BlockCipher + BlockEncryptMut + BlockDecryptMut + Clone,
{
    /// Build a context from a composite key and a block-cipher factory.
    ///
    /// The factory receives the encryption half of the key; a cipher
    /// `KeyInit::new_from_slice` works as-is, e.g.
    /// `CbcHmac::new(&key, aes::Aes128::new_from_slice)`.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedKeyLength`] unless `key` is 32, 48 or 64 bytes.
    /// - [`Error::BlockCipher`] if the factory rejects the encryption half.
    /// - [`Error::UnsupportedBlockSize`] if the cipher's block size is not
    ///   the nonce size.
    pub fn new<F>(key: &[u8], factory: F) -> Result<Self, Error>
    where
        F: FnOnce(&[u8]) -> Result<C, InvalidLength>,
    {
        let split = keys::split(key)?;

        let block_size = C::block_size();
        if block_size != NONCE_SIZE {
            return Err(Error::UnsupportedBlockSize(block_size));
        }

        let cipher = factory(split.encryption).map_err(|_| Error::BlockCipher)?;
        let key_size = split.half_len();

        debug!(
            key_size,
            hash = %split.hash,
            tag_size = key_size,
            "cbc-hmac context initialised"
        );

        Ok(Self {
            cipher,
            tag: TagComputer::new(split.hash, split.integrity, key_size),
            key_size,
        })
    }

    /// Block size of the underlying cipher in bytes.
    pub fn block_size(&self) -> usize {
        C::block_size()
    }

    /// Length of each key half in bytes.
    pub fn key_size(&self) -> usize {
        self.key_size
    }

    /// Authentication tag length in bytes. Equal to [`CbcHmac::key_size`].
    pub fn tag_size(&self) -> usize {
        self.tag.tag_len()
    }

    /// Hash selected by the key size.
    pub fn hash(&self) -> HashAlgorithm {
        self.tag.hash()
    }

    /// Compute the truncated authentication tag for a ciphertext.
    pub fn compute_auth_tag(&self, aad: &[u8], nonce: &[u8], ciphertext: &[u8]) -> Vec<u8> {
        self.tag.compute(aad, nonce, ciphertext)
    }

    fn encrypt_blocks(&self, nonce: &[u8], buf: &mut [u8]) {
        let mut cbc =
            cbc::Encryptor::<C>::inner_iv_init(self.cipher.clone(), GenericArray::from_slice(nonce));
        for block in buf.chunks_exact_mut(C::block_size()) {
            cbc.encrypt_block_mut(GenericArray::from_mut_slice(block));
        }
    }

    fn decrypt_blocks(&self, nonce: &[u8], buf: &mut [u8]) {
        let mut cbc =
            cbc::Decryptor::<C>::inner_iv_init(self.cipher.clone(), GenericArray::from_slice(nonce));
        for block in buf.chunks_exact_mut(C::block_size()) {
            cbc.decrypt_block_mut(GenericArray::from_mut_slice(block));
        }
    }

    fn open_inner(
        &self,
        dst: Vec<u8>,
        nonce: &[u8],
        ciphertext: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>, Error> {
        if nonce.len() != NONCE_SIZE {
            return Err(Error::InvalidNonceLength(nonce.len()));
        }
        if ciphertext.len() < self.key_size {
            return Err(Error::CiphertextTooShort(ciphertext.len()));
        }

        let tag_offset = ciphertext.len() - self.tag_size();
        let block_size = self.block_size();
        if tag_offset % block_size != 0 {
            return Err(Error::MisalignedCiphertext {
                len: tag_offset,
                block_size,
            });
        }

        let (ciphertext, tag) = ciphertext.split_at(tag_offset);
        let expected = self.tag.compute(aad, nonce, ciphertext);
        if !bool::from(expected.ct_eq(tag)) {
            return Err(Error::TagMismatch);
        }

        let mut buf = Zeroizing::new(ciphertext.to_vec());
        self.decrypt_blocks(nonce, &mut buf);
        let plaintext = unpad(&buf, block_size)?;

        Ok(append_or_allocate(dst, &[plaintext]))
    }
}

impl<C> Aead for CbcHmac<C>
where
    C: BlockCipher + BlockEncryptMut + BlockDecryptMut + Clone,
{
    fn nonce_size(&self) -> usize {
        NONCE_SIZE
    }

    fn overhead(&self) -> usize {
        self.block_size() + self.tag_size()
    }

    fn seal(&self, dst: Vec<u8>, nonce: &[u8], plaintext: &[u8], aad: &[u8]) -> Vec<u8> {
        assert_eq!(
            nonce.len(),
            NONCE_SIZE,
            "cbc-hmac: nonce must be {NONCE_SIZE} bytes"
        );

        let block_size = self.block_size();
        let mut ciphertext = Vec::with_capacity(plaintext.len() + pad_len(plaintext.len(), block_size));
        ciphertext.extend_from_slice(plaintext);
        pad(&mut ciphertext, block_size);
        self.encrypt_blocks(nonce, &mut ciphertext);

        let tag = self.tag.compute(aad, nonce, &ciphertext);
        append_or_allocate(dst, &[ciphertext.as_slice(), tag.as_slice()])
    }

    fn open(
        &self,
        dst: Vec<u8>,
        nonce: &[u8],
        ciphertext: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>, Error> {
        self.open_inner(dst, nonce, ciphertext, aad)
            .inspect_err(|e| debug!(kind = ?e.kind(), "cbc-hmac open failed"))
    }
}

impl<C> fmt::Debug for CbcHmac<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CbcHmac")
            .field("key_size", &self.key_size)
            .field("tag", &self.tag)
            .finish_non_exhaustive()
    }
}
