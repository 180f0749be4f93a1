//! PKCS#7 block padding.
//!
//! Every pad byte holds the pad length. Input that is already block aligned
//! gains a full block of padding, so the padded length is always
//! `(len / n + 1) * n`.

use crate::error::Error;

/// Number of pad bytes [`pad`] appends to a `len` byte buffer.
pub fn pad_len(len: usize, block_size: usize) -> usize {
    block_size - len % block_size
}

/// Append padding to `buf` so its length becomes a multiple of `block_size`.
///
/// `block_size` must be in `1..=255`.
pub fn pad(buf: &mut Vec<u8>, block_size: usize) {
    debug_assert!((1..=255).contains(&block_size));
    let rem = pad_len(buf.len(), block_size);
    buf.resize(buf.len() + rem, rem as u8);
}

/// Strip padding from a decrypted buffer.
///
/// # Errors
///
/// Returns [`Error::InvalidPadding`] if `buf` is empty or not block aligned,
/// if the last byte is zero or larger than `block_size`, or if any of the
/// trailing pad bytes differs from the last byte.
pub fn unpad(buf: &[u8], block_size: usize) -> Result<&[u8], Error> {
    if buf.is_empty() || buf.len() % block_size != 0 {
        return Err(Error::InvalidPadding);
    }

    let last = buf[buf.len() - 1];
    let n = usize::from(last);
    if n == 0 || n > block_size {
        return Err(Error::InvalidPadding);
    }

    let count = buf
        .iter()
        .rev()
        .take(n)
        .take_while(|&&b| b == last)
        .count();
    if count != n {
        return Err(Error::InvalidPadding);
    }

    Ok(&buf[..buf.len() - n])
}
