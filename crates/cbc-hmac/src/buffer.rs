//! Output buffer strategy for seal and open.
//!
//! Every operation takes a caller-owned prefix `dst` and returns `dst` with
//! the operation's output appended. The first `dst.len()` bytes of the result
//! are always the untouched prefix.

/// Append `parts` to `dst`, reusing its allocation when it has room.
///
/// If the spare capacity of `dst` (capacity minus length) can hold every
/// part, the bytes are written in place and the original allocation is
/// returned. Otherwise a new buffer sized exactly for the result is
/// allocated and the prefix copied into it before the parts.
pub fn append_or_allocate(dst: Vec<u8>, parts: &[&[u8]]) -> Vec<u8> {
    let extra: usize = parts.iter().map(|p| p.len()).sum();
    let mut out = if dst.capacity() - dst.len() >= extra {
        dst
    } else {
        let mut grown = Vec::with_capacity(dst.len() + extra);
        grown.extend_from_slice(&dst);
        grown
    };
    for part in parts {
        out.extend_from_slice(part);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reuses_allocation_with_spare_capacity() {
        let mut dst = Vec::with_capacity(64);
        dst.extend_from_slice(b"prefix");
        let ptr = dst.as_ptr();

        let out = append_or_allocate(dst, &[b"abc".as_slice(), b"def".as_slice()]);
        assert_eq!(out, b"prefixabcdef");
        assert_eq!(out.as_ptr(), ptr);
    }

    #[test]
    fn allocates_when_spare_capacity_is_short() {
        let mut dst = Vec::with_capacity(8);
        dst.extend_from_slice(b"12345678");

        let out = append_or_allocate(dst, &[[0xEEu8; 40].as_slice()]);
        assert_eq!(out.len(), 48);
        assert!(out.capacity() >= 48);
        assert_eq!(&out[..8], b"12345678");
        assert!(out[8..].iter().all(|&b| b == 0xEE));
    }

    #[test]
    fn empty_prefix() {
        let out = append_or_allocate(Vec::new(), &[b"xyz".as_slice()]);
        assert_eq!(out, b"xyz");
    }

    #[test]
    fn no_parts_returns_prefix() {
        let out = append_or_allocate(b"keep".to_vec(), &[]);
        assert_eq!(out, b"keep");
    }
}
