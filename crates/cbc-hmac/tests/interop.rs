//! Wire-format checks against independent CBC and HMAC implementations.
//!
//! Inputs are the RFC 7518 Appendix B parameters. Expected values are
//! recomputed with `cbc` (PKCS#7) and `hmac` directly, so any drift in
//! layout, padding, key split or truncation shows up here.

use aes::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyInit, KeyIvInit};
use aes::{Aes128, Aes192, Aes256};
use cbc_hmac::tag::aad_bit_len;
use cbc_hmac::{Aead, CbcHmac, ContentEncryption, Error};
use hex_literal::hex;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

const PLAINTEXT: &[u8] = b"A cipher system must not be required to be secret, and it must \
be able to fall into the hands of the enemy without inconvenience";
const AAD: &[u8] = b"The second principle of Auguste Kerckhoffs";
const IV: [u8; 16] = hex!("1af38c2dc2b96ffdd86694092341bc04");

fn rfc_key(len: usize) -> Vec<u8> {
    (0..len).map(|i| i as u8).collect()
}

fn mac_input(ciphertext: &[u8]) -> Vec<u8> {
    let mut input = Vec::new();
    input.extend_from_slice(AAD);
    input.extend_from_slice(&IV);
    input.extend_from_slice(ciphertext);
    input.extend_from_slice(&aad_bit_len(AAD));
    input
}

#[test]
fn aad_length_field_matches_rfc() {
    assert_eq!(aad_bit_len(AAD), hex!("0000000000000150"));
}

#[test]
fn a128cbc_hs256_matches_reference_construction() {
    let key = rfc_key(32);
    let aead = CbcHmac::new(&key, Aes128::new_from_slice).unwrap();
    let sealed = aead.seal(Vec::new(), &IV, PLAINTEXT, AAD);

    // 128 byte plaintext is aligned, so PKCS#7 adds a full block.
    assert_eq!(sealed.len(), 144 + 16);
    let (ciphertext, tag) = sealed.split_at(144);

    let mut m = <Hmac<Sha256> as Mac>::new_from_slice(&key[..16]).unwrap();
    m.update(&mac_input(ciphertext));
    assert_eq!(tag, &m.finalize().into_bytes()[..16]);

    let mut buf = ciphertext.to_vec();
    let plaintext = cbc::Decryptor::<Aes128>::new_from_slices(&key[16..], &IV)
        .unwrap()
        .decrypt_padded_mut::<Pkcs7>(&mut buf)
        .unwrap();
    assert_eq!(plaintext, PLAINTEXT);
}

#[test]
fn a192cbc_hs384_matches_reference_construction() {
    let key = rfc_key(48);
    let aead = CbcHmac::new(&key, Aes192::new_from_slice).unwrap();
    let sealed = aead.seal(Vec::new(), &IV, PLAINTEXT, AAD);

    assert_eq!(sealed.len(), 144 + 24);
    let (ciphertext, tag) = sealed.split_at(144);

    let mut m = <Hmac<Sha384> as Mac>::new_from_slice(&key[..24]).unwrap();
    m.update(&mac_input(ciphertext));
    assert_eq!(tag, &m.finalize().into_bytes()[..24]);

    let mut buf = ciphertext.to_vec();
    let plaintext = cbc::Decryptor::<Aes192>::new_from_slices(&key[24..], &IV)
        .unwrap()
        .decrypt_padded_mut::<Pkcs7>(&mut buf)
        .unwrap();
    assert_eq!(plaintext, PLAINTEXT);
}

#[test]
fn a256cbc_hs512_matches_reference_construction() {
    let key = rfc_key(64);
    let aead = CbcHmac::new(&key, Aes256::new_from_slice).unwrap();
    let sealed = aead.seal(Vec::new(), &IV, PLAINTEXT, AAD);

    assert_eq!(sealed.len(), 144 + 32);
    let (ciphertext, tag) = sealed.split_at(144);

    let mut m = <Hmac<Sha512> as Mac>::new_from_slice(&key[..32]).unwrap();
    m.update(&mac_input(ciphertext));
    assert_eq!(tag, &m.finalize().into_bytes()[..32]);

    let mut buf = ciphertext.to_vec();
    let plaintext = cbc::Decryptor::<Aes256>::new_from_slices(&key[32..], &IV)
        .unwrap()
        .decrypt_padded_mut::<Pkcs7>(&mut buf)
        .unwrap();
    assert_eq!(plaintext, PLAINTEXT);
}

#[test]
fn opens_ciphertext_produced_by_reference_construction() {
    let key = rfc_key(32);
    let message = b"odd length message";

    let mut buf = vec![0u8; message.len() + 16];
    buf[..message.len()].copy_from_slice(message);
    let ciphertext = cbc::Encryptor::<Aes128>::new_from_slices(&key[16..], &IV)
        .unwrap()
        .encrypt_padded_mut::<Pkcs7>(&mut buf, message.len())
        .unwrap()
        .to_vec();

    let mut m = <Hmac<Sha256> as Mac>::new_from_slice(&key[..16]).unwrap();
    m.update(&mac_input(&ciphertext));
    let mut envelope = ciphertext.clone();
    envelope.extend_from_slice(&m.finalize().into_bytes()[..16]);

    let aead = ContentEncryption::A128CbcHs256.new_aead(&key).unwrap();
    let opened = aead.open(Vec::new(), &IV, &envelope, AAD).unwrap();
    assert_eq!(opened, message);
}

#[test]
fn full_length_tag_is_rejected() {
    // A tag of the native digest length is not the wire format.
    let key = rfc_key(32);
    let aead = CbcHmac::new(&key, Aes128::new_from_slice).unwrap();
    let sealed = aead.seal(Vec::new(), &IV, b"short", AAD);
    let ciphertext = &sealed[..16];

    let mut m = <Hmac<Sha256> as Mac>::new_from_slice(&key[..16]).unwrap();
    m.update(&mac_input(ciphertext));
    let mut envelope = ciphertext.to_vec();
    envelope.extend_from_slice(&m.finalize().into_bytes());

    assert_eq!(aead.open(Vec::new(), &IV, &envelope, AAD), Err(Error::TagMismatch));
}
