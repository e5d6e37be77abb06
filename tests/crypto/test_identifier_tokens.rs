// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Identifier token tamper and format tests

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use customer_doc_gateway::crypto::{
    aes_gcm::{encrypt_bytes_with_nonce, NONCE_LEN, TAG_LEN},
    decrypt_identifier, encrypt_identifier, CryptoError, SessionKey,
};
use rand::RngCore;

fn random_key() -> SessionKey {
    let mut raw = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut raw);
    SessionKey::new(raw)
}

#[test]
fn test_tokens_are_unique_per_encryption() {
    let key = random_key();
    let a = encrypt_identifier(&key, 42).unwrap();
    let b = encrypt_identifier(&key, 42).unwrap();

    assert_ne!(a, b, "fresh nonce per token");
    assert_eq!(decrypt_identifier(&key, &a), Ok(42));
    assert_eq!(decrypt_identifier(&key, &b), Ok(42));
}

#[test]
fn test_token_is_url_safe() {
    let key = random_key();
    for id in [0, 1, 42, i32::MAX, i32::MIN] {
        let token = encrypt_identifier(&key, id).unwrap();
        assert!(!token.contains('+') && !token.contains('/') && !token.contains('='));
        assert_eq!(decrypt_identifier(&key, &token), Ok(id));
    }
}

#[test]
fn test_random_single_bit_flips_always_rejected() {
    let mut rng = rand::thread_rng();
    for _ in 0..200 {
        let key = random_key();
        let token = encrypt_identifier(&key, (rng.next_u32() >> 1) as i32).unwrap();
        let mut raw = URL_SAFE_NO_PAD.decode(&token).unwrap();

        let body_len = raw.len() - NONCE_LEN;
        let byte = NONCE_LEN + (rng.next_u32() as usize % body_len);
        raw[byte] ^= 1 << (rng.next_u32() % 8);

        assert_eq!(
            decrypt_identifier(&key, &URL_SAFE_NO_PAD.encode(&raw)),
            Err(CryptoError::DecryptionFailure)
        );
    }
}

#[test]
fn test_truncated_tag_rejected() {
    let key = random_key();
    let token = encrypt_identifier(&key, 31337).unwrap();
    let raw = URL_SAFE_NO_PAD.decode(&token).unwrap();
    assert_eq!(raw.len(), NONCE_LEN + "31337".len() + TAG_LEN);

    let truncated = URL_SAFE_NO_PAD.encode(&raw[..raw.len() - 1]);
    assert_eq!(
        decrypt_identifier(&key, &truncated),
        Err(CryptoError::DecryptionFailure)
    );
}

#[test]
fn test_stage_errors() {
    let key = random_key();

    assert_eq!(
        decrypt_identifier(&key, ""),
        Err(CryptoError::MalformedCiphertext)
    );
    assert_eq!(
        decrypt_identifier(&key, &URL_SAFE_NO_PAD.encode([0u8; 5])),
        Err(CryptoError::MalformedCiphertext)
    );

    let text = encrypt_bytes_with_nonce(&key, &[0u8; NONCE_LEN], b"customer-42").unwrap();
    assert_eq!(
        decrypt_identifier(&key, &text),
        Err(CryptoError::InvalidIdentifierFormat)
    );
}
