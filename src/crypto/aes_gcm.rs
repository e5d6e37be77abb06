// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! AES-GCM Customer Identifier Tokens
//!
//! Implements the per-request opaque identifier: a customer number encrypted
//! with the session's AES-256 key by the browser's Web Crypto API.
//!
//! **Token Format**:
//! ```text
//! base64url( nonce (12 bytes) | ciphertext+tag (variable length) )
//! ```
//!
//! - Nonce: 12 bytes (96 bits), random per token
//! - Ciphertext+Tag: UTF-8 decimal digits + 16-byte authentication tag
//! - Algorithm: AES-256-GCM, no Additional Authenticated Data
//! - base64url padding is optional on input and omitted on output
//!
//! Decoding runs as decode → split → decrypt → parse and stops at the first
//! failing stage. A tag mismatch is reported the same way whether the token
//! was tampered with or belongs to another session.

use super::{CryptoError, SessionKey};
use aes_gcm::{
    aead::{Aead, KeyInit, Payload},
    Aes256Gcm, Key, Nonce,
};
use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};
use rand::RngCore;

/// AES-GCM nonce length in bytes
pub const NONCE_LEN: usize = 12;

/// AES-GCM authentication tag length in bytes
pub const TAG_LEN: usize = 16;

/// base64url that accepts tokens with or without trailing `=`
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

fn cipher_for(key: &SessionKey) -> Aes256Gcm {
    Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()))
}

/// Decrypt a customer identifier token with a session key
///
/// # Arguments
///
/// * `key` - The session's AES-256 key
/// * `token` - base64url token as sent by the client
///
/// # Errors
///
/// * `MalformedCiphertext` - not base64url, or shorter than a nonce
/// * `DecryptionFailure` - authentication tag verification failed
/// * `InvalidIdentifierFormat` - plaintext is not a decimal `i32`
pub fn decrypt_identifier(key: &SessionKey, token: &str) -> Result<i32, CryptoError> {
    let encrypted = URL_SAFE_LENIENT
        .decode(token.trim())
        .map_err(|_| CryptoError::MalformedCiphertext)?;

    if encrypted.len() < NONCE_LEN {
        tracing::warn!("Encrypted ID too short: {} bytes", encrypted.len());
        return Err(CryptoError::MalformedCiphertext);
    }

    let (nonce, ciphertext) = encrypted.split_at(NONCE_LEN);

    let plaintext = cipher_for(key).decrypt(
        Nonce::from_slice(nonce),
        Payload {
            msg: ciphertext,
            aad: b"",
        },
    )?;

    parse_identifier(&plaintext)
}

fn parse_identifier(plaintext: &[u8]) -> Result<i32, CryptoError> {
    std::str::from_utf8(plaintext)
        .ok()
        .and_then(|digits| digits.parse::<i32>().ok())
        .ok_or(CryptoError::InvalidIdentifierFormat)
}

/// Encrypt a customer identifier under a session key
///
/// Client-side counterpart of [`decrypt_identifier`], using a fresh random
/// nonce for every token.
pub fn encrypt_identifier(key: &SessionKey, customer_id: i32) -> Result<String, CryptoError> {
    let mut nonce = [0u8; NONCE_LEN];
    rand::thread_rng().fill_bytes(&mut nonce);
    encrypt_bytes_with_nonce(key, &nonce, customer_id.to_string().as_bytes())
}

/// Encrypt arbitrary plaintext into the token format with a caller-chosen nonce
pub fn encrypt_bytes_with_nonce(
    key: &SessionKey,
    nonce: &[u8; NONCE_LEN],
    plaintext: &[u8],
) -> Result<String, CryptoError> {
    let ciphertext = cipher_for(key).encrypt(
        Nonce::from_slice(nonce),
        Payload {
            msg: plaintext,
            aad: b"",
        },
    )?;

    let mut encrypted = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    encrypted.extend_from_slice(nonce);
    encrypted.extend_from_slice(&ciphertext);
    Ok(URL_SAFE_LENIENT.encode(encrypted))
}
