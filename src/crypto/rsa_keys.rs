// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! RSA Key Provider
//!
//! Owns the process-lifetime RSA key pair used for session key transport.
//! The public half is published to clients; the private half never leaves
//! this struct.
//!
//! **Padding**: RSA-OAEP with SHA-1 for both the OAEP hash and MGF1. This is
//! the default of the browser client's encryption library and must match it
//! byte for byte. It is an interoperability constraint, not a recommendation;
//! moving to SHA-256 requires a coordinated client release.

use super::CryptoError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use rsa::{
    pkcs8::{DecodePublicKey, EncodePublicKey},
    Oaep, RsaPrivateKey, RsaPublicKey,
};
use sha1::Sha1;

/// RSA modulus size in bits
pub const RSA_KEY_BITS: usize = 2048;

/// Holder of the process RSA key pair
#[derive(Clone)]
pub struct KeyProvider {
    private_key: RsaPrivateKey,
    public_key_der: Vec<u8>,
}

impl KeyProvider {
    /// Generate a fresh 2048-bit key pair
    ///
    /// Failure here is unrecoverable; the binary aborts startup on error.
    pub fn generate() -> Result<Self, CryptoError> {
        let mut rng = rand::thread_rng();
        let private_key = RsaPrivateKey::new(&mut rng, RSA_KEY_BITS)
            .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?;
        Self::from_private_key(private_key)
    }

    /// Wrap an existing private key
    pub fn from_private_key(private_key: RsaPrivateKey) -> Result<Self, CryptoError> {
        let public_key = RsaPublicKey::from(&private_key);
        let public_key_der = public_key
            .to_public_key_der()
            .map_err(|e| CryptoError::KeyGeneration(e.to_string()))?
            .as_bytes()
            .to_vec();

        tracing::info!(
            "🔐 RSA key pair ready ({} bits, public key {} bytes DER)",
            RSA_KEY_BITS,
            public_key_der.len()
        );

        Ok(Self {
            private_key,
            public_key_der,
        })
    }

    /// Public key as SubjectPublicKeyInfo DER
    pub fn public_key_der(&self) -> &[u8] {
        &self.public_key_der
    }

    /// Public key as standard base64 of its DER encoding
    pub fn public_key_base64(&self) -> String {
        STANDARD.encode(&self.public_key_der)
    }

    /// Decrypt an RSA-OAEP (SHA-1) ciphertext with the private key
    ///
    /// Any padding, length or format problem is reported as
    /// `KeyExchangeFailure` with no further detail.
    pub fn decrypt(&self, payload: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.private_key
            .decrypt(Oaep::new::<Sha1>(), payload)
            .map_err(|e| {
                tracing::debug!("RSA-OAEP decryption rejected: {}", e);
                CryptoError::KeyExchangeFailure
            })
    }
}

/// Client side of the key transport: encrypt `data` for a DER public key
///
/// Mirrors what the browser client does before calling the handshake route.
pub fn encrypt_for_public_key(public_key_der: &[u8], data: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let public_key =
        RsaPublicKey::from_public_key_der(public_key_der).map_err(|_| CryptoError::MalformedPayload)?;
    let mut rng = rand::thread_rng();
    Ok(public_key.encrypt(&mut rng, Oaep::new::<Sha1>(), data)?)
}
