// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Crypto Error Types
//!
//! One variant per failure stage of the session protocol. Each stage of the
//! handshake and identifier pipelines returns exactly one of these, so callers
//! can match on the kind without inspecting messages.
//!
//! ## Error Variants
//!
//! - **MalformedPayload**: handshake payload is not valid base64
//! - **KeyExchangeFailure**: RSA-OAEP decryption failed or key size mismatch
//! - **SessionNotFound**: no live session for the handle
//! - **SessionExpired**: session idled past its TTL and was evicted
//! - **MalformedCiphertext**: identifier token is not base64url or too short
//! - **DecryptionFailure**: AES-GCM authentication failed
//! - **InvalidIdentifierFormat**: plaintext is not a decimal integer
//! - **KeyGeneration**: the RSA key pair could not be created at startup
//!
//! Display strings are deliberately generic. They never contain key bytes,
//! tokens or the underlying library error.

use thiserror::Error;

/// Errors produced by the session protocol
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Handshake payload could not be decoded from its wire encoding
    #[error("Malformed key exchange payload")]
    MalformedPayload,

    /// Asymmetric decryption failed, or the recovered key has the wrong size
    #[error("Key exchange failed")]
    KeyExchangeFailure,

    /// No session is registered under the handle
    #[error("Session not found")]
    SessionNotFound,

    /// Session existed but was idle for longer than the TTL
    #[error("Session expired")]
    SessionExpired,

    /// Identifier token could not be decoded or is shorter than a nonce
    #[error("Malformed identifier ciphertext")]
    MalformedCiphertext,

    /// Authenticated decryption failed (tampered token or foreign key)
    #[error("Identifier decryption failed")]
    DecryptionFailure,

    /// Decrypted plaintext is not a decimal integer
    #[error("Invalid identifier format")]
    InvalidIdentifierFormat,

    /// RSA key pair generation failed
    #[error("Key pair generation failed: {0}")]
    KeyGeneration(String),
}

impl CryptoError {
    /// True for failures that mean the caller has no usable session
    pub fn is_session_failure(&self) -> bool {
        matches!(self, CryptoError::SessionNotFound | CryptoError::SessionExpired)
    }

    /// True for failures of the per-request identifier token
    pub fn is_identifier_failure(&self) -> bool {
        matches!(
            self,
            CryptoError::MalformedCiphertext
                | CryptoError::DecryptionFailure
                | CryptoError::InvalidIdentifierFormat
        )
    }

    /// True for failures of the handshake payload
    pub fn is_handshake_failure(&self) -> bool {
        matches!(
            self,
            CryptoError::MalformedPayload | CryptoError::KeyExchangeFailure
        )
    }
}

// Conversion from base64 decode errors
impl From<base64::DecodeError> for CryptoError {
    fn from(_: base64::DecodeError) -> Self {
        CryptoError::MalformedPayload
    }
}

// Conversion from rsa errors (decryption and padding)
impl From<rsa::Error> for CryptoError {
    fn from(_: rsa::Error) -> Self {
        CryptoError::KeyExchangeFailure
    }
}

// Conversion from aes-gcm errors
impl From<aes_gcm::Error> for CryptoError {
    fn from(_: aes_gcm::Error) -> Self {
        CryptoError::DecryptionFailure
    }
}
