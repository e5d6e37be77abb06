// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Hybrid-Encryption Session Protocol
//!
//! This module implements the cryptographic core that lets a browser refer to
//! customers by opaque per-session tokens instead of raw customer numbers:
//!
//! - **RSA Keys**: process-lifetime 2048-bit key pair, RSA-OAEP (SHA-1) key transport
//! - **Session Keys**: in-memory AES-256 session keys with sliding expiration
//! - **Session Init**: handshake that recovers the client key and opens a session
//! - **AES-GCM**: authenticated decryption of per-request identifier tokens
//!
//! ## Security Considerations
//!
//! - Session keys are stored in memory only, never persisted
//! - A restart discards the key pair and every session; clients re-handshake
//! - Tokens are only ever decrypted with the key of the session they name
//! - Error values never carry key material or library error text
//!
//! ## Protocol Flow
//!
//! 1. Client fetches the node's RSA public key
//! 2. Client generates a random AES-256 key and encrypts it with RSA-OAEP
//! 3. Node decrypts it and returns a session handle
//! 4. Client encrypts each customer number with AES-256-GCM under its key
//! 5. Node looks up the session, refreshes it, and decrypts the token

pub mod aes_gcm;
pub mod context;
pub mod error;
pub mod rsa_keys;
pub mod session_init;
pub mod session_keys;

pub use aes_gcm::{decrypt_identifier, encrypt_identifier};
pub use context::SessionContext;
pub use error::CryptoError;
pub use rsa_keys::{encrypt_for_public_key, KeyProvider};
pub use session_init::{begin_session, SessionStartRequest, SessionStartResponse};
pub use session_keys::{SessionKey, SessionKeyStore, DEFAULT_SESSION_TTL};
