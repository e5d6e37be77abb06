// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Session protocol context
//!
//! Bundles the process key pair and the session store. Built once by the
//! entry point and shared (behind an `Arc`) with every request handler.

use super::{
    begin_session, decrypt_identifier, CryptoError, KeyProvider, SessionKeyStore,
};
use std::time::Duration;

pub struct SessionContext {
    keys: KeyProvider,
    sessions: SessionKeyStore,
}

impl SessionContext {
    /// Generate a key pair and an empty store with the given idle timeout
    pub fn generate(session_ttl: Duration) -> Result<Self, CryptoError> {
        Ok(Self::new(
            KeyProvider::generate()?,
            SessionKeyStore::with_ttl(session_ttl),
        ))
    }

    pub fn new(keys: KeyProvider, sessions: SessionKeyStore) -> Self {
        Self { keys, sessions }
    }

    pub fn keys(&self) -> &KeyProvider {
        &self.keys
    }

    pub fn sessions(&self) -> &SessionKeyStore {
        &self.sessions
    }

    /// Public key for clients, base64 of SubjectPublicKeyInfo DER
    pub fn public_key_base64(&self) -> String {
        self.keys.public_key_base64()
    }

    pub async fn begin_session(&self, encrypted_key: &str) -> Result<String, CryptoError> {
        begin_session(&self.keys, &self.sessions, encrypted_key).await
    }

    /// Resolve an identifier token sent under `session_id`
    ///
    /// Session failures are returned unchanged; the token is only ever
    /// decrypted with the key bound to that session.
    pub async fn resolve(&self, session_id: &str, token: &str) -> Result<i32, CryptoError> {
        let key = self.sessions.lookup(session_id).await?;
        let customer_id = decrypt_identifier(&key, token)?;
        tracing::debug!("Resolved identifier for session {}", session_id);
        Ok(customer_id)
    }

    pub async fn close_session(&self, session_id: &str) {
        self.sessions.remove(session_id).await;
    }

    pub async fn active_sessions(&self) -> usize {
        self.sessions.count().await
    }
}
