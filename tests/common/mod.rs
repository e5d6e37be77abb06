// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared fixtures for integration tests

#![allow(dead_code)]

use base64::{engine::general_purpose::STANDARD, Engine as _};
use customer_doc_gateway::{
    crypto::{encrypt_for_public_key, KeyProvider, SessionKey, SessionKeyStore},
    AppState, GatewayConfig, InMemoryDocuments, SessionContext,
};
use rand::RngCore;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

/// One RSA key pair per test binary; generation dominates test time otherwise
pub fn shared_key_provider() -> KeyProvider {
    static PROVIDER: OnceLock<KeyProvider> = OnceLock::new();
    PROVIDER
        .get_or_init(|| KeyProvider::generate().expect("RSA key generation"))
        .clone()
}

pub fn test_context(ttl: Duration) -> SessionContext {
    SessionContext::new(shared_key_provider(), SessionKeyStore::with_ttl(ttl))
}

pub fn random_session_key() -> [u8; 32] {
    let mut key = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut key);
    key
}

/// What the browser sends to /session/start for `raw_key`
pub fn wrap_session_key(public_key_b64: &str, raw_key: &[u8]) -> String {
    let der = STANDARD.decode(public_key_b64).expect("public key base64");
    let ciphertext = encrypt_for_public_key(&der, raw_key).expect("RSA-OAEP encrypt");
    STANDARD.encode(ciphertext)
}

/// Handshake through the context and return (session_id, key)
pub async fn open_session(context: &SessionContext) -> (String, SessionKey) {
    let raw = random_session_key();
    let payload = wrap_session_key(&context.public_key_base64(), &raw);
    let session_id = context
        .begin_session(&payload)
        .await
        .expect("handshake should succeed");
    (session_id, SessionKey::new(raw))
}

pub async fn test_state(documents: InMemoryDocuments) -> AppState {
    AppState::new(
        test_context(Duration::from_secs(30 * 60)),
        Arc::new(documents),
        GatewayConfig::default(),
    )
}
