//! Session Initialization
//!
//! Single-step handshake: the client sends its fresh AES-256 key encrypted
//! under the published RSA public key, the node recovers it and registers a
//! session. There are no intermediate states; a failed attempt leaves no
//! trace and the client starts over with a new key.

use super::{CryptoError, KeyProvider, SessionKey, SessionKeyStore};
use base64::{
    alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
    Engine as _,
};
use serde::{Deserialize, Serialize};

/// Standard base64, padding optional on input
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Handshake request body from client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStartRequest {
    /// base64 RSA-OAEP ciphertext of the client's AES key
    pub encrypted_key: Option<String>,
}

/// Handshake response body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStartResponse {
    pub session_id: String,
}

/// Recover the client's session key from a wire-encoded payload
///
/// 1. base64 decode (`MalformedPayload`)
/// 2. RSA-OAEP decrypt (`KeyExchangeFailure`)
/// 3. require exactly 32 bytes (`KeyExchangeFailure`)
pub fn decrypt_session_key(
    provider: &KeyProvider,
    encrypted_key: &str,
) -> Result<SessionKey, CryptoError> {
    let encrypted_bytes = STANDARD_LENIENT.decode(encrypted_key.trim()).map_err(|e| {
        tracing::warn!("Base64 decode of handshake payload failed: {}", e);
        CryptoError::MalformedPayload
    })?;

    let raw_key = provider.decrypt(&encrypted_bytes)?;

    SessionKey::from_slice(&raw_key).ok_or_else(|| {
        tracing::warn!(
            "Handshake key has wrong size: expected 32 bytes, got {}",
            raw_key.len()
        );
        CryptoError::KeyExchangeFailure
    })
}

/// Run the handshake and register a new session
///
/// # Returns
/// * `Ok(session_id)` - handle for subsequent requests
/// * `Err` - `MalformedPayload` or `KeyExchangeFailure`; nothing is registered
pub async fn begin_session(
    provider: &KeyProvider,
    store: &SessionKeyStore,
    encrypted_key: &str,
) -> Result<String, CryptoError> {
    let session_key = decrypt_session_key(provider, encrypted_key)?;
    Ok(store.create(session_key).await)
}
