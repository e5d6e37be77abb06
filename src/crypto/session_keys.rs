//! Session Key Storage
//!
//! Manages in-memory storage of session encryption keys with sliding
//! expiration. Every successful lookup resets a session's idle clock; a
//! session idle for longer than the TTL is evicted on its next lookup or on
//! the next sweep.
//!
//! **Security**: Keys are stored in memory only and never persisted to disk.
//!
//! **Sweeping**: `count()` performs a full scan before counting. That is O(n)
//! but session counts stay in the tens to hundreds. Deployments with many
//! abandoned sessions can additionally run `purge_expired()` on a timer.

use super::CryptoError;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;
use uuid::Uuid;
use zeroize::Zeroize;

/// AES-256 key length in bytes
pub const SESSION_KEY_LEN: usize = 32;

/// Default idle timeout (30 minutes)
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);

/// Raw AES-256 key bound to one session
///
/// `Debug` never prints key bytes and the buffer is wiped on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionKey([u8; SESSION_KEY_LEN]);

impl SessionKey {
    pub fn new(bytes: [u8; SESSION_KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Wrap a slice, rejecting anything that is not exactly 32 bytes
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let key: [u8; SESSION_KEY_LEN] = bytes.try_into().ok()?;
        Some(Self(key))
    }

    pub fn as_bytes(&self) -> &[u8; SESSION_KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionKey([REDACTED])")
    }
}

impl Drop for SessionKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

struct SessionEntry {
    key: SessionKey,
    last_activity: Instant,
}

#[derive(Default)]
struct StoreInner {
    sessions: HashMap<String, SessionEntry>,
}

/// In-memory storage for session encryption keys
///
/// Provides thread-safe storage and retrieval of session keys using an
/// opaque session handle as the lookup key.
///
/// # Example
///
/// ```ignore
/// let store = SessionKeyStore::new();
/// let session_id = store.create(SessionKey::new([0u8; 32])).await;
/// let key = store.lookup(&session_id).await?;
/// store.remove(&session_id).await;
/// ```
#[derive(Clone)]
pub struct SessionKeyStore {
    inner: Arc<RwLock<StoreInner>>,
    ttl: Duration,
}

impl SessionKeyStore {
    /// Create a new session key store with the default 30 minute TTL
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_SESSION_TTL)
    }

    /// Create a store with a custom idle timeout
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(StoreInner::default())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Register a key under a fresh random handle
    ///
    /// # Returns
    ///
    /// The session handle (UUID v4) the client uses for later requests
    pub async fn create(&self, key: SessionKey) -> String {
        let mut inner = self.inner.write().await;

        let mut session_id = Uuid::new_v4().to_string();
        while inner.sessions.contains_key(&session_id) {
            session_id = Uuid::new_v4().to_string();
        }

        inner.sessions.insert(
            session_id.clone(),
            SessionEntry {
                key,
                last_activity: Instant::now(),
            },
        );
        tracing::info!(
            "🔑 Session key stored for session: {} (total keys: {})",
            session_id,
            inner.sessions.len()
        );
        session_id
    }

    /// Retrieve a session key and refresh its idle clock
    ///
    /// # Errors
    ///
    /// * `SessionNotFound` - no session under this handle
    /// * `SessionExpired` - session was idle longer than the TTL; it is evicted
    pub async fn lookup(&self, session_id: &str) -> Result<SessionKey, CryptoError> {
        let mut inner = self.inner.write().await;
        let now = Instant::now();

        let entry = inner
            .sessions
            .get_mut(session_id)
            .ok_or(CryptoError::SessionNotFound)?;

        if now.saturating_duration_since(entry.last_activity) > self.ttl {
            inner.sessions.remove(session_id);
            tracing::info!("⌛ Session expired and removed: {}", session_id);
            return Err(CryptoError::SessionExpired);
        }

        entry.last_activity = entry.last_activity.max(now);
        Ok(entry.key.clone())
    }

    /// Remove a session
    ///
    /// Idempotent: removing an unknown or already removed handle is a no-op.
    pub async fn remove(&self, session_id: &str) {
        let mut inner = self.inner.write().await;
        if inner.sessions.remove(session_id).is_some() {
            tracing::info!(
                "🗑️  Session key cleared for session: {} (remaining: {})",
                session_id,
                inner.sessions.len()
            );
        }
    }

    /// Evict every session idle for longer than the TTL
    ///
    /// # Returns
    ///
    /// Number of sessions evicted
    pub async fn purge_expired(&self) -> usize {
        let mut inner = self.inner.write().await;
        let now = Instant::now();
        let ttl = self.ttl;

        let expired: Vec<String> = inner
            .sessions
            .iter()
            .filter(|(_, entry)| now.saturating_duration_since(entry.last_activity) > ttl)
            .map(|(id, _)| id.clone())
            .collect();

        for session_id in &expired {
            inner.sessions.remove(session_id);
            tracing::info!("🧹 Cleaned up expired session: {}", session_id);
        }
        expired.len()
    }

    /// Number of live sessions, after sweeping expired ones
    pub async fn count(&self) -> usize {
        self.purge_expired().await;
        self.inner.read().await.sessions.len()
    }

    /// Drop every session key
    ///
    /// Called once the server has shut down.
    pub async fn clear_all(&self) {
        let mut inner = self.inner.write().await;
        let count = inner.sessions.len();
        inner.sessions.clear();
        tracing::info!("🗑️  Cleared all session keys (count: {})", count);
    }
}

impl Default for SessionKeyStore {
    fn default() -> Self {
        Self::new()
    }
}
