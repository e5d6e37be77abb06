// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Session expiry and sweep tests
//!
//! Use paused tokio time so TTL boundaries are exact.

use crate::common::{open_session, test_context};
use customer_doc_gateway::crypto::{encrypt_identifier, CryptoError};
use std::time::Duration;
use tokio::time::advance;

const TTL: Duration = Duration::from_secs(30 * 60);

#[tokio::test(start_paused = true)]
async fn test_idle_session_expires() {
    let context = test_context(TTL);
    let (session_id, key) = open_session(&context).await;
    let token = encrypt_identifier(&key, 9).unwrap();

    advance(TTL + Duration::from_secs(1)).await;

    assert_eq!(
        context.resolve(&session_id, &token).await,
        Err(CryptoError::SessionExpired)
    );
    assert_eq!(context.active_sessions().await, 0);
}

#[tokio::test(start_paused = true)]
async fn test_expired_session_absent_from_count() {
    let context = test_context(TTL);
    open_session(&context).await;
    open_session(&context).await;
    assert_eq!(context.active_sessions().await, 2);

    advance(TTL + Duration::from_millis(1)).await;
    assert_eq!(context.active_sessions().await, 0);
}

#[tokio::test(start_paused = true)]
async fn test_sliding_refresh_keeps_session_alive() {
    let context = test_context(TTL);
    let (session_id, key) = open_session(&context).await;

    // Four hours of activity, one request every 29 minutes
    for i in 0..8 {
        advance(Duration::from_secs(29 * 60)).await;
        let token = encrypt_identifier(&key, i).unwrap();
        assert_eq!(context.resolve(&session_id, &token).await, Ok(i));
    }
    assert_eq!(context.active_sessions().await, 1);
}

#[tokio::test(start_paused = true)]
async fn test_failed_decryption_still_refreshes_session() {
    // The session lookup succeeds before the token is checked
    let context = test_context(TTL);
    let (session_id, key) = open_session(&context).await;

    advance(Duration::from_secs(20 * 60)).await;
    assert_eq!(
        context.resolve(&session_id, "AAAA").await,
        Err(CryptoError::MalformedCiphertext)
    );

    advance(Duration::from_secs(20 * 60)).await;
    let token = encrypt_identifier(&key, 3).unwrap();
    assert_eq!(context.resolve(&session_id, &token).await, Ok(3));
}

#[tokio::test(start_paused = true)]
async fn test_only_idle_sessions_are_swept() {
    let context = test_context(TTL);
    let (idle, _) = open_session(&context).await;
    let (active, active_key) = open_session(&context).await;

    advance(Duration::from_secs(20 * 60)).await;
    let token = encrypt_identifier(&active_key, 1).unwrap();
    context.resolve(&active, &token).await.unwrap();

    advance(Duration::from_secs(20 * 60)).await;
    assert_eq!(context.active_sessions().await, 1);
    assert_eq!(
        context.sessions().lookup(&idle).await,
        Err(CryptoError::SessionNotFound)
    );
    assert!(context.sessions().lookup(&active).await.is_ok());
}

#[tokio::test]
async fn test_concurrent_resolve_and_close() {
    let context = std::sync::Arc::new(test_context(TTL));
    let (session_id, key) = open_session(&context).await;

    let mut handles = Vec::new();
    for i in 0..32 {
        let context = context.clone();
        let session_id = session_id.clone();
        let token = encrypt_identifier(&key, i).unwrap();
        handles.push(tokio::spawn(async move {
            context.resolve(&session_id, &token).await
        }));
    }
    context.close_session(&session_id).await;

    for (i, handle) in handles.into_iter().enumerate() {
        // Each request either saw the live session or the closed one
        match handle.await.unwrap() {
            Ok(id) => assert_eq!(id, i as i32),
            Err(e) => assert_eq!(e, CryptoError::SessionNotFound),
        }
    }
    assert_eq!(context.active_sessions().await, 0);
}
