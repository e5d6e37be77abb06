// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use clap::Args;
use rand::RngCore;
use tracing::info;

use crate::api::CustomerInfoResponse;
use crate::crypto::{
    encrypt_for_public_key, encrypt_identifier, SessionKey, SessionStartRequest,
    SessionStartResponse,
};

/// Arguments for handshake command
#[derive(Args, Debug)]
pub struct HandshakeArgs {
    /// Gateway base URL
    #[arg(long, env = "GATEWAY_URL", default_value = "http://127.0.0.1:8080")]
    pub url: String,
}

/// Arguments for encrypt-id command
#[derive(Args, Debug)]
pub struct EncryptIdArgs {
    /// Session key as 64 hex characters
    #[arg(long, env = "GATEWAY_SESSION_KEY")]
    pub key: String,

    /// Customer number to encrypt
    #[arg(long, allow_hyphen_values = true)]
    pub id: i32,
}

/// Arguments for info command
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Gateway base URL
    #[arg(long, env = "GATEWAY_URL", default_value = "http://127.0.0.1:8080")]
    pub url: String,

    /// Session handle returned by handshake
    #[arg(long, env = "GATEWAY_SESSION_ID")]
    pub session: String,

    /// Session key as 64 hex characters
    #[arg(long, env = "GATEWAY_SESSION_KEY")]
    pub key: String,

    /// Customer number to look up
    #[arg(long, allow_hyphen_values = true)]
    pub id: i32,
}

/// Parse a 64-character hex session key
pub fn parse_session_key(hex_key: &str) -> Result<SessionKey> {
    let bytes = hex::decode(hex_key.trim().trim_start_matches("0x"))
        .map_err(|e| anyhow!("Session key is not valid hex: {}", e))?;
    SessionKey::from_slice(&bytes)
        .ok_or_else(|| anyhow!("Session key must be 32 bytes, got {}", bytes.len()))
}

fn base_url(url: &str) -> &str {
    url.trim_end_matches('/')
}

pub async fn handshake(args: HandshakeArgs) -> Result<()> {
    let client = reqwest::Client::new();
    let url = base_url(&args.url);

    let public_key_b64 = client
        .get(format!("{}/keys/public", url))
        .send()
        .await?
        .error_for_status()?
        .text()
        .await?;
    let public_key_der = STANDARD
        .decode(public_key_b64.trim())
        .map_err(|e| anyhow!("Public key is not valid base64: {}", e))?;
    info!("Fetched public key ({} bytes DER)", public_key_der.len());

    let mut raw_key = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut raw_key);
    let encrypted = encrypt_for_public_key(&public_key_der, &raw_key)?;

    let response: SessionStartResponse = client
        .post(format!("{}/session/start", url))
        .json(&SessionStartRequest {
            encrypted_key: Some(STANDARD.encode(encrypted)),
        })
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    println!("Session ID:  {}", response.session_id);
    println!("Session key: {}", hex::encode(raw_key));
    Ok(())
}

pub fn encrypt_id(args: EncryptIdArgs) -> Result<()> {
    let key = parse_session_key(&args.key)?;
    println!("{}", encrypt_identifier(&key, args.id)?);
    Ok(())
}

pub async fn info(args: InfoArgs) -> Result<()> {
    let key = parse_session_key(&args.key)?;
    let token = encrypt_identifier(&key, args.id)?;

    let response = reqwest::Client::new()
        .get(format!("{}/api/customers/{}/info", base_url(&args.url), token))
        .query(&[("sessionId", args.session.as_str())])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(anyhow!("Gateway returned HTTP {}: {}", status.as_u16(), body));
    }

    let info: CustomerInfoResponse = response.json().await?;
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}
