// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod session;

use anyhow::Result;
use clap::{Parser, Subcommand};

/// Customer Document Gateway client CLI
#[derive(Parser, Debug)]
#[command(name = "gateway-cli")]
#[command(version)]
#[command(about = "Client-side tools for the customer document gateway", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the public key, send a fresh AES key and open a session
    Handshake(session::HandshakeArgs),

    /// Encrypt a customer number under a session key
    EncryptId(session::EncryptIdArgs),

    /// Query customer info through an open session
    Info(session::InfoArgs),
}

/// Execute CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Handshake(args) => session::handshake(args).await,
        Commands::EncryptId(args) => session::encrypt_id(args),
        Commands::Info(args) => session::info(args).await,
    }
}
