// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! pmill: status client for the plotmill daemon.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

mod client;
mod output;

use anyhow::Context;
use clap::{Parser, Subcommand};

use client::DaemonClient;
use pmill_core::{Clock, SystemClock};

#[derive(Parser)]
#[command(name = "pmill", version, about = "plotmill status client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show active and archived plots with directory free space
    Status {
        /// Daemon host
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Daemon status port
        #[arg(long, default_value_t = 8484)]
        port: u16,
    },

    /// Show the daemon's version
    Version {
        /// Daemon host
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Daemon status port
        #[arg(long, default_value_t = 8484)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    match Cli::parse().command {
        Commands::Status { host, port } => {
            let client = DaemonClient::new(&host, port);
            let report = client
                .status()
                .await
                .with_context(|| format!("failed to query daemon at {}:{}", host, port))?;
            print!("{}", output::render_report(&report, SystemClock.epoch_ms()));
        }
        Commands::Version { host, port } => {
            let client = DaemonClient::new(&host, port);
            let daemon = client
                .hello()
                .await
                .with_context(|| format!("failed to query daemon at {}:{}", host, port))?;
            println!("client {}", env!("CARGO_PKG_VERSION"));
            println!("daemon {}", daemon);
        }
    }
    Ok(())
}
