// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! pmilld: the plotmill daemon.
//!
//! Runs the scheduler tick loop and serves the TCP status endpoint.

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use pmill_core::SystemClock;
use pmill_daemon::{run_scheduler, Fs2DiskUsage, ListenCtx, Listener, PolicyStore, Scheduler};

#[derive(Parser)]
#[command(name = "pmilld", version, about = "plotmill plotting daemon")]
struct Args {
    /// Path to the policy file
    #[arg(long, default_value = "plotmill.toml")]
    config: PathBuf,

    /// Port for the status endpoint
    #[arg(long, default_value_t = 8484)]
    port: u16,

    /// Seconds between scheduler ticks
    #[arg(long, default_value_t = 60)]
    tick_secs: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();

    let clock = SystemClock;
    let scheduler = Arc::new(Scheduler::new(clock, Arc::new(Fs2DiskUsage)));
    let store = Arc::new(PolicyStore::new(&args.config));

    let tcp = match TcpListener::bind(("0.0.0.0", args.port)).await {
        Ok(tcp) => tcp,
        Err(e) => {
            error!(port = args.port, error = %e, "failed to bind status endpoint");
            return ExitCode::FAILURE;
        }
    };
    info!(port = args.port, config = %args.config.display(), "pmilld starting");

    let ctx =
        Arc::new(ListenCtx { scheduler: Arc::clone(&scheduler), policy: Arc::clone(&store) });
    tokio::spawn(Listener::new(tcp, ctx).run());

    run_scheduler(scheduler, store, Duration::from_secs(args.tick_secs)).await;
    ExitCode::SUCCESS
}
