// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::time::Duration;

/// Protocol version (from Cargo.toml)
pub const PROTOCOL_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Plotter binary to launch. Overridable for non-standard installs.
pub fn plot_binary() -> String {
    std::env::var("PMILL_PLOT_BINARY").unwrap_or_else(|_| "chia".to_string())
}

/// Default IPC timeout
pub fn ipc_timeout() -> Duration {
    std::env::var("PMILL_IPC_TIMEOUT_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or(Duration::from_secs(5))
}
