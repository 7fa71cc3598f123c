// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::{Deserialize, Serialize};

use super::StatusReport;

/// Response from daemon to a status client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum Response {
    /// Health check response
    Pong,

    /// Version handshake response
    Hello { version: String },

    /// Snapshot of active/archived plots and directory free space
    Status { report: Box<StatusReport> },

    /// Error response
    Error { message: String },
}
