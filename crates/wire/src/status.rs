// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Status snapshot types for the IPC protocol.

use std::collections::BTreeMap;

use pmill_core::PlotSnapshot;
use serde::{Deserialize, Serialize};

/// Point-in-time view of all plot state, as served to status clients.
///
/// Free-space maps are keyed by directory path and hold available bytes,
/// queried live when the report is built.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StatusReport {
    /// Jobs currently in the active set
    pub actives: Vec<PlotSnapshot>,
    /// Terminal jobs, in archival order
    pub archived: Vec<PlotSnapshot>,
    /// Available bytes per scratch directory
    pub scratch_space: BTreeMap<String, u64>,
    /// Available bytes per destination directory
    pub dest_space: BTreeMap<String, u64>,
}

#[cfg(test)]
#[path = "status_tests.rs"]
mod tests;
