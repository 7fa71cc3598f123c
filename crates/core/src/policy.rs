// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plotting policy: the operator-supplied limits and directory pools.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One refresh of the plotting policy.
///
/// Loaded from a TOML file by the daemon's policy store and treated as
/// immutable for the duration of a scheduler tick. Empty directory lists
/// are legal and simply make the policy "not ready" for admission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Maximum number of concurrently running plot jobs.
    pub parallelism: usize,
    /// Scratch (working) directories, rotated round-robin.
    #[serde(default)]
    pub scratch_dirs: Vec<PathBuf>,
    /// Destination directories, rotated with a stagger after a full pass.
    #[serde(default)]
    pub dest_dirs: Vec<PathBuf>,
    /// Wallet fingerprint handed to the plotter process.
    pub fingerprint: String,
    /// Admission pause after a full destination rotation, in minutes.
    #[serde(default)]
    pub stagger_minutes: u64,
    /// Include tail log lines in the periodic report.
    #[serde(default)]
    pub show_log: bool,
}

impl Policy {
    /// Stagger duration in epoch-milliseconds terms.
    pub fn stagger_ms(&self) -> u64 {
        self.stagger_minutes * 60_000
    }

    /// Whether admission is possible at all under this policy.
    pub fn has_directories(&self) -> bool {
        !self.scratch_dirs.is_empty() && !self.dest_dirs.is_empty()
    }
}

#[cfg(test)]
#[path = "policy_tests.rs"]
mod tests;
