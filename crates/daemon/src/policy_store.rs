// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Policy file loading with change detection.
//!
//! The scheduler refreshes the store once per tick; the store only
//! re-reads the TOML file when its modification time has moved.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, info, warn};

use pmill_core::Policy;

#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("failed to read {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("failed to parse {0}: {1}")]
    Parse(PathBuf, toml::de::Error),
}

/// Read-through cache over the policy file.
///
/// A missing or unparsable file keeps the last good policy (absent if
/// nothing ever loaded), so a half-written config cannot knock a running
/// daemon back to zero.
pub struct PolicyStore {
    path: PathBuf,
    inner: Mutex<Inner>,
}

struct Inner {
    policy: Option<Policy>,
    seen_mtime: Option<SystemTime>,
}

impl PolicyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), inner: Mutex::new(Inner { policy: None, seen_mtime: None }) }
    }

    /// Re-read the file if it changed since the last refresh.
    pub fn refresh(&self) {
        let mtime = match std::fs::metadata(&self.path).and_then(|m| m.modified()) {
            Ok(mtime) => mtime,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "policy file unavailable");
                return;
            }
        };

        let mut inner = self.inner.lock();
        if inner.seen_mtime == Some(mtime) {
            return;
        }
        // Record the mtime even on failure so a broken file is not
        // re-parsed every tick; fixing it bumps the mtime again.
        inner.seen_mtime = Some(mtime);

        match load(&self.path) {
            Ok(policy) => {
                info!(
                    path = %self.path.display(),
                    parallelism = policy.parallelism,
                    scratch_dirs = policy.scratch_dirs.len(),
                    dest_dirs = policy.dest_dirs.len(),
                    "policy loaded"
                );
                inner.policy = Some(policy);
            }
            Err(e) => {
                warn!(error = %e, "policy refresh failed, keeping previous policy");
            }
        }
    }

    /// The most recently loaded policy, if any.
    pub fn current(&self) -> Option<Policy> {
        self.inner.lock().policy.clone()
    }
}

fn load(path: &Path) -> Result<Policy, PolicyError> {
    let raw =
        std::fs::read_to_string(path).map_err(|e| PolicyError::Read(path.to_path_buf(), e))?;
    toml::from_str(&raw).map_err(|e| PolicyError::Parse(path.to_path_buf(), e))
}

#[cfg(test)]
#[path = "policy_store_tests.rs"]
mod tests;
