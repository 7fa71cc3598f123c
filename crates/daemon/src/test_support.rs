// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for daemon tests.

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::disk::DiskUsage;
use pmill_core::Policy;

const TIB: u64 = 1 << 40;

/// In-memory free-space table. Paths not explicitly set report 1 TiB.
pub(crate) struct FakeDisk {
    spaces: Mutex<HashMap<PathBuf, u64>>,
    failing: Mutex<HashSet<PathBuf>>,
}

impl FakeDisk {
    pub(crate) fn new() -> Self {
        Self { spaces: Mutex::new(HashMap::new()), failing: Mutex::new(HashSet::new()) }
    }

    pub(crate) fn set(&self, path: impl Into<PathBuf>, bytes: u64) {
        self.spaces.lock().insert(path.into(), bytes);
    }

    /// Make free-space queries for this path fail, as for a dead mount.
    pub(crate) fn fail(&self, path: impl Into<PathBuf>) {
        self.failing.lock().insert(path.into());
    }
}

impl DiskUsage for FakeDisk {
    fn available_bytes(&self, path: &Path) -> io::Result<u64> {
        if self.failing.lock().contains(path) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such mount"));
        }
        Ok(self.spaces.lock().get(path).copied().unwrap_or(TIB))
    }
}

pub(crate) fn policy(
    scratch: &[&str],
    dest: &[&str],
    parallelism: usize,
    stagger_minutes: u64,
) -> Policy {
    Policy {
        parallelism,
        scratch_dirs: scratch.iter().map(PathBuf::from).collect(),
        dest_dirs: dest.iter().map(PathBuf::from).collect(),
        fingerprint: "1234567890".to_string(),
        stagger_minutes,
        show_log: false,
    }
}
