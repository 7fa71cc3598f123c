// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Free-space queries behind a seam so scheduler tests can inject fakes.

use std::io;
use std::path::Path;

use tracing::warn;

const GIB: u64 = 1 << 30;

/// Minimum free space required on each side of a plot (a k32 plot needs
/// roughly 356 GiB of working space).
pub const MIN_FREE_BYTES: u64 = 360 * GIB;

/// Source of available-bytes figures for a directory's filesystem.
pub trait DiskUsage: Send + Sync {
    fn available_bytes(&self, path: &Path) -> io::Result<u64>;
}

/// Real filesystem queries via `fs2`.
#[derive(Clone, Default)]
pub struct Fs2DiskUsage;

impl DiskUsage for Fs2DiskUsage {
    fn available_bytes(&self, path: &Path) -> io::Result<u64> {
        fs2::available_space(path)
    }
}

/// Check that both directories of a planned plot have room for it.
///
/// Logs the short side. A directory whose free space cannot be read is
/// treated as short.
pub fn check_capacity(disk: &dyn DiskUsage, scratch: &Path, dest: &Path) -> bool {
    if !has_room(disk, scratch) {
        warn!(dir = %scratch.display(), "insufficient scratch directory space");
        return false;
    }
    if !has_room(disk, dest) {
        warn!(dir = %dest.display(), "insufficient destination directory space");
        return false;
    }
    true
}

fn has_room(disk: &dyn DiskUsage, path: &Path) -> bool {
    match disk.available_bytes(path) {
        Ok(bytes) => bytes >= MIN_FREE_BYTES,
        Err(e) => {
            warn!(dir = %path.display(), error = %e, "free-space query failed");
            false
        }
    }
}

#[cfg(test)]
#[path = "disk_tests.rs"]
mod tests;
