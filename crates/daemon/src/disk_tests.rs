// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::test_support::FakeDisk;
use yare::parameterized;

#[parameterized(
    both_roomy = { 500, 500, true },
    scratch_short = { 100, 500, false },
    dest_short = { 500, 100, false },
    both_short = { 1, 1, false },
)]
fn capacity_requires_room_on_both_sides(scratch_gib: u64, dest_gib: u64, expected: bool) {
    let disk = FakeDisk::new();
    disk.set("/s", scratch_gib << 30);
    disk.set("/d", dest_gib << 30);

    assert_eq!(check_capacity(&disk, Path::new("/s"), Path::new("/d")), expected);
}

#[test]
fn exact_threshold_counts_as_room() {
    let disk = FakeDisk::new();
    disk.set("/s", MIN_FREE_BYTES);
    disk.set("/d", MIN_FREE_BYTES);

    assert!(check_capacity(&disk, Path::new("/s"), Path::new("/d")));
}

#[test]
fn unreadable_directory_counts_as_short() {
    let disk = FakeDisk::new();
    disk.fail("/s");

    assert!(!check_capacity(&disk, Path::new("/s"), Path::new("/d")));
}
