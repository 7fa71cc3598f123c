// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use pmill_core::PlotJob;
use std::path::PathBuf;

fn report() -> StatusReport {
    let active = PlotJob::new(
        1_620_000_000,
        PathBuf::from("/scratch/0"),
        PathBuf::from("/farm/0"),
        "fp".to_string(),
        1_620_000_000_000,
    );
    active.observe_line("ID: abc123");
    active.observe_line("Starting phase 2/4: Backpropagation");

    let done = PlotJob::new(
        1_619_990_000,
        PathBuf::from("/scratch/1"),
        PathBuf::from("/farm/1"),
        "fp".to_string(),
        1_619_990_000_000,
    );
    done.mark_finished(1_619_999_000_000);

    let mut report = StatusReport {
        actives: vec![active.snapshot()],
        archived: vec![done.snapshot()],
        ..StatusReport::default()
    };
    report.scratch_space.insert("/scratch/0".to_string(), 700 << 30);
    report.dest_space.insert("/farm/0".to_string(), 2048 << 30);
    report
}

#[test]
fn renders_all_sections() {
    let out = render_report(&report(), 1_620_003_600_000);

    assert!(out.contains("Active plots (1):"));
    assert!(out.contains("Plot [abc123]"));
    assert!(out.contains("Phase: 2/4"));
    assert!(out.contains("Archived plots (1):"));
    assert!(out.contains("finished"));
    assert!(out.contains("Scratch space:"));
    assert!(out.contains("/scratch/0  700.0 GiB free"));
    assert!(out.contains("Destination space:"));
    assert!(out.contains("/farm/0  2048.0 GiB free"));
}

#[test]
fn active_plots_include_tail_lines() {
    let out = render_report(&report(), 1_620_003_600_000);
    assert!(out.contains("\tID: abc123"));
    assert!(out.contains("\tStarting phase 2/4"));
}

#[test]
fn archived_plots_omit_tail_lines() {
    let report = report();
    let out = render_report(&report, 1_620_003_600_000);

    // The archived job produced no output, and archived entries never
    // show tails anyway; its line ends at the dest dir
    for line in out.lines() {
        if line.contains("/farm/1") {
            assert!(!line.contains('\t'));
        }
    }
}

#[test]
fn empty_report_still_renders_headers() {
    let out = render_report(&StatusReport::default(), 0);

    assert!(out.contains("Active plots (0):"));
    assert!(out.contains("Archived plots (0):"));
    assert!(out.contains("Scratch space:"));
    assert!(out.contains("Destination space:"));
}
