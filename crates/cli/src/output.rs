// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal rendering of the daemon's status report.

use std::collections::BTreeMap;

use pmill_wire::StatusReport;

const GIB: f64 = (1u64 << 30) as f64;

/// Render the full status report: active plots (with their tail logs),
/// archived plots, then free space per directory pool.
pub fn render_report(report: &StatusReport, now_ms: u64) -> String {
    let mut out = String::new();

    out.push_str(&format!("Active plots ({}):\n", report.actives.len()));
    for plot in &report.actives {
        out.push_str("  ");
        out.push_str(&plot.render(now_ms, true));
        out.push('\n');
    }

    out.push_str(&format!("Archived plots ({}):\n", report.archived.len()));
    for plot in &report.archived {
        out.push_str("  ");
        out.push_str(&plot.render(now_ms, false));
        out.push('\n');
    }

    render_space(&mut out, "Scratch space:", &report.scratch_space);
    render_space(&mut out, "Destination space:", &report.dest_space);
    out
}

fn render_space(out: &mut String, header: &str, spaces: &BTreeMap<String, u64>) {
    out.push_str(header);
    out.push('\n');
    for (dir, bytes) in spaces {
        out.push_str(&format!("  {}  {:.1} GiB free\n", dir, *bytes as f64 / GIB));
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
