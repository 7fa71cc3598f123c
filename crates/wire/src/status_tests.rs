// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::Response;
use pmill_core::{PlotJob, PlotState};
use std::path::PathBuf;

fn report_with_one_of_each() -> StatusReport {
    let active = PlotJob::new(
        1_620_000_000,
        PathBuf::from("/scratch/0"),
        PathBuf::from("/farm/0"),
        "fp".to_string(),
        1_620_000_000_000,
    );
    let archived = PlotJob::new(
        1_620_000_060,
        PathBuf::from("/scratch/1"),
        PathBuf::from("/farm/1"),
        "fp".to_string(),
        1_620_000_060_000,
    );
    archived.mark_finished(1_620_010_000_000);

    let mut report = StatusReport {
        actives: vec![active.snapshot()],
        archived: vec![archived.snapshot()],
        ..StatusReport::default()
    };
    report.scratch_space.insert("/scratch/0".to_string(), 500 << 30);
    report.dest_space.insert("/farm/0".to_string(), 2048 << 30);
    report
}

#[test]
fn status_report_roundtrips_through_json() {
    let report = report_with_one_of_each();

    let json = serde_json::to_string(&report).unwrap();
    let back: StatusReport = serde_json::from_str(&json).unwrap();

    assert_eq!(back, report);
    assert_eq!(back.actives[0].state, PlotState::Running);
    assert_eq!(back.archived[0].state, PlotState::Finished);
    assert_eq!(back.dest_space["/farm/0"], 2048 << 30);
}

#[test]
fn response_serde_uses_type_tag() {
    let response = Response::Status { report: Box::new(report_with_one_of_each()) };

    let json = serde_json::to_string(&response).unwrap();
    assert!(json.contains(r#""type":"Status""#));

    let back: Response = serde_json::from_str(&json).unwrap();
    assert_eq!(back, response);
}
