// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plot job entity: one external plotter process and its observed progress.

use crate::time_fmt::{format_elapsed_ms, format_timestamp_ms};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::path::PathBuf;

/// Number of trailing log lines retained per job.
pub const TAIL_CAPACITY: usize = 10;

/// Marker line prefix announcing a new plotter phase.
const PHASE_PREFIX: &str = "Starting phase ";
/// Width of the phase label following the marker (e.g. "1/4").
const PHASE_WIDTH: usize = 3;
/// Marker line prefix carrying the plot's own identifier.
const ID_PREFIX: &str = "ID: ";

/// Lifecycle state of a plot job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlotState {
    /// Process launched (or about to be) and not yet terminal
    Running,
    /// Stream setup failed or the process exited unsuccessfully
    Error,
    /// Process exited cleanly
    Finished,
}

impl PlotState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PlotState::Error | PlotState::Finished)
    }
}

impl fmt::Display for PlotState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PlotState::Running => "running",
            PlotState::Error => "errored",
            PlotState::Finished => "finished",
        };
        f.write_str(s)
    }
}

/// Mutable progress of a job, written by its stream readers and runner,
/// read by the scheduler report and the snapshot service.
#[derive(Debug)]
struct Progress {
    state: PlotState,
    phase: String,
    external_id: Option<String>,
    tail: VecDeque<String>,
    started_at_ms: u64,
    ended_at_ms: Option<u64>,
}

/// One plot job: the directory pair and fingerprint it was admitted with,
/// plus lock-guarded progress.
///
/// Identity fields are immutable for the job's lifetime. The scheduler owns
/// the job's slot in the active set; the job owns its progress, which its
/// runner and stream-reader tasks mutate under the lock.
#[derive(Debug)]
pub struct PlotJob {
    /// Admission timestamp in unix seconds; unique per job.
    pub id: i64,
    pub scratch_dir: PathBuf,
    pub dest_dir: PathBuf,
    pub fingerprint: String,
    progress: RwLock<Progress>,
}

impl PlotJob {
    pub fn new(
        id: i64,
        scratch_dir: PathBuf,
        dest_dir: PathBuf,
        fingerprint: String,
        started_at_ms: u64,
    ) -> Self {
        Self {
            id,
            scratch_dir,
            dest_dir,
            fingerprint,
            progress: RwLock::new(Progress {
                state: PlotState::Running,
                phase: "NA".to_string(),
                external_id: None,
                tail: VecDeque::with_capacity(TAIL_CAPACITY),
                started_at_ms,
                ended_at_ms: None,
            }),
        }
    }

    pub fn state(&self) -> PlotState {
        self.progress.read().state
    }

    pub fn is_terminal(&self) -> bool {
        self.state().is_terminal()
    }

    pub fn phase(&self) -> String {
        self.progress.read().phase.clone()
    }

    pub fn external_id(&self) -> Option<String> {
        self.progress.read().external_id.clone()
    }

    /// Record an unsuccessful end: stream setup failure or bad exit.
    pub fn mark_error(&self, now_ms: u64) {
        let mut progress = self.progress.write();
        progress.state = PlotState::Error;
        progress.ended_at_ms.get_or_insert(now_ms);
    }

    /// Record a clean process exit.
    pub fn mark_finished(&self, now_ms: u64) {
        let mut progress = self.progress.write();
        progress.state = PlotState::Finished;
        progress.ended_at_ms.get_or_insert(now_ms);
    }

    /// Ingest one line of plotter output.
    ///
    /// Marker lines update phase / external id; every line, marker or not,
    /// lands in the bounded tail with the oldest entry evicted beyond
    /// [`TAIL_CAPACITY`].
    pub fn observe_line(&self, line: &str) {
        let mut progress = self.progress.write();

        if line.starts_with(PHASE_PREFIX) {
            if let Some(label) = line.get(PHASE_PREFIX.len()..PHASE_PREFIX.len() + PHASE_WIDTH) {
                progress.phase = label.to_string();
            }
        }
        if let Some(rest) = line.strip_prefix(ID_PREFIX) {
            let id = rest.strip_suffix('\n').unwrap_or(rest);
            let id = id.strip_suffix('\r').unwrap_or(id);
            progress.external_id = Some(id.to_string());
        }

        progress.tail.push_back(line.to_string());
        if progress.tail.len() > TAIL_CAPACITY {
            progress.tail.pop_front();
        }
    }

    /// Point-in-time copy of the job for the wire layer.
    pub fn snapshot(&self) -> PlotSnapshot {
        let progress = self.progress.read();
        PlotSnapshot {
            id: self.id,
            scratch_dir: self.scratch_dir.clone(),
            dest_dir: self.dest_dir.clone(),
            fingerprint: self.fingerprint.clone(),
            state: progress.state,
            phase: progress.phase.clone(),
            external_id: progress.external_id.clone(),
            tail: progress.tail.iter().cloned().collect(),
            started_at_ms: progress.started_at_ms,
            ended_at_ms: progress.ended_at_ms,
        }
    }

    /// Operator one-liner for the periodic report, optionally followed by
    /// the tail lines.
    pub fn render(&self, now_ms: u64, include_log: bool) -> String {
        self.snapshot().render(now_ms, include_log)
    }
}

/// Serializable point-in-time view of a [`PlotJob`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotSnapshot {
    pub id: i64,
    pub scratch_dir: PathBuf,
    pub dest_dir: PathBuf,
    pub fingerprint: String,
    pub state: PlotState,
    pub phase: String,
    pub external_id: Option<String>,
    pub tail: Vec<String>,
    pub started_at_ms: u64,
    pub ended_at_ms: Option<u64>,
}

impl PlotSnapshot {
    /// One-line summary, optionally followed by tab-indented tail lines.
    ///
    /// Finished jobs report their real duration regardless of `now_ms`.
    pub fn render(&self, now_ms: u64, include_log: bool) -> String {
        let label = self.external_id.as_deref().unwrap_or("");
        let elapsed = self.ended_at_ms.unwrap_or(now_ms).saturating_sub(self.started_at_ms);

        let mut s = format!(
            "Plot [{}] - {}, Phase: {}, Start Time: {}, Duration: {}, Scratch Dir: {}, Dest Dir: {}",
            label,
            self.state,
            self.phase,
            format_timestamp_ms(self.started_at_ms),
            format_elapsed_ms(elapsed),
            self.scratch_dir.display(),
            self.dest_dir.display(),
        );
        if include_log {
            for line in &self.tail {
                s.push_str("\n\t");
                s.push_str(line);
            }
        }
        s
    }
}

#[cfg(test)]
#[path = "plot_tests.rs"]
mod tests;
