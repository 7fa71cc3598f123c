// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Admission control, directory rotation, and the active→archive lifecycle.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tracing::{debug, info};

use pmill_core::{Clock, PlotJob, Policy};
use pmill_wire::StatusReport;

use crate::disk::{self, DiskUsage};
use crate::policy_store::PolicyStore;
use crate::runner;

/// Scheduler over the active-job set, the archive, and the rotation cursors.
///
/// All mutation happens under the internal lock; the snapshot path only
/// ever takes it in shared mode.
pub struct Scheduler<C: Clock> {
    clock: C,
    disk: Arc<dyn DiskUsage>,
    state: RwLock<SchedState>,
}

struct SchedState {
    active: HashMap<i64, Arc<PlotJob>>,
    /// Append-only; insertion order is archival order.
    archive: Vec<Arc<PlotJob>>,
    /// Always within [0, scratch_dirs.len()).
    scratch_cursor: usize,
    /// May transiently equal dest_dirs.len(), signaling wraparound due.
    dest_cursor: usize,
    /// No admission happens before this instant (epoch ms).
    stagger_until_ms: u64,
}

impl<C: Clock> Scheduler<C> {
    pub fn new(clock: C, disk: Arc<dyn DiskUsage>) -> Self {
        Self {
            clock,
            disk,
            state: RwLock::new(SchedState {
                active: HashMap::new(),
                archive: Vec::new(),
                scratch_cursor: 0,
                dest_cursor: 0,
                stagger_until_ms: 0,
            }),
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn active_count(&self) -> usize {
        self.state.read().active.len()
    }

    /// One scheduling pass: admission, per-job report, reconciliation.
    ///
    /// Returns the newly admitted job, if any, for the caller to launch.
    /// The scheduler itself never waits on a job; its only later contact
    /// is reading job state during reconciliation.
    pub fn tick(&self, policy: Option<&Policy>) -> Option<Arc<PlotJob>> {
        let admitted = match policy {
            Some(p) => self.admit(p),
            None => {
                debug!("no policy loaded, skipping admission");
                None
            }
        };
        self.reconcile(policy);
        admitted
    }

    /// Round-robin admission with staggered destination rotation.
    ///
    /// Skip conditions (full pool, empty directory lists, active cooldown,
    /// wraparound, short disk space) are not errors; each leaves the
    /// scheduler ready to try again next tick.
    fn admit(&self, policy: &Policy) -> Option<Arc<PlotJob>> {
        let now_ms = self.clock.epoch_ms();
        let mut state = self.state.write();

        if state.active.len() >= policy.parallelism {
            return None;
        }
        if !policy.has_directories() {
            debug!("policy has no plottable directories");
            return None;
        }
        if now_ms < state.stagger_until_ms {
            debug!(until_ms = state.stagger_until_ms, "admission staggered");
            return None;
        }

        if state.dest_cursor >= policy.dest_dirs.len() {
            // Full destination pass: rest the pool for a stagger period.
            // The reset and the cooldown both take effect now; no job
            // starts on the wraparound tick itself.
            state.dest_cursor = 0;
            state.stagger_until_ms = now_ms + policy.stagger_ms();
            info!(stagger_minutes = policy.stagger_minutes, "destination rotation complete");
            return None;
        }
        if state.scratch_cursor >= policy.scratch_dirs.len() {
            // Scratch list shrank since the last refresh
            state.scratch_cursor = 0;
        }

        let scratch = policy.scratch_dirs[state.scratch_cursor].clone();
        let dest = policy.dest_dirs[state.dest_cursor].clone();

        // Cursors stay put on a capacity skip so the same pair is
        // retried once space frees up.
        if !disk::check_capacity(self.disk.as_ref(), &scratch, &dest) {
            return None;
        }

        state.scratch_cursor = (state.scratch_cursor + 1) % policy.scratch_dirs.len();
        state.dest_cursor += 1;

        let id = (now_ms / 1000) as i64;
        let job = Arc::new(PlotJob::new(
            id,
            scratch,
            dest,
            policy.fingerprint.clone(),
            now_ms,
        ));
        state.active.insert(id, Arc::clone(&job));
        info!(
            id,
            scratch = %job.scratch_dir.display(),
            dest = %job.dest_dir.display(),
            "admitted plot job"
        );
        Some(job)
    }

    /// Report every active job and move terminal ones to the archive.
    fn reconcile(&self, policy: Option<&Policy>) {
        let now_ms = self.clock.epoch_ms();
        let show_log = policy.map(|p| p.show_log).unwrap_or(false);
        let mut state = self.state.write();

        let mut terminal = Vec::new();
        for job in state.active.values() {
            info!("{}", job.render(now_ms, show_log));
            if job.is_terminal() {
                terminal.push(job.id);
            }
        }
        for id in terminal {
            if let Some(job) = state.active.remove(&id) {
                info!(id, state = %job.state(), "archiving plot job");
                state.archive.push(job);
            }
        }

        info!(active = state.active.len(), "tick complete");
    }

    /// Point-in-time status view, built under the shared lock.
    ///
    /// Free space is queried live for every directory the current policy
    /// knows about.
    pub fn status_report(&self, policy: Option<&Policy>) -> StatusReport {
        let state = self.state.read();

        let mut actives: Vec<_> = state.active.values().map(|j| j.snapshot()).collect();
        actives.sort_by_key(|s| s.id);
        let archived: Vec<_> = state.archive.iter().map(|j| j.snapshot()).collect();

        let mut report = StatusReport { actives, archived, ..StatusReport::default() };
        if let Some(policy) = policy {
            for dir in &policy.scratch_dirs {
                let bytes = self.disk.available_bytes(dir).unwrap_or(0);
                report.scratch_space.insert(dir.display().to_string(), bytes);
            }
            for dir in &policy.dest_dirs {
                let bytes = self.disk.available_bytes(dir).unwrap_or(0);
                report.dest_space.insert(dir.display().to_string(), bytes);
            }
        }
        report
    }
}

/// Drive the scheduler: an immediate first tick, then one per interval.
///
/// A slow tick delays the next one rather than triggering catch-up bursts.
/// Admitted jobs are launched on their own tasks, fire-and-forget.
pub async fn run_scheduler<C: Clock + 'static>(
    scheduler: Arc<Scheduler<C>>,
    store: Arc<PolicyStore>,
    interval: Duration,
) {
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        store.refresh();
        let policy = store.current();
        if let Some(job) = scheduler.tick(policy.as_ref()) {
            let clock = scheduler.clock().clone();
            tokio::spawn(runner::run_plot(job, clock));
        }
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
