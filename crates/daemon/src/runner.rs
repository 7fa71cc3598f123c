// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plot process supervision: launch, stream readers, exit handling.

use std::process::Stdio;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tracing::{error, info};

use pmill_core::{Clock, PlotJob};

use crate::env;

/// Run one plot job to completion.
///
/// Never returns an error: every failure mode (spawn, stream setup, bad
/// exit) is logged and captured into the job's state, where the
/// scheduler's reconciliation pass picks it up.
pub async fn run_plot<C: Clock>(job: Arc<PlotJob>, clock: C) {
    let command = build_command(&job);
    run_command(job, command, &clock).await;
}

/// The plotter invocation for a job: fixed k32 algorithm parameters plus
/// the job's directory pair and fingerprint.
fn build_command(job: &PlotJob) -> Command {
    let mut command = Command::new(env::plot_binary());
    command
        .arg("plots")
        .arg("create")
        .arg("-k32")
        .arg("-n1")
        .arg("-b6000")
        .arg("-u128")
        .arg(format!("-t{}", job.scratch_dir.display()))
        .arg(format!("-d{}", job.dest_dir.display()))
        .arg(format!("-a{}", job.fingerprint));
    command
}

pub(crate) async fn run_command<C: Clock>(job: Arc<PlotJob>, mut command: Command, clock: &C) {
    command.stdin(Stdio::null()).stdout(Stdio::piped()).stderr(Stdio::piped());

    info!(id = job.id, "launching plotter");
    let mut child = match command.spawn() {
        Ok(child) => child,
        Err(e) => {
            error!(id = job.id, error = %e, "failed to launch plotter");
            job.mark_error(clock.epoch_ms());
            return;
        }
    };

    let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
        error!(id = job.id, "plotter output streams unavailable");
        job.mark_error(clock.epoch_ms());
        let _ = child.kill().await;
        return;
    };

    let stdout_reader = tokio::spawn(read_stream(Arc::clone(&job), stdout));
    let stderr_reader = tokio::spawn(read_stream(Arc::clone(&job), stderr));

    let status = child.wait().await;

    // Let both readers reach end-of-stream so the tail holds the final lines
    let _ = stdout_reader.await;
    let _ = stderr_reader.await;

    match status {
        Ok(exit) if exit.success() => {
            info!(id = job.id, "plot finished");
            job.mark_finished(clock.epoch_ms());
        }
        Ok(exit) => {
            error!(id = job.id, %exit, "plotter exited with error");
            job.mark_error(clock.epoch_ms());
        }
        Err(e) => {
            error!(id = job.id, error = %e, "failed waiting on plotter");
            job.mark_error(clock.epoch_ms());
        }
    }
}

/// Feed one output stream into the job, line by line, until end-of-stream.
///
/// A read error means the process closed its pipe; that is the normal
/// termination signal, not something to surface.
async fn read_stream<R: AsyncRead + Unpin>(job: Arc<PlotJob>, stream: R) {
    let mut lines = BufReader::new(stream).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        job.observe_line(&line);
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
