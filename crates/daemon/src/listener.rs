// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Listener task for the TCP status endpoint.
//!
//! Accepts connections and handles them on spawned tasks without
//! blocking the scheduler's tick loop. Handlers only ever read scheduler
//! state, through the shared side of its lock.

use std::sync::Arc;

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use pmill_core::Clock;
use pmill_wire::{read_request, write_response, ProtocolError, Request, Response};

use crate::env::{ipc_timeout, PROTOCOL_VERSION};
use crate::policy_store::PolicyStore;
use crate::scheduler::Scheduler;

/// Shared daemon context for request handlers.
pub struct ListenCtx<C: Clock> {
    pub scheduler: Arc<Scheduler<C>>,
    pub policy: Arc<PolicyStore>,
}

/// Listener task for accepting status connections.
pub struct Listener<C: Clock> {
    tcp: TcpListener,
    ctx: Arc<ListenCtx<C>>,
}

/// Errors from connection handling.
#[derive(Debug, Error)]
enum ConnectionError {
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),
}

impl<C: Clock + 'static> Listener<C> {
    pub fn new(tcp: TcpListener, ctx: Arc<ListenCtx<C>>) -> Self {
        Self { tcp, ctx }
    }

    /// Run the accept loop, spawning a task per connection.
    pub async fn run(self) {
        loop {
            match self.tcp.accept().await {
                Ok((stream, addr)) => {
                    debug!(%addr, "status connection");
                    let ctx = Arc::clone(&self.ctx);
                    tokio::spawn(async move {
                        let (reader, writer) = stream.into_split();
                        if let Err(e) = handle_connection(reader, writer, &ctx).await {
                            log_connection_error(e);
                        }
                    });
                }
                Err(e) => error!("accept error: {}", e),
            }
        }
    }
}

fn log_connection_error(e: ConnectionError) {
    match e {
        ConnectionError::Protocol(ProtocolError::ConnectionClosed) => {
            debug!("client disconnected")
        }
        ConnectionError::Protocol(ProtocolError::Timeout) => {
            debug!("connection timeout")
        }
        _ => error!("connection error: {}", e),
    }
}

/// Handle one request/response exchange.
async fn handle_connection<R, W, C>(
    mut reader: R,
    mut writer: W,
    ctx: &ListenCtx<C>,
) -> Result<(), ConnectionError>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
    C: Clock,
{
    let request = read_request(&mut reader, ipc_timeout()).await?;
    info!(request = ?request, "received request");

    let response = handle_request(request, ctx);
    write_response(&mut writer, &response, ipc_timeout()).await?;
    Ok(())
}

fn handle_request<C: Clock>(request: Request, ctx: &ListenCtx<C>) -> Response {
    match request {
        Request::Ping => Response::Pong,

        Request::Hello { version: _ } => {
            Response::Hello { version: PROTOCOL_VERSION.to_string() }
        }

        Request::Status => {
            let policy = ctx.policy.current();
            let report = ctx.scheduler.status_report(policy.as_ref());
            Response::Status { report: Box::new(report) }
        }
    }
}

#[cfg(test)]
#[path = "listener_tests.rs"]
mod tests;
