// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! TCP client for the daemon's status endpoint.

use std::time::Duration;

use thiserror::Error;
use tokio::net::TcpStream;

use pmill_wire::{decode, encode, read_message, write_message, ProtocolError, Request, Response};
use pmill_wire::StatusReport;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("could not connect to daemon: {0}")]
    Connect(std::io::Error),

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("daemon error: {0}")]
    Daemon(String),

    #[error("unexpected response: {0}")]
    Unexpected(String),

    #[error("timed out waiting for daemon")]
    Timeout,
}

pub struct DaemonClient {
    addr: String,
}

impl DaemonClient {
    pub fn new(host: &str, port: u16) -> Self {
        Self { addr: format!("{}:{}", host, port) }
    }

    async fn send(&self, request: &Request) -> Result<Response, ClientError> {
        tokio::time::timeout(REQUEST_TIMEOUT, self.exchange(request))
            .await
            .map_err(|_| ClientError::Timeout)?
    }

    async fn exchange(&self, request: &Request) -> Result<Response, ClientError> {
        let mut stream =
            TcpStream::connect(&self.addr).await.map_err(ClientError::Connect)?;
        let payload = encode(request)?;
        write_message(&mut stream, &payload).await?;
        let raw = read_message(&mut stream).await?;
        Ok(decode(&raw)?)
    }

    /// Fetch the daemon's status snapshot.
    pub async fn status(&self) -> Result<StatusReport, ClientError> {
        match self.send(&Request::Status).await? {
            Response::Status { report } => Ok(*report),
            Response::Error { message } => Err(ClientError::Daemon(message)),
            other => Self::reject(other),
        }
    }

    /// Get the daemon version via the Hello handshake.
    pub async fn hello(&self) -> Result<String, ClientError> {
        let request = Request::Hello { version: env!("CARGO_PKG_VERSION").to_string() };
        match self.send(&request).await? {
            Response::Hello { version } => Ok(version),
            Response::Error { message } => Err(ClientError::Daemon(message)),
            other => Self::reject(other),
        }
    }

    fn reject<T>(other: Response) -> Result<T, ClientError> {
        Err(ClientError::Unexpected(format!("{:?}", other)))
    }
}
