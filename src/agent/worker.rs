// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! HTTP command transport between agents.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use tokio::net::TcpListener;

use crate::error::{Error, ProtocolError};

use super::Agent;

/// Handles incoming command strings, returning an error if the command
/// could not be handled.
type Handler = Arc<dyn Fn(String) -> Result<(), Error> + Send + Sync>;

/// Takes care of the common transport tasks that all message-driven
/// agents carry out: accepting raw command strings over HTTP and sending
/// commands to peer agents.
///
/// The worker moves strings; decoding them is the caller's job, usually
/// by handing each body to [`Command::decode`](crate::command::Command::decode).
///
/// # Examples
///
/// ```no_run
/// use lumen_lib::agent::{Agent, Worker};
///
/// # async fn example() -> lumen_lib::Result<()> {
/// let worker = Worker::new(Agent::Controller)?;
/// worker
///     .serve(|message| {
///         println!("received {message}");
///         Ok(())
///     })
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Worker {
    agent: Agent,
    client: reqwest::Client,
}

impl Worker {
    /// Request timeout for agent-to-agent sends.
    const SEND_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a new worker for the given agent.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(agent: Agent) -> Result<Self, ProtocolError> {
        let client = reqwest::Client::builder()
            .timeout(Self::SEND_TIMEOUT)
            .build()
            .map_err(ProtocolError::Http)?;
        Ok(Self { agent, client })
    }

    /// Returns the agent this worker serves.
    #[must_use]
    pub const fn agent(&self) -> Agent {
        self.agent
    }

    /// Begins processing commands on the agent's well-known port,
    /// blocking the task.
    ///
    /// Incoming `POST /command` bodies are handed to `handler`; the
    /// response is `OK` on success or HTTP 500 carrying the error text
    /// on failure.
    ///
    /// # Errors
    ///
    /// Returns an error if the port cannot be bound or the server fails.
    pub async fn serve<F>(&self, handler: F) -> Result<(), ProtocolError>
    where
        F: Fn(String) -> Result<(), Error> + Send + Sync + 'static,
    {
        let listener = TcpListener::bind(("0.0.0.0", self.agent.port())).await?;
        self.serve_on(listener, handler).await
    }

    /// Begins processing commands on an already-bound listener.
    ///
    /// Useful for supervisors that manage their own sockets and for
    /// binding an ephemeral port in tests.
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails.
    pub async fn serve_on<F>(&self, listener: TcpListener, handler: F) -> Result<(), ProtocolError>
    where
        F: Fn(String) -> Result<(), Error> + Send + Sync + 'static,
    {
        if let Ok(addr) = listener.local_addr() {
            tracing::info!(agent = %self.agent, %addr, "listening for commands");
        }
        let handler: Handler = Arc::new(handler);
        let app = Router::new()
            .route("/command", post(handle_command))
            .with_state(handler);
        axum::serve(listener, app).await?;
        Ok(())
    }

    /// Transmits a message to a peer agent on this host.
    ///
    /// Returns the peer's response body (`OK` for a handled command).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the peer rejects the
    /// command.
    pub async fn send(&self, agent: Agent, message: &str) -> Result<String, ProtocolError> {
        let url = format!("http://127.0.0.1:{}/command", agent.port());
        tracing::debug!(to = %agent, %message, "sending command");
        self.send_to(&url, message).await
    }

    /// Transmits a message to an explicit command endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the peer rejects the
    /// command.
    pub async fn send_to(&self, url: &str, message: &str) -> Result<String, ProtocolError> {
        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "text/plain")
            .body(message.to_string())
            .send()
            .await
            .map_err(ProtocolError::Http)?;

        let status = response.status();
        let body = response.text().await.map_err(ProtocolError::Http)?;
        if !status.is_success() {
            return Err(ProtocolError::Rejected {
                status: status.as_u16(),
                body,
            });
        }
        tracing::debug!(%body, "agent response");
        Ok(body)
    }
}

async fn handle_command(State(handler): State<Handler>, body: String) -> (StatusCode, String) {
    tracing::debug!(command = %body, "received command");
    match handler(body) {
        Ok(()) => (StatusCode::OK, "OK".to_string()),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}
