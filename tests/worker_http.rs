// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the HTTP worker transport.

#![cfg(feature = "http")]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use lumen_lib::agent::{Agent, Worker};
use lumen_lib::command::Command;
use lumen_lib::{Error, ProtocolError};
use tokio::net::TcpListener;
use wiremock::matchers::{body_string, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ============================================================================
// Outbound sends
// ============================================================================

#[tokio::test]
async fn send_posts_plain_text_command() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/command"))
        .and(body_string("!#F00"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&mock_server)
        .await;

    let worker = Worker::new(Agent::Gateway).unwrap();
    let url = format!("{}/command", mock_server.uri());
    let response = worker.send_to(&url, "!#F00").await.unwrap();
    assert_eq!(response, "OK");
}

#[tokio::test]
async fn send_surfaces_peer_rejection() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/command"))
        .respond_with(ResponseTemplate::new(500).set_body_string("unknown action code"))
        .mount(&mock_server)
        .await;

    let worker = Worker::new(Agent::Gateway).unwrap();
    let url = format!("{}/command", mock_server.uri());
    let err = worker.send_to(&url, "*#F00").await.unwrap_err();
    assert!(matches!(
        err,
        ProtocolError::Rejected { status: 500, ref body } if body.contains("unknown action")
    ));
}

// ============================================================================
// Inbound consumption
// ============================================================================

// Spawns a worker on an ephemeral port and returns its command URL.
async fn spawn_worker<F>(handler: F) -> String
where
    F: Fn(String) -> Result<(), Error> + Send + Sync + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let worker = Worker::new(Agent::Controller).unwrap();
    tokio::spawn(async move {
        worker.serve_on(listener, handler).await.unwrap();
    });
    format!("http://{addr}/command")
}

#[tokio::test]
async fn worker_hands_bodies_to_the_handler() {
    let seen = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&seen);
    let url = spawn_worker(move |raw| {
        assert_eq!(raw, "!#F00");
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    })
    .await;

    let sender = Worker::new(Agent::Gateway).unwrap();
    let response = sender.send_to(&url, "!#F00").await.unwrap();
    assert_eq!(response, "OK");
    assert_eq!(seen.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn worker_reports_handler_errors_as_500() {
    let url = spawn_worker(|raw| {
        Command::decode(&raw)?;
        Ok(())
    })
    .await;

    let sender = Worker::new(Agent::Gateway).unwrap();
    // A valid command is accepted...
    sender.send_to(&url, "!#F00").await.unwrap();

    // ...and a malformed one comes back as a rejection with the decode
    // diagnostic in the body
    let err = sender.send_to(&url, "*oops").await.unwrap_err();
    match err {
        ProtocolError::Rejected { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("unknown action code"), "body was {body:?}");
        }
        other => panic!("expected rejection, got {other:?}"),
    }
}
