//! Copyright © 2025-2026 Wenze Wei. All Rights Reserved.
//!
//! This file is part of Vista.
//! The Vista project belongs to the Dunimd Team.
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! You may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//!     http://www.apache.org/licenses/LICENSE-2.0
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.


//! # Vista Service Tests - Predict
//!
//! Exercises `POST /predict` and `GET /health` on a live server bound to
//! an ephemeral port.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test predict
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use vista::service::{serve_with_listener, PREDICTION_COUNT_HEADER};
use vista::{
    ViError, ViHitCounter, ViMemoryCounter, ViPolarityScores, ViRetryPolicy, ViServiceState,
    ViVaderModel,
};

struct ViTestServer {
    url: String,
    shutdown: oneshot::Sender<()>,
    handle: JoinHandle<vista::Result<()>>,
}

impl ViTestServer {
    async fn start(state: ViServiceState) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let (shutdown, signal) = oneshot::channel::<()>();
        let handle = tokio::spawn(serve_with_listener(listener, state, async move {
            let _ = signal.await;
        }));
        Self { url, shutdown, handle }
    }

    async fn predict(&self, body: Value) -> reqwest::Response {
        reqwest::Client::new()
            .post(format!("{}/predict", self.url))
            .json(&body)
            .send()
            .await
            .unwrap()
    }

    async fn stop(self) {
        self.shutdown.send(()).unwrap();
        self.handle.await.unwrap().unwrap();
    }
}

fn vader_state() -> ViServiceState {
    ViServiceState::new(Arc::new(ViVaderModel::new()))
}

#[derive(Debug)]
struct ViUnreachableCounter;

#[async_trait]
impl ViHitCounter for ViUnreachableCounter {
    async fn increment(&self) -> vista::Result<i64> {
        Err(ViError::connection("connection refused"))
    }
}

/// Tests that positive text scores a positive compound.
#[tokio::test]
async fn test_predict_positive_text() {
    let server = ViTestServer::start(vader_state()).await;

    let response = server.predict(json!({"data": "I love this"})).await;
    assert_eq!(response.status(), 200);
    let scores: ViPolarityScores = response.json().await.unwrap();
    assert!(scores.compound > 0.0);
    assert!(scores.pos > scores.neg);

    server.stop().await;
}

/// Tests that negative text scores a negative compound.
#[tokio::test]
async fn test_predict_negative_text() {
    let server = ViTestServer::start(vader_state()).await;

    let response = server.predict(json!({"data": "I hate this"})).await;
    assert_eq!(response.status(), 200);
    let scores: ViPolarityScores = response.json().await.unwrap();
    assert!(scores.compound < 0.0);

    server.stop().await;
}

/// Tests that empty text returns all four scores as zero.
#[tokio::test]
async fn test_predict_empty_text_is_all_zero() {
    let server = ViTestServer::start(vader_state()).await;

    let response = server.predict(json!({"data": ""})).await;
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"neg": 0.0, "neu": 0.0, "pos": 0.0, "compound": 0.0}));

    server.stop().await;
}

/// Tests the bad-request responses and that the server keeps serving afterwards.
#[tokio::test]
async fn test_predict_malformed_requests_are_bad_requests() {
    let server = ViTestServer::start(vader_state()).await;
    let client = reqwest::Client::new();
    let url = format!("{}/predict", server.url);

    let missing_key = server.predict(json!({"text": "I love this"})).await;
    let wrong_type = server.predict(json!({"data": 42})).await;
    let not_json = client
        .post(&url)
        .header("content-type", "application/json")
        .body("I love this")
        .send()
        .await
        .unwrap();
    let no_content_type = client
        .post(&url)
        .body(r#"{"data": "I love this"}"#)
        .send()
        .await
        .unwrap();

    for response in [missing_key, wrong_type, not_json, no_content_type] {
        assert_eq!(response.status(), 400);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "bad_request");
        assert!(body["message"].as_str().is_some_and(|m| !m.is_empty()));
    }

    let response = server.predict(json!({"data": "I love this"})).await;
    assert_eq!(response.status(), 200);

    drop(client);
    server.stop().await;
}

/// Tests the health route.
#[tokio::test]
async fn test_health() {
    let server = ViTestServer::start(vader_state()).await;

    let body: Value = reqwest::get(format!("{}/health", server.url))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!({"status": "ok"}));

    server.stop().await;
}

/// Tests that each prediction increments the counter and reports it.
#[tokio::test]
async fn test_predict_reports_prediction_count() {
    let counter = Arc::new(ViMemoryCounter::new());
    let state = vader_state().with_counter(counter.clone(), ViRetryPolicy::default());
    let server = ViTestServer::start(state).await;

    for expected in ["1", "2"] {
        let response = server.predict(json!({"data": "fine"})).await;
        assert_eq!(
            response.headers().get(PREDICTION_COUNT_HEADER).unwrap(),
            expected
        );
    }
    assert_eq!(counter.value(), 2);

    server.stop().await;
}

/// Tests that predictions are still served when the counter is unreachable.
#[tokio::test]
async fn test_predict_survives_counter_outage() {
    let policy = ViRetryPolicy::new(2, Duration::from_millis(1));
    let state = vader_state().with_counter(Arc::new(ViUnreachableCounter), policy);
    let server = ViTestServer::start(state).await;

    let response = server.predict(json!({"data": "I love this"})).await;
    assert_eq!(response.status(), 200);
    assert!(response.headers().get(PREDICTION_COUNT_HEADER).is_none());

    server.stop().await;
}
