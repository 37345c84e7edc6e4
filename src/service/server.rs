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

use std::future::Future;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use crate::config::ViServerConfig;
use crate::errors::{Result, ViError};
use crate::service::counter::{increment_with_retry, ViHitCounter, ViRetryPolicy};
use crate::service::sentiment::{ViSentimentModel, ViVaderModel};

/// Response header carrying the counter value after a prediction.
pub const PREDICTION_COUNT_HEADER: &str = "x-prediction-count";

/// Body of `POST /predict`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViPredictRequest {
    pub data: String,
}

/// Shared, read-only handler state.
#[derive(Clone, Debug)]
pub struct ViServiceState {
    pub model: Arc<dyn ViSentimentModel>,
    pub counter: Option<Arc<dyn ViHitCounter>>,
    pub policy: ViRetryPolicy,
}

impl ViServiceState {
    pub fn new(model: Arc<dyn ViSentimentModel>) -> Self {
        Self {
            model,
            counter: None,
            policy: ViRetryPolicy::default(),
        }
    }

    pub fn with_counter(mut self, counter: Arc<dyn ViHitCounter>, policy: ViRetryPolicy) -> Self {
        self.counter = Some(counter);
        self.policy = policy;
        self
    }

    /// VADER model plus the configured counter, if any.
    pub fn from_config(config: &ViServerConfig) -> Result<Self> {
        let state = Self::new(Arc::new(ViVaderModel::new()));
        match &config.counter {
            None => Ok(state),
            #[cfg(feature = "redis")]
            Some(counter) => {
                let redis = crate::service::counter::ViRedisCounter::from_config(counter)?;
                log::info!("counting predictions in redis key '{}'", counter.key);
                Ok(state.with_counter(Arc::new(redis), ViRetryPolicy::from(counter)))
            }
            #[cfg(not(feature = "redis"))]
            Some(_) => Err(ViError::validation(
                "a prediction counter is configured but vista was built without the redis feature",
            )),
        }
    }
}

/// `POST /predict` and `GET /health`.
pub fn build_router(state: ViServiceState) -> Router {
    Router::new()
        .route("/predict", post(predict))
        .route("/health", get(health))
        .with_state(state)
}

/// Binds `config.bind_address()` and serves until Ctrl-C.
pub async fn serve(config: &ViServerConfig, state: ViServiceState) -> Result<()> {
    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| ViError::connection(format!("cannot bind {}: {}", address, e)))?;
    log::info!("sentiment server listening on {}", address);
    serve_with_listener(listener, state, shutdown_signal()).await
}

/// Serves on an already bound listener until `shutdown` resolves.
pub async fn serve_with_listener<F>(listener: TcpListener, state: ViServiceState, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;
    log::info!("sentiment server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("shutdown requested"),
        Err(err) => {
            log::error!("cannot listen for ctrl-c: {}", err);
            std::future::pending::<()>().await;
        }
    }
}

fn bad_request(message: String) -> Response {
    let body = json!({
        "error": "bad_request",
        "message": message,
    });
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn predict(
    State(state): State<ViServiceState>,
    payload: std::result::Result<Json<ViPredictRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            log::warn!("rejected /predict request: {}", rejection.body_text());
            return bad_request(rejection.body_text());
        }
    };

    let scores = state.model.polarity_scores(&request.data);
    let mut response = Json(scores).into_response();

    if let Some(counter) = &state.counter {
        match increment_with_retry(counter.as_ref(), &state.policy).await {
            Ok(hits) => {
                response
                    .headers_mut()
                    .insert(PREDICTION_COUNT_HEADER, HeaderValue::from(hits));
            }
            Err(err) => log::warn!("prediction served without counting: {}", err),
        }
    }

    response
}
