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

//! Prediction hit counters and the retry policy applied to them.
//!
//! Only [`ViError::Connection`] failures are retried; anything else is
//! returned on the first attempt.

use std::fmt::Debug;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::config::ViCounterConfig;
use crate::errors::{Result, ViError};

/// A monotonically increasing shared counter.
#[async_trait]
pub trait ViHitCounter: Debug + Send + Sync {
    /// Increments by one and returns the new value.
    async fn increment(&self) -> Result<i64>;
}

/// In-process counter.
#[derive(Debug, Default)]
pub struct ViMemoryCounter {
    hits: AtomicI64,
}

impl ViMemoryCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> i64 {
        self.hits.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ViHitCounter for ViMemoryCounter {
    async fn increment(&self) -> Result<i64> {
        Ok(self.hits.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

/// Bounded retry with a fixed pause between attempts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ViRetryPolicy {
    /// Retries after the first attempt.
    pub retries: usize,
    pub backoff: Duration,
}

impl Default for ViRetryPolicy {
    fn default() -> Self {
        Self {
            retries: 5,
            backoff: Duration::from_millis(500),
        }
    }
}

impl From<&ViCounterConfig> for ViRetryPolicy {
    fn from(config: &ViCounterConfig) -> Self {
        Self {
            retries: config.retries,
            backoff: Duration::from_millis(config.backoff_ms),
        }
    }
}

impl ViRetryPolicy {
    pub fn new(retries: usize, backoff: Duration) -> Self {
        Self { retries, backoff }
    }

    /// Total attempts including the first one.
    pub fn attempts(&self) -> usize {
        self.retries + 1
    }
}

/// Increments `counter`, retrying connection failures per `policy`.
///
/// The last connection error is returned once retries are exhausted.
pub async fn increment_with_retry(counter: &dyn ViHitCounter, policy: &ViRetryPolicy) -> Result<i64> {
    let mut attempt = 0;
    loop {
        match counter.increment().await {
            Ok(hits) => return Ok(hits),
            Err(err) if err.is_connection() && attempt < policy.retries => {
                attempt += 1;
                log::warn!(
                    "counter unavailable (retry {}/{}): {}",
                    attempt,
                    policy.retries,
                    err
                );
                tokio::time::sleep(policy.backoff).await;
            }
            Err(err) => return Err(err),
        }
    }
}

#[cfg(feature = "redis")]
pub use self::redis_backend::ViRedisCounter;

#[cfg(feature = "redis")]
mod redis_backend {
    use redis::aio::MultiplexedConnection;
    use redis::AsyncCommands;
    use tokio::sync::Mutex;

    use super::*;

    /// `INCR <key>` against a Redis server.
    ///
    /// The connection is opened on first use and dropped after a
    /// connection-kind failure so the next attempt reconnects.
    pub struct ViRedisCounter {
        client: redis::Client,
        key: String,
        connection: Mutex<Option<MultiplexedConnection>>,
    }

    impl Debug for ViRedisCounter {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.debug_struct("ViRedisCounter")
                .field("key", &self.key)
                .finish_non_exhaustive()
        }
    }

    fn classify(err: redis::RedisError) -> ViError {
        if err.is_connection_dropped()
            || err.is_connection_refusal()
            || err.is_io_error()
            || err.is_timeout()
        {
            ViError::connection(err.to_string())
        } else {
            ViError::internal(format!("redis: {}", err))
        }
    }

    impl ViRedisCounter {
        pub fn new(url: &str, key: impl Into<String>) -> Result<Self> {
            let client = redis::Client::open(url)
                .map_err(|e| ViError::validation(format!("invalid redis url '{}': {}", url, e)))?;
            Ok(Self {
                client,
                key: key.into(),
                connection: Mutex::new(None),
            })
        }

        pub fn from_config(config: &ViCounterConfig) -> Result<Self> {
            Self::new(&config.url, config.key.clone())
        }
    }

    #[async_trait]
    impl ViHitCounter for ViRedisCounter {
        async fn increment(&self) -> Result<i64> {
            let mut guard = self.connection.lock().await;
            if guard.is_none() {
                let conn = self
                    .client
                    .get_multiplexed_async_connection()
                    .await
                    .map_err(classify)?;
                *guard = Some(conn);
            }
            let Some(conn) = guard.as_mut() else {
                return Err(ViError::internal("redis connection missing"));
            };
            let result: redis::RedisResult<i64> = conn.incr(&self.key, 1i64).await;
            match result {
                Ok(hits) => Ok(hits),
                Err(err) => {
                    let err = classify(err);
                    if err.is_connection() {
                        *guard = None;
                    }
                    Err(err)
                }
            }
        }
    }
}
