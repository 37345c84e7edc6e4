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


//! # Vista Service Tests - Counter
//!
//! Tests for the bounded retry policy around prediction hit counters.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test counter
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use vista::service::increment_with_retry;
use vista::{ViError, ViHitCounter, ViMemoryCounter, ViRetryPolicy};

/// Fails with `error` for the first `failures` calls, then counts normally.
#[derive(Debug)]
struct ViFlakyCounter {
    failures: usize,
    calls: AtomicUsize,
    error: fn() -> ViError,
}

impl ViFlakyCounter {
    fn new(failures: usize, error: fn() -> ViError) -> Self {
        Self {
            failures,
            calls: AtomicUsize::new(0),
            error,
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ViHitCounter for ViFlakyCounter {
    async fn increment(&self) -> vista::Result<i64> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            Err((self.error)())
        } else {
            Ok((call - self.failures + 1) as i64)
        }
    }
}

fn refused() -> ViError {
    ViError::connection("connection refused")
}

fn fast_policy() -> ViRetryPolicy {
    ViRetryPolicy::new(5, Duration::from_millis(1))
}

/// Tests that the defaults are five retries half a second apart.
#[test]
fn test_default_policy() {
    let policy = ViRetryPolicy::default();
    assert_eq!(policy.retries, 5);
    assert_eq!(policy.backoff, Duration::from_millis(500));
}

/// Tests that a healthy counter is called once.
#[tokio::test]
async fn test_increment_without_failures() {
    let counter = ViMemoryCounter::new();
    assert_eq!(increment_with_retry(&counter, &fast_policy()).await.unwrap(), 1);
    assert_eq!(increment_with_retry(&counter, &fast_policy()).await.unwrap(), 2);
}

/// Tests recovery after transient connection failures.
#[tokio::test]
async fn test_increment_recovers_after_connection_errors() {
    let counter = ViFlakyCounter::new(2, refused);

    let hits = increment_with_retry(&counter, &fast_policy()).await.unwrap();
    assert_eq!(hits, 1);
    assert_eq!(counter.calls(), 3);
}

/// Tests that the last connection error is re-raised after all retries.
#[tokio::test]
async fn test_increment_gives_up_after_retries() {
    let counter = ViFlakyCounter::new(usize::MAX, refused);

    let err = increment_with_retry(&counter, &fast_policy()).await.unwrap_err();
    assert!(err.is_connection());
    assert_eq!(counter.calls(), 6);
}

/// Tests that succeeding on the final attempt still counts.
#[tokio::test]
async fn test_increment_succeeds_on_last_attempt() {
    let counter = ViFlakyCounter::new(5, refused);

    assert_eq!(increment_with_retry(&counter, &fast_policy()).await.unwrap(), 1);
    assert_eq!(counter.calls(), 6);
}

/// Tests that non-connection failures are not retried.
#[tokio::test]
async fn test_increment_does_not_retry_other_errors() {
    let counter = ViFlakyCounter::new(usize::MAX, || ViError::internal("WRONGTYPE"));

    let err = increment_with_retry(&counter, &fast_policy()).await.unwrap_err();
    assert!(matches!(err, ViError::Internal(_)));
    assert_eq!(counter.calls(), 1);
}

/// Tests that the backoff is actually waited between attempts.
#[tokio::test]
async fn test_increment_waits_between_attempts() {
    let counter = ViFlakyCounter::new(2, refused);
    let policy = ViRetryPolicy::new(5, Duration::from_millis(20));

    let started = std::time::Instant::now();
    increment_with_retry(&counter, &policy).await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(40));
}
