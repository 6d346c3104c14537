//! Fixed-delay retry for remote calls, interruptible by cancellation.

use std::future::Future;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::error::{DriveError, Result};

/// Policy for `files.get` name lookups.
pub const NAME_LOOKUP_RETRY: RetryPolicy = RetryPolicy::new(3, Duration::from_secs(5));

/// Policy for `files.list` pages. Listing is the higher volume call and
/// gets the longer pause.
pub const LISTING_RETRY: RetryPolicy = RetryPolicy::new(3, Duration::from_secs(10));

/// How many times to retry a failed operation and how long to wait
/// between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub const fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    /// Run `op` until it succeeds or the retry budget is spent.
    ///
    /// Every error is treated as transient. After `max_retries` failed
    /// retries the last error is returned without a further wait. If
    /// `cancel` fires while waiting, [`DriveError::Cancelled`] is returned
    /// and `op` is not attempted again.
    pub async fn execute<T, F, Fut>(&self, cancel: &CancellationToken, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt: u32 = 0;
        loop {
            let err = match op().await {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };
            if attempt >= self.max_retries {
                return Err(err);
            }
            attempt += 1;

            warn!(
                attempt,
                max_retries = self.max_retries,
                delay = ?self.delay,
                error = %err,
                "attempt failed; retrying"
            );

            tokio::select! {
                _ = cancel.cancelled() => return Err(DriveError::Cancelled),
                _ = tokio::time::sleep(self.delay) => {}
            }
        }
    }
}
