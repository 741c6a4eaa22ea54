//! Explicit deadlines for storage operations

use crate::core::error::StorageError;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

/// Point in time after which a storage call is abandoned
///
/// `Deadline::none()` runs to completion. Operations are never retried
/// after a timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Deadline(Option<Instant>);

impl Deadline {
    /// No deadline
    pub fn none() -> Self {
        Self(None)
    }

    /// A deadline `timeout` from now
    pub fn after(timeout: Duration) -> Self {
        Self(Some(Instant::now() + timeout))
    }

    /// A deadline at a fixed instant
    pub fn at(instant: Instant) -> Self {
        Self(Some(instant))
    }

    /// Build from an optional timeout in milliseconds (`0` or `None` disables it)
    pub fn from_millis(timeout_ms: Option<u64>) -> Self {
        match timeout_ms {
            Some(ms) if ms > 0 => Self::after(Duration::from_millis(ms)),
            _ => Self::none(),
        }
    }

    /// Whether the deadline has already passed
    pub fn is_expired(&self) -> bool {
        self.0.is_some_and(|instant| Instant::now() >= instant)
    }

    /// Drive `fut` to completion unless the deadline passes first
    pub async fn run<F>(self, operation: &str, fut: F) -> Result<F::Output, StorageError>
    where
        F: Future,
    {
        let timeout = || StorageError::Timeout {
            operation: operation.to_string(),
        };

        if self.is_expired() {
            tracing::warn!(operation, "deadline already expired");
            return Err(timeout());
        }

        match self.0 {
            None => Ok(fut.await),
            Some(instant) => tokio::time::timeout_at(instant, fut).await.map_err(|_| {
                tracing::warn!(operation, "deadline exceeded");
                timeout()
            }),
        }
    }
}
