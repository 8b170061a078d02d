use keyhole_core::StorageError;
use std::future::Future;
use std::time::Duration;
use tracing::warn;
use typed_builder::TypedBuilder;

/// Bounded retry configuration for store calls.
#[derive(Debug, Clone, Copy, TypedBuilder)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    #[builder(default = 3)]
    pub max_attempts: u32,
    /// Backoff before the first retry; doubles on each subsequent retry.
    #[builder(default = Duration::from_millis(50))]
    pub initial_backoff: Duration,
    /// Deadline for each individual store call.
    #[builder(default = Duration::from_secs(5))]
    pub op_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Runs a store operation with a per-attempt timeout, retrying transient
/// failures with doubling backoff.
///
/// Permanent failures return immediately: retrying a collision or a query
/// error cannot change the answer.
pub async fn retry_transient<T, F, Fut>(policy: &RetryPolicy, mut op: F) -> Result<T, StorageError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, StorageError>>,
{
    let mut backoff = policy.initial_backoff;
    let mut attempt = 1u32;

    loop {
        let result = match tokio::time::timeout(policy.op_timeout, op()).await {
            Ok(result) => result,
            Err(_) => Err(StorageError::Timeout(format!(
                "store call exceeded {:?}",
                policy.op_timeout
            ))),
        };

        match result {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && attempt < policy.max_attempts => {
                warn!(attempt, error = %err, "transient storage failure, retrying");
                tokio::time::sleep(backoff).await;
                backoff *= 2;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}
