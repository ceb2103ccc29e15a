//! Time source driving the confirmation loop

use std::time::Duration;

use async_trait::async_trait;

/// Suspends the confirmation loop between polls
#[async_trait]
pub trait Scheduler: Send + Sync {
    /// Wait for `duration` before the next poll
    async fn sleep(&self, duration: Duration);
}

/// Scheduler backed by the tokio timer
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioScheduler;

#[async_trait]
impl Scheduler for TokioScheduler {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
