//! Broadcasting manager that dispatches to the configured driver.

use std::sync::Arc;

use async_trait::async_trait;

use crate::broadcasting::log::LogBroadcaster;
use crate::broadcasting::memory::MemoryBroadcaster;
use crate::broadcasting::null::NullBroadcaster;
use crate::broadcasting::queue::BroadcastQueue;
use crate::broadcasting::redis::RedisBroadcaster;
use crate::broadcasting::{BroadcastResult, Broadcaster, PendingBroadcast};
use crate::config::settings::{BroadcastDriver, BroadcastingConfig};

/// Terminal operations for a [`PendingBroadcast`].
///
/// This is the seam the broadcast notification channel talks to.
#[async_trait]
pub trait BroadcastDispatcher: Send + Sync {
    /// Deliver now. Transport errors are returned as-is.
    async fn send(&self, broadcast: PendingBroadcast) -> BroadcastResult<()>;

    /// Hand off to the named queue without waiting for delivery.
    fn queue(&self, broadcast: PendingBroadcast, queue: &str) -> BroadcastResult<()>;
}

/// Owns the configured [`Broadcaster`] and the named queues feeding it.
#[derive(Clone)]
pub struct Broadcasting {
    broadcaster: Arc<dyn Broadcaster>,
    queue: BroadcastQueue,
    config: BroadcastingConfig,
}

impl Broadcasting {
    /// Create a broadcasting manager for the configured driver.
    pub async fn new(config: BroadcastingConfig) -> BroadcastResult<Self> {
        let broadcaster: Arc<dyn Broadcaster> = match config.driver {
            BroadcastDriver::Null => Arc::new(NullBroadcaster::new()),
            BroadcastDriver::Log => Arc::new(LogBroadcaster::new()),
            BroadcastDriver::Memory => Arc::new(MemoryBroadcaster::new(config.memory_capacity)),
            BroadcastDriver::Redis => Arc::new(RedisBroadcaster::new(&config.redis).await?),
        };

        tracing::debug!(driver = broadcaster.name(), "broadcasting initialized");
        Ok(Self::with_broadcaster(broadcaster, config))
    }

    /// Wrap an already constructed broadcaster.
    pub fn with_broadcaster(broadcaster: Arc<dyn Broadcaster>, config: BroadcastingConfig) -> Self {
        let queue = BroadcastQueue::new(Arc::clone(&broadcaster));
        Self {
            broadcaster,
            queue,
            config,
        }
    }

    pub fn broadcaster(&self) -> &Arc<dyn Broadcaster> {
        &self.broadcaster
    }

    pub fn config(&self) -> &BroadcastingConfig {
        &self.config
    }

    pub fn queues(&self) -> Vec<String> {
        self.queue.queues()
    }
}

#[async_trait]
impl BroadcastDispatcher for Broadcasting {
    async fn send(&self, broadcast: PendingBroadcast) -> BroadcastResult<()> {
        self.broadcaster
            .broadcast(
                broadcast.channels(),
                broadcast.event_name(),
                broadcast.payload(),
            )
            .await
    }

    fn queue(&self, broadcast: PendingBroadcast, queue: &str) -> BroadcastResult<()> {
        self.queue.push(queue, broadcast).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broadcasting::Channel;
    use std::time::Duration;

    fn memory_config() -> BroadcastingConfig {
        BroadcastingConfig {
            driver: BroadcastDriver::Memory,
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_default_driver_is_null() {
        let broadcasting = Broadcasting::new(BroadcastingConfig::default()).await.unwrap();
        assert_eq!(broadcasting.broadcaster().name(), "null");
        let result = broadcasting
            .send(PendingBroadcast::to([Channel::public("x")]).event("e"))
            .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_log_driver_selected() {
        let config = BroadcastingConfig {
            driver: BroadcastDriver::Log,
            ..Default::default()
        };
        let broadcasting = Broadcasting::new(config).await.unwrap();
        assert_eq!(broadcasting.broadcaster().name(), "log");
    }

    #[tokio::test]
    async fn test_send_and_queue_reach_the_same_driver() {
        let memory = Arc::new(MemoryBroadcaster::new(8));
        let mut rx = memory.subscribe();
        let broadcasting = Broadcasting::with_broadcaster(memory, memory_config());

        broadcasting
            .send(PendingBroadcast::to([Channel::private("a")]).event("direct"))
            .await
            .unwrap();
        broadcasting
            .queue(PendingBroadcast::to([Channel::private("a")]).event("queued"), "default")
            .unwrap();

        let direct = rx.recv().await.unwrap();
        assert_eq!(direct.event, "direct");
        let queued = tokio::time::timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("queued broadcast should arrive")
            .unwrap();
        assert_eq!(queued.event, "queued");
        assert_eq!(broadcasting.queues(), vec!["default".to_string()]);
    }
}
