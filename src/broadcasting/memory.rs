//! In-process broadcaster built on `tokio::sync::broadcast`.

use async_trait::async_trait;
use jiff::Timestamp;
use serde::Serialize;
use serde_json::{Map, Value};
use tokio::sync::broadcast;

use crate::broadcasting::{BroadcastResult, Broadcaster, Channel};

/// One event as seen by an in-process subscriber.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BroadcastEvent {
    pub channel: Channel,
    pub event: String,
    pub data: Map<String, Value>,
    pub broadcast_at: Timestamp,
}

/// Fans every broadcast out to all live subscribers, one [`BroadcastEvent`]
/// per target channel.
///
/// Events published while nobody is subscribed are dropped. Slow subscribers
/// lag and lose the oldest events once `capacity` is exceeded.
pub struct MemoryBroadcaster {
    sender: broadcast::Sender<BroadcastEvent>,
}

impl MemoryBroadcaster {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<BroadcastEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

#[async_trait]
impl Broadcaster for MemoryBroadcaster {
    async fn broadcast(
        &self,
        channels: &[Channel],
        event: &str,
        payload: &Map<String, Value>,
    ) -> BroadcastResult<()> {
        let broadcast_at = Timestamp::now();
        for channel in channels {
            let delivered = self
                .sender
                .send(BroadcastEvent {
                    channel: channel.clone(),
                    event: event.to_string(),
                    data: payload.clone(),
                    broadcast_at,
                })
                .unwrap_or(0);
            tracing::trace!(channel = %channel, event, delivered, "memory broadcast");
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
