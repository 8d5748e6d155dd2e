//! Log broadcaster.
//!
//! Writes every broadcast to the `tracing` pipeline instead of a transport.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::broadcasting::{BroadcastResult, Broadcaster, Channel};

/// Broadcaster that emits one `info` record per target channel.
#[derive(Debug, Default)]
pub struct LogBroadcaster;

impl LogBroadcaster {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Broadcaster for LogBroadcaster {
    async fn broadcast(
        &self,
        channels: &[Channel],
        event: &str,
        payload: &Map<String, Value>,
    ) -> BroadcastResult<()> {
        let payload = serde_json::to_string(payload)?;
        for channel in channels {
            tracing::info!(
                event = "broadcast",
                channel = %channel,
                broadcast_event = %event,
                payload = %payload,
                "broadcasting event"
            );
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}
