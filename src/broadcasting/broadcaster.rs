//! Core broadcaster trait.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::broadcasting::{BroadcastResult, Channel};

/// Trait for broadcast drivers (redis, in-process, log, ...)
///
/// Implementations deliver one event with one payload to every listed
/// channel. Partial failure semantics across channels are up to the driver.
#[async_trait]
pub trait Broadcaster: Send + Sync {
    /// Deliver `event` with `payload` to `channels`
    async fn broadcast(
        &self,
        channels: &[Channel],
        event: &str,
        payload: &Map<String, Value>,
    ) -> BroadcastResult<()>;

    /// Returns the driver name for logging/debugging
    fn name(&self) -> &'static str;
}
