//! Null broadcaster.
//!
//! Accepts every broadcast and delivers nothing.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::broadcasting::{BroadcastResult, Broadcaster, Channel};

/// A broadcaster that discards everything.
///
/// Used when `broadcasting.driver = "null"` in configuration.
pub struct NullBroadcaster;

impl NullBroadcaster {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NullBroadcaster {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Broadcaster for NullBroadcaster {
    async fn broadcast(
        &self,
        _channels: &[Channel],
        _event: &str,
        _payload: &Map<String, Value>,
    ) -> BroadcastResult<()> {
        Ok(())
    }

    fn name(&self) -> &'static str {
        "null"
    }
}
