//! Broadcast request value.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::broadcasting::Channel;

/// A broadcast that has been described but not yet delivered.
///
/// Built field by field and handed to a
/// [`BroadcastDispatcher`](crate::broadcasting::BroadcastDispatcher), which either
/// sends it immediately or queues it.
///
/// # Example
/// ```ignore
/// let pending = PendingBroadcast::to(vec![Channel::private("users.1")])
///     .event("order.shipped")
///     .data(payload);
/// broadcasting.send(pending).await?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingBroadcast {
    channels: Vec<Channel>,
    event: String,
    data: Map<String, Value>,
}

impl PendingBroadcast {
    pub fn to(channels: impl IntoIterator<Item = Channel>) -> Self {
        Self {
            channels: channels.into_iter().collect(),
            event: String::new(),
            data: Map::new(),
        }
    }

    pub fn event(self, event: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            ..self
        }
    }

    pub fn data(self, data: Map<String, Value>) -> Self {
        Self { data, ..self }
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn event_name(&self) -> &str {
        &self.event
    }

    pub fn payload(&self) -> &Map<String, Value> {
        &self.data
    }
}
