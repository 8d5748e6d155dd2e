//! Structured broadcast payloads.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Payload returned by a notification for the broadcast channel.
///
/// Flattened to a plain key/value map before it is handed to a transport.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BroadcastMessage {
    data: Map<String, Value>,
}

impl BroadcastMessage {
    pub fn new(data: Map<String, Value>) -> Self {
        Self { data }
    }

    /// Add or replace a single entry
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    pub fn to_map(&self) -> Map<String, Value> {
        self.data.clone()
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.data
    }
}

impl From<Map<String, Value>> for BroadcastMessage {
    fn from(data: Map<String, Value>) -> Self {
        Self::new(data)
    }
}

/// What a notification produces for broadcasting: either a raw map or a
/// [`BroadcastMessage`].
#[derive(Debug, Clone, PartialEq)]
pub enum BroadcastPayload {
    Data(Map<String, Value>),
    Message(BroadcastMessage),
}

impl BroadcastPayload {
    pub fn into_map(self) -> Map<String, Value> {
        match self {
            BroadcastPayload::Data(data) => data,
            BroadcastPayload::Message(message) => message.into_map(),
        }
    }
}

impl From<Map<String, Value>> for BroadcastPayload {
    fn from(data: Map<String, Value>) -> Self {
        BroadcastPayload::Data(data)
    }
}

impl From<BroadcastMessage> for BroadcastPayload {
    fn from(message: BroadcastMessage) -> Self {
        BroadcastPayload::Message(message)
    }
}
