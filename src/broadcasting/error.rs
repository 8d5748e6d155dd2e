//! Broadcasting error types.

use thiserror::Error;

/// Errors raised by broadcasters and the broadcast queue.
#[derive(Error, Debug)]
pub enum BroadcastError {
    #[error("Broadcast connection failed: {0}")]
    Connection(String),

    #[error("Failed to publish to channel '{channel}': {message}")]
    Publish { channel: String, message: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Broadcast queue '{0}' is closed")]
    QueueClosed(String),
}

pub type BroadcastResult<T> = Result<T, BroadcastError>;
