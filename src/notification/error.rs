//! Notification error types.

use thiserror::Error;

use crate::broadcasting::BroadcastError;

/// Errors surfaced while dispatching a notification through a channel.
#[derive(Error, Debug)]
pub enum NotificationError {
    /// Transport failure, passed through untouched
    #[error(transparent)]
    Broadcast(#[from] BroadcastError),

    #[error("No table registered for source '{0}'")]
    UnknownTable(String),

    #[error("Entity from '{source_name}' has no value for primary key '{field}'")]
    MissingPrimaryKey { source_name: String, field: String },

    #[error("Notification channel '{0}' is not registered")]
    UnknownChannel(String),

    #[error("Failed to build notification payload: {0}")]
    Payload(String),
}

pub type NotificationResult<T> = Result<T, NotificationError>;
