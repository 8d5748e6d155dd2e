//! Broadcasting layer.
//!
//! Delivers events to named channels through a pluggable driver:
//! - `null` discards everything
//! - `log` writes broadcasts to the tracing pipeline
//! - `memory` fans out to in-process subscribers
//! - `redis` publishes over Redis pub/sub
//!
//! # Configuration
//!
//! ```toml
//! [broadcasting]
//! driver = "redis"  # or "null", "log", "memory"
//! memory_capacity = 256
//!
//! [broadcasting.redis]
//! url = "redis://127.0.0.1:6379"
//! pool_size = 10
//! connection_timeout = 5
//! key_prefix = ""
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let broadcasting = Broadcasting::new(settings.broadcasting).await?;
//! let pending = PendingBroadcast::to([Channel::private("users.1")])
//!     .event("order.shipped")
//!     .data(payload);
//! broadcasting.send(pending).await?;
//! ```

mod broadcaster;
mod channel;
mod error;
mod log;
mod manager;
mod memory;
mod message;
mod null;
mod pending;
mod queue;
mod redis;

pub use broadcaster::Broadcaster;
pub use channel::Channel;
pub use error::{BroadcastError, BroadcastResult};
pub use self::log::LogBroadcaster;
pub use manager::{BroadcastDispatcher, Broadcasting};
pub use memory::{BroadcastEvent, MemoryBroadcaster};
pub use message::{BroadcastMessage, BroadcastPayload};
pub use null::NullBroadcaster;
pub use pending::PendingBroadcast;
pub use queue::{BroadcastQueue, QueuedBroadcast};
pub use self::redis::RedisBroadcaster;

// Re-export config types
pub use crate::config::settings::{BroadcastDriver, BroadcastingConfig, RedisBroadcastConfig};
