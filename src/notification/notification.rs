//! Notification trait.

use crate::broadcasting::{BroadcastPayload, Channel};
use crate::notification::{Notifiable, NotificationResult};

/// A message that can be delivered over one or more notification channels.
///
/// Only [`id`](Notification::id) and [`via`](Notification::via) are required.
/// The broadcast capabilities default to "not provided", and the broadcast
/// channel falls back to its own derivations for each one that is absent.
///
/// # Example Implementation
/// ```ignore
/// struct OrderShipped {
///     id: String,
///     order_id: u64,
/// }
///
/// impl Notification for OrderShipped {
///     fn id(&self) -> &str {
///         &self.id
///     }
///
///     fn via(&self, _notifiable: &Notifiable) -> Vec<String> {
///         vec!["broadcast".to_string()]
///     }
///
///     fn broadcast_queue(&self) -> Option<String> {
///         Some("notifications".to_string())
///     }
/// }
/// ```
pub trait Notification: Send + Sync {
    /// Opaque notification identifier
    fn id(&self) -> &str;

    /// Fully qualified kind name, `::`-separated
    fn kind(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Channel keys this notification should be delivered on
    fn via(&self, notifiable: &Notifiable) -> Vec<String>;

    /// Broadcast payload for `notifiable`; `None` broadcasts an empty payload
    fn to_broadcast(&self, _notifiable: &Notifiable) -> NotificationResult<Option<BroadcastPayload>> {
        Ok(None)
    }

    /// Explicit broadcast targets; empty means "the recipient's private channel"
    fn broadcast_on(&self) -> Vec<Channel> {
        Vec::new()
    }

    /// Explicit event name; `None` derives it from [`kind`](Notification::kind)
    fn broadcast_as(&self) -> Option<String> {
        None
    }

    /// Queue to hand the broadcast to; `None` sends synchronously
    fn broadcast_queue(&self) -> Option<String> {
        None
    }
}
