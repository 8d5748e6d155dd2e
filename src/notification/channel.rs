//! Delivery channel trait.

use async_trait::async_trait;

use crate::notification::{Notifiable, Notification, NotificationResult};

/// A delivery mechanism a notification can be sent through.
///
/// Uses `async_trait` so channels can be stored as trait objects in the
/// [`ChannelRegistry`](crate::notification::ChannelRegistry).
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Deliver `notification` to `notifiable`
    async fn send(
        &self,
        notifiable: &Notifiable,
        notification: &dyn Notification,
    ) -> NotificationResult<()>;

    /// Returns the channel name for logging/debugging
    fn name(&self) -> &'static str;
}
