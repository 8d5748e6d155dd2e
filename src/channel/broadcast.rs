//! Broadcast notification channel.
//!
//! Turns a notification into a [`PendingBroadcast`] and hands it to the
//! broadcasting layer for real-time delivery. Nothing is stored.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::broadcasting::{BroadcastDispatcher, Channel, PendingBroadcast};
use crate::notification::{
    Notifiable, Notification, NotificationChannel, NotificationError, NotificationResult,
    SchemaLocator,
};

/// Channel key the broadcast channel is registered under
pub const BROADCAST: &str = "broadcast";

/// Channel name used for anonymous recipients without a broadcast route
pub const ANONYMOUS_CHANNEL: &str = "anonymous";

/// Join the segments of a `::`-separated kind name with `.`
pub fn dotted_kind(kind: &str) -> String {
    kind.replace("::", ".")
}

/// Resolve the broadcast channel name for a recipient.
///
/// - anonymous recipients use their `broadcast` route, or `"anonymous"`
/// - entities use `receives_broadcast_notifications_on()` when it is set
/// - otherwise `{kind}.{primary key}`, e.g. `App.Models.User.123`
///
/// Only the first column of a composite primary key is used, so records
/// sharing that column share a channel.
pub fn notifiable_channel_name(
    notifiable: &Notifiable,
    locator: &dyn SchemaLocator,
) -> NotificationResult<String> {
    let entity = match notifiable {
        Notifiable::Anonymous(anonymous) => {
            return Ok(anonymous
                .route_notification_for(BROADCAST, None)
                .unwrap_or_else(|| ANONYMOUS_CHANNEL.to_string()));
        }
        Notifiable::Entity(entity) => entity,
    };

    if let Some(channel) = entity.receives_broadcast_notifications_on() {
        return Ok(channel);
    }

    let primary_key = locator.primary_key(entity.source())?;
    let field = primary_key
        .into_iter()
        .next()
        .ok_or_else(|| NotificationError::UnknownTable(entity.source().to_string()))?;
    let value = entity
        .get(&field)
        .filter(|value| !value.is_null())
        .ok_or_else(|| NotificationError::MissingPrimaryKey {
            source_name: entity.source().to_string(),
            field: field.clone(),
        })?;

    let key = match value {
        Value::String(key) => key,
        other => other.to_string(),
    };
    Ok(format!("{}.{}", dotted_kind(entity.kind()), key))
}

/// Delivers notifications over the broadcasting layer.
pub struct BroadcastChannel {
    config: Map<String, Value>,
    dispatcher: Arc<dyn BroadcastDispatcher>,
    locator: Arc<dyn SchemaLocator>,
}

impl BroadcastChannel {
    pub fn new(
        config: Map<String, Value>,
        dispatcher: Arc<dyn BroadcastDispatcher>,
        locator: Arc<dyn SchemaLocator>,
    ) -> Self {
        Self {
            config,
            dispatcher,
            locator,
        }
    }

    /// Options this channel was built with
    pub fn config(&self) -> &Map<String, Value> {
        &self.config
    }

    /// See [`notifiable_channel_name`]
    pub fn notifiable_channel_name(&self, notifiable: &Notifiable) -> NotificationResult<String> {
        notifiable_channel_name(notifiable, self.locator.as_ref())
    }

    /// Broadcast payload before `id`/`type` are added
    pub fn payload(
        &self,
        notifiable: &Notifiable,
        notification: &dyn Notification,
    ) -> NotificationResult<Map<String, Value>> {
        Ok(notification
            .to_broadcast(notifiable)?
            .map(|payload| payload.into_map())
            .unwrap_or_default())
    }

    pub fn channels(
        &self,
        notifiable: &Notifiable,
        notification: &dyn Notification,
    ) -> NotificationResult<Vec<Channel>> {
        let channels = notification.broadcast_on();
        if !channels.is_empty() {
            return Ok(channels);
        }
        Ok(vec![Channel::private(self.notifiable_channel_name(notifiable)?)])
    }

    pub fn event_name(&self, notification: &dyn Notification) -> String {
        notification
            .broadcast_as()
            .unwrap_or_else(|| dotted_kind(notification.kind()))
    }

    /// Everything `send` would hand to the broadcasting layer
    pub fn build(
        &self,
        notifiable: &Notifiable,
        notification: &dyn Notification,
    ) -> NotificationResult<PendingBroadcast> {
        let mut data = self.payload(notifiable, notification)?;
        let channels = self.channels(notifiable, notification)?;
        let event = self.event_name(notification);

        data.insert("id".to_string(), Value::from(notification.id()));
        data.insert("type".to_string(), Value::from(notification.kind()));

        Ok(PendingBroadcast::to(channels).event(event).data(data))
    }
}

#[async_trait]
impl NotificationChannel for BroadcastChannel {
    async fn send(
        &self,
        notifiable: &Notifiable,
        notification: &dyn Notification,
    ) -> NotificationResult<()> {
        let pending = self.build(notifiable, notification)?;

        match notification.broadcast_queue() {
            Some(queue) => {
                tracing::debug!(
                    queue = %queue,
                    broadcast_event = pending.event_name(),
                    notification_id = notification.id(),
                    "queueing broadcast notification"
                );
                self.dispatcher.queue(pending, &queue)?;
            }
            None => {
                tracing::debug!(
                    broadcast_event = pending.event_name(),
                    notification_id = notification.id(),
                    "broadcasting notification"
                );
                self.dispatcher.send(pending).await?;
            }
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        BROADCAST
    }
}
