//! Notification dispatch.
//!
//! Owns the channel registry, runs channel providers on discovery and sends
//! notifications through every channel they ask for.

use crate::notification::{
    ChannelProvider, ChannelRegistry, Notifiable, Notification, NotificationError,
    NotificationResult,
};

/// Dispatches notifications to registered channels
#[derive(Default)]
pub struct NotificationManager {
    registry: ChannelRegistry,
    providers: Vec<Box<dyn ChannelProvider>>,
}

impl NotificationManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a provider to be registered on the next [`discover`](Self::discover)
    pub fn add_provider(&mut self, provider: Box<dyn ChannelProvider>) -> &mut Self {
        self.providers.push(provider);
        self
    }

    /// Let every known provider register its channels
    pub fn discover(&mut self) -> &mut Self {
        for provider in &self.providers {
            tracing::debug!(provides = ?provider.provides(), "registering channel provider");
            provider.register(&mut self.registry);
        }
        self
    }

    pub fn registry(&self) -> &ChannelRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ChannelRegistry {
        &mut self.registry
    }

    /// Send `notification` to `notifiable` on every channel from
    /// [`Notification::via`], in order.
    ///
    /// Stops at the first channel that fails.
    pub async fn send(
        &self,
        notifiable: &Notifiable,
        notification: &dyn Notification,
    ) -> NotificationResult<()> {
        for key in notification.via(notifiable) {
            let channel = self
                .registry
                .get(&key)
                .ok_or_else(|| NotificationError::UnknownChannel(key.clone()))?;

            tracing::debug!(
                channel = %key,
                notification_id = notification.id(),
                notification_type = notification.kind(),
                "sending notification"
            );
            channel.send(notifiable, notification).await?;
        }
        Ok(())
    }

    /// Send the same notification to several recipients
    pub async fn send_to_all(
        &self,
        notifiables: &[Notifiable],
        notification: &dyn Notification,
    ) -> NotificationResult<()> {
        for notifiable in notifiables {
            self.send(notifiable, notification).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::{AnonymousNotifiable, ChannelConfig, NotificationChannel};
    use async_trait::async_trait;
    use serde_json::Map;
    use std::sync::{Arc, Mutex};

    struct RecordingChannel {
        sent: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl NotificationChannel for RecordingChannel {
        async fn send(
            &self,
            _notifiable: &Notifiable,
            notification: &dyn Notification,
        ) -> NotificationResult<()> {
            self.sent.lock().unwrap().push(notification.id().to_string());
            Ok(())
        }

        fn name(&self) -> &'static str {
            "recording"
        }
    }

    struct RecordingProvider {
        sent: Arc<Mutex<Vec<String>>>,
    }

    impl ChannelProvider for RecordingProvider {
        fn provides(&self) -> Vec<&'static str> {
            vec!["recording"]
        }

        fn register(&self, registry: &mut ChannelRegistry) {
            let sent = Arc::clone(&self.sent);
            registry.load(
                "recording",
                ChannelConfig::of::<RecordingChannel, _>(Map::new(), move |_| RecordingChannel {
                    sent: Arc::clone(&sent),
                }),
            );
        }
    }

    struct Ping {
        channels: Vec<String>,
    }

    impl Notification for Ping {
        fn id(&self) -> &str {
            "ping-1"
        }

        fn via(&self, _notifiable: &Notifiable) -> Vec<String> {
            self.channels.clone()
        }
    }

    #[tokio::test]
    async fn test_discover_then_send() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let mut manager = NotificationManager::new();
        manager
            .add_provider(Box::new(RecordingProvider {
                sent: Arc::clone(&sent),
            }))
            .discover();

        assert!(manager.registry().has("recording"));

        let notifiable = Notifiable::from(AnonymousNotifiable::new());
        let notification = Ping {
            channels: vec!["recording".to_string()],
        };
        manager.send(&notifiable, &notification).await.unwrap();
        manager
            .send_to_all(&[notifiable.clone(), notifiable], &notification)
            .await
            .unwrap();

        assert_eq!(sent.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_unknown_channel_is_an_error() {
        let manager = NotificationManager::new();
        let notification = Ping {
            channels: vec!["sms".to_string()],
        };

        let err = manager
            .send(&Notifiable::from(AnonymousNotifiable::new()), &notification)
            .await
            .unwrap_err();
        assert!(matches!(err, NotificationError::UnknownChannel(key) if key == "sms"));
    }
}
