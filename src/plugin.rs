//! Plugin entry point.
//!
//! Wires the broadcast channel provider into a [`NotificationManager`] so the
//! `"broadcast"` channel is registered on the next discovery.

use std::sync::Arc;

use crate::broadcasting::{BroadcastResult, Broadcasting};
use crate::config::Settings;
use crate::notification::{NotificationManager, SchemaLocator};
use crate::provider::BroadcastChannelProvider;

pub struct BroadcastingNotificationPlugin {
    provider: BroadcastChannelProvider,
}

impl BroadcastingNotificationPlugin {
    pub fn new(provider: BroadcastChannelProvider) -> Self {
        Self { provider }
    }

    /// Build the configured broadcasting driver and a provider that uses the
    /// `notification.channels.broadcast` options from `settings`.
    pub async fn from_settings(
        settings: &Settings,
        locator: Arc<dyn SchemaLocator>,
    ) -> BroadcastResult<Self> {
        let broadcasting = Broadcasting::new(settings.broadcasting.clone()).await?;
        let provider =
            BroadcastChannelProvider::new(Arc::new(broadcasting), locator).with_settings(settings);

        tracing::info!(
            application = %settings.application.name,
            driver = ?settings.broadcasting.driver,
            "broadcasting notification plugin ready"
        );
        Ok(Self::new(provider))
    }

    pub fn provider(&self) -> &BroadcastChannelProvider {
        &self.provider
    }

    /// Hook the provider into `manager`'s discovery.
    pub fn bootstrap(&self, manager: &mut NotificationManager) {
        manager.add_provider(Box::new(self.provider.clone()));
    }
}
