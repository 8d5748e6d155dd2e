//! Broadcast channel provider.
//!
//! Registers the broadcast channel with the notification system.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::broadcasting::BroadcastDispatcher;
use crate::channel::{BROADCAST, BroadcastChannel};
use crate::config::Settings;
use crate::notification::{ChannelConfig, ChannelProvider, ChannelRegistry, SchemaLocator};

/// Provides the `"broadcast"` channel.
///
/// The channel options are the provider defaults overlaid with the
/// `notification.channels.broadcast` section of the settings.
#[derive(Clone)]
pub struct BroadcastChannelProvider {
    dispatcher: Arc<dyn BroadcastDispatcher>,
    locator: Arc<dyn SchemaLocator>,
    overrides: Map<String, Value>,
}

impl BroadcastChannelProvider {
    pub fn new(dispatcher: Arc<dyn BroadcastDispatcher>, locator: Arc<dyn SchemaLocator>) -> Self {
        Self {
            dispatcher,
            locator,
            overrides: Map::new(),
        }
    }

    /// Use the broadcast section of `settings` as the option override
    pub fn with_settings(self, settings: &Settings) -> Self {
        self.with_overrides(settings.notification.channel(BROADCAST))
    }

    pub fn with_overrides(self, overrides: Map<String, Value>) -> Self {
        Self { overrides, ..self }
    }

    /// Defaults with the configured overrides applied
    pub fn effective_config(&self) -> Map<String, Value> {
        let mut config = self.default_config();
        config.extend(self.overrides.clone());
        config
    }
}

impl ChannelProvider for BroadcastChannelProvider {
    fn provides(&self) -> Vec<&'static str> {
        vec![BROADCAST]
    }

    fn register(&self, registry: &mut ChannelRegistry) {
        let dispatcher = Arc::clone(&self.dispatcher);
        let locator = Arc::clone(&self.locator);

        registry.load(
            BROADCAST,
            ChannelConfig::of::<BroadcastChannel, _>(self.effective_config(), move |options| {
                BroadcastChannel::new(options.clone(), Arc::clone(&dispatcher), Arc::clone(&locator))
            }),
        );
    }

    fn default_config(&self) -> Map<String, Value> {
        Map::new()
    }
}
