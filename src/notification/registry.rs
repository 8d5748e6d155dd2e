//! Channel registry.
//!
//! Channels are built from registered factories and loaded under a key.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::notification::NotificationChannel;

type ChannelFactory =
    Arc<dyn Fn(&Map<String, Value>) -> Arc<dyn NotificationChannel> + Send + Sync>;

/// How to build a channel, and the effective options it is built with.
#[derive(Clone)]
pub struct ChannelConfig {
    class_name: &'static str,
    options: Map<String, Value>,
    factory: ChannelFactory,
}

impl ChannelConfig {
    /// Config for channel type `C`, tagged with its type name
    pub fn of<C, F>(options: Map<String, Value>, factory: F) -> Self
    where
        C: NotificationChannel + 'static,
        F: Fn(&Map<String, Value>) -> C + Send + Sync + 'static,
    {
        Self {
            class_name: std::any::type_name::<C>(),
            options,
            factory: Arc::new(move |options: &Map<String, Value>| {
                Arc::new(factory(options)) as Arc<dyn NotificationChannel>
            }),
        }
    }

    pub fn class_name(&self) -> &'static str {
        self.class_name
    }

    pub fn options(&self) -> &Map<String, Value> {
        &self.options
    }
}

impl fmt::Debug for ChannelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelConfig")
            .field("class_name", &self.class_name)
            .field("options", &self.options)
            .finish()
    }
}

struct LoadedChannel {
    config: ChannelConfig,
    channel: Arc<dyn NotificationChannel>,
}

/// Registry mapping channel keys (e.g. `"broadcast"`) to channel instances
#[derive(Default)]
pub struct ChannelRegistry {
    channels: HashMap<String, LoadedChannel>,
}

impl ChannelRegistry {
    pub fn new() -> Self {
        Self {
            channels: HashMap::new(),
        }
    }

    /// Build a channel from `config` and store it under `key`.
    ///
    /// Loading a key that is already present replaces the previous channel.
    pub fn load(&mut self, key: &str, config: ChannelConfig) -> Arc<dyn NotificationChannel> {
        let channel = (config.factory)(&config.options);
        if self.channels.contains_key(key) {
            tracing::debug!(key, class_name = config.class_name, "replacing notification channel");
        } else {
            tracing::debug!(key, class_name = config.class_name, "notification channel loaded");
        }
        self.channels.insert(
            key.to_string(),
            LoadedChannel {
                config,
                channel: Arc::clone(&channel),
            },
        );
        channel
    }

    pub fn has(&self, key: &str) -> bool {
        self.channels.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<Arc<dyn NotificationChannel>> {
        self.channels.get(key).map(|loaded| Arc::clone(&loaded.channel))
    }

    /// Effective config a channel was loaded with
    pub fn config(&self, key: &str) -> Option<&ChannelConfig> {
        self.channels.get(key).map(|loaded| &loaded.config)
    }

    pub fn unload(&mut self, key: &str) -> bool {
        self.channels.remove(key).is_some()
    }

    /// Keys of all loaded channels
    pub fn loaded(&self) -> Vec<String> {
        self.channels.keys().cloned().collect()
    }
}
