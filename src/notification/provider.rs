//! Channel provider trait.

use serde_json::{Map, Value};

use crate::notification::ChannelRegistry;

/// Contributes one or more channels to a [`ChannelRegistry`].
///
/// Providers are run once at startup by
/// [`NotificationManager::discover`](crate::notification::NotificationManager::discover).
pub trait ChannelProvider: Send + Sync {
    /// Channel keys this provider registers
    fn provides(&self) -> Vec<&'static str>;

    /// Load the provided channels into `registry`
    fn register(&self, registry: &mut ChannelRegistry);

    /// Options applied before any configured override
    fn default_config(&self) -> Map<String, Value> {
        Map::new()
    }
}
