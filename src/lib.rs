//! Broadcasting notification channel.
//!
//! Delivers notifications over a real-time broadcasting transport:
//! - [`provider::BroadcastChannelProvider`] registers the `"broadcast"` channel
//! - [`channel::BroadcastChannel`] derives target channels, event name and
//!   payload and hands them to the [`broadcasting`] layer
//! - [`plugin::BroadcastingNotificationPlugin`] wires both into a
//!   [`notification::NotificationManager`]
//!
//! # Example
//! ```ignore
//! let settings = ConfigLoader::new()?.load()?;
//! init_logger(settings.logger.clone().into_logger_config()?)?;
//!
//! let plugin =
//!     BroadcastingNotificationPlugin::from_settings(&settings, Arc::new(TableRegistry::new()))
//!         .await?;
//! let mut manager = NotificationManager::new();
//! plugin.bootstrap(&mut manager);
//! manager.discover();
//!
//! manager.send(&user, &notification).await?;
//! ```

pub mod broadcasting;
pub mod channel;
pub mod config;
pub mod logger;
pub mod notification;
pub mod plugin;
pub mod provider;

pub use channel::BroadcastChannel;
pub use plugin::BroadcastingNotificationPlugin;
pub use provider::BroadcastChannelProvider;
