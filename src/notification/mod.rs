//! Notification framework contracts.
//!
//! The pieces a delivery channel plugs into:
//! - [`Notification`] with optional broadcast capabilities
//! - [`Notifiable`] recipients (records or anonymous routes)
//! - [`NotificationChannel`] implementations stored in a [`ChannelRegistry`]
//! - [`ChannelProvider`]s that populate the registry at startup
//! - [`NotificationManager`], the dispatch loop

mod channel;
mod error;
mod manager;
mod notifiable;
#[allow(clippy::module_inception)]
mod notification;
mod provider;
mod registry;
mod schema;

pub use channel::NotificationChannel;
pub use error::{NotificationError, NotificationResult};
pub use manager::NotificationManager;
pub use notifiable::{AnonymousNotifiable, Entity, Notifiable, Record};
pub use notification::Notification;
pub use provider::ChannelProvider;
pub use registry::{ChannelConfig, ChannelRegistry};
pub use schema::{SchemaLocator, TableRegistry};
