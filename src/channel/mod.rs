//! Notification channels provided by this crate.

mod broadcast;

#[cfg(test)]
mod tests;

pub use broadcast::{
    ANONYMOUS_CHANNEL, BROADCAST, BroadcastChannel, dotted_kind, notifiable_channel_name,
};
