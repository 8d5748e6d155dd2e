//! Channel providers shipped with this crate.

mod broadcast;

pub use broadcast::BroadcastChannelProvider;
