//! Channel descriptors understood by the broadcasting layer.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A broadcast target.
///
/// The wrapped string is the logical channel name. Transports address the
/// channel through [`Channel::broadcast_name`], which carries the visibility
/// prefix (`private-`, `presence-`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "visibility", content = "name", rename_all = "lowercase")]
pub enum Channel {
    /// Anyone may subscribe
    Public(String),
    /// Subscribers must be authorized
    Private(String),
    /// Authorized channel that also tracks who is subscribed
    Presence(String),
}

impl Channel {
    pub fn public(name: impl Into<String>) -> Self {
        Channel::Public(name.into())
    }

    pub fn private(name: impl Into<String>) -> Self {
        Channel::Private(name.into())
    }

    pub fn presence(name: impl Into<String>) -> Self {
        Channel::Presence(name.into())
    }

    /// Logical channel name without any visibility prefix
    pub fn name(&self) -> &str {
        match self {
            Channel::Public(name) | Channel::Private(name) | Channel::Presence(name) => name,
        }
    }

    pub fn is_private(&self) -> bool {
        matches!(self, Channel::Private(_) | Channel::Presence(_))
    }

    /// Name used on the wire
    pub fn broadcast_name(&self) -> String {
        match self {
            Channel::Public(name) => name.clone(),
            Channel::Private(name) => format!("private-{}", name),
            Channel::Presence(name) => format!("presence-{}", name),
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.broadcast_name())
    }
}
