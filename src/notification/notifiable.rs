//! Notification recipients.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::notification::Notification;

/// An identity-bearing record that can receive notifications.
pub trait Entity: Send + Sync {
    /// Fully qualified kind name, `::`-separated
    fn kind(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Name of the backing data source (table)
    fn source(&self) -> &str;

    /// Field lookup
    fn get(&self, field: &str) -> Option<Value>;

    /// Explicit broadcast channel for this record, bypassing the
    /// `{kind}.{primary key}` naming scheme
    fn receives_broadcast_notifications_on(&self) -> Option<String> {
        None
    }
}

/// Schemaless entity backed by a JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    kind: Option<String>,
    source: String,
    fields: Map<String, Value>,
}

impl Record {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            kind: None,
            source: source.into(),
            fields: Map::new(),
        }
    }

    pub fn from_fields(source: impl Into<String>, fields: Map<String, Value>) -> Self {
        Self {
            kind: None,
            source: source.into(),
            fields,
        }
    }

    /// Report `kind` instead of the Rust type name
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

impl Entity for Record {
    fn kind(&self) -> &str {
        self.kind
            .as_deref()
            .unwrap_or_else(|| std::any::type_name::<Self>())
    }

    fn source(&self) -> &str {
        &self.source
    }

    fn get(&self, field: &str) -> Option<Value> {
        self.fields.get(field).cloned()
    }
}

/// Recipient without a backing record, addressed purely by per-channel routes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnonymousNotifiable {
    routes: HashMap<String, String>,
}

impl AnonymousNotifiable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route for `channel`
    pub fn route(mut self, channel: impl Into<String>, route: impl Into<String>) -> Self {
        self.routes.insert(channel.into(), route.into());
        self
    }

    pub fn route_notification_for(
        &self,
        channel: &str,
        _notification: Option<&dyn Notification>,
    ) -> Option<String> {
        self.routes.get(channel).cloned()
    }

    pub fn routes(&self) -> &HashMap<String, String> {
        &self.routes
    }
}

/// Anyone a notification can be sent to.
#[derive(Clone)]
pub enum Notifiable {
    Entity(Arc<dyn Entity>),
    Anonymous(AnonymousNotifiable),
}

impl Notifiable {
    pub fn entity(entity: impl Entity + 'static) -> Self {
        Notifiable::Entity(Arc::new(entity))
    }

    /// Field lookup; anonymous recipients have no fields
    pub fn get(&self, field: &str) -> Option<Value> {
        match self {
            Notifiable::Entity(entity) => entity.get(field),
            Notifiable::Anonymous(_) => None,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        matches!(self, Notifiable::Anonymous(_))
    }
}

impl From<AnonymousNotifiable> for Notifiable {
    fn from(anonymous: AnonymousNotifiable) -> Self {
        Notifiable::Anonymous(anonymous)
    }
}

impl From<Record> for Notifiable {
    fn from(record: Record) -> Self {
        Notifiable::entity(record)
    }
}

impl fmt::Debug for Notifiable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notifiable::Entity(entity) => f
                .debug_struct("Entity")
                .field("kind", &entity.kind())
                .field("source", &entity.source())
                .finish(),
            Notifiable::Anonymous(anonymous) => f.debug_tuple("Anonymous").field(anonymous).finish(),
        }
    }
}
