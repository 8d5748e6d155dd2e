//! Primary-key lookup for entity sources.

use std::collections::HashMap;

use crate::notification::{NotificationError, NotificationResult};

/// Resolves the declared primary key columns of a data source.
pub trait SchemaLocator: Send + Sync {
    /// Primary key columns for `source`, in declaration order
    fn primary_key(&self, source: &str) -> NotificationResult<Vec<String>>;
}

/// In-memory table registry.
///
/// Sources registered with [`TableRegistry::with_table`] report their declared
/// key. Unknown sources fall back to the default key (`id`) unless the registry
/// was built with [`TableRegistry::strict`].
#[derive(Debug, Clone)]
pub struct TableRegistry {
    tables: HashMap<String, Vec<String>>,
    default_key: Option<String>,
}

impl TableRegistry {
    pub const DEFAULT_PRIMARY_KEY: &'static str = "id";

    pub fn new() -> Self {
        Self {
            tables: HashMap::new(),
            default_key: Some(Self::DEFAULT_PRIMARY_KEY.to_string()),
        }
    }

    /// Registry that rejects sources it does not know
    pub fn strict() -> Self {
        Self {
            tables: HashMap::new(),
            default_key: None,
        }
    }

    pub fn with_table<I, S>(mut self, source: impl Into<String>, primary_key: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tables.insert(
            source.into(),
            primary_key.into_iter().map(Into::into).collect(),
        );
        self
    }

    pub fn has(&self, source: &str) -> bool {
        self.tables.contains_key(source)
    }
}

impl Default for TableRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaLocator for TableRegistry {
    fn primary_key(&self, source: &str) -> NotificationResult<Vec<String>> {
        if let Some(key) = self.tables.get(source) {
            return Ok(key.clone());
        }
        self.default_key
            .as_ref()
            .map(|key| vec![key.clone()])
            .ok_or_else(|| NotificationError::UnknownTable(source.to_string()))
    }
}
