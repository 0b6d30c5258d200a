use indexmap::IndexMap;

use crate::{error::escape_segment, schema::SchemaNode};

/// Prefix of reference keys for entries of `$defs`.
pub const DEFINITIONS_PREFIX: &str = "#/$defs/";

/// Schemas that can be referenced via `$ref`, keyed by reference string.
///
/// A registry is populated while its document is parsed and only read afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Registry {
    definitions: IndexMap<String, SchemaNode>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reference key of the `$defs` entry `name`, e.g. `#/$defs/Pos`.
    #[must_use]
    pub fn definition_key(name: &str) -> String {
        let mut key = String::with_capacity(DEFINITIONS_PREFIX.len() + name.len());
        key.push_str(DEFINITIONS_PREFIX);
        key.push_str(&escape_segment(name));
        key
    }

    /// Register `node` under `key`, replacing any previous entry.
    pub fn insert(&mut self, key: impl Into<String>, node: SchemaNode) -> Option<SchemaNode> {
        self.definitions.insert(key.into(), node)
    }

    pub fn get(&self, key: &str) -> Option<&SchemaNode> {
        self.definitions.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.definitions.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SchemaNode)> {
        self.definitions
            .iter()
            .map(|(key, node)| (key.as_str(), node))
    }
}
