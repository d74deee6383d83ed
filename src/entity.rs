//! Entities materialized from the triple store.

use serde::Serialize;
use std::cmp::Ordering;

use crate::connection::Attributes;
use crate::error::{EntityError, Result};
use crate::registry::Namespace;

/// One subject of the store together with the triples returned for it.
///
/// Attributes are keyed by fully qualified predicate; the accessors take bare
/// names and qualify them with the entity's namespace.
///
/// Equality and ordering compare the attribute maps only. Two entities with
/// the same attributes are equal even when their ids differ.
#[derive(Debug, Clone, Serialize)]
pub struct Entity {
    id: String,
    #[serde(skip)]
    namespace: Namespace,
    attributes: Attributes,
}

impl Entity {
    pub fn new(id: impl Into<String>, namespace: Namespace, attributes: Attributes) -> Self {
        Entity { id: id.into(), namespace, attributes }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Lenient lookup: `None` when the store returned no such triple.
    pub fn try_get(&self, name: &str) -> Option<&str> {
        self.attributes.get(&self.namespace.qualify(name)).map(String::as_str)
    }

    /// Strict lookup: a missing attribute is an [`EntityError::UnknownAttribute`].
    ///
    /// A present but empty value is returned as `Ok("")`.
    pub fn get(&self, name: &str) -> Result<&str> {
        self.try_get(name).ok_or_else(|| EntityError::UnknownAttribute {
            id: self.id.clone(),
            name: name.to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.try_get(name).is_some()
    }

    /// Bare names of the attributes under this entity's namespace.
    pub fn attribute_names(&self) -> Vec<&str> {
        self.attributes.keys().filter_map(|key| self.namespace.strip(key)).collect()
    }
}

impl PartialEq for Entity {
    fn eq(&self, other: &Self) -> bool {
        self.attributes == other.attributes
    }
}

impl Eq for Entity {}

impl PartialOrd for Entity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Entity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.attributes.cmp(&other.attributes)
    }
}
