//! Per-type metadata: type name, namespace and the discovered column cache.

use once_cell::sync::OnceCell;
use std::fmt;
use std::sync::Arc;

use crate::error::{EntityError, Result};
use crate::query::is_identifier;

const FORBIDDEN_IRI_CHARS: &[char] = &['<', '>', '"', '{', '}', '|', '^', '`', '\\'];

/// Normalized namespace IRI under which an entity type's predicates live.
///
/// The stored form always ends in `/` or `#`, so qualifying an attribute is a
/// plain concatenation and `ns` and `ns/` address the same predicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace {
    prefix: Arc<str>,
}

impl Namespace {
    pub fn new(iri: impl AsRef<str>) -> Result<Self> {
        let iri = iri.as_ref().trim();
        if iri.is_empty() {
            return Err(EntityError::ConfigError("namespace must not be empty".to_string()));
        }
        if iri.chars().any(|c| c.is_whitespace() || FORBIDDEN_IRI_CHARS.contains(&c)) {
            return Err(EntityError::ConfigError(format!(
                "namespace {:?} is not a valid IRI prefix",
                iri
            )));
        }

        let prefix = if iri.ends_with('/') || iri.ends_with('#') {
            iri.to_string()
        } else {
            format!("{}/", iri)
        };
        Ok(Namespace { prefix: prefix.into() })
    }

    /// The IRI bound to the `:` prefix in generated queries.
    pub fn as_str(&self) -> &str {
        &self.prefix
    }

    /// Fully qualified predicate for a bare attribute name.
    pub fn qualify(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }

    /// Bare attribute name of a predicate inside this namespace.
    pub fn strip<'a>(&self, iri: &'a str) -> Option<&'a str> {
        iri.strip_prefix(self.as_str())
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.prefix)
    }
}

/// Static configuration of one entity kind.
///
/// Built once at startup and shared through `Arc` with every finder that
/// queries this kind. The column list is discovered on first use and kept
/// for the lifetime of the value.
#[derive(Debug)]
pub struct EntityType {
    type_name: String,
    namespace: Option<Namespace>,
    columns: OnceCell<Vec<String>>,
}

impl EntityType {
    pub fn new(type_name: impl Into<String>) -> Result<Self> {
        let type_name = type_name.into();
        if !is_identifier(&type_name) {
            return Err(EntityError::ConfigError(format!(
                "type name {:?} is not a valid SPARQL identifier",
                type_name
            )));
        }
        Ok(EntityType { type_name, namespace: None, columns: OnceCell::new() })
    }

    /// Entity type named after the Rust type `T`, without its module path.
    ///
    /// ```
    /// use rdf_entity::EntityType;
    ///
    /// struct Job;
    /// let job = EntityType::of::<Job>().unwrap();
    /// assert_eq!(job.type_name(), "Job");
    /// ```
    pub fn of<T: ?Sized>() -> Result<Self> {
        Self::new(short_type_name(std::any::type_name::<T>()))
    }

    pub fn with_namespace(mut self, namespace: impl AsRef<str>) -> Result<Self> {
        self.namespace = Some(Namespace::new(namespace)?);
        Ok(self)
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Namespace of this type; an unset namespace is reported here, at first use.
    pub fn namespace(&self) -> Result<&Namespace> {
        self.namespace.as_ref().ok_or_else(|| {
            EntityError::ConfigError(format!("namespace is not set for entity type {}", self.type_name))
        })
    }

    pub fn has_namespace(&self) -> bool {
        self.namespace.is_some()
    }

    /// Columns discovered so far, without querying the store.
    pub fn cached_columns(&self) -> Option<&[String]> {
        self.columns.get().map(Vec::as_slice)
    }

    pub(crate) fn columns_or_try_init<F>(&self, discover: F) -> Result<&[String]>
    where
        F: FnOnce() -> Result<Vec<String>>,
    {
        self.columns.get_or_try_init(discover).map(Vec::as_slice)
    }
}

fn short_type_name(full: &str) -> &str {
    let base = full.split('<').next().unwrap_or(full);
    base.rsplit("::").next().unwrap_or(base)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Job;

    #[test]
    fn test_namespace_normalization() {
        assert_eq!(Namespace::new("ns").unwrap().as_str(), "ns/");
        assert_eq!(Namespace::new("http://x/").unwrap().as_str(), "http://x/");
        assert_eq!(Namespace::new("http://x/vocab#").unwrap().as_str(), "http://x/vocab#");
        assert_eq!(Namespace::new("http://x/").unwrap().qualify("status"), "http://x/status");
        assert_eq!(Namespace::new("ns").unwrap().qualify("a"), "ns/a");
    }

    #[test]
    fn test_namespace_rejects_invalid_iri() {
        assert!(Namespace::new("").is_err());
        assert!(Namespace::new("   ").is_err());
        assert!(Namespace::new("http://x/> . DROP").is_err());
        assert!(Namespace::new("http://x y/").is_err());
    }

    #[test]
    fn test_namespace_strip() {
        let ns = Namespace::new("http://x").unwrap();
        assert_eq!(ns.strip("http://x/status"), Some("status"));
        assert_eq!(ns.strip("http://www.w3.org/1999/02/22-rdf-syntax-ns#type"), None);
    }

    #[test]
    fn test_type_name_defaults_to_rust_type() {
        let job = EntityType::of::<Job>().unwrap();
        assert_eq!(job.type_name(), "Job");
        assert_eq!(short_type_name("app::models::Wrapper<app::Job>"), "Wrapper");
    }

    #[test]
    fn test_invalid_type_name() {
        assert!(matches!(EntityType::new("Bad Type"), Err(EntityError::ConfigError(_))));
        assert!(matches!(EntityType::new(""), Err(EntityError::ConfigError(_))));
    }

    #[test]
    fn test_missing_namespace_is_config_error_at_use() {
        let job = EntityType::new("Job").unwrap();
        assert!(!job.has_namespace());
        let err = job.namespace().unwrap_err();
        assert!(matches!(err, EntityError::ConfigError(_)));
        assert!(err.to_string().contains("Job"));
    }

    #[test]
    fn test_column_cache_initializes_once() {
        let job = EntityType::new("Job").unwrap().with_namespace("http://x/").unwrap();
        assert!(job.cached_columns().is_none());

        let first = job.columns_or_try_init(|| Ok(vec!["status".to_string()])).unwrap().to_vec();
        let second = job
            .columns_or_try_init(|| panic!("discovery must not run twice"))
            .unwrap()
            .to_vec();
        assert_eq!(first, second);
        assert_eq!(job.cached_columns(), Some(&["status".to_string()][..]));
    }

    #[test]
    fn test_failed_discovery_is_not_cached() {
        let job = EntityType::new("Job").unwrap();
        let err = job.columns_or_try_init(|| Err(EntityError::ResultError("boom".to_string())));
        assert!(err.is_err());
        assert!(job.cached_columns().is_none());
    }
}
