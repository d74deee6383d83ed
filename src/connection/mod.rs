//! Connections execute rendered SPARQL and hand back plain string rows.

pub mod http_adapter;
pub mod oxigraph_adapter;

use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::error::ConnectionError;
use crate::query::{OBJECT_VAR, PREDICATE_VAR, SUBJECT_VAR};

pub use http_adapter::HttpConnection;
pub use oxigraph_adapter::OxigraphConnection;

/// One solution: projected variable name to value. Unbound variables are absent.
pub type Row = HashMap<String, String>;

/// Fully qualified predicate to value, for one subject.
pub type Attributes = BTreeMap<String, String>;

/// All triples returned for a single subject.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectGroup {
    pub id: String,
    pub attributes: Attributes,
}

impl SubjectGroup {
    pub fn new(id: impl Into<String>, attributes: Attributes) -> Self {
        SubjectGroup { id: id.into(), attributes }
    }
}

/// A blocking handle on a triple store.
///
/// Each call is a single round trip; implementations must not retry.
pub trait Connection {
    fn fetch(&self, query: &str) -> Result<Vec<Row>, ConnectionError>;

    /// Run an enumerate-all query and group its `?_subject ?_predicate ?_object`
    /// rows by subject, in order of first appearance.
    fn fetch_subjects(&self, query: &str) -> Result<Vec<SubjectGroup>, ConnectionError> {
        let rows = self.fetch(query)?;
        Ok(group_by_subject(rows))
    }
}

impl<C: Connection + ?Sized> Connection for &C {
    fn fetch(&self, query: &str) -> Result<Vec<Row>, ConnectionError> {
        (**self).fetch(query)
    }

    fn fetch_subjects(&self, query: &str) -> Result<Vec<SubjectGroup>, ConnectionError> {
        (**self).fetch_subjects(query)
    }
}

impl<C: Connection + ?Sized> Connection for Arc<C> {
    fn fetch(&self, query: &str) -> Result<Vec<Row>, ConnectionError> {
        (**self).fetch(query)
    }

    fn fetch_subjects(&self, query: &str) -> Result<Vec<SubjectGroup>, ConnectionError> {
        (**self).fetch_subjects(query)
    }
}

/// Group flat subject/predicate/object rows by subject.
///
/// Rows missing one of the three variables are skipped. A predicate seen twice
/// for the same subject keeps the last value.
pub fn group_by_subject(rows: impl IntoIterator<Item = Row>) -> Vec<SubjectGroup> {
    let mut groups: IndexMap<String, Attributes> = IndexMap::new();
    for mut row in rows {
        let (Some(subject), Some(predicate), Some(object)) =
            (row.remove(SUBJECT_VAR), row.remove(PREDICATE_VAR), row.remove(OBJECT_VAR))
        else {
            continue;
        };
        groups.entry(subject).or_default().insert(predicate, object);
    }

    groups.into_iter().map(|(id, attributes)| SubjectGroup { id, attributes }).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triple(s: &str, p: &str, o: &str) -> Row {
        let mut row = Row::new();
        row.insert(SUBJECT_VAR.to_string(), s.to_string());
        row.insert(PREDICATE_VAR.to_string(), p.to_string());
        row.insert(OBJECT_VAR.to_string(), o.to_string());
        row
    }

    #[test]
    fn test_group_by_subject_preserves_first_appearance() {
        let rows = vec![
            triple("s2", "ns/a", "3"),
            triple("s1", "ns/a", "1"),
            triple("s2", "ns/b", "4"),
            triple("s1", "ns/b", "2"),
        ];
        let groups = group_by_subject(rows);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].id, "s2");
        assert_eq!(groups[1].id, "s1");
        assert_eq!(groups[1].attributes.get("ns/b").map(String::as_str), Some("2"));
    }

    #[test]
    fn test_group_by_subject_skips_incomplete_rows() {
        let mut partial = Row::new();
        partial.insert(SUBJECT_VAR.to_string(), "s1".to_string());
        let groups = group_by_subject(vec![partial, triple("s2", "ns/a", "1")]);
        assert_eq!(groups, vec![SubjectGroup::new("s2", [("ns/a".to_string(), "1".to_string())].into())]);
    }

    #[test]
    fn test_group_by_subject_last_value_wins() {
        let groups = group_by_subject(vec![triple("s1", "ns/a", "1"), triple("s1", "ns/a", "2")]);
        assert_eq!(groups[0].attributes.get("ns/a").map(String::as_str), Some("2"));
    }
}
