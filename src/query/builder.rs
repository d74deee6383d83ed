//! Binding and filter fragments shared by every query template.

use crate::error::{EntityError, Result};
use crate::query::clause::{Clause, Fragment};
use crate::query::condition::Conditions;
use crate::query::template::{ANY_VAR, COLUMN_VAR, COUNT_VAR};
use crate::query::{is_identifier, OBJECT_VAR, PREDICATE_VAR, SUBJECT_VAR};

/// Variables bound by the templates themselves. An attribute of the same name
/// would join against them instead of against the store.
const RESERVED_NAMES: &[&str] =
    &[SUBJECT_VAR, PREDICATE_VAR, OBJECT_VAR, ANY_VAR, COUNT_VAR, COLUMN_VAR];

fn ensure_attribute(type_name: &str, name: &str) -> Result<()> {
    if is_identifier(name) && name != type_name && !RESERVED_NAMES.contains(&name) {
        Ok(())
    } else {
        Err(EntityError::InvalidAttribute(name.to_string()))
    }
}

/// One `OPTIONAL { ?<type> :<attr> ?<attr> . }` per attribute, in input order.
///
/// Names must be identifiers and may not shadow the type variable or any
/// variable the templates bind.
pub fn build_bindings<S: AsRef<str>>(type_name: &str, attributes: &[S]) -> Result<Fragment> {
    let mut fragment = Fragment::new();
    for attribute in attributes {
        let attribute = attribute.as_ref();
        ensure_attribute(type_name, attribute)?;
        fragment.push(Clause::optional_binding(type_name, attribute));
    }
    Ok(fragment)
}

/// Bindings for every non-blank condition followed by one `FILTER ... in (...)` each.
///
/// Blank conditions are dropped first; if none remain the fragment is empty.
pub fn build_filters(type_name: &str, conditions: &Conditions) -> Result<Fragment> {
    let present: Vec<(&str, Vec<&str>)> = conditions.present().collect();

    let names: Vec<&str> = present.iter().map(|(name, _)| *name).collect();
    let mut fragment = build_bindings(type_name, &names)?;
    for (name, values) in present {
        fragment.push(Clause::filter_in(name, values));
    }
    Ok(fragment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::condition::ConditionValue;

    #[test]
    fn test_build_bindings_in_order() {
        let fragment = build_bindings("Job", &["status", "owner", "name"]).unwrap();
        assert_eq!(fragment.len(), 3);
        assert_eq!(
            fragment.to_string(),
            "OPTIONAL { ?Job :status ?status . }\n\
             OPTIONAL { ?Job :owner ?owner . }\n\
             OPTIONAL { ?Job :name ?name . }"
        );
    }

    #[test]
    fn test_build_bindings_empty() {
        let fragment = build_bindings::<&str>("Job", &[]).unwrap();
        assert!(fragment.is_empty());
        assert_eq!(fragment.to_string(), "");
    }

    #[test]
    fn test_build_bindings_rejects_invalid_names() {
        for bad in ["a b", "x\"", "}", "?x", ""] {
            let err = build_bindings("Job", &[bad]).unwrap_err();
            assert!(matches!(err, EntityError::InvalidAttribute(_)), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_build_bindings_rejects_template_variables() {
        for reserved in ["_subject", "_predicate", "_object", "_", "count", "column", "Job"] {
            let err = build_bindings("Job", &[reserved]).unwrap_err();
            assert!(
                matches!(err, EntityError::InvalidAttribute(ref name) if name == reserved),
                "accepted {:?}",
                reserved
            );
        }
        // Another type's name is an ordinary attribute
        assert!(build_bindings("Job", &["Task", "uuid"]).is_ok());
    }

    #[test]
    fn test_build_filters_rejects_template_variables() {
        let conditions = Conditions::new().with("_object", "a");
        assert!(matches!(
            build_filters("Job", &conditions),
            Err(EntityError::InvalidAttribute(_))
        ));
    }

    #[test]
    fn test_build_filters_multi_value() {
        let conditions = Conditions::new().with("status", ["active", "pending"]);
        let text = build_filters("Job", &conditions).unwrap().to_string();
        assert_eq!(
            text,
            "OPTIONAL { ?Job :status ?status . }\n\
             FILTER ( ?status in (\"active\",\"pending\") ) ."
        );
    }

    #[test]
    fn test_build_filters_single_value_is_one_element_list() {
        let conditions = Conditions::new().with("owner", "alice");
        let text = build_filters("Job", &conditions).unwrap().to_string();
        assert!(text.contains("FILTER ( ?owner in (\"alice\") ) ."));
    }

    #[test]
    fn test_build_filters_bindings_precede_filters() {
        let conditions = Conditions::new().with("b", "2").with("a", "1");
        let fragment = build_filters("Job", &conditions).unwrap();
        let lines: Vec<String> = fragment.clauses().iter().map(|c| c.to_string()).collect();
        assert_eq!(
            lines,
            vec![
                "OPTIONAL { ?Job :b ?b . }",
                "OPTIONAL { ?Job :a ?a . }",
                "FILTER ( ?b in (\"2\") ) .",
                "FILTER ( ?a in (\"1\") ) .",
            ]
        );
    }

    #[test]
    fn test_build_filters_drops_blank_conditions() {
        let conditions = Conditions::new()
            .with("status", "active")
            .with("owner", "   ")
            .with("tag", ConditionValue::Absent)
            .with("kind", Vec::<String>::new());
        let text = build_filters("Job", &conditions).unwrap().to_string();
        assert!(text.contains("?status"));
        assert!(!text.contains("owner"));
        assert!(!text.contains("tag"));
        assert!(!text.contains("kind"));
    }

    #[test]
    fn test_build_filters_empty_conditions() {
        let fragment = build_filters("Job", &Conditions::new()).unwrap();
        assert!(fragment.is_empty());
        assert!(!fragment.to_string().contains("FILTER"));

        let only_blank = Conditions::new().with("status", "");
        assert!(build_filters("Job", &only_blank).unwrap().is_empty());
    }

    #[test]
    fn test_build_filters_blank_condition_name_not_validated() {
        // A blank condition never reaches the builder, whatever its name.
        let conditions = Conditions::new().with("not valid", "");
        assert!(build_filters("Job", &conditions).unwrap().is_empty());
    }
}
