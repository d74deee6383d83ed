//! The four query shapes used by the finders.
//!
//! Every template binds `:` to the entity namespace and requires the subject
//! variable `?<type_name>` to carry `rdf:type :<type_name>`.

use std::fmt;

use crate::error::{EntityError, Result};
use crate::query::builder::{build_bindings, build_filters};
use crate::query::clause::{Clause, Fragment, Term};
use crate::query::condition::Conditions;
use crate::query::{
    is_identifier, Dialect, OBJECT_VAR, PREDICATE_VAR, RDFS_NAMESPACE, RDF_NAMESPACE, SUBJECT_VAR,
};
use crate::registry::Namespace;

/// Variable counted by [`count`] and the name of its projected result.
pub const UUID_VAR: &str = "uuid";
pub const COUNT_VAR: &str = "count";
/// Variable projected by [`columns`].
pub const COLUMN_VAR: &str = "column";
/// Object placeholder in [`columns`].
pub const ANY_VAR: &str = "_";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    /// `SELECT DISTINCT ?a ?b ...`
    Distinct(Vec<String>),
    /// `SELECT (count(distinct ?var) as ?alias)`
    CountDistinct { var: String, alias: String },
}

impl fmt::Display for Projection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Projection::Distinct(vars) => {
                let vars: Vec<String> = vars.iter().map(|v| format!("?{}", v)).collect();
                write!(f, "SELECT DISTINCT {}", vars.join(" "))
            }
            Projection::CountDistinct { var, alias } => {
                write!(f, "SELECT (count(distinct ?{}) as ?{})", var, alias)
            }
        }
    }
}

/// A complete SELECT query; rendered with `to_string()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    namespace: Namespace,
    projection: Projection,
    body: Fragment,
}

impl SelectQuery {
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn body(&self) -> &Fragment {
        &self.body
    }
}

impl fmt::Display for SelectQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "PREFIX : <{}>", self.namespace)?;
        writeln!(f, "PREFIX rdf: <{}>", RDF_NAMESPACE)?;
        writeln!(f, "PREFIX rdfs: <{}>", RDFS_NAMESPACE)?;
        writeln!(f)?;
        writeln!(f, "{}", self.projection)?;
        writeln!(f, "WHERE {{")?;
        for clause in self.body.clauses() {
            for line in clause.to_string().lines() {
                writeln!(f, "  {}", line)?;
            }
        }
        writeln!(f, "}}")
    }
}

fn ensure_type_name(type_name: &str) -> Result<()> {
    if is_identifier(type_name) {
        Ok(())
    } else {
        Err(EntityError::ConfigError(format!(
            "type name {:?} is not a valid SPARQL identifier",
            type_name
        )))
    }
}

/// Every subject of the type with all of its triples, as `?_subject ?_predicate ?_object`.
pub fn enumerate_all(
    type_name: &str,
    namespace: &Namespace,
    conditions: &Conditions,
    dialect: Dialect,
) -> Result<SelectQuery> {
    ensure_type_name(type_name)?;

    let mut body = Fragment::new();
    body.push(Clause::typed_subject(type_name, Vec::new()));
    body.append(build_filters(type_name, conditions)?);
    body.push(Clause::Alias {
        target: SUBJECT_VAR.to_string(),
        source: type_name.to_string(),
        dialect,
    });
    body.push(Clause::triple(
        Term::Var(SUBJECT_VAR.to_string()),
        Term::Var(PREDICATE_VAR.to_string()),
        Term::Var(OBJECT_VAR.to_string()),
    ));

    Ok(SelectQuery {
        namespace: namespace.clone(),
        projection: Projection::Distinct(vec![
            SUBJECT_VAR.to_string(),
            PREDICATE_VAR.to_string(),
            OBJECT_VAR.to_string(),
        ]),
        body,
    })
}

/// One column per requested attribute, narrowed by `conditions`.
pub fn select<S: AsRef<str>>(
    type_name: &str,
    namespace: &Namespace,
    attributes: &[S],
    conditions: &Conditions,
) -> Result<SelectQuery> {
    ensure_type_name(type_name)?;
    if attributes.is_empty() {
        return Err(EntityError::EmptyProjection);
    }

    let mut body = Fragment::new();
    body.push(Clause::typed_subject(type_name, Vec::new()));
    body.append(build_bindings(type_name, attributes)?);
    body.append(build_filters(type_name, conditions)?);

    Ok(SelectQuery {
        namespace: namespace.clone(),
        projection: Projection::Distinct(
            attributes.iter().map(|a| a.as_ref().to_string()).collect(),
        ),
        body,
    })
}

/// Number of distinct `:uuid` values among matching subjects.
pub fn count(type_name: &str, namespace: &Namespace, conditions: &Conditions) -> Result<SelectQuery> {
    ensure_type_name(type_name)?;

    let mut body = Fragment::new();
    body.push(Clause::typed_subject(
        type_name,
        vec![(Term::Local(UUID_VAR.to_string()), Term::Var(UUID_VAR.to_string()))],
    ));
    body.append(build_filters(type_name, conditions)?);

    Ok(SelectQuery {
        namespace: namespace.clone(),
        projection: Projection::CountDistinct {
            var: UUID_VAR.to_string(),
            alias: COUNT_VAR.to_string(),
        },
        body,
    })
}

/// Every predicate used by at least one instance of the type.
pub fn columns(type_name: &str, namespace: &Namespace) -> Result<SelectQuery> {
    ensure_type_name(type_name)?;

    let body = Fragment::from(vec![Clause::typed_subject(
        type_name,
        vec![(Term::Var(COLUMN_VAR.to_string()), Term::Var(ANY_VAR.to_string()))],
    )]);

    Ok(SelectQuery {
        namespace: namespace.clone(),
        projection: Projection::Distinct(vec![COLUMN_VAR.to_string()]),
        body,
    })
}
