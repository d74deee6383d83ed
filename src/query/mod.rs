//! SPARQL query construction.
//!
//! Queries are assembled from typed clauses ([`clause::Clause`]) grouped into
//! fragments and only turned into text by their `Display` implementations.
//! Identifiers are validated before they reach a clause and literal values are
//! escaped when rendered, so no caller-supplied string is spliced into the
//! query unchecked.

pub mod builder;
pub mod clause;
pub mod condition;
pub mod template;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::EntityError;

pub use builder::{build_bindings, build_filters};
pub use clause::{Clause, Fragment, Term};
pub use condition::{ConditionValue, Conditions};
pub use template::{Projection, SelectQuery};

pub const RDF_NAMESPACE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS_NAMESPACE: &str = "http://www.w3.org/2000/01/rdf-schema#";

/// Variables projected by the enumerate-all query.
pub const SUBJECT_VAR: &str = "_subject";
pub const PREDICATE_VAR: &str = "_predicate";
pub const OBJECT_VAR: &str = "_object";

static IDENTIFIER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("identifier pattern is valid"));

/// Whether `name` can be used both as a SPARQL variable and as a `:`-prefixed local name.
pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER_REGEX.is_match(name)
}

/// Syntax used to alias the typed subject variable as `?_subject`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// `BIND ( ?Type AS ?_subject )`
    #[default]
    Sparql11,
    /// Jena ARQ `LET ( ?_subject := ?Type )`
    Arq,
}

impl FromStr for Dialect {
    type Err = EntityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sparql11" => Ok(Dialect::Sparql11),
            "arq" => Ok(Dialect::Arq),
            other => Err(EntityError::ConfigError(format!("unknown SPARQL dialect: {}", other))),
        }
    }
}
