//! Typed SPARQL clauses and their text form.

use oxigraph::model::Literal as RdfLiteral;
use std::fmt;

use crate::query::Dialect;

/// A term in a triple pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// `?name`
    Var(String),
    /// `:name`, resolved against the entity namespace
    Local(String),
    /// `rdf:type`
    RdfType,
    /// Simple string literal, quoted and escaped on output
    Literal(String),
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Var(name) => write!(f, "?{}", name),
            Term::Local(name) => write!(f, ":{}", name),
            Term::RdfType => f.write_str("rdf:type"),
            Term::Literal(value) => write!(f, "{}", RdfLiteral::new_simple_literal(value.as_str())),
        }
    }
}

/// One clause of a `WHERE` block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// Triples sharing a subject: `s p1 o1 ; p2 o2 .`
    Pattern { subject: Term, predicates: Vec<(Term, Term)> },
    /// `OPTIONAL { ... }`
    Optional(Box<Clause>),
    /// `FILTER ( ?var in ("a","b") ) .`
    FilterIn { var: String, values: Vec<String> },
    /// Makes `target` an alias of `source`, spelled according to the dialect.
    Alias { target: String, source: String, dialect: Dialect },
}

impl Clause {
    pub fn triple(subject: Term, predicate: Term, object: Term) -> Self {
        Clause::Pattern { subject, predicates: vec![(predicate, object)] }
    }

    /// `?<type_name> rdf:type :<type_name>`, optionally followed by more predicates.
    pub fn typed_subject(type_name: &str, more: Vec<(Term, Term)>) -> Self {
        let mut predicates = vec![(Term::RdfType, Term::Local(type_name.to_string()))];
        predicates.extend(more);
        Clause::Pattern { subject: Term::Var(type_name.to_string()), predicates }
    }

    /// `OPTIONAL { ?<subject> :<attribute> ?<attribute> . }`
    pub fn optional_binding(subject: &str, attribute: &str) -> Self {
        Clause::Optional(Box::new(Clause::triple(
            Term::Var(subject.to_string()),
            Term::Local(attribute.to_string()),
            Term::Var(attribute.to_string()),
        )))
    }

    pub fn filter_in<S: Into<String>>(var: &str, values: impl IntoIterator<Item = S>) -> Self {
        Clause::FilterIn { var: var.to_string(), values: values.into_iter().map(Into::into).collect() }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Clause::Pattern { subject, predicates } => {
                write!(f, "{}", subject)?;
                for (i, (predicate, object)) in predicates.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ;\n    ")?;
                    } else {
                        f.write_str(" ")?;
                    }
                    write!(f, "{} {}", predicate, object)?;
                }
                f.write_str(" .")
            }
            Clause::Optional(inner) => write!(f, "OPTIONAL {{ {} }}", inner),
            Clause::FilterIn { var, values } => {
                let quoted: Vec<String> =
                    values.iter().map(|v| Term::Literal(v.clone()).to_string()).collect();
                write!(f, "FILTER ( ?{} in ({}) ) .", var, quoted.join(","))
            }
            Clause::Alias { target, source, dialect } => match dialect {
                Dialect::Sparql11 => write!(f, "BIND ( ?{} AS ?{} ) .", source, target),
                Dialect::Arq => write!(f, "LET ( ?{} := ?{} ) .", target, source),
            },
        }
    }
}

/// Ordered run of clauses, rendered one per line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    clauses: Vec<Clause>,
}

impl Fragment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    pub fn append(&mut self, other: Fragment) {
        self.clauses.extend(other.clauses);
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

impl From<Vec<Clause>> for Fragment {
    fn from(clauses: Vec<Clause>) -> Self {
        Fragment { clauses }
    }
}

impl IntoIterator for Fragment {
    type Item = Clause;
    type IntoIter = std::vec::IntoIter<Clause>;

    fn into_iter(self) -> Self::IntoIter {
        self.clauses.into_iter()
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{}", clause)?;
        }
        Ok(())
    }
}
