//! Oxigraph-backed connection.
//!
//! Runs queries against an embedded Oxigraph store, either a fresh in-memory
//! one or a store handed in by the caller.
//!
//! # Example
//!
//! ```
//! use rdf_entity::connection::{Connection, OxigraphConnection};
//!
//! let connection = OxigraphConnection::from_turtle(r#"
//!     @prefix : <http://example.org/> .
//!     :alice a :Person ; :name "Alice" .
//! "#).unwrap();
//!
//! let rows = connection
//!     .fetch("PREFIX : <http://example.org/> SELECT ?name WHERE { ?p :name ?name }")
//!     .unwrap();
//! assert_eq!(rows[0]["name"], "Alice");
//! ```

use oxigraph::io::RdfFormat;
use oxigraph::model::Term;
use oxigraph::sparql::{QueryResults, SparqlEvaluator};
use oxigraph::store::Store;

use crate::connection::{Connection, Row};
use crate::error::ConnectionError;

#[derive(Clone)]
pub struct OxigraphConnection {
    store: Store,
}

impl OxigraphConnection {
    /// Connection over a new, empty in-memory store.
    pub fn new() -> Result<Self, ConnectionError> {
        Ok(Self { store: Store::new()? })
    }

    pub fn with_store(store: Store) -> Self {
        Self { store }
    }

    /// In-memory store preloaded with Turtle data.
    pub fn from_turtle(data: &str) -> Result<Self, ConnectionError> {
        let connection = Self::new()?;
        connection.load_turtle(data)?;
        Ok(connection)
    }

    pub fn load_turtle(&self, data: &str) -> Result<(), ConnectionError> {
        self.store.load_from_reader(RdfFormat::Turtle, data.as_bytes())?;
        Ok(())
    }

    pub fn store(&self) -> &Store {
        &self.store
    }
}

impl Connection for OxigraphConnection {
    fn fetch(&self, query: &str) -> Result<Vec<Row>, ConnectionError> {
        let evaluator = SparqlEvaluator::new();
        let parsed_query =
            evaluator.parse_query(query).map_err(|e| ConnectionError::Query(e.to_string()))?;
        let results = parsed_query.on_store(&self.store).execute()?;

        let mut rows = Vec::new();

        // ASK and CONSTRUCT results carry no rows
        if let QueryResults::Solutions(solutions) = results {
            for solution in solutions {
                let solution = solution?;
                let mut row = Row::new();
                for (var, term) in solution.iter() {
                    row.insert(var.as_str().to_string(), term_value(term));
                }
                rows.push(row);
            }
        }

        tracing::debug!(rows = rows.len(), "oxigraph query returned");
        Ok(rows)
    }
}

/// Plain string form of a term: bare IRI, lexical literal value, or `_:id`.
pub fn term_value(term: &Term) -> String {
    match term {
        Term::NamedNode(node) => node.as_str().to_string(),
        Term::BlankNode(node) => format!("_:{}", node.as_str()),
        Term::Literal(literal) => literal.value().to_string(),
        #[allow(unreachable_patterns)]
        _ => term.to_string(),
    }
}
