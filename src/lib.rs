//! # rdf-entity
//!
//! Dynamic entity mapping over RDF triple stores.
//!
//! Records are typed *entities* whose attributes are not declared up front:
//! they are discovered and queried against the store at runtime. An
//! [`EntityType`] names the `rdf:type` and the namespace its predicates live
//! in; a [`Finder`] renders SPARQL for it, runs the query through a
//! [`Connection`] and turns the rows back into [`Entity`] values.
//!
//! ## Features
//!
//! - Typed SPARQL clauses with validated identifiers and escaped literals
//! - `all`, `select`, `count` and `columns` finders per entity type
//! - Per-type column discovery, cached after the first query
//! - Embedded Oxigraph and HTTP SPARQL endpoint connections
//!
//! ## Example
//!
//! ```rust
//! use rdf_entity::{Conditions, EntityType, Finder, OxigraphConnection, Result};
//! use std::sync::Arc;
//!
//! fn example() -> Result<()> {
//!     let connection = OxigraphConnection::from_turtle(
//!         "@prefix : <http://x/> . :j1 a :Job ; :uuid \"1\" ; :status \"active\" .",
//!     )?;
//!     let job = Arc::new(EntityType::new("Job")?.with_namespace("http://x/")?);
//!     let jobs = Finder::new(connection, job);
//!
//!     for entity in jobs.all(&Conditions::new())? {
//!         println!("{} is {}", entity.id(), entity.get("status")?);
//!     }
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::new_without_default)]

/// Store selection and environment configuration
pub mod config;

/// Connections that execute SPARQL against a store
pub mod connection;

/// Entities materialized from query results
pub mod entity;

pub mod error;

/// Type-level finders
pub mod finder;

pub mod materializer;

/// SPARQL query construction
pub mod query;

/// Entity type metadata and registry
pub mod registry;

// Re-export commonly used types
pub use config::StoreConfig;
pub use connection::{Connection, HttpConnection, OxigraphConnection, Row, SubjectGroup};
pub use entity::Entity;
pub use error::{ConnectionError, EntityError, Result};
pub use finder::Finder;
pub use query::{ConditionValue, Conditions, Dialect};
pub use registry::{EntityType, Namespace, TypeRegistry};
