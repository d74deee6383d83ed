//! Type-level finders: `all`, `select`, `count` and `columns`.
//!
//! A [`Finder`] binds one [`EntityType`] to one [`Connection`]. Every call
//! renders a query, runs it as a single round trip and interprets the rows.
//! Connection errors are returned unchanged.
//!
//! # Example
//!
//! ```
//! use rdf_entity::{Conditions, EntityType, Finder, OxigraphConnection};
//! use std::sync::Arc;
//!
//! let connection = OxigraphConnection::from_turtle(r#"
//!     @prefix : <http://x/> .
//!     :j1 a :Job ; :uuid "1" ; :status "active" .
//!     :j2 a :Job ; :uuid "2" ; :status "failed" .
//! "#).unwrap();
//! let job = Arc::new(EntityType::new("Job").unwrap().with_namespace("http://x/").unwrap());
//!
//! let jobs = Finder::new(connection, job);
//! let active = jobs.all(&Conditions::new().with("status", "active")).unwrap();
//! assert_eq!(active.len(), 1);
//! assert_eq!(active[0].get("uuid").unwrap(), "1");
//! assert_eq!(jobs.count(&Conditions::new()).unwrap(), 2);
//! ```

use std::sync::Arc;

use crate::connection::{Connection, Row};
use crate::entity::Entity;
use crate::error::{EntityError, Result};
use crate::materializer::build_all;
use crate::query::template::{self, COLUMN_VAR, COUNT_VAR};
use crate::query::{Conditions, Dialect, SelectQuery};
use crate::registry::EntityType;

pub struct Finder<C: Connection> {
    connection: C,
    entity_type: Arc<EntityType>,
    dialect: Dialect,
}

impl<C: Connection> Finder<C> {
    pub fn new(connection: C, entity_type: Arc<EntityType>) -> Self {
        Finder { connection, entity_type, dialect: Dialect::default() }
    }

    pub fn with_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn entity_type(&self) -> &EntityType {
        &self.entity_type
    }

    pub fn connection(&self) -> &C {
        &self.connection
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn render_all(&self, conditions: &Conditions) -> Result<SelectQuery> {
        let entity_type = &self.entity_type;
        template::enumerate_all(
            entity_type.type_name(),
            entity_type.namespace()?,
            conditions,
            self.dialect,
        )
    }

    pub fn render_select<S: AsRef<str>>(
        &self,
        attributes: &[S],
        conditions: &Conditions,
    ) -> Result<SelectQuery> {
        let entity_type = &self.entity_type;
        template::select(entity_type.type_name(), entity_type.namespace()?, attributes, conditions)
    }

    pub fn render_count(&self, conditions: &Conditions) -> Result<SelectQuery> {
        let entity_type = &self.entity_type;
        template::count(entity_type.type_name(), entity_type.namespace()?, conditions)
    }

    pub fn render_columns(&self) -> Result<SelectQuery> {
        let entity_type = &self.entity_type;
        template::columns(entity_type.type_name(), entity_type.namespace()?)
    }

    /// Every matching subject as an entity, one per subject in order of first appearance.
    pub fn all(&self, conditions: &Conditions) -> Result<Vec<Entity>> {
        let query = self.prepare("all", self.render_all(conditions)?);
        let groups = self.connection.fetch_subjects(&query)?;
        Ok(build_all(self.entity_type.namespace()?, groups))
    }

    /// Raw rows with one column per requested attribute.
    pub fn select<S: AsRef<str>>(&self, attributes: &[S], conditions: &Conditions) -> Result<Vec<Row>> {
        let query = self.prepare("select", self.render_select(attributes, conditions)?);
        Ok(self.connection.fetch(&query)?)
    }

    /// Number of distinct `uuid` values among matching subjects; no rows counts as zero.
    pub fn count(&self, conditions: &Conditions) -> Result<u64> {
        let query = self.prepare("count", self.render_count(conditions)?);
        let rows = self.connection.fetch(&query)?;

        let Some(value) = rows.first().and_then(|row| row.get(COUNT_VAR)) else {
            return Ok(0);
        };
        value.trim().parse().map_err(|_| {
            EntityError::ResultError(format!("count is not a non-negative integer: {:?}", value))
        })
    }

    /// Bare attribute names used by instances of this type.
    ///
    /// Discovered once per entity type and cached for its lifetime.
    pub fn columns(&self) -> Result<&[String]> {
        self.entity_type.columns_or_try_init(|| {
            tracing::debug!(entity_type = %self.entity_type.type_name(), "column cache miss");
            let namespace = self.entity_type.namespace()?;
            let query = self.prepare("columns", self.render_columns()?);
            let rows = self.connection.fetch(&query)?;

            let columns = rows
                .iter()
                .filter_map(|row| row.get(COLUMN_VAR))
                .filter_map(|column| namespace.strip(column))
                .map(str::to_string)
                .collect();
            Ok(columns)
        })
    }

    fn prepare(&self, operation: &str, query: SelectQuery) -> String {
        let text = query.to_string();
        tracing::debug!(
            entity_type = %self.entity_type.type_name(),
            operation,
            query_len = text.len(),
            "executing finder query"
        );
        tracing::trace!(query = %text);
        text
    }
}
