//! Error types for entity queries and store connections

use thiserror::Error;

/// Result type alias for entity operations
pub type Result<T> = std::result::Result<T, EntityError>;

/// Main error type for entity operations
#[derive(Error, Debug)]
pub enum EntityError {
    /// Namespace, type name or environment is missing or invalid
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Strict access to an attribute the store did not return for this entity
    #[error("Unknown attribute `{name}` on entity {id}")]
    UnknownAttribute { id: String, name: String },

    /// Attribute name that cannot be used as a SPARQL variable or local name
    #[error("Invalid attribute name: {0:?}")]
    InvalidAttribute(String),

    /// `select` called without any attribute to project
    #[error("Select requires at least one attribute")]
    EmptyProjection,

    /// The store answered with something that cannot be interpreted
    #[error("Result error: {0}")]
    ResultError(String),

    /// Failure reported by the connection, passed through untouched
    #[error(transparent)]
    ConnectionError(#[from] ConnectionError),
}

/// Errors raised by a [`Connection`](crate::connection::Connection) implementation
#[derive(Error, Debug)]
pub enum ConnectionError {
    /// HTTP transport or non-success status
    #[error("HTTP error: {0}")]
    Http(String),

    /// The query text was rejected
    #[error("Query error: {0}")]
    Query(String),

    /// Store evaluation or storage failure
    #[error("Store error: {0}")]
    Store(String),

    /// Response body could not be decoded
    #[error("Response error: {0}")]
    Response(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(String),
}

impl From<oxigraph::store::StorageError> for ConnectionError {
    fn from(err: oxigraph::store::StorageError) -> Self {
        ConnectionError::Store(err.to_string())
    }
}

impl From<oxigraph::store::LoaderError> for ConnectionError {
    fn from(err: oxigraph::store::LoaderError) -> Self {
        ConnectionError::Store(err.to_string())
    }
}

impl From<oxigraph::sparql::QueryEvaluationError> for ConnectionError {
    fn from(err: oxigraph::sparql::QueryEvaluationError) -> Self {
        ConnectionError::Store(err.to_string())
    }
}

impl From<reqwest::Error> for ConnectionError {
    fn from(err: reqwest::Error) -> Self {
        ConnectionError::Http(err.to_string())
    }
}

impl From<serde_json::Error> for ConnectionError {
    fn from(err: serde_json::Error) -> Self {
        ConnectionError::Response(err.to_string())
    }
}

impl From<std::io::Error> for ConnectionError {
    fn from(err: std::io::Error) -> Self {
        ConnectionError::Io(err.to_string())
    }
}
