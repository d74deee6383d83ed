//! HTTP client for remote SPARQL endpoints (Apache Jena Fuseki, Oxigraph server, etc.)

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::config::StoreConfig;
use crate::connection::{Connection, Row};
use crate::error::{ConnectionError, EntityError, Result};

const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";

/// Blocking SPARQL protocol client bound to one query endpoint.
pub struct HttpConnection {
    query_url: String,
    auth_token: Option<String>,
    client: Client,
}

impl HttpConnection {
    pub fn new(config: &StoreConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EntityError::ConfigError(format!("cannot build HTTP client: {}", e)))?;

        Ok(HttpConnection {
            query_url: config.query_url(),
            auth_token: config.auth_token.clone(),
            client,
        })
    }

    pub fn query_url(&self) -> &str {
        &self.query_url
    }
}

impl Connection for HttpConnection {
    fn fetch(&self, query: &str) -> std::result::Result<Vec<Row>, ConnectionError> {
        let mut request = self
            .client
            .post(&self.query_url)
            .header(ACCEPT, SPARQL_RESULTS_JSON)
            .form(&[("query", query)]);
        if let Some(token) = &self.auth_token {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request.send()?;
        if !response.status().is_success() {
            let status = response.status();
            let error_body = response.text().unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ConnectionError::Http(format!(
                "Query failed with status {}: {}",
                status, error_body
            )));
        }

        let body = response.text()?;
        let rows = parse_results_json(&body)?;
        tracing::debug!(rows = rows.len(), url = %self.query_url, "endpoint query returned");
        Ok(rows)
    }
}

#[derive(Debug, Deserialize)]
struct SparqlResults {
    #[serde(default)]
    results: Option<SparqlBindings>,
}

#[derive(Debug, Deserialize)]
struct SparqlBindings {
    bindings: Vec<HashMap<String, SparqlTerm>>,
}

#[derive(Debug, Deserialize)]
struct SparqlTerm {
    #[serde(rename = "type")]
    kind: String,
    value: String,
}

impl SparqlTerm {
    fn into_value(self) -> String {
        match self.kind.as_str() {
            "bnode" => format!("_:{}", self.value),
            _ => self.value,
        }
    }
}

/// Decode an `application/sparql-results+json` document into rows.
///
/// Boolean (ASK) documents have no `results` member and decode to no rows.
pub fn parse_results_json(body: &str) -> std::result::Result<Vec<Row>, ConnectionError> {
    let document: SparqlResults = serde_json::from_str(body)?;
    let Some(results) = document.results else {
        return Ok(Vec::new());
    };

    Ok(results
        .bindings
        .into_iter()
        .map(|binding| {
            binding.into_iter().map(|(var, term)| (var, term.into_value())).collect::<Row>()
        })
        .collect())
}
