//! SPARQL protocol client
//!
//! Posts CONSTRUCT queries to the graph store endpoint and parses the
//! N-Triples answer. The `GraphSource` trait is the seam the service
//! layer depends on, so tests can substitute an in-memory source.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::error::{Error, Result};
use crate::graph::triples::{Triple, parse_ntriples};

/// Transport seam for the graph store
#[async_trait]
pub trait GraphSource: Send + Sync {
    /// Run a CONSTRUCT query and return the constructed triples
    async fn construct(&self, query: &str) -> Result<Vec<Triple>>;
}

/// HTTP client for a SPARQL 1.1 protocol endpoint
#[derive(Debug, Clone)]
pub struct SparqlClient {
    client: HttpClient,
    endpoint: String,
}

impl SparqlClient {
    /// Start building a client for the given endpoint
    pub fn builder(endpoint: impl Into<String>) -> SparqlClientBuilder {
        SparqlClientBuilder::new(endpoint)
    }

    /// The endpoint this client posts to
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Builder for [`SparqlClient`]
#[derive(Debug, Clone)]
pub struct SparqlClientBuilder {
    endpoint: String,
    timeout_secs: u64,
}

impl SparqlClientBuilder {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout_secs: 30,
        }
    }

    /// Set the request timeout in seconds
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Validate the endpoint and build the client
    pub fn build(self) -> Result<SparqlClient> {
        let url = Url::parse(&self.endpoint)
            .map_err(|e| Error::ConfigError(format!("invalid graph endpoint: {}", e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(Error::ConfigError(format!(
                "graph endpoint must use http or https, got '{}'",
                url.scheme()
            )));
        }

        let client = HttpClient::builder()
            .timeout(Duration::from_secs(self.timeout_secs))
            .build()
            .map_err(Error::GraphRequest)?;

        Ok(SparqlClient {
            client,
            endpoint: self.endpoint,
        })
    }
}

#[async_trait]
impl GraphSource for SparqlClient {
    async fn construct(&self, query: &str) -> Result<Vec<Triple>> {
        debug!(
            endpoint = %self.endpoint,
            query_bytes = query.len(),
            "sending CONSTRUCT query"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/sparql-query")
            .header("Accept", "application/n-triples")
            .body(query.to_string())
            .send()
            .await
            .map_err(Error::GraphRequest)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            warn!(status = %status, "graph store returned an error");
            return Err(Error::GraphStatus {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await.map_err(Error::GraphRequest)?;
        let triples = parse_ntriples(&body)?;
        debug!(triples = triples.len(), "parsed graph response");
        Ok(triples)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_accepts_http_and_https() {
        assert!(SparqlClient::builder("http://localhost:3030/colligo/sparql")
            .build()
            .is_ok());
        assert!(SparqlClient::builder("https://sparql.example.org/query")
            .with_timeout_secs(5)
            .build()
            .is_ok());
    }

    #[test]
    fn test_builder_rejects_bad_endpoints() {
        assert!(matches!(
            SparqlClient::builder("not a url").build(),
            Err(Error::ConfigError(_))
        ));
        assert!(matches!(
            SparqlClient::builder("ftp://example.org/sparql").build(),
            Err(Error::ConfigError(_))
        ));
    }

    #[test]
    fn test_endpoint_is_kept_verbatim() {
        let client = SparqlClient::builder("http://localhost:3030/colligo/sparql")
            .build()
            .unwrap();
        assert_eq!(client.endpoint(), "http://localhost:3030/colligo/sparql");
    }
}
