//! Error types for Colligo

use thiserror::Error;

/// Result type alias using Colligo's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Colligo error types with helpful messages and suggestions
#[derive(Error, Debug)]
pub enum Error {
    // Config errors (E001-E099)
    #[error("Configuration error: {0}")]
    ConfigError(String),

    // Input errors (E100-E199)
    #[error("Invalid search options: {0}")]
    InvalidOptions(String),

    #[error("Unknown entity kind '{0}'. Valid kinds: datasets, heritage-objects, provenance-events.")]
    InvalidEntityKind(String),

    // Graph store errors (E200-E299)
    #[error("Graph store request failed: {0}. Check the endpoint with `colligo config get graph.endpoint`.")]
    GraphRequest(reqwest::Error),

    #[error("Graph store returned HTTP {status}: {body}")]
    GraphStatus { status: u16, body: String },

    #[error("Failed to parse triples from graph store response: {0}")]
    TripleParse(String),

    // Search index errors (E300-E399)
    #[error("Search index request failed: {0}. Check the endpoint with `colligo config get search.endpoint`.")]
    SearchRequest(reqwest::Error),

    #[error("Search index returned HTTP {status}: {body}")]
    SearchStatus { status: u16, body: String },

    #[error("Search index response did not match the expected shape: {0}")]
    SearchSchema(#[from] serde_json::Error),
}

impl Error {
    /// Get error code for this error type
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError(_) => "E001",
            Self::InvalidOptions(_) => "E100",
            Self::InvalidEntityKind(_) => "E101",
            Self::GraphRequest(_) => "E200",
            Self::GraphStatus { .. } => "E201",
            Self::TripleParse(_) => "E202",
            Self::SearchRequest(_) => "E300",
            Self::SearchStatus { .. } => "E301",
            Self::SearchSchema(_) => "E302",
        }
    }

    /// Get suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<String> {
        match self {
            Self::ConfigError(_) => Some("colligo config list".to_string()),
            Self::InvalidEntityKind(_) => Some("colligo kinds".to_string()),
            Self::GraphRequest(_) | Self::GraphStatus { .. } => {
                Some("colligo config get graph.endpoint".to_string())
            }
            Self::SearchRequest(_) | Self::SearchStatus { .. } => {
                Some("colligo config get search.endpoint".to_string())
            }
            _ => None,
        }
    }
}
