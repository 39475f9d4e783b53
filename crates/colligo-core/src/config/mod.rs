//! Configuration management with file persistence

use anyhow::{Context, anyhow};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use url::Url;

/// Colligo configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub locale: String,
    pub graph: GraphConfig,
    pub search: SearchConfig,
}

/// Graph store (SPARQL endpoint) settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
}

/// Search index settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            graph: GraphConfig {
                endpoint: "http://localhost:3030/colligo/sparql".to_string(),
                timeout_secs: 30,
            },
            search: SearchConfig {
                endpoint: "http://localhost:9200/colligo/_search".to_string(),
                timeout_secs: 30,
            },
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        let dir = if let Ok(custom_dir) = env::var("COLLIGO_CONFIG_DIR") {
            PathBuf::from(custom_dir)
        } else {
            dirs::config_dir()
                .ok_or_else(|| anyhow!("Could not determine config directory"))?
                .join("colligo")
        };
        Ok(dir)
    }

    /// Get the config file path
    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load configuration from file, or create default if it doesn't exist
    ///
    /// Environment variables `COLLIGO_GRAPH_ENDPOINT`, `COLLIGO_SEARCH_ENDPOINT`
    /// and `COLLIGO_LOCALE` override the corresponding file values.
    pub fn load() -> anyhow::Result<Self> {
        let path = Self::config_path()?;

        let mut config = if path.exists() {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            toml::from_str::<Config>(&contents)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?
        } else {
            Config::default()
        };

        if let Ok(endpoint) = env::var("COLLIGO_GRAPH_ENDPOINT") {
            config.graph.endpoint = endpoint;
        }
        if let Ok(endpoint) = env::var("COLLIGO_SEARCH_ENDPOINT") {
            config.search.endpoint = endpoint;
        }
        if let Ok(locale) = env::var("COLLIGO_LOCALE") {
            config.locale = locale;
        }

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> anyhow::Result<()> {
        self.validate()?;

        let dir = Self::config_dir()?;
        fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create config directory: {}", dir.display()))?;

        let path = Self::config_path()?;
        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        validate_endpoint("graph.endpoint", &self.graph.endpoint)?;
        validate_endpoint("search.endpoint", &self.search.endpoint)?;
        validate_locale(&self.locale)?;

        if self.graph.timeout_secs == 0 {
            return Err(anyhow!("graph.timeout_secs must be greater than zero"));
        }
        if self.search.timeout_secs == 0 {
            return Err(anyhow!("search.timeout_secs must be greater than zero"));
        }
        Ok(())
    }

    /// Get a configuration value by key
    pub fn get(&self, key: &str) -> anyhow::Result<String> {
        match key {
            "locale" => Ok(self.locale.clone()),
            "graph.endpoint" => Ok(self.graph.endpoint.clone()),
            "graph.timeout_secs" => Ok(self.graph.timeout_secs.to_string()),
            "search.endpoint" => Ok(self.search.endpoint.clone()),
            "search.timeout_secs" => Ok(self.search.timeout_secs.to_string()),
            _ => Err(anyhow!(
                "Unknown configuration key: {}. Use `colligo config list` to see available keys.",
                key
            )),
        }
    }

    /// Set a configuration value by key
    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "locale" => {
                validate_locale(value)?;
                self.locale = value.to_string();
            }
            "graph.endpoint" => {
                validate_endpoint("graph.endpoint", value)?;
                self.graph.endpoint = value.to_string();
            }
            "graph.timeout_secs" => {
                self.graph.timeout_secs = value
                    .parse()
                    .with_context(|| format!("Invalid timeout_secs value: {}", value))?;
            }
            "search.endpoint" => {
                validate_endpoint("search.endpoint", value)?;
                self.search.endpoint = value.to_string();
            }
            "search.timeout_secs" => {
                self.search.timeout_secs = value
                    .parse()
                    .with_context(|| format!("Invalid timeout_secs value: {}", value))?;
            }
            _ => {
                return Err(anyhow!(
                    "Unknown configuration key: {}. Use `colligo config list` to see available keys.",
                    key
                ));
            }
        }
        Ok(())
    }

    /// List all configuration keys and their values
    pub fn list(&self) -> anyhow::Result<Vec<(String, String)>> {
        let keys = vec![
            "locale",
            "graph.endpoint",
            "graph.timeout_secs",
            "search.endpoint",
            "search.timeout_secs",
        ];

        keys.into_iter()
            .map(|key| {
                let value = self.get(key)?;
                Ok((key.to_string(), value))
            })
            .collect()
    }

    /// Reset configuration to defaults
    pub fn reset() -> anyhow::Result<()> {
        let path = Self::config_path()?;
        if path.exists() {
            fs::remove_file(&path)
                .with_context(|| format!("Failed to remove config file: {}", path.display()))?;
        }
        Ok(())
    }
}

fn validate_endpoint(key: &str, value: &str) -> anyhow::Result<()> {
    let url = Url::parse(value).with_context(|| format!("{} is not a valid URL: {}", key, value))?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(anyhow!(
            "{} must use http or https, got scheme '{}'",
            key,
            url.scheme()
        ));
    }
    Ok(())
}

// Locales end up quoted inside SPARQL filters, so the charset is strict
fn validate_locale(value: &str) -> anyhow::Result<()> {
    if value.is_empty() {
        return Err(anyhow!("locale must not be empty"));
    }
    if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(anyhow!(
            "locale must be a BCP 47 tag (letters, digits and '-'), got '{}'",
            value
        ));
    }
    Ok(())
}
