//! Endpoint configuration
//!
//! Describes one JSON list endpoint in YAML so the CLI can page through it
//! without any code.
//!
//! ```yaml
//! name: users
//! base_url: https://api.example.com
//! path: /v1/users
//! items_path: data
//! token_path: meta.next_cursor
//! token_param: cursor
//! query:
//!   limit: "100"
//! headers:
//!   Authorization: Bearer abc
//! ```

use crate::error::{Error, Result};
use crate::types::StringMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// One paginated JSON list endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointConfig {
    /// Name used in logs
    pub name: String,

    /// Scheme and host, optionally with a path prefix
    pub base_url: String,

    /// Path appended to `base_url`
    #[serde(default)]
    pub path: String,

    /// Dotted path to the array of items in the response body
    pub items_path: String,

    /// Dotted path to the continuation token in the response body
    #[serde(default)]
    pub token_path: Option<String>,

    /// Query parameter that carries the token on the next request
    #[serde(default)]
    pub token_param: Option<String>,

    /// Static query parameters sent with every request
    #[serde(default)]
    pub query: StringMap,

    /// Headers sent with every request
    #[serde(default)]
    pub headers: StringMap,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent string
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("pagewalk/{}", env!("CARGO_PKG_VERSION"))
}

impl EndpointConfig {
    /// Minimal config for `base_url` with items at `items_path`
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        items_path: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            path: String::new(),
            items_path: items_path.into(),
            token_path: None,
            token_param: None,
            query: StringMap::new(),
            headers: StringMap::new(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }

    /// Set the request path
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Read the token at `token_path` and send it back as `token_param`
    #[must_use]
    pub fn with_token(
        mut self,
        token_path: impl Into<String>,
        token_param: impl Into<String>,
    ) -> Self {
        self.token_path = Some(token_path.into());
        self.token_param = Some(token_param.into());
        self
    }

    /// Add a static query parameter
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add a header
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Parse and validate a config from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::config(format!(
                    "Failed to read endpoint file '{}': {}",
                    path.display(),
                    e
                ))
            }
        })?;
        Self::from_yaml_str(&content)
    }

    /// Check that the config describes a usable endpoint
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::missing_field("name"));
        }

        if self.base_url.is_empty() {
            return Err(Error::missing_field("base_url"));
        }

        if self.items_path.is_empty() {
            return Err(Error::missing_field("items_path"));
        }

        // Token path and parameter only make sense together
        match (&self.token_path, &self.token_param) {
            (Some(_), None) => return Err(Error::missing_field("token_param")),
            (None, Some(_)) => return Err(Error::missing_field("token_path")),
            _ => {}
        }

        if self.timeout_secs == 0 {
            return Err(Error::invalid_value(
                "timeout_secs",
                "must be greater than zero",
            ));
        }

        let url = self.url()?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "base_url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        Ok(())
    }

    /// Full request URL, without query parameters
    pub fn url(&self) -> Result<Url> {
        let base = self.base_url.trim_end_matches('/');
        let path = self.path.trim_start_matches('/');
        let full = if path.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{path}")
        };
        Ok(Url::parse(&full)?)
    }

    /// Whether responses carry a continuation token
    pub fn is_paginated(&self) -> bool {
        self.token_path.is_some()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
