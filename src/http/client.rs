//! Blocking JSON list client
//!
//! Adapts a paginated JSON endpoint described by an [`EndpointConfig`] to the
//! [`ListOperation`] contract:
//! - GET `base_url/path` with static query parameters and headers
//! - Items read from a dotted path holding an array; a missing or `null`
//!   value is an empty page
//! - Token read from a dotted path and sent back as a query parameter
//! - Transport failures mapped onto [`ClientErrorKind`]

use super::path::{lookup_string, take};
use crate::adapter::{ListIterator, ListOperation};
use crate::classify::{ClientError, ClientErrorKind};
use crate::config::EndpointConfig;
use crate::error::{Error, Result};
use crate::types::JsonValue;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::collections::BTreeMap;
use tracing::debug;
use url::Url;

/// One request against a JSON list endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonListRequest {
    /// Query parameters added to the endpoint's static ones
    pub query: BTreeMap<String, String>,
    /// Continuation token, absent on the first page
    pub token: Option<String>,
}

impl JsonListRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }
}

/// List operation over a paginated JSON endpoint
pub struct JsonListClient {
    client: Client,
    config: EndpointConfig,
    url: Url,
}

impl JsonListClient {
    /// Build a client for `config`
    pub fn new(config: EndpointConfig) -> Result<Self> {
        config.validate()?;
        let url = config.url()?;

        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .default_headers(header_map(&config)?)
            .build()?;

        Ok(Self {
            client,
            config,
            url,
        })
    }

    pub fn config(&self) -> &EndpointConfig {
        &self.config
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Lazy, restartable sequence over every page the endpoint returns for
    /// `request`. Call [`ListIterator::items`] to walk it.
    pub fn pages(&self, request: JsonListRequest) -> ListIterator<'_, Self> {
        ListIterator::from_request(self, request)
    }
}

impl ListOperation for JsonListClient {
    type Request = JsonListRequest;
    type Response = JsonValue;
    type Item = JsonValue;

    fn invoke(&self, request: &JsonListRequest) -> std::result::Result<JsonValue, ClientError> {
        let mut req = self.client.get(self.url.clone());

        if !self.config.query.is_empty() {
            req = req.query(&self.config.query);
        }
        if !request.query.is_empty() {
            req = req.query(&request.query);
        }
        if let (Some(param), Some(token)) = (&self.config.token_param, &request.token) {
            req = req.query(&[(param.as_str(), token.as_str())]);
        }

        debug!(
            endpoint = %self.config.name,
            url = %self.url,
            token = request.token.as_deref().unwrap_or("-"),
            "Requesting page"
        );

        let response = req.send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ClientError::from_status(status.as_u16(), body));
        }

        Ok(response.json::<JsonValue>()?)
    }

    fn next_token(&self, response: &JsonValue) -> Option<String> {
        let path = self.config.token_path.as_deref()?;
        lookup_string(response, path)
    }

    fn extract_items(
        &self,
        response: JsonValue,
    ) -> std::result::Result<Vec<JsonValue>, ClientError> {
        let path = &self.config.items_path;
        match take(response, path) {
            Some(JsonValue::Array(items)) => Ok(items),
            // Some APIs leave the array out of empty pages
            Some(JsonValue::Null) | None => Ok(Vec::new()),
            Some(other) => Err(ClientError::malformed(format!(
                "expected an array at '{path}', found {}",
                json_type(&other)
            ))),
        }
    }

    fn set_token(&self, mut request: JsonListRequest, token: String) -> JsonListRequest {
        request.token = Some(token);
        request
    }
}

impl std::fmt::Debug for JsonListClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonListClient")
            .field("name", &self.config.name)
            .field("url", &self.url.as_str())
            .finish_non_exhaustive()
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_connect() {
            ClientErrorKind::Unreachable
        } else if err.is_timeout() {
            ClientErrorKind::Timeout
        } else if err.is_decode() || err.is_body() {
            ClientErrorKind::Malformed
        } else {
            ClientErrorKind::Other
        };
        ClientError::new(kind, err.to_string()).with_source(err)
    }
}

fn header_map(config: &EndpointConfig) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    for (key, value) in &config.headers {
        let name = HeaderName::from_bytes(key.as_bytes())
            .map_err(|e| Error::invalid_value("headers", format!("'{key}': {e}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::invalid_value("headers", format!("'{key}': {e}")))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

fn json_type(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
