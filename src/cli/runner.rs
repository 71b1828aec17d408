//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::EndpointConfig;
use crate::error::{Error, Result, ResultExt};
use crate::http::{JsonListClient, JsonListRequest};
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::time::Instant;
use tracing::{info, warn};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command, writing messages to stdout
    pub fn run(&self) -> Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.run_to(&mut out)
    }

    /// Run the CLI command, writing messages to `out`
    pub fn run_to(&self, out: &mut impl Write) -> Result<()> {
        match &self.cli.command {
            Commands::List { query, max_items } => self.list(out, query, *max_items),
            Commands::Validate => self.validate(out),
        }
    }

    /// Load endpoint definition
    fn load_endpoint(&self) -> Result<EndpointConfig> {
        let path = self
            .cli
            .endpoint
            .as_ref()
            .ok_or_else(|| Error::config("Endpoint file not specified (use -e flag)"))?;
        EndpointConfig::load(path)
    }

    /// Page through the endpoint and emit one record per item
    fn list(&self, out: &mut impl Write, query: &[String], max_items: Option<usize>) -> Result<()> {
        let endpoint = self.load_endpoint()?;
        let request = JsonListRequest {
            query: parse_query(query)?,
            token: None,
        };
        let name = endpoint.name.clone();
        let client = JsonListClient::new(endpoint)
            .with_context(|| format!("Endpoint '{name}' is not usable"))?;

        info!(endpoint = %name, url = %client.url(), "Listing items");
        let start = Instant::now();

        let pages = client.pages(request);
        let mut items = pages.items();
        let mut count = 0usize;
        for item in items.by_ref().take(max_items.unwrap_or(usize::MAX)) {
            let item = item?;
            self.output_message(
                out,
                &json!({
                    "type": "RECORD",
                    "record": {
                        "endpoint": name,
                        "data": item
                    }
                }),
            )?;
            count += 1;
        }

        if items.interrupted() {
            warn!(endpoint = %name, "Endpoint became unreachable, results are incomplete");
            self.output_message(
                out,
                &json!({
                    "type": "LOG",
                    "log": {
                        "level": "WARN",
                        "message": format!(
                            "Endpoint '{name}' became unreachable after {} pages, results are incomplete",
                            items.pages_fetched()
                        )
                    }
                }),
            )?;
        }

        self.output_message(
            out,
            &json!({
                "type": "LOG",
                "log": {
                    "level": "INFO",
                    "message": format!(
                        "Read {count} items from '{name}' in {} pages ({}ms)",
                        items.pages_fetched(),
                        start.elapsed().as_millis()
                    )
                }
            }),
        )
    }

    /// Validate the endpoint definition without calling it
    fn validate(&self, out: &mut impl Write) -> Result<()> {
        let endpoint = self.load_endpoint()?;
        let url = endpoint.url()?;

        let paging = match (&endpoint.token_path, &endpoint.token_param) {
            (Some(path), Some(param)) => format!("token at '{path}' sent as '{param}'"),
            _ => "single page".to_string(),
        };

        self.output_message(
            out,
            &json!({
                "type": "LOG",
                "log": {
                    "level": "INFO",
                    "message": format!(
                        "Endpoint '{}' is valid: GET {url}, items at '{}', {paging}",
                        endpoint.name, endpoint.items_path
                    )
                }
            }),
        )
    }

    /// Output a message in the configured format
    fn output_message(&self, out: &mut impl Write, msg: &Value) -> Result<()> {
        let line = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(msg)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(msg)?,
        };
        writeln!(out, "{line}")?;
        Ok(())
    }
}

/// Parse repeated `key=value` arguments
fn parse_query(pairs: &[String]) -> Result<BTreeMap<String, String>> {
    pairs
        .iter()
        .map(|pair| {
            pair.split_once('=')
                .filter(|(key, _)| !key.is_empty())
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .ok_or_else(|| {
                    Error::invalid_value("query", format!("expected KEY=VALUE, got '{pair}'"))
                })
        })
        .collect()
}
