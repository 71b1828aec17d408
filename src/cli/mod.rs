//! CLI module
//!
//! Command-line interface for paging through JSON list endpoints.
//!
//! # Commands
//!
//! - `list` - Fetch every item across all pages
//! - `validate` - Check an endpoint definition without calling it

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
