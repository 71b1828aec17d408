//! HTTP list adapter module
//!
//! Pages through JSON list endpoints with a blocking `reqwest` client.
//!
//! # Features
//!
//! - **Token pagination**: Token read from the body, sent back as a query parameter
//! - **Dotted paths**: Items and token located with `data.items`-style paths;
//!   a page that leaves out its items array is empty
//! - **Error mapping**: Connect failures are `Unreachable`, 401/403 are
//!   `Unauthorized`, other non-2xx are `Rejected`, bad bodies are `Malformed`

mod client;
mod path;

pub use client::{JsonListClient, JsonListRequest};
pub use path::{lookup, lookup_string, take};
