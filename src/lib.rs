// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]

//! # pagewalk
//!
//! Turns any paginated list operation into a lazy, restartable sequence of
//! items. Callers iterate; the engine fetches pages on demand, threads the
//! continuation token from one response into the next request, and stops
//! when no token comes back.
//!
//! ## Features
//!
//! - **Structural discovery**: Finds the list call, item accessor, token
//!   accessor and token installer by name and shape, no per-operation code
//! - **Two client generations**: `FooRequest`/`FooResult` with in-place
//!   setters, and `FooRequest`/`FooResponse` with builder-style setters
//! - **Static adapter**: Hand-written [`ListOperation`]s drive the same engine
//! - **Graceful degradation**: An unreachable endpoint ends the sequence
//!   quietly, every other failure propagates
//! - **JSON endpoints**: A blocking HTTP adapter configured from YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use pagewalk::ResultsIterator;
//!
//! let things = ResultsIterator::<_, ListThingsRequest, Thing>::from_type(&client);
//! for thing in things.items() {
//!     println!("{:?}", thing?);
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Caller API                                  │
//! │  ResultsIterator::items()          ListIterator::items()        │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────────┬───────────────┴─────┬──────────────┬─────────────┐
//! │  Introspect  │  Resolver / Binding │  Traversal   │  Classify   │
//! ├──────────────┼─────────────────────┼──────────────┼─────────────┤
//! │ Member table │ Name + shape query  │ Lazy pages   │ Benign      │
//! │ TypeCatalog  │ Convention tiers    │ Token loop   │ Fatal       │
//! │              │ Memoized binding    │ Early stop   │ Hints       │
//! └──────────────┴─────────────────────┴──────────────┴─────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Failure classification and diagnostics
pub mod classify;

/// Member tables for structural discovery
pub mod introspect;

/// Structural member resolution
pub mod resolver;

/// Pagination bindings and naming conventions
pub mod binding;

/// Lazy page traversal engine
pub mod traversal;

/// Hand-written list operations
pub mod adapter;

/// Structural results iterator
pub mod iterator;

/// JSON list endpoints over HTTP
pub mod http;

/// Endpoint configuration
pub mod config;

/// Command-line interface
pub mod cli;

#[cfg(test)]
mod fixtures;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use adapter::{ListIterator, ListOperation};
pub use binding::{bind, Convention, PaginationBinding};
pub use classify::{classify, ClientError, ClientErrorKind, Disposition};
pub use config::EndpointConfig;
pub use http::{JsonListClient, JsonListRequest};
pub use introspect::{Introspect, Member, ServiceClient, TypeCatalog};
pub use iterator::{RequestDescriptor, ResultsIterator};
pub use traversal::{Items, Page, PageSource};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
