//! Lazy page traversal module
//!
//! Turns any paginated list operation into a lazy, restartable sequence of
//! items.
//!
//! # Overview
//!
//! - `PageSource` - The capability the engine drives: build the first
//!   request, fetch one page, derive the next request from a token
//! - `Page` - One fetched page of items plus an optional continuation token
//! - `Items` - One realization of the sequence, an `Iterator` over
//!   `Result<Item>`
//!
//! Pages are fetched only when the buffer of pending items is empty, so a
//! consumer that stops early never triggers another remote call.

mod sequence;
mod types;

pub use sequence::{Items, PageSource};
pub use types::Page;
