//! Pagination binding module
//!
//! Resolves, for one client/request/result triple, the four operations that
//! drive a pagination loop: invoke the list call, extract the items, read the
//! continuation token and install it on the next request.
//!
//! # Overview
//!
//! - `Convention` - Naming rules of the two client generations
//! - `PaginationBinding` - The resolved operations, typed by request and item
//! - `bind` - Resolve a binding for a client and request type

mod convention;
mod resolve;

pub use convention::Convention;
pub use resolve::{bind, PaginationBinding};
