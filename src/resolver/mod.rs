//! Method resolver module
//!
//! Finds the single member of a type that matches a structural query:
//! parameter type, return type and an optional allow-list of names.
//!
//! # Overview
//!
//! - `MemberQuery` - The constraints a member must satisfy
//! - `resolve` - Exactly one match or a binding error
//! - `find` - Zero or one match, ambiguity is still an error
//! - `resolve_tiered` - Try several name tiers, first tier with a match wins

mod query;

pub use query::{find, resolve, resolve_tiered, MemberQuery};
