//! Introspection module
//!
//! Member tables that let the engine discover pagination operations by name
//! and shape instead of through per-operation code.
//!
//! # Overview
//!
//! A type takes part in structural discovery by implementing [`Introspect`]
//! and listing its callable members. Each [`Member`] records its name,
//! visibility, receiver, optional single parameter and return type as
//! [`TypeKey`]s, together with a type-erased body the engine can call once a
//! member has been selected.
//!
//! Clients additionally implement [`ServiceClient`] to declare which naming
//! generation they follow and to register their request/result model types in
//! a [`TypeCatalog`].

mod catalog;
mod types;

pub use catalog::{counterpart_name, Introspect, ServiceClient, Surface, TypeCatalog};
pub use types::{short_name, Member, TypeKey, Value, Visibility};

#[cfg(test)]
mod tests;
