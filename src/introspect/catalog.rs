//! Introspectable types and the catalog of model types

use super::types::{Member, TypeKey};
use crate::binding::Convention;
use std::any::Any;
use std::collections::HashMap;

/// A type whose callable members can be discovered at runtime
pub trait Introspect: Any {
    /// Name used for convention-based lookups.
    ///
    /// Defaults to [`std::any::type_name`]. Override it for generic types,
    /// whose names do not end in a plain identifier.
    fn type_name() -> &'static str
    where
        Self: Sized,
    {
        std::any::type_name::<Self>()
    }

    /// The members the resolver may choose from
    fn members() -> Vec<Member>
    where
        Self: Sized;
}

/// A remote-operation surface that the engine can paginate over
pub trait ServiceClient: Introspect {
    /// Naming generation this client follows
    const CONVENTION: Convention;

    /// Register the request and result types this client works with
    fn model_types(catalog: &mut TypeCatalog);
}

/// The members of one type, as seen by the resolver
#[derive(Debug, Clone)]
pub struct Surface {
    key: TypeKey,
    name: &'static str,
    members: Vec<Member>,
}

impl Surface {
    /// Build the surface of `T`
    pub fn of<T: Introspect>() -> Self {
        Self {
            key: TypeKey::of::<T>(),
            name: T::type_name(),
            members: T::members(),
        }
    }

    pub fn key(&self) -> TypeKey {
        self.key
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }
}

/// Registry of model types keyed by type name
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    entries: HashMap<&'static str, Surface>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the catalog a client declares
    pub fn for_client<C: ServiceClient>() -> Self {
        let mut catalog = Self::new();
        C::model_types(&mut catalog);
        catalog
    }

    /// Register `T` under its type name
    pub fn register<T: Introspect>(&mut self) -> &mut Self {
        let surface = Surface::of::<T>();
        self.entries.insert(surface.name, surface);
        self
    }

    /// Look up a type by name
    pub fn get(&self, name: &str) -> Option<&Surface> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Registered type names, sorted
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.entries.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

/// Name of the type paired with a request type.
///
/// Replaces a trailing `Request` with `suffix`, keeping the module path, so
/// `svc::ListThingsRequest` pairs with `svc::ListThingsResponse`. Returns
/// `None` when the name does not end in `Request`.
pub fn counterpart_name(request_name: &str, suffix: &str) -> Option<String> {
    request_name
        .strip_suffix("Request")
        .filter(|stem| !stem.is_empty() && !stem.ends_with(':'))
        .map(|stem| format!("{stem}{suffix}"))
}
