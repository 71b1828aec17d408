//! Structural results iterator
//!
//! Pages through any [`ServiceClient`] list operation whose request, result
//! and item types follow one of the naming conventions. The binding is
//! resolved on first demand and reused for every later page and every later
//! realization of the same iterator.

use crate::binding::{bind, PaginationBinding};
use crate::error::Result;
use crate::introspect::{Introspect, ServiceClient};
use crate::traversal::{Items, Page, PageSource};
use once_cell::unsync::OnceCell;
use std::any::Any;
use std::fmt;

/// Where the first request of each realization comes from
#[derive(Debug, Clone)]
pub enum RequestDescriptor<R> {
    /// Start from a copy of this request
    Value(R),
    /// Start from the request type's default value
    Type,
}

impl<R: Clone + Default> RequestDescriptor<R> {
    /// Produce a fresh request
    pub fn materialize(&self) -> R {
        match self {
            RequestDescriptor::Value(request) => request.clone(),
            RequestDescriptor::Type => R::default(),
        }
    }
}

/// Lazy, restartable sequence of every item a paginated operation returns.
///
/// Nothing is resolved or fetched until [`ResultsIterator::items`] is first
/// pulled. Binding errors surface as the first element of that realization.
///
/// ```rust,ignore
/// let things = ResultsIterator::<_, ListThingsRequest, Thing>::from_type(&client);
/// for thing in things.items() {
///     println!("{}", thing?);
/// }
/// ```
pub struct ResultsIterator<'c, C, Req, T> {
    client: &'c C,
    request: RequestDescriptor<Req>,
    binding: OnceCell<PaginationBinding<Req, T>>,
}

impl<'c, C, Req, T> ResultsIterator<'c, C, Req, T>
where
    C: ServiceClient,
    Req: Introspect + Clone + Default,
    T: Any,
{
    pub fn new(client: &'c C, request: RequestDescriptor<Req>) -> Self {
        Self {
            client,
            request,
            binding: OnceCell::new(),
        }
    }

    /// Every realization starts from a copy of `request`
    pub fn from_request(client: &'c C, request: Req) -> Self {
        Self::new(client, RequestDescriptor::Value(request))
    }

    /// Every realization starts from `Req::default()`
    pub fn from_type(client: &'c C) -> Self {
        Self::new(client, RequestDescriptor::Type)
    }

    /// Start a new realization
    pub fn items(&self) -> Items<'_, Self> {
        Items::new(self)
    }

    /// The binding, once a realization has resolved it
    pub fn binding(&self) -> Option<&PaginationBinding<Req, T>> {
        self.binding.get()
    }

    fn resolved(&self) -> Result<&PaginationBinding<Req, T>> {
        self.binding.get_or_try_init(bind::<C, Req, T>)
    }
}

impl<C, Req, T> PageSource for ResultsIterator<'_, C, Req, T>
where
    C: ServiceClient,
    Req: Introspect + Clone + Default,
    T: Any,
{
    type Request = Req;
    type Item = T;

    fn initial_request(&self) -> Result<Req> {
        // Resolve before any remote call so binding errors never cost one
        self.resolved()?;
        Ok(self.request.materialize())
    }

    fn fetch_page(&self, request: &Req) -> Result<Page<T>> {
        let binding = self.resolved()?;
        let result = binding.invoke(self.client, request)?;
        let items = binding.extract_items(&*result)?;
        let next_token = binding.next_token(&*result)?;
        Ok(Page::new(items, next_token))
    }

    fn next_request(&self, request: Req, token: String) -> Result<Req> {
        self.resolved()?.set_token(request, token)
    }
}

impl<C, Req: fmt::Debug, T> fmt::Debug for ResultsIterator<'_, C, Req, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultsIterator")
            .field("client", &std::any::type_name::<C>())
            .field("request", &self.request)
            .field("binding", &self.binding.get())
            .finish()
    }
}
