//! Static list-operation adapter
//!
//! For clients that are not introspectable, or when the caller would rather
//! write the four pagination operations by hand. A [`ListOperation`] supplies
//! them directly and [`ListIterator`] drives it through the same traversal
//! engine as the structural iterator, with the same laziness and error
//! classification.

use crate::classify::ClientError;
use crate::error::Result;
use crate::iterator::RequestDescriptor;
use crate::traversal::{Items, Page, PageSource};

/// One paginated list operation, described explicitly
pub trait ListOperation {
    type Request: Clone;
    type Response;
    type Item;

    /// Perform the remote call
    fn invoke(&self, request: &Self::Request) -> std::result::Result<Self::Response, ClientError>;

    /// Continuation token carried by `response`, if any
    fn next_token(&self, response: &Self::Response) -> Option<String>;

    /// Take the items out of `response`
    fn extract_items(
        &self,
        response: Self::Response,
    ) -> std::result::Result<Vec<Self::Item>, ClientError>;

    /// Request for the page after `request`
    fn set_token(&self, request: Self::Request, token: String) -> Self::Request;
}

/// Lazy, restartable sequence over a [`ListOperation`]
pub struct ListIterator<'c, A: ListOperation> {
    operation: &'c A,
    request: RequestDescriptor<A::Request>,
}

impl<'c, A> ListIterator<'c, A>
where
    A: ListOperation,
    A::Request: Default,
{
    pub fn new(operation: &'c A, request: RequestDescriptor<A::Request>) -> Self {
        Self { operation, request }
    }

    /// Every realization starts from a copy of `request`
    pub fn from_request(operation: &'c A, request: A::Request) -> Self {
        Self::new(operation, RequestDescriptor::Value(request))
    }

    /// Every realization starts from `A::Request::default()`
    pub fn from_type(operation: &'c A) -> Self {
        Self::new(operation, RequestDescriptor::Type)
    }

    /// Start a new realization
    pub fn items(&self) -> Items<'_, Self> {
        Items::new(self)
    }
}

impl<A> PageSource for ListIterator<'_, A>
where
    A: ListOperation,
    A::Request: Default,
{
    type Request = A::Request;
    type Item = A::Item;

    fn initial_request(&self) -> Result<A::Request> {
        Ok(self.request.materialize())
    }

    fn fetch_page(&self, request: &A::Request) -> Result<Page<A::Item>> {
        let response = self.operation.invoke(request)?;
        let next_token = self.operation.next_token(&response);
        let items = self.operation.extract_items(response)?;
        Ok(Page::new(items, next_token))
    }

    fn next_request(&self, request: A::Request, token: String) -> Result<A::Request> {
        Ok(self.operation.set_token(request, token))
    }
}
