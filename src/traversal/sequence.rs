//! Sequence production over a page source

use super::types::Page;
use crate::classify::{classify, diagnose, Disposition};
use crate::error::{Error, Result};
use std::collections::VecDeque;
use std::iter::FusedIterator;
use std::mem;
use tracing::{debug, error, warn};

/// Something the engine can page through
pub trait PageSource {
    type Request;
    type Item;

    /// Materialize the request a new realization starts from
    fn initial_request(&self) -> Result<Self::Request>;

    /// Perform one remote call
    fn fetch_page(&self, request: &Self::Request) -> Result<Page<Self::Item>>;

    /// Derive the request for the page after `request`
    fn next_request(&self, request: Self::Request, token: String) -> Result<Self::Request>;
}

enum Phase<R> {
    /// Nothing fetched yet
    Unstarted,
    /// Holds the request for the next page
    Fetching(R),
    /// No more pages, pending items remain
    Draining,
    /// Terminal
    Exhausted,
}

/// One realization of a paginated sequence.
///
/// Yields `Ok(item)` in page order and, within a page, in the order the
/// operation returned them. A fatal error is yielded once, after which the
/// iterator is exhausted. An unreachable endpoint ends the sequence quietly;
/// [`Items::interrupted`] reports whether that happened.
pub struct Items<'a, S: PageSource> {
    source: &'a S,
    phase: Phase<S::Request>,
    pending: VecDeque<S::Item>,
    pages_fetched: usize,
    interrupted: bool,
}

impl<'a, S: PageSource> Items<'a, S> {
    /// Start a new realization over `source`
    pub fn new(source: &'a S) -> Self {
        Self {
            source,
            phase: Phase::Unstarted,
            pending: VecDeque::new(),
            pages_fetched: 0,
            interrupted: false,
        }
    }

    /// Number of remote calls that returned a page
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Whether the sequence ended early because the endpoint was unreachable
    pub fn interrupted(&self) -> bool {
        self.interrupted
    }

    /// Whether no further items will be produced
    pub fn is_exhausted(&self) -> bool {
        matches!(self.phase, Phase::Exhausted) && self.pending.is_empty()
    }

    fn fetch(&mut self, request: S::Request) -> Result<()> {
        let page = self.source.fetch_page(&request)?;
        self.pages_fetched += 1;

        debug!(
            page = self.pages_fetched,
            items = page.items.len(),
            more = !page.is_last(),
            "Fetched page"
        );

        self.pending.extend(page.items);
        self.phase = match page.next_token {
            Some(token) => Phase::Fetching(self.source.next_request(request, token)?),
            None => Phase::Draining,
        };
        Ok(())
    }

    fn fail(&mut self, err: Error) -> Option<Result<S::Item>> {
        self.phase = Phase::Exhausted;

        if classify(&err) == Disposition::Benign {
            warn!(
                pages = self.pages_fetched,
                "Endpoint unreachable, ending sequence early: {err}"
            );
            if let Some(client_err) = err.client_error() {
                for hint in diagnose(client_err) {
                    warn!("{hint}");
                }
            }
            self.interrupted = true;
            return None;
        }

        if let Some(client_err) = err.client_error() {
            for hint in diagnose(client_err) {
                error!("{hint}");
            }
        }
        self.pending.clear();
        Some(Err(err))
    }
}

impl<S: PageSource> Iterator for Items<'_, S> {
    type Item = Result<S::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.pending.pop_front() {
                return Some(Ok(item));
            }

            match mem::replace(&mut self.phase, Phase::Exhausted) {
                Phase::Unstarted => match self.source.initial_request() {
                    Ok(request) => self.phase = Phase::Fetching(request),
                    Err(err) => return self.fail(err),
                },
                // Keep fetching while pages come back empty but carry a token
                Phase::Fetching(request) => {
                    if let Err(err) = self.fetch(request) {
                        return self.fail(err);
                    }
                }
                Phase::Draining | Phase::Exhausted => return None,
            }
        }
    }
}

impl<S: PageSource> FusedIterator for Items<'_, S> {}
