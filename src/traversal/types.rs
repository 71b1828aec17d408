//! Page type

/// One response from a list operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items in the order the operation returned them
    pub items: Vec<T>,
    /// Continuation token, `None` on the last page
    pub next_token: Option<String>,
}

impl<T> Page<T> {
    /// Create a page. An empty token is treated as absent.
    pub fn new(items: Vec<T>, next_token: Option<String>) -> Self {
        Self {
            items,
            next_token: next_token.filter(|t| !t.is_empty()),
        }
    }

    /// Create the final page of a sequence
    pub fn last(items: Vec<T>) -> Self {
        Self::new(items, None)
    }

    /// Check if this is the final page
    pub fn is_last(&self) -> bool {
        self.next_token.is_none()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
