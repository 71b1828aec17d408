//! Benign/fatal classification and operator hints

use super::types::{ClientError, ClientErrorKind};
use crate::error::Error;
use regex::RegexSet;
use std::sync::LazyLock;

/// What the traversal does with a failed fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// End the sequence as if the continuation token were absent
    Benign,
    /// Stop and hand the error to the caller unchanged
    Fatal,
}

impl Disposition {
    pub fn is_benign(&self) -> bool {
        matches!(self, Self::Benign)
    }

    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }
}

/// Classify a failure raised while fetching a page.
///
/// Only a client failure whose kind is [`ClientErrorKind::Unreachable`] is
/// benign. Binding errors, rejected or unauthorized calls, malformed
/// responses and timeouts are all fatal.
pub fn classify(error: &Error) -> Disposition {
    match error {
        Error::Client(e) if e.kind() == ClientErrorKind::Unreachable => Disposition::Benign,
        _ => Disposition::Fatal,
    }
}

// Indexes into MESSAGE_PATTERNS
const REGION: usize = 0;
const MISSING_CREDENTIALS: usize = 1;
const BAD_CREDENTIALS: usize = 2;
const BAD_PERMISSIONS: usize = 3;
const UNREACHABLE: usize = 4;
const TIMEOUT: usize = 5;

static MESSAGE_PATTERNS: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSet::new([
        r"(?i)unable to (find|load) (a )?region",
        r"(?i)unable to load (\w+ )?credentials",
        r"(?i)security token included in the request is invalid",
        r"(?i)is not authorized to perform",
        r"(?i)unable to execute http request|connection refused|could not resolve host",
        r"(?i)timed out",
    ])
    .unwrap()
});

/// Infer a kind from message text
pub(crate) fn infer_kind(message: &str) -> ClientErrorKind {
    let matches = MESSAGE_PATTERNS.matches(message);
    if matches.matched(UNREACHABLE) {
        ClientErrorKind::Unreachable
    } else if matches.matched(BAD_CREDENTIALS) || matches.matched(BAD_PERMISSIONS) {
        ClientErrorKind::Unauthorized
    } else if matches.matched(TIMEOUT) {
        ClientErrorKind::Timeout
    } else {
        ClientErrorKind::Other
    }
}

const GENERIC_CREDENTIALS_SOLUTION: &str =
    "Check that the client configuration and credentials have been set up.";

/// Operator hints for a client failure, most specific first.
///
/// Returns an empty list when nothing useful can be said.
pub fn diagnose(error: &ClientError) -> Vec<&'static str> {
    let matches = MESSAGE_PATTERNS.matches(error.message());

    if matches.matched(REGION) {
        return vec![
            "Could not determine the service region.",
            GENERIC_CREDENTIALS_SOLUTION,
            "Set the region explicitly if it cannot be discovered.",
        ];
    }
    if matches.matched(MISSING_CREDENTIALS) {
        return vec![
            "Could not find credentials.",
            GENERIC_CREDENTIALS_SOLUTION,
            "Provide the credentials explicitly if they cannot be discovered.",
        ];
    }
    if matches.matched(BAD_CREDENTIALS) {
        return vec![
            "The credentials provided may have been deleted or may be invalid.",
            "Make sure the credentials still exist and carry the required permissions.",
        ];
    }

    match error.kind() {
        ClientErrorKind::Unauthorized => vec![
            "The caller is not authorized to perform this operation.",
            "Add the necessary permissions and try again.",
        ],
        ClientErrorKind::Unreachable => vec![
            "Unable to connect to the API.",
            "Couldn't contact the service, is the network connection down?",
        ],
        _ => Vec::new(),
    }
}
