//! Error classification module
//!
//! Sorts failures raised while invoking a remote list operation into
//! benign and fatal.
//!
//! # Overview
//!
//! - `ClientError` - Structured failure reported by a client adapter
//! - `classify` - Benign (endpoint unreachable) vs fatal (everything else)
//! - `diagnose` - Operator hints for common credential and connectivity failures

mod classifier;
mod types;

pub use classifier::{classify, diagnose, Disposition};
pub use types::{ClientError, ClientErrorKind};
