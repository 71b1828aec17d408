//! Naming conventions of the two client generations

/// How a client generation names its pagination members.
///
/// `Mutable` clients pair `FooRequest` with `FooResult`, read the token
/// through `get_*` accessors and install it with `set_*` mutators that change
/// the request in place. `Builder` clients pair `FooRequest` with
/// `FooResponse` and install the token with a same-named member that returns
/// a new request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Convention {
    Mutable,
    #[default]
    Builder,
}

const MUTABLE_GETTERS: &[&[&str]] = &[&["get_next_token", "get_marker", "get_next_marker"]];
const MUTABLE_SETTERS: &[&[&str]] = &[&["set_next_token", "set_marker", "set_next_marker"]];
const BUILDER_TOKENS: &[&[&str]] = &[&["next_token", "next_marker"], &["marker"]];
const BUILDER_EXCLUDED: &[&str] = &["sdk_fields", "common_prefixes", "copy"];

impl Convention {
    /// Suffix that replaces `Request` in the result type name
    pub fn result_suffix(self) -> &'static str {
        match self {
            Convention::Mutable => "Result",
            Convention::Builder => "Response",
        }
    }

    /// Name tiers for the token accessor on the result type
    pub fn token_getters(self) -> &'static [&'static [&'static str]] {
        match self {
            Convention::Mutable => MUTABLE_GETTERS,
            Convention::Builder => BUILDER_TOKENS,
        }
    }

    /// Name tiers for the token installer on the request type
    pub fn token_setters(self) -> &'static [&'static [&'static str]] {
        match self {
            Convention::Mutable => MUTABLE_SETTERS,
            Convention::Builder => BUILDER_TOKENS,
        }
    }

    /// Whether the token installer returns a new request instead of
    /// mutating in place
    pub fn setter_returns_request(self) -> bool {
        matches!(self, Convention::Builder)
    }

    /// Whether a result type without any token accessor is treated as a
    /// single-page operation rather than a binding error
    pub fn allows_unpaginated(self) -> bool {
        matches!(self, Convention::Builder)
    }

    /// Member names that are never selected
    pub fn excluded_members(self) -> &'static [&'static str] {
        match self {
            Convention::Mutable => &[],
            Convention::Builder => BUILDER_EXCLUDED,
        }
    }
}
