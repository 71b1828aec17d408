//! Member queries and resolution

use crate::error::{Error, Result};
use crate::introspect::{short_name, Member, Surface, TypeKey};
use std::fmt;
use tracing::trace;

/// Structural constraints on a member
#[derive(Debug, Clone)]
pub struct MemberQuery<'a> {
    /// Single parameter type, `None` for zero-argument members
    pub param: Option<TypeKey>,
    /// Exact return type
    pub ret: TypeKey,
    /// Allowed names, empty means any name
    pub names: &'a [&'a str],
    /// Names that are never selected
    pub excluded: &'a [&'a str],
}

impl<'a> MemberQuery<'a> {
    /// Query for a zero-argument member returning `ret`
    pub fn returning(ret: TypeKey) -> Self {
        Self {
            param: None,
            ret,
            names: &[],
            excluded: &[],
        }
    }

    /// Require a single parameter of type `param`
    #[must_use]
    pub fn with_param(mut self, param: TypeKey) -> Self {
        self.param = Some(param);
        self
    }

    /// Restrict to these names
    #[must_use]
    pub fn named(mut self, names: &'a [&'a str]) -> Self {
        self.names = names;
        self
    }

    /// Never select these names
    #[must_use]
    pub fn excluding(mut self, excluded: &'a [&'a str]) -> Self {
        self.excluded = excluded;
        self
    }

    /// Whether `member` satisfies every constraint
    pub fn matches(&self, member: &Member) -> bool {
        member.is_public()
            && !self.excluded.contains(&member.name())
            && (self.names.is_empty() || self.names.contains(&member.name()))
            && member.param() == self.param
            && member.return_type() == self.ret
    }
}

impl fmt::Display for MemberQuery<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.names.is_empty() {
            "_".to_string()
        } else {
            self.names.join("|")
        };
        match self.param {
            Some(param) => write!(f, "fn {name}({param}) -> {}", self.ret),
            None => write!(f, "fn {name}() -> {}", self.ret),
        }
    }
}

/// Find at most one member of `owner` matching `query`.
///
/// Returns `Ok(None)` when nothing matches and
/// [`Error::AmbiguousBinding`] when more than one member does.
pub fn find<'s>(owner: &'s Surface, query: &MemberQuery<'_>) -> Result<Option<&'s Member>> {
    let mut matched = owner.members().iter().filter(|m| query.matches(m));

    let Some(first) = matched.next() else {
        trace!(owner = owner.name(), %query, "no member matched");
        return Ok(None);
    };

    let rest: Vec<&Member> = matched.collect();
    if rest.is_empty() {
        trace!(owner = owner.name(), %query, member = first.name(), "member matched");
        return Ok(Some(first));
    }

    let candidates = std::iter::once(first)
        .chain(rest)
        .map(|m| m.name().to_string())
        .collect();
    Err(Error::ambiguous(
        short_name(owner.name()),
        query.to_string(),
        candidates,
    ))
}

/// Resolve exactly one member of `owner` matching `query`
pub fn resolve<'s>(owner: &'s Surface, query: &MemberQuery<'_>) -> Result<&'s Member> {
    find(owner, query)?
        .ok_or_else(|| Error::no_binding(short_name(owner.name()), query.to_string()))
}

/// Resolve against each name tier in turn.
///
/// The first tier with a match wins. An ambiguous tier fails immediately
/// without looking at later tiers. Returns `Ok(None)` when no tier matches.
pub fn resolve_tiered<'s>(
    owner: &'s Surface,
    query: &MemberQuery<'_>,
    tiers: &[&[&str]],
) -> Result<Option<&'s Member>> {
    for names in tiers {
        let tier = query.clone().named(names);
        if let Some(member) = find(owner, &tier)? {
            return Ok(Some(member));
        }
    }
    Ok(None)
}
