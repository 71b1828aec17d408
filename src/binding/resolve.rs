//! Binding resolution and the resolved binding

use super::convention::Convention;
use crate::error::{Error, Result};
use crate::introspect::{
    counterpart_name, short_name, Introspect, Member, ServiceClient, Surface, TypeCatalog,
    TypeKey, Value,
};
use crate::resolver::{resolve, resolve_tiered, MemberQuery};
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use tracing::debug;

/// The four operations that drive one pagination loop
pub struct PaginationBinding<Req, T> {
    convention: Convention,
    result_type: TypeKey,
    invoke: Member,
    extract_items: Member,
    get_token: Option<Member>,
    set_token: Option<Member>,
    _marker: PhantomData<fn(Req) -> T>,
}

/// Resolve the pagination binding for client `C`, request `Req` and item `T`.
///
/// The result type is found by name: `Req`'s type name with its trailing
/// `Request` replaced by the convention's suffix, looked up among the model
/// types `C` registers. All four operations are resolved here, before any
/// remote call is made.
pub fn bind<C, Req, T>() -> Result<PaginationBinding<Req, T>>
where
    C: ServiceClient,
    Req: Introspect + Clone,
    T: Any,
{
    let convention = C::CONVENTION;
    let suffix = convention.result_suffix();
    let excluded = convention.excluded_members();
    let catalog = TypeCatalog::for_client::<C>();

    let request_name = Req::type_name();
    let expected = counterpart_name(request_name, suffix)
        .unwrap_or_else(|| format!("{request_name}{suffix}"));
    let result = catalog
        .get(&expected)
        .ok_or_else(|| Error::ResultTypeNotFound {
            request: short_name(request_name),
            expected: short_name(&expected),
        })?;

    let client = Surface::of::<C>();
    let request = Surface::of::<Req>();

    let invoke_query = MemberQuery::returning(result.key())
        .with_param(TypeKey::of::<Req>())
        .excluding(excluded);
    let invoke = resolve(&client, &invoke_query)?.clone();

    let items_query = MemberQuery::returning(TypeKey::of::<Vec<T>>()).excluding(excluded);
    let extract_items = resolve(result, &items_query)?.clone();

    let getters = convention.token_getters();
    let getter_query = MemberQuery::returning(TypeKey::of::<Option<String>>()).excluding(excluded);
    let get_token = resolve_tiered(result, &getter_query, getters)?.cloned();

    if get_token.is_none() && !convention.allows_unpaginated() {
        let names = getters.concat();
        return Err(Error::no_binding(
            short_name(result.name()),
            getter_query.named(&names).to_string(),
        ));
    }

    let set_token = match get_token {
        Some(_) => {
            let ret = if convention.setter_returns_request() {
                TypeKey::of::<Req>()
            } else {
                TypeKey::unit()
            };
            let setters = convention.token_setters();
            let setter_query = MemberQuery::returning(ret)
                .with_param(TypeKey::of::<String>())
                .excluding(excluded);
            let setter = resolve_tiered(&request, &setter_query, setters)?.ok_or_else(|| {
                let names = setters.concat();
                Error::no_binding(
                    short_name(request.name()),
                    setter_query.clone().named(&names).to_string(),
                )
            })?;
            Some(setter.clone())
        }
        None => None,
    };

    debug!(
        client = %client.key(),
        request = %request.key(),
        result = %result.key(),
        invoke = invoke.name(),
        items = extract_items.name(),
        token = get_token.as_ref().map_or("-", Member::name),
        "Resolved pagination binding"
    );

    Ok(PaginationBinding {
        convention,
        result_type: result.key(),
        invoke,
        extract_items,
        get_token,
        set_token,
        _marker: PhantomData,
    })
}

impl<Req, T> PaginationBinding<Req, T>
where
    Req: Any + Clone,
    T: Any,
{
    /// Call the list operation on `client`
    pub fn invoke<C: Any>(&self, client: &C, request: &Req) -> Result<Value> {
        self.invoke.call(client, Some(Box::new(request.clone())))
    }

    /// Read the items out of a result
    pub fn extract_items(&self, result: &dyn Any) -> Result<Vec<T>> {
        let value = self.extract_items.call(result, None)?;
        value
            .downcast::<Vec<T>>()
            .map(|items| *items)
            .map_err(|_| mismatch::<Vec<T>>(&self.extract_items))
    }

    /// Read the continuation token out of a result.
    ///
    /// An empty token is treated as absent.
    pub fn next_token(&self, result: &dyn Any) -> Result<Option<String>> {
        let Some(getter) = &self.get_token else {
            return Ok(None);
        };
        let value = getter.call(result, None)?;
        let token = value
            .downcast::<Option<String>>()
            .map_err(|_| mismatch::<Option<String>>(getter))?;
        Ok(token.filter(|t| !t.is_empty()))
    }

    /// Install `token` on `request`, producing the request for the next page
    pub fn set_token(&self, mut request: Req, token: String) -> Result<Req> {
        let Some(setter) = &self.set_token else {
            return Err(Error::no_binding(
                short_name(std::any::type_name::<Req>()),
                "a continuation token installer",
            ));
        };

        if setter.return_type() == TypeKey::unit() {
            setter.call_mut(&mut request, Some(Box::new(token)))?;
            return Ok(request);
        }

        let value = setter.call(&request, Some(Box::new(token)))?;
        value
            .downcast::<Req>()
            .map(|next| *next)
            .map_err(|_| mismatch::<Req>(setter))
    }
}

impl<Req, T> PaginationBinding<Req, T> {
    pub fn convention(&self) -> Convention {
        self.convention
    }

    pub fn result_type(&self) -> TypeKey {
        self.result_type
    }

    /// Whether the operation carries a continuation token at all
    pub fn is_paginated(&self) -> bool {
        self.get_token.is_some()
    }

    pub fn invoke_member(&self) -> &Member {
        &self.invoke
    }

    pub fn items_member(&self) -> &Member {
        &self.extract_items
    }

    pub fn token_getter(&self) -> Option<&Member> {
        self.get_token.as_ref()
    }

    pub fn token_setter(&self) -> Option<&Member> {
        self.set_token.as_ref()
    }
}

impl<Req, T> fmt::Debug for PaginationBinding<Req, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PaginationBinding")
            .field("convention", &self.convention)
            .field("result_type", &self.result_type)
            .field("invoke", &self.invoke.name())
            .field("extract_items", &self.extract_items.name())
            .field("get_token", &self.get_token.as_ref().map(Member::name))
            .field("set_token", &self.set_token.as_ref().map(Member::name))
            .finish()
    }
}

fn mismatch<E>(member: &Member) -> Error {
    Error::signature(member.name(), short_name(std::any::type_name::<E>()))
}
