//! Member and type key definitions

use crate::classify::ClientError;
use crate::error::{Error, Result};
use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Type-erased value passed into and out of member bodies
pub type Value = Box<dyn Any>;

/// Identity of a Rust type plus its name for diagnostics
#[derive(Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// Key for `T`
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Key for the unit type, the return type of in-place setters
    pub fn unit() -> Self {
        Self::of::<()>()
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&short_name(self.name))
    }
}

/// Strip module paths from a type name, including inside generic arguments.
///
/// `alloc::vec::Vec<my_crate::Thing>` becomes `Vec<Thing>`.
pub fn short_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut segment = String::new();
    let mut chars = name.chars().peekable();

    while let Some(c) = chars.next() {
        if c == ':' && chars.peek() == Some(&':') {
            chars.next();
            segment.clear();
        } else if c.is_alphanumeric() || c == '_' {
            segment.push(c);
        } else {
            out.push_str(&segment);
            segment.clear();
            out.push(c);
        }
    }
    out.push_str(&segment);
    out
}

/// Whether a member may be selected by the resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

type SharedBody = Arc<dyn Fn(&dyn Any, Option<Value>) -> Result<Value> + Send + Sync>;
type ExclusiveBody = Arc<dyn Fn(&mut dyn Any, Option<Value>) -> Result<Value> + Send + Sync>;

#[derive(Clone)]
enum Body {
    /// Reads the receiver
    Shared(SharedBody),
    /// Mutates the receiver in place
    Exclusive(ExclusiveBody),
}

/// One callable member of an introspectable type
#[derive(Clone)]
pub struct Member {
    name: &'static str,
    visibility: Visibility,
    receiver: TypeKey,
    param: Option<TypeKey>,
    ret: TypeKey,
    body: Body,
}

impl Member {
    /// A zero-argument accessor
    pub fn getter<O, R, F>(name: &'static str, f: F) -> Self
    where
        O: Any,
        R: Any,
        F: Fn(&O) -> R + Send + Sync + 'static,
    {
        let body = shared(move |receiver, _arg| {
            let receiver = downcast_receiver::<O>(name, receiver)?;
            Ok(Box::new(f(receiver)) as Value)
        });
        Self::build::<O, R>(name, None, body)
    }

    /// A one-argument member that cannot fail, such as a builder-style setter
    pub fn function<O, P, R, F>(name: &'static str, f: F) -> Self
    where
        O: Any,
        P: Any,
        R: Any,
        F: Fn(&O, P) -> R + Send + Sync + 'static,
    {
        let body = shared(move |receiver, arg| {
            let receiver = downcast_receiver::<O>(name, receiver)?;
            let arg = downcast_arg::<P>(name, arg)?;
            Ok(Box::new(f(receiver, arg)) as Value)
        });
        Self::build::<O, R>(name, Some(TypeKey::of::<P>()), body)
    }

    /// A one-argument remote operation
    pub fn method<O, P, R, F>(name: &'static str, f: F) -> Self
    where
        O: Any,
        P: Any,
        R: Any,
        F: Fn(&O, P) -> std::result::Result<R, ClientError> + Send + Sync + 'static,
    {
        let body = shared(move |receiver, arg| {
            let receiver = downcast_receiver::<O>(name, receiver)?;
            let arg = downcast_arg::<P>(name, arg)?;
            let value = f(receiver, arg)?;
            Ok(Box::new(value) as Value)
        });
        Self::build::<O, R>(name, Some(TypeKey::of::<P>()), body)
    }

    /// A one-argument mutator returning nothing
    pub fn setter<O, P, F>(name: &'static str, f: F) -> Self
    where
        O: Any,
        P: Any,
        F: Fn(&mut O, P) + Send + Sync + 'static,
    {
        let body = exclusive(move |receiver, arg| {
            let receiver = receiver
                .downcast_mut::<O>()
                .ok_or_else(|| Error::signature(name, short_name(std::any::type_name::<O>())))?;
            let arg = downcast_arg::<P>(name, arg)?;
            f(receiver, arg);
            Ok(Box::new(()) as Value)
        });
        Self::build::<O, ()>(name, Some(TypeKey::of::<P>()), body)
    }

    fn build<O: Any, R: Any>(name: &'static str, param: Option<TypeKey>, body: Body) -> Self {
        Self {
            name,
            visibility: Visibility::Public,
            receiver: TypeKey::of::<O>(),
            param,
            ret: TypeKey::of::<R>(),
            body,
        }
    }

    /// Hide this member from the resolver
    #[must_use]
    pub fn private(mut self) -> Self {
        self.visibility = Visibility::Private;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    pub fn receiver(&self) -> TypeKey {
        self.receiver
    }

    pub fn param(&self) -> Option<TypeKey> {
        self.param
    }

    pub fn return_type(&self) -> TypeKey {
        self.ret
    }

    /// Whether calling this member requires a mutable receiver
    pub fn mutates_receiver(&self) -> bool {
        matches!(self.body, Body::Exclusive(_))
    }

    /// Call the member on a shared receiver
    pub fn call(&self, receiver: &dyn Any, arg: Option<Value>) -> Result<Value> {
        match &self.body {
            Body::Shared(f) => f(receiver, arg),
            Body::Exclusive(_) => Err(Error::signature(
                self.name,
                format!("&mut {}", self.receiver),
            )),
        }
    }

    /// Call the member on a mutable receiver
    pub fn call_mut(&self, receiver: &mut dyn Any, arg: Option<Value>) -> Result<Value> {
        match &self.body {
            Body::Shared(f) => f(&*receiver, arg),
            Body::Exclusive(f) => f(receiver, arg),
        }
    }
}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Member")
            .field("name", &self.name)
            .field("visibility", &self.visibility)
            .field("signature", &self.to_string())
            .finish()
    }
}

impl fmt::Display for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let receiver = if self.mutates_receiver() { "&mut self" } else { "&self" };
        match self.param {
            Some(param) => write!(f, "fn {}({receiver}, {param}) -> {}", self.name, self.ret),
            None => write!(f, "fn {}({receiver}) -> {}", self.name, self.ret),
        }
    }
}

fn shared<F>(f: F) -> Body
where
    F: Fn(&dyn Any, Option<Value>) -> Result<Value> + Send + Sync + 'static,
{
    Body::Shared(Arc::new(f))
}

fn exclusive<F>(f: F) -> Body
where
    F: Fn(&mut dyn Any, Option<Value>) -> Result<Value> + Send + Sync + 'static,
{
    Body::Exclusive(Arc::new(f))
}

fn downcast_receiver<'a, O: Any>(member: &str, receiver: &'a dyn Any) -> Result<&'a O> {
    receiver
        .downcast_ref::<O>()
        .ok_or_else(|| Error::signature(member, short_name(std::any::type_name::<O>())))
}

fn downcast_arg<P: Any>(member: &str, arg: Option<Value>) -> Result<P> {
    let expected = || Error::signature(member, short_name(std::any::type_name::<P>()));
    let arg = arg.ok_or_else(expected)?;
    arg.downcast::<P>().map(|boxed| *boxed).map_err(|_| expected())
}
