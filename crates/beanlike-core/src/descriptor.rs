//! Type descriptors — the registered surface of a target type
//!
//! Rust has no runtime reflection, so a type's author lists its members once
//! in a [`TypeDescriptor`]: every public constructor with its parameter
//! types, and every method with its name, parameter types, return type and
//! a closure that performs the call. Everything downstream (discovery by
//! naming convention, validation, the checks themselves) works on this table
//! the way it would work on reflected members.
//!
//! ```ignore
//! let descriptor = TypeDescriptor::<Person>::new("Person")
//!     .constructor(Person::default)
//!     .constructor2(|name: Option<String>, age: i32| Person::new(name, age))
//!     .getter("getName", |p: &Person| p.name.clone())
//!     .setter("setName", |p: &mut Person, name: Option<String>| p.name = name)
//!     .getter("isAdult", |p: &Person| p.age >= 18);
//! ```

use std::any::{Any, TypeId};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::InvocationError;
use crate::value::{PropertyValue, Value};

// ── TypeTag ───────────────────────────────────────────────

/// Runtime identity of a Rust type, with a readable name for messages
#[derive(Debug, Clone, Copy)]
pub struct TypeTag {
    id: TypeId,
    name: &'static str,
}

impl TypeTag {
    pub fn of<T: Any>() -> Self {
        TypeTag {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// Fully qualified type name as reported by the compiler
    pub fn full_name(&self) -> &'static str {
        self.name
    }

    /// Type name with module paths removed: `Option<Vec<String>>`
    pub fn short_name(&self) -> String {
        let mut out = String::with_capacity(self.name.len());
        let mut ident = String::new();
        let mut chars = self.name.chars().peekable();
        while let Some(c) = chars.next() {
            if c == ':' && chars.peek() == Some(&':') {
                chars.next();
                ident.clear();
            } else if c.is_alphanumeric() || c == '_' {
                ident.push(c);
            } else {
                out.push_str(&ident);
                ident.clear();
                out.push(c);
            }
        }
        out.push_str(&ident);
        out
    }

    pub fn is_unit(&self) -> bool {
        self.id == TypeId::of::<()>()
    }

    /// `bool` or `Option<bool>`
    pub fn is_boolean(&self) -> bool {
        self.id == TypeId::of::<bool>() || self.id == TypeId::of::<Option<bool>>()
    }
}

impl PartialEq for TypeTag {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeTag {}

impl Hash for TypeTag {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for TypeTag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TypeTag {
    fn cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(other.name).then_with(|| self.id.cmp(&other.id))
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_name())
    }
}

// ── Signature ─────────────────────────────────────────────

/// Ordered parameter types of a constructor or method
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Signature(Vec<TypeTag>);

impl Signature {
    pub fn new(params: Vec<TypeTag>) -> Self {
        Signature(params)
    }

    /// Signature of a no-argument constructor
    pub fn empty() -> Self {
        Signature(Vec::new())
    }

    pub fn params(&self) -> &[TypeTag] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, tag) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", tag)?;
        }
        write!(f, ")")
    }
}

/// Build a [`Signature`] from a list of types: `signature![String, Vec<String>]`
#[macro_export]
macro_rules! signature {
    () => {
        $crate::descriptor::Signature::empty()
    };
    ($($ty:ty),+ $(,)?) => {
        $crate::descriptor::Signature::new(vec![$($crate::descriptor::TypeTag::of::<$ty>()),+])
    };
}

// ── Arguments ─────────────────────────────────────────────

/// Positional arguments handed to a registered closure
pub struct Arguments {
    values: std::vec::IntoIter<Value>,
    position: usize,
}

impl Arguments {
    /// Check arity against `signature` and wrap the values
    pub fn new(signature: &Signature, values: Vec<Value>) -> Result<Self, InvocationError> {
        if values.len() != signature.len() {
            return Err(InvocationError::Arity {
                expected: signature.len(),
                found: values.len(),
            });
        }
        Ok(Arguments {
            values: values.into_iter(),
            position: 0,
        })
    }

    /// Convert the next argument to `A`
    pub fn next<A: PropertyValue>(&mut self) -> Result<A, InvocationError> {
        let position = self.position;
        self.position += 1;
        let value = self.values.next().ok_or(InvocationError::Arity {
            expected: position + 1,
            found: position,
        })?;
        A::from_value(&value).ok_or_else(|| InvocationError::Argument {
            position,
            expected: TypeTag::of::<A>().short_name(),
            found: value.to_string(),
        })
    }
}

// ── Members ───────────────────────────────────────────────

pub(crate) type ConstructorBody<T> =
    Box<dyn Fn(Vec<Value>) -> Result<T, InvocationError> + Send + Sync>;
pub(crate) type MethodBody<T> =
    Box<dyn Fn(&mut T, Vec<Value>) -> Result<Value, InvocationError> + Send + Sync>;

/// A registered constructor
pub struct Constructor<T> {
    signature: Signature,
    body: ConstructorBody<T>,
}

impl<T> Constructor<T> {
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub(crate) fn call(&self, args: Vec<Value>) -> Result<T, InvocationError> {
        (self.body)(args)
    }
}

impl<T> fmt::Debug for Constructor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constructor")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// A registered method
pub struct Method<T> {
    name: String,
    params: Signature,
    returns: TypeTag,
    body: MethodBody<T>,
}

impl<T> Method<T> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &Signature {
        &self.params
    }

    pub fn returns(&self) -> TypeTag {
        self.returns
    }

    pub(crate) fn call(&self, target: &mut T, args: Vec<Value>) -> Result<Value, InvocationError> {
        (self.body)(target, args)
    }
}

impl<T> fmt::Debug for Method<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Method")
            .field("name", &self.name)
            .field("params", &self.params)
            .field("returns", &self.returns)
            .finish_non_exhaustive()
    }
}

// ── TypeDescriptor ────────────────────────────────────────

/// The constructors and methods of a target type
pub struct TypeDescriptor<T> {
    type_name: String,
    constructors: Vec<Constructor<T>>,
    methods: Vec<Method<T>>,
}

impl<T: 'static> TypeDescriptor<T> {
    pub fn new(type_name: impl Into<String>) -> Self {
        TypeDescriptor {
            type_name: type_name.into(),
            constructors: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Constructors in registration order
    pub fn constructors(&self) -> &[Constructor<T>] {
        &self.constructors
    }

    /// Methods in registration order
    pub fn methods(&self) -> &[Method<T>] {
        &self.methods
    }

    /// Register a constructor taking raw positional values.
    ///
    /// Arity is checked against `signature` before `body` runs.
    pub fn raw_constructor<F>(mut self, signature: Signature, body: F) -> Self
    where
        F: Fn(&mut Arguments) -> Result<T, InvocationError> + Send + Sync + 'static,
    {
        let sig = signature.clone();
        self.constructors.push(Constructor {
            signature,
            body: Box::new(move |values| {
                let mut args = Arguments::new(&sig, values)?;
                body(&mut args)
            }),
        });
        self
    }

    /// Register the no-argument constructor
    pub fn constructor<F>(self, f: F) -> Self
    where
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.raw_constructor(Signature::empty(), move |_| Ok(f()))
    }

    pub fn constructor1<A, F>(self, f: F) -> Self
    where
        A: PropertyValue,
        F: Fn(A) -> T + Send + Sync + 'static,
    {
        self.raw_constructor(crate::signature![A], move |args| Ok(f(args.next()?)))
    }

    pub fn constructor2<A, B, F>(self, f: F) -> Self
    where
        A: PropertyValue,
        B: PropertyValue,
        F: Fn(A, B) -> T + Send + Sync + 'static,
    {
        self.raw_constructor(crate::signature![A, B], move |args| {
            let a = args.next()?;
            let b = args.next()?;
            Ok(f(a, b))
        })
    }

    pub fn constructor3<A, B, C, F>(self, f: F) -> Self
    where
        A: PropertyValue,
        B: PropertyValue,
        C: PropertyValue,
        F: Fn(A, B, C) -> T + Send + Sync + 'static,
    {
        self.raw_constructor(crate::signature![A, B, C], move |args| {
            let a = args.next()?;
            let b = args.next()?;
            let c = args.next()?;
            Ok(f(a, b, c))
        })
    }

    pub fn constructor4<A, B, C, D, F>(self, f: F) -> Self
    where
        A: PropertyValue,
        B: PropertyValue,
        C: PropertyValue,
        D: PropertyValue,
        F: Fn(A, B, C, D) -> T + Send + Sync + 'static,
    {
        self.raw_constructor(crate::signature![A, B, C, D], move |args| {
            let a = args.next()?;
            let b = args.next()?;
            let c = args.next()?;
            let d = args.next()?;
            Ok(f(a, b, c, d))
        })
    }

    /// Register a method with an explicit shape.
    ///
    /// Use this for members the typed helpers cannot express, such as
    /// fallible calls or methods taking several parameters.
    pub fn method<F>(mut self, name: impl Into<String>, params: Signature, returns: TypeTag, body: F) -> Self
    where
        F: Fn(&mut T, &mut Arguments) -> Result<Value, InvocationError> + Send + Sync + 'static,
    {
        let sig = params.clone();
        self.methods.push(Method {
            name: name.into(),
            params,
            returns,
            body: Box::new(move |target, values| {
                let mut args = Arguments::new(&sig, values)?;
                body(target, &mut args)
            }),
        });
        self
    }

    /// Register a zero-parameter method reading `&T`
    pub fn getter<R, F>(self, name: impl Into<String>, f: F) -> Self
    where
        R: PropertyValue,
        F: Fn(&T) -> R + Send + Sync + 'static,
    {
        self.method(name, Signature::empty(), TypeTag::of::<R>(), move |target, _| {
            Ok(f(&*target).into_value())
        })
    }

    /// Register a single-parameter method returning nothing
    pub fn setter<A, F>(self, name: impl Into<String>, f: F) -> Self
    where
        A: PropertyValue,
        F: Fn(&mut T, A) + Send + Sync + 'static,
    {
        self.method1(name, f)
    }

    /// Register a single-parameter method with any return type
    pub fn method1<A, R, F>(self, name: impl Into<String>, f: F) -> Self
    where
        A: PropertyValue,
        R: PropertyValue,
        F: Fn(&mut T, A) -> R + Send + Sync + 'static,
    {
        self.method(name, crate::signature![A], TypeTag::of::<R>(), move |target, args| {
            let a = args.next()?;
            Ok(f(target, a).into_value())
        })
    }
}

impl<T> fmt::Debug for TypeDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("type_name", &self.type_name)
            .field("constructors", &self.constructors)
            .field("methods", &self.methods)
            .finish()
    }
}
