//! Test fixtures: correct and deliberately broken target types
//!
//! Property names follow the camel-case accessor convention so the same
//! property maps work for every bean and bean-like type here.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Once;

use crate::descriptor::TypeDescriptor;
use crate::error::InvocationError;
use crate::registry::ConstructorMapping;
use crate::signature;
use crate::value::{PropertyMap, Value};
use crate::value_object::{equals_by_eq, equals_by_identity, ValueObject};

static INIT_LOGGING: Once = Once::new();

/// Route `tracing` output to the test writer; the first call wins.
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .with_target(true)
            .with_ansi(false)
            .try_init();
    });
}

// ── ValidBean ─────────────────────────────────────────────

/// A setter-only bean covering optional, primitive, list and read-only properties
#[derive(Debug, Clone, PartialEq, Hash)]
pub struct ValidBean {
    a_string: Option<String>,
    a_string_with_value: Option<String>,
    a_list_of_string: Option<Vec<String>>,
    an_int: i32,
    an_integer: Option<i32>,
    a_boolean: Option<bool>,
    an_array: Option<Vec<String>>,
    an_array_of_primitives: Option<Vec<i32>>,
    an_array_with_values: Option<Vec<String>>,
    a_boolean_primitive: bool,
    a_read_only_property: i32,
    another_read_only_property: Option<i32>,
}

impl Default for ValidBean {
    fn default() -> Self {
        ValidBean {
            a_string: None,
            a_string_with_value: Some("aValue".into()),
            a_list_of_string: None,
            an_int: 0,
            an_integer: None,
            a_boolean: None,
            an_array: None,
            an_array_of_primitives: None,
            an_array_with_values: Some(vec!["default1".into(), "default2".into(), "default3".into()]),
            a_boolean_primitive: false,
            a_read_only_property: i32::MAX,
            another_read_only_property: None,
        }
    }
}

impl fmt::Display for ValidBean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ValidBean [aString={:?}, aStringWithValue={:?}, aListOfString={:?}, anInt={}, anInteger={:?}, \
             aBoolean={:?}, anArray={:?}, anArrayOfPrimitives={:?}, anArrayWithValues={:?}, \
             aBooleanPrimitive={}, aReadOnlyProperty={}, anotherReadOnlyProperty={:?}]",
            self.a_string,
            self.a_string_with_value,
            self.a_list_of_string,
            self.an_int,
            self.an_integer,
            self.a_boolean,
            self.an_array,
            self.an_array_of_primitives,
            self.an_array_with_values,
            self.a_boolean_primitive,
            self.a_read_only_property,
            self.another_read_only_property,
        )
    }
}

crate::value_object!(ValidBean);

pub fn valid_bean() -> TypeDescriptor<ValidBean> {
    TypeDescriptor::new("ValidBean")
        .constructor(ValidBean::default)
        .getter("getAString", |b: &ValidBean| b.a_string.clone())
        .setter("setAString", |b: &mut ValidBean, v: Option<String>| b.a_string = v)
        .getter("getAStringWithValue", |b: &ValidBean| b.a_string_with_value.clone())
        .setter("setAStringWithValue", |b: &mut ValidBean, v: Option<String>| {
            b.a_string_with_value = v
        })
        .getter("getAListOfString", |b: &ValidBean| b.a_list_of_string.clone())
        .setter("setAListOfString", |b: &mut ValidBean, v: Option<Vec<String>>| {
            b.a_list_of_string = v
        })
        .getter("getAnInt", |b: &ValidBean| b.an_int)
        .setter("setAnInt", |b: &mut ValidBean, v: i32| b.an_int = v)
        .getter("getAnInteger", |b: &ValidBean| b.an_integer)
        .setter("setAnInteger", |b: &mut ValidBean, v: Option<i32>| b.an_integer = v)
        .getter("isABoolean", |b: &ValidBean| b.a_boolean)
        .setter("setABoolean", |b: &mut ValidBean, v: Option<bool>| b.a_boolean = v)
        .getter("getAnArray", |b: &ValidBean| b.an_array.clone())
        .setter("setAnArray", |b: &mut ValidBean, v: Option<Vec<String>>| b.an_array = v)
        .getter("getAnArrayOfPrimitives", |b: &ValidBean| b.an_array_of_primitives.clone())
        .setter("setAnArrayOfPrimitives", |b: &mut ValidBean, v: Option<Vec<i32>>| {
            b.an_array_of_primitives = v
        })
        .getter("getAnArrayWithValues", |b: &ValidBean| b.an_array_with_values.clone())
        .setter("setAnArrayWithValues", |b: &mut ValidBean, v: Option<Vec<String>>| {
            b.an_array_with_values = v
        })
        .getter("isABooleanPrimitive", |b: &ValidBean| b.a_boolean_primitive)
        .setter("setABooleanPrimitive", |b: &mut ValidBean, v: bool| b.a_boolean_primitive = v)
        .getter("getAReadOnlyProperty", |b: &ValidBean| b.a_read_only_property)
        .getter("getAnotherReadOnlyProperty", |b: &ValidBean| b.another_read_only_property)
}

/// `getAnInt` does not report the initial value
pub fn bean_with_wrong_default() -> TypeDescriptor<ValidBean> {
    valid_bean().getter("getAnInt", |b: &ValidBean| b.an_int + 1)
}

/// `getAnInt` ignores what the setter stored
pub fn bean_with_stale_accessor() -> TypeDescriptor<ValidBean> {
    valid_bean().getter("getAnInt", |_: &ValidBean| 0)
}

/// A bean whose `getAString` panics
pub fn bean_with_panicking_accessor() -> TypeDescriptor<ValidBean> {
    valid_bean().getter("getAString", |_: &ValidBean| -> Option<String> {
        panic!("accessor exploded")
    })
}

pub fn valid_bean_defaults() -> PropertyMap {
    PropertyMap::new()
        .with("aString", None::<String>)
        .with("aStringWithValue", "aValue")
        .with("aListOfString", Value::Null)
        .with("anInt", 0)
        .with("anInteger", None::<i32>)
        .with("aBoolean", None::<bool>)
        .with("anArray", Value::Null)
        .with("anArrayOfPrimitives", Value::Null)
        .with("anArrayWithValues", vec!["default1", "default2", "default3"])
        .with("aBooleanPrimitive", false)
        .with("aReadOnlyProperty", i32::MAX)
        .with("anotherReadOnlyProperty", Value::Null)
}

pub fn valid_bean_values() -> PropertyMap {
    PropertyMap::new()
        .with("aString", "anotherValue")
        .with("aStringWithValue", "anotherValue")
        .with("aListOfString", Vec::<String>::new())
        .with("anInt", 10)
        .with("anInteger", 11)
        .with("aBoolean", false)
        .with("anArray", vec!["new A", "new B", "new C"])
        .with("anArrayOfPrimitives", vec![1, 2, 3])
        .with("anArrayWithValues", vec!["new 1", "new 2", "new 3"])
        .with("aBooleanPrimitive", true)
}

pub fn valid_bean_other_values() -> PropertyMap {
    PropertyMap::new()
        .with("aString", "anotherValue")
        .with("aStringWithValue", Value::Null)
        .with("aListOfString", vec!["anElt"])
        .with("anInt", -10)
        .with("anInteger", -11)
        .with("aBoolean", true)
        .with("anArray", vec!["other A", "other B", "other C"])
        .with("anArrayOfPrimitives", vec![100, 200, 300])
        .with("anArrayWithValues", vec!["other 1", "other 2", "other 3"])
        .with("aBooleanPrimitive", true)
}

// ── Bean-likes ────────────────────────────────────────────

/// Constructors plus setters plus read-only properties
#[derive(Debug, Clone, PartialEq, Hash)]
pub struct ValidBeanLike {
    a_string: Option<String>,
    a_list_of_string: Option<Vec<String>>,
    an_int: i32,
    an_integer: Option<i32>,
    a_boolean: Option<bool>,
    a_boolean_primitive: bool,
    a_read_only_property: i32,
    another_read_only_property: Option<i32>,
}

impl ValidBeanLike {
    fn new(a_string: Option<String>, a_list_of_string: Option<Vec<String>>) -> Self {
        ValidBeanLike {
            a_string,
            a_list_of_string,
            an_int: 0,
            an_integer: None,
            a_boolean: None,
            a_boolean_primitive: false,
            a_read_only_property: i32::MAX,
            another_read_only_property: None,
        }
    }
}

impl fmt::Display for ValidBeanLike {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ValidBeanLike [aString={:?}, aListOfString={:?}, anInt={}, anInteger={:?}, aBoolean={:?}, aBooleanPrimitive={}]",
            self.a_string, self.a_list_of_string, self.an_int, self.an_integer, self.a_boolean, self.a_boolean_primitive
        )
    }
}

crate::value_object!(ValidBeanLike);

fn bean_like_constructors() -> TypeDescriptor<ValidBeanLike> {
    TypeDescriptor::new("ValidBeanLike")
        .constructor2(|s: Option<String>, l: Option<Vec<String>>| ValidBeanLike::new(s, l))
        .constructor2(|l: Option<Vec<String>>, s: Option<String>| ValidBeanLike::new(s, l))
        .constructor4(
            |s: Option<String>, l: Option<Vec<String>>, an_int: i32, an_integer: Option<i32>| ValidBeanLike {
                an_int,
                an_integer,
                ..ValidBeanLike::new(s, l)
            },
        )
        .getter("getAString", |b: &ValidBeanLike| b.a_string.clone())
        .getter("getAnInt", |b: &ValidBeanLike| b.an_int)
        .setter("setAnInt", |b: &mut ValidBeanLike, v: i32| b.an_int = v)
        .getter("getAnInteger", |b: &ValidBeanLike| b.an_integer)
        .setter("setAnInteger", |b: &mut ValidBeanLike, v: Option<i32>| b.an_integer = v)
        .setter("setABoolean", |b: &mut ValidBeanLike, v: Option<bool>| b.a_boolean = v)
        .getter("isABooleanPrimitive", |b: &ValidBeanLike| b.a_boolean_primitive)
        .setter("setABooleanPrimitive", |b: &mut ValidBeanLike, v: bool| b.a_boolean_primitive = v)
        .getter("getAReadOnlyProperty", |b: &ValidBeanLike| b.a_read_only_property)
        .getter("getAnotherReadOnlyProperty", |b: &ValidBeanLike| b.another_read_only_property)
}

pub fn valid_bean_like() -> TypeDescriptor<ValidBeanLike> {
    bean_like_constructors()
        .getter("getAListOfString", |b: &ValidBeanLike| b.a_list_of_string.clone())
        .getter("isABoolean", |b: &ValidBeanLike| b.a_boolean)
}

/// Neither `aListOfString` nor `aBoolean` can be read back
pub fn bean_like_with_missing_getters() -> TypeDescriptor<ValidBeanLike> {
    bean_like_constructors()
}

pub fn bean_like_mapping() -> ConstructorMapping {
    ConstructorMapping::new()
        .with(signature![Option<String>, Option<Vec<String>>], ["aString", "aListOfString"])
        .with(signature![Option<Vec<String>>, Option<String>], ["aListOfString", "aString"])
        .with(
            signature![Option<String>, Option<Vec<String>>, i32, Option<i32>],
            ["aString", "aListOfString", "anInt", "anInteger"],
        )
}

pub fn bean_like_defaults() -> PropertyMap {
    PropertyMap::new()
        .with("aString", Value::Null)
        .with("aListOfString", Value::Null)
        .with("anInt", 0)
        .with("anInteger", Value::Null)
        .with("aBoolean", Value::Null)
        .with("aBooleanPrimitive", false)
        .with("aReadOnlyProperty", i32::MAX)
        .with("anotherReadOnlyProperty", Value::Null)
}

pub fn bean_like_other_values() -> PropertyMap {
    PropertyMap::new()
        .with("aString", "aNewString")
        .with("aListOfString", Vec::<String>::new())
        .with("anInt", 3)
        .with("anInteger", 5)
        .with("aBoolean", true)
        .with("aBooleanPrimitive", true)
}

// ── Immutable and constant objects ────────────────────────

/// Only constructors set properties; each covers a different subset
#[derive(Debug, Clone, Default, PartialEq, Hash)]
pub struct ImmutableObject {
    a_string: Option<String>,
    a_list_of_string: Option<Vec<String>>,
    an_int: i32,
    an_integer: Option<i32>,
}

impl fmt::Display for ImmutableObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ImmutableObject [aString={:?}, aListOfString={:?}, anInt={}, anInteger={:?}]",
            self.a_string, self.a_list_of_string, self.an_int, self.an_integer
        )
    }
}

crate::value_object!(ImmutableObject);

pub fn immutable_object() -> TypeDescriptor<ImmutableObject> {
    TypeDescriptor::new("ImmutableObject")
        .constructor2(|a_string: Option<String>, a_list_of_string: Option<Vec<String>>| ImmutableObject {
            a_string,
            a_list_of_string,
            ..ImmutableObject::default()
        })
        .constructor1(|an_int: i32| ImmutableObject {
            an_int,
            ..ImmutableObject::default()
        })
        .constructor1(|an_integer: Option<i32>| ImmutableObject {
            an_integer,
            ..ImmutableObject::default()
        })
        .getter("getAString", |o: &ImmutableObject| o.a_string.clone())
        .getter("getAListOfString", |o: &ImmutableObject| o.a_list_of_string.clone())
        .getter("getAnInt", |o: &ImmutableObject| o.an_int)
        .getter("getAnInteger", |o: &ImmutableObject| o.an_integer)
        .getter("isABooleanPrimitive", |_: &ImmutableObject| false)
        .getter("isABoolean", |_: &ImmutableObject| None::<bool>)
        .getter("getAReadOnlyProperty", |_: &ImmutableObject| i32::MAX)
        .getter("getAnotherReadOnlyProperty", |_: &ImmutableObject| None::<i32>)
}

pub fn immutable_mapping() -> ConstructorMapping {
    ConstructorMapping::new()
        .with(signature![Option<String>, Option<Vec<String>>], ["aString", "aListOfString"])
        .with(signature![i32], ["anInt"])
        .with(signature![Option<i32>], ["anInteger"])
}

/// Nothing can change; every property is a constant
#[derive(Debug, Default, PartialEq, Hash)]
pub struct ConstantObject;

impl fmt::Display for ConstantObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConstantObject")
    }
}

crate::value_object!(ConstantObject);

pub fn constant_object() -> TypeDescriptor<ConstantObject> {
    TypeDescriptor::new("ConstantObject")
        .constructor(|| ConstantObject)
        .getter("getAString", |_: &ConstantObject| None::<String>)
        .getter("getAListOfString", |_: &ConstantObject| None::<Vec<String>>)
        .getter("getAnInt", |_: &ConstantObject| 0)
        .getter("getAnInteger", |_: &ConstantObject| None::<i32>)
        .getter("isABooleanPrimitive", |_: &ConstantObject| false)
        .getter("isABoolean", |_: &ConstantObject| None::<bool>)
        .getter("getAReadOnlyProperty", |_: &ConstantObject| i32::MAX)
        .getter("getAnotherReadOnlyProperty", |_: &ConstantObject| None::<i32>)
}

// ── Shape problems ────────────────────────────────────────

#[derive(Debug, Default)]
pub struct Sketch {
    a_string: Option<String>,
    a_boolean: Option<bool>,
}

fn sketch() -> TypeDescriptor<Sketch> {
    TypeDescriptor::new("Sketch")
        .constructor(Sketch::default)
        .getter("getAString", |s: &Sketch| s.a_string.clone())
}

/// `aBoolean` has a setter but no accessor
pub fn bean_with_missing_getter() -> TypeDescriptor<Sketch> {
    sketch().setter("setABoolean", |s: &mut Sketch, v: Option<bool>| s.a_boolean = v)
}

pub fn bean_with_accessor_returning_nothing() -> TypeDescriptor<Sketch> {
    sketch().getter("getNothing", |_: &Sketch| ())
}

pub fn bean_with_boolean_accessor_returning_text() -> TypeDescriptor<Sketch> {
    sketch().getter("isShouldBeABoolean", |_: &Sketch| "yes".to_string())
}

pub fn bean_with_setter_returning_a_value() -> TypeDescriptor<Sketch> {
    sketch().method1("setAString", |s: &mut Sketch, v: Option<String>| {
        s.a_string = v.clone();
        v
    })
}

/// The only constructor always fails
pub fn bean_with_failing_constructor() -> TypeDescriptor<Sketch> {
    TypeDescriptor::new("Sketch")
        .raw_constructor(signature![], |_| Err(InvocationError::failed("out of sketches")))
        .getter("getAString", |s: &Sketch| s.a_string.clone())
}

// ── Probe: value semantics with a chosen flaw ─────────────

/// Which part of the value contract a [`Probe`] gets wrong
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flaw {
    Sound,
    NotEqualToItself,
    EqualToNothing,
    EqualToForeignTypes,
    /// Equal only to the same instance
    StrictIdentity,
    EqualsIgnoresInteger,
    HashIgnoresInteger,
    /// Hash code taken from the address
    IdentityHash,
    DisplayIgnoresInteger,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Probe {
    a_string: Option<String>,
    a_list_of_string: Option<Vec<String>>,
    an_integer: Option<i32>,
    flaw: Flaw,
}

impl Hash for Probe {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.a_string.hash(state);
        self.a_list_of_string.hash(state);
        if self.flaw != Flaw::HashIgnoresInteger {
            self.an_integer.hash(state);
        }
    }
}

impl fmt::Display for Probe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Probe [aString={:?}, aListOfString={:?}", self.a_string, self.a_list_of_string)?;
        if self.flaw != Flaw::DisplayIgnoresInteger {
            write!(f, ", anInteger={:?}", self.an_integer)?;
        }
        write!(f, "]")
    }
}

impl ValueObject for Probe {
    fn equals(&self, other: Option<&dyn Any>) -> bool {
        match self.flaw {
            Flaw::NotEqualToItself => false,
            Flaw::EqualToNothing if other.is_none() => true,
            Flaw::EqualToForeignTypes if other.is_some_and(|o| !o.is::<Probe>()) => true,
            Flaw::StrictIdentity => equals_by_identity(self, other),
            Flaw::EqualsIgnoresInteger => other
                .and_then(|o| o.downcast_ref::<Probe>())
                .is_some_and(|o| self.a_string == o.a_string && self.a_list_of_string == o.a_list_of_string),
            _ => equals_by_eq(self, other),
        }
    }

    fn hash_code(&self) -> u64 {
        match self.flaw {
            Flaw::IdentityHash => self as *const Probe as usize as u64,
            _ => crate::hashing::stable_hash(self),
        }
    }
}

pub fn probe(flaw: Flaw) -> TypeDescriptor<Probe> {
    TypeDescriptor::new("Probe")
        .constructor(move || Probe {
            a_string: None,
            a_list_of_string: None,
            an_integer: None,
            flaw,
        })
        .getter("getAString", |p: &Probe| p.a_string.clone())
        .setter("setAString", |p: &mut Probe, v: Option<String>| p.a_string = v)
        .getter("getAListOfString", |p: &Probe| p.a_list_of_string.clone())
        .setter("setAListOfString", |p: &mut Probe, v: Option<Vec<String>>| p.a_list_of_string = v)
        .getter("getAnInteger", |p: &Probe| p.an_integer)
        .setter("setAnInteger", |p: &mut Probe, v: Option<i32>| p.an_integer = v)
}

pub fn probe_defaults() -> PropertyMap {
    PropertyMap::new()
        .with("aString", Value::Null)
        .with("aListOfString", Value::Null)
        .with("anInteger", Value::Null)
}

pub fn probe_other_values() -> PropertyMap {
    PropertyMap::new()
        .with("aString", "aValue")
        .with("aListOfString", Vec::<String>::new())
        .with("anInteger", -1)
}

// ── Toggle: two setter-only properties ────────────────────

#[derive(Debug, Clone, PartialEq, Hash)]
pub struct Toggle {
    name: String,
    active: bool,
}

impl fmt::Display for Toggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Toggle({}, {})", self.name, self.active)
    }
}

crate::value_object!(Toggle);

pub fn toggle() -> TypeDescriptor<Toggle> {
    TypeDescriptor::new("Toggle")
        .constructor(|| Toggle {
            name: "x".into(),
            active: false,
        })
        .getter("getName", |t: &Toggle| t.name.clone())
        .setter("setName", |t: &mut Toggle, name: String| t.name = name)
        .getter("isActive", |t: &Toggle| t.active)
        .setter("setActive", |t: &mut Toggle, active: bool| t.active = active)
}
