//! Demo catalogue — the types `beanlike` knows how to check
//!
//! `ContractTester` is generic over the target type, so each entry hides its
//! tester behind [`Subject`] and the command line only deals in names,
//! property maps and outcomes.

use std::collections::BTreeSet;
use std::fmt;

use beanlike_core::{
    signature, ConstructorMapping, ContractTester, PropertyMap, Result, TypeDescriptor, ValueObject,
    Violation,
};
use serde::Serialize;

// ── Checks ────────────────────────────────────────────────

/// One contract check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    DefaultValues,
    MutatorsAndAccessors,
    EqualsAndHash,
    ToString,
}

impl Check {
    /// Every check, in the order `test_bean_like` runs them
    pub const ALL: [Check; 4] = [
        Check::DefaultValues,
        Check::MutatorsAndAccessors,
        Check::EqualsAndHash,
        Check::ToString,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Check::DefaultValues => "default values",
            Check::MutatorsAndAccessors => "mutators and accessors",
            Check::EqualsAndHash => "equals and hash",
            Check::ToString => "string representation",
        }
    }

    /// Whether the check compares two property maps
    pub fn needs_other_values(self) -> bool {
        !matches!(self, Check::DefaultValues)
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of one check; `violation` is `None` when it passed
#[derive(Debug)]
pub struct CheckOutcome {
    pub check: Check,
    pub violation: Option<Violation>,
}

// ── Descriptions ──────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ConstructorEntry {
    pub signature: String,
    pub properties: Vec<String>,
}

/// Property surface of a demo type
#[derive(Debug, Serialize)]
pub struct Description {
    #[serde(rename = "type")]
    pub type_name: String,
    pub constructors: Vec<ConstructorEntry>,
    pub gettable: Vec<String>,
    pub settable: Vec<String>,
    pub mutable: Vec<String>,
}

// ── Subject ───────────────────────────────────────────────

/// A catalogue entry with its concrete type erased
pub trait Subject {
    fn name(&self) -> &'static str;

    fn summary(&self) -> &'static str;

    fn describe(&self) -> Result<Description>;

    /// Run `checks` in order, stopping after the first one that fails.
    ///
    /// `Err` means the type itself was rejected before any check ran.
    fn run(&self, checks: &[Check], values: &PropertyMap, other_values: &PropertyMap) -> Result<Vec<CheckOutcome>>;
}

struct Demo<T> {
    name: &'static str,
    summary: &'static str,
    build: fn() -> Result<ContractTester<T>>,
}

impl<T: ValueObject> Subject for Demo<T> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn summary(&self) -> &'static str {
        self.summary
    }

    fn describe(&self) -> Result<Description> {
        let tester = (self.build)()?;
        let names = |set: &BTreeSet<String>| -> Vec<String> { set.iter().cloned().collect() };
        Ok(Description {
            type_name: tester.type_name().to_string(),
            constructors: tester
                .constructors()
                .iter()
                .map(|(signature, properties)| ConstructorEntry {
                    signature: signature.to_string(),
                    properties: properties.to_vec(),
                })
                .collect(),
            gettable: names(tester.gettable()),
            settable: names(tester.settable()),
            mutable: names(tester.mutable()),
        })
    }

    fn run(&self, checks: &[Check], values: &PropertyMap, other_values: &PropertyMap) -> Result<Vec<CheckOutcome>> {
        let tester = (self.build)()?;
        let mut outcomes = Vec::with_capacity(checks.len());
        for &check in checks {
            let outcome = match check {
                Check::DefaultValues => tester.test_default_values(values),
                Check::MutatorsAndAccessors => tester.test_mutators_and_accessors(values, other_values),
                Check::EqualsAndHash => tester.test_equals_and_hash(values, other_values),
                Check::ToString => tester.test_to_string(values, other_values),
            };
            let failed = outcome.is_err();
            outcomes.push(CheckOutcome {
                check,
                violation: outcome.err(),
            });
            if failed {
                break;
            }
        }
        Ok(outcomes)
    }
}

/// Every bundled demo type
pub fn catalogue() -> Vec<Box<dyn Subject>> {
    vec![
        Box::new(Demo {
            name: "MyBean",
            summary: "setter-only bean with a read-only property",
            build: || ContractTester::new(my_bean()),
        }),
        Box::new(Demo {
            name: "MyBeanLike",
            summary: "constructors and setters, one read-only property",
            build: || ContractTester::with_constructors(my_bean_like(), my_bean_like_constructors()),
        }),
        Box::new(Demo {
            name: "ImmutableObject",
            summary: "no setters; each constructor initialises different properties",
            build: || ContractTester::with_constructors(immutable_object(), immutable_object_constructors()),
        }),
    ]
}

/// Look a demo up by name, ignoring case
pub fn find(name: &str) -> Option<Box<dyn Subject>> {
    catalogue()
        .into_iter()
        .find(|subject| subject.name().eq_ignore_ascii_case(name))
}

// ── MyBean ────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Hash)]
pub struct MyBean {
    property1: Option<String>,
    property2: bool,
    property3: i64,
}

impl Default for MyBean {
    fn default() -> Self {
        MyBean {
            property1: Some("defaultValue".into()),
            property2: false,
            property3: -1,
        }
    }
}

impl fmt::Display for MyBean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MyBean [property1={:?}, property2={}, property3={}]",
            self.property1, self.property2, self.property3
        )
    }
}

beanlike_core::value_object!(MyBean);

fn my_bean() -> TypeDescriptor<MyBean> {
    TypeDescriptor::new("MyBean")
        .constructor(MyBean::default)
        .getter("getProperty1", |b: &MyBean| b.property1.clone())
        .setter("setProperty1", |b: &mut MyBean, v: Option<String>| b.property1 = v)
        .getter("isProperty2", |b: &MyBean| b.property2)
        .setter("setProperty2", |b: &mut MyBean, v: bool| b.property2 = v)
        .getter("getProperty3", |b: &MyBean| b.property3)
}

// ── MyBeanLike ────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Hash)]
pub struct MyBeanLike {
    property1: Option<String>,
    property2: i32,
    property3: bool,
    property4: i32,
}

impl MyBeanLike {
    fn new(property1: Option<String>, property2: i32) -> Self {
        MyBeanLike {
            property1,
            property2,
            property3: false,
            property4: i32::MAX,
        }
    }
}

impl fmt::Display for MyBeanLike {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "MyBeanLike [property1={:?}, property2={}, property3={}]",
            self.property1, self.property2, self.property3
        )
    }
}

beanlike_core::value_object!(MyBeanLike);

fn my_bean_like() -> TypeDescriptor<MyBeanLike> {
    TypeDescriptor::new("MyBeanLike")
        .constructor1(|property1: Option<String>| MyBeanLike::new(property1, 0))
        .constructor2(MyBeanLike::new)
        .getter("getProperty1", |b: &MyBeanLike| b.property1.clone())
        .getter("getProperty2", |b: &MyBeanLike| b.property2)
        .setter("setProperty2", |b: &mut MyBeanLike, v: i32| b.property2 = v)
        .getter("isProperty3", |b: &MyBeanLike| b.property3)
        .setter("setProperty3", |b: &mut MyBeanLike, v: bool| b.property3 = v)
        .getter("getAReadOnlyProperty", |b: &MyBeanLike| b.property4)
}

fn my_bean_like_constructors() -> ConstructorMapping {
    ConstructorMapping::new()
        .with(signature![Option<String>], ["property1"])
        .with(signature![Option<String>, i32], ["property1", "property2"])
}

// ── ImmutableObject ───────────────────────────────────────

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

beanlike_core::value_object!(ImmutableObject);

fn immutable_object() -> TypeDescriptor<ImmutableObject> {
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
        .getter("getAReadOnlyProperty", |_: &ImmutableObject| i32::MAX)
}

fn immutable_object_constructors() -> ConstructorMapping {
    ConstructorMapping::new()
        .with(signature![Option<String>, Option<Vec<String>>], ["aString", "aListOfString"])
        .with(signature![i32], ["anInt"])
        .with(signature![Option<i32>], ["anInteger"])
}
