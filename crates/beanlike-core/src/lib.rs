//! BeanLike Core - contract verification for property-carrying value objects
//!
//! Given a declarative map of property names to expected values, checks that
//! a type's whole observable contract holds: initial values, setters and
//! constructors, accessors, equality, hash codes and string representation.
//!
//! # Architecture
//!
//! ```text
//! TypeDescriptor → Introspector → Discovery
//!                                    ↓
//!                                 Validator → constructor bijection + member shapes
//!                                    ↓
//!                                 Registry  → gettable / settable / mutable
//!                                    ↓
//! PropertyMap(s) →             ContractTester → InstanceFactory → Result<(), Violation>
//! ```
//!
//! # Example
//!
//! ```
//! use std::fmt;
//! use beanlike_core::{ContractTester, PropertyMap, TypeDescriptor};
//!
//! #[derive(PartialEq, Hash)]
//! struct Toggle {
//!     name: String,
//!     active: bool,
//! }
//!
//! impl fmt::Display for Toggle {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         write!(f, "Toggle({}, {})", self.name, self.active)
//!     }
//! }
//!
//! beanlike_core::value_object!(Toggle);
//!
//! let descriptor = TypeDescriptor::new("Toggle")
//!     .constructor(|| Toggle { name: "x".into(), active: false })
//!     .getter("getName", |t: &Toggle| t.name.clone())
//!     .setter("setName", |t: &mut Toggle, name: String| t.name = name)
//!     .getter("isActive", |t: &Toggle| t.active)
//!     .setter("setActive", |t: &mut Toggle, active: bool| t.active = active);
//!
//! let tester = ContractTester::new(descriptor).unwrap();
//! let defaults = PropertyMap::new().with("name", "x").with("active", false);
//! let others = PropertyMap::new().with("name", "y").with("active", true);
//! tester.test_bean_like(&defaults, &others).unwrap();
//! ```
//!
//! # Guarantees
//!
//! - **Fail fast**: every check stops at the first violation
//! - **No partial testers**: a tester exists only for a well-formed type
//! - **Contained failures**: errors and panics raised by the target type
//!   come back as violations carrying the original failure
//! - **Deterministic**: properties are visited in sorted order and hash
//!   codes are stable, so messages are reproducible

pub mod descriptor;
pub mod error;
pub mod factory;
pub mod hashing;
pub mod introspect;
pub mod registry;
pub mod tester;
pub mod value;
pub mod value_object;
pub mod verifier;

#[cfg(test)]
mod fixtures;

pub use descriptor::{Signature, TypeDescriptor, TypeTag};
pub use error::{InvocationError, Result, Violation};
pub use registry::{ConstructorMapping, PropertySurface};
pub use tester::ContractTester;
pub use value::{PropertyMap, PropertyValue, Value};
pub use value_object::ValueObject;

/// Version of this crate, for tools built on it
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
