//! Value semantics of a target type
//!
//! The equality checks compare an instance against itself, against nothing,
//! against an unrelated type and against other instances. [`ValueObject`]
//! is the surface they use; `Display` is the string representation.
//!
//! Most types get it from `PartialEq + Hash` through [`value_object!`]:
//!
//! ```ignore
//! #[derive(PartialEq, Hash)]
//! struct Person { name: Option<String> }
//! impl fmt::Display for Person { ... }
//!
//! beanlike_core::value_object!(Person);
//! ```

use std::any::Any;
use std::fmt;

/// Equality, hash code and string representation of a target type
pub trait ValueObject: Any + fmt::Display {
    /// Compare with any value; `None` stands for "no object"
    fn equals(&self, other: Option<&dyn Any>) -> bool;

    fn hash_code(&self) -> u64;
}

/// Equality through `PartialEq` when `other` has the same type
pub fn equals_by_eq<T: PartialEq + Any>(this: &T, other: Option<&dyn Any>) -> bool {
    other
        .and_then(|o| o.downcast_ref::<T>())
        .is_some_and(|o| this == o)
}

/// Identity equality: true only when `other` is this very instance
pub fn equals_by_identity<T: Any>(this: &T, other: Option<&dyn Any>) -> bool {
    other.is_some_and(|o| std::ptr::eq(this as *const T as *const (), o as *const dyn Any as *const ()))
}

/// Implement [`ValueObject`] from `PartialEq` and `Hash`
#[macro_export]
macro_rules! value_object {
    ($($ty:ty),+ $(,)?) => {$(
        impl $crate::ValueObject for $ty {
            fn equals(&self, other: ::std::option::Option<&dyn ::std::any::Any>) -> bool {
                $crate::value_object::equals_by_eq(self, other)
            }

            fn hash_code(&self) -> u64 {
                $crate::hashing::stable_hash(self)
            }
        }
    )+};
}
