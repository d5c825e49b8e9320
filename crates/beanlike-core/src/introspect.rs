//! Introspector — discovers the property surface of a descriptor
//!
//! Members are recognised by naming convention:
//!
//! | prefix | parameters | role                         |
//! |--------|------------|------------------------------|
//! | `is`   | 0          | boolean accessor             |
//! | `get`  | 0          | value accessor               |
//! | `set`  | 1          | mutator                      |
//!
//! The property name is what follows the prefix, without a leading `_`,
//! with its first character lower-cased: `getAString` and `get_a_string`
//! give `aString` and `a_string`. Anything else in the descriptor is ignored.

use std::collections::BTreeMap;

use crate::descriptor::{Method, Signature, TypeDescriptor};

const BOOLEAN_ACCESSOR_PREFIX: &str = "is";
const VALUE_ACCESSOR_PREFIX: &str = "get";
const MUTATOR_PREFIX: &str = "set";

/// Accessors every type answers to; never treated as properties
const TYPE_ACCESSORS: [&str; 2] = ["getClass", "get_class"];

/// How a method takes part in the property surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemberRole {
    BooleanAccessor,
    ValueAccessor,
    Mutator,
}

/// A discovered accessor or mutator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub role: MemberRole,
    pub property: String,
    pub method_name: String,
    /// Position in [`TypeDescriptor::methods`]
    pub index: usize,
}

/// Everything discovery found on a descriptor
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    /// Constructor signatures in registration order
    pub constructors: Vec<Signature>,
    /// Property name → accessor
    pub accessors: BTreeMap<String, Member>,
    /// Property name → mutator
    pub mutators: BTreeMap<String, Member>,
}

impl Discovery {
    /// Run discovery over a descriptor
    pub fn of<T: 'static>(descriptor: &TypeDescriptor<T>) -> Self {
        let constructors = descriptor
            .constructors()
            .iter()
            .map(|c| c.signature().clone())
            .collect();

        let mut accessors = BTreeMap::new();
        let mut mutators = BTreeMap::new();
        for (index, method) in descriptor.methods().iter().enumerate() {
            let Some((role, property)) = classify(method) else {
                continue;
            };
            let member = Member {
                role,
                property: property.clone(),
                method_name: method.name().to_string(),
                index,
            };
            // Later registrations win, like a method overriding another.
            match role {
                MemberRole::Mutator => mutators.insert(property, member),
                _ => accessors.insert(property, member),
            };
        }

        Discovery {
            constructors,
            accessors,
            mutators,
        }
    }
}

/// Role and property name of a method, if it follows the conventions
pub fn classify<T>(method: &Method<T>) -> Option<(MemberRole, String)> {
    let name = method.name();
    let arity = method.params().len();

    let role = if name.starts_with(BOOLEAN_ACCESSOR_PREFIX) && arity == 0 {
        MemberRole::BooleanAccessor
    } else if name.starts_with(VALUE_ACCESSOR_PREFIX) && arity == 0 {
        if TYPE_ACCESSORS.contains(&name) {
            return None;
        }
        MemberRole::ValueAccessor
    } else if name.starts_with(MUTATOR_PREFIX) && arity == 1 {
        MemberRole::Mutator
    } else {
        return None;
    };

    property_name(name).map(|property| (role, property))
}

/// Property name derived from an accessor or mutator name
pub fn property_name(method_name: &str) -> Option<String> {
    let rest = [BOOLEAN_ACCESSOR_PREFIX, VALUE_ACCESSOR_PREFIX, MUTATOR_PREFIX]
        .iter()
        .find_map(|prefix| method_name.strip_prefix(prefix))?;
    let rest = rest.strip_prefix('_').unwrap_or(rest);

    let mut chars = rest.chars();
    let first = chars.next()?;
    Some(first.to_lowercase().chain(chars).collect())
}
