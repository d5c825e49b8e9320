//! Property registry — which properties can be read, set, or changed at all
//!
//! The surface is computed once from discovery plus the caller's
//! [`ConstructorMapping`] and never changes afterwards.

use std::collections::{BTreeMap, BTreeSet};

use crate::descriptor::Signature;
use crate::error::{Listing, Result, Violation};
use crate::introspect::Discovery;

// ── ConstructorMapping ────────────────────────────────────

/// Constructor signature → the properties its parameters initialise, in
/// parameter order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstructorMapping {
    entries: BTreeMap<Signature, Vec<String>>,
}

impl ConstructorMapping {
    /// A mapping with no constructors at all
    pub fn new() -> Self {
        Self::default()
    }

    /// The mapping assumed when none is supplied: only a no-argument constructor
    pub fn no_arg() -> Self {
        Self::new().with(Signature::empty(), Vec::<String>::new())
    }

    /// Builder-style insert
    pub fn with<I, S>(mut self, signature: Signature, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(signature, properties);
        self
    }

    pub fn insert<I, S>(&mut self, signature: Signature, properties: I) -> Option<Vec<String>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.entries
            .insert(signature, properties.into_iter().map(Into::into).collect())
    }

    pub fn remove(&mut self, signature: &Signature) -> Option<Vec<String>> {
        self.entries.remove(signature)
    }

    /// Properties initialised by the constructor with `signature`
    pub fn get(&self, signature: &Signature) -> Option<&[String]> {
        self.entries.get(signature).map(Vec::as_slice)
    }

    pub fn signatures(&self) -> BTreeSet<Signature> {
        self.entries.keys().cloned().collect()
    }

    /// Entries in signature order
    pub fn iter(&self) -> impl Iterator<Item = (&Signature, &[String])> {
        self.entries.iter().map(|(s, p)| (s, p.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── PropertySurface ───────────────────────────────────────

/// Readable, settable and mutable property names of a type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertySurface {
    gettable: BTreeSet<String>,
    settable: BTreeSet<String>,
    mutable: BTreeSet<String>,
}

impl PropertySurface {
    /// Build the surface, failing if a mutable property cannot be read back
    pub fn new(discovery: &Discovery, mapping: &ConstructorMapping) -> Result<Self> {
        let gettable: BTreeSet<String> = discovery.accessors.keys().cloned().collect();
        let settable: BTreeSet<String> = discovery.mutators.keys().cloned().collect();

        let mut mutable = settable.clone();
        for (_, properties) in mapping.iter() {
            mutable.extend(properties.iter().cloned());
        }

        let unreachable: BTreeSet<&String> = mutable.difference(&gettable).collect();
        if !unreachable.is_empty() {
            return Err(Violation::new(format!(
                "the following properties don't have any accessor: {}",
                Listing(&unreachable)
            )));
        }

        Ok(PropertySurface {
            gettable,
            settable,
            mutable,
        })
    }

    /// Properties with an accessor
    pub fn gettable(&self) -> &BTreeSet<String> {
        &self.gettable
    }

    /// Properties with a mutator
    pub fn settable(&self) -> &BTreeSet<String> {
        &self.settable
    }

    /// Properties set by a mutator or by any constructor
    pub fn mutable(&self) -> &BTreeSet<String> {
        &self.mutable
    }
}
