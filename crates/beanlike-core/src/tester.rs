//! Verification engine — checks a type's observable contract against property maps
//!
//! # Architecture
//!
//! ```text
//! TypeDescriptor ──► Discovery ──► validate ──► PropertySurface
//!                        │                            │
//!                        ▼                            ▼
//!                 InstanceFactory ◄──────────── ContractTester ◄── PropertyMap(s)
//!                                                     │
//!                                                     ▼
//!                                             Result<(), Violation>
//! ```
//!
//! A [`ContractTester`] exists only for a well-formed type: building it runs
//! discovery, validation and the property registry, and any problem there is
//! returned instead of a tester. After that it is immutable and every check
//! builds fresh instances, so checks can be run in any order and repeated.
//!
//! # Checks
//!
//! 1. **Default values** — every constructor yields the expected initial values
//! 2. **Mutators & accessors** — constructors and setters change what accessors report
//! 3. **Equals & hash** — equality and hash codes follow every mutable property
//! 4. **String representation** — `Display` output follows every mutable property
//!
//! [`ContractTester::test_bean_like`] runs all four in this order.

use std::any::Any;
use std::collections::BTreeSet;

use tracing::{debug, trace};

use crate::descriptor::TypeDescriptor;
use crate::error::{Listing, Result, Violation};
use crate::factory::InstanceFactory;
use crate::introspect::Discovery;
use crate::registry::{ConstructorMapping, PropertySurface};
use crate::value::{PropertyMap, Value};
use crate::value_object::ValueObject;
use crate::verifier;

/// Contract checks for one target type
pub struct ContractTester<T> {
    factory: InstanceFactory<T>,
    surface: PropertySurface,
}

impl<T: 'static> ContractTester<T> {
    /// Tester for a type built through a no-argument constructor only
    pub fn new(descriptor: TypeDescriptor<T>) -> Result<Self> {
        Self::with_constructors(descriptor, ConstructorMapping::no_arg())
    }

    /// Tester for a type whose constructors initialise properties.
    ///
    /// `mapping` must name exactly the constructors registered on the
    /// descriptor, each with the properties its parameters initialise.
    pub fn with_constructors(descriptor: TypeDescriptor<T>, mapping: ConstructorMapping) -> Result<Self> {
        let type_name = descriptor.type_name().to_string();
        let discovery = Discovery::of(&descriptor);

        let surface = verifier::validate(&descriptor, &discovery, &mapping)
            .and_then(|()| PropertySurface::new(&discovery, &mapping))
            .inspect_err(|violation| {
                debug!(type_name = %type_name, %violation, "type rejected");
            })?;

        debug!(
            type_name = %type_name,
            constructors = mapping.len(),
            gettable = surface.gettable().len(),
            settable = surface.settable().len(),
            mutable = surface.mutable().len(),
            "contract tester built"
        );

        Ok(ContractTester {
            factory: InstanceFactory::new(descriptor, discovery, mapping),
            surface,
        })
    }

    pub fn type_name(&self) -> &str {
        self.factory.descriptor().type_name()
    }

    /// Properties with an accessor
    pub fn gettable(&self) -> &BTreeSet<String> {
        self.surface.gettable()
    }

    /// Properties with a mutator
    pub fn settable(&self) -> &BTreeSet<String> {
        self.surface.settable()
    }

    /// Properties set by a mutator or a constructor
    pub fn mutable(&self) -> &BTreeSet<String> {
        self.surface.mutable()
    }

    /// Constructor signatures and the properties they initialise
    pub fn constructors(&self) -> &ConstructorMapping {
        self.factory.mapping()
    }

    pub fn surface(&self) -> &PropertySurface {
        &self.surface
    }

    // ── Default values ────────────────────────────────────

    /// Check that every constructor, given `expected`, yields an instance
    /// whose accessors all report `expected`.
    ///
    /// `expected` must list exactly the readable properties.
    pub fn test_default_values(&self, expected: &PropertyMap) -> Result<()> {
        self.run("default values", || {
            self.verify_same_as_readable(expected)?;

            for constructor in self.factory.descriptor().constructors() {
                trace!(constructor = %constructor.signature(), "checking initial values");
                let mut instance = self.factory.construct(constructor, expected)?;
                for property in self.surface.gettable() {
                    self.verify_property(&mut instance, property, expected.get(property))?;
                }
            }
            Ok(())
        })
    }

    // ── Mutators & accessors ──────────────────────────────

    /// Check that constructors and setters change what the accessors report.
    ///
    /// Each constructor builds an instance from `other_values`; the properties
    /// it initialises must read back as given. Then every setter is driven
    /// with `values` and again with `other_values`, reading back after each
    /// call.
    pub fn test_mutators_and_accessors(&self, values: &PropertyMap, other_values: &PropertyMap) -> Result<()> {
        self.run("mutators and accessors", || {
            self.verify_contains_mutable(values)?;
            self.verify_contains_mutable(other_values)?;

            for constructor in self.factory.descriptor().constructors() {
                let signature = constructor.signature();
                trace!(constructor = %signature, "checking mutators");
                let mut instance = self.factory.construct(constructor, other_values)?;

                if !signature.is_empty() {
                    for property in self.factory.mapping().get(signature).unwrap_or(&[]) {
                        self.verify_property(&mut instance, property, other_values.get(property))?;
                    }
                }

                // The constructor may already have set a non-default value,
                // so each setter is driven twice.
                for (round, props) in [values, other_values].into_iter().enumerate() {
                    for property in self.surface.settable() {
                        let value = props.get(property);
                        trace!(round, property = %property, %value, "set and read back");
                        self.factory.set(&mut instance, property, value.clone())?;
                        self.verify_property(&mut instance, property, value)?;
                    }
                }
            }
            Ok(())
        })
    }

    // ── Helpers ───────────────────────────────────────────

    fn run(&self, check: &'static str, body: impl FnOnce() -> Result<()>) -> Result<()> {
        debug!(type_name = self.type_name(), check, "check started");
        let outcome = body();
        match &outcome {
            Ok(()) => debug!(type_name = self.type_name(), check, "check passed"),
            Err(violation) => debug!(type_name = self.type_name(), check, %violation, "check failed"),
        }
        outcome
    }

    fn verify_property(&self, instance: &mut T, property: &str, expected: &Value) -> Result<()> {
        let returned = self.factory.get(instance, property)?;
        if &returned != expected {
            return Err(Violation::new(format!(
                "the value of the property '{}' returned ({}) is not the same as the one expected ({})",
                property, returned, expected
            )));
        }
        Ok(())
    }

    fn verify_same_as_readable(&self, properties: &PropertyMap) -> Result<()> {
        let to_test = properties.key_set();
        let readable = self.surface.gettable();
        if &to_test == readable {
            return Ok(());
        }

        let not_tested: Vec<&String> = readable.difference(&to_test).collect();
        let unknown: Vec<&String> = to_test.difference(readable).collect();
        Err(Violation::new(format!(
            "the properties to test differ from the readable properties of {}:\n  readable:   {}\n  to test:    {}\n  not tested: {}\n  unknown:    {}",
            self.type_name(),
            Listing(readable),
            Listing(&to_test),
            Listing(&not_tested),
            Listing(&unknown),
        )))
    }

    fn verify_contains_mutable(&self, properties: &PropertyMap) -> Result<()> {
        let given = properties.key_set();
        let missing: Vec<&String> = self.surface.mutable().difference(&given).collect();
        if missing.is_empty() {
            return Ok(());
        }

        Err(Violation::new(format!(
            "the properties defined in parameter must at least contain all the mutable properties of {}:\n  parameter: {}\n  mutable:   {}\n  missing:   {}",
            self.type_name(),
            Listing(&given),
            Listing(self.surface.mutable()),
            Listing(&missing),
        )))
    }

    fn verify_mutable_values_differ(&self, values: &PropertyMap, other_values: &PropertyMap) -> Result<()> {
        match self
            .surface
            .mutable()
            .iter()
            .find(|p| values.get(p) == other_values.get(p))
        {
            Some(property) => Err(Violation::new(format!(
                "the value of the property '{}' must be different in the parameters",
                property
            ))),
            None => Ok(()),
        }
    }

    fn verify_distinguishing(&self, values: &PropertyMap, other_values: &PropertyMap) -> Result<()> {
        self.verify_contains_mutable(values)?;
        self.verify_contains_mutable(other_values)?;
        self.verify_mutable_values_differ(values, other_values)
    }
}

/// Stands in for "an object of another type" in the equality checks
struct Unrelated;

impl<T: ValueObject> ContractTester<T> {
    // ── Equals & hash ─────────────────────────────────────

    /// Check `equals` and `hash_code` against every mutable property.
    ///
    /// Every mutable property must have a different value in `values` and
    /// `other_values`. An instance built from `values` must equal itself
    /// and nothing else; changing any one mutable property to its value in
    /// `other_values` must change equality and the hash code, and two
    /// instances built that same way must be equal with equal hash codes.
    pub fn test_equals_and_hash(&self, values: &PropertyMap, other_values: &PropertyMap) -> Result<()> {
        self.run("equals and hash", || {
            self.verify_distinguishing(values, other_values)?;

            let base = self.factory.construct_default(values)?;
            let base_hash = base.hash_code();

            if !base.equals(Some(&base as &dyn Any)) {
                return Err(Violation::new(format!(
                    "the equals method must return true when the object is compared to itself:\nobject: {}",
                    base
                )));
            }
            if base.equals(None) {
                return Err(Violation::new(format!(
                    "the comparison with None must return false:\nobject: {}",
                    base
                )));
            }
            if base.equals(Some(&Unrelated as &dyn Any)) {
                return Err(Violation::new(format!(
                    "the comparison with another type must return false:\nobject: {}",
                    base
                )));
            }

            for property in self.surface.mutable() {
                let value = other_values.get(property);
                trace!(property = %property, %value, "checking equality");

                let other1 = self.factory.construct_with(values, property, value)?;
                let hash1 = other1.hash_code();
                if hash1 == base_hash {
                    return Err(Violation::new(format!(
                        "the hash codes of different objects should be different for the tests, please change the values or check that hash_code() is correct\nobject1: {} hash code: {}\nobject2: {} hash code: {}",
                        base, base_hash, other1, hash1
                    )));
                }

                if other1.equals(Some(&base as &dyn Any)) || base.equals(Some(&other1 as &dyn Any)) {
                    return Err(Violation::new(format!(
                        "the equals method must return false for the comparison between objects with different properties:\nobject1: {}\nobject2: {}",
                        other1, base
                    )));
                }

                let other2 = self.factory.construct_with(values, property, value)?;
                let hash2 = other2.hash_code();
                if !other1.equals(Some(&other2 as &dyn Any)) {
                    return Err(Violation::new(format!(
                        "the equals method should return true for the comparison between objects with the same properties:\nobject1: {}\nobject2: {}",
                        other1, other2
                    )));
                }
                if hash1 != hash2 {
                    return Err(Violation::new(format!(
                        "the hash codes must be equal:\nobject1: {} hash code: {}\nobject2: {} hash code: {}",
                        other1, hash1, other2, hash2
                    )));
                }
            }
            Ok(())
        })
    }

    // ── String representation ─────────────────────────────

    /// Check that the `Display` output changes whenever one mutable property does
    pub fn test_to_string(&self, values: &PropertyMap, other_values: &PropertyMap) -> Result<()> {
        self.run("string representation", || {
            self.verify_distinguishing(values, other_values)?;

            let shown = self.factory.construct_default(values)?.to_string();
            for property in self.surface.mutable() {
                let value = other_values.get(property);
                trace!(property = %property, %value, "checking string representation");
                let other = self.factory.construct_with(values, property, value)?;
                if other.to_string() == shown {
                    return Err(Violation::new(format!(
                        "the result of to_string() should depend on the property '{}'",
                        property
                    )));
                }
            }
            Ok(())
        })
    }

    // ── Composition ───────────────────────────────────────

    /// Run every check, stopping at the first violation.
    ///
    /// `values` doubles as the expected default values, so it must list
    /// exactly the readable properties.
    pub fn test_bean_like(&self, values: &PropertyMap, other_values: &PropertyMap) -> Result<()> {
        self.test_default_values(values)?;
        self.test_mutators_and_accessors(values, other_values)?;
        self.test_equals_and_hash(values, other_values)?;
        self.test_to_string(values, other_values)
    }
}
