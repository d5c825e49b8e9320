//! Instance factory — builds target instances from property maps
//!
//! Every call into the target type goes through here, so a constructor,
//! accessor or mutator that returns an error or panics is reported as a
//! [`Violation`] carrying the failure as its cause.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::descriptor::{Constructor, TypeDescriptor};
use crate::error::{InvocationError, Listing, Result, Violation};
use crate::introspect::Discovery;
use crate::registry::ConstructorMapping;
use crate::value::{PropertyMap, Value};

/// Builds and drives instances of `T`
pub struct InstanceFactory<T> {
    descriptor: TypeDescriptor<T>,
    discovery: Discovery,
    mapping: ConstructorMapping,
}

impl<T: 'static> InstanceFactory<T> {
    pub fn new(descriptor: TypeDescriptor<T>, discovery: Discovery, mapping: ConstructorMapping) -> Self {
        InstanceFactory {
            descriptor,
            discovery,
            mapping,
        }
    }

    pub fn descriptor(&self) -> &TypeDescriptor<T> {
        &self.descriptor
    }

    pub fn discovery(&self) -> &Discovery {
        &self.discovery
    }

    pub fn mapping(&self) -> &ConstructorMapping {
        &self.mapping
    }

    // ── Construction ──────────────────────────────────────

    /// Build through `constructor`, taking its arguments from `properties`.
    ///
    /// Properties the constructor does not initialise are ignored; missing
    /// ones are passed as `Null`.
    pub fn construct(&self, constructor: &Constructor<T>, properties: &PropertyMap) -> Result<T> {
        let names = self.mapping.get(constructor.signature()).unwrap_or(&[]);
        let args: Vec<Value> = names.iter().map(|n| properties.get(n).clone()).collect();
        self.invoke_constructor(constructor, args)
    }

    /// Build through the first registered constructor
    pub fn construct_default(&self, properties: &PropertyMap) -> Result<T> {
        let constructor = self.descriptor.constructors().first().ok_or_else(|| {
            Violation::new(format!(
                "{} has no constructor to build an instance with",
                self.descriptor.type_name()
            ))
        })?;
        self.construct(constructor, properties)
    }

    /// Build an instance equal to `baseline` except that `property` holds `value`.
    ///
    /// The mutator is preferred when there is one; otherwise the first
    /// constructor initialising `property` is used.
    pub fn construct_with(&self, baseline: &PropertyMap, property: &str, value: &Value) -> Result<T> {
        if self.discovery.mutators.contains_key(property) {
            let mut instance = self.construct_default(baseline)?;
            self.set(&mut instance, property, value.clone())?;
            return Ok(instance);
        }

        let overridden = baseline.clone().with(property, value.clone());
        for (signature, names) in self.mapping.iter() {
            if !names.iter().any(|n| n == property) {
                continue;
            }
            let constructor = self
                .descriptor
                .constructors()
                .iter()
                .find(|c| c.signature() == signature)
                .ok_or_else(|| {
                    Violation::new(format!(
                        "{} has no constructor {}",
                        self.descriptor.type_name(),
                        signature
                    ))
                })?;
            return self.construct(constructor, &overridden);
        }

        Err(Violation::new(format!(
            "the property '{}' must be settable by either a setter or a constructor",
            property
        )))
    }

    fn invoke_constructor(&self, constructor: &Constructor<T>, args: Vec<Value>) -> Result<T> {
        let shown = Listing(&args).to_string();
        guarded(|| constructor.call(args)).map_err(|cause| {
            Violation::caused_by(
                format!(
                    "failed to construct {} with constructor {} and arguments {}: {}",
                    self.descriptor.type_name(),
                    constructor.signature(),
                    shown,
                    cause
                ),
                cause,
            )
        })
    }

    // ── Accessors & mutators ──────────────────────────────

    /// Read `property` through its accessor
    pub fn get(&self, instance: &mut T, property: &str) -> Result<Value> {
        let member = self.discovery.accessors.get(property).ok_or_else(|| {
            Violation::new(format!(
                "{} has no accessor for the property '{}'",
                self.descriptor.type_name(),
                property
            ))
        })?;
        self.invoke_method(instance, member.index, Vec::new())
    }

    /// Write `property` through its mutator
    pub fn set(&self, instance: &mut T, property: &str, value: Value) -> Result<()> {
        let member = self.discovery.mutators.get(property).ok_or_else(|| {
            Violation::new(format!(
                "{} has no mutator for the property '{}'",
                self.descriptor.type_name(),
                property
            ))
        })?;
        self.invoke_method(instance, member.index, vec![value])?;
        Ok(())
    }

    fn invoke_method(&self, instance: &mut T, index: usize, args: Vec<Value>) -> Result<Value> {
        let method = &self.descriptor.methods()[index];
        let shown = Listing(&args).to_string();
        guarded(|| method.call(instance, args)).map_err(|cause| {
            Violation::caused_by(
                format!(
                    "failed to call {}::{} with arguments {}: {}",
                    self.descriptor.type_name(),
                    method.name(),
                    shown,
                    cause
                ),
                cause,
            )
        })
    }
}

/// Run a call into the target type, turning a panic into an error
fn guarded<R>(call: impl FnOnce() -> std::result::Result<R, InvocationError>) -> std::result::Result<R, InvocationError> {
    catch_unwind(AssertUnwindSafe(call)).unwrap_or_else(|payload| Err(InvocationError::Panicked(panic_message(payload))))
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    match payload.downcast::<String>() {
        Ok(msg) => *msg,
        Err(payload) => payload
            .downcast_ref::<&str>()
            .map_or_else(|| "unknown panic payload".to_string(), |s| s.to_string()),
    }
}
