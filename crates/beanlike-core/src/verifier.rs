//! Contract validator — checks that a type's surface is well-formed
//!
//! Runs once while a tester is built, before any property set is exposed.
//! Unlike the checks in [`crate::tester`] it looks only at shapes: which
//! constructors exist and what each accessor or mutator returns.
//!
//! # Phases
//!
//! 1. **Constructors** — the caller's mapping names exactly the registered
//!    constructors, no more and no fewer
//! 2. **Members** — mutators return nothing, boolean accessors return a
//!    boolean, value accessors return something
//!
//! Validation stops at the first problem.

use std::collections::BTreeSet;

use crate::descriptor::{Signature, TypeDescriptor};
use crate::error::{Listing, Result, Violation};
use crate::introspect::{classify, Discovery, MemberRole};
use crate::registry::ConstructorMapping;

// ── Public API ────────────────────────────────────────────

/// Validate a descriptor against the caller's constructor mapping
pub fn validate<T: 'static>(
    descriptor: &TypeDescriptor<T>,
    discovery: &Discovery,
    mapping: &ConstructorMapping,
) -> Result<()> {
    verify_constructor_signatures(descriptor, discovery, mapping)?;
    verify_member_shapes(descriptor)?;
    Ok(())
}

// ── Phase 1: Constructors ─────────────────────────────────

fn verify_constructor_signatures<T: 'static>(
    descriptor: &TypeDescriptor<T>,
    discovery: &Discovery,
    mapping: &ConstructorMapping,
) -> Result<()> {
    let supplied = mapping.signatures();
    let declared: BTreeSet<Signature> = discovery.constructors.iter().cloned().collect();
    if supplied == declared {
        return Ok(());
    }

    let unknown: Vec<&Signature> = supplied.difference(&declared).collect();
    let missing: Vec<&Signature> = declared.difference(&supplied).collect();
    Err(Violation::new(format!(
        "the constructor signatures supplied must be the same as the constructors of {}:\n  supplied: {}\n  declared: {}\n  unknown:  {}\n  missing:  {}",
        descriptor.type_name(),
        Listing(&supplied),
        Listing(&declared),
        Listing(&unknown),
        Listing(&missing),
    )))
}

// ── Phase 2: Members ──────────────────────────────────────

fn verify_member_shapes<T: 'static>(descriptor: &TypeDescriptor<T>) -> Result<()> {
    // Overridden members are checked too, not only the ones discovery kept.
    for method in descriptor.methods() {
        let Some((role, _)) = classify(method) else {
            continue;
        };
        let returns = method.returns();
        match role {
            MemberRole::Mutator if !returns.is_unit() => {
                return Err(Violation::new(format!(
                    "the method '{}' must not return a value (returns {})",
                    method.name(),
                    returns
                )));
            }
            MemberRole::BooleanAccessor if !returns.is_boolean() => {
                return Err(Violation::new(format!(
                    "the method '{}' doesn't return a boolean (returns {})",
                    method.name(),
                    returns
                )));
            }
            MemberRole::ValueAccessor if returns.is_unit() => {
                return Err(Violation::new(format!(
                    "the method '{}' doesn't return a value",
                    method.name()
                )));
            }
            _ => {}
        }
    }
    Ok(())
}
