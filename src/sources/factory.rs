//! Whole-method factory resolver.
//!
//! A factory is a registered zero-argument callable returning the full
//! [`ArgumentSets`] for a method. The reference is resolved through the
//! registry by simple or `Type#method` qualified name; an unresolvable
//! reference is a configuration error. A factory registering more
//! parameter sets than the method has parameters is a resolution error;
//! registering fewer is left to the invocation boundary, where
//! auto-injected parameters are legal.

use crate::declaration::{FactoryReference, MethodDescriptor};
use crate::errors::LatticeError;
use crate::registry::Registry;
use crate::set::ValueSet;

pub fn resolve(
    method: &MethodDescriptor,
    reference: &FactoryReference,
    registry: &Registry,
) -> Result<Vec<ValueSet>, LatticeError> {
    let factory = registry
        .factory(reference)
        .ok_or_else(|| LatticeError::FactoryNotFound {
            method: method.display_name.clone(),
            reference: reference.raw().to_string(),
        })?;

    let sets = factory().map_err(|source| LatticeError::FactoryFailure {
        factory: reference.raw().to_string(),
        source,
    })?;

    let expected = method.parameters.len();
    let actual = sets.len();
    if actual > expected {
        return Err(LatticeError::ExcessFactorySets {
            factory: reference.raw().to_string(),
            expected,
            actual,
        });
    }

    Ok(sets.into_sets())
}
