//! Source Resolvers.
//!
//! Each resolver turns one declared source configuration into a
//! [`ValueSet`](crate::set::ValueSet) (or, for the whole-method factory,
//! into one set per parameter). Resolvers only run after the configuration
//! validator has accepted the method's declarations; they own the
//! materialization phase of the pipeline and every error they raise aborts
//! the whole method's invocation set.

pub mod enumeration;
pub mod factory;
pub mod literal;
pub mod provider;
pub mod range;

use crate::declaration::{ParameterDescriptor, ParameterSource};
use crate::errors::LatticeError;
use crate::registry::Registry;
use crate::set::ValueSet;

/// Resolves one parameter's single declared source into its candidate set.
///
/// `method_name` is the identity handed to custom providers as the
/// value-under-test context.
pub fn resolve_parameter(
    method_name: &str,
    parameter: &ParameterDescriptor,
    source: &ParameterSource,
    registry: &Registry,
) -> Result<ValueSet, LatticeError> {
    match source {
        ParameterSource::Values { values } => Ok(literal::resolve(values)),
        ParameterSource::Enumeration {
            type_name,
            names,
            mode,
        } => enumeration::resolve(parameter, type_name.as_deref(), names, *mode, registry),
        ParameterSource::IntRange {
            from,
            to,
            step,
            closed,
        } => range::resolve_int(&parameter.name, *from, *to, *step, *closed),
        ParameterSource::FloatRange {
            from,
            to,
            step,
            closed,
        } => range::resolve_float(&parameter.name, *from, *to, *step, *closed),
        ParameterSource::Provider { name, config } => {
            provider::resolve(method_name, parameter, name, config, registry)
        }
    }
}
