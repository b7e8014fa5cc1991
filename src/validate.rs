//! Configuration Validator.
//!
//! Pure structural check over a method's declarations, executed before any
//! resolver runs. Exactly one of two shapes is legal: every parameter
//! carries its own single source, or the method carries one whole-method
//! factory and no parameter carries anything. Everything else is a
//! configuration error naming the offending parameter.

use crate::declaration::{
    FactoryReference, MethodDescriptor, ParameterDescriptor, ParameterSource, ParameterType,
};
use crate::errors::LatticeError;

/// The validated shape of a method's declarations.
#[derive(Debug)]
pub enum ResolvedConfiguration<'a> {
    /// Every parameter carries exactly one source, paired here in
    /// declaration order.
    PerParameter(Vec<(&'a ParameterDescriptor, &'a ParameterSource)>),
    /// The method carries a single whole-method factory.
    WholeMethod(&'a FactoryReference),
}

/// Decides which of the two legal configurations a method declares, or
/// rejects it. Side-effect free; resolvers only run on an `Ok`.
pub fn validate(method: &MethodDescriptor) -> Result<ResolvedConfiguration<'_>, LatticeError> {
    // Duplicate declarations are rejected first so the error names the
    // real problem even when a factory is also present.
    for parameter in &method.parameters {
        if parameter.sources.len() > 1 {
            return Err(LatticeError::AmbiguousSources {
                parameter: parameter.name.clone(),
                count: parameter.sources.len(),
                kinds: parameter
                    .sources
                    .iter()
                    .map(ParameterSource::kind)
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }
    }

    if let Some(factory) = &method.factory {
        if let Some(parameter) = method.parameters.iter().find(|p| !p.sources.is_empty()) {
            return Err(LatticeError::FactoryConflict {
                method: method.display_name.clone(),
                parameter: parameter.name.clone(),
            });
        }
        return Ok(ResolvedConfiguration::WholeMethod(factory));
    }

    if method.parameters.iter().all(|p| p.sources.is_empty()) {
        return Err(LatticeError::NoSources {
            method: method.display_name.clone(),
        });
    }

    let mut pairs = Vec::with_capacity(method.parameters.len());
    for parameter in &method.parameters {
        let source = parameter.sources.first().ok_or_else(|| {
            LatticeError::MissingSource {
                method: method.display_name.clone(),
                parameter: parameter.name.clone(),
            }
        })?;
        check_source_compatibility(parameter, source)?;
        pairs.push((parameter, source));
    }
    Ok(ResolvedConfiguration::PerParameter(pairs))
}

/// An enum source must be able to establish its target type: either an
/// explicit type name on the source, or an enum-typed parameter.
fn check_source_compatibility(
    parameter: &ParameterDescriptor,
    source: &ParameterSource,
) -> Result<(), LatticeError> {
    if let ParameterSource::Enumeration {
        type_name: None, ..
    } = source
    {
        if !matches!(parameter.param_type, ParameterType::Enum(_)) {
            return Err(LatticeError::EnumTypeUnresolved {
                parameter: parameter.name.clone(),
                declared: parameter.param_type.name().to_string(),
            });
        }
    }
    Ok(())
}
