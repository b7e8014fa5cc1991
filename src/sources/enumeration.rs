//! Enum-with-mode resolver.
//!
//! The target type comes from the source's explicit type name, or is
//! inferred from an enum-typed parameter (the validator guarantees one of
//! the two holds). Constants are enumerated through the registry's
//! [`EnumDescriptor`](crate::registry::EnumDescriptor) capability and
//! filtered by the selection mode; survivors keep the type's declaration
//! order regardless of the order names were written in.

use regex::Regex;

use crate::declaration::{ParameterDescriptor, ParameterType, SelectionMode};
use crate::errors::LatticeError;
use crate::registry::Registry;
use crate::set::ValueSet;
use crate::value::Value;

pub fn resolve(
    parameter: &ParameterDescriptor,
    explicit_type: Option<&str>,
    names: &[String],
    mode: SelectionMode,
    registry: &Registry,
) -> Result<ValueSet, LatticeError> {
    let type_name = target_type(parameter, explicit_type)?;
    let descriptor = registry
        .enum_descriptor(type_name)
        .ok_or_else(|| LatticeError::UnknownEnumType {
            type_name: type_name.to_string(),
        })?;

    let keep: Vec<&String> = match mode {
        SelectionMode::Include => {
            check_names_exist(descriptor.variants(), names, type_name)?;
            if names.is_empty() {
                descriptor.variants().iter().collect()
            } else {
                descriptor
                    .variants()
                    .iter()
                    .filter(|v| names.contains(*v))
                    .collect()
            }
        }
        SelectionMode::Exclude => {
            check_names_exist(descriptor.variants(), names, type_name)?;
            descriptor
                .variants()
                .iter()
                .filter(|v| !names.contains(*v))
                .collect()
        }
        SelectionMode::MatchAll => {
            let patterns = compile_patterns(&parameter.name, names)?;
            descriptor
                .variants()
                .iter()
                .filter(|v| patterns.iter().all(|p| p.is_match(v)))
                .collect()
        }
        SelectionMode::MatchAny => {
            let patterns = compile_patterns(&parameter.name, names)?;
            descriptor
                .variants()
                .iter()
                .filter(|v| patterns.iter().any(|p| p.is_match(v)))
                .collect()
        }
    };

    Ok(keep
        .into_iter()
        .map(|variant| Value::enum_constant(type_name, variant.clone()))
        .collect())
}

fn target_type<'a>(
    parameter: &'a ParameterDescriptor,
    explicit_type: Option<&'a str>,
) -> Result<&'a str, LatticeError> {
    if let Some(name) = explicit_type {
        return Ok(name);
    }
    match &parameter.param_type {
        ParameterType::Enum(name) => Ok(name),
        other => Err(LatticeError::EnumTypeUnresolved {
            parameter: parameter.name.clone(),
            declared: other.name().to_string(),
        }),
    }
}

/// Include/Exclude name lists must only name real constants; a typo here is
/// a configuration error, not an empty set.
fn check_names_exist(
    variants: &[String],
    names: &[String],
    type_name: &str,
) -> Result<(), LatticeError> {
    for name in names {
        if !variants.contains(name) {
            return Err(LatticeError::UnknownEnumConstant {
                type_name: type_name.to_string(),
                name: name.clone(),
            });
        }
    }
    Ok(())
}

fn compile_patterns(parameter: &str, names: &[String]) -> Result<Vec<Regex>, LatticeError> {
    names
        .iter()
        .map(|pattern| {
            Regex::new(pattern).map_err(|e| LatticeError::InvalidSelectionPattern {
                parameter: parameter.to_string(),
                pattern: pattern.clone(),
                reason: e.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::EnumDescriptor;

    fn registry() -> Registry {
        let mut registry = Registry::new();
        registry.register_enum(EnumDescriptor::new(
            "Greek",
            ["ALPHA", "BETA", "GAMMA", "DELTA"],
        ));
        registry
    }

    fn parameter() -> ParameterDescriptor {
        ParameterDescriptor::new("letter", ParameterType::Enum("Greek".into()))
    }

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn variants(set: &ValueSet) -> Vec<String> {
        set.iter()
            .map(|v| match v {
                Value::Enum { variant, .. } => variant.clone(),
                other => panic!("expected enum constant, got {other:?}"),
            })
            .collect()
    }

    #[test]
    fn no_names_means_all_constants_in_declaration_order() {
        let set = resolve(&parameter(), None, &[], SelectionMode::Include, &registry()).unwrap();
        assert_eq!(variants(&set), ["ALPHA", "BETA", "GAMMA", "DELTA"]);
    }

    #[test]
    fn exclude_keeps_declaration_order_of_survivors() {
        let set = resolve(
            &parameter(),
            None,
            &names(&["ALPHA", "DELTA"]),
            SelectionMode::Exclude,
            &registry(),
        )
        .unwrap();
        assert_eq!(variants(&set), ["BETA", "GAMMA"]);
    }

    #[test]
    fn include_ignores_the_order_names_were_written_in() {
        let set = resolve(
            &parameter(),
            None,
            &names(&["GAMMA", "ALPHA"]),
            SelectionMode::Include,
            &registry(),
        )
        .unwrap();
        assert_eq!(variants(&set), ["ALPHA", "GAMMA"]);
    }

    #[test]
    fn unknown_constant_is_a_configuration_error() {
        let err = resolve(
            &parameter(),
            None,
            &names(&["OMEGA"]),
            SelectionMode::Include,
            &registry(),
        )
        .unwrap_err();
        assert!(matches!(err, LatticeError::UnknownEnumConstant { .. }));
    }

    #[test]
    fn match_all_intersects_patterns() {
        let set = resolve(
            &parameter(),
            None,
            &names(&["^.{5}$", "A$"]),
            SelectionMode::MatchAll,
            &registry(),
        )
        .unwrap();
        // Exactly five chars, ending in A: everything but BETA.
        assert_eq!(variants(&set), ["ALPHA", "GAMMA", "DELTA"]);
    }

    #[test]
    fn match_any_unions_patterns() {
        let set = resolve(
            &parameter(),
            None,
            &names(&["^B", "^G"]),
            SelectionMode::MatchAny,
            &registry(),
        )
        .unwrap();
        assert_eq!(variants(&set), ["BETA", "GAMMA"]);
    }

    #[test]
    fn invalid_regex_is_a_configuration_error() {
        let err = resolve(
            &parameter(),
            None,
            &names(&["("]),
            SelectionMode::MatchAny,
            &registry(),
        )
        .unwrap_err();
        assert!(matches!(err, LatticeError::InvalidSelectionPattern { .. }));
    }

    #[test]
    fn explicit_type_overrides_parameter_type() {
        let int_param = ParameterDescriptor::new("mode", ParameterType::Int);
        let set = resolve(
            &int_param,
            Some("Greek"),
            &[],
            SelectionMode::Include,
            &registry(),
        )
        .unwrap();
        assert_eq!(set.len(), 4);
    }

    #[test]
    fn unregistered_type_is_a_configuration_error() {
        let err = resolve(
            &parameter(),
            Some("Missing"),
            &[],
            SelectionMode::Include,
            &registry(),
        )
        .unwrap_err();
        assert!(matches!(err, LatticeError::UnknownEnumType { .. }));
    }
}
