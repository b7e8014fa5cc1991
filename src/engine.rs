//! Resolution pipeline.
//!
//! `resolve` is the engine's single entry point: it validates a method's
//! declarations, materializes every value set, builds the lazy Cartesian
//! product, and parses the display-name pattern — returning an
//! [`InvocationPlan`] the external invocation driver consumes one record
//! at a time. Any failure along the way aborts the whole method's
//! invocation set; nothing is retried and no partial combinatorial run is
//! handed out.
//!
//! Every piece of state here (sets, generator cursor, parsed pattern) is
//! owned by the one plan, so distinct test methods can resolve and iterate
//! concurrently against a shared `&Registry` with no coordination.

use crate::declaration::MethodDescriptor;
use crate::display_name::{self, NamePattern};
use crate::errors::LatticeError;
use crate::product::CartesianProduct;
use crate::registry::Registry;
use crate::set::ValueSet;
use crate::sources;
use crate::validate::{self, ResolvedConfiguration};
use crate::value::Value;

/// One planned invocation: the 1-based index, the argument tuple in
/// parameter order, and the formatted display name.
#[derive(Debug, Clone, PartialEq)]
pub struct InvocationRecord {
    pub index: usize,
    pub arguments: Vec<Value>,
    pub name: String,
}

/// The ordered, lazily-produced sequence of invocation records for one
/// test method. The driver invokes the test body per record; this crate's
/// responsibility ends at handing the records out.
#[derive(Debug)]
pub struct InvocationPlan {
    display_name: String,
    pattern: NamePattern,
    product: CartesianProduct,
}

impl InvocationPlan {
    /// Exact number of records the plan will produce.
    pub fn total(&self) -> usize {
        self.product.total()
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}

impl Iterator for InvocationPlan {
    type Item = InvocationRecord;

    fn next(&mut self) -> Option<Self::Item> {
        let (index, arguments) = self.product.next()?;
        let name = self.pattern.format(&self.display_name, index, &arguments);
        Some(InvocationRecord {
            index,
            arguments,
            name,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.product.size_hint()
    }
}

impl ExactSizeIterator for InvocationPlan {}

/// Validates and resolves one method's declarations into its invocation
/// plan.
pub fn resolve(
    method: &MethodDescriptor,
    registry: &Registry,
) -> Result<InvocationPlan, LatticeError> {
    let sets = resolve_sets(method, registry)?;

    let pattern = match &method.name_pattern {
        Some(raw) => NamePattern::parse(raw)?,
        None => display_name::default_pattern().clone(),
    };

    let product =
        CartesianProduct::new(sets).ok_or_else(|| LatticeError::ProductOverflow {
            method: method.display_name.clone(),
        })?;

    Ok(InvocationPlan {
        display_name: method.display_name.clone(),
        pattern,
        product,
    })
}

fn resolve_sets(
    method: &MethodDescriptor,
    registry: &Registry,
) -> Result<Vec<ValueSet>, LatticeError> {
    match validate::validate(method)? {
        ResolvedConfiguration::PerParameter(pairs) => pairs
            .into_iter()
            .map(|(parameter, source)| {
                sources::resolve_parameter(&method.display_name, parameter, source, registry)
            })
            .collect(),
        ResolvedConfiguration::WholeMethod(reference) => {
            sources::factory::resolve(method, reference, registry)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::{ParameterDescriptor, ParameterSource, ParameterType};

    fn values(values: &[i64]) -> ParameterSource {
        ParameterSource::Values {
            values: values.iter().map(|&n| Value::Int(n)).collect(),
        }
    }

    fn two_by_two() -> MethodDescriptor {
        MethodDescriptor::new("pairs")
            .with_parameter(
                ParameterDescriptor::new("lhs", ParameterType::Int).with_source(values(&[1, 2])),
            )
            .with_parameter(
                ParameterDescriptor::new("rhs", ParameterType::Int).with_source(values(&[3, 4])),
            )
    }

    #[test]
    fn plan_yields_records_with_default_names() {
        let plan = resolve(&two_by_two(), &Registry::new()).unwrap();
        assert_eq!(plan.total(), 4);
        let records: Vec<InvocationRecord> = plan.collect();
        assert_eq!(records[0].name, "[1] 1, 3");
        assert_eq!(records[3].name, "[4] 2, 4");
    }

    #[test]
    fn dedup_happens_before_combination() {
        let method = MethodDescriptor::new("dedup")
            .with_parameter(
                ParameterDescriptor::new("a", ParameterType::Int).with_source(values(&[1, 1, 3])),
            )
            .with_parameter(
                ParameterDescriptor::new("b", ParameterType::Int).with_source(values(&[2, 2])),
            );
        let plan = resolve(&method, &Registry::new()).unwrap();
        let tuples: Vec<Vec<Value>> = plan.map(|r| r.arguments).collect();
        assert_eq!(
            tuples,
            vec![
                vec![Value::Int(1), Value::Int(2)],
                vec![Value::Int(3), Value::Int(2)],
            ]
        );
    }

    #[test]
    fn resolution_is_idempotent() {
        let registry = Registry::new();
        let first: Vec<InvocationRecord> =
            resolve(&two_by_two(), &registry).unwrap().collect();
        let second: Vec<InvocationRecord> =
            resolve(&two_by_two(), &registry).unwrap().collect();
        assert_eq!(first, second);
    }

    #[test]
    fn bad_pattern_fails_before_any_record() {
        let method = two_by_two().with_name_pattern("'unterminated {index}");
        let err = resolve(&method, &Registry::new()).unwrap_err();
        assert!(matches!(err, LatticeError::UnterminatedQuote { .. }));
    }
}
