//! Custom-provider resolver.
//!
//! A provider is user code with a two-phase contract: `initialize` receives
//! the source's declared configuration, then `produce` receives the
//! value-under-test's identity and the parameter being resolved. The engine
//! guarantees initialization completes before production and that each
//! phase runs exactly once per parameter occurrence. Providers are
//! reconstructed fresh for every resolution through their registered
//! constructor, so no state leaks across test methods.
//!
//! Provider failures are wrapped with the parameter and provider name so
//! the reported error is diagnosable, never a generic message.

use crate::declaration::{ParameterDescriptor, ProviderConfig};
use crate::errors::{BoxedError, LatticeError};
use crate::registry::Registry;
use crate::set::ValueSet;
use crate::value::Value;

/// The two-phase contract for user-supplied argument providers.
///
/// Call order is fixed: `initialize` exactly once, then `produce` exactly
/// once for the parameter occurrence being resolved. Implementations may
/// block; the engine invokes them synchronously and propagates whatever
/// delay or failure they produce.
pub trait ArgumentProvider {
    /// Receives the declared configuration before any production happens.
    fn initialize(&mut self, config: &ProviderConfig) -> Result<(), BoxedError>;

    /// Yields the ordered candidate values for `parameter` within the test
    /// method identified by `method_name`.
    fn produce(
        &mut self,
        method_name: &str,
        parameter: &ParameterDescriptor,
    ) -> Result<Vec<Value>, BoxedError>;
}

pub fn resolve(
    method_name: &str,
    parameter: &ParameterDescriptor,
    provider_name: &str,
    config: &ProviderConfig,
    registry: &Registry,
) -> Result<ValueSet, LatticeError> {
    let mut provider = registry.instantiate_provider(provider_name).ok_or_else(|| {
        LatticeError::UnknownProvider {
            parameter: parameter.name.clone(),
            provider: provider_name.to_string(),
        }
    })?;

    provider
        .initialize(config)
        .map_err(|source| LatticeError::ProviderFailure {
            parameter: parameter.name.clone(),
            provider: provider_name.to_string(),
            source,
        })?;

    let values =
        provider
            .produce(method_name, parameter)
            .map_err(|source| LatticeError::ProviderFailure {
                parameter: parameter.name.clone(),
                provider: provider_name.to_string(),
                source,
            })?;

    Ok(ValueSet::from_values(values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::ParameterType;

    /// Counts phase invocations to pin down the call-order contract.
    struct CountingProvider {
        initialized: usize,
        produced: usize,
        fail_produce: bool,
    }

    impl CountingProvider {
        fn new(fail_produce: bool) -> Self {
            Self {
                initialized: 0,
                produced: 0,
                fail_produce,
            }
        }
    }

    impl ArgumentProvider for CountingProvider {
        fn initialize(&mut self, config: &ProviderConfig) -> Result<(), BoxedError> {
            assert_eq!(self.produced, 0, "initialize must precede produce");
            self.initialized += 1;
            let _ = config;
            Ok(())
        }

        fn produce(
            &mut self,
            _method_name: &str,
            _parameter: &ParameterDescriptor,
        ) -> Result<Vec<Value>, BoxedError> {
            assert_eq!(self.initialized, 1, "produce requires prior initialize");
            self.produced += 1;
            if self.fail_produce {
                return Err("backing store unavailable".into());
            }
            Ok(vec![Value::Int(1), Value::Int(1), Value::Int(2)])
        }
    }

    fn registry(fail_produce: bool) -> Registry {
        let mut registry = Registry::new();
        registry.register_provider("counting", move || {
            Box::new(CountingProvider::new(fail_produce))
        });
        registry
    }

    fn parameter() -> ParameterDescriptor {
        ParameterDescriptor::new("n", ParameterType::Int)
    }

    #[test]
    fn yielded_values_are_deduplicated() {
        let set = resolve(
            "method",
            &parameter(),
            "counting",
            &ProviderConfig::new(),
            &registry(false),
        )
        .unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn unregistered_provider_is_a_configuration_error() {
        let err = resolve(
            "method",
            &parameter(),
            "missing",
            &ProviderConfig::new(),
            &registry(false),
        )
        .unwrap_err();
        assert!(matches!(err, LatticeError::UnknownProvider { .. }));
    }

    #[test]
    fn produce_failure_is_wrapped_with_context() {
        let err = resolve(
            "method",
            &parameter(),
            "counting",
            &ProviderConfig::new(),
            &registry(true),
        )
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("counting"));
        assert!(msg.contains("`n`"));
        assert!(msg.contains("backing store unavailable"));
    }
}
