//! # Lattice Engine: Capability Registry
//!
//! The engine never discovers factories, providers, or enum constants by
//! runtime introspection. Every capability is registered here explicitly:
//! an enum-like type contributes its ordered constant list, a whole-method
//! factory is a named callable returning [`ArgumentSets`], and a custom
//! provider is a named constructor producing a fresh provider instance per
//! resolution.
//!
//! Registry Invariant: the registry is built once by the embedding runner
//! and passed by shared reference into every resolution. It holds no
//! mutable state after construction, so distinct test methods may resolve
//! concurrently against the same registry.

use std::collections::BTreeMap;

use crate::declaration::FactoryReference;
use crate::errors::BoxedError;
use crate::set::ArgumentSets;
use crate::sources::provider::ArgumentProvider;

/// The explicit enumeration capability for one enum-like type: its name and
/// its constants in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDescriptor {
    type_name: String,
    variants: Vec<String>,
}

impl EnumDescriptor {
    pub fn new(
        type_name: impl Into<String>,
        variants: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            variants: variants.into_iter().map(Into::into).collect(),
        }
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Constants in the type's natural declaration order.
    pub fn variants(&self) -> &[String] {
        &self.variants
    }

    pub fn contains(&self, name: &str) -> bool {
        self.variants.iter().any(|v| v == name)
    }
}

/// A registered whole-method factory: zero arguments, returns the full
/// `ArgumentSets` for a method, may fail with user-code errors.
pub type FactoryFn = Box<dyn Fn() -> Result<ArgumentSets, BoxedError> + Send + Sync>;

/// A registered provider constructor. Called once per resolution so each
/// resolution sees a fresh, stateless-safe provider instance.
pub type ProviderCtor = Box<dyn Fn() -> Box<dyn ArgumentProvider> + Send + Sync>;

/// Name-to-capability lookup service for one embedding runner.
///
/// Lookup order for factories mirrors how the declaration boundary writes
/// references: a `Type#method` qualified reference resolves only against
/// that exact qualified registration; a simple `method` reference resolves
/// against a bare registration first, then against any qualified
/// registration with that method name (first match in lexicographic key
/// order, so resolution is deterministic).
#[derive(Default)]
pub struct Registry {
    enums: BTreeMap<String, EnumDescriptor>,
    factories: BTreeMap<String, FactoryFn>,
    providers: BTreeMap<String, ProviderCtor>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    // =====================
    // Registration
    // =====================

    pub fn register_enum(&mut self, descriptor: EnumDescriptor) {
        self.enums
            .insert(descriptor.type_name().to_string(), descriptor);
    }

    pub fn register_factory<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Result<ArgumentSets, BoxedError> + Send + Sync + 'static,
    {
        self.factories.insert(name.into(), Box::new(factory));
    }

    pub fn register_provider<F>(&mut self, name: impl Into<String>, ctor: F)
    where
        F: Fn() -> Box<dyn ArgumentProvider> + Send + Sync + 'static,
    {
        self.providers.insert(name.into(), Box::new(ctor));
    }

    // =====================
    // Lookup
    // =====================

    pub fn enum_descriptor(&self, type_name: &str) -> Option<&EnumDescriptor> {
        self.enums.get(type_name)
    }

    /// Resolves a factory reference to its registered callable, or reports
    /// not-found by returning `None`.
    pub fn factory(&self, reference: &FactoryReference) -> Option<&FactoryFn> {
        match reference.type_name() {
            Some(type_name) => {
                let qualified = format!("{}#{}", type_name, reference.method_name());
                self.factories.get(&qualified)
            }
            None => {
                let simple = reference.method_name();
                self.factories.get(simple).or_else(|| {
                    self.factories
                        .iter()
                        .find(|(key, _)| {
                            key.rsplit_once('#').is_some_and(|(_, m)| m == simple)
                        })
                        .map(|(_, factory)| factory)
                })
            }
        }
    }

    /// Constructs a fresh provider instance for this resolution.
    pub fn instantiate_provider(&self, name: &str) -> Option<Box<dyn ArgumentProvider>> {
        self.providers.get(name).map(|ctor| ctor())
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("enums", &self.enums.keys().collect::<Vec<_>>())
            .field("factories", &self.factories.keys().collect::<Vec<_>>())
            .field("providers", &self.providers.keys().collect::<Vec<_>>())
            .finish()
    }
}
