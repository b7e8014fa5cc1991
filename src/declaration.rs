//! Declaration-boundary descriptors.
//!
//! These types are what the embedding test runner (or the YAML matrix front
//! end) hands to the engine: an ordered list of parameter descriptors, each
//! with zero-or-more source declarations, plus an optional whole-method
//! factory reference and an optional display-name pattern. The validator
//! decides whether the combination is coherent before any resolver runs.

use crate::value::Value;

/// The declared type of a test parameter.
///
/// The engine only needs enough typing to check enum-source compatibility
/// and to let the invocation boundary do its own final conversion; values
/// themselves stay type-erased in [`Value`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterType {
    Bool,
    Int,
    Float,
    Str,
    /// An enum-like type, named so the registry can enumerate its constants.
    Enum(String),
}

impl ParameterType {
    pub fn name(&self) -> &str {
        match self {
            ParameterType::Bool => "Bool",
            ParameterType::Int => "Int",
            ParameterType::Float => "Float",
            ParameterType::Str => "Str",
            ParameterType::Enum(name) => name,
        }
    }
}

/// Policy for filtering an enum's constants by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Keep only the named constants. With no names given, keep all.
    Include,
    /// Drop the named constants.
    Exclude,
    /// Keep constants whose name matches every given regex.
    MatchAll,
    /// Keep constants whose name matches at least one given regex.
    MatchAny,
}

/// Opaque configuration handed to a custom provider's initialization phase.
///
/// Stored as ordered key/value entries so a provider sees its declaration
/// exactly as written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderConfig {
    entries: Vec<(String, Value)>,
}

impl ProviderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    /// First value declared under `key`, if any.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn entries(&self) -> &[(String, Value)] {
        &self.entries
    }
}

/// One declared argument source for a single parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterSource {
    /// An explicit ordered list of literal values.
    Values { values: Vec<Value> },
    /// Constants of an enum-like type, filtered by a selection mode.
    ///
    /// `type_name` may be omitted when the parameter itself is declared
    /// with an enum type.
    Enumeration {
        type_name: Option<String>,
        names: Vec<String>,
        mode: SelectionMode,
    },
    /// An arithmetic sequence of integers.
    IntRange {
        from: i64,
        to: i64,
        step: i64,
        /// Whether `to` itself is part of the sequence.
        closed: bool,
    },
    /// An arithmetic sequence of floats.
    FloatRange {
        from: f64,
        to: f64,
        step: f64,
        closed: bool,
    },
    /// A user-supplied two-phase provider, resolved through the registry.
    Provider { name: String, config: ProviderConfig },
}

impl ParameterSource {
    /// Short kind label used in diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ParameterSource::Values { .. } => "values",
            ParameterSource::Enumeration { .. } => "enum",
            ParameterSource::IntRange { .. } => "int-range",
            ParameterSource::FloatRange { .. } => "float-range",
            ParameterSource::Provider { .. } => "provider",
        }
    }
}

/// A single test parameter: name, declared type, and the sources declared
/// for it.
///
/// `sources` is a list because the declaration boundary can carry more than
/// one; exactly one is legal, and the validator rejects the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDescriptor {
    pub name: String,
    pub param_type: ParameterType,
    pub sources: Vec<ParameterSource>,
}

impl ParameterDescriptor {
    pub fn new(name: impl Into<String>, param_type: ParameterType) -> Self {
        Self {
            name: name.into(),
            param_type,
            sources: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_source(mut self, source: ParameterSource) -> Self {
        self.sources.push(source);
        self
    }
}

/// A reference to a whole-method factory, as written at the declaration
/// boundary: a simple name, or qualified as `Type#method`. A trailing
/// argument list such as `sets()` is tolerated and stripped before lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactoryReference {
    raw: String,
}

impl FactoryReference {
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// The reference exactly as declared.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The method-name component, with any `(...)` suffix and `Type#`
    /// qualifier removed.
    pub fn method_name(&self) -> &str {
        let name = self.strip_call_suffix();
        match name.find('#') {
            Some(pos) => &name[pos + 1..],
            None => name,
        }
    }

    /// The explicit `Type` qualifier, when the reference is qualified.
    pub fn type_name(&self) -> Option<&str> {
        let name = self.strip_call_suffix();
        name.find('#').map(|pos| &name[..pos])
    }

    fn strip_call_suffix(&self) -> &str {
        match self.raw.find('(') {
            Some(pos) => &self.raw[..pos],
            None => &self.raw,
        }
    }
}

/// Everything the declaration boundary knows about one test method.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDescriptor {
    /// The method's own display name, substituted for `{displayName}`.
    pub display_name: String,
    /// Parameters in declaration order.
    pub parameters: Vec<ParameterDescriptor>,
    /// Optional whole-method factory, mutually exclusive with any
    /// per-parameter source.
    pub factory: Option<FactoryReference>,
    /// Optional display-name pattern; the engine falls back to
    /// [`crate::display_name::DEFAULT_PATTERN`] when absent.
    pub name_pattern: Option<String>,
}

impl MethodDescriptor {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            parameters: Vec::new(),
            factory: None,
            name_pattern: None,
        }
    }

    #[must_use]
    pub fn with_parameter(mut self, parameter: ParameterDescriptor) -> Self {
        self.parameters.push(parameter);
        self
    }

    #[must_use]
    pub fn with_factory(mut self, reference: FactoryReference) -> Self {
        self.factory = Some(reference);
        self
    }

    #[must_use]
    pub fn with_name_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.name_pattern = Some(pattern.into());
        self
    }
}
