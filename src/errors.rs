//! Lattice Error Handling - Unified Diagnostic API
//!
//! Every failure the engine can surface is a `LatticeError`, classified into
//! one of three categories that mirror the phases of a resolution:
//!
//! - **Configuration**: rejected before any resolver runs (ambiguous or
//!   missing declarations, type-incompatible enum sources, malformed
//!   ranges, unresolvable factory/provider references).
//! - **Resolution**: raised while materializing sets or invoking user code.
//! - **Formatting**: raised only when rendering a display name.
//!
//! None of them are retried or swallowed: a failure aborts the whole test
//! method's invocation set and is handed to the invocation driver once.
//! Diagnostic codes follow the `lattice::<category>::<kind>` scheme.

use miette::Diagnostic;
use thiserror::Error;

/// Failures produced by user code (providers) cross the boundary as plain
/// boxed errors and are wrapped with engine context.
pub type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Error classification for driver-side handling and test assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Misconfigured declarations, rejected before resolution begins.
    Configuration,
    /// Failures while materializing value sets or invoking user code.
    Resolution,
    /// Structurally invalid display-name patterns.
    Formatting,
}

impl ErrorCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Configuration => "Configuration",
            ErrorCategory::Resolution => "Resolution",
            ErrorCategory::Formatting => "Formatting",
        }
    }
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The single error type surfaced to the invocation driver.
#[derive(Debug, Error, Diagnostic)]
pub enum LatticeError {
    // -- Configuration ------------------------------------------------------
    #[error(
        "parameter `{parameter}` declares {count} argument sources ({kinds}); exactly one is allowed"
    )]
    #[diagnostic(
        code(lattice::configuration::ambiguous_sources),
        help("keep exactly one source declaration per parameter")
    )]
    AmbiguousSources {
        parameter: String,
        count: usize,
        kinds: String,
    },

    #[error(
        "method `{method}` declares a whole-method factory, but parameter `{parameter}` also declares its own source"
    )]
    #[diagnostic(
        code(lattice::configuration::factory_conflict),
        help("a whole-method factory is mutually exclusive with per-parameter sources")
    )]
    FactoryConflict { method: String, parameter: String },

    #[error("parameter `{parameter}` of method `{method}` declares no argument source")]
    #[diagnostic(
        code(lattice::configuration::missing_source),
        help("declare a source for every parameter, or a single whole-method factory")
    )]
    MissingSource { method: String, parameter: String },

    #[error("method `{method}` declares no argument sources at all")]
    #[diagnostic(code(lattice::configuration::no_sources))]
    NoSources { method: String },

    #[error(
        "enum source on parameter `{parameter}` needs an explicit type: the parameter's declared type is {declared}, not an enum"
    )]
    #[diagnostic(
        code(lattice::configuration::enum_type_unresolved),
        help("set the source's enum type, or declare the parameter with an enum type")
    )]
    EnumTypeUnresolved { parameter: String, declared: String },

    #[error("enum type `{type_name}` is not registered")]
    #[diagnostic(
        code(lattice::configuration::unknown_enum_type),
        help("register an EnumDescriptor for the type before resolving")
    )]
    UnknownEnumType { type_name: String },

    #[error("`{name}` is not a constant of enum `{type_name}`")]
    #[diagnostic(code(lattice::configuration::unknown_enum_constant))]
    UnknownEnumConstant { type_name: String, name: String },

    #[error("selection pattern `{pattern}` on parameter `{parameter}` is not a valid regex: {reason}")]
    #[diagnostic(code(lattice::configuration::invalid_selection_pattern))]
    InvalidSelectionPattern {
        parameter: String,
        pattern: String,
        reason: String,
    },

    #[error("range on parameter `{parameter}` has a zero step")]
    #[diagnostic(code(lattice::configuration::zero_range_step))]
    ZeroRangeStep { parameter: String },

    #[error(
        "range on parameter `{parameter}` can never reach its end: from {from} to {to} with step {step}"
    )]
    #[diagnostic(
        code(lattice::configuration::misdirected_range_step),
        help("the step's sign must match the direction from `from` to `to`")
    )]
    MisdirectedRangeStep {
        parameter: String,
        from: String,
        to: String,
        step: String,
    },

    #[error("factory `{reference}` referenced by method `{method}` is not registered")]
    #[diagnostic(
        code(lattice::configuration::factory_not_found),
        help("register the factory under its simple or `Type#method` qualified name")
    )]
    FactoryNotFound { method: String, reference: String },

    #[error("argument provider `{provider}` on parameter `{parameter}` is not registered")]
    #[diagnostic(code(lattice::configuration::unknown_provider))]
    UnknownProvider { parameter: String, provider: String },

    #[error("failed to read matrix file `{path}`: {source}")]
    #[diagnostic(code(lattice::configuration::matrix_read))]
    MatrixRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse matrix file `{path}`: {source}")]
    #[diagnostic(code(lattice::configuration::matrix_parse))]
    MatrixParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unsupported value for parameter `{parameter}` of method `{method}`: {detail}")]
    #[diagnostic(
        code(lattice::configuration::matrix_value),
        help("literal values must be booleans, integers, floats, or strings")
    )]
    MatrixValue {
        method: String,
        parameter: String,
        detail: String,
    },

    // -- Resolution ---------------------------------------------------------
    #[error(
        "factory `{factory}` must register values for each parameter exactly once: expected at most {expected} parameter sets, but got {actual}"
    )]
    #[diagnostic(code(lattice::resolution::excess_factory_sets))]
    ExcessFactorySets {
        factory: String,
        expected: usize,
        actual: usize,
    },

    #[error("argument provider `{provider}` failed for parameter `{parameter}`: {source}")]
    #[diagnostic(code(lattice::resolution::provider_failure))]
    ProviderFailure {
        parameter: String,
        provider: String,
        #[source]
        source: BoxedError,
    },

    #[error("factory `{factory}` failed while producing argument sets: {source}")]
    #[diagnostic(code(lattice::resolution::factory_failure))]
    FactoryFailure {
        factory: String,
        #[source]
        source: BoxedError,
    },

    #[error("combinatorial space of method `{method}` overflows the native index type")]
    #[diagnostic(code(lattice::resolution::product_overflow))]
    ProductOverflow { method: String },

    // -- Formatting ---------------------------------------------------------
    #[error("display-name pattern `{pattern}` has an unterminated quote region")]
    #[diagnostic(
        code(lattice::formatting::unterminated_quote),
        help("close the quote, or write a literal single quote as ''")
    )]
    UnterminatedQuote { pattern: String },
}

impl LatticeError {
    /// Returns the phase classification of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::AmbiguousSources { .. }
            | Self::FactoryConflict { .. }
            | Self::MissingSource { .. }
            | Self::NoSources { .. }
            | Self::EnumTypeUnresolved { .. }
            | Self::UnknownEnumType { .. }
            | Self::UnknownEnumConstant { .. }
            | Self::InvalidSelectionPattern { .. }
            | Self::ZeroRangeStep { .. }
            | Self::MisdirectedRangeStep { .. }
            | Self::FactoryNotFound { .. }
            | Self::UnknownProvider { .. }
            | Self::MatrixRead { .. }
            | Self::MatrixParse { .. }
            | Self::MatrixValue { .. } => ErrorCategory::Configuration,

            Self::ExcessFactorySets { .. }
            | Self::ProviderFailure { .. }
            | Self::FactoryFailure { .. }
            | Self::ProductOverflow { .. } => ErrorCategory::Resolution,

            Self::UnterminatedQuote { .. } => ErrorCategory::Formatting,
        }
    }
}

/// Prints a LatticeError with full miette diagnostics.
///
/// Rich formatting with codes and help text, for user-facing display in the
/// CLI.
pub fn print_error(error: LatticeError) {
    use miette::Report;
    let report = Report::new(error);
    eprintln!("{report:?}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_follow_the_phase_taxonomy() {
        let config = LatticeError::NoSources {
            method: "m".into(),
        };
        let resolution = LatticeError::ExcessFactorySets {
            factory: "f".into(),
            expected: 2,
            actual: 3,
        };
        let formatting = LatticeError::UnterminatedQuote {
            pattern: "'oops".into(),
        };
        assert_eq!(config.category(), ErrorCategory::Configuration);
        assert_eq!(resolution.category(), ErrorCategory::Resolution);
        assert_eq!(formatting.category(), ErrorCategory::Formatting);
    }

    #[test]
    fn messages_name_the_offending_counts() {
        let err = LatticeError::ExcessFactorySets {
            factory: "intsAndStrings".into(),
            expected: 2,
            actual: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("expected at most 2"));
        assert!(msg.contains("got 3"));
    }
}
