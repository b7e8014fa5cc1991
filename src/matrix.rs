//! Declarative matrix files.
//!
//! A matrix file is a YAML document holding a list of method entries; each
//! entry declares the method's display name, its parameters with their
//! sources, an optional whole-method factory reference, and an optional
//! display-name pattern:
//!
//! ```yaml
//! - method: "multiplication"
//!   name-pattern: "{index} => {0} x {1}"
//!   parameters:
//!     - name: lhs
//!       type: int
//!       values: [1, 2, 3]
//!     - name: rhs
//!       type: int
//!       range: { from: 1, to: 4, step: 1, closed: true }
//! - method: "from factory"
//!   factory: "Fixtures#sets"
//! ```
//!
//! A `type` that is not one of `bool`/`int`/`float`/`str` names an
//! enum-like type. Declaring more than one source field on a parameter is
//! representable on purpose: the configuration validator owns that
//! rejection, not the deserializer.
//!
//! A file may also use the document form, a declarative binding table that
//! carries enum capabilities alongside the methods so a matrix is plannable
//! without code-side registration:
//!
//! ```yaml
//! enums:
//!   RoundingMode: [UP, DOWN, HALF_EVEN]
//! methods:
//!   - method: "rounding"
//!     parameters:
//!       - name: mode
//!         type: RoundingMode
//!         enum: {}
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::declaration::{
    FactoryReference, MethodDescriptor, ParameterDescriptor, ParameterSource, ParameterType,
    ProviderConfig, SelectionMode,
};
use crate::errors::LatticeError;
use crate::registry::EnumDescriptor;
use crate::value::Value;

// =============================================================================
// FILE SCHEMA
// =============================================================================

/// A fully converted matrix file: the declared methods plus any enum
/// capabilities the file binds inline.
#[derive(Debug)]
pub struct MatrixDocument {
    pub enums: Vec<EnumDescriptor>,
    pub methods: Vec<MethodDescriptor>,
}

/// The two accepted file shapes: a bare method list, or a document mapping
/// with an inline enum binding table.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FileShape {
    Methods(Vec<MethodEntry>),
    Document {
        #[serde(default)]
        enums: BTreeMap<String, Vec<String>>,
        methods: Vec<MethodEntry>,
    },
}

/// One method entry in a matrix file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct MethodEntry {
    pub method: String,
    #[serde(default)]
    pub name_pattern: Option<String>,
    #[serde(default)]
    pub factory: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterEntry>,
}

/// One parameter entry. Each optional field is one declared source.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct ParameterEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: String,
    #[serde(default)]
    pub values: Option<Vec<serde_yaml::Value>>,
    #[serde(rename = "enum", default)]
    pub enumeration: Option<EnumEntry>,
    #[serde(default)]
    pub range: Option<IntRangeEntry>,
    #[serde(default)]
    pub float_range: Option<FloatRangeEntry>,
    #[serde(default)]
    pub provider: Option<ProviderEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct EnumEntry {
    #[serde(rename = "type", default)]
    pub type_name: Option<String>,
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub mode: ModeEntry,
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModeEntry {
    #[default]
    Include,
    Exclude,
    MatchAll,
    MatchAny,
}

impl From<ModeEntry> for SelectionMode {
    fn from(mode: ModeEntry) -> Self {
        match mode {
            ModeEntry::Include => SelectionMode::Include,
            ModeEntry::Exclude => SelectionMode::Exclude,
            ModeEntry::MatchAll => SelectionMode::MatchAll,
            ModeEntry::MatchAny => SelectionMode::MatchAny,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IntRangeEntry {
    pub from: i64,
    pub to: i64,
    #[serde(default = "default_int_step")]
    pub step: i64,
    #[serde(default)]
    pub closed: bool,
}

fn default_int_step() -> i64 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FloatRangeEntry {
    pub from: f64,
    pub to: f64,
    pub step: f64,
    #[serde(default)]
    pub closed: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderEntry {
    pub name: String,
    #[serde(default)]
    pub config: serde_yaml::Mapping,
}

// =============================================================================
// LOADING AND CONVERSION
// =============================================================================

/// Reads and converts a matrix file.
pub fn load_matrix_file(path: &Path) -> Result<MatrixDocument, LatticeError> {
    let source = fs::read_to_string(path).map_err(|source| LatticeError::MatrixRead {
        path: path.display().to_string(),
        source,
    })?;
    parse_matrix(&source, &path.display().to_string())
}

/// Parses matrix YAML from an in-memory string. `origin` names the source
/// in diagnostics.
pub fn parse_matrix(source: &str, origin: &str) -> Result<MatrixDocument, LatticeError> {
    let shape: FileShape =
        serde_yaml::from_str(source).map_err(|source| LatticeError::MatrixParse {
            path: origin.to_string(),
            source,
        })?;
    let (enums, entries) = match shape {
        FileShape::Methods(entries) => (BTreeMap::new(), entries),
        FileShape::Document { enums, methods } => (enums, methods),
    };
    Ok(MatrixDocument {
        enums: enums
            .into_iter()
            .map(|(type_name, variants)| EnumDescriptor::new(type_name, variants))
            .collect(),
        methods: entries
            .into_iter()
            .map(convert_entry)
            .collect::<Result<_, _>>()?,
    })
}

fn convert_entry(entry: MethodEntry) -> Result<MethodDescriptor, LatticeError> {
    let mut method = MethodDescriptor::new(&entry.method);
    if let Some(pattern) = entry.name_pattern {
        method = method.with_name_pattern(pattern);
    }
    if let Some(factory) = entry.factory {
        method = method.with_factory(FactoryReference::new(factory));
    }
    for parameter in entry.parameters {
        method = method.with_parameter(convert_parameter(&entry.method, parameter)?);
    }
    Ok(method)
}

fn convert_parameter(
    method: &str,
    entry: ParameterEntry,
) -> Result<ParameterDescriptor, LatticeError> {
    let mut descriptor =
        ParameterDescriptor::new(&entry.name, parse_type(&entry.param_type));

    if let Some(values) = entry.values {
        let values = values
            .into_iter()
            .map(|v| convert_value(v, method, &entry.name))
            .collect::<Result<Vec<Value>, _>>()?;
        descriptor = descriptor.with_source(ParameterSource::Values { values });
    }
    if let Some(enumeration) = entry.enumeration {
        descriptor = descriptor.with_source(ParameterSource::Enumeration {
            type_name: enumeration.type_name,
            names: enumeration.names,
            mode: enumeration.mode.into(),
        });
    }
    if let Some(range) = entry.range {
        descriptor = descriptor.with_source(ParameterSource::IntRange {
            from: range.from,
            to: range.to,
            step: range.step,
            closed: range.closed,
        });
    }
    if let Some(range) = entry.float_range {
        descriptor = descriptor.with_source(ParameterSource::FloatRange {
            from: range.from,
            to: range.to,
            step: range.step,
            closed: range.closed,
        });
    }
    if let Some(provider) = entry.provider {
        let mut config = ProviderConfig::new();
        for (key, value) in provider.config {
            let key = match key {
                serde_yaml::Value::String(s) => s,
                other => {
                    return Err(LatticeError::MatrixValue {
                        method: method.to_string(),
                        parameter: entry.name.clone(),
                        detail: format!("provider config keys must be strings, got {other:?}"),
                    })
                }
            };
            let value = convert_value(value, method, &entry.name)?;
            config = config.with(key, value);
        }
        descriptor = descriptor.with_source(ParameterSource::Provider {
            name: provider.name,
            config,
        });
    }

    Ok(descriptor)
}

fn parse_type(name: &str) -> ParameterType {
    match name {
        "bool" => ParameterType::Bool,
        "int" => ParameterType::Int,
        "float" => ParameterType::Float,
        "str" => ParameterType::Str,
        other => ParameterType::Enum(other.to_string()),
    }
}

fn convert_value(
    value: serde_yaml::Value,
    method: &str,
    parameter: &str,
) -> Result<Value, LatticeError> {
    match value {
        serde_yaml::Value::Bool(b) => Ok(Value::Bool(b)),
        serde_yaml::Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(Value::Int(i))
            } else if let Some(x) = n.as_f64() {
                Ok(Value::Float(x))
            } else {
                Err(LatticeError::MatrixValue {
                    method: method.to_string(),
                    parameter: parameter.to_string(),
                    detail: format!("number {n} fits neither i64 nor f64"),
                })
            }
        }
        serde_yaml::Value::String(s) => Ok(Value::Str(s)),
        other => Err(LatticeError::MatrixValue {
            method: method.to_string(),
            parameter: parameter.to_string(),
            detail: format!("{other:?}"),
        }),
    }
}
