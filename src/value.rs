use std::fmt;

/// A candidate argument value, type-erased into a tagged union.
///
/// The engine combines values without knowing the parameter types they will
/// eventually bind to; final type checking belongs to the invocation
/// boundary. Equality is structural and category-strict: `Int(1)` and
/// `Float(1.0)` are distinct values and both survive deduplication.
///
/// # Examples
///
/// ```rust
/// use lattice::value::Value;
/// let v = Value::Int(3);
/// assert_eq!(v.type_name(), "Int");
/// assert_eq!(v.to_string(), "3");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// A constant of a registered enum-like type, identified by type and
    /// variant name. The ordering of constants lives in the registry's
    /// `EnumDescriptor`, not here.
    Enum {
        type_name: String,
        variant: String,
    },
}

impl Value {
    /// Returns the value's category name as a string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use lattice::value::Value;
    /// assert_eq!(Value::Bool(true).type_name(), "Bool");
    /// ```
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "Bool",
            Value::Int(_) => "Int",
            Value::Float(_) => "Float",
            Value::Str(_) => "Str",
            Value::Enum { .. } => "Enum",
        }
    }

    /// Convenience constructor for enum constants.
    pub fn enum_constant(type_name: impl Into<String>, variant: impl Into<String>) -> Self {
        Value::Enum {
            type_name: type_name.into(),
            variant: variant.into(),
        }
    }

    /// Returns the contained integer if this is an `Int` value.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the contained string slice if this is a `Str` value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }
}

/// Renders the bare payload: this is exactly the `{arguments}`/`{k}`
/// rendering used by the display-name formatter. Enum constants render as
/// their variant name alone, the way a test author reads them.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
            Value::Str(s) => write!(f, "{}", s),
            Value::Enum { variant, .. } => write!(f, "{}", variant),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_and_float_are_distinct() {
        assert_ne!(Value::Int(1), Value::Float(1.0));
    }

    #[test]
    fn display_renders_bare_payload() {
        assert_eq!(Value::Str("hi".into()).to_string(), "hi");
        assert_eq!(Value::enum_constant("Color", "RED").to_string(), "RED");
        assert_eq!(Value::Float(2.5).to_string(), "2.5");
    }
}
