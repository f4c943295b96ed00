//! Port value types and literal values
//!
//! `ValueType` describes what a data port carries, `Value` is a concrete
//! default value typed into the prompt. Literal text is parsed with a fixed
//! precedence: float, then integer, then boolean, then plain string.

use std::fmt;

/// Type carried by a data port
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Accepts anything
    Object,
    Float,
    Int,
    Bool,
    String,
    /// A host type known only by name (Vector3, Transform, ...)
    Named(String),
    List(Box<ValueType>),
}

impl ValueType {
    pub fn named(name: &str) -> Self {
        ValueType::Named(name.to_string())
    }

    pub fn list_of(element: ValueType) -> Self {
        ValueType::List(Box::new(element))
    }

    /// Whether a port of this type can receive a value of type `other`
    pub fn accepts(&self, other: &ValueType) -> bool {
        matches!(self, ValueType::Object) || self == other
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueType::Object => write!(f, "object"),
            ValueType::Float => write!(f, "float"),
            ValueType::Int => write!(f, "int"),
            ValueType::Bool => write!(f, "bool"),
            ValueType::String => write!(f, "string"),
            ValueType::Named(name) => write!(f, "{}", name),
            ValueType::List(element) => write!(f, "list<{}>", element),
        }
    }
}

/// A concrete value stored as a port default or variable value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Float(f32),
    Int(i32),
    Bool(bool),
    Str(String),
    Null,
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Float(_) => ValueType::Float,
            Value::Int(_) => ValueType::Int,
            Value::Bool(_) => ValueType::Bool,
            Value::Str(_) => ValueType::String,
            Value::Null => ValueType::Object,
        }
    }

    /// Zero value for a freshly declared variable or port of type `ty`
    pub fn default_for(ty: &ValueType) -> Value {
        match ty {
            ValueType::Float => Value::Float(0.0),
            ValueType::Int => Value::Int(0),
            ValueType::Bool => Value::Bool(false),
            ValueType::String => Value::Str(String::new()),
            ValueType::Object | ValueType::Named(_) | ValueType::List(_) => Value::Null,
        }
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::Str(_))
    }

    /// Empty strings are never written into a port
    pub fn is_empty_string(&self) -> bool {
        matches!(self, Value::Str(s) if s.is_empty())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Float(v) => write!(f, "{}", v),
            Value::Int(v) => write!(f, "{}", v),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Null => write!(f, "null"),
        }
    }
}

/// Parse prompt text into a literal value.
///
/// Only finite floats count as numbers, so `nan` and `inf` stay strings.
pub fn parse_literal(text: &str) -> Value {
    if let Ok(v) = text.parse::<f32>() {
        if v.is_finite() {
            return Value::Float(v);
        }
    }
    if let Ok(v) = text.parse::<i32>() {
        return Value::Int(v);
    }
    if text.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if text.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    Value::Str(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_precedence() {
        assert_eq!(parse_literal("3"), Value::Float(3.0));
        assert_eq!(parse_literal("3.5"), Value::Float(3.5));
        assert_eq!(parse_literal("-2"), Value::Float(-2.0));
        assert_eq!(parse_literal("true"), Value::Bool(true));
        assert_eq!(parse_literal("FALSE"), Value::Bool(false));
        assert_eq!(parse_literal("3abc"), Value::Str("3abc".to_string()));
    }

    #[test]
    fn test_parse_non_finite_is_string() {
        assert_eq!(parse_literal("nan"), Value::Str("nan".to_string()));
        assert_eq!(parse_literal("inf"), Value::Str("inf".to_string()));
    }

    #[test]
    fn test_empty_string() {
        let v = parse_literal("");
        assert!(v.is_empty_string());
        assert!(v.is_string());
        assert!(!Value::Str("x".to_string()).is_empty_string());
    }

    #[test]
    fn test_accepts() {
        assert!(ValueType::Object.accepts(&ValueType::Float));
        assert!(ValueType::Float.accepts(&ValueType::Float));
        assert!(!ValueType::Float.accepts(&ValueType::Int));
        assert!(!ValueType::String.accepts(&ValueType::Object));
        assert!(ValueType::named("Vector3").accepts(&ValueType::named("Vector3")));
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Value::default_for(&ValueType::String), Value::Str(String::new()));
        assert_eq!(Value::default_for(&ValueType::Float), Value::Float(0.0));
        assert_eq!(Value::default_for(&ValueType::named("Transform")), Value::Null);
        assert_eq!(
            Value::default_for(&ValueType::list_of(ValueType::Int)),
            Value::Null
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Float(5.0).to_string(), "5");
        assert_eq!(Value::Str("hi".to_string()).to_string(), "\"hi\"");
        assert_eq!(ValueType::list_of(ValueType::Float).to_string(), "list<float>");
    }
}
