//! Universal value type for node and relationship properties.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Property value as stored in the graph.
///
/// A closed variant over the scalar types the building data uses, plus
/// lists and the two temporal types planning documents carry. Serializes
/// as plain JSON (no type tags), so a `PropertyMap` can be returned to a
/// client verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<Value>),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
}

// ============================================================================
// Type checking
// ============================================================================

impl Value {
    pub fn is_null(&self) -> bool { matches!(self, Value::Null) }
    pub fn is_numeric(&self) -> bool { matches!(self, Value::Int(_) | Value::Float(_)) }

    /// Attempt to extract as f64
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Attempt to extract as &str
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Render as a display label: strings verbatim, other non-null
    /// values in their textual form, null as `None`.
    pub fn as_label(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Numeric addition. Integer + integer stays integral unless it
    /// overflows; any float operand promotes the result to float.
    /// Returns `None` when either side is not numeric.
    pub fn add_numeric(&self, other: &Value) -> Option<Value> {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => Some(
                a.checked_add(*b)
                    .map(Value::Int)
                    .unwrap_or(Value::Float(*a as f64 + *b as f64)),
            ),
            (a, b) => Some(Value::Float(a.as_float()? + b.as_float()?)),
        }
    }
}

// ============================================================================
// Conversions (From impls)
// ============================================================================

impl From<bool> for Value { fn from(v: bool) -> Self { Value::Bool(v) } }
impl From<i32> for Value { fn from(v: i32) -> Self { Value::Int(v as i64) } }
impl From<i64> for Value { fn from(v: i64) -> Self { Value::Int(v) } }
impl From<f64> for Value { fn from(v: f64) -> Self { Value::Float(v) } }
impl From<String> for Value { fn from(v: String) -> Self { Value::String(v) } }
impl From<&str> for Value { fn from(v: &str) -> Self { Value::String(v.to_owned()) } }
impl From<NaiveDate> for Value { fn from(v: NaiveDate) -> Self { Value::Date(v) } }
impl From<DateTime<Utc>> for Value { fn from(v: DateTime<Utc>) -> Self { Value::DateTime(v) } }
impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self { Value::List(v.into_iter().map(Into::into).collect()) }
}
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self { v.map(Into::into).unwrap_or(Value::Null) }
}

// ============================================================================
// Display
// ============================================================================

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::String(s) => write!(f, "\"{}\"", s.replace('"', "\\\"")),
            Value::List(l) => {
                write!(f, "[")?;
                for (i, v) in l.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{v}")?;
                }
                write!(f, "]")
            }
            Value::Date(d) => write!(f, "{d}"),
            Value::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
        }
    }
}

// ============================================================================
// Comparison (Cypher ordering rules)
// ============================================================================

impl Value {
    /// Cypher-style comparison. Returns None for incompatible types (like SQL NULL behavior).
    pub fn cypher_cmp(&self, other: &Value) -> Option<std::cmp::Ordering> {
        match (self, other) {
            (Value::Null, _) | (_, Value::Null) => None,
            (Value::Bool(a), Value::Bool(b)) => a.partial_cmp(b),
            (Value::Int(a), Value::Int(b)) => a.partial_cmp(b),
            (Value::Float(a), Value::Float(b)) => a.partial_cmp(b),
            (Value::Int(a), Value::Float(b)) => (*a as f64).partial_cmp(b),
            (Value::Float(a), Value::Int(b)) => a.partial_cmp(&(*b as f64)),
            (Value::String(a), Value::String(b)) => a.partial_cmp(b),
            (Value::Date(a), Value::Date(b)) => a.partial_cmp(b),
            (Value::DateTime(a), Value::DateTime(b)) => a.partial_cmp(b),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cmp::Ordering;

    #[test]
    fn test_value_from() {
        assert_eq!(Value::from("hello"), Value::String("hello".into()));
        assert_eq!(Value::from(42), Value::Int(42));
        assert_eq!(Value::from(2.5), Value::Float(2.5));
        assert_eq!(Value::from(None::<i64>), Value::Null);
    }

    #[test]
    fn test_serializes_without_tags() {
        let json = serde_json::to_string(&Value::List(vec![
            Value::Int(3),
            Value::Float(1.5),
            Value::from("x"),
            Value::Null,
        ]))
        .unwrap();
        assert_eq!(json, r#"[3,1.5,"x",null]"#);

        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(serde_json::to_string(&Value::Date(date)).unwrap(), r#""2024-05-01""#);
    }

    #[test]
    fn test_labels() {
        assert_eq!(Value::from("Wall").as_label(), Some("Wall".into()));
        assert_eq!(Value::Int(17).as_label(), Some("17".into()));
        assert_eq!(Value::Null.as_label(), None);
    }

    #[test]
    fn test_add_numeric() {
        assert_eq!(Value::Int(5).add_numeric(&Value::Int(3)), Some(Value::Int(8)));
        assert_eq!(Value::Int(1).add_numeric(&Value::Float(0.5)), Some(Value::Float(1.5)));
        assert_eq!(
            Value::Int(i64::MAX).add_numeric(&Value::Int(1)),
            Some(Value::Float(i64::MAX as f64 + 1.0))
        );
        assert_eq!(Value::from("5").add_numeric(&Value::Int(1)), None);
    }

    #[test]
    fn test_comparison() {
        assert_eq!(Value::Null.cypher_cmp(&Value::Null), None);
        assert_eq!(Value::Int(1).cypher_cmp(&Value::Float(1.5)), Some(Ordering::Less));
        assert_eq!(Value::Int(1).cypher_cmp(&Value::from("1")), None);
    }
}
