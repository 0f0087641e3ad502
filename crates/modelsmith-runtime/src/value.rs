use chrono::NaiveDateTime;
use sqlx::mysql::{MySql, MySqlArguments};
use sqlx::query::Query;

/// A positional statement argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Bool(bool),
    Float(f64),
    Timestamp(NaiveDateTime),
    Text(String),
}

impl Value {
    /// True for values that carry no information for a save: `NULL`, the
    /// empty string and the zero timestamp. Numeric zero and `false` are real
    /// values and never count as absent.
    pub fn is_absent(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Text(text) => text.is_empty(),
            Value::Timestamp(ts) => *ts == NaiveDateTime::default(),
            Value::Int(_) | Value::Bool(_) | Value::Float(_) => false,
        }
    }

    /// True for the zero value of a key: `NULL`, `0` or the empty string.
    pub fn is_zero_key(&self) -> bool {
        match self {
            Value::Null => true,
            Value::Int(value) => *value == 0,
            Value::Text(text) => text.is_empty(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::Timestamp(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Text(value.clone())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// Bind every argument to the query in order.
pub(crate) fn bind_all<'q>(
    mut query: Query<'q, MySql, MySqlArguments>,
    args: &[Value],
) -> Query<'q, MySql, MySqlArguments> {
    for arg in args {
        query = match arg.clone() {
            Value::Null => query.bind(None::<String>),
            Value::Int(value) => query.bind(value),
            Value::Bool(value) => query.bind(value),
            Value::Float(value) => query.bind(value),
            Value::Timestamp(value) => query.bind(value),
            Value::Text(value) => query.bind(value),
        };
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_numbers_are_values_not_absence() {
        assert!(!Value::Int(0).is_absent());
        assert!(!Value::Bool(false).is_absent());
        assert!(!Value::Float(0.0).is_absent());
        assert!(Value::Text(String::new()).is_absent());
        assert!(Value::Null.is_absent());
        assert!(Value::Timestamp(NaiveDateTime::default()).is_absent());
    }

    #[test]
    fn options_convert_to_null() {
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert_eq!(Value::from(Some("a")), Value::Text("a".to_string()));
    }

    #[test]
    fn zero_key_detection() {
        assert!(Value::Int(0).is_zero_key());
        assert!(Value::from("").is_zero_key());
        assert!(!Value::Int(7).is_zero_key());
        assert!(!Value::from("sku-1").is_zero_key());
    }
}
