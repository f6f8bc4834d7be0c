//! The dynamically typed payload of a value socket.

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use super::type_token::TypeToken;
use crate::error::{GraphError, Result};

/// Integer 2-D point.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// A value flowing through a value socket.
///
/// Each variant corresponds to exactly one [`TypeToken`].
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Float(OrderedFloat<f64>),
    Text(String),
    Point(Point),
}

impl Value {
    pub fn type_token(&self) -> TypeToken {
        match self {
            Value::Boolean(_) => TypeToken::Boolean,
            Value::Integer(_) => TypeToken::Integer,
            Value::Float(_) => TypeToken::Float,
            Value::Text(_) => TypeToken::Text,
            Value::Point(_) => TypeToken::Point,
        }
    }

    /// Checked extraction. Fails with `TypeMismatch` instead of coercing.
    pub fn get<T: FromValue>(&self) -> Result<T> {
        T::from_value(self).ok_or(GraphError::TypeMismatch {
            expected: T::TOKEN,
            found: self.type_token(),
        })
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}

/// Rust types that have a [`TypeToken`] and can be read out of a [`Value`].
pub trait FromValue: Sized {
    const TOKEN: TypeToken;

    fn from_value(value: &Value) -> Option<Self>;
}

impl FromValue for bool {
    const TOKEN: TypeToken = TypeToken::Boolean;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Boolean(v) => Some(*v),
            _ => None,
        }
    }
}

impl FromValue for i64 {
    const TOKEN: TypeToken = TypeToken::Integer;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_integer()
    }
}

impl FromValue for f64 {
    const TOKEN: TypeToken = TypeToken::Float;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(v.into_inner()),
            _ => None,
        }
    }
}

impl FromValue for String {
    const TOKEN: TypeToken = TypeToken::Text;

    fn from_value(value: &Value) -> Option<Self> {
        value.as_text().map(str::to_string)
    }
}

impl FromValue for Point {
    const TOKEN: TypeToken = TypeToken::Point;

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Point(p) => Some(*p),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(OrderedFloat(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<Point> for Value {
    fn from(v: Point) -> Self {
        Value::Point(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_token_matches_variant() {
        assert_eq!(Value::from(true).type_token(), TypeToken::Boolean);
        assert_eq!(Value::from(3_i64).type_token(), TypeToken::Integer);
        assert_eq!(Value::from(0.5).type_token(), TypeToken::Float);
        assert_eq!(Value::from("hi").type_token(), TypeToken::Text);
        assert_eq!(Value::from(Point::new(1, 2)).type_token(), TypeToken::Point);
    }

    #[test]
    fn test_get_rejects_other_types() {
        let value = Value::from(7_i64);
        assert_eq!(value.get::<i64>().unwrap(), 7);

        match value.get::<String>() {
            Err(GraphError::TypeMismatch { expected, found }) => {
                assert_eq!(expected, TypeToken::Text);
                assert_eq!(found, TypeToken::Integer);
            }
            other => panic!("expected TypeMismatch, got {:?}", other),
        }
        // no silent int -> float widening
        assert!(value.get::<f64>().is_err());
    }

    #[test]
    fn test_value_json_shape() {
        let json = serde_json::to_value(Value::from(Point::new(3, -4))).unwrap();
        assert_eq!(json["type"], "point");
        assert_eq!(json["value"]["x"], 3);
        assert_eq!(json["value"]["y"], -4);
    }
}
