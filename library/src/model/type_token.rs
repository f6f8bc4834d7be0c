//! Runtime type identity of socket values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of the value type a value socket carries.
///
/// Connections between value sockets and assignments into them are gated by
/// plain equality of tokens. There is no subtyping and no coercion.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TypeToken {
    /// `bool`
    Boolean,
    /// `i64`
    Integer,
    /// `f64`
    Float,
    /// `String`
    Text,
    /// Integer 2-D point
    Point,
}

impl TypeToken {
    pub const ALL: [TypeToken; 5] = [
        TypeToken::Boolean,
        TypeToken::Integer,
        TypeToken::Float,
        TypeToken::Text,
        TypeToken::Point,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            TypeToken::Boolean => "Boolean",
            TypeToken::Integer => "Integer",
            TypeToken::Float => "Float",
            TypeToken::Text => "Text",
            TypeToken::Point => "Point",
        }
    }
}

impl fmt::Display for TypeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
