//! Module: value
//! Responsibility: scalar column values fed to the row identifier.
//! Does not own: row framing or hashing (see `identity`).
//! Boundary: hosts convert their native cells into `Value` before `observe`.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Null token used when a configuration does not name one.
pub const DEFAULT_NULL_TOKEN: &str = "null";

///
/// Value
///
/// One scalar cell of an input row. Only the textual rendering matters to the
/// aggregate; two cells with the same rendering are the same cell.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Append the textual rendering of this value, substituting `null_token`
    /// for `Null`.
    pub fn write_text(&self, out: &mut String, null_token: &str) {
        match self {
            Self::Null => out.push_str(null_token),
            Self::Bool(v) => out.push_str(if *v { "true" } else { "false" }),
            Self::Int(v) => {
                let _ = write!(out, "{v}");
            }
            Self::Uint(v) => {
                let _ = write!(out, "{v}");
            }
            Self::Float(v) => {
                let _ = write!(out, "{v}");
            }
            Self::Text(v) => out.push_str(v),
            Self::Blob(bytes) => {
                for byte in bytes {
                    let _ = write!(out, "{byte:02x}");
                }
            }
        }
    }

    /// Render this value as owned text.
    #[must_use]
    pub fn to_text(&self, null_token: &str) -> String {
        let mut out = String::new();
        self.write_text(&mut out, null_token);
        out
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Self::Uint(u64::from(v))
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Uint(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Blob(v)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_scalars_as_text() {
        assert_eq!(Value::from(true).to_text(DEFAULT_NULL_TOKEN), "true");
        assert_eq!(Value::from(-12i64).to_text(DEFAULT_NULL_TOKEN), "-12");
        assert_eq!(Value::from(7u64).to_text(DEFAULT_NULL_TOKEN), "7");
        assert_eq!(Value::from(1.5).to_text(DEFAULT_NULL_TOKEN), "1.5");
        assert_eq!(Value::from("abc").to_text(DEFAULT_NULL_TOKEN), "abc");
        assert_eq!(Value::Blob(vec![0x0a, 0xff]).to_text(DEFAULT_NULL_TOKEN), "0aff");
    }

    #[test]
    fn null_uses_substitution_token() {
        assert_eq!(Value::Null.to_text(DEFAULT_NULL_TOKEN), "null");
        assert_eq!(Value::Null.to_text(""), "");
        assert_eq!(Value::from(None::<i64>), Value::Null);
        assert!(Value::from(None::<&str>).is_null());
    }
}
