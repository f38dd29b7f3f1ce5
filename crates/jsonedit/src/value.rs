//! JSON value types and the compact serializer.
//!
//! This module defines the [`Value`] enum, which represents one node of a
//! loaded JSON document, and its [`Display`](core::fmt::Display)
//! implementation, which renders compact, key-order-preserving JSON text.

pub use crate::map::Map;

/// The elements of a JSON array.
pub type Array = Vec<Value>;

/// A JSON value as defined by [RFC 8259].
///
/// Numbers keep the distinction the document made: `1` loads as
/// [`Integer`](Value::Integer), `1.0` and `1e0` as [`Real`](Value::Real).
///
/// # Examples
///
/// ```
/// use jsonedit::{Map, Value};
///
/// let mut map = Map::new();
/// map.insert("key".to_string(), Value::String("value".into()));
/// map.insert("n".to_string(), Value::Real(2.0));
/// let v = Value::Object(map);
/// assert_eq!(v.to_string(), r#"{"key":"value","n":2.0}"#);
/// ```
///
/// [RFC 8259]: https://datatracker.ietf.org/doc/html/rfc8259
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    /// `null`.
    #[default]
    Null,
    /// `true` or `false`.
    Boolean(bool),
    /// A number written without fraction or exponent.
    Integer(i64),
    /// A number written with a fraction or exponent. Always finite.
    Real(f64),
    /// A string, unescaped.
    String(String),
    /// An ordered list of values.
    Array(Array),
    /// Key/value entries in document order.
    Object(Map),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Array(v)
    }
}

impl From<Map> for Value {
    fn from(v: Map) -> Self {
        Self::Object(v)
    }
}

impl Value {
    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Value::Null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` for `true` and `false`.
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Boolean(..))
    }

    /// Returns `true` for both [`Integer`](Value::Integer) and
    /// [`Real`](Value::Real).
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Integer(..) | Self::Real(..))
    }

    /// Returns `true` if the value is a [`String`](Value::String).
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    /// Returns `true` if the value is an [`Array`](Value::Array).
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Returns `true` if the value is an [`Object`](Value::Object).
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }

    /// Number of entries of an object or elements of an array; `None` for
    /// every other value.
    ///
    /// ```
    /// use jsonedit::Value;
    ///
    /// assert_eq!(Value::Array(vec![Value::Null; 3]).len(), Some(3));
    /// assert_eq!(Value::Integer(5).len(), None);
    /// ```
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Array(items) => Some(items.len()),
            Self::Object(map) => Some(map.len()),
            _ => None,
        }
    }

    /// Name of the variant, for diagnostics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Real(_) => "real",
            Self::String(_) => "string",
            Self::Array(_) => "array",
            Self::Object(_) => "object",
        }
    }
}

/// Escapes a string for inclusion in a JSON string literal.
///
/// Quotes, backslashes and control characters (<= U+001F) are escaped;
/// everything else, including non-ASCII text, is written through unchanged.
pub(crate) fn write_escaped_string<W: core::fmt::Write>(src: &str, f: &mut W) -> core::fmt::Result {
    for c in src.chars() {
        match c {
            '"' => f.write_str("\\\"")?,
            '\\' => f.write_str("\\\\")?,
            '\u{08}' => f.write_str("\\b")?,
            '\u{0C}' => f.write_str("\\f")?,
            '\n' => f.write_str("\\n")?,
            '\r' => f.write_str("\\r")?,
            '\t' => f.write_str("\\t")?,
            c if (c as u32) < 0x20 => write!(f, "\\u{:04X}", c as u32)?,
            _ => f.write_char(c)?,
        }
    }
    Ok(())
}

/// Writes a real so that it loads back as the same real: shortest
/// round-trip digits, with `.0` appended when the digits alone would read as
/// an integer.
pub(crate) fn write_real<W: core::fmt::Write>(n: f64, f: &mut W) -> core::fmt::Result {
    let digits = n.to_string();
    f.write_str(&digits)?;
    if !digits.contains(['.', 'e', 'E']) {
        f.write_str(".0")?;
    }
    Ok(())
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => f.write_str(if *b { "true" } else { "false" }),
            Value::Integer(n) => write!(f, "{n}"),
            Value::Real(n) => write_real(*n, f),
            Value::String(s) => {
                f.write_str("\"")?;
                write_escaped_string(s, f)?;
                f.write_str("\"")
            }
            Value::Array(arr) => {
                f.write_str("[")?;
                let mut first = true;
                for v in arr {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    write!(f, "{v}")?;
                }
                f.write_str("]")
            }
            Value::Object(map) => {
                f.write_str("{")?;
                let mut first = true;
                for (k, v) in map.iter() {
                    if !first {
                        f.write_str(",")?;
                    }
                    first = false;
                    f.write_str("\"")?;
                    write_escaped_string(k, f)?;
                    write!(f, "\":{v}")?;
                }
                f.write_str("}")
            }
        }
    }
}

// Serializes as plain JSON (not the externally tagged enum form) so values
// can be compared against other JSON libraries.
#[cfg(any(test, feature = "serde"))]
mod serde_impls {
    use serde::{Serialize, Serializer, ser::SerializeMap};

    use super::{Map, Value};

    impl Serialize for Value {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match self {
                Value::Null => serializer.serialize_unit(),
                Value::Boolean(b) => serializer.serialize_bool(*b),
                Value::Integer(n) => serializer.serialize_i64(*n),
                Value::Real(n) => serializer.serialize_f64(*n),
                Value::String(s) => serializer.serialize_str(s),
                Value::Array(items) => items.serialize(serializer),
                Value::Object(map) => map.serialize(serializer),
            }
        }
    }

    impl Serialize for Map {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            let mut state = serializer.serialize_map(Some(self.len()))?;
            for (k, v) in self.iter() {
                state.serialize_entry(k, v)?;
            }
            state.end()
        }
    }
}
