use serde::Serialize;

use crate::types::NativeValue;

/// A homogeneous array decoded from an array-typed column.
///
/// `None` elements are SQL NULL elements.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArrayValue {
    Float(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
    Int(Vec<Option<i64>>),
    Bool(Vec<Option<bool>>),
}

impl ArrayValue {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Float(items) => items.len(),
            Self::Text(items) => items.len(),
            Self::Int(items) => items.len(),
            Self::Bool(items) => items.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn as_floats(&self) -> Option<&[Option<f64>]> {
        if let Self::Float(items) = self {
            Some(items)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_texts(&self) -> Option<&[Option<String>]> {
        if let Self::Text(items) = self {
            Some(items)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_ints(&self) -> Option<&[Option<i64>]> {
        if let Self::Int(items) = self {
            Some(items)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_bools(&self) -> Option<&[Option<bool>]> {
        if let Self::Bool(items) = self {
            Some(items)
        } else {
            None
        }
    }
}

/// A typed cell value produced by the decoder.
///
/// The set of variants is closed so callers can match exhaustively:
/// ```rust
/// use sql_dynamic_rows::prelude::*;
///
/// fn describe(value: &DecodedValue) -> String {
///     match value {
///         DecodedValue::Int(i) => format!("int {i}"),
///         DecodedValue::Float(f) => format!("float {f}"),
///         DecodedValue::Text(s) => format!("text {s}"),
///         DecodedValue::Bool(b) => format!("bool {b}"),
///         DecodedValue::Array(items) => format!("array of {}", items.len()),
///         DecodedValue::Native(native) => format!("native {}", native.kind()),
///     }
/// }
/// # let _ = describe(&DecodedValue::Int(1));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DecodedValue {
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Boolean value
    Bool(bool),
    /// Integer value (64-bit)
    Int(i64),
    /// Homogeneous array
    Array(ArrayValue),
    /// Native driver value with no scalar counterpart (NULL, timestamp, JSON, bytes)
    Native(NativeValue),
}

impl DecodedValue {
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Native(NativeValue::Null))
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        if let Self::Int(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        if let Self::Float(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        if let Self::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        if let Self::Bool(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&ArrayValue> {
        if let Self::Array(items) = self {
            Some(items)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_native(&self) -> Option<&NativeValue> {
        if let Self::Native(native) = self {
            Some(native)
        } else {
            None
        }
    }
}

/// Passthrough: scalar natives become the matching scalar variant, everything else stays native.
impl From<NativeValue> for DecodedValue {
    fn from(native: NativeValue) -> Self {
        match native {
            NativeValue::Int(value) => Self::Int(value),
            NativeValue::Float(value) => Self::Float(value),
            NativeValue::Text(value) => Self::Text(value),
            NativeValue::Bool(value) => Self::Bool(value),
            other => Self::Native(other),
        }
    }
}

impl From<ArrayValue> for DecodedValue {
    fn from(items: ArrayValue) -> Self {
        Self::Array(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn passthrough_lifts_scalars() {
        assert_eq!(DecodedValue::from(NativeValue::Int(7)), DecodedValue::Int(7));
        assert_eq!(
            DecodedValue::from(NativeValue::Text("x".into())),
            DecodedValue::Text("x".into())
        );
        assert!(DecodedValue::from(NativeValue::Null).is_null());
        assert_eq!(
            DecodedValue::from(NativeValue::Blob(vec![0xde, 0xad])),
            DecodedValue::Native(NativeValue::Blob(vec![0xde, 0xad]))
        );
    }

    #[test]
    fn serializes_as_plain_json() {
        let value = DecodedValue::Array(ArrayValue::Int(vec![Some(1), None, Some(3)]));
        assert_eq!(serde_json::to_value(&value).unwrap(), json!([1, null, 3]));
        assert_eq!(
            serde_json::to_value(DecodedValue::Native(NativeValue::Null)).unwrap(),
            json!(null)
        );
        assert_eq!(serde_json::to_value(DecodedValue::Float(1.5)).unwrap(), json!(1.5));
    }
}
