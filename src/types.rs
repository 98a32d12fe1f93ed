use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::Value as JsonValue;

/// A value as the driver natively produced it for one cell.
///
/// Cursors deposit these into [`RawSlot`](crate::cursor::RawSlot)s. Columns that fall through
/// the decode table keep their native value:
/// ```rust
/// use sql_dynamic_rows::prelude::*;
///
/// let cells = vec![
///     NativeValue::Int(1),
///     NativeValue::Blob(b"12.50".to_vec()),
///     NativeValue::Null,
/// ];
/// # let _ = cells;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum NativeValue {
    /// NULL value
    Null,
    /// Integer value (64-bit)
    Int(i64),
    /// Floating point value (64-bit)
    Float(f64),
    /// Text/string value
    Text(String),
    /// Boolean value
    Bool(bool),
    /// Timestamp value
    Timestamp(NaiveDateTime),
    /// JSON value
    Json(JsonValue),
    /// Raw bytes (wire text of numerics, uuids and arrays, or binary data)
    Blob(Vec<u8>),
}

impl NativeValue {
    /// Check if this value is NULL
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short name of the variant, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Text(_) => "text",
            Self::Bool(_) => "bool",
            Self::Timestamp(_) => "timestamp",
            Self::Json(_) => "json",
            Self::Blob(_) => "bytes",
        }
    }

    /// Borrow the raw bytes of a byte-like cell (`Blob` or `Text`).
    #[must_use]
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Blob(bytes) => Some(bytes),
            Self::Text(text) => Some(text.as_bytes()),
            _ => None,
        }
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
    pub fn as_text(&self) -> Option<&str> {
        if let Self::Text(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        if let Self::Timestamp(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_json(&self) -> Option<&JsonValue> {
        if let Self::Json(value) = self {
            Some(value)
        } else {
            None
        }
    }

    #[must_use]
    pub fn as_blob(&self) -> Option<&[u8]> {
        if let Self::Blob(bytes) = self {
            Some(bytes)
        } else {
            None
        }
    }
}

/// The native scan type a driver reports for a column.
///
/// Decides what kind of [`NativeValue`] a cursor deposits into the column's slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScanType {
    /// Raw wire bytes (numeric, uuid, arrays, bytea, unrecognized types)
    #[default]
    Bytes,
    Int,
    Float,
    Bool,
    Text,
    Timestamp,
    Json,
}

impl ScanType {
    /// Scan type the PostgreSQL driver reports for a declared type name.
    ///
    /// Matching ignores ASCII case, so `INT4` and `int4` agree.
    #[must_use]
    pub fn for_declared_type(type_name: &str) -> Self {
        let name = type_name.to_ascii_lowercase();
        match name.as_str() {
            "int2" | "int4" | "int8" | "serial" | "bigserial" | "oid" => Self::Int,
            "float4" | "float8" => Self::Float,
            "bool" => Self::Bool,
            "text" | "varchar" | "bpchar" | "char" | "name" => Self::Text,
            "timestamp" | "timestamptz" | "date" => Self::Timestamp,
            "json" | "jsonb" => Self::Json,
            _ => Self::Bytes,
        }
    }
}
