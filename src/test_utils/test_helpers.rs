//! Helper utilities for testing and development.

use crate::cursor::{ColumnDescriptor, MemoryCursor};
use crate::types::NativeValue;

/// Create column descriptors from `(name, declared type)` pairs.
#[must_use]
pub fn columns(specs: &[(&str, &str)]) -> Vec<ColumnDescriptor> {
    specs
        .iter()
        .map(|(name, declared_type)| ColumnDescriptor::new(*name, *declared_type))
        .collect()
}

/// A raw cell holding the wire text of `text`, as drivers report numerics, uuids and arrays.
#[must_use]
pub fn raw(text: &str) -> Option<NativeValue> {
    Some(NativeValue::Blob(text.as_bytes().to_vec()))
}

/// A raw cell holding a native value.
#[must_use]
pub fn native(value: NativeValue) -> Option<NativeValue> {
    Some(value)
}

/// Create an in-memory cursor with the given columns and rows.
#[must_use]
pub fn create_test_cursor(
    specs: &[(&str, &str)],
    rows: Vec<Vec<Option<NativeValue>>>,
) -> MemoryCursor {
    MemoryCursor::new(columns(specs)).with_rows(rows)
}
