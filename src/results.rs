use std::collections::HashMap;
use std::collections::hash_map;

use serde::Serialize;
use serde_json::Value as JsonValue;

use crate::value::DecodedValue;

/// One decoded row in positional form: one entry per column, in cursor column order.
///
/// `None` marks a column whose name is missing from the row's mapping.
pub type SequenceRow = Vec<Option<DecodedValue>>;

/// One decoded row, keyed by column name.
///
/// Column names are not unique in SQL results. When two columns share a name the later
/// column's value replaces the earlier one, so a row can hold fewer entries than the result has
/// columns. Keys may also be missing when a cell failed to decode in lenient mode, so rows of
/// the same result do not always share a key set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct DecodedRow {
    values: HashMap<String, DecodedValue>,
}

impl DecodedRow {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: HashMap::with_capacity(capacity),
        }
    }

    /// Store `value` under `column`, returning the value it replaced.
    pub fn insert(
        &mut self,
        column: impl Into<String>,
        value: DecodedValue,
    ) -> Option<DecodedValue> {
        self.values.insert(column.into(), value)
    }

    /// Get a value from the row by column name
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&DecodedValue> {
        self.values.get(column)
    }

    #[must_use]
    pub fn contains_key(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, DecodedValue> {
        self.values.iter()
    }

    #[must_use]
    pub fn into_inner(self) -> HashMap<String, DecodedValue> {
        self.values
    }

    /// Render the row as a JSON object.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if a value cannot be represented as JSON.
    pub fn to_json(&self) -> Result<JsonValue, serde_json::Error> {
        serde_json::to_value(self)
    }
}

impl From<HashMap<String, DecodedValue>> for DecodedRow {
    fn from(values: HashMap<String, DecodedValue>) -> Self {
        Self { values }
    }
}

impl FromIterator<(String, DecodedValue)> for DecodedRow {
    fn from_iter<I: IntoIterator<Item = (String, DecodedValue)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for DecodedRow {
    type Item = (String, DecodedValue);
    type IntoIter = hash_map::IntoIter<String, DecodedValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<'a> IntoIterator for &'a DecodedRow {
    type Item = (&'a String, &'a DecodedValue);
    type IntoIter = hash_map::Iter<'a, String, DecodedValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
