use super::{ColumnDescriptor, Cursor, RawSlot};
use crate::error::CursorError;
use crate::types::NativeValue;

/// A [`Cursor`] over rows that are already in memory.
///
/// Each cell is an `Option<NativeValue>`; `None` means the cursor leaves that slot unfilled.
/// Useful for callers holding pre-fetched rows, and for exercising failure paths:
/// ```rust
/// use sql_dynamic_rows::prelude::*;
///
/// let mut cursor = MemoryCursor::new(vec![ColumnDescriptor::new("id", "INT4")])
///     .with_row(vec![Some(NativeValue::Int(1))]);
/// let rows = decode_to_mappings(&mut cursor)?;
/// assert_eq!(rows[0].get("id"), Some(&DecodedValue::Int(1)));
/// # Ok::<(), DecodeError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryCursor {
    columns: Vec<ColumnDescriptor>,
    rows: Vec<Vec<Option<NativeValue>>>,
    metadata_error: Option<String>,
    scan_failure: Option<(usize, CursorError)>,
    next_row: usize,
    current: Option<usize>,
}

impl MemoryCursor {
    #[must_use]
    pub fn new(columns: Vec<ColumnDescriptor>) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_row(mut self, cells: Vec<Option<NativeValue>>) -> Self {
        self.rows.push(cells);
        self
    }

    #[must_use]
    pub fn with_rows(mut self, rows: impl IntoIterator<Item = Vec<Option<NativeValue>>>) -> Self {
        self.rows.extend(rows);
        self
    }

    /// Make every metadata call fail with `message`.
    #[must_use]
    pub fn with_metadata_failure(mut self, message: impl Into<String>) -> Self {
        self.metadata_error = Some(message.into());
        self
    }

    /// Make the scan of row `row` (zero-based) fail with `error`.
    ///
    /// A `CursorError::Column` failure fills the slots before that column first.
    #[must_use]
    pub fn with_scan_failure(mut self, row: usize, error: CursorError) -> Self {
        self.scan_failure = Some((row, error));
        self
    }

    /// Number of rows handed out by [`Cursor::advance`] so far.
    #[must_use]
    pub fn rows_advanced(&self) -> usize {
        self.next_row
    }
}

impl Cursor for MemoryCursor {
    fn column_descriptors(&self) -> Result<Vec<ColumnDescriptor>, CursorError> {
        match &self.metadata_error {
            Some(message) => Err(CursorError::Metadata(message.clone())),
            None => Ok(self.columns.clone()),
        }
    }

    fn advance(&mut self) -> bool {
        if self.next_row < self.rows.len() {
            self.current = Some(self.next_row);
            self.next_row += 1;
            true
        } else {
            self.current = None;
            false
        }
    }

    fn scan_current_row(&mut self, slots: &mut [RawSlot]) -> Result<(), CursorError> {
        let Some(row_idx) = self.current else {
            return Err(CursorError::Row("no current row".to_string()));
        };
        let cells = &self.rows[row_idx];

        let failure = match &self.scan_failure {
            Some((failing_row, error)) if *failing_row == row_idx => Some(error.clone()),
            _ => None,
        };
        let fill_until = match &failure {
            Some(CursorError::Column { column, .. }) => *column,
            Some(_) => 0,
            None => slots.len(),
        };

        for (slot, cell) in slots.iter_mut().zip(cells).take(fill_until) {
            if let Some(value) = cell {
                slot.set(value.clone());
            }
        }

        if let Some(error) = failure {
            return Err(error);
        }
        if cells.len() != slots.len() {
            return Err(CursorError::Row(format!(
                "row has {} cells, expected {}",
                cells.len(),
                slots.len()
            )));
        }
        Ok(())
    }
}
