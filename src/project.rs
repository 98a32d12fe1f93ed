use crate::cursor::Cursor;
use crate::error::DecodeError;
use crate::results::{DecodedRow, SequenceRow};

/// Re-indexes decoded mappings into positional rows.
///
/// Each output row has exactly one entry per column, in the cursor's column order. A column
/// whose name is missing from the mapping yields `None`; columns sharing a name all resolve to
/// the one value the mapping kept for that name.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowProjector;

impl RowProjector {
    /// Project `rows` using the column order reported by `cursor`.
    ///
    /// `rows` must come from decoding the same cursor, or one with the same column names.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::SchemaIntrospection` if the cursor cannot report its column names.
    pub fn project<C: Cursor + ?Sized>(
        cursor: &C,
        rows: &[DecodedRow],
    ) -> Result<Vec<SequenceRow>, DecodeError> {
        let column_names = cursor
            .column_names()
            .map_err(DecodeError::SchemaIntrospection)?;
        Ok(Self::project_with_names(&column_names, rows))
    }

    /// Project `rows` using column names the caller already holds.
    #[must_use]
    pub fn project_with_names(column_names: &[String], rows: &[DecodedRow]) -> Vec<SequenceRow> {
        rows.iter()
            .map(|row| {
                column_names
                    .iter()
                    .map(|name| row.get(name).cloned())
                    .collect()
            })
            .collect()
    }
}
