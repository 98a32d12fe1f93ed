//! Type-driven decoding of cursor rows into [`DecodedRow`] mappings.

mod array;
mod strategy;

pub use strategy::DecodeStrategy;
pub(crate) use strategy::CellOutcome;

use crate::cursor::{ColumnDescriptor, Cursor, RawSlot};
use crate::error::{CellError, DecodeError};
use crate::options::DecodeOptions;
use crate::results::DecodedRow;
use crate::types::ScanType;

/// A column resolved to its decode strategy before the row loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnPlan {
    pub name: String,
    pub scan_type: ScanType,
    pub strategy: DecodeStrategy,
}

impl From<&ColumnDescriptor> for ColumnPlan {
    fn from(column: &ColumnDescriptor) -> Self {
        Self {
            name: column.name.clone(),
            scan_type: column.scan_type,
            strategy: DecodeStrategy::for_type_name(&column.declared_type),
        }
    }
}

/// Decodes every row of a cursor into a name-keyed mapping.
///
/// Columns are matched against a fixed table of PostgreSQL type names:
/// text/uuid/numeric/int4/bool arrays, scalar `NUMERIC`/`DECIMAL` and `UUID`. Every other
/// column passes its native value through.
///
/// With default options, per-cell failures are not reported: a numeric cell whose text does not
/// parse is left out of that row's mapping, a malformed array literal decodes to an empty array,
/// and a failed row scan only decodes the cells the cursor managed to fill. Enable
/// [`DecodeOptions::strict_decoding`] to get these as errors instead.
///
/// ```rust
/// use sql_dynamic_rows::prelude::*;
///
/// let mut cursor = MemoryCursor::new(vec![
///     ColumnDescriptor::new("price", "NUMERIC"),
///     ColumnDescriptor::new("tags", "_TEXT"),
/// ])
/// .with_row(vec![
///     Some(NativeValue::Blob(b"9.99".to_vec())),
///     Some(NativeValue::Blob(b"{new,sale}".to_vec())),
/// ]);
///
/// let rows = RowDecoder::default().decode(&mut cursor)?;
/// assert_eq!(rows[0].get("price"), Some(&DecodedValue::Float(9.99)));
/// # Ok::<(), DecodeError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RowDecoder {
    options: DecodeOptions,
}

impl RowDecoder {
    #[must_use]
    pub fn new(options: DecodeOptions) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> DecodeOptions {
        self.options
    }

    /// Consume `cursor` and decode every remaining row.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError::SchemaIntrospection` if the cursor cannot report its columns; no row
    /// is advanced in that case. With strict decoding, also returns `DecodeError::Scan` and
    /// `DecodeError::Cell` for the first failing row or cell.
    pub fn decode<C: Cursor + ?Sized>(
        &self,
        cursor: &mut C,
    ) -> Result<Vec<DecodedRow>, DecodeError> {
        let columns = cursor
            .column_descriptors()
            .map_err(DecodeError::SchemaIntrospection)?;
        self.decode_with_columns(cursor, &columns)
    }

    /// Decode using column metadata the caller already fetched from `cursor`.
    ///
    /// # Errors
    ///
    /// With strict decoding, returns `DecodeError::Scan` or `DecodeError::Cell` for the first
    /// failing row or cell.
    pub fn decode_with_columns<C: Cursor + ?Sized>(
        &self,
        cursor: &mut C,
        columns: &[ColumnDescriptor],
    ) -> Result<Vec<DecodedRow>, DecodeError> {
        let plans: Vec<ColumnPlan> = columns.iter().map(ColumnPlan::from).collect();
        tracing::debug!(
            columns = plans.len(),
            strict = self.options.strict_decoding,
            "decoding result cursor"
        );

        let mut rows = Vec::new();
        while cursor.advance() {
            let row = self.decode_current_row(cursor, &plans, rows.len())?;
            rows.push(row);
        }

        tracing::debug!(rows = rows.len(), "decoded result cursor");
        Ok(rows)
    }

    fn decode_current_row<C: Cursor + ?Sized>(
        &self,
        cursor: &mut C,
        plans: &[ColumnPlan],
        row_idx: usize,
    ) -> Result<DecodedRow, DecodeError> {
        let mut slots: Vec<RawSlot> = plans
            .iter()
            .map(|plan| RawSlot::new(plan.scan_type))
            .collect();

        if let Err(source) = cursor.scan_current_row(&mut slots) {
            if self.options.strict_decoding {
                return Err(DecodeError::Scan {
                    row: row_idx,
                    source,
                });
            }
            tracing::warn!(
                row = row_idx,
                error = %source,
                "row scan failed, decoding filled cells only"
            );
        }

        let mut row = DecodedRow::with_capacity(plans.len());
        for (plan, slot) in plans.iter().zip(slots.iter_mut()) {
            let outcome = match slot.take() {
                Some(raw) => plan.strategy.decode(raw),
                None => CellOutcome::Failed {
                    error: CellError::Unscanned,
                    fallback: None,
                },
            };

            match outcome {
                CellOutcome::Value(value) => {
                    row.insert(plan.name.clone(), value);
                }
                CellOutcome::Failed { error, fallback } => {
                    if self.options.strict_decoding {
                        return Err(DecodeError::Cell {
                            row: row_idx,
                            column: plan.name.clone(),
                            source: error,
                        });
                    }
                    tracing::debug!(
                        row = row_idx,
                        column = %plan.name,
                        error = %error,
                        kept = fallback.is_some(),
                        "cell decode failed"
                    );
                    if let Some(value) = fallback {
                        row.insert(plan.name.clone(), value);
                    }
                }
            }
        }
        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::MemoryCursor;
    use crate::error::CursorError;
    use crate::types::NativeValue;
    use crate::value::{ArrayValue, DecodedValue};

    fn blob(text: &str) -> Option<NativeValue> {
        Some(NativeValue::Blob(text.as_bytes().to_vec()))
    }

    #[test]
    fn plans_resolve_strategy_once_per_column() {
        let plan = ColumnPlan::from(&ColumnDescriptor::new("ids", "_INT4"));
        assert_eq!(plan.strategy, DecodeStrategy::IntArray);
        assert_eq!(plan.scan_type, ScanType::Bytes);
    }

    #[test]
    fn decodes_mixed_row() {
        let mut cursor = MemoryCursor::new(vec![
            ColumnDescriptor::new("id", "INT4"),
            ColumnDescriptor::new("total", "NUMERIC"),
            ColumnDescriptor::new("flags", "_BOOL"),
        ])
        .with_row(vec![Some(NativeValue::Int(1)), blob("3.25"), blob("{t,NULL}")]);

        let rows = RowDecoder::default().decode(&mut cursor).unwrap();
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.get("id"), Some(&DecodedValue::Int(1)));
        assert_eq!(row.get("total"), Some(&DecodedValue::Float(3.25)));
        assert_eq!(
            row.get("flags"),
            Some(&DecodedValue::Array(ArrayValue::Bool(vec![Some(true), None])))
        );
    }

    #[test]
    fn lenient_scan_failure_keeps_filled_cells() {
        let mut cursor = MemoryCursor::new(vec![
            ColumnDescriptor::new("a", "INT4"),
            ColumnDescriptor::new("b", "INT4"),
        ])
        .with_row(vec![Some(NativeValue::Int(1)), Some(NativeValue::Int(2))])
        .with_scan_failure(
            0,
            CursorError::Column {
                column: 1,
                message: "conversion failed".to_string(),
            },
        );

        let rows = RowDecoder::default().decode(&mut cursor).unwrap();
        assert_eq!(rows[0].get("a"), Some(&DecodedValue::Int(1)));
        assert!(!rows[0].contains_key("b"));
    }

    #[test]
    fn strict_scan_failure_is_reported() {
        let mut cursor = MemoryCursor::new(vec![ColumnDescriptor::new("a", "INT4")])
            .with_rows(vec![vec![Some(NativeValue::Int(1))], vec![Some(NativeValue::Int(2))]])
            .with_scan_failure(1, CursorError::Row("connection reset".to_string()));

        let decoder = RowDecoder::new(DecodeOptions::default().with_strict_decoding(true));
        let err = decoder.decode(&mut cursor).unwrap_err();
        assert!(matches!(err, DecodeError::Scan { row: 1, .. }));
        assert!(err.is_cell_level());
    }

    #[test]
    fn strict_numeric_failure_names_the_column() {
        let mut cursor = MemoryCursor::new(vec![ColumnDescriptor::new("total", "DECIMAL")])
            .with_row(vec![blob("abc")]);

        let decoder = RowDecoder::new(DecodeOptions::default().with_strict_decoding(true));
        match decoder.decode(&mut cursor) {
            Err(DecodeError::Cell { row, column, source }) => {
                assert_eq!(row, 0);
                assert_eq!(column, "total");
                assert_eq!(source, CellError::InvalidNumeric("abc".to_string()));
            }
            other => panic!("expected a cell error, got {other:?}"),
        }
    }

    #[test]
    fn unfilled_slot_is_omitted() {
        let mut cursor = MemoryCursor::new(vec![
            ColumnDescriptor::new("a", "TEXT"),
            ColumnDescriptor::new("b", "TEXT"),
        ])
        .with_row(vec![Some(NativeValue::Text("x".to_string())), None]);

        let rows = RowDecoder::default().decode(&mut cursor).unwrap();
        assert_eq!(rows[0].len(), 1);
        assert_eq!(rows[0].get("a"), Some(&DecodedValue::Text("x".to_string())));
    }

    #[test]
    fn injected_columns_skip_metadata_call() {
        let columns = vec![ColumnDescriptor::new("id", "INT8")];
        let mut cursor = MemoryCursor::new(columns.clone())
            .with_row(vec![Some(NativeValue::Int(9))])
            .with_metadata_failure("metadata already consumed");

        let rows = RowDecoder::default()
            .decode_with_columns(&mut cursor, &columns)
            .unwrap();
        assert_eq!(rows[0].get("id"), Some(&DecodedValue::Int(9)));
    }
}
