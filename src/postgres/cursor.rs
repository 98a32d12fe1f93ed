use tokio_postgres::types::Type;
use tokio_postgres::{Column, SimpleQueryMessage, SimpleQueryRow};

use super::text::native_from_text;
use crate::cursor::{ColumnDescriptor, Cursor, RawSlot};
use crate::error::CursorError;
use crate::types::NativeValue;

/// A [`Cursor`] over text-protocol rows from `tokio_postgres::Client::simple_query`.
///
/// The simple query protocol does not report column types, so the columns of a prepared
/// statement for the same SQL supply them:
/// ```rust,no_run
/// use sql_dynamic_rows::prelude::*;
/// use sql_dynamic_rows::postgres::SimpleQueryCursor;
///
/// async fn demo(client: &tokio_postgres::Client) -> Result<(), Box<dyn std::error::Error>> {
///     let sql = "SELECT id, price, tags FROM items";
///     let stmt = client.prepare(sql).await?;
///     let messages = client.simple_query(sql).await?;
///
///     let mut cursor = SimpleQueryCursor::new(stmt.columns(), messages);
///     let rows = decode_to_mappings(&mut cursor)?;
///     println!("{} rows", rows.len());
///     Ok(())
/// }
/// ```
pub struct SimpleQueryCursor {
    columns: Vec<ColumnDescriptor>,
    rows: std::vec::IntoIter<SimpleQueryRow>,
    current: Option<SimpleQueryRow>,
}

impl SimpleQueryCursor {
    /// Build a cursor from the messages of one `simple_query` call; non-row messages are ignored.
    #[must_use]
    pub fn new(columns: &[Column], messages: Vec<SimpleQueryMessage>) -> Self {
        let rows = messages
            .into_iter()
            .filter_map(|message| match message {
                SimpleQueryMessage::Row(row) => Some(row),
                _ => None,
            })
            .collect();
        Self::from_rows(columns, rows)
    }

    #[must_use]
    pub fn from_rows(columns: &[Column], rows: Vec<SimpleQueryRow>) -> Self {
        let columns = columns
            .iter()
            .map(|col| describe_column(col.name(), col.type_()))
            .collect();
        Self {
            columns,
            rows: rows.into_iter(),
            current: None,
        }
    }
}

/// Descriptor for a statement column; the scan type follows the Postgres type name.
fn describe_column(name: &str, ty: &Type) -> ColumnDescriptor {
    ColumnDescriptor::new(name, ty.name())
}

/// Fill `slots` from one row of text cells, in column order.
///
/// Stops at the first cell that does not convert; slots before it stay filled.
fn fill_slots(
    columns: &[ColumnDescriptor],
    cells: &[Option<&str>],
    slots: &mut [RawSlot],
) -> Result<(), CursorError> {
    if cells.len() != slots.len() {
        return Err(CursorError::Row(format!(
            "row has {} columns, statement describes {}",
            cells.len(),
            slots.len()
        )));
    }

    for (idx, (slot, cell)) in slots.iter_mut().zip(cells).enumerate() {
        let value = match cell {
            None => NativeValue::Null,
            Some(text) => {
                let declared_type = columns
                    .get(idx)
                    .map_or("", |col| col.declared_type.as_str());
                native_from_text(declared_type, slot.scan_type(), text)
                    .map_err(|message| CursorError::Column { column: idx, message })?
            }
        };
        slot.set(value);
    }
    Ok(())
}

impl Cursor for SimpleQueryCursor {
    fn column_descriptors(&self) -> Result<Vec<ColumnDescriptor>, CursorError> {
        Ok(self.columns.clone())
    }

    fn advance(&mut self) -> bool {
        self.current = self.rows.next();
        self.current.is_some()
    }

    fn scan_current_row(&mut self, slots: &mut [RawSlot]) -> Result<(), CursorError> {
        let Some(row) = &self.current else {
            return Err(CursorError::Row("no current row".to_string()));
        };
        let cells = (0..row.len())
            .map(|idx| {
                row.try_get(idx).map_err(|e| CursorError::Column {
                    column: idx,
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<Option<&str>>, CursorError>>()?;
        fill_slots(&self.columns, &cells, slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{CellOutcome, ColumnPlan};
    use crate::types::ScanType;
    use crate::value::{ArrayValue, DecodedValue};

    fn statement_columns() -> Vec<ColumnDescriptor> {
        vec![
            describe_column("id", &Type::INT4),
            describe_column("price", &Type::NUMERIC),
            describe_column("ref", &Type::UUID),
            describe_column("counts", &Type::INT4_ARRAY),
            describe_column("tags", &Type::TEXT_ARRAY),
            describe_column("active", &Type::BOOL),
            describe_column("note", &Type::TEXT),
        ]
    }

    fn slots_for(columns: &[ColumnDescriptor]) -> Vec<RawSlot> {
        columns.iter().map(|col| RawSlot::new(col.scan_type)).collect()
    }

    fn decode_slot(column: &ColumnDescriptor, slot: &mut RawSlot) -> DecodedValue {
        let raw = slot.take().expect("slot filled");
        match ColumnPlan::from(column).strategy.decode(raw) {
            CellOutcome::Value(value) => value,
            CellOutcome::Failed { error, .. } => panic!("{}: {error}", column.name),
        }
    }

    #[test]
    fn statement_types_drive_scan_types() {
        let columns = statement_columns();
        let scan_types: Vec<ScanType> = columns.iter().map(|col| col.scan_type).collect();
        assert_eq!(
            scan_types,
            vec![
                ScanType::Int,
                ScanType::Bytes,
                ScanType::Bytes,
                ScanType::Bytes,
                ScanType::Bytes,
                ScanType::Bool,
                ScanType::Text,
            ]
        );
        assert_eq!(columns[3].declared_type, "_int4");
        assert_eq!(columns[4].declared_type, "_text");
    }

    #[test]
    fn text_row_decodes_through_each_strategy() {
        let columns = statement_columns();
        let mut slots = slots_for(&columns);
        let cells = [
            Some("7"),
            Some("19.95"),
            Some("123e4567-e89b-12d3-a456-426614174000"),
            Some("{1,2,NULL}"),
            Some(r#"{a,"b c"}"#),
            Some("t"),
            None,
        ];

        fill_slots(&columns, &cells, &mut slots).unwrap();

        let decoded: Vec<DecodedValue> = columns
            .iter()
            .zip(slots.iter_mut())
            .map(|(column, slot)| decode_slot(column, slot))
            .collect();
        assert_eq!(
            decoded,
            vec![
                DecodedValue::Int(7),
                DecodedValue::Float(19.95),
                DecodedValue::Text("123e4567-e89b-12d3-a456-426614174000".to_string()),
                DecodedValue::Array(ArrayValue::Int(vec![Some(1), Some(2), None])),
                DecodedValue::Array(ArrayValue::Text(vec![
                    Some("a".to_string()),
                    Some("b c".to_string())
                ])),
                DecodedValue::Bool(true),
                DecodedValue::Native(NativeValue::Null),
            ]
        );
    }

    #[test]
    fn sql_null_fills_slot_with_null() {
        let columns = vec![describe_column("price", &Type::NUMERIC)];
        let mut slots = slots_for(&columns);

        fill_slots(&columns, &[None], &mut slots).unwrap();
        assert_eq!(slots[0].value(), Some(&NativeValue::Null));
    }

    #[test]
    fn width_mismatch_is_a_row_error() {
        let columns = statement_columns();
        let mut slots = slots_for(&columns);

        let err = fill_slots(&columns, &[Some("1"), Some("2")], &mut slots).unwrap_err();
        assert!(matches!(err, CursorError::Row(_)));
        assert!(slots.iter().all(|slot| !slot.is_filled()));
    }

    #[test]
    fn bad_cell_stops_after_filling_earlier_slots() {
        let columns = vec![
            describe_column("id", &Type::INT4),
            describe_column("active", &Type::BOOL),
            describe_column("note", &Type::TEXT),
        ];
        let mut slots = slots_for(&columns);

        let err = fill_slots(&columns, &[Some("1"), Some("maybe"), Some("x")], &mut slots)
            .unwrap_err();
        assert!(matches!(err, CursorError::Column { column: 1, .. }));
        assert_eq!(slots[0].value(), Some(&NativeValue::Int(1)));
        assert!(!slots[1].is_filled());
        assert!(!slots[2].is_filled());
    }
}
