//! One-call entry points over [`RowDecoder`] and [`RowProjector`].

use crate::cursor::Cursor;
use crate::decode::RowDecoder;
use crate::error::DecodeError;
use crate::options::DecodeOptions;
use crate::project::RowProjector;
use crate::results::{DecodedRow, SequenceRow};

/// Decode every row of `cursor` into a name-keyed mapping, with lenient decoding.
///
/// # Errors
///
/// Returns `DecodeError::SchemaIntrospection` if the cursor cannot report its columns.
pub fn decode_to_mappings<C: Cursor + ?Sized>(
    cursor: &mut C,
) -> Result<Vec<DecodedRow>, DecodeError> {
    decode_to_mappings_with_options(cursor, DecodeOptions::default())
}

/// Decode every row of `cursor` into a name-keyed mapping.
///
/// # Errors
///
/// Returns `DecodeError::SchemaIntrospection` if the cursor cannot report its columns, and with
/// strict decoding the first scan or cell failure.
pub fn decode_to_mappings_with_options<C: Cursor + ?Sized>(
    cursor: &mut C,
    options: DecodeOptions,
) -> Result<Vec<DecodedRow>, DecodeError> {
    RowDecoder::new(options).decode(cursor)
}

/// Decode every row of `cursor` into a positional row, with lenient decoding.
///
/// # Errors
///
/// Returns `DecodeError::SchemaIntrospection` if the cursor cannot report its columns.
pub fn decode_to_sequences<C: Cursor + ?Sized>(
    cursor: &mut C,
) -> Result<Vec<SequenceRow>, DecodeError> {
    decode_to_sequences_with_options(cursor, DecodeOptions::default())
}

/// Decode every row of `cursor` into a positional row.
///
/// Column metadata is read once, before any row is consumed, and the same names order every
/// projected row.
///
/// # Errors
///
/// Returns `DecodeError::SchemaIntrospection` if the cursor cannot report its columns, and with
/// strict decoding the first scan or cell failure.
pub fn decode_to_sequences_with_options<C: Cursor + ?Sized>(
    cursor: &mut C,
    options: DecodeOptions,
) -> Result<Vec<SequenceRow>, DecodeError> {
    let columns = cursor
        .column_descriptors()
        .map_err(DecodeError::SchemaIntrospection)?;
    let column_names: Vec<String> = columns.iter().map(|col| col.name.clone()).collect();
    let rows = RowDecoder::new(options).decode_with_columns(cursor, &columns)?;
    Ok(RowProjector::project_with_names(&column_names, &rows))
}
