//! Decode PostgreSQL result cursors into dynamically-typed rows.
//!
//! For callers that do not know a query's schema at compile time: each column's declared type
//! name selects a decode strategy (arrays, numeric text, uuids, or a passthrough of the driver's
//! native value), and every row comes back either as a name-keyed [`DecodedRow`] or as a
//! positional [`SequenceRow`].
//!
//! ```rust
//! use sql_dynamic_rows::prelude::*;
//!
//! let mut cursor = MemoryCursor::new(vec![
//!     ColumnDescriptor::new("id", "INT4"),
//!     ColumnDescriptor::new("scores", "_INT4"),
//! ])
//! .with_row(vec![
//!     Some(NativeValue::Int(1)),
//!     Some(NativeValue::Blob(b"{10,20}".to_vec())),
//! ]);
//!
//! let rows = decode_to_sequences(&mut cursor)?;
//! assert_eq!(
//!     rows[0],
//!     vec![
//!         Some(DecodedValue::Int(1)),
//!         Some(DecodedValue::Array(ArrayValue::Int(vec![Some(10), Some(20)]))),
//!     ]
//! );
//! # Ok::<(), DecodeError>(())
//! ```

pub mod prelude;

pub mod cursor;
pub mod decode;
pub mod dynamic;
pub mod error;
pub mod options;
pub mod project;
pub mod results;
pub mod types;
pub mod value;

#[cfg(feature = "postgres")]
pub mod postgres;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use cursor::{ColumnDescriptor, Cursor, MemoryCursor, RawSlot};
pub use decode::{ColumnPlan, DecodeStrategy, RowDecoder};
pub use dynamic::{
    decode_to_mappings, decode_to_mappings_with_options, decode_to_sequences,
    decode_to_sequences_with_options,
};
pub use error::{ArrayParseError, CellError, CursorError, DecodeError};
pub use options::{DecodeOptions, DecodingMode};
pub use project::RowProjector;
pub use results::{DecodedRow, SequenceRow};
pub use types::{NativeValue, ScanType};
pub use value::{ArrayValue, DecodedValue};
