//! Convenient imports for common functionality.
//!
//! This module re-exports the most commonly used types and functions
//! to make it easier to get started with the library.

pub use crate::cursor::{ColumnDescriptor, Cursor, MemoryCursor, RawSlot};
pub use crate::decode::{DecodeStrategy, RowDecoder};
pub use crate::dynamic::{
    decode_to_mappings, decode_to_mappings_with_options, decode_to_sequences,
    decode_to_sequences_with_options,
};
pub use crate::error::{CursorError, DecodeError};
pub use crate::options::{DecodeOptions, DecodingMode};
pub use crate::project::RowProjector;
pub use crate::results::{DecodedRow, SequenceRow};
pub use crate::types::{NativeValue, ScanType};
pub use crate::value::{ArrayValue, DecodedValue};

#[cfg(feature = "postgres")]
pub use crate::postgres::SimpleQueryCursor;
