use thiserror::Error;

/// Errors reported by a [`Cursor`](crate::cursor::Cursor) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorError {
    #[error("Column metadata unavailable: {0}")]
    Metadata(String),

    #[error("Scan failed for column {column}: {message}")]
    Column { column: usize, message: String },

    #[error("Row scan failed: {0}")]
    Row(String),
}

/// Reasons an `{...}` array literal could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArrayParseError {
    #[error("Array literal must start with '{{'")]
    MissingOpenBrace,

    #[error("Malformed dimension decoration")]
    BadDimensions,

    #[error("Unterminated array literal")]
    Unterminated,

    #[error("Unexpected character {found:?} at byte {position}")]
    UnexpectedCharacter { position: usize, found: char },

    #[error("Multi-dimensional arrays are not supported")]
    Nested,

    #[error("Trailing input after closing '}}'")]
    TrailingInput,

    #[error("Element {index} ({text:?}) is not a valid {element_type}")]
    InvalidElement {
        index: usize,
        text: String,
        element_type: &'static str,
    },
}

/// Why a single cell could not be decoded.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CellError {
    #[error("Invalid numeric text {0:?}")]
    InvalidNumeric(String),

    #[error("Invalid array literal: {0}")]
    InvalidArray(#[from] ArrayParseError),

    #[error("Raw bytes are not valid UTF-8")]
    InvalidUtf8,

    #[error("Cursor did not fill the slot")]
    Unscanned,

    #[error("Expected {expected} from the cursor, found {found}")]
    UnexpectedRawValue {
        expected: &'static str,
        found: &'static str,
    },
}

#[derive(Debug, Error)]
pub enum DecodeError {
    /// The cursor could not report its column metadata. Always fatal.
    #[error("Schema introspection error: {0}")]
    SchemaIntrospection(#[source] CursorError),

    /// Native scan of a row failed (surfaced only with strict decoding).
    #[error("Scan error on row {row}: {source}")]
    Scan {
        row: usize,
        #[source]
        source: CursorError,
    },

    /// A cell could not be decoded (surfaced only with strict decoding).
    #[error("Decode error on row {row}, column `{column}`: {source}")]
    Cell {
        row: usize,
        column: String,
        #[source]
        source: CellError,
    },
}

impl DecodeError {
    /// `true` for errors that only strict decoding reports.
    #[must_use]
    pub fn is_cell_level(&self) -> bool {
        matches!(self, Self::Scan { .. } | Self::Cell { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_nest_under_decode_error() {
        let err = DecodeError::Cell {
            row: 2,
            column: "ids".to_string(),
            source: CellError::InvalidArray(ArrayParseError::Nested),
        };
        assert_eq!(
            err.to_string(),
            "Decode error on row 2, column `ids`: Invalid array literal: \
             Multi-dimensional arrays are not supported"
        );
        assert_eq!(CellError::Unscanned.to_string(), "Cursor did not fill the slot");
    }
}
