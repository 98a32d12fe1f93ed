use super::array::{parse_bool_element, parse_elements, split_array_literal};
use crate::error::CellError;
use crate::types::NativeValue;
use crate::value::{ArrayValue, DecodedValue};

/// How a column's raw cells are turned into [`DecodedValue`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeStrategy {
    /// Array literal into text elements (`_TEXT`, `_UUID`)
    TextArray,
    /// Array literal into float elements (`_NUMERIC`, `_DECIMAL`)
    FloatArray,
    /// Array literal into integer elements (`_INT4`)
    IntArray,
    /// Array literal into boolean elements (`_BOOL`)
    BoolArray,
    /// Decimal text into a float (`NUMERIC`, `DECIMAL`)
    Numeric,
    /// Raw bytes kept verbatim as text (`UUID`)
    Uuid,
    /// The native value, unchanged
    Passthrough,
}

const STRATEGY_TABLE: &[(&str, DecodeStrategy)] = &[
    ("_TEXT", DecodeStrategy::TextArray),
    ("_UUID", DecodeStrategy::TextArray),
    ("_NUMERIC", DecodeStrategy::FloatArray),
    ("_DECIMAL", DecodeStrategy::FloatArray),
    ("_INT4", DecodeStrategy::IntArray),
    ("_BOOL", DecodeStrategy::BoolArray),
    ("NUMERIC", DecodeStrategy::Numeric),
    ("DECIMAL", DecodeStrategy::Numeric),
    ("UUID", DecodeStrategy::Uuid),
];

/// Result of decoding one cell.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CellOutcome {
    Value(DecodedValue),
    /// `fallback` is what lenient decoding stores instead; `None` leaves the key out of the row.
    Failed {
        error: CellError,
        fallback: Option<DecodedValue>,
    },
}

impl DecodeStrategy {
    /// Look up the strategy for a declared type name, ignoring ASCII case.
    #[must_use]
    pub fn for_type_name(type_name: &str) -> Self {
        STRATEGY_TABLE
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(type_name))
            .map_or(Self::Passthrough, |(_, strategy)| *strategy)
    }

    fn empty_array(self) -> Option<DecodedValue> {
        let items = match self {
            Self::TextArray => ArrayValue::Text(Vec::new()),
            Self::FloatArray => ArrayValue::Float(Vec::new()),
            Self::IntArray => ArrayValue::Int(Vec::new()),
            Self::BoolArray => ArrayValue::Bool(Vec::new()),
            Self::Numeric | Self::Uuid | Self::Passthrough => return None,
        };
        Some(DecodedValue::Array(items))
    }

    pub(crate) fn decode(self, raw: NativeValue) -> CellOutcome {
        if raw.is_null() {
            return CellOutcome::Value(DecodedValue::Native(NativeValue::Null));
        }
        match self {
            Self::Passthrough => CellOutcome::Value(DecodedValue::from(raw)),
            Self::Numeric => decode_numeric(&raw),
            Self::Uuid => decode_uuid(raw),
            Self::TextArray | Self::FloatArray | Self::IntArray | Self::BoolArray => {
                match self.decode_array(&raw) {
                    Ok(items) => CellOutcome::Value(DecodedValue::Array(items)),
                    Err(error) => CellOutcome::Failed {
                        error,
                        fallback: self.empty_array(),
                    },
                }
            }
        }
    }

    fn decode_array(self, raw: &NativeValue) -> Result<ArrayValue, CellError> {
        let bytes = raw.as_bytes().ok_or(CellError::UnexpectedRawValue {
            expected: "bytes",
            found: raw.kind(),
        })?;
        let text = std::str::from_utf8(bytes).map_err(|_| CellError::InvalidUtf8)?;
        let elements = split_array_literal(text)?;

        let items = match self {
            Self::FloatArray => {
                ArrayValue::Float(parse_elements(elements, "float", parse_float_text)?)
            }
            Self::IntArray => ArrayValue::Int(parse_elements(elements, "integer", |s| {
                s.parse::<i64>().ok()
            })?),
            Self::BoolArray => {
                ArrayValue::Bool(parse_elements(elements, "boolean", parse_bool_element)?)
            }
            Self::TextArray | Self::Numeric | Self::Uuid | Self::Passthrough => {
                ArrayValue::Text(elements)
            }
        };
        Ok(items)
    }
}

fn is_infinity_literal(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// Parse decimal text into a float. Out-of-range values are rejected rather than rounded to
/// infinity; the `Infinity`/`NaN` keywords are accepted.
pub(crate) fn parse_float_text(text: &str) -> Option<f64> {
    let value: f64 = text.parse().ok()?;
    if value.is_infinite() && !is_infinity_literal(text) {
        return None;
    }
    Some(value)
}

fn decode_numeric(raw: &NativeValue) -> CellOutcome {
    let parsed = match raw {
        NativeValue::Float(value) => Ok(*value),
        #[allow(clippy::cast_precision_loss)]
        NativeValue::Int(value) => Ok(*value as f64),
        _ => match raw.as_bytes() {
            Some(bytes) => {
                let text = String::from_utf8_lossy(bytes);
                parse_float_text(&text).ok_or_else(|| CellError::InvalidNumeric(text.into_owned()))
            }
            None => Err(CellError::UnexpectedRawValue {
                expected: "bytes",
                found: raw.kind(),
            }),
        },
    };
    match parsed {
        Ok(value) => CellOutcome::Value(DecodedValue::Float(value)),
        Err(error) => CellOutcome::Failed {
            error,
            fallback: None,
        },
    }
}

fn decode_uuid(raw: NativeValue) -> CellOutcome {
    match raw {
        NativeValue::Text(text) => CellOutcome::Value(DecodedValue::Text(text)),
        NativeValue::Blob(bytes) => match String::from_utf8(bytes) {
            Ok(text) => CellOutcome::Value(DecodedValue::Text(text)),
            Err(err) => CellOutcome::Failed {
                error: CellError::InvalidUtf8,
                fallback: Some(DecodedValue::Text(
                    String::from_utf8_lossy(err.as_bytes()).into_owned(),
                )),
            },
        },
        other => CellOutcome::Failed {
            error: CellError::UnexpectedRawValue {
                expected: "bytes",
                found: other.kind(),
            },
            fallback: None,
        },
    }
}
