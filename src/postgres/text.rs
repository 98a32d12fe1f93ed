use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;

use crate::types::{NativeValue, ScanType};

fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    // timestamp: "YYYY-MM-DD HH:MM:SS[.ffffff]"
    if let Ok(dt) = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(dt);
    }
    // timestamptz: "YYYY-MM-DD HH:MM:SS[.ffffff]+HH[:MM]"
    if let Ok(dt) = DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f%#z") {
        return Some(dt.naive_utc());
    }
    // date: "YYYY-MM-DD"
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

fn hex_digit(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Decode `bytea` hex output (`\x0aff`).
fn parse_bytea(text: &str) -> Result<Vec<u8>, String> {
    let hex = text
        .strip_prefix("\\x")
        .ok_or_else(|| format!("bytea value is not in hex format: {text:?}"))?;
    if hex.len() % 2 != 0 {
        return Err(format!("odd number of hex digits in bytea value {text:?}"));
    }
    hex.as_bytes()
        .chunks(2)
        .map(|pair| match (hex_digit(pair[0]), hex_digit(pair[1])) {
            (Some(hi), Some(lo)) => Ok((hi << 4) | lo),
            _ => Err(format!("invalid hex digit in bytea value {text:?}")),
        })
        .collect()
}

/// Convert one text-protocol cell into the native value its scan type calls for.
///
/// Byte-typed columns (numeric, uuid, arrays, unrecognized types) keep the cell text as raw
/// bytes so the decoder can apply its own strategy; `bytea` hex output is decoded.
///
/// # Errors
/// Returns a message if the text is not a valid value of the column's scan type.
pub fn native_from_text(
    declared_type: &str,
    scan_type: ScanType,
    text: &str,
) -> Result<NativeValue, String> {
    match scan_type {
        ScanType::Int => text
            .parse::<i64>()
            .map(NativeValue::Int)
            .map_err(|e| format!("invalid integer {text:?}: {e}")),
        ScanType::Float => text
            .parse::<f64>()
            .map(NativeValue::Float)
            .map_err(|e| format!("invalid float {text:?}: {e}")),
        ScanType::Bool => match text {
            "t" | "true" => Ok(NativeValue::Bool(true)),
            "f" | "false" => Ok(NativeValue::Bool(false)),
            other => Err(format!("invalid boolean {other:?}")),
        },
        ScanType::Timestamp => parse_timestamp(text)
            .map(NativeValue::Timestamp)
            .ok_or_else(|| format!("invalid timestamp {text:?}")),
        ScanType::Json => serde_json::from_str::<Value>(text)
            .map(NativeValue::Json)
            .map_err(|e| format!("invalid json: {e}")),
        ScanType::Text => Ok(NativeValue::Text(text.to_string())),
        ScanType::Bytes if declared_type.eq_ignore_ascii_case("bytea") => {
            parse_bytea(text).map(NativeValue::Blob)
        }
        ScanType::Bytes => Ok(NativeValue::Blob(text.as_bytes().to_vec())),
    }
}
