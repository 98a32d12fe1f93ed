use sql_dynamic_rows::prelude::*;
use sql_dynamic_rows::test_utils::{create_test_cursor, native, raw};
use sql_dynamic_rows::{ArrayParseError, CellError};

fn strict() -> DecodeOptions {
    DecodeOptions::from(DecodingMode::Strict)
}

#[test]
fn strict_mode_reports_bad_numeric() {
    let mut cursor = create_test_cursor(
        &[("id", "INT4"), ("total", "NUMERIC")],
        vec![
            vec![native(NativeValue::Int(1)), raw("1.0")],
            vec![native(NativeValue::Int(2)), raw("NaNgarbage")],
        ],
    );

    let err = decode_to_mappings_with_options(&mut cursor, strict()).unwrap_err();
    match err {
        DecodeError::Cell { row, column, source } => {
            assert_eq!(row, 1);
            assert_eq!(column, "total");
            assert_eq!(source, CellError::InvalidNumeric("NaNgarbage".to_string()));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unexpected_raw_kind_is_omitted_or_reported() {
    let build = || {
        create_test_cursor(
            &[("id", "INT4"), ("total", "NUMERIC"), ("ref", "UUID")],
            vec![vec![
                native(NativeValue::Int(1)),
                native(NativeValue::Bool(true)),
                native(NativeValue::Int(7)),
            ]],
        )
    };

    let rows = decode_to_mappings(&mut build()).unwrap();
    assert_eq!(rows[0].len(), 1);
    assert_eq!(rows[0].get("id"), Some(&DecodedValue::Int(1)));

    let err = decode_to_mappings_with_options(&mut build(), strict()).unwrap_err();
    match err {
        DecodeError::Cell { row, column, source } => {
            assert_eq!(row, 0);
            assert_eq!(column, "total");
            assert_eq!(
                source,
                CellError::UnexpectedRawValue {
                    expected: "bytes",
                    found: "bool",
                }
            );
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn strict_mode_reports_bad_array() {
    let mut cursor = create_test_cursor(&[("ids", "_INT4")], vec![vec![raw("{1,two}")]]);

    let err = decode_to_mappings_with_options(&mut cursor, strict()).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::Cell {
            source: CellError::InvalidArray(ArrayParseError::InvalidElement { index: 1, .. }),
            ..
        }
    ));
}

#[test]
fn lenient_mode_turns_bad_array_into_empty_array() {
    let mut cursor = create_test_cursor(
        &[("ids", "_INT4"), ("nested", "_TEXT")],
        vec![vec![raw("{1,two}"), raw("{{a},{b}}")]],
    );

    let rows = decode_to_mappings(&mut cursor).unwrap();
    assert_eq!(rows[0].get("ids"), Some(&DecodedValue::Array(ArrayValue::Int(vec![]))));
    assert_eq!(rows[0].get("nested"), Some(&DecodedValue::Array(ArrayValue::Text(vec![]))));
}

#[test]
fn strict_mode_reports_scan_failure() {
    let mut cursor = create_test_cursor(
        &[("a", "TEXT")],
        vec![vec![native(NativeValue::Text("x".to_string()))]],
    )
    .with_scan_failure(0, CursorError::Row("protocol error".to_string()));

    let err = decode_to_sequences_with_options(&mut cursor, strict()).unwrap_err();
    assert!(matches!(err, DecodeError::Scan { row: 0, .. }));
}

#[test]
fn lenient_mode_skips_scan_failure() {
    let mut cursor = create_test_cursor(
        &[("a", "TEXT"), ("b", "TEXT")],
        vec![
            vec![
                native(NativeValue::Text("x".to_string())),
                native(NativeValue::Text("y".to_string())),
            ],
            vec![
                native(NativeValue::Text("z".to_string())),
                native(NativeValue::Text("w".to_string())),
            ],
        ],
    )
    .with_scan_failure(0, CursorError::Row("protocol error".to_string()));

    let rows = decode_to_sequences(&mut cursor).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], vec![None, None]);
    assert_eq!(
        rows[1],
        vec![
            Some(DecodedValue::Text("z".to_string())),
            Some(DecodedValue::Text("w".to_string()))
        ]
    );
}

#[test]
fn strict_mode_still_decodes_clean_results() {
    let mut cursor = create_test_cursor(
        &[("id", "INT4"), ("ref", "UUID"), ("tags", "_TEXT")],
        vec![vec![
            native(NativeValue::Int(5)),
            raw("123e4567-e89b-12d3-a456-426614174000"),
            raw("{}"),
        ]],
    );

    let rows = RowDecoder::new(strict()).decode(&mut cursor).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].len(), 3);
}

#[test]
fn options_load_from_json_config() {
    let options: DecodeOptions = serde_json::from_str(r#"{"strict_decoding": true}"#).unwrap();
    assert_eq!(options, strict());
    assert_eq!(RowDecoder::new(options).options().mode(), DecodingMode::Strict);
}
