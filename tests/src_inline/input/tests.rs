use std::io::{Cursor, Write};

use flate2::Compression;
use flate2::write::GzEncoder;

use super::*;
use crate::error::EvalError;

const TWO_QUERIES: &str = r#"{"query_id":"q1","predicted":[{"relevance":1.0,"perspectives":"A"},{"relevance":0.0,"perspectives":"B"}],"gold":[{"relevance":1.0,"perspectives":"A"},{"relevance":1.0,"perspectives":"B"}],"targets":{"A":0.5}}

{"query_id":"q2","predicted":[{"relevance":1.0,"perspectives":["A","B"]}],"gold":[{"relevance":1.0,"perspectives":["A","B"]}]}
"#;

#[test]
fn test_parse_query_records_skips_blank_lines() {
    let records = parse_query_records(Cursor::new(TWO_QUERIES)).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].query_id, "q1");
    assert_eq!(records[0].predicted.len(), 2);
    assert_eq!(records[0].targets.as_ref().and_then(|t| t.get("A")), Some(0.5));
    assert!(records[1].targets.is_none());
    assert_eq!(records[1].gold.items()[0].perspectives.len(), 2);
}

#[test]
fn test_parse_error_reports_line_number() {
    let input = "{\"query_id\":\"q1\",\"predicted\":[],\"gold\":[]}\nnot json\n";
    let err = parse_query_records(Cursor::new(input)).unwrap_err();
    match err {
        EvalError::Parse { line, .. } => assert_eq!(line, 2),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_duplicate_query_ids_keep_first() {
    let input = concat!(
        "{\"query_id\":\"q1\",\"predicted\":[],\"gold\":[]}\n",
        "{\"query_id\":\"q1\",\"predicted\":[{\"relevance\":1.0}],\"gold\":[{\"relevance\":1.0}]}\n",
    );
    let records = parse_query_records(Cursor::new(input)).unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].predicted.is_empty());
}

#[test]
fn test_empty_input_is_rejected() {
    let err = parse_query_records(Cursor::new("\n\n")).unwrap_err();
    assert!(matches!(err, EvalError::Config(_)));
}

#[test]
fn test_read_query_records_from_gzip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("queries.jsonl.gz");
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(TWO_QUERIES.as_bytes()).unwrap();
    std::fs::write(&path, encoder.finish().unwrap()).unwrap();

    let records = read_query_records(&path).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].query_id, "q2");
}

#[test]
fn test_read_query_records_plain_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("queries.jsonl");
    std::fs::write(&path, TWO_QUERIES).unwrap();
    assert_eq!(read_query_records(&path).unwrap().len(), 2);
}

#[test]
fn test_load_targets_validates() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("targets.json");
    std::fs::write(&good, r#"{"A":0.33,"B":0.33,"C":0.33}"#).unwrap();
    let targets = load_targets(&good).unwrap();
    assert_eq!(targets.len(), 3);

    // Overlapping groups may sum past 1; the sum is checked per query.
    let overlapping = dir.path().join("overlapping.json");
    std::fs::write(&overlapping, r#"{"A":0.5,"B":0.5,"X":0.5}"#).unwrap();
    assert_eq!(load_targets(&overlapping).unwrap().len(), 3);

    let bad = dir.path().join("bad.json");
    std::fs::write(&bad, r#"{"A":1.5}"#).unwrap();
    assert!(matches!(load_targets(&bad), Err(EvalError::Config(_))));

    let missing = dir.path().join("missing.json");
    assert!(matches!(load_targets(&missing), Err(EvalError::Io(_))));
}
