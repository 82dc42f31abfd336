use super::*;

use caselaw_lib::types::{DecisionDetails, DecisionSummary};

fn summary_record() -> DecisionRecord {
    DecisionRecord::from_summary(DecisionSummary {
        uri: "/decision/5e7c3b8ae4b0b5fa2d8f1a2c".to_string(),
        title: "Smith v Jones [2020] NSWSC 312".to_string(),
        before: "Rothman J".to_string(),
        decision_date: "27 March 2020".to_string(),
        catchwords: "DEFAMATION - imputations".to_string(),
    })
}

fn full_record() -> DecisionRecord {
    summary_record().with_details(DecisionDetails {
        mnc: "Smith v Jones [2020] NSWSC 312".to_string(),
        catchwords: vec!["DEFAMATION".to_string(), "imputations".to_string()],
        parties: vec!["John Smith\n(Plaintiff)".to_string()],
        judgment: vec!["1 HIS HONOUR: ...".to_string()],
        ..Default::default()
    })
}

fn court_entries() -> Vec<DirectoryEntry> {
    vec![
        DirectoryEntry {
            id: "54a634063004de94513d827a".to_string(),
            name: "Children's Court".to_string(),
        },
        DirectoryEntry {
            id: "54a634063004de94513d8281".to_string(),
            name: "Supreme Court".to_string(),
        },
    ]
}

fn render(records: &[DecisionRecord], format: OutputFormat) -> String {
    let mut buf = Vec::new();
    write_decisions(records, format, &mut buf).unwrap();
    String::from_utf8(buf).unwrap()
}

// -- Row builder tests --

#[test]
fn test_build_decision_rows_summary_only() {
    let rows = build_decision_rows(&[summary_record()]);
    assert_eq!(rows.len(), 1);

    let row = &rows[0];
    assert_eq!(row.decision_date, "27 March 2020");
    assert_eq!(row.title, "Smith v Jones [2020] NSWSC 312");
    assert_eq!(row.before, "Rothman J");
    assert_eq!(row.mnc, "");
    assert_eq!(row.uri, "/decision/5e7c3b8ae4b0b5fa2d8f1a2c");
}

#[test]
fn test_build_decision_rows_full_keeps_summary_values() {
    let rows = build_decision_rows(&[full_record()]);
    // Empty scraped title/before/date fall back to the summary.
    assert_eq!(rows[0].title, "Smith v Jones [2020] NSWSC 312");
    assert_eq!(rows[0].before, "Rothman J");
    assert_eq!(rows[0].mnc, "Smith v Jones [2020] NSWSC 312");
}

#[test]
fn test_build_court_rows_numbered_from_one() {
    let rows = build_court_rows(&court_entries());
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].ordinal, 1);
    assert_eq!(rows[1].ordinal, 2);
    assert_eq!(rows[1].name, "Supreme Court");
    assert_eq!(rows[1].id, "54a634063004de94513d8281");
}

// -- CSV output tests --

fn csv_from_rows<T: Serialize>(rows: &[T]) -> String {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    for row in rows {
        wtr.serialize(row).unwrap();
    }
    wtr.flush().unwrap();
    String::from_utf8(wtr.into_inner().unwrap()).unwrap()
}

#[test]
fn test_csv_court_headers() {
    let csv = csv_from_rows(&build_court_rows(&court_entries()));
    let header = csv.lines().next().unwrap();
    assert_eq!(header, "ordinal,name,id");
}

#[test]
fn test_csv_decisions_header_is_export_columns() {
    let csv = render(&[], OutputFormat::Csv);
    let header = csv.lines().next().unwrap();
    assert_eq!(header, CSV_FIELDS.join(","));
    assert_eq!(csv.lines().count(), 1);
}

#[test]
fn test_csv_decision_row_flattens_lists() {
    let csv = render(&[full_record()], OutputFormat::Csv);
    let mut rdr = csv::Reader::from_reader(csv.as_bytes());
    let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].len(), 16);
    assert_eq!(&rows[0][5], "DEFAMATION; imputations");
    assert_eq!(&rows[0][12], "John Smith (Plaintiff)");
}

#[test]
fn test_csv_summary_row_keeps_snippet() {
    let csv = render(&[summary_record()], OutputFormat::Csv);
    let mut rdr = csv::Reader::from_reader(csv.as_bytes());
    let row = rdr.records().next().unwrap().unwrap();
    assert_eq!(&row[5], "DEFAMATION - imputations");
    assert_eq!(&row[3], "");
}

// -- JSON output tests --

#[test]
fn test_json_decisions_use_camel_case_values() {
    let json = render(&[full_record(), summary_record()], OutputFormat::Json);
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    let arr = parsed.as_array().unwrap();
    assert_eq!(arr.len(), 2);
    assert_eq!(arr[0]["decisionDate"], "27 March 2020");
    assert!(arr[0]["catchwords"].is_array());
    assert_eq!(arr[0]["judgment"][0], "1 HIS HONOUR: ...");
    assert!(arr[1]["catchwords"].is_string());
    assert!(arr[1].get("mnc").is_none());
}

#[test]
fn test_json_court_rows_serializable() {
    let value = serde_json::to_value(build_court_rows(&court_entries())).unwrap();
    assert_eq!(value[0]["ordinal"], 1);
    assert_eq!(value[0]["name"], "Children's Court");
}

// -- Markdown output tests --

#[test]
fn test_markdown_decisions_structure() {
    let md = render(&[summary_record()], OutputFormat::Markdown);

    assert!(md.contains('|'));
    assert!(md.contains("---"));
    let header_line = md.lines().next().unwrap();
    assert!(header_line.contains("Date"));
    assert!(header_line.contains("Title"));
    assert!(header_line.contains("Citation"));
}

#[test]
fn test_markdown_empty_produces_headers_only() {
    let mut table = Table::new(build_court_rows(&[]));
    table.with(Style::markdown());
    let md = table.to_string();

    let lines: Vec<&str> = md.lines().collect();
    assert_eq!(lines.len(), 2);
}

#[test]
fn test_table_decisions_contains_values() {
    let table = render(&[summary_record()], OutputFormat::Table);
    assert!(table.contains("Rothman J"));
    assert!(table.contains("/decision/5e7c3b8ae4b0b5fa2d8f1a2c"));
}

// -- RecordSink tests --

#[test]
fn test_record_sink_streams_csv_to_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("results.csv");

    let mut sink = RecordSink::new(OutputFormat::Csv, Some(path.as_path())).unwrap();
    sink.push(summary_record()).unwrap();
    // Rows are on disk before the sink is finished.
    let partial = std::fs::read_to_string(&path).unwrap();
    assert_eq!(partial.lines().count(), 2);

    sink.push(full_record()).unwrap();
    sink.finish().unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written.lines().count(), 3);
}

#[test]
fn test_record_sink_renders_json_on_finish() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("results.json");

    let mut sink = RecordSink::new(OutputFormat::Json, Some(path.as_path())).unwrap();
    sink.push(summary_record()).unwrap();
    assert!(!path.exists());
    sink.finish().unwrap();

    let parsed: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(parsed[0]["uri"], "/decision/5e7c3b8ae4b0b5fa2d8f1a2c");
}
