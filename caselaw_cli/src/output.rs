use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use caselaw_lib::types::{DecisionRecord, CSV_FIELDS};
use caselaw_lib::DirectoryEntry;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

#[derive(Tabled, Serialize)]
struct DecisionRow {
    #[tabled(rename = "Date")]
    #[serde(rename = "Date")]
    decision_date: String,
    #[tabled(rename = "Title")]
    #[serde(rename = "Title")]
    title: String,
    #[tabled(rename = "Before")]
    #[serde(rename = "Before")]
    before: String,
    #[tabled(rename = "Citation")]
    #[serde(rename = "Citation")]
    mnc: String,
    #[tabled(rename = "Uri")]
    #[serde(rename = "Uri")]
    uri: String,
}

#[derive(Tabled, Serialize)]
struct CourtRow {
    #[tabled(rename = "#")]
    #[serde(rename = "ordinal")]
    ordinal: usize,
    #[tabled(rename = "Name")]
    #[serde(rename = "name")]
    name: String,
    #[tabled(rename = "Id")]
    #[serde(rename = "id")]
    id: String,
}

// -- Row builders --

fn build_decision_rows(records: &[DecisionRecord]) -> Vec<DecisionRow> {
    records
        .iter()
        .map(|r| DecisionRow {
            decision_date: r.decision_date().to_string(),
            title: r.title().to_string(),
            before: r.before().to_string(),
            mnc: r.details().map(|d| d.mnc.clone()).unwrap_or_default(),
            uri: r.uri().to_string(),
        })
        .collect()
}

/// Rows numbered from 1, the ordinals `search --courts` accepts.
fn build_court_rows(entries: &[DirectoryEntry]) -> Vec<CourtRow> {
    entries
        .iter()
        .enumerate()
        .map(|(i, e)| CourtRow {
            ordinal: i + 1,
            name: e.name.clone(),
            id: e.id.clone(),
        })
        .collect()
}

// -- Destinations --

/// `path` when given, stdout otherwise.
pub fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout())),
    }
}

// -- Decisions --

/// Writes decisions in [`CSV_FIELDS`] order, flushing after every row.
pub struct DecisionCsvWriter<W: Write> {
    wtr: csv::Writer<W>,
}

impl<W: Write> DecisionCsvWriter<W> {
    pub fn new(inner: W) -> Result<Self> {
        let mut wtr = csv::Writer::from_writer(inner);
        wtr.write_record(CSV_FIELDS)?;
        wtr.flush()?;
        Ok(Self { wtr })
    }

    pub fn write(&mut self, record: &DecisionRecord) -> Result<()> {
        self.wtr.write_record(record.csv_fields())?;
        self.wtr.flush()?;
        Ok(())
    }

    pub fn into_inner(self) -> Result<W> {
        self.wtr
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush CSV output: {}", e.error()))
    }
}

pub fn write_decisions(
    records: &[DecisionRecord],
    format: OutputFormat,
    out: &mut dyn Write,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            writeln!(out, "{}", Table::new(build_decision_rows(records)))?;
        }
        OutputFormat::Markdown => {
            let mut table = Table::new(build_decision_rows(records));
            table.with(Style::markdown());
            writeln!(out, "{}", table)?;
        }
        OutputFormat::Csv => {
            let mut wtr = DecisionCsvWriter::new(&mut *out)?;
            for record in records {
                wtr.write(record)?;
            }
        }
        OutputFormat::Json => {
            let values: Vec<_> = records.iter().map(|r| r.values()).collect();
            serde_json::to_writer_pretty(&mut *out, &values)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}

/// Collects decisions for output. CSV rows are written as they arrive; the
/// other formats need every record and are rendered by [`RecordSink::finish`].
pub struct RecordSink {
    format: OutputFormat,
    out: Option<PathBuf>,
    csv: Option<DecisionCsvWriter<Box<dyn Write>>>,
    records: Vec<DecisionRecord>,
}

impl RecordSink {
    pub fn new(format: OutputFormat, out: Option<&Path>) -> Result<Self> {
        let csv = match format {
            OutputFormat::Csv => Some(DecisionCsvWriter::new(open_output(out)?)?),
            _ => None,
        };
        Ok(Self {
            format,
            out: out.map(Path::to_path_buf),
            csv,
            records: Vec::new(),
        })
    }

    pub fn push(&mut self, record: DecisionRecord) -> Result<()> {
        match self.csv.as_mut() {
            Some(wtr) => wtr.write(&record),
            None => {
                self.records.push(record);
                Ok(())
            }
        }
    }

    pub fn finish(self) -> Result<()> {
        match self.csv {
            Some(wtr) => {
                wtr.into_inner()?.flush()?;
            }
            None => {
                let mut out = open_output(self.out.as_deref())?;
                write_decisions(&self.records, self.format, &mut out)?;
            }
        }
        Ok(())
    }
}

// -- Courts --

pub fn print_courts_table(entries: &[DirectoryEntry]) {
    println!("{}", Table::new(build_court_rows(entries)));
}

pub fn print_courts_markdown(entries: &[DirectoryEntry]) {
    let mut table = Table::new(build_court_rows(entries));
    table.with(Style::markdown());
    println!("{}", table);
}

pub fn print_courts_csv(entries: &[DirectoryEntry]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(io::stdout());
    for row in build_court_rows(entries) {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn print_courts_json(entries: &[DirectoryEntry]) {
    print_json(&build_court_rows(entries));
}

// -- JSON output --

pub fn print_json<T: serde::Serialize>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;
