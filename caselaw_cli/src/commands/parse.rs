use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use caselaw_lib::scrape_decision;
use caselaw_lib::types::DecisionRecord;
use clap::Args;

use crate::output::print_json;

#[derive(Args)]
pub struct ParseArgs {
    /// Saved decision page
    pub file: PathBuf,

    /// Decision uri, when the page does not link to itself
    #[arg(long)]
    pub uri: Option<String>,
}

/// Scrapes a saved page and prints the full record as JSON, whatever the
/// output format.
pub fn run(args: &ParseArgs) -> Result<()> {
    let html = fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    let record = match &args.uri {
        Some(uri) => DecisionRecord::from_uri(uri),
        None => DecisionRecord::default(),
    };

    let report = scrape_decision(record, &html);
    if let Some(e) = &report.error {
        bail!("Could not scrape {}: {}", args.file.display(), e);
    }

    print_json(&report.record.values());
    if let Some(layout) = report.layout {
        eprintln!(
            "Scraped with the {} layout ({} warnings)",
            layout,
            report.warnings.len()
        );
    }
    Ok(())
}
