use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use caselaw_lib::types::DecisionRecord;
use caselaw_lib::uris::collect_decision_uris;
use caselaw_lib::validation;
use caselaw_lib::{Client, CrawlConfig, DecisionFetcher};
use clap::Args;

use crate::commands::{progress_bar, Persist};
use crate::output::{OutputFormat, RecordSink};

#[derive(Args)]
pub struct FetchArgs {
    /// CSV file with links to decisions in any of its cells
    #[arg(long)]
    pub uris: PathBuf,

    /// Save each decision as <DIR>/<id>.json
    #[arg(long)]
    pub download: PathBuf,

    /// Save each fetched decision page as <DIR>/<id>.html
    #[arg(long)]
    pub dump: Option<PathBuf>,

    /// Stop after this many decisions
    #[arg(long)]
    pub limit: Option<usize>,

    /// Write the fetched records to this file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Seconds to wait after each decision fetch (default 5)
    #[arg(long)]
    pub decision_delay: Option<f64>,
}

/// Every distinct decision uri linked from any cell of the file, in file
/// order. The file may or may not have a header row.
pub fn read_uri_file(path: &Path) -> Result<Vec<String>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut cells = Vec::new();
    for result in rdr.records() {
        let record = result?;
        cells.extend(record.iter().map(str::to_string));
    }
    Ok(collect_decision_uris(cells.iter().map(String::as_str)))
}

pub async fn run(args: &FetchArgs, config: &CrawlConfig, format: &OutputFormat) -> Result<()> {
    let mut uris = read_uri_file(&args.uris)?;
    if let Some(limit) = args.limit {
        uris.truncate(validation::validate_limit(limit)?);
    }
    if uris.is_empty() {
        eprintln!("No decision links found in {}", args.uris.display());
        return Ok(());
    }
    eprintln!("Fetching {} decisions", uris.len());

    let config = match args.decision_delay {
        Some(secs) => config.clone().with_decision_delay_secs(secs)?,
        None => config.clone(),
    };
    let client = Client::with_base_url(&config.base_url)?;
    let fetcher = DecisionFetcher::new(&client, config.decision_delay)?;
    let persist = Persist::new(Some(args.download.as_path()), args.dump.as_deref())?;
    let mut sink = RecordSink::new(*format, args.out.as_deref())?;

    let pb = progress_bar(uris.len() as u64);
    let mut failed = 0usize;
    for uri in &uris {
        pb.set_message(uri.clone());
        let report = fetcher.fetch(DecisionRecord::from_uri(uri)).await;
        persist.save(&report)?;
        if !report.succeeded() {
            failed += 1;
            pb.println(format!("Failed {}", uri));
        }
        sink.push(report.record)?;
        pb.inc(1);
    }
    pb.finish_with_message("done");
    sink.finish()?;

    eprintln!(
        "Fetched {} decisions into {} ({} failed)",
        uris.len() - failed,
        args.download.display(),
        failed
    );
    Ok(())
}
