use anyhow::Result;
use caselaw_lib::types::CourtCategory;
use caselaw_lib::{refresh_court_directory, Client, CourtDirectory, CrawlConfig, COVERAGE_WARNING};
use clap::Args;

use crate::output::{
    print_courts_csv, print_courts_json, print_courts_markdown, print_courts_table, OutputFormat,
};

#[derive(Args)]
pub struct CourtsArgs {
    /// Which list to show: courts or tribunals
    pub category: CourtCategory,

    /// Read the list from the live advanced search form instead of the built-in table
    #[arg(long)]
    pub refresh: bool,
}

async fn live_directory(config: &CrawlConfig) -> Result<CourtDirectory> {
    let client = Client::with_base_url(&config.base_url)?;
    Ok(refresh_court_directory(&client).await?)
}

pub async fn run(args: &CourtsArgs, config: &CrawlConfig, format: &OutputFormat) -> Result<()> {
    let directory = if args.refresh {
        match live_directory(config).await {
            Ok(directory) => directory,
            Err(e) => {
                tracing::warn!("Could not refresh {} from the search form, using built-in table: {}", args.category, e);
                CourtDirectory::embedded()
            }
        }
    } else {
        CourtDirectory::embedded()
    };

    let entries = directory.entries(args.category);
    match format {
        OutputFormat::Table => print_courts_table(entries),
        OutputFormat::Json => print_courts_json(entries),
        OutputFormat::Csv => print_courts_csv(entries)?,
        OutputFormat::Markdown => print_courts_markdown(entries),
    }

    eprintln!("\n{}", COVERAGE_WARNING);
    Ok(())
}
