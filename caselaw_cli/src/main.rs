mod commands;
mod output;

use anyhow::{bail, Result};
use caselaw_lib::CrawlConfig;
use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "nswcaselaw")]
#[command(about = "Search and download judicial decisions from NSW CaseLaw")]
struct Cli {
    /// Output format: table, json, csv or markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    /// Log progress (-v) or debugging detail (-vv) to stderr
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search decisions, optionally downloading each in full
    Search(Box<commands::search::SearchArgs>),
    /// List the courts or tribunals that can be searched
    Courts(commands::courts::CourtsArgs),
    /// Scrape a saved decision page and print it as JSON
    Parse(commands::parse::ParseArgs),
    /// Download every decision linked from a CSV file
    Fetch(commands::fetch::FetchArgs),
}

impl Commands {
    /// Only the commands that reach the site read crawl settings, so a bad
    /// environment never blocks parsing a saved page.
    fn needs_config(&self) -> bool {
        !matches!(self, Commands::Parse(_))
    }
}

fn log_filter(verbose: u8) -> EnvFilter {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let format = match cli.output.as_str() {
        "table" => OutputFormat::Table,
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        "markdown" | "md" => OutputFormat::Markdown,
        other => bail!("Unknown output format '{}'. Expected table, json, csv or markdown", other),
    };

    let config = if cli.command.needs_config() {
        CrawlConfig::from_env()?
    } else {
        CrawlConfig::default()
    };

    match &cli.command {
        Commands::Search(args) => commands::search::run(args.as_ref(), &config, &format).await?,
        Commands::Courts(args) => commands::courts::run(args, &config, &format).await?,
        Commands::Parse(args) => commands::parse::run(args)?,
        Commands::Fetch(args) => commands::fetch::run(args, &config, &format).await?,
    }

    Ok(())
}
