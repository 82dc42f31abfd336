use std::path::PathBuf;

use anyhow::{bail, Result};
use caselaw_lib::types::CourtCategory;
use caselaw_lib::validation;
use caselaw_lib::{Client, CrawlConfig, DecisionFetcher, Fetch, SearchPager, SearchQuery};
use clap::Args;
use indicatif::ProgressBar;

use crate::commands::{progress_bar, Persist};
use crate::output::{OutputFormat, RecordSink};

#[derive(Args)]
pub struct SearchArgs {
    /// Court numbers from `nswcaselaw courts courts`, comma separated (e.g. 1,13)
    #[arg(long, value_delimiter = ',')]
    pub courts: Vec<i64>,

    /// Tribunal numbers from `nswcaselaw courts tribunals`, comma separated
    #[arg(long, value_delimiter = ',')]
    pub tribunals: Vec<i64>,

    /// Words anywhere in the decision text
    #[arg(long)]
    pub body: Option<String>,

    /// Words in the case title
    #[arg(long)]
    pub title: Option<String>,

    /// Judicial officer
    #[arg(long)]
    pub before: Option<String>,

    #[arg(long)]
    pub catchwords: Option<String>,

    /// Party name
    #[arg(long)]
    pub party: Option<String>,

    /// Medium neutral citation, e.g. "[2020] NSWSC 312"
    #[arg(long)]
    pub citation: Option<String>,

    /// Earliest decision date (DD/MM/YYYY or YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<String>,

    /// Latest decision date (DD/MM/YYYY or YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<String>,

    #[arg(long)]
    pub file_number: Option<String>,

    #[arg(long)]
    pub legislation_cited: Option<String>,

    #[arg(long)]
    pub cases_cited: Option<String>,

    /// Stop after this many decisions
    #[arg(long)]
    pub limit: Option<usize>,

    /// Write results to this file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Fetch every decision in full and save it as <DIR>/<id>.json
    #[arg(long)]
    pub download: Option<PathBuf>,

    /// Save each fetched decision page as <DIR>/<id>.html
    #[arg(long, requires = "download")]
    pub dump: Option<PathBuf>,

    /// Seconds to wait between results pages (default 5)
    #[arg(long)]
    pub page_delay: Option<f64>,

    /// Seconds to wait after each decision fetch (default 5)
    #[arg(long)]
    pub decision_delay: Option<f64>,
}

/// Validates the arguments into a query. At least one court or tribunal must
/// be selected.
pub fn build_query(args: &SearchArgs) -> Result<SearchQuery> {
    let courts = validation::validate_ordinals(CourtCategory::Courts, &args.courts)?;
    let tribunals = validation::validate_ordinals(CourtCategory::Tribunals, &args.tribunals)?;
    if courts.is_empty() && tribunals.is_empty() {
        bail!("Select at least one court (--courts) or tribunal (--tribunals)");
    }

    let mut query = SearchQuery::default()
        .with_courts(&courts)
        .with_tribunals(&tribunals);

    if let Some(ref body) = args.body {
        query = query.with_body(&validation::validate_text(body)?);
    }
    if let Some(ref title) = args.title {
        query = query.with_title(&validation::validate_text(title)?);
    }
    if let Some(ref before) = args.before {
        query = query.with_before(&validation::validate_text(before)?);
    }
    if let Some(ref catchwords) = args.catchwords {
        query = query.with_catchwords(&validation::validate_text(catchwords)?);
    }
    if let Some(ref party) = args.party {
        query = query.with_party(&validation::validate_text(party)?);
    }
    if let Some(ref citation) = args.citation {
        query = query.with_citation(&validation::validate_citation(citation)?);
    }
    if let Some(ref file_number) = args.file_number {
        query = query.with_file_number(&validation::validate_text(file_number)?);
    }
    if let Some(ref legislation) = args.legislation_cited {
        query = query.with_legislation_cited(&validation::validate_text(legislation)?);
    }
    if let Some(ref cases) = args.cases_cited {
        query = query.with_cases_cited(&validation::validate_text(cases)?);
    }

    let start = args
        .start_date
        .as_deref()
        .map(validation::validate_date)
        .transpose()?;
    let end = args
        .end_date
        .as_deref()
        .map(validation::validate_date)
        .transpose()?;
    if let (Some(start), Some(end)) = (&start, &end) {
        validation::validate_date_range(start, end)?;
    }
    if let Some(ref start) = start {
        query = query.with_start_date(start);
    }
    if let Some(ref end) = end {
        query = query.with_end_date(end);
    }

    Ok(query)
}

/// Command-line delays override the environment.
fn crawl_config(args: &SearchArgs, base: &CrawlConfig) -> Result<CrawlConfig> {
    let mut config = base.clone();
    if let Some(secs) = args.page_delay {
        config = config.with_page_delay_secs(secs)?;
    }
    if let Some(secs) = args.decision_delay {
        config = config.with_decision_delay_secs(secs)?;
    }
    Ok(config)
}

/// Records written and decisions that failed to scrape.
#[derive(Debug, Default)]
struct Tally {
    count: usize,
    failed: usize,
}

/// Pulls records from the pager into the sink, fetching each decision in
/// full when a fetcher is given. Stops at `limit` or on the first error.
async fn crawl<F: Fetch>(
    pager: &mut SearchPager<'_, F>,
    decisions: Option<&DecisionFetcher<'_, F>>,
    persist: &Persist,
    sink: &mut RecordSink,
    limit: Option<usize>,
    pb: Option<&ProgressBar>,
) -> Result<Tally> {
    let mut tally = Tally::default();

    while limit.map_or(true, |limit| tally.count < limit) {
        let Some(record) = pager.next().await? else {
            break;
        };

        let record = match decisions {
            Some(fetcher) => {
                if let Some(pb) = pb {
                    if tally.count == 0 {
                        let total = pager.total().unwrap_or(0);
                        pb.set_length(limit.map_or(total, |l| total.min(l as u64)));
                    }
                    pb.set_message(record.title().to_string());
                }
                let report = fetcher.fetch(record).await;
                persist.save(&report)?;
                if !report.succeeded() {
                    tally.failed += 1;
                }
                if let Some(pb) = pb {
                    pb.inc(1);
                }
                report.record
            }
            None => record,
        };

        sink.push(record)?;
        tally.count += 1;
    }

    Ok(tally)
}

pub async fn run(args: &SearchArgs, config: &CrawlConfig, format: &OutputFormat) -> Result<()> {
    let query = build_query(args)?;
    let limit = args.limit.map(validation::validate_limit).transpose()?;
    let config = crawl_config(args, config)?;

    let client = Client::with_base_url(&config.base_url)?;
    let mut pager = SearchPager::new(&client, &query, config.page_delay)?;
    let decisions = match args.download {
        Some(_) => Some(DecisionFetcher::new(&client, config.decision_delay)?),
        None => None,
    };
    let persist = Persist::new(args.download.as_deref(), args.dump.as_deref())?;
    let mut sink = RecordSink::new(*format, args.out.as_deref())?;

    let pb = decisions.as_ref().map(|_| progress_bar(0));
    let crawled = crawl(
        &mut pager,
        decisions.as_ref(),
        &persist,
        &mut sink,
        limit,
        pb.as_ref(),
    )
    .await;

    if let Some(pb) = pb {
        pb.finish_with_message("done");
    }
    // Records gathered before a failed page are still written out.
    sink.finish()?;
    let tally = crawled?;

    match pager.total() {
        Some(total) => eprintln!("{} of {} matching decisions", tally.count, total),
        None => eprintln!("{} decisions", tally.count),
    }
    if tally.failed > 0 {
        eprintln!(
            "{} decisions could not be scraped; see the log for details",
            tally.failed
        );
    }

    Ok(())
}
