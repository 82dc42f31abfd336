//! CLI subcommand implementations.

pub mod courts;
pub mod fetch;
pub mod parse;
pub mod search;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use caselaw_lib::ScrapeReport;
use indicatif::{ProgressBar, ProgressStyle};

/// Where scraped decisions and raw pages are written, if anywhere.
#[derive(Debug, Default)]
pub struct Persist {
    download: Option<PathBuf>,
    dump: Option<PathBuf>,
}

impl Persist {
    /// Creates both directories up front so a bad path fails before any
    /// request is made.
    pub fn new(download: Option<&Path>, dump: Option<&Path>) -> Result<Self> {
        for dir in [download, dump].into_iter().flatten() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory {}", dir.display()))?;
        }
        Ok(Self {
            download: download.map(Path::to_path_buf),
            dump: dump.map(Path::to_path_buf),
        })
    }

    /// Writes `<download>/<id>.json` for a successful scrape and
    /// `<dump>/<id>.html` whenever the page was fetched.
    pub fn save(&self, report: &ScrapeReport) -> Result<()> {
        let Some(id) = report.record.id() else {
            tracing::warn!("Not saving decision without a uri");
            return Ok(());
        };

        if let (Some(dir), Some(html)) = (&self.dump, &report.html) {
            let path = dir.join(format!("{}.html", id));
            fs::write(&path, html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }

        if let Some(dir) = &self.download {
            if report.succeeded() {
                let path = dir.join(format!("{}.json", id));
                let json = serde_json::to_string_pretty(&report.record.values())?;
                fs::write(&path, json)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
            }
        }
        Ok(())
    }
}

pub fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::with_template(
            "[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} ({eta}) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb
}
