//! Digest pipeline entry point.
//!
//! Fetch fan-out, sequential summarisation, report file write. Returns the
//! total paper count so the caller can decide whether the finished report is
//! worth delivering at all.

use crate::arxiv::SearchClient;
use crate::error::{DigestError, Result};
use crate::fetcher;
use crate::report::ReportBuilder;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::info;

/// Everything one digest run needs beyond its clients.
#[derive(Debug, Clone)]
pub struct DigestOptions {
    pub keywords: Vec<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Result cap per fetch unit, not a global cap.
    pub max_results: usize,
    pub output: PathBuf,
}

/// Run the full digest: fetch, summarise, write the report.
///
/// The report file is written even when nothing was found; a zero return
/// tells the caller to skip delivery.
pub async fn run_digest(
    search: &SearchClient,
    reporter: &ReportBuilder,
    opts: &DigestOptions,
) -> Result<usize> {
    let summary = fetcher::fetch_all(
        search,
        &opts.keywords,
        opts.start_date,
        opts.end_date,
        opts.max_results,
    )
    .await?;

    let report = reporter.assemble(summary.papers, opts.start_date).await;

    std::fs::write(&opts.output, &report.html)?;
    info!(
        output = %opts.output.display(),
        papers = report.total,
        "Digest written"
    );

    Ok(report.total)
}

/// Load keywords from a plain-text file: one per line, trimmed, lowercased,
/// blank lines skipped.
pub fn load_keywords(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    let keywords: Vec<String> = content
        .lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|line| !line.is_empty())
        .collect();

    if keywords.is_empty() {
        return Err(DigestError::Config(format!(
            "keyword file {} contains no keywords",
            path.display()
        )));
    }

    Ok(keywords)
}
