//! Concurrent fetch across the keyword × date-window grid.
//!
//! Every (keyword, window) pair is one independent fetch unit. Units share
//! nothing mutable and run on a fixed-size pool; the flat output keeps
//! whatever completion order the pool produced.

use crate::arxiv::{Paper, SearchClient};
use crate::date_range::{split_date_range, DateRange};
use crate::error::Result;
use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use tracing::{debug, info};

/// Number of fetch units in flight at once.
pub const FETCH_WORKERS: usize = 5;

/// Flat fetch result plus informational per-keyword totals.
#[derive(Debug, Default)]
pub struct FetchSummary {
    /// Papers in unit completion order.
    pub papers: Vec<Paper>,
    /// Papers per input keyword, every keyword present. Informational only;
    /// never used to filter or truncate the flat result.
    pub per_keyword: HashMap<String, usize>,
}

/// Fan out over every (keyword, window) pair and collect the flat result.
///
/// The window list is computed once and shared across all keywords. A unit
/// that degraded to empty (server-side error) affects nothing else in flight;
/// a unit that hit a malformed feed entry fails the whole fetch once every
/// unit has finished.
pub async fn fetch_all(
    client: &SearchClient,
    keywords: &[String],
    start: NaiveDate,
    end: NaiveDate,
    max_results: usize,
) -> Result<FetchSummary> {
    let ranges = split_date_range(start, end);

    let units: Vec<(String, DateRange)> = keywords
        .iter()
        .flat_map(|keyword| ranges.iter().map(move |range| (keyword.clone(), *range)))
        .collect();

    info!(
        keywords = keywords.len(),
        windows = ranges.len(),
        units = units.len(),
        "Starting concurrent fetch"
    );

    let results: Vec<Result<Vec<Paper>>> = stream::iter(units)
        .map(|(keyword, range)| {
            let client = client.clone();
            async move {
                debug!(keyword = %keyword, range = %range, "Fetch unit started");
                client.search(&keyword, &range, max_results).await
            }
        })
        .buffer_unordered(FETCH_WORKERS)
        .collect()
        .await;

    let mut papers = Vec::new();
    for result in results {
        papers.extend(result?);
    }

    let mut per_keyword: HashMap<String, usize> =
        keywords.iter().map(|k| (k.clone(), 0)).collect();
    for paper in &papers {
        if let Some(count) = per_keyword.get_mut(&paper.keyword) {
            *count += 1;
        }
    }

    for (keyword, count) in &per_keyword {
        info!(keyword = %keyword, count = *count, "Keyword total");
    }
    info!(total = papers.len(), "Concurrent fetch complete");

    Ok(FetchSummary {
        papers,
        per_keyword,
    })
}
