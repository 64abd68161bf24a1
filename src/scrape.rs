//! Single-page abstract scraping.
//!
//! Standalone helper for pulling the abstract block off one arXiv landing
//! page. The digest pipeline never calls this since the query feed already
//! carries abstracts; it backs the `abstract` CLI subcommand for manual use.

use crate::error::{DigestError, OptionExt, Result};
use regex::Regex;
use reqwest::Client;
use scraper::{Html, Selector};
use std::time::Duration;
use tracing::debug;

/// Request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Fetch one arXiv page and extract its abstract text.
pub async fn fetch_abstract(url: &str) -> Result<String> {
    let client = Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .user_agent("arxiv-digest/0.1")
        .build()?;

    debug!(url = url, "Fetching abstract page");

    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(DigestError::Api {
            code: status.as_u16() as i32,
            message: format!("Unable to fetch {}", url),
        });
    }

    let body = response.text().await?;
    extract_abstract(&body)
}

/// Pull the abstract block out of an arXiv page.
///
/// Whitespace runs collapse to single spaces and a leading "Abstract:" label
/// keeps exactly one space after the colon.
fn extract_abstract(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("blockquote.abstract.mathjax")
        .map_err(|e| DigestError::Parse(e.to_string()))?;

    let block = document
        .select(&selector)
        .next()
        .ok_or_parse("Abstract not found")?;

    let ws = Regex::new(r"\s+").map_err(|e| DigestError::Parse(e.to_string()))?;
    let text = block.text().collect::<String>();
    let text = ws.replace_all(text.trim(), " ");

    Ok(match text.strip_prefix("Abstract:") {
        Some(rest) => format!("Abstract: {}", rest.trim_start()),
        None => text.to_string(),
    })
}
