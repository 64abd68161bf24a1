//! # arxiv-digest
//!
//! Daily arXiv Digest - Concurrent Keyword Search & LLM Summarisation Pipeline
//!
//! ## Modules
//!
//! - [`date_range`] - Date window splitting for search fan-out
//! - [`arxiv`] - arXiv export API client
//! - [`fetcher`] - Concurrent fetch across the keyword × window grid
//! - [`gemini`] - Gemini summarisation client
//! - [`report`] - Keyword-grouped HTML report assembly
//! - [`pipeline`] - End-to-end digest entry point
//! - [`scrape`] - Standalone abstract page scraper
//! - [`error`] - Custom error types
//!
//! ## Usage
//!
//! ```rust,no_run
//! use arxiv_digest::arxiv::SearchClient;
//! use arxiv_digest::gemini::{GeminiClient, DEFAULT_MODEL};
//! use arxiv_digest::pipeline::{run_digest, DigestOptions};
//! use arxiv_digest::report::ReportBuilder;
//! use chrono::NaiveDate;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let search = SearchClient::new()?;
//!     let reporter = ReportBuilder::new(GeminiClient::new("api-key", DEFAULT_MODEL)?);
//!     let opts = DigestOptions {
//!         keywords: vec!["quantum computing".to_string()],
//!         start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!         end_date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
//!         max_results: 5,
//!         output: "digest.html".into(),
//!     };
//!     let total = run_digest(&search, &reporter, &opts).await?;
//!     println!("Summarised {} papers", total);
//!     Ok(())
//! }
//! ```

pub mod arxiv;
pub mod date_range;
pub mod error;
pub mod fetcher;
pub mod gemini;
pub mod pipeline;
pub mod report;
pub mod scrape;

pub use error::{DigestError, Result};
