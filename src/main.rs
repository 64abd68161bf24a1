//! arxiv-digest - Daily arXiv Summary Pipeline
//!
//! Searches arXiv for papers matching a keyword list, summarises each abstract
//! with Gemini, and writes a keyword-grouped HTML digest.
//!
//! ## Usage
//!
//! ### Daily digest
//! ```bash
//! arxiv-digest run --keywords keywords.txt --output digest.html
//! ```
//!
//! ### Single abstract
//! ```bash
//! arxiv-digest abstract https://arxiv.org/abs/2401.00001
//! ```

use anyhow::{Context, Result};
use arxiv_digest::arxiv::SearchClient;
use arxiv_digest::gemini::{GeminiClient, DEFAULT_MODEL};
use arxiv_digest::pipeline::{self, DigestOptions};
use arxiv_digest::report::ReportBuilder;
use arxiv_digest::scrape;
use chrono::{Duration, Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};

// ============================================================================
// CLI Definition
// ============================================================================

/// Daily arXiv Summary Pipeline
#[derive(Parser)]
#[command(name = "arxiv-digest")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search arXiv, summarise the results, and write the HTML digest
    Run {
        /// Gemini API key
        #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
        api_key: String,

        /// Keyword file, one keyword per line
        #[arg(long, default_value = "keywords.txt")]
        keywords: PathBuf,

        /// First day of the search range (default: yesterday)
        #[arg(long)]
        start_date: Option<NaiveDate>,

        /// Last day of the search range (default: today)
        #[arg(long)]
        end_date: Option<NaiveDate>,

        /// Maximum results per keyword per date window
        #[arg(long, default_value_t = 5)]
        max_results: usize,

        /// Gemini model name
        #[arg(long, default_value = DEFAULT_MODEL)]
        model: String,

        /// Output HTML file
        #[arg(short, long, default_value = "digest.html")]
        output: PathBuf,
    },

    /// Fetch and print the abstract of a single arXiv paper
    Abstract {
        /// Abstract page URL (e.g., https://arxiv.org/abs/2401.00001)
        url: String,
    },
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug { Level::DEBUG } else { Level::INFO };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level.to_string()));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .init();

    match cli.command {
        Commands::Run {
            api_key,
            keywords,
            start_date,
            end_date,
            max_results,
            model,
            output,
        } => {
            run_daily_digest(
                api_key,
                keywords,
                start_date,
                end_date,
                max_results,
                model,
                output,
            )
            .await
        }
        Commands::Abstract { url } => print_abstract(url).await,
    }
}

// ============================================================================
// Digest Pipeline
// ============================================================================

async fn run_daily_digest(
    api_key: String,
    keywords_path: PathBuf,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    max_results: usize,
    model: String,
    output: PathBuf,
) -> Result<()> {
    let keywords = pipeline::load_keywords(&keywords_path)
        .with_context(|| format!("Failed to load keywords from {}", keywords_path.display()))?;

    // Default window covers yesterday's submissions
    let today = Local::now().date_naive();
    let start_date = start_date.unwrap_or(today - Duration::days(1));
    let end_date = end_date.unwrap_or(today);

    println!(
        "Searching {} keywords from {} to {}...",
        keywords.len(),
        start_date,
        end_date
    );

    let search = SearchClient::new()?;
    let reporter = ReportBuilder::new(GeminiClient::new(api_key, model)?);

    let opts = DigestOptions {
        keywords,
        start_date,
        end_date,
        max_results,
        output,
    };

    let total = pipeline::run_digest(&search, &reporter, &opts).await?;

    if total == 0 {
        println!("No papers found.");
        return Ok(());
    }

    println!(
        "Summarised {} papers. Digest written to {}",
        total,
        opts.output.display()
    );
    Ok(())
}

// ============================================================================
// Single Abstract
// ============================================================================

async fn print_abstract(url: String) -> Result<()> {
    let abstract_text = scrape::fetch_abstract(&url)
        .await
        .with_context(|| format!("Failed to fetch abstract from {}", url))?;

    println!("{}", abstract_text);
    Ok(())
}
