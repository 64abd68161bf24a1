//! Keyword-grouped report assembly.
//!
//! Summarisation is strictly sequential with a fixed pause after every paper,
//! success or failure; running this stage concurrently would blow through the
//! summarisation service's request-rate ceiling.

use crate::arxiv::Paper;
use crate::gemini::GeminiClient;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// Pause after each summarisation call.
pub const SUMMARY_DELAY: Duration = Duration::from_secs(7);

const TABLE_HEADER: &str = r#"
<table border="1" cellpadding="8" cellspacing="0" style="border-collapse: collapse; width: 100%;">
<tr style="background-color: #f2f2f2;">
<th style="text-align: left;">Title</th>
<th style="text-align: left;">Summary</th>
</tr>
"#;

/// Assembled digest plus the total paper count the caller keys delivery on.
#[derive(Debug)]
pub struct Report {
    pub html: String,
    pub total: usize,
}

/// Builds the HTML digest from a flat fetch result.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    summariser: GeminiClient,
    delay: Duration,
}

impl ReportBuilder {
    pub fn new(summariser: GeminiClient) -> Self {
        Self {
            summariser,
            delay: SUMMARY_DELAY,
        }
    }

    /// Override the inter-call pause. Tests run at zero.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Group papers by keyword, summarise each sequentially, render HTML.
    ///
    /// Keyword sections appear in lexicographic order; rows within a section
    /// keep fetch completion order. A failed summary renders its error text in
    /// its cell and the batch carries on.
    pub async fn assemble(&self, papers: Vec<Paper>, start_date: NaiveDate) -> Report {
        let total = papers.len();

        let mut grouped: BTreeMap<String, Vec<Paper>> = BTreeMap::new();
        for paper in papers {
            grouped
                .entry(paper.keyword.clone())
                .or_default()
                .push(paper);
        }

        let mut html = String::from("<html><body style='font-family:Arial, sans-serif;'>");
        html.push_str(&format!("<h2>Daily arXiv Summary for {}</h2>", start_date));

        for (keyword, papers) in &grouped {
            info!(keyword = %keyword, papers = papers.len(), "Summarising keyword group");

            html.push_str(&format!("<h3>{}</h3>", title_case(keyword)));
            html.push_str(TABLE_HEADER);

            for paper in papers {
                let summary = match self.summariser.summarise(&paper.abstract_text).await {
                    Ok(text) => text,
                    Err(err) => {
                        warn!(title = %paper.title, error = %err, "Summarisation failed");
                        err.to_string()
                    }
                };

                html.push_str(&format!(
                    "<tr><td><a href='{}'>{}</a></td><td>{}</td></tr>",
                    escape_html(&paper.link),
                    escape_html(&paper.title),
                    escape_html(&summary),
                ));

                sleep(self.delay).await;
            }

            html.push_str("</table><br>");
        }

        html.push_str("</body></html>");

        Report { html, total }
    }
}

/// Uppercase the first letter of every word, lowercasing the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_alpha = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }

    out
}

/// Minimal HTML escaping for text and attribute values.
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\'' => out.push_str("&#39;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
