//! arXiv export API client.
//!
//! One search call covers exactly one keyword inside one date window and
//! returns at most `max_results` papers parsed from the Atom feed. The window
//! itself is never forwarded to the API; fan-out over windows exists to keep
//! each call's result volume bounded, not to date-filter server-side.

use crate::date_range::DateRange;
use crate::error::{DigestError, OptionExt, Result};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// arXiv export API query endpoint
pub const ARXIV_API_URL: &str = "http://export.arxiv.org/api/query";

/// Request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// A paper discovered by one keyword search.
#[derive(Debug, Clone, PartialEq)]
pub struct Paper {
    pub title: String,
    pub abstract_text: AbstractText,
    /// URL of the PDF version.
    pub link: String,
    /// The keyword whose query produced this paper.
    pub keyword: String,
}

/// Abstract text carried by a paper, or the reason none is available.
///
/// `Unavailable` lets downstream stages skip external calls for broken input
/// without sniffing marker strings inside the text itself.
#[derive(Debug, Clone, PartialEq)]
pub enum AbstractText {
    Text(String),
    Unavailable(String),
}

/// Atom feed structures (fields we do not read are skipped by serde).
///
/// An entry's link elements are not contiguous in real feeds; collecting
/// them into one Vec relies on quick-xml's overlapped-lists feature.
#[derive(Debug, Deserialize)]
struct Feed {
    #[serde(rename = "entry", default)]
    entries: Vec<Entry>,
}

#[derive(Debug, Deserialize)]
struct Entry {
    title: Option<String>,
    summary: Option<String>,
    #[serde(rename = "link", default)]
    links: Vec<Link>,
}

#[derive(Debug, Deserialize)]
struct Link {
    #[serde(rename = "@title")]
    title: Option<String>,
    #[serde(rename = "@href")]
    href: Option<String>,
}

/// arXiv search client. One GET per (keyword, window) fetch unit.
#[derive(Debug, Clone)]
pub struct SearchClient {
    client: Client,
    base_url: String,
}

impl SearchClient {
    /// Create a client against the public arXiv endpoint.
    pub fn new() -> Result<Self> {
        Self::with_base_url(ARXIV_API_URL)
    }

    /// Create a client against a custom endpoint (mirrors, tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent("arxiv-digest/0.1")
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Search one keyword within one date window.
    ///
    /// A non-success status degrades to an empty result (warned, not raised),
    /// indistinguishable from "nothing found" for the caller. A feed entry
    /// missing its pdf link is a parse error and fails the whole call.
    pub async fn search(
        &self,
        keyword: &str,
        range: &DateRange,
        max_results: usize,
    ) -> Result<Vec<Paper>> {
        let url = build_query_url(&self.base_url, keyword, max_results)?;

        debug!(keyword = keyword, range = %range, url = %url, "Fetching arXiv feed");

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!(
                keyword = keyword,
                range = %range,
                status = status.as_u16(),
                "arXiv query failed, treating as empty"
            );
            return Ok(Vec::new());
        }

        let body = response.text().await?;
        parse_feed(&body, keyword)
    }
}

/// Build the arXiv query URL for one keyword.
fn build_query_url(base_url: &str, keyword: &str, max_results: usize) -> Result<Url> {
    let mut url = Url::parse(base_url)
        .map_err(|e| DigestError::Config(format!("Invalid arXiv endpoint: {}", e)))?;

    url.query_pairs_mut()
        .append_pair("search_query", &format!("all:{}", keyword))
        .append_pair("start", "0")
        .append_pair("max_results", &max_results.to_string());

    Ok(url)
}

/// Parse an Atom feed into Papers stamped with the originating keyword.
fn parse_feed(xml: &str, keyword: &str) -> Result<Vec<Paper>> {
    let feed: Feed = quick_xml::de::from_str(xml)?;

    let mut papers = Vec::with_capacity(feed.entries.len());

    for entry in feed.entries {
        let title = entry.title.ok_or_parse("feed entry missing title")?;

        let link = entry
            .links
            .iter()
            .find(|l| l.title.as_deref() == Some("pdf"))
            .and_then(|l| l.href.clone())
            .ok_or_parse("feed entry missing pdf link")?;

        let abstract_text = match entry.summary {
            Some(text) if !text.trim().is_empty() => AbstractText::Text(text.trim().to_string()),
            _ => AbstractText::Unavailable("feed entry carried no abstract text".to_string()),
        };

        papers.push(Paper {
            title: title.trim().to_string(),
            abstract_text,
            link,
            keyword: keyword.to_string(),
        });
    }

    Ok(papers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SAMPLE_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title type="html">ArXiv Query: search_query=all:electron</title>
  <id>http://arxiv.org/api/cHxbiOdZaP56ODnBPIenZhzg5f8</id>
  <entry>
    <id>http://arxiv.org/abs/2401.00001v1</id>
    <title>Electron Dynamics in
  Strong Laser Fields</title>
    <summary>  We study how electrons behave in strong fields.  </summary>
    <link href="http://arxiv.org/abs/2401.00001v1" rel="alternate" type="text/html"/>
    <link title="pdf" href="http://arxiv.org/pdf/2401.00001v1" rel="related" type="application/pdf"/>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/2401.00002v1</id>
    <title>A Survey of Electron Transport</title>
    <summary>Transport phenomena reviewed.</summary>
    <link href="http://arxiv.org/abs/2401.00002v1" rel="alternate" type="text/html"/>
    <link title="doi" href="https://dx.doi.org/10.0000/fake" rel="related"/>
    <link title="pdf" href="http://arxiv.org/pdf/2401.00002v1" rel="related" type="application/pdf"/>
  </entry>
</feed>"#;

    fn range() -> DateRange {
        DateRange {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
        }
    }

    #[test]
    fn test_build_query_url() {
        let url = build_query_url(ARXIV_API_URL, "quantum computing", 5).unwrap();
        let url = url.as_str();
        assert!(url.starts_with("http://export.arxiv.org/api/query?"));
        assert!(url.contains("search_query=all%3Aquantum+computing"));
        assert!(url.contains("start=0"));
        assert!(url.contains("max_results=5"));
    }

    #[test]
    fn test_parse_feed_extracts_entries() {
        let papers = parse_feed(SAMPLE_FEED, "electron").unwrap();
        assert_eq!(papers.len(), 2);

        assert_eq!(papers[0].title, "Electron Dynamics in\n  Strong Laser Fields");
        assert_eq!(papers[0].link, "http://arxiv.org/pdf/2401.00001v1");
        assert_eq!(
            papers[0].abstract_text,
            AbstractText::Text("We study how electrons behave in strong fields.".to_string())
        );

        assert_eq!(papers[1].link, "http://arxiv.org/pdf/2401.00002v1");
        assert!(papers.iter().all(|p| p.keyword == "electron"));
    }

    #[test]
    fn test_parse_feed_doi_entry_with_interleaved_links() {
        // Entries carrying a DOI put the doi link right after <arxiv:doi>,
        // separated from the alternate/pdf links by comment and journal_ref
        // elements. The link list must still collect across that gap.
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom" xmlns:arxiv="http://arxiv.org/schemas/atom">
  <entry>
    <id>http://arxiv.org/abs/hep-ex/0307015</id>
    <title>Multi-Electron Production at High Transverse Momenta</title>
    <summary>Multi-electron production is studied in ep collisions.</summary>
    <author><name>H1 Collaboration</name></author>
    <arxiv:doi>10.1140/epjc/s2003-01326-x</arxiv:doi>
    <link title="doi" href="http://dx.doi.org/10.1140/epjc/s2003-01326-x" rel="related"/>
    <arxiv:comment>23 pages, 8 figures and 4 tables</arxiv:comment>
    <arxiv:journal_ref>Eur.Phys.J. C31 (2003) 17-29</arxiv:journal_ref>
    <link href="http://arxiv.org/abs/hep-ex/0307015v1" rel="alternate" type="text/html"/>
    <link title="pdf" href="http://arxiv.org/pdf/hep-ex/0307015v1" rel="related" type="application/pdf"/>
    <arxiv:primary_category term="hep-ex" scheme="http://arxiv.org/schemas/atom"/>
    <category term="hep-ex" scheme="http://arxiv.org/schemas/atom"/>
  </entry>
</feed>"#;

        let papers = parse_feed(xml, "electron").unwrap();
        assert_eq!(papers.len(), 1);
        assert_eq!(papers[0].link, "http://arxiv.org/pdf/hep-ex/0307015v1");
        assert_eq!(
            papers[0].abstract_text,
            AbstractText::Text("Multi-electron production is studied in ep collisions.".to_string())
        );
    }

    #[test]
    fn test_parse_feed_missing_pdf_link_is_error() {
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <title>No PDF Here</title>
    <summary>Only an alternate link.</summary>
    <link href="http://arxiv.org/abs/2401.00003v1" rel="alternate"/>
  </entry>
</feed>"#;

        let err = parse_feed(xml, "electron").unwrap_err();
        assert!(matches!(err, DigestError::Parse(_)));
    }

    #[test]
    fn test_parse_feed_blank_summary_is_unavailable() {
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <entry>
    <title>Silent Paper</title>
    <summary>   </summary>
    <link title="pdf" href="http://arxiv.org/pdf/2401.00004v1"/>
  </entry>
</feed>"#;

        let papers = parse_feed(xml, "electron").unwrap();
        assert_eq!(papers.len(), 1);
        assert!(matches!(
            papers[0].abstract_text,
            AbstractText::Unavailable(_)
        ));
    }

    #[test]
    fn test_parse_feed_with_no_entries() {
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <title>ArXiv Query: search_query=all:nothing</title>
</feed>"#;
        let papers = parse_feed(xml, "nothing").unwrap();
        assert!(papers.is_empty());
    }

    #[tokio::test]
    async fn test_search_returns_papers() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/query"))
            .and(query_param("search_query", "all:electron"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SAMPLE_FEED))
            .mount(&server)
            .await;

        let client = SearchClient::with_base_url(format!("{}/api/query", server.uri())).unwrap();
        let papers = client.search("electron", &range(), 5).await.unwrap();

        assert_eq!(papers.len(), 2);
        assert!(papers.iter().all(|p| p.keyword == "electron"));
    }

    #[tokio::test]
    async fn test_search_degrades_to_empty_on_server_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/query"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = SearchClient::with_base_url(format!("{}/api/query", server.uri())).unwrap();
        let papers = client.search("electron", &range(), 5).await.unwrap();

        assert!(papers.is_empty());
    }
}
