use super::traits::{ParamSpec, Tool, ToolInputs, ToolOutcome, input_text};
use async_trait::async_trait;
use scraper::{Html, Selector};
use serde_json::json;
use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::time::Duration;

/// Maximum time for one search round-trip.
const SEARCH_TIMEOUT_SECS: u64 = 20;

const SEARCH_ENDPOINT: &str = "https://html.duckduckgo.com/html/";

/// Web search tool: returns titles and URLs of the top results for a term.
pub struct BrowserTool {
    client: reqwest::Client,
    max_results: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
}

impl BrowserTool {
    pub fn new(max_results: usize) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(SEARCH_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();
        Self {
            client,
            max_results,
        }
    }
}

/// Pull result links out of the search page. Kept separate from the HTTP
/// round-trip so it can be tested against fixture markup.
pub(super) fn extract_results(html: &str, max_results: usize) -> Vec<SearchResult> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("a.result__a") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|anchor| {
            let url = anchor.value().attr("href")?.to_string();
            let title = anchor.text().collect::<String>().trim().to_string();
            if title.is_empty() {
                return None;
            }
            Some(SearchResult { title, url })
        })
        .take(max_results)
        .collect()
}

fn render_results(results: &[SearchResult]) -> String {
    let mut rendered = String::new();
    for (i, result) in results.iter().enumerate() {
        let _ = writeln!(rendered, "{}. {} - {}", i + 1, result.title, result.url);
    }
    rendered
}

#[async_trait]
impl Tool for BrowserTool {
    fn name(&self) -> &str {
        "browser"
    }

    fn description(&self) -> &str {
        "Search the web and return the titles and URLs of the top results for a search term"
    }

    fn input_params(&self) -> Vec<ParamSpec> {
        vec![ParamSpec::new("X", "search term")]
    }

    fn output_params(&self) -> Vec<ParamSpec> {
        vec![
            ParamSpec::new("A", "status"),
            ParamSpec::new("B", "result list"),
        ]
    }

    async fn invoke(&self, inputs: &ToolInputs) -> anyhow::Result<ToolOutcome> {
        let term = input_text(inputs, "X")?;

        let response = match self
            .client
            .get(SEARCH_ENDPOINT)
            .query(&[("q", term.as_str())])
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return Ok(ToolOutcome::fail(format!("search request failed: {e}"))),
        };

        if !response.status().is_success() {
            return Ok(ToolOutcome::fail(format!(
                "search returned HTTP {}",
                response.status()
            )));
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => return Ok(ToolOutcome::fail(format!("search body read failed: {e}"))),
        };

        let results = extract_results(&body, self.max_results);
        tracing::debug!(term = %term, count = results.len(), "search complete");

        if results.is_empty() {
            return Ok(ToolOutcome::fail(format!("no results for {term:?}")));
        }

        Ok(ToolOutcome::ok(BTreeMap::from([
            (
                "A".to_string(),
                json!(format!("{} results for {term:?}", results.len())),
            ),
            ("B".to_string(), json!(render_results(&results))),
        ])))
    }
}
