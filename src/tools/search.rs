//! Web search tool
//!
//! Queries a Baidu-compatible results page and scrapes titles and abstracts
//! from the returned HTML. The engine origin is configurable so tests and
//! mirrors can stand in for the public site.

use crate::tools::registry::{Tool, optional_str_arg};
use crate::types::{AppError, Result, ToolOutput};
use crate::utils::toml_config::SearchToolConfig;
use async_trait::async_trait;
use scraper::{ElementRef, Html, Selector};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{debug, warn};

/// One scraped search hit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub snippet: String,
}

/// Web search tool backed by an HTML results page
pub struct SearchTool {
    client: reqwest::Client,
    base_url: String,
    max_results: usize,
}

impl SearchTool {
    pub fn new(config: &SearchToolConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            max_results: config.max_results,
        })
    }

    async fn fetch_results_page(&self, query: &str) -> Result<String> {
        let url = format!("{}/s", self.base_url);
        let rn = self.max_results.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[("wd", query), ("rn", rn.as_str())])
            .send()
            .await?
            .error_for_status()?;

        Ok(response.text().await?)
    }
}

#[async_trait]
impl Tool for SearchTool {
    fn name(&self) -> &str {
        "web_search"
    }

    fn description(&self) -> &str {
        "搜索互联网获取信息，返回搜索结果摘要"
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "搜索关键词"
                }
            },
            "required": ["query"]
        })
    }

    async fn execute(&self, args: Value) -> Result<ToolOutput> {
        let query = optional_str_arg(&args, "query")?
            .ok_or_else(|| AppError::InvalidInput("Missing 'query' parameter".to_string()))?;

        let html = match self.fetch_results_page(query).await {
            Ok(html) => html,
            Err(e) => {
                warn!(query, error = %e, "Search request failed");
                return Ok(ToolOutput::error(format!("搜索失败: {}", e)));
            }
        };

        let hits = parse_results(&html, self.max_results);
        debug!(query, hits = hits.len(), "Parsed search results");

        Ok(ToolOutput::text(format_results(query, &hits)))
    }
}

/// Scrape up to `limit` hits from a results page.
///
/// Titles come from `h3` elements whose class starts with `c-title`
/// (preferring the link text inside), snippets from `span` elements whose
/// class starts with `c-abstract`. Snippets are paired with titles by
/// position; surplus snippets are ignored.
pub fn parse_results(html: &str, limit: usize) -> Vec<SearchHit> {
    let document = Html::parse_document(html);
    let (Ok(title_sel), Ok(link_sel), Ok(abstract_sel)) = (
        Selector::parse(r#"h3[class^="c-title"]"#),
        Selector::parse("a"),
        Selector::parse(r#"span[class^="c-abstract"]"#),
    ) else {
        return Vec::new();
    };

    let mut hits: Vec<SearchHit> = document
        .select(&title_sel)
        .filter_map(|heading| {
            let title = heading
                .select(&link_sel)
                .next()
                .map(element_text)
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| element_text(heading));
            (!title.is_empty()).then(|| SearchHit {
                title,
                snippet: String::new(),
            })
        })
        .take(limit)
        .collect();

    for (hit, snippet) in hits.iter_mut().zip(document.select(&abstract_sel)) {
        hit.snippet = element_text(snippet);
    }

    hits
}

fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render hits as the numbered text block returned to callers
pub fn format_results(query: &str, hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return format!("未找到 \"{}\" 的搜索结果", query);
    }

    let body = hits
        .iter()
        .enumerate()
        .map(|(i, hit)| {
            let snippet = if hit.snippet.is_empty() {
                "无摘要"
            } else {
                hit.snippet.as_str()
            };
            format!("{}. {}\n   {}", i + 1, hit.title, snippet)
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("搜索结果: {}\n\n{}", query, body)
}
