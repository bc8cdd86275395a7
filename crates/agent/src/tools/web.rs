use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use serde_json::{json, Value};

use super::Tool;

/// Cap on returned body text, to keep tool observations inside a sane
/// model-context budget.
const MAX_BODY_CHARS: usize = 8000;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

pub struct FetchUrlTool {
    client: reqwest::Client,
}

impl FetchUrlTool {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

impl Default for FetchUrlTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for FetchUrlTool {
    fn name(&self) -> &'static str {
        "fetch_url"
    }

    fn description(&self) -> &'static str {
        "Fetch text content from a URL (10s timeout, truncated)"
    }

    async fn execute(&self, input: Value) -> Result<Value> {
        let Some(url) = input.get("url").and_then(Value::as_str) else {
            return Ok(json!({ "error": "missing `url` argument" }));
        };

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(error) => return Ok(json!({ "error": format!("request error: {error}") })),
        };

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        if !status.is_success() {
            let preview: String = body.chars().take(500).collect();
            return Ok(json!({ "error": format!("HTTP {}: {preview}", status.as_u16()) }));
        }

        Ok(json!({ "content": truncate(&body) }))
    }
}

fn truncate(body: &str) -> String {
    if body.chars().count() <= MAX_BODY_CHARS {
        return body.to_string();
    }
    let mut clipped: String = body.chars().take(MAX_BODY_CHARS).collect();
    clipped.push_str("\n...[truncated]");
    clipped
}

#[cfg(test)]
mod tests {
    use super::truncate;

    #[test]
    fn short_bodies_pass_through() {
        assert_eq!(truncate("hello"), "hello");
    }

    #[test]
    fn long_bodies_are_clipped_with_a_marker() {
        let body = "x".repeat(9000);
        let clipped = truncate(&body);
        assert!(clipped.ends_with("...[truncated]"));
        assert!(clipped.chars().count() < 8100);
    }
}
