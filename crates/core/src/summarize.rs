use async_trait::async_trait;
use serde_json::Value;

use crate::{error::SummarizationError, provider::ProviderConfig};

pub const EMPTY_TRANSCRIPT_SUMMARY: &str =
    "Could not generate summary because the transcript was empty.";
pub const SUMMARY_NOT_FOUND: &str = "Summary not found in response.";

#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, transcript: &str) -> Result<String, SummarizationError>;
}

pub struct QueryApiSummarizer {
    client: reqwest::Client,
    endpoint: String,
}

impl QueryApiSummarizer {
    pub fn new(client: reqwest::Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            endpoint: config.summarization_url.clone(),
        }
    }
}

#[async_trait]
impl Summarizer for QueryApiSummarizer {
    async fn summarize(&self, transcript: &str) -> Result<String, SummarizationError> {
        if transcript.trim().is_empty() {
            tracing::warn!("Transcript is empty, skipping summarization request");
            return Ok(EMPTY_TRANSCRIPT_SUMMARY.to_string());
        }

        tracing::info!(chars = transcript.len(), "Generating summary");

        let response = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "queries": [transcript] }))
            .send()
            .await?;

        let status = response.status();
        tracing::info!(status = status.as_u16(), "Summarization API responded");

        let body = response.text().await?;
        if !status.is_success() {
            tracing::error!(status = status.as_u16(), body = %body, "Summarization API error");
            return Err(SummarizationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let data: Value = serde_json::from_str(&body)
            .map_err(|source| SummarizationError::InvalidJson { source, body })?;
        tracing::debug!(response = %data, "Summarization API raw response");

        match extract_summary(&data) {
            Some(summary) => {
                tracing::info!("Summary generation successful");
                Ok(summary)
            }
            None => {
                tracing::warn!(response = %data, "Summary field missing from response");
                Ok(SUMMARY_NOT_FOUND.to_string())
            }
        }
    }
}

/// Pull the summary out of the two response shapes the API is known to use:
/// `[{"answer": ..}, ..]` or `{"answer": ..}` / `{"summary": ..}`.
pub fn extract_summary(data: &Value) -> Option<String> {
    let text = |v: &Value, key: &str| v.get(key).and_then(Value::as_str).map(str::to_string);

    match data {
        Value::Array(items) => items.first().and_then(|first| text(first, "answer")),
        Value::Object(_) => text(data, "answer").or_else(|| text(data, "summary")),
        _ => None,
    }
}
