//! LLM-backed event summarizer.
//!
//! Talks to an OpenAI-compatible chat-completions endpoint (LM Studio,
//! llama.cpp server, or a hosted equivalent). The request carries a fixed
//! system prompt asking for a single concise sentence; the resolved date
//! is included so the model does not restate it.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Summarizer;
use crate::domain::event::DATE_FORMAT;

const SYSTEM_PROMPT: &str = "You summarize one sentence from a narrative into a concise \
event description. Reply with a single short sentence in plain past or future tense. \
Do not include the date, any preamble, or quotation marks.";

/// Configuration for the LLM summarizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizerConfig {
    /// Base URL of the chat-completions server
    pub base_url: String,

    /// Model identifier to request
    pub model: String,
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:1234".to_string(),
            model: "meta-llama-3.1-8b-instruct".to_string(),
        }
    }
}

/// Chat-completions summarizer client
pub struct LlmSummarizer {
    config: SummarizerConfig,
    client: reqwest::Client,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

impl LlmSummarizer {
    pub fn new(config: SummarizerConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }
}

#[async_trait]
impl Summarizer for LlmSummarizer {
    fn name(&self) -> &str {
        "llm"
    }

    async fn summarize(
        &self,
        sentence: &str,
        date: NaiveDate,
        timeout: Duration,
    ) -> Result<String> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: format!(
                        "Date: {}\nSentence: {}",
                        date.format(DATE_FORMAT),
                        sentence
                    ),
                },
            ],
            temperature: 0.0,
        };

        let response = self
            .client
            .post(self.api_url("v1/chat/completions"))
            .timeout(timeout)
            .json(&request)
            .send()
            .await
            .context("Failed to reach summarization service")?
            .error_for_status()
            .context("Summarization service returned an error status")?;

        let parsed: ChatResponse = response
            .json()
            .await
            .context("Failed to parse summarization response")?;

        let content = parsed
            .choices
            .first()
            .map(|c| c.message.content.trim().to_string())
            .unwrap_or_default();

        if content.is_empty() {
            anyhow::bail!("Summarization service returned an empty completion");
        }

        Ok(content)
    }

    async fn health_check(&self) -> Result<()> {
        let response = self
            .client
            .get(self.api_url("v1/models"))
            .timeout(Duration::from_secs(5))
            .send()
            .await
            .context("Failed to reach summarization service")?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Summarization service health check failed: {}",
                response.status()
            );
        }

        Ok(())
    }
}

/// Pass-through summarizer for offline runs: the raw sentence text is the
/// event description.
pub struct NoopSummarizer;

#[async_trait]
impl Summarizer for NoopSummarizer {
    fn name(&self) -> &str {
        "noop"
    }

    async fn summarize(
        &self,
        sentence: &str,
        _date: NaiveDate,
        _timeout: Duration,
    ) -> Result<String> {
        Ok(sentence.to_string())
    }

    async fn health_check(&self) -> Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url_trims_trailing_slash() {
        let summarizer = LlmSummarizer::new(SummarizerConfig {
            base_url: "http://localhost:1234/".to_string(),
            model: "test".to_string(),
        });

        assert_eq!(
            summarizer.api_url("v1/chat/completions"),
            "http://localhost:1234/v1/chat/completions"
        );
    }

    #[tokio::test]
    async fn test_noop_summarizer_echoes_sentence() {
        let summarizer = NoopSummarizer;
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        let out = summarizer
            .summarize("The meeting was held.", date, Duration::from_secs(1))
            .await
            .unwrap();

        assert_eq!(out, "The meeting was held.");
        assert_eq!(summarizer.name(), "noop");
    }
}
