use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, AppResult};

pub const DEFAULT_BASE_URL: &str = "https://api.edenai.run";

/// Summarization backends Eden AI can route to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryBackend {
    OpenAi,
    Cohere,
    AlephAlpha,
    NlpCloud,
    Anthropic,
}

impl SummaryBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryBackend::OpenAi => "openai",
            SummaryBackend::Cohere => "cohere",
            SummaryBackend::AlephAlpha => "alephalpha",
            SummaryBackend::NlpCloud => "nlpcloud",
            SummaryBackend::Anthropic => "anthropic",
        }
    }
}

/// Summarized text plus the cost the backend billed for it
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Summary {
    #[serde(rename = "result")]
    pub text: String,
    pub cost: f64,
}

/// Eden AI text summarization
pub struct EdenaiSummaryProvider {
    client: reqwest::Client,
    base_url: String,
    api_token: String,
}

impl EdenaiSummaryProvider {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_token: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_token: api_token.into(),
        }
    }

    /// Summarize `text` into `output_sentences` sentences.
    pub async fn summarize(
        &self,
        text: &str,
        backend: SummaryBackend,
        language_code: &str,
        output_sentences: u32,
    ) -> AppResult<Summary> {
        let url = format!("{}/v2/text/summarize", self.base_url);

        tracing::info!(
            backend = backend.as_str(),
            language = language_code,
            text_length = text.len(),
            "Summarizing text"
        );

        let response = self
            .client
            .post(&url)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Bearer {}", self.api_token),
            )
            .json(&json!({
                "output_sentences": output_sentences,
                "providers": backend.as_str(),
                "text": text,
                "language": language_code,
            }))
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("summarization request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::ExternalService(format!(
                "summarization backend returned HTTP {status}"
            )));
        }

        // Response is keyed by the backend that produced the summary
        let mut body: serde_json::Value = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("unparsable summarization response: {e}"))
        })?;

        let entry = body
            .get_mut(backend.as_str())
            .map(serde_json::Value::take)
            .ok_or_else(|| {
                AppError::ExternalService(format!(
                    "no result for backend {} in summarization response",
                    backend.as_str()
                ))
            })?;

        let summary: Summary = serde_json::from_value(entry).map_err(|e| {
            AppError::ExternalService(format!("unparsable summarization result: {e}"))
        })?;

        tracing::debug!(cost = summary.cost, "Summary received");
        Ok(summary)
    }
}
