use serde::Deserialize;
use serde_json::json;

use crate::error::{AppError, AppResult};

pub const DEFAULT_BASE_URL: &str = "https://api.deepgram.com";

/// Deepgram text intelligence summarization
pub struct DeepgramSummaryProvider {
    client: reqwest::Client,
    base_url: String,
    api_token: String,
}

#[derive(Debug, Deserialize)]
struct ReadResponse {
    results: ReadResults,
}

#[derive(Debug, Deserialize)]
struct ReadResults {
    summary: ReadSummary,
}

#[derive(Debug, Deserialize)]
struct ReadSummary {
    text: String,
}

impl DeepgramSummaryProvider {
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

    pub async fn summarize(&self, text: &str, language_code: &str) -> AppResult<String> {
        let url = format!(
            "{}/v1/read?language={}&summarize=v2",
            self.base_url,
            urlencoding::encode(language_code),
        );

        tracing::info!(
            language = language_code,
            text_length = text.len(),
            "Summarizing text"
        );

        let response = self
            .client
            .post(&url)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Token {}", self.api_token),
            )
            .json(&json!({ "text": text }))
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("summarization request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::ExternalService(format!(
                "summarization backend returned HTTP {status}"
            )));
        }

        let body: ReadResponse = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("unparsable summarization response: {e}"))
        })?;

        Ok(body.results.summary.text)
    }
}
