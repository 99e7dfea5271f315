use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;

use super::stt_provider::{Transcript, TranscriptFetcher};
use crate::error::{AppError, AppResult};

pub const DEFAULT_BASE_URL: &str = "https://api.deepgram.com";

/// Transcription models accepted by the prerecorded endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeepgramSttModel {
    Nova2,
    Nova,
    Enhanced,
    Base,
}

impl DeepgramSttModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeepgramSttModel::Nova2 => "nova-2",
            DeepgramSttModel::Nova => "nova",
            DeepgramSttModel::Enhanced => "enhanced",
            DeepgramSttModel::Base => "base",
        }
    }
}

/// Deepgram prerecorded transcription backend
pub struct DeepgramSttProvider {
    client: reqwest::Client,
    base_url: String,
    api_token: String,
    model: DeepgramSttModel,
}

#[derive(Debug, Deserialize)]
struct ListenResponse {
    results: ListenResults,
}

#[derive(Debug, Deserialize)]
struct ListenResults {
    channels: Vec<ListenChannel>,
}

#[derive(Debug, Deserialize)]
struct ListenChannel {
    alternatives: Vec<ListenAlternative>,
}

#[derive(Debug, Deserialize)]
struct ListenAlternative {
    transcript: String,
    #[serde(default)]
    confidence: Option<f64>,
}

impl DeepgramSttProvider {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_token: impl Into<String>,
        model: DeepgramSttModel,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_token: api_token.into(),
            model,
        }
    }
}

#[async_trait]
impl TranscriptFetcher for DeepgramSttProvider {
    async fn fetch_transcript(&self, audio_file: &Path, language: &str) -> AppResult<Transcript> {
        let url = format!(
            "{}/v1/listen?model={}&language={}&smart_format=true&detect_language=true",
            self.base_url,
            self.model.as_str(),
            urlencoding::encode(language),
        );

        let audio_data = tokio::fs::read(audio_file).await?;

        tracing::info!(
            audio_file = %audio_file.display(),
            model = self.model.as_str(),
            language = language,
            audio_size = audio_data.len(),
            "Fetching Deepgram transcript"
        );

        let response = self
            .client
            .post(&url)
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Token {}", self.api_token),
            )
            .header(reqwest::header::CONTENT_TYPE, "audio/*")
            .body(audio_data)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("transcription request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::ExternalService(format!(
                "transcription backend returned HTTP {status}"
            )));
        }

        let body: ListenResponse = response.json().await.map_err(|e| {
            AppError::ExternalService(format!("unparsable transcription response: {e}"))
        })?;

        let alternative = body
            .results
            .channels
            .into_iter()
            .next()
            .and_then(|c| c.alternatives.into_iter().next())
            .ok_or_else(|| {
                AppError::ExternalService("no transcribed text found in the response".to_string())
            })?;

        Ok(Transcript {
            text: alternative.transcript,
            confidence: alternative.confidence,
        })
    }
}
