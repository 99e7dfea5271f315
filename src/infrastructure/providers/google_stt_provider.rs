use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;

use super::stt_provider::{Transcript, TranscriptFetcher};
use crate::error::{AppError, AppResult};

pub const DEFAULT_BASE_URL: &str = "https://www.google.com";

/// Google Speech v2 transcription backend.
///
/// The response body is JSON lines; the first line with a non-empty `result`
/// array carries the transcript.
pub struct GoogleSttProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct RecognizeLine {
    #[serde(default)]
    result: Vec<RecognizeResult>,
}

#[derive(Debug, Deserialize)]
struct RecognizeResult {
    #[serde(default)]
    alternative: Vec<RecognizeAlternative>,
}

#[derive(Debug, Deserialize)]
struct RecognizeAlternative {
    transcript: String,
    #[serde(default)]
    confidence: Option<f64>,
}

impl GoogleSttProvider {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn parse_response(body: &str) -> AppResult<Transcript> {
        for line in body.lines().filter(|l| !l.trim().is_empty()) {
            let parsed: RecognizeLine = serde_json::from_str(line).map_err(|e| {
                AppError::ExternalService(format!("unparsable transcription response: {e}"))
            })?;

            if let Some(result) = parsed.result.into_iter().next() {
                let alternative = result.alternative.into_iter().next().ok_or_else(|| {
                    AppError::ExternalService(
                        "no transcribed text found in the response".to_string(),
                    )
                })?;
                return Ok(Transcript {
                    text: alternative.transcript,
                    confidence: alternative.confidence,
                });
            }
        }

        Err(AppError::ExternalService(
            "transcription response contained no result".to_string(),
        ))
    }
}

#[async_trait]
impl TranscriptFetcher for GoogleSttProvider {
    async fn fetch_transcript(&self, audio_file: &Path, language: &str) -> AppResult<Transcript> {
        let url = format!(
            "{}/speech-api/v2/recognize?output=json&lang={}&key={}",
            self.base_url,
            urlencoding::encode(language),
            urlencoding::encode(&self.api_key),
        );

        let audio_data = tokio::fs::read(audio_file).await?;

        tracing::info!(
            audio_file = %audio_file.display(),
            language = language,
            audio_size = audio_data.len(),
            "Fetching Google transcript"
        );

        let response = self
            .client
            .post(&url)
            .header(
                reqwest::header::CONTENT_TYPE,
                "audio/x-flac; rate=16000;",
            )
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

        let body = response
            .text()
            .await
            .map_err(|e| AppError::ExternalService(format!("unreadable response body: {e}")))?;

        Self::parse_response(&body)
    }
}
