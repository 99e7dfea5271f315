use std::path::Path;

use async_trait::async_trait;
use futures::StreamExt;
use serde_json::json;
use tokio::io::AsyncWriteExt;

use super::tts_provider::StreamSynthesizer;
use crate::domain::tts::{AudioEncoding, SynthesisError};

pub const DEFAULT_BASE_URL: &str = "https://playpi.deepgram.com";

/// Streaming synthesis provider.
///
/// The whole text goes out as one JSON body (no chunking, no sanitization)
/// and the response byte stream is piped to the destination file as it
/// arrives. A partial file is removed before the error is surfaced: callers
/// either get a complete file or none.
pub struct DeepgramTtsProvider {
    client: reqwest::Client,
    base_url: String,
    api_token: String,
}

impl DeepgramTtsProvider {
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

    async fn discard_partial_file(destination: &Path) {
        if let Err(e) = tokio::fs::remove_file(destination).await {
            tracing::warn!(
                filename = %destination.display(),
                error = %e,
                "Could not remove partial audio file"
            );
        }
    }
}

#[async_trait]
impl StreamSynthesizer for DeepgramTtsProvider {
    async fn synthesize_to_file(
        &self,
        text: &str,
        voice_id: &str,
        encoding: AudioEncoding,
        destination: &Path,
    ) -> Result<u64, SynthesisError> {
        let url = format!(
            "{}/v1/speak?model={}&encoding={}",
            self.base_url,
            urlencoding::encode(voice_id),
            encoding.as_str(),
        );

        tracing::info!(
            model = voice_id,
            encoding = %encoding,
            text_length = text.len(),
            filename = %destination.display(),
            "Starting streaming synthesis"
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
            .map_err(|e| SynthesisError::Dependency(format!("stream request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SynthesisError::Dependency(format!(
                "provider returned HTTP {status}"
            )));
        }

        let mut file = tokio::fs::File::create(destination)
            .await
            .map_err(|e| SynthesisError::Write(format!("{}: {e}", destination.display())))?;

        let mut stream = response.bytes_stream();
        let mut bytes_written: u64 = 0;
        while let Some(piece) = stream.next().await {
            let bytes = match piece {
                Ok(bytes) => bytes,
                Err(e) => {
                    drop(file);
                    Self::discard_partial_file(destination).await;
                    return Err(SynthesisError::Write(format!("stream interrupted: {e}")));
                }
            };
            if let Err(e) = file.write_all(&bytes).await {
                drop(file);
                Self::discard_partial_file(destination).await;
                return Err(SynthesisError::Write(format!(
                    "{}: {e}",
                    destination.display()
                )));
            }
            bytes_written += bytes.len() as u64;
        }

        file.flush()
            .await
            .map_err(|e| SynthesisError::Write(format!("{}: {e}", destination.display())))?;

        tracing::info!(
            filename = %destination.display(),
            audio_size_bytes = bytes_written,
            "Saved streamed audio"
        );
        Ok(bytes_written)
    }
}
