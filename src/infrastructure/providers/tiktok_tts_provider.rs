use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::Deserialize;

use super::tts_provider::ChunkSynthesizer;
use crate::domain::tts::segmenter::TextChunk;
use crate::domain::tts::SynthesisError;

pub const DEFAULT_BASE_URL: &str = "https://api16-normal-v6.tiktokv.com";

/// The provider rejects requests without a mobile-app User-Agent
const USER_AGENT: &str = "com.zhiliaoapp.musically/2022600030 (Linux; U; Android 7.1.2; \
                          es_ES; SM-G988N; Build/NRD90M;tt-ok/3.12.13.1)";

/// Chunked-JSON synthesis provider.
///
/// One POST per chunk; the voice identifier and the sanitized chunk text
/// travel as query parameters, authentication as a session cookie. The
/// response carries a numeric status code and, on success, the audio payload
/// base64-encoded.
pub struct TikTokTtsProvider {
    client: reqwest::Client,
    base_url: String,
    session_id: String,
}

#[derive(Debug, Deserialize)]
struct InvokeResponse {
    status_code: i64,
    #[serde(default)]
    data: Option<InvokeData>,
}

#[derive(Debug, Deserialize)]
struct InvokeData {
    #[serde(default)]
    v_str: Option<String>,
}

impl TikTokTtsProvider {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        session_id: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            session_id: session_id.into(),
        }
    }
}

#[async_trait]
impl ChunkSynthesizer for TikTokTtsProvider {
    async fn synthesize_chunk(
        &self,
        chunk: &TextChunk,
        voice_id: &str,
    ) -> Result<Vec<u8>, SynthesisError> {
        // The sanitized text is already transport-safe ([a-zA-Z0-9+]), it is
        // embedded as-is; only the voice identifier needs encoding.
        let url = format!(
            "{}/media/api/text/speech/invoke/?text_speaker={}&req_text={}&speaker_map_type=0&aid=1233",
            self.base_url,
            urlencoding::encode(voice_id),
            chunk.sanitized_text,
        );

        tracing::info!(
            chunk_index = chunk.index,
            voice = voice_id,
            chunk_size = chunk.sanitized_text.len(),
            "Synthesizing chunk"
        );

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .header(
                reqwest::header::COOKIE,
                format!("sessionid={}", self.session_id),
            )
            .header(reqwest::header::ACCEPT_ENCODING, "gzip,deflate")
            .send()
            .await
            .map_err(|e| SynthesisError::Dependency(format!("chunk request failed: {e}")))?;

        let body: InvokeResponse = response
            .json()
            .await
            .map_err(|e| SynthesisError::Dependency(format!("unparsable provider response: {e}")))?;

        if let Some(err) = SynthesisError::for_provider_status(body.status_code) {
            tracing::error!(
                chunk_index = chunk.index,
                status_code = body.status_code,
                error = %err,
                "Provider rejected chunk"
            );
            return Err(err);
        }

        let payload = body
            .data
            .and_then(|d| d.v_str)
            .ok_or_else(|| SynthesisError::Dependency("missing audio payload".to_string()))?;

        let audio = BASE64
            .decode(payload)
            .map_err(|e| SynthesisError::Dependency(format!("invalid base64 payload: {e}")))?;

        tracing::debug!(
            chunk_index = chunk.index,
            audio_size = audio.len(),
            "Chunk audio decoded"
        );
        Ok(audio)
    }
}
