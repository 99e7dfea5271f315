use std::path::Path;

use async_trait::async_trait;

use crate::error::AppResult;

/// A transcription result
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    pub text: String,
    pub confidence: Option<f64>,
}

/// Speech-to-text backend: audio file in, transcript out.
///
/// A simple single-request wrapper; language/model parameters are fixed at
/// provider construction or passed per call, and failures propagate as
/// opaque external-service errors.
#[async_trait]
pub trait TranscriptFetcher: Send + Sync {
    async fn fetch_transcript(&self, audio_file: &Path, language: &str) -> AppResult<Transcript>;
}
