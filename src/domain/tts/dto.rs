use serde::{Deserialize, Serialize};

use super::segmenter::ChunkPolicy;

/// Audio encodings accepted by the streaming provider.
///
/// The chunked provider always produces MP3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioEncoding {
    Mp3,
    Opus,
    Flac,
    Aac,
}

impl AudioEncoding {
    /// File extension (and provider query value) for this encoding
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioEncoding::Mp3 => "mp3",
            AudioEncoding::Opus => "opus",
            AudioEncoding::Flac => "flac",
            AudioEncoding::Aac => "aac",
        }
    }
}

impl std::fmt::Display for AudioEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which provider family handles the request.
///
/// A closed set: the two families have genuinely different response shapes
/// and reassembly logic, so the orchestrator matches exhaustively instead of
/// dispatching through an open trait object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SynthesisProvider {
    Chunked,
    Streaming,
}

/// Caller-side voice selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoiceChoice {
    /// Use this voice identifier verbatim, no detection call is made
    Explicit(String),
    /// Detect the text's language and pick the catalog default for it
    AutoDetect,
}

/// What to do when automatic language detection fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetectionPolicy {
    /// Surface the detection error to the caller
    #[default]
    Propagate,
    /// Continue with the catalog's fallback voice
    FallbackToDefault,
}

/// Outcome of voice resolution, never mutated after creation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceSelection {
    /// Lowercase ISO 639-1 code, `None` when the caller supplied the voice
    pub detected_language: Option<String>,
    pub voice_id: String,
}

/// One logical "speak this text" request.
///
/// Immutable once accepted by [`super::TtsService::synthesize`]; concurrent
/// synthesis calls must use distinct `output_base` names, the pipeline does
/// not serialize access to a shared filename.
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    pub text: String,
    pub voice: VoiceChoice,
    /// Output filename without extension; the extension is derived from the
    /// provider family (`mp3` for chunked, the selected encoding otherwise)
    pub output_base: String,
    pub provider: SynthesisProvider,
    /// Only consulted on the streaming path
    pub encoding: AudioEncoding,
    /// Only consulted on the chunked path
    pub chunk_policy: ChunkPolicy,
    pub on_detection_failure: DetectionPolicy,
}

impl SynthesisRequest {
    pub fn new(
        text: impl Into<String>,
        output_base: impl Into<String>,
        provider: SynthesisProvider,
    ) -> Self {
        Self {
            text: text.into(),
            voice: VoiceChoice::AutoDetect,
            output_base: output_base.into(),
            provider,
            encoding: AudioEncoding::Mp3,
            chunk_policy: ChunkPolicy::default(),
            on_detection_failure: DetectionPolicy::default(),
        }
    }

    pub fn with_voice(mut self, voice_id: impl Into<String>) -> Self {
        self.voice = VoiceChoice::Explicit(voice_id.into());
        self
    }

    pub fn with_encoding(mut self, encoding: AudioEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_chunk_policy(mut self, policy: ChunkPolicy) -> Self {
        self.chunk_policy = policy;
        self
    }

    pub fn with_detection_policy(mut self, policy: DetectionPolicy) -> Self {
        self.on_detection_failure = policy;
        self
    }
}
