//! voicepipe — text-to-speech client pipeline.
//!
//! The core of this crate is the synthesis pipeline in [`domain::tts`]: a
//! single "speak this text" request is resolved to a concrete voice, split
//! into provider-sized chunks, dispatched to a remote speech-synthesis
//! provider, and the resulting audio fragments are reassembled in request
//! order and persisted as one playable file. Two structurally different
//! provider families are supported: a chunked-JSON provider that returns
//! base64 audio per chunk, and a streaming provider that returns a single
//! continuous byte stream.
//!
//! Around the core sit thin collaborators: process-based playback and
//! capture, speech-to-text transcription, text summarization, and a
//! language-model chat wrapper. These live in [`infrastructure`].

pub mod domain;
pub mod error;
pub mod infrastructure;

pub use domain::tts::{
    AudioEncoding, ChunkPolicy, DetectionPolicy, SynthesisError, SynthesisProvider,
    SynthesisRequest, TtsService, VoiceCatalog, VoiceChoice, VoiceSelection,
};
pub use error::{AppError, AppResult};
pub use infrastructure::config::{Config, Environment, LogFormat};
