use std::path::Path;

use async_trait::async_trait;

use crate::domain::tts::segmenter::TextChunk;
use crate::domain::tts::{AudioEncoding, SynthesisError};

/// Adapter for the chunked-JSON provider family.
///
/// Implementations perform exactly one network call per chunk and normalize
/// the provider's status/error protocol into [`SynthesisError`]. On success
/// the decoded audio payload for that chunk is returned; no bytes are ever
/// produced for a failed chunk.
#[async_trait]
pub trait ChunkSynthesizer: Send + Sync {
    async fn synthesize_chunk(
        &self,
        chunk: &TextChunk,
        voice_id: &str,
    ) -> Result<Vec<u8>, SynthesisError>;
}

/// Adapter for the streaming provider family.
///
/// One request carries the full unsegmented text; the response byte stream
/// is piped directly to `destination` as it arrives. Implementations must
/// not leave a partial file behind on failure and report the total number of
/// bytes written on success.
#[async_trait]
pub trait StreamSynthesizer: Send + Sync {
    async fn synthesize_to_file(
        &self,
        text: &str,
        voice_id: &str,
        encoding: AudioEncoding,
        destination: &Path,
    ) -> Result<u64, SynthesisError>;
}
