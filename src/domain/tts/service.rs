use std::path::Path;
use std::sync::Arc;

use futures::future;

use super::assembler;
use super::dto::{
    AudioEncoding, DetectionPolicy, SynthesisProvider, SynthesisRequest, VoiceSelection,
};
use super::error::SynthesisError;
use super::segmenter;
use super::voice::{VoiceCatalog, VoiceResolver};
use crate::error::AppResult;
use crate::infrastructure::config::Config;
use crate::infrastructure::http::build_http_client;
use crate::infrastructure::providers::{
    deepgram_tts_provider, language_detector, tiktok_tts_provider, ChunkSynthesizer,
    DeepgramTtsProvider, GoogleTranslateDetector, StreamSynthesizer, TikTokTtsProvider,
};

/// Synthesis orchestrator — the public entry point of the pipeline.
///
/// A request moves through voice resolution, segmentation, dispatch,
/// assembly and persistence; any stage failure surfaces to the caller and
/// leaves no output file behind on the chunked path. Provider families are a
/// closed set dispatched by exhaustive match on
/// [`SynthesisProvider`](super::dto::SynthesisProvider).
pub struct TtsService {
    chunked: Arc<dyn ChunkSynthesizer>,
    streaming: Arc<dyn StreamSynthesizer>,
    resolver: VoiceResolver,
}

impl TtsService {
    pub fn new(
        chunked: Arc<dyn ChunkSynthesizer>,
        streaming: Arc<dyn StreamSynthesizer>,
        resolver: VoiceResolver,
    ) -> Self {
        Self {
            chunked,
            streaming,
            resolver,
        }
    }

    /// Wire the service against the real provider endpoints.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let client = build_http_client(std::time::Duration::from_secs(config.http_timeout_secs))?;

        let chunked = Arc::new(TikTokTtsProvider::new(
            client.clone(),
            tiktok_tts_provider::DEFAULT_BASE_URL,
            config.tts_session_id.clone(),
        ));
        let streaming = Arc::new(DeepgramTtsProvider::new(
            client.clone(),
            deepgram_tts_provider::DEFAULT_BASE_URL,
            config.deepgram_api_token.clone(),
        ));
        let detector = Arc::new(GoogleTranslateDetector::new(
            client,
            language_detector::DEFAULT_BASE_URL,
        ));

        Ok(Self::new(
            chunked,
            streaming,
            VoiceResolver::new(detector, VoiceCatalog::chunked_defaults()),
        ))
    }

    /// Convert text into one persisted audio file.
    ///
    /// Returns the resolved output filename (`<output_base>.mp3` for the
    /// chunked provider, `<output_base>.<encoding>` for the streaming one).
    pub async fn synthesize(&self, request: SynthesisRequest) -> Result<String, SynthesisError> {
        if request.text.trim().is_empty() {
            return Err(SynthesisError::EmptyText);
        }

        tracing::info!(
            provider = ?request.provider,
            output_base = %request.output_base,
            text_length = request.text.len(),
            "TTS synthesis request"
        );

        let selection = self.resolve_voice(&request).await?;
        tracing::debug!(
            stage = "voice_resolved",
            voice = %selection.voice_id,
            language_detected = selection.detected_language.as_deref().unwrap_or("n/a"),
            "Voice resolved"
        );

        match request.provider {
            SynthesisProvider::Chunked => self.synthesize_chunked(&request, &selection).await,
            SynthesisProvider::Streaming => self.synthesize_streaming(&request, &selection).await,
        }
    }

    async fn resolve_voice(
        &self,
        request: &SynthesisRequest,
    ) -> Result<VoiceSelection, SynthesisError> {
        match self.resolver.resolve(&request.text, &request.voice).await {
            Ok(selection) => Ok(selection),
            Err(err @ SynthesisError::Detection(_)) => match request.on_detection_failure {
                DetectionPolicy::Propagate => Err(err),
                DetectionPolicy::FallbackToDefault => {
                    tracing::warn!(
                        error = %err,
                        "Language detection failed, continuing with default voice"
                    );
                    Ok(self.resolver.fallback_selection())
                }
            },
            Err(err) => Err(err),
        }
    }

    /// Chunked path: segment, dispatch all chunks concurrently, reassemble
    /// by chunk index, write once.
    async fn synthesize_chunked(
        &self,
        request: &SynthesisRequest,
        selection: &VoiceSelection,
    ) -> Result<String, SynthesisError> {
        let chunks = segmenter::segment(&request.text, request.chunk_policy)?;
        tracing::info!(
            stage = "segmented",
            chunk_count = chunks.len(),
            text_length = request.text.len(),
            "Text split into chunks"
        );

        // try_join_all keeps results in input (index) order and resolves to
        // the first error, dropping in-flight sibling requests: reassembly
        // never depends on completion order, and one failed chunk
        // short-circuits the whole synthesis.
        tracing::debug!(stage = "dispatching", chunk_count = chunks.len(), "Dispatching chunks");
        let payloads: Vec<Vec<u8>> = future::try_join_all(chunks.iter().map(|chunk| {
            let provider = Arc::clone(&self.chunked);
            let voice_id = selection.voice_id.clone();
            async move {
                provider
                    .synthesize_chunk(chunk, &voice_id)
                    .await
                    .map_err(|source| SynthesisError::for_chunk(chunk.index, source))
            }
        }))
        .await?;

        tracing::debug!(stage = "assembling", "All chunks received");
        let audio = assembler::assemble(payloads);
        if audio.is_empty() {
            return Err(SynthesisError::Dependency(
                "provider returned no audio for any chunk".to_string(),
            ));
        }

        let filename = assembler::output_filename(&request.output_base, AudioEncoding::Mp3);
        assembler::write_audio_file(Path::new(&filename), &audio).await?;

        tracing::info!(
            stage = "done",
            filename = %filename,
            chunk_count = chunks.len(),
            audio_size_bytes = audio.len(),
            "TTS synthesis completed"
        );
        Ok(filename)
    }

    /// Streaming path: one request, response piped straight to the file.
    async fn synthesize_streaming(
        &self,
        request: &SynthesisRequest,
        selection: &VoiceSelection,
    ) -> Result<String, SynthesisError> {
        let filename = assembler::output_filename(&request.output_base, request.encoding);

        tracing::debug!(stage = "dispatching", filename = %filename, "Dispatching stream request");
        let bytes_written = self
            .streaming
            .synthesize_to_file(
                &request.text,
                &selection.voice_id,
                request.encoding,
                Path::new(&filename),
            )
            .await?;

        tracing::info!(
            stage = "done",
            filename = %filename,
            audio_size_bytes = bytes_written,
            "TTS synthesis completed"
        );
        Ok(filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tts::dto::VoiceChoice;
    use crate::domain::tts::segmenter::TextChunk;
    use crate::domain::tts::voice::VoiceCatalog;
    use crate::infrastructure::providers::LanguageDetection;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticChunks {
        calls: AtomicUsize,
        fail_at: Option<usize>,
    }

    #[async_trait]
    impl ChunkSynthesizer for StaticChunks {
        async fn synthesize_chunk(
            &self,
            chunk: &TextChunk,
            _voice_id: &str,
        ) -> Result<Vec<u8>, SynthesisError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_at == Some(chunk.index) {
                return Err(SynthesisError::InvalidVoice);
            }
            // Payload derived from the index so order is observable
            Ok(vec![chunk.index as u8; 3])
        }
    }

    struct NoStream;

    #[async_trait]
    impl StreamSynthesizer for NoStream {
        async fn synthesize_to_file(
            &self,
            _text: &str,
            _voice_id: &str,
            _encoding: AudioEncoding,
            _destination: &Path,
        ) -> Result<u64, SynthesisError> {
            Err(SynthesisError::Dependency("not under test".to_string()))
        }
    }

    struct EnglishDetector;

    #[async_trait]
    impl LanguageDetection for EnglishDetector {
        async fn detect(&self, _text: &str) -> Result<String, SynthesisError> {
            Ok("en".to_string())
        }
    }

    struct BrokenDetector;

    #[async_trait]
    impl LanguageDetection for BrokenDetector {
        async fn detect(&self, _text: &str) -> Result<String, SynthesisError> {
            Err(SynthesisError::Detection("unparsable response".to_string()))
        }
    }

    fn service(chunked: Arc<dyn ChunkSynthesizer>, detector: Arc<dyn LanguageDetection>) -> TtsService {
        TtsService::new(
            chunked,
            Arc::new(NoStream),
            VoiceResolver::new(detector, VoiceCatalog::chunked_defaults()),
        )
    }

    #[tokio::test]
    async fn empty_text_fails_before_any_provider_call() {
        let chunked = Arc::new(StaticChunks {
            calls: AtomicUsize::new(0),
            fail_at: None,
        });
        let svc = service(chunked.clone(), Arc::new(EnglishDetector));

        let result = svc
            .synthesize(SynthesisRequest::new("   ", "out", SynthesisProvider::Chunked))
            .await;

        assert!(matches!(result, Err(SynthesisError::EmptyText)));
        assert_eq!(chunked.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn one_provider_call_per_chunk_and_ordered_assembly() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("speech").display().to_string();
        let chunked = Arc::new(StaticChunks {
            calls: AtomicUsize::new(0),
            fail_at: None,
        });
        let svc = service(chunked.clone(), Arc::new(EnglishDetector));

        let words: Vec<String> = (0..45).map(|i| format!("word{i}")).collect();
        let filename = svc
            .synthesize(SynthesisRequest::new(
                words.join(" "),
                &base,
                SynthesisProvider::Chunked,
            ))
            .await
            .unwrap();

        assert_eq!(chunked.calls.load(Ordering::SeqCst), 3);
        assert_eq!(filename, format!("{base}.mp3"));
        let bytes = std::fs::read(&filename).unwrap();
        assert_eq!(bytes, vec![0, 0, 0, 1, 1, 1, 2, 2, 2]);
    }

    #[tokio::test]
    async fn chunk_failure_short_circuits_and_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("speech").display().to_string();
        let chunked = Arc::new(StaticChunks {
            calls: AtomicUsize::new(0),
            fail_at: Some(1),
        });
        let svc = service(chunked, Arc::new(EnglishDetector));

        let words: Vec<String> = (0..45).map(|i| format!("word{i}")).collect();
        let result = svc
            .synthesize(SynthesisRequest::new(
                words.join(" "),
                &base,
                SynthesisProvider::Chunked,
            ))
            .await;

        match result {
            Err(SynthesisError::Chunk { index, source }) => {
                assert_eq!(index, 1);
                assert!(matches!(*source, SynthesisError::InvalidVoice));
            }
            other => panic!("expected chunk failure, got {other:?}"),
        }
        assert!(!Path::new(&format!("{base}.mp3")).exists());
    }

    #[tokio::test]
    async fn detection_failure_propagates_by_default() {
        let chunked = Arc::new(StaticChunks {
            calls: AtomicUsize::new(0),
            fail_at: None,
        });
        let svc = service(chunked.clone(), Arc::new(BrokenDetector));

        let result = svc
            .synthesize(SynthesisRequest::new("hello", "out", SynthesisProvider::Chunked))
            .await;

        assert!(matches!(result, Err(SynthesisError::Detection(_))));
        assert_eq!(chunked.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn detection_failure_falls_back_when_policy_allows() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("speech").display().to_string();
        let chunked = Arc::new(StaticChunks {
            calls: AtomicUsize::new(0),
            fail_at: None,
        });
        let svc = service(chunked, Arc::new(BrokenDetector));

        let filename = svc
            .synthesize(
                SynthesisRequest::new("hello there", &base, SynthesisProvider::Chunked)
                    .with_detection_policy(DetectionPolicy::FallbackToDefault),
            )
            .await
            .unwrap();

        assert_eq!(filename, format!("{base}.mp3"));
    }

    #[tokio::test]
    async fn explicit_voice_never_touches_the_detector() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("speech").display().to_string();
        let chunked = Arc::new(StaticChunks {
            calls: AtomicUsize::new(0),
            fail_at: None,
        });
        // BrokenDetector would fail the request if it were consulted
        let svc = service(chunked, Arc::new(BrokenDetector));

        let result = svc
            .synthesize(
                SynthesisRequest::new("hello there", &base, SynthesisProvider::Chunked)
                    .with_voice("en_uk_001"),
            )
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn all_empty_payloads_are_a_synthesis_failure() {
        struct EmptyChunks;

        #[async_trait]
        impl ChunkSynthesizer for EmptyChunks {
            async fn synthesize_chunk(
                &self,
                _chunk: &TextChunk,
                _voice_id: &str,
            ) -> Result<Vec<u8>, SynthesisError> {
                Ok(Vec::new())
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("speech").display().to_string();
        let svc = service(Arc::new(EmptyChunks), Arc::new(EnglishDetector));

        let result = svc
            .synthesize(SynthesisRequest::new("hello", &base, SynthesisProvider::Chunked))
            .await;

        assert!(matches!(result, Err(SynthesisError::Dependency(_))));
        assert!(!Path::new(&format!("{base}.mp3")).exists());
    }

    #[tokio::test]
    async fn streaming_path_uses_the_selected_encoding_extension() {
        struct CountingStream {
            bytes: Vec<u8>,
        }

        #[async_trait]
        impl StreamSynthesizer for CountingStream {
            async fn synthesize_to_file(
                &self,
                _text: &str,
                _voice_id: &str,
                _encoding: AudioEncoding,
                destination: &Path,
            ) -> Result<u64, SynthesisError> {
                tokio::fs::write(destination, &self.bytes)
                    .await
                    .map_err(|e| SynthesisError::Write(e.to_string()))?;
                Ok(self.bytes.len() as u64)
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("clip").display().to_string();
        let svc = TtsService::new(
            Arc::new(StaticChunks {
                calls: AtomicUsize::new(0),
                fail_at: None,
            }),
            Arc::new(CountingStream {
                bytes: vec![1, 2, 3, 4],
            }),
            VoiceResolver::new(Arc::new(EnglishDetector), VoiceCatalog::chunked_defaults()),
        );

        let filename = svc
            .synthesize(
                SynthesisRequest {
                    voice: VoiceChoice::Explicit("aura-asteria-en".to_string()),
                    ..SynthesisRequest::new("hello", &base, SynthesisProvider::Streaming)
                }
                .with_encoding(AudioEncoding::Flac),
            )
            .await
            .unwrap();

        assert_eq!(filename, format!("{base}.flac"));
        assert_eq!(std::fs::read(&filename).unwrap().len(), 4);
    }
}
