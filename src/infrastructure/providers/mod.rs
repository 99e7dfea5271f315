pub mod deepgram_stt_provider;
pub mod deepgram_summary_provider;
pub mod deepgram_tts_provider;
pub mod edenai_summary_provider;
pub mod gemini_chat_provider;
pub mod google_stt_provider;
pub mod language_detector;
pub mod stt_provider;
pub mod tiktok_tts_provider;
pub mod tts_provider;

pub use deepgram_stt_provider::{DeepgramSttModel, DeepgramSttProvider};
pub use deepgram_summary_provider::DeepgramSummaryProvider;
pub use deepgram_tts_provider::DeepgramTtsProvider;
pub use edenai_summary_provider::{EdenaiSummaryProvider, Summary, SummaryBackend};
pub use gemini_chat_provider::GeminiChatProvider;
pub use google_stt_provider::GoogleSttProvider;
pub use language_detector::{GoogleTranslateDetector, LanguageDetection};
pub use stt_provider::{Transcript, TranscriptFetcher};
pub use tiktok_tts_provider::TikTokTtsProvider;
pub use tts_provider::{ChunkSynthesizer, StreamSynthesizer};
