pub mod assembler;
pub mod dto;
pub mod error;
pub mod segmenter;
pub mod service;
pub mod voice;

pub use dto::{
    AudioEncoding, DetectionPolicy, SynthesisProvider, SynthesisRequest, VoiceChoice,
    VoiceSelection,
};
pub use error::SynthesisError;
pub use segmenter::{ChunkPolicy, TextChunk};
pub use service::TtsService;
pub use voice::{VoiceCatalog, VoiceResolver};
