/// Errors raised by the synthesis pipeline
///
/// The `InvalidSession` / `ContentTooLong` / `InvalidVoice` /
/// `SessionNotFound` variants mirror the chunked provider's numeric status
/// protocol; everything it does not name maps to `UnknownProvider` carrying
/// the raw code for diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("input text is empty")]
    EmptyText,

    #[error("language detection failed: {0}")]
    Detection(String),

    #[error("session is no longer valid, attempt to obtain a new one")]
    InvalidSession,

    #[error("the provided content is too long")]
    ContentTooLong,

    #[error("the voice is invalid, refer to the list of acceptable voice values")]
    InvalidVoice,

    #[error("failed to locate the session credential")]
    SessionNotFound,

    #[error("provider returned unknown status code: {code}")]
    UnknownProvider { code: i64 },

    #[error("failed to write audio file: {0}")]
    Write(String),

    #[error("chunk {index} failed: {source}")]
    Chunk {
        index: usize,
        #[source]
        source: Box<SynthesisError>,
    },

    #[error("dependency error: {0}")]
    Dependency(String),
}

impl SynthesisError {
    /// Map the chunked provider's numeric status code to an error.
    ///
    /// Status 0 means success and maps to `None`.
    pub fn for_provider_status(code: i64) -> Option<Self> {
        match code {
            0 => None,
            1 => Some(Self::InvalidSession),
            2 => Some(Self::ContentTooLong),
            4 => Some(Self::InvalidVoice),
            5 => Some(Self::SessionNotFound),
            code => Some(Self::UnknownProvider { code }),
        }
    }

    /// Wrap a per-chunk failure with the chunk's ordinal position.
    pub fn for_chunk(index: usize, source: Self) -> Self {
        Self::Chunk {
            index,
            source: Box::new(source),
        }
    }
}
