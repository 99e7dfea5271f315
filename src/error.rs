use crate::domain::tts::SynthesisError;

/// Main application error type
///
/// Collaborator services (playback, capture, transcription, summarization,
/// chat) report failures through this type. The synthesis pipeline has its
/// own taxonomy in [`SynthesisError`] which converts into this one at the
/// crate boundary.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    BadRequest(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<SynthesisError> for AppError {
    fn from(err: SynthesisError) -> Self {
        match err {
            SynthesisError::EmptyText => AppError::BadRequest(err.to_string()),
            SynthesisError::Write(msg) => AppError::Internal(msg),
            _ => AppError::ExternalService(err.to_string()),
        }
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_maps_to_bad_request() {
        let err = AppError::from(SynthesisError::EmptyText);
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn provider_errors_map_to_external_service() {
        let err = AppError::from(SynthesisError::InvalidSession);
        assert!(matches!(err, AppError::ExternalService(_)));
    }

    #[test]
    fn write_errors_map_to_internal() {
        let err = AppError::from(SynthesisError::Write("disk full".to_string()));
        assert!(matches!(err, AppError::Internal(_)));
    }
}
