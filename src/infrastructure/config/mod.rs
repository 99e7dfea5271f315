use serde::Deserialize;
use std::env;

/// Crate configuration, loaded once at startup
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Session cookie for the chunked-JSON synthesis provider
    pub tts_session_id: String,
    /// API token for the streaming synthesis / transcription / summarization provider
    pub deepgram_api_token: String,
    /// API key for the Google transcription backend (optional collaborator)
    pub google_api_key: Option<String>,
    /// API token for the Eden AI summarization backend (optional collaborator)
    pub edenai_api_token: Option<String>,
    /// API key for the language-model chat backend (optional collaborator)
    pub gemini_api_key: Option<String>,
    /// Request timeout in seconds; the caller-level timeout is the only
    /// cancellation mechanism in the pipeline
    pub http_timeout_secs: u64,
    pub environment: Environment,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            tts_session_id: env::var("TTS_SESSION_ID")?,
            deepgram_api_token: env::var("DEEPGRAM_API_TOKEN")?,
            google_api_key: env::var("GOOGLE_API_KEY").ok(),
            edenai_api_token: env::var("EDENAI_API_TOKEN").ok(),
            gemini_api_key: env::var("GEMINI_API_KEY").ok(),
            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
            environment: match env::var("ENVIRONMENT").as_deref() {
                Ok("production") => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}
