use async_trait::async_trait;

use crate::domain::tts::SynthesisError;

pub const DEFAULT_BASE_URL: &str = "https://translate.googleapis.com";

/// Language-detection backend used by automatic voice resolution
#[async_trait]
pub trait LanguageDetection: Send + Sync {
    /// Detect the language of `text`, returning a lowercase ISO 639-1 code.
    ///
    /// Network failures and unparsable responses surface as
    /// [`SynthesisError::Detection`].
    async fn detect(&self, text: &str) -> Result<String, SynthesisError>;
}

/// Detection via the public translate endpoint.
///
/// The translation result itself is discarded; only the detected source
/// language is extracted.
pub struct GoogleTranslateDetector {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslateDetector {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait]
impl LanguageDetection for GoogleTranslateDetector {
    async fn detect(&self, text: &str) -> Result<String, SynthesisError> {
        let url = format!(
            "{}/translate_a/single?client=gtx&sl=auto&tl=en&dt=t&q={}",
            self.base_url,
            urlencoding::encode(text),
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SynthesisError::Detection(format!("detection request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SynthesisError::Detection(format!(
                "detection backend returned HTTP {status}"
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| SynthesisError::Detection(format!("unparsable detection response: {e}")))?;

        // Response shape: [[..translations..], null, "<lang>", ...]
        let code = body
            .get(2)
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| {
                SynthesisError::Detection("no language code in detection response".to_string())
            })?;

        Ok(code.to_lowercase())
    }
}
