use std::collections::HashMap;
use std::sync::Arc;

use super::dto::{VoiceChoice, VoiceSelection};
use super::error::SynthesisError;
use crate::infrastructure::providers::LanguageDetection;

/// Well-known chunked-provider voices, a curated slice of the catalog
pub mod tiktok {
    pub const JESSIE: &str = "en_us_002";
    pub const FEMALE_ENGLISH_US: &str = "en_us_001";
    pub const JOEY: &str = "en_us_006";
    pub const PROFESSOR: &str = "en_us_007";
    pub const SCIENTIST: &str = "en_us_009";
    pub const CONFIDENCE: &str = "en_us_010";
    pub const NARRATOR: &str = "en_uk_001";
    pub const MALE_ENGLISH_UK: &str = "en_uk_003";
    pub const METRO: &str = "en_au_001";
    pub const SMOOTH: &str = "en_au_002";
    pub const STORY_TELLER: &str = "en_male_narration";
    pub const WACKY: &str = "en_male_funny";
    pub const EMPATHETIC: &str = "en_female_samc";
    pub const SERIOUS: &str = "en_male_cody";
    pub const ALFRED: &str = "en_male_jarvis";
    pub const GHOST_FACE: &str = "en_us_ghostface";
    pub const CHEWBACCA: &str = "en_us_chewbacca";
    pub const C3PO: &str = "en_us_c3po";
    pub const STITCH: &str = "en_us_stitch";
    pub const STORMTROOPER: &str = "en_us_stormtrooper";
    pub const ROCKET: &str = "en_us_rocket";
    pub const FRENCH_MALE_1: &str = "fr_001";
    pub const FRENCH_MALE_2: &str = "fr_002";
    pub const SPANISH_SPAIN_MALE: &str = "es_002";
    pub const SPANISH_MX_MALE: &str = "es_mx_002";
    pub const PORTUGUESE_BR_FEMALE_1: &str = "br_001";
    pub const PORTUGUESE_BR_FEMALE_2: &str = "br_003";
    pub const PORTUGUESE_BR_MALE: &str = "br_005";
    pub const GERMAN_FEMALE: &str = "de_001";
    pub const GERMAN_MALE: &str = "de_002";
    pub const INDONESIAN_FEMALE: &str = "id_001";
    pub const JAPANESE_FEMALE_1: &str = "jp_001";
    pub const JAPANESE_FEMALE_2: &str = "jp_003";
    pub const JAPANESE_MALE: &str = "jp_006";
    pub const KOREAN_MALE_1: &str = "kr_002";
    pub const KOREAN_FEMALE: &str = "kr_003";
    pub const VIETNAMESE_FEMALE: &str = "BV074_streaming";
    pub const VIETNAMESE_MALE: &str = "BV075_streaming";
}

/// Streaming-provider voice models (Aura family)
pub mod deepgram {
    pub const ASTERIA: &str = "aura-asteria-en";
    pub const ORPHEUS: &str = "aura-orpheus-en";
    pub const ANGUS: &str = "aura-angus-en";
    pub const ARCAS: &str = "aura-arcas-en";
    pub const ATHENA: &str = "aura-athena-en";
    pub const HELIOS: &str = "aura-helios-en";
    pub const HERA: &str = "aura-hera-en";
    pub const LUNA: &str = "aura-luna-en";
    pub const ORION: &str = "aura-orion-en";
    pub const PERSEUS: &str = "aura-perseus-en";
    pub const STELLA: &str = "aura-stella-en";
    pub const ZEUS: &str = "aura-zeus-en";
}

/// Immutable mapping from lowercase ISO 639-1 language codes to default
/// voice identifiers.
///
/// Constructed once at startup and passed into the resolver as
/// configuration; unknown codes resolve to the fallback (English) voice.
#[derive(Debug, Clone)]
pub struct VoiceCatalog {
    defaults: HashMap<&'static str, &'static str>,
    fallback: &'static str,
}

impl VoiceCatalog {
    pub fn new(defaults: HashMap<&'static str, &'static str>, fallback: &'static str) -> Self {
        Self { defaults, fallback }
    }

    /// Default per-language voices for the chunked provider
    pub fn chunked_defaults() -> Self {
        let defaults = HashMap::from([
            ("en", tiktok::JESSIE),
            ("es", tiktok::SPANISH_MX_MALE),
            ("fr", tiktok::FRENCH_MALE_1),
            ("pt", tiktok::PORTUGUESE_BR_FEMALE_1),
            ("de", tiktok::GERMAN_FEMALE),
            ("id", tiktok::INDONESIAN_FEMALE),
            ("ja", tiktok::JAPANESE_FEMALE_1),
            ("ko", tiktok::KOREAN_MALE_1),
            ("vi", tiktok::VIETNAMESE_FEMALE),
        ]);
        Self::new(defaults, tiktok::JESSIE)
    }

    /// Select the default voice for a language code
    pub fn voice_for(&self, language_code: &str) -> &'static str {
        self.defaults
            .get(language_code)
            .copied()
            .unwrap_or(self.fallback)
    }

    pub fn fallback_voice(&self) -> &'static str {
        self.fallback
    }
}

/// Maps a request's text and voice choice to a concrete voice identifier
pub struct VoiceResolver {
    detector: Arc<dyn LanguageDetection>,
    catalog: VoiceCatalog,
}

impl VoiceResolver {
    pub fn new(detector: Arc<dyn LanguageDetection>, catalog: VoiceCatalog) -> Self {
        Self { detector, catalog }
    }

    pub fn catalog(&self) -> &VoiceCatalog {
        &self.catalog
    }

    /// Resolve the voice for a request.
    ///
    /// An explicit voice is used verbatim and no detection call is made.
    /// Detection failures surface as [`SynthesisError::Detection`]; whether
    /// that downgrades to the fallback voice is the orchestrator's call, not
    /// ours.
    pub async fn resolve(
        &self,
        text: &str,
        choice: &VoiceChoice,
    ) -> Result<VoiceSelection, SynthesisError> {
        match choice {
            VoiceChoice::Explicit(voice_id) => Ok(VoiceSelection {
                detected_language: None,
                voice_id: voice_id.clone(),
            }),
            VoiceChoice::AutoDetect => {
                let language_code = self.detector.detect(text).await?;

                tracing::info!(
                    language_detected = %language_code,
                    "Language detected for voice selection"
                );

                let voice_id = self.catalog.voice_for(&language_code).to_string();
                Ok(VoiceSelection {
                    detected_language: Some(language_code),
                    voice_id,
                })
            }
        }
    }

    /// Selection used when detection failed and the caller's policy allows
    /// continuing with the default voice.
    pub fn fallback_selection(&self) -> VoiceSelection {
        VoiceSelection {
            detected_language: None,
            voice_id: self.catalog.fallback_voice().to_string(),
        }
    }
}
